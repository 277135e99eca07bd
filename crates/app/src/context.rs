//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::products::{PgProductsService, ProductsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool)))
    }

    #[must_use]
    pub fn from_db(db: Db) -> Self {
        Self {
            products: Arc::new(PgProductsService::new(db)),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::products::data::NewProduct, test::TestDb};

    use super::*;

    #[tokio::test]
    async fn from_db_serves_products_from_the_pool() -> TestResult {
        let test_db = TestDb::new().await;
        let ctx = AppContext::from_db(Db::new(test_db.pool().clone()));

        let created = ctx
            .products
            .create_product(NewProduct {
                name: "Stapler".to_string(),
                price: 450,
                quantity: 3,
            })
            .await?;

        let found = ctx.products.find_by_name("Stapler").await?;

        assert_eq!(found, Some(created));

        Ok(())
    }

    #[tokio::test]
    async fn unreachable_database_is_a_connection_error() {
        let result = AppContext::from_database_url("not a url").await;

        assert!(
            matches!(result, Err(AppInitError::Database(_))),
            "expected Database error"
        );
    }
}
