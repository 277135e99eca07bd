//! In-memory products repository.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::domain::products::{
    data::NewProduct,
    models::{Product, ProductUuid},
    repository::ProductsRepository,
};

/// Products table held in process memory.
///
/// Rows keep insertion order, which stands in for the storage order a real
/// table scan would produce. Intended for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryProductsRepository {
    rows: RwLock<Vec<Product>>,
    save_calls: AtomicUsize,
}

impl MemoryProductsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save_products` calls received, including rejected ones.
    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::Relaxed)
    }

    /// Copy of every stored row.
    pub async fn snapshot(&self) -> Vec<Product> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl ProductsRepository for MemoryProductsRepository {
    async fn insert_product(&self, product: NewProduct) -> Result<Product, sqlx::Error> {
        let now = Timestamp::now();

        let product = Product {
            uuid: ProductUuid::new(),
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            created_at: now,
            updated_at: now,
        };

        self.rows.write().await.push(product.clone());

        Ok(product)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, sqlx::Error> {
        let rows = self.rows.read().await;

        Ok(rows.iter().find(|product| product.name == name).cloned())
    }

    async fn find_by_uuids(&self, uuids: &[ProductUuid]) -> Result<Vec<Product>, sqlx::Error> {
        let rows = self.rows.read().await;

        Ok(rows
            .iter()
            .filter(|product| uuids.contains(&product.uuid))
            .cloned()
            .collect())
    }

    async fn save_products(&self, products: &[Product]) -> Result<Vec<Product>, sqlx::Error> {
        self.save_calls.fetch_add(1, Ordering::Relaxed);

        let mut rows = self.rows.write().await;

        // Resolve every row before writing so an unknown one leaves the table untouched.
        let positions = products
            .iter()
            .map(|product| {
                rows.iter()
                    .position(|row| row.uuid == product.uuid)
                    .ok_or(sqlx::Error::RowNotFound)
            })
            .collect::<Result<Vec<usize>, _>>()?;

        let now = Timestamp::now();
        let mut saved = Vec::with_capacity(products.len());

        for (position, product) in positions.into_iter().zip(products) {
            let Some(row) = rows.get_mut(position) else {
                return Err(sqlx::Error::RowNotFound);
            };

            row.name.clone_from(&product.name);
            row.price = product.price;
            row.quantity = product.quantity;
            row.updated_at = now;

            saved.push(row.clone());
        }

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn new_product(name: &str, quantity: u64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: 100,
            quantity,
        }
    }

    #[tokio::test]
    async fn find_by_uuids_follows_insertion_order() -> TestResult {
        let repository = MemoryProductsRepository::new();

        let a = repository.insert_product(new_product("A", 1)).await?;
        let b = repository.insert_product(new_product("B", 2)).await?;

        let found = repository.find_by_uuids(&[b.uuid, a.uuid]).await?;

        assert_eq!(found, vec![a, b]);

        Ok(())
    }

    #[tokio::test]
    async fn save_with_unknown_row_writes_nothing() -> TestResult {
        let repository = MemoryProductsRepository::new();

        let mut known = repository.insert_product(new_product("Known", 5)).await?;
        known.quantity = 1;

        let ghost = Product {
            uuid: ProductUuid::new(),
            ..known.clone()
        };

        let result = repository.save_products(&[known.clone(), ghost]).await;

        assert!(
            matches!(result, Err(sqlx::Error::RowNotFound)),
            "expected RowNotFound, got {result:?}"
        );

        let stored = repository.find_by_uuids(&[known.uuid]).await?;

        assert_eq!(stored.first().map(|p| p.quantity), Some(5));
        assert_eq!(repository.save_calls(), 1);

        Ok(())
    }
}
