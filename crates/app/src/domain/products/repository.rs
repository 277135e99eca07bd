//! Products Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::products::{
        data::NewProduct,
        models::{Product, ProductUuid},
    },
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const FIND_PRODUCT_BY_NAME_SQL: &str = include_str!("sql/find_product_by_name.sql");
const FIND_PRODUCTS_BY_UUIDS_SQL: &str = include_str!("sql/find_products_by_uuids.sql");
const SAVE_PRODUCTS_SQL: &str = include_str!("sql/save_products.sql");

/// PostgreSQL-backed products repository.
#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    db: Db,
}

impl PgProductsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    async fn insert_product(&self, product: NewProduct) -> Result<Product, sqlx::Error> {
        let price = to_bigint(product.price, "price")?;
        let quantity = to_bigint(product.quantity, "quantity")?;

        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(product.name)
            .bind(price)
            .bind(quantity)
            .fetch_one(self.db.pool())
            .await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(FIND_PRODUCT_BY_NAME_SQL)
            .bind(name)
            .fetch_optional(self.db.pool())
            .await
    }

    async fn find_by_uuids(&self, uuids: &[ProductUuid]) -> Result<Vec<Product>, sqlx::Error> {
        let uuids: Vec<Uuid> = uuids.iter().map(|uuid| uuid.into_uuid()).collect();

        query_as::<Postgres, Product>(FIND_PRODUCTS_BY_UUIDS_SQL)
            .bind(uuids)
            .fetch_all(self.db.pool())
            .await
    }

    async fn save_products(&self, products: &[Product]) -> Result<Vec<Product>, sqlx::Error> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let mut uuids = Vec::with_capacity(products.len());
        let mut names = Vec::with_capacity(products.len());
        let mut prices = Vec::with_capacity(products.len());
        let mut quantities = Vec::with_capacity(products.len());

        for product in products {
            uuids.push(product.uuid.into_uuid());
            names.push(product.name.clone());
            prices.push(to_bigint(product.price, "price")?);
            quantities.push(to_bigint(product.quantity, "quantity")?);
        }

        let mut tx = self.db.pool().begin().await?;

        let saved = query_as::<Postgres, Product>(SAVE_PRODUCTS_SQL)
            .bind(uuids)
            .bind(names)
            .bind(prices)
            .bind(quantities)
            .fetch_all(&mut *tx)
            .await?;

        // RETURNING order is unspecified; hand rows back in input order.
        let mut saved: FxHashMap<ProductUuid, Product> = saved
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        // A short batch drops `tx` uncommitted, rolling back the rows that did match.
        let saved = products
            .iter()
            .map(|product| saved.remove(&product.uuid).ok_or(sqlx::Error::RowNotFound))
            .collect::<Result<Vec<Product>, _>>()?;

        tx.commit().await?;

        Ok(saved)
    }
}

/// Narrow storage interface behind the products service.
#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// Persist a new product, letting storage assign its identifier.
    async fn insert_product(&self, product: NewProduct) -> Result<Product, sqlx::Error>;

    /// Oldest product with exactly this name, if any.
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, sqlx::Error>;

    /// Every stored product whose identifier is in `uuids`, in storage order.
    async fn find_by_uuids(&self, uuids: &[ProductUuid]) -> Result<Vec<Product>, sqlx::Error>;

    /// Write the whole batch in one call and return the stored rows in input order.
    async fn save_products(&self, products: &[Product]) -> Result<Vec<Product>, sqlx::Error>;
}

fn to_bigint(value: u64, column: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn try_get_unsigned(row: &PgRow, column: &str) -> sqlx::Result<u64> {
    let value: i64 = row.try_get(column)?;

    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price: try_get_unsigned(row, "price")?,
            quantity: try_get_unsigned(row, "quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
