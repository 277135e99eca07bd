//! Products service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashSet;
use tracing::{Span, info, warn};

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, QuantityUpdate},
        errors::ProductsServiceError,
        models::{Product, ProductUuid},
        repository::{PgProductsRepository, ProductsRepository},
    },
};

/// Product inventory operations over an injected storage repository.
#[derive(Debug, Clone)]
pub struct ProductsInventory<R> {
    repository: R,
}

/// Inventory backed by `PostgreSQL`.
pub type PgProductsService = ProductsInventory<PgProductsRepository>;

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_repository(PgProductsRepository::new(db))
    }
}

impl<R: ProductsRepository> ProductsInventory<R> {
    #[must_use]
    pub fn with_repository(repository: R) -> Self {
        Self { repository }
    }

    /// The storage repository this inventory reads and writes through.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    async fn fetch_all(
        &self,
        uuids: &[ProductUuid],
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let mut seen = FxHashSet::default();

        let requested: Vec<ProductUuid> = uuids
            .iter()
            .copied()
            .filter(|uuid| seen.insert(*uuid))
            .collect();

        if requested.is_empty() {
            return Ok(Vec::new());
        }

        let products = self.repository.find_by_uuids(&requested).await?;

        if products.len() != requested.len() {
            let found: FxHashSet<ProductUuid> = products.iter().map(|p| p.uuid).collect();

            let missing: Vec<ProductUuid> = requested
                .into_iter()
                .filter(|uuid| !found.contains(uuid))
                .collect();

            warn!(missing_count = missing.len(), "requested products are missing");

            return Err(ProductsServiceError::MissingProduct { missing });
        }

        Ok(products)
    }
}

/// Subtract each product's requested amount from its stock.
///
/// The first product whose stock cannot cover its request aborts the whole batch.
fn apply_decrements(
    products: Vec<Product>,
    updates: &[QuantityUpdate],
) -> Result<Vec<Product>, ProductsServiceError> {
    products
        .into_iter()
        .map(|mut product| {
            let update = updates
                .iter()
                .find(|update| update.uuid == product.uuid)
                .ok_or(ProductsServiceError::ProductNotFound)?;

            let Some(remaining) = product.quantity.checked_sub(update.quantity) else {
                warn!(
                    product_uuid = %product.uuid,
                    available = product.quantity,
                    requested = update.quantity,
                    "insufficient product quantity"
                );

                return Err(ProductsServiceError::InsufficientQuantity {
                    product: product.uuid,
                    available: product.quantity,
                    requested: update.quantity,
                });
            };

            product.quantity = remaining;

            Ok(product)
        })
        .collect()
}

#[async_trait]
impl<R: ProductsRepository> ProductsService for ProductsInventory<R> {
    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(product_uuid = tracing::field::Empty),
        err
    )]
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let created = self.repository.insert_product(product).await?;

        Span::current().record("product_uuid", tracing::field::display(created.uuid));

        info!(product_uuid = %created.uuid, "created product");

        Ok(created)
    }

    #[tracing::instrument(name = "products.service.find_by_name", skip(self), err)]
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductsServiceError> {
        Ok(self.repository.find_by_name(name).await?)
    }

    #[tracing::instrument(
        name = "products.service.find_all_by_id",
        skip(self, products),
        fields(requested_count = products.len()),
        err
    )]
    async fn find_all_by_id(
        &self,
        products: &[ProductUuid],
    ) -> Result<Vec<Product>, ProductsServiceError> {
        self.fetch_all(products).await
    }

    #[tracing::instrument(
        name = "products.service.update_quantity",
        skip(self, updates),
        fields(update_count = updates.len()),
        err
    )]
    async fn update_quantity(
        &self,
        updates: &[QuantityUpdate],
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let uuids: Vec<ProductUuid> = updates.iter().map(|update| update.uuid).collect();

        let products = self.fetch_all(&uuids).await?;

        if products.is_empty() {
            return Ok(products);
        }

        let updated = apply_decrements(products, updates)?;

        let saved = self.repository.save_products(&updated).await?;

        info!(product_count = saved.len(), "updated product quantities");

        Ok(saved)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Creates a product; storage assigns its identifier.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Retrieve a product by exact name, or `None` when nothing matches.
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductsServiceError>;

    /// Retrieve every requested product, failing when any one of them is missing.
    async fn find_all_by_id(
        &self,
        products: &[ProductUuid],
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Decrement stock for each requested product and persist the batch.
    async fn update_quantity(
        &self,
        updates: &[QuantityUpdate],
    ) -> Result<Vec<Product>, ProductsServiceError>;
}
