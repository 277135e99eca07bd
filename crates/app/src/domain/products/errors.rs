//! Products service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::products::models::ProductUuid;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    /// One or more requested products do not exist.
    #[error("missing product")]
    MissingProduct { missing: Vec<ProductUuid> },

    /// A fetched product had no matching entry in the request.
    #[error("product not found")]
    ProductNotFound,

    #[error("insufficient product quantity for {product}: {available} available, {requested} requested")]
    InsufficientQuantity {
        product: ProductUuid,
        available: u64,
        requested: u64,
    },

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ProductsServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::ProductNotFound,
            error => Self::Sql(error),
        }
    }
}
