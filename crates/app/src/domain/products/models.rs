//! Product Models

use jiff::Timestamp;
use serde::Serialize;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    /// Identifier assigned by storage on insert.
    pub uuid: ProductUuid,

    /// Display name. Not unique.
    pub name: String,

    /// Unit price in minor currency units.
    pub price: u64,

    /// Units in stock.
    pub quantity: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
