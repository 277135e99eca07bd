//! Products Data

use std::str::FromStr;

use crate::domain::products::models::ProductUuid;

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: u64,
    pub quantity: u64,
}

/// A request to remove `quantity` units from the stock of product `uuid`.
///
/// `quantity` is always an amount to take away, never the target stock level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityUpdate {
    pub uuid: ProductUuid,
    pub quantity: u64,
}

/// Failure to parse a [`QuantityUpdate`] from `<uuid>=<quantity>`.
#[derive(Debug, thiserror::Error)]
pub enum ParseQuantityUpdateError {
    #[error("expected <uuid>=<quantity>")]
    MissingSeparator,

    #[error("invalid product uuid")]
    Uuid(#[from] uuid::Error),

    #[error("invalid quantity")]
    Quantity(#[from] std::num::ParseIntError),
}

impl FromStr for QuantityUpdate {
    type Err = ParseQuantityUpdateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (uuid, quantity) = value
            .split_once('=')
            .ok_or(ParseQuantityUpdateError::MissingSeparator)?;

        Ok(Self {
            uuid: uuid.trim().parse()?,
            quantity: quantity.trim().parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_uuid_and_quantity_pair() -> TestResult {
        let update: QuantityUpdate = "0190b1d4-7c3a-7d2e-9f00-6a1b2c3d4e5f=3".parse()?;

        assert_eq!(
            update.uuid.to_string(),
            "0190b1d4-7c3a-7d2e-9f00-6a1b2c3d4e5f"
        );
        assert_eq!(update.quantity, 3);

        Ok(())
    }

    #[test]
    fn rejects_missing_separator() {
        let result = "0190b1d4-7c3a-7d2e-9f00-6a1b2c3d4e5f".parse::<QuantityUpdate>();

        assert!(
            matches!(result, Err(ParseQuantityUpdateError::MissingSeparator)),
            "expected MissingSeparator, got {result:?}"
        );
    }

    #[test]
    fn rejects_negative_quantity() {
        let result = "0190b1d4-7c3a-7d2e-9f00-6a1b2c3d4e5f=-2".parse::<QuantityUpdate>();

        assert!(
            matches!(result, Err(ParseQuantityUpdateError::Quantity(_))),
            "expected Quantity error, got {result:?}"
        );
    }
}
