//! Cart Lines

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    num::NonZeroU32,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::{Attributes, Product, ProductId};

/// Snapshot keys owned by [`CartLine`]; line details cannot use them.
pub const RESERVED_DETAIL_KEYS: [&str; 3] = ["productId", "unitPrice", "quantity"];

/// Errors building a [`Quantity`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    /// Quantities start at one.
    #[error("quantity must be at least 1, got {0}")]
    NonPositive(i64),

    /// The value does not fit a cart quantity.
    #[error("quantity {0} is too large")]
    TooLarge(i64),
}

/// Number of units of a product held in the cart. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// The raw value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Add `extra` units, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, extra: Self) -> Option<Self> {
        self.0.checked_add(extra.get()).map(Self)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 1 {
            return Err(QuantityError::NonPositive(value));
        }

        u32::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(QuantityError::TooLarge(value))
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// One distinct product held in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine<M = Attributes> {
    /// Product id; unique within a cart
    pub product_id: ProductId,

    /// Unit price in minor currency units
    pub unit_price: u64,

    /// Units held
    pub quantity: Quantity,

    /// Display metadata copied from the product
    #[serde(flatten)]
    pub details: M,
}

impl<M> CartLine<M> {
    /// Create a line for `product` holding `quantity` units.
    pub fn new(product: Product<M>, quantity: Quantity) -> Self {
        Self {
            product_id: product.id,
            unit_price: product.unit_price,
            quantity,
            details: product.details,
        }
    }
}

/// The first key of `details` that would collide with a [`CartLine`] field once
/// flattened into the snapshot.
pub fn reserved_detail_key<M: Serialize>(details: &M) -> Option<&'static str> {
    let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(details) else {
        return None;
    };

    RESERVED_DETAIL_KEYS
        .into_iter()
        .find(|key| fields.contains_key(*key))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn zero_is_not_a_quantity() {
        assert_eq!(Quantity::new(0), None);
        assert_eq!(Quantity::new(3).map(Quantity::get), Some(3));
    }

    #[test]
    fn try_from_rejects_non_positive() {
        assert_eq!(Quantity::try_from(0), Err(QuantityError::NonPositive(0)));
        assert_eq!(Quantity::try_from(-4), Err(QuantityError::NonPositive(-4)));
    }

    #[test]
    fn try_from_rejects_too_large() {
        let too_large = i64::from(u32::MAX) + 1;

        assert_eq!(
            Quantity::try_from(too_large),
            Err(QuantityError::TooLarge(too_large))
        );
    }

    #[test]
    fn checked_add_detects_overflow() {
        let max = Quantity::new(u32::MAX);

        assert_eq!(max.and_then(|q| q.checked_add(Quantity::ONE)), None);
        assert_eq!(
            Quantity::ONE.checked_add(Quantity::ONE).map(Quantity::get),
            Some(2)
        );
    }

    #[test]
    fn line_serializes_with_flattened_details() -> TestResult {
        let mut details = Attributes::new();
        details.insert("name".to_string(), json!("Kind of Blue"));

        let line = CartLine::new(Product::with_details(1, 1000, details), Quantity::ONE);

        assert_eq!(
            serde_json::to_value(&line)?,
            json!({ "productId": 1, "unitPrice": 1000, "quantity": 1, "name": "Kind of Blue" })
        );

        Ok(())
    }

    #[test]
    fn reserved_keys_are_detected_in_details() {
        let mut details = Attributes::new();
        details.insert("artist".to_string(), json!("Nina Simone"));

        assert_eq!(reserved_detail_key(&details), None);

        details.insert("quantity".to_string(), json!(5));

        assert_eq!(reserved_detail_key(&details), Some("quantity"));
        assert_eq!(reserved_detail_key(&()), None);
    }

    #[test]
    fn zero_quantity_fails_to_deserialize() {
        let result = serde_json::from_value::<CartLine>(
            json!({ "productId": 1, "unitPrice": 1000, "quantity": 0 }),
        );

        assert!(result.is_err(), "zero quantity should be rejected");
    }
}
