//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form display attributes carried alongside a product (name, image, stock hint...).
pub type Attributes = Map<String, Value>;

/// Product identifier, as issued by the catalogue backend.
///
/// The backend hands out numeric ids, but string ids are accepted too so that
/// snapshots written by other clients still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric id.
    Int(i64),

    /// String id.
    Text(String),
}

impl ProductId {
    /// Parse an id from user input, ignoring surrounding whitespace: integers become
    /// [`ProductId::Int`], anything else [`ProductId::Text`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        raw.parse::<i64>()
            .map_or_else(|_err| Self::Text(raw.to_string()), Self::Int)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Int(id) => Display::fmt(id, f),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ProductId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A product as offered by the catalogue, ready to be put in a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Product<M = Attributes> {
    /// Product id
    pub id: ProductId,

    /// Unit price in minor currency units
    pub unit_price: u64,

    /// Display metadata, opaque to the cart
    pub details: M,
}

impl<M: Default> Product<M> {
    /// Create a product with empty details.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, unit_price: u64) -> Self {
        Self::with_details(id, unit_price, M::default())
    }
}

impl<M> Product<M> {
    /// Create a product with the given details.
    pub fn with_details(id: impl Into<ProductId>, unit_price: u64, details: M) -> Self {
        Self {
            id: id.into(),
            unit_price,
            details,
        }
    }
}
