//! Cart snapshots
//!
//! The persisted form of a cart is a JSON array of lines, each an object with
//! `productId`, `unitPrice`, `quantity` and the line's display attributes
//! flattened alongside them:
//!
//! ```json
//! [{ "productId": 1, "unitPrice": 15990, "quantity": 2, "name": "Kind of Blue" }]
//! ```

use std::collections::HashSet;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{lines::CartLine, products::ProductId};

/// Errors encoding or decoding a cart snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot is not valid JSON or does not match the line layout.
    #[error("malformed cart snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two lines share a product id.
    #[error("cart snapshot holds product {0} more than once")]
    DuplicateProduct(ProductId),
}

/// Serialize `lines` into a snapshot string.
///
/// # Errors
///
/// Returns [`SnapshotError::Malformed`] if the line details cannot be serialized.
pub fn encode<M: Serialize>(lines: &[CartLine<M>]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(lines)?)
}

/// Parse a snapshot string into cart lines, preserving order.
///
/// # Errors
///
/// - [`SnapshotError::Malformed`]: the input is not a JSON array of well-formed lines
///   (this includes zero quantities and negative prices).
/// - [`SnapshotError::DuplicateProduct`]: a product id appears on more than one line.
pub fn decode<M: DeserializeOwned>(raw: &str) -> Result<Vec<CartLine<M>>, SnapshotError> {
    let lines: Vec<CartLine<M>> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(lines.len());

    for line in &lines {
        if !seen.insert(&line.product_id) {
            return Err(SnapshotError::DuplicateProduct(line.product_id.clone()));
        }
    }

    Ok(lines)
}
