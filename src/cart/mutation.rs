//! Mutation outcomes

use thiserror::Error;

/// Why a cart mutation was refused. A refused mutation leaves the cart untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Items are added at least one at a time.
    #[error("cannot add zero units")]
    ZeroQuantity,

    /// Quantities are set to one or more; removal goes through `remove_item`.
    #[error("quantity must be at least 1")]
    NonPositiveQuantity,

    /// The resulting quantity would not fit.
    #[error("quantity is too large")]
    QuantityOverflow,

    /// No line for the product.
    #[error("product is not in the cart")]
    NotInCart,

    /// The product details use a key the snapshot needs for the line itself.
    #[error("detail key `{0}` is reserved")]
    ReservedDetail(&'static str),
}

/// Outcome of a cart mutation.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The cart changed and was persisted.
    Applied,

    /// The cart was left unchanged.
    Rejected(Rejection),
}

impl Mutation {
    /// Whether the mutation was applied.
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    /// The rejection reason, if any.
    pub fn rejection(self) -> Option<Rejection> {
        match self {
            Self::Applied => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }
}
