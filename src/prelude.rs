//! Record Cart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, Mutation, Rejection},
    checkout::{
        CheckoutError, CheckoutOptions, CheckoutReceipt, HttpSalesClient, NewSale, SaleReceipt,
        SalesClient, SalesClientConfig, SalesClientError, checkout, purchase_history,
    },
    lines::{CartLine, Quantity, QuantityError, RESERVED_DETAIL_KEYS},
    pricing::PricingError,
    products::{Attributes, Product, ProductId},
    session::{Session, SessionError, SessionUser},
    snapshot::SnapshotError,
    storage::{FileStorage, MemoryStorage, Storage, StorageError},
    summary::{LineName, SummaryError, write_purchases, write_summary},
};
