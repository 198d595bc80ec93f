//! Record Cart
//!
//! Shopping cart engine for a record-shop storefront: an ordered set of cart lines
//! keyed by product, exact money totals, write-through persistence to client-side
//! key-value storage, and checkout against the shop's sales endpoint.

pub mod cart;
pub mod checkout;
pub mod lines;
pub mod pricing;
pub mod products;
pub mod session;
pub mod snapshot;
pub mod storage;
pub mod summary;

pub mod prelude;
