//! Checkout
//!
//! Turns the cart into sales on the shop backend, one request per line, and
//! empties the cart once every line has been accepted.

use rusty_money::{Money, iso::Currency};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cart::Cart,
    pricing::PricingError,
    products::ProductId,
    session::Session,
    storage::Storage,
};

mod client;
mod sale;

pub use client::{
    DEFAULT_TIMEOUT, HttpSalesClient, MockSalesClient, SalesClient, SalesClientConfig,
    SalesClientError,
};
pub use sale::{NewSale, Reference, SaleReceipt};

/// Sale status recorded for checked-out lines: confirmed.
pub const CONFIRMED_SALE_STATUS: u32 = 2;

/// Errors that abort a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to buy.
    #[error("cart is empty")]
    EmptyCart,

    /// Checkout needs a signed-in user.
    #[error("sign in to check out")]
    NotSignedIn,

    /// A line or the cart total could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The backend did not accept the sale for a line. Lines before it were
    /// already recorded; the cart is left as it was.
    #[error("sale for product {product_id} failed")]
    Sale {
        /// Product of the failing line
        product_id: ProductId,

        /// Underlying client error
        #[source]
        source: SalesClientError,
    },

    /// The backend did not return the purchase history.
    #[error("failed to load purchases")]
    Purchases(#[source] SalesClientError),
}

/// Payment, shipping and status ids sent with every sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutOptions {
    /// Payment method id
    pub payment_method: u32,

    /// Shipping method id
    pub shipping_method: u32,

    /// Sale status id
    pub sale_status: u32,
}

impl Default for CheckoutOptions {
    fn default() -> Self {
        Self {
            payment_method: 1,
            shipping_method: 1,
            sale_status: CONFIRMED_SALE_STATUS,
        }
    }
}

/// Result of a completed checkout.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    /// Sales recorded, in cart order
    pub sales: Vec<SaleReceipt>,

    /// Amount charged
    pub total: Money<'static, Currency>,

    /// Units bought
    pub count: u64,
}

/// Submit one sale per cart line, then clear the cart.
///
/// Lines are submitted in cart order and the first failure stops the checkout.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`]: the cart has no lines; nothing is sent.
/// - [`CheckoutError::NotSignedIn`]: no session; nothing is sent.
/// - [`CheckoutError::Pricing`]: a total overflowed; nothing is sent.
/// - [`CheckoutError::Sale`]: the backend refused a line; the cart is unchanged.
pub async fn checkout<S, M, C>(
    cart: &mut Cart<S, M>,
    client: &C,
    session: Option<&Session>,
    options: CheckoutOptions,
) -> Result<CheckoutReceipt, CheckoutError>
where
    S: Storage,
    M: Serialize + DeserializeOwned,
    C: SalesClient + ?Sized,
{
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let session = session.ok_or(CheckoutError::NotSignedIn)?;
    let total = cart.total()?;

    let sales = cart
        .iter()
        .map(|line| {
            let line_total = cart.line_total(line)?;

            Ok(NewSale::for_line(
                line,
                line_total,
                options,
                Some(session.user().id),
            ))
        })
        .collect::<Result<Vec<_>, PricingError>>()?;

    let mut receipts = Vec::with_capacity(sales.len());

    for sale in &sales {
        let receipt = client
            .create_sale(sale, session.token())
            .await
            .map_err(|source| {
                warn!(product = %sale.product.id, %source, "checkout stopped");

                CheckoutError::Sale {
                    product_id: sale.product.id.clone(),
                    source,
                }
            })?;

        receipts.push(receipt);
    }

    let count = cart.count();

    cart.clear();

    info!(lines = receipts.len(), items = count, %total, "checkout completed");

    Ok(CheckoutReceipt {
        sales: receipts,
        total,
        count,
    })
}

/// Sales recorded for the signed-in user, as listed by the backend.
///
/// # Errors
///
/// - [`CheckoutError::NotSignedIn`]: no session; nothing is sent.
/// - [`CheckoutError::Purchases`]: the backend refused the request.
pub async fn purchase_history<C>(
    client: &C,
    session: Option<&Session>,
) -> Result<Vec<SaleReceipt>, CheckoutError>
where
    C: SalesClient + ?Sized,
{
    let session = session.ok_or(CheckoutError::NotSignedIn)?;

    let sales = client
        .list_sales(session.token())
        .await
        .map_err(CheckoutError::Purchases)?;

    debug!(user = session.user().id, sales = sales.len(), "purchase history loaded");

    Ok(sales)
}
