//! Checkout command

use std::{
    error::Error as _,
    io::{self, Write},
};

use clap::Args;
use rusty_money::iso::Currency;

use record_cart::{
    cart::Cart,
    checkout::{self, CONFIRMED_SALE_STATUS, CheckoutOptions, HttpSalesClient, SalesClientConfig},
    session::Session,
    storage::FileStorage,
    summary::write_purchases,
};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Payment method id
    #[arg(long, default_value_t = 1)]
    payment: u32,

    /// Shipping method id
    #[arg(long, default_value_t = 1)]
    shipping: u32,

    /// Sale status id
    #[arg(long, default_value_t = CONFIRMED_SALE_STATUS)]
    status: u32,
}

impl From<CheckoutArgs> for CheckoutOptions {
    fn from(args: CheckoutArgs) -> Self {
        CheckoutOptions {
            payment_method: args.payment,
            shipping_method: args.shipping,
            sale_status: args.status,
        }
    }
}

pub(super) async fn run(
    storage: FileStorage,
    currency: &'static Currency,
    sales: SalesClientConfig,
    args: CheckoutArgs,
) -> Result<(), String> {
    let session = Session::restore(&storage);
    let mut cart: Cart<FileStorage> = Cart::hydrate(storage, currency);

    let client = HttpSalesClient::new(sales)
        .map_err(|error| format!("failed to build sales client: {error}"))?;

    let receipt = checkout::checkout(&mut cart, &client, session.as_ref(), args.into())
        .await
        .map_err(|error| format!("checkout failed: {}", describe(&error)))?;

    writeln!(
        io::stdout().lock(),
        "{} sale(s) recorded, {} item(s), total {}",
        receipt.sales.len(),
        receipt.count,
        receipt.total
    )
    .map_err(|error| format!("failed to write output: {error}"))
}

pub(super) async fn purchases(
    storage: &FileStorage,
    sales: SalesClientConfig,
) -> Result<(), String> {
    let session = Session::restore(storage);

    let client = HttpSalesClient::new(sales)
        .map_err(|error| format!("failed to build sales client: {error}"))?;

    let history = checkout::purchase_history(&client, session.as_ref())
        .await
        .map_err(|error| describe(&error))?;

    write_purchases(&history, io::stdout().lock())
        .map_err(|error| format!("failed to print purchases: {error}"))
}

fn describe(error: &checkout::CheckoutError) -> String {
    error
        .source()
        .map_or_else(|| error.to_string(), |source| format!("{error}: {source}"))
}
