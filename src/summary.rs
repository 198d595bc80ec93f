//! Cart summary

use std::io;

use serde::{Serialize, de::DeserializeOwned};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    checkout::SaleReceipt,
    lines::Quantity,
    pricing::{self, PricingError},
    products::Attributes,
    storage::Storage,
};

/// Errors that can occur when writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Error pricing a line or the cart.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error
    #[error("failed to write summary")]
    Io(#[from] io::Error),
}

/// Line details that can name the product they belong to.
pub trait LineName {
    /// Human readable product name, if known.
    fn line_name(&self) -> Option<&str>;
}

impl LineName for Attributes {
    fn line_name(&self) -> Option<&str> {
        ["name", "nombre", "title"]
            .iter()
            .find_map(|key| self.get(*key).and_then(|value| value.as_str()))
    }
}

/// Writes the cart as a table followed by the unit count and total.
///
/// # Errors
///
/// Returns a [`SummaryError`] if a price overflows or `out` cannot be written.
pub fn write_summary<S, M>(cart: &Cart<S, M>, mut out: impl io::Write) -> Result<(), SummaryError>
where
    S: Storage,
    M: Serialize + DeserializeOwned + LineName,
{
    if cart.is_empty() {
        writeln!(out, "Cart is empty")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Product", "Name", "Unit Price", "Qty", "Line Total"].map(String::from));

    for line in cart.iter() {
        let unit_price = pricing::line_total(line.unit_price, Quantity::ONE, cart.currency())?;

        builder.push_record([
            line.product_id.to_string(),
            line.details.line_name().unwrap_or("-").to_string(),
            unit_price.to_string(),
            line.quantity.to_string(),
            cart.line_total(line)?.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..5), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}")?;
    writeln!(out, "Items: {}", cart.count())?;
    writeln!(out, "Total: {}", cart.total()?)?;

    Ok(())
}

/// Writes a purchase history table, one row per sale.
///
/// # Errors
///
/// Returns a [`SummaryError`] if `out` cannot be written.
pub fn write_purchases(
    sales: &[SaleReceipt],
    mut out: impl io::Write,
) -> Result<(), SummaryError> {
    if sales.is_empty() {
        writeln!(out, "No purchases yet")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Order", "Date", "Status", "Items", "Total"].map(String::from));

    for sale in sales {
        builder.push_record([
            sale.id.map_or_else(|| "-".to_string(), |id| format!("#{id}")),
            sale.date()
                .and_then(|date| date.split('T').next())
                .unwrap_or("-")
                .to_string(),
            sale.status().unwrap_or("PENDIENTE").to_string(),
            sale.units().to_string(),
            sale.total().map_or_else(|| "-".to_string(), ToString::to_string),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..5), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}")?;

    Ok(())
}
