//! Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::lines::{CartLine, Quantity};

/// Errors that can occur while calculating totals.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The amount does not fit in minor units.
    #[error("amount overflows the supported range")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Price of `quantity` units at `unit_price` minor units each.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product does not fit in minor units.
pub fn line_total(
    unit_price: u64,
    quantity: Quantity,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError> {
    let minor = i64::try_from(unit_price)
        .ok()
        .and_then(|price| price.checked_mul(i64::from(quantity.get())))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, currency))
}

/// Calculates the total price of a list of cart lines.
///
/// An empty list totals zero in `currency`.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: a line or the running total does not fit in minor units.
/// - [`PricingError::Money`]: Wrapped money arithmetic error.
pub fn total_price<M>(
    lines: &[CartLine<M>],
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError> {
    let total = lines.iter().try_fold(
        Money::from_minor(0, currency),
        |acc, line| -> Result<_, PricingError> {
            let subtotal = line_total(line.unit_price, line.quantity, currency)?;

            acc.to_minor_units()
                .checked_add(subtotal.to_minor_units())
                .ok_or(PricingError::Overflow)?;

            Ok(acc.add(subtotal)?)
        },
    )?;

    Ok(total)
}
