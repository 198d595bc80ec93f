//! Cart
//!
//! The cart engine: an ordered collection of [`CartLine`]s keyed by product id,
//! written through to [`Storage`] after every applied mutation.

use rusty_money::{Money, iso::Currency};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    lines::{self, CartLine, Quantity, QuantityError},
    pricing::{self, PricingError},
    products::{Attributes, Product, ProductId},
    snapshot::{self, SnapshotError},
    storage::{CART_KEY, Storage, StorageError},
};

mod mutation;

pub use mutation::{Mutation, Rejection};

/// Errors saving the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// The lines could not be serialized.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// The snapshot could not be written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Shopping cart.
///
/// Built once per session with [`Cart::hydrate`] and then handed to whatever needs
/// it; mutations take `&mut self`, so there is exactly one writer at a time.
#[derive(Debug)]
pub struct Cart<S, M = Attributes> {
    lines: Vec<CartLine<M>>,
    storage: S,
    currency: &'static Currency,
    saved: bool,
}

impl<S, M> Cart<S, M>
where
    S: Storage,
    M: Serialize + DeserializeOwned,
{
    /// Load the cart from `storage`.
    ///
    /// A missing, unreadable or malformed snapshot yields an empty cart; the anomaly
    /// is logged, never returned. The loaded state is written back so that the
    /// store always holds a well-formed snapshot afterwards.
    pub fn hydrate(storage: S, currency: &'static Currency) -> Self {
        let lines = match storage.get(CART_KEY) {
            Ok(Some(raw)) => snapshot::decode(&raw).unwrap_or_else(|error| {
                warn!(%error, "discarding unreadable cart snapshot");
                Vec::new()
            }),
            Ok(None) => {
                debug!("no cart snapshot stored, starting empty");
                Vec::new()
            }
            Err(error) => {
                warn!(%error, "failed to read cart snapshot, starting empty");
                Vec::new()
            }
        };

        let mut cart = Self {
            lines,
            storage,
            currency,
            saved: false,
        };

        info!(
            lines = cart.len(),
            items = cart.count(),
            currency = cart.currency.iso_alpha_code,
            "cart hydrated"
        );

        cart.persist();

        cart
    }

    /// Start an empty cart without reading `storage`. The first mutation overwrites
    /// whatever snapshot was stored.
    pub fn empty(storage: S, currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            storage,
            currency,
            saved: false,
        }
    }

    /// Add one unit of `product`.
    pub fn add_item(&mut self, product: Product<M>) -> Mutation {
        self.add_items(product, 1)
    }

    /// Add `quantity` units of `product`.
    ///
    /// If the product is already in the cart its quantity is increased and the
    /// existing line's price and details are kept; otherwise a new line is appended.
    /// Products whose details use a [`lines::RESERVED_DETAIL_KEYS`] key are refused.
    pub fn add_items(&mut self, product: Product<M>, quantity: u32) -> Mutation {
        let Some(quantity) = Quantity::new(quantity) else {
            return rejected(&product.id, Rejection::ZeroQuantity);
        };

        if let Some(key) = lines::reserved_detail_key(&product.details) {
            return rejected(&product.id, Rejection::ReservedDetail(key));
        }

        if let Some(line) = self.line_mut(&product.id) {
            let Some(updated) = line.quantity.checked_add(quantity) else {
                return rejected(&product.id, Rejection::QuantityOverflow);
            };

            line.quantity = updated;

            debug!(product = %product.id, quantity = updated.get(), "cart line incremented");
        } else {
            debug!(product = %product.id, quantity = quantity.get(), "cart line added");

            self.lines.push(CartLine::new(product, quantity));
        }

        self.persist();

        Mutation::Applied
    }

    /// Remove the line for `product`, returning it. Absent products are ignored.
    pub fn remove_item(&mut self, product: &ProductId) -> Option<CartLine<M>> {
        let position = self
            .lines
            .iter()
            .position(|line| line.product_id == *product)?;

        let removed = self.lines.remove(position);

        debug!(product = %product, "cart line removed");

        self.persist();

        Some(removed)
    }

    /// Set the quantity of `product` to exactly `quantity`.
    ///
    /// Values below one are rejected: a line is removed with [`Cart::remove_item`],
    /// never by zeroing its quantity.
    pub fn update_quantity(&mut self, product: &ProductId, quantity: i64) -> Mutation {
        let quantity = match Quantity::try_from(quantity) {
            Ok(quantity) => quantity,
            Err(QuantityError::NonPositive(_)) => {
                return rejected(product, Rejection::NonPositiveQuantity);
            }
            Err(QuantityError::TooLarge(_)) => {
                return rejected(product, Rejection::QuantityOverflow);
            }
        };

        let Some(line) = self.line_mut(product) else {
            return rejected(product, Rejection::NotInCart);
        };

        line.quantity = quantity;

        debug!(product = %product, quantity = quantity.get(), "cart line quantity set");

        self.persist();

        Mutation::Applied
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();

        debug!("cart cleared");

        self.persist();
    }

    /// Sum of `unit_price * quantity` over all lines, exact in minor units.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the total overflows.
    pub fn total(&self) -> Result<Money<'static, Currency>, PricingError> {
        pricing::total_price(&self.lines, self.currency)
    }

    /// Price of a single line.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the line total overflows.
    pub fn line_total(
        &self,
        line: &CartLine<M>,
    ) -> Result<Money<'static, Currency>, PricingError> {
        pricing::line_total(line.unit_price, line.quantity, self.currency)
    }

    /// Total number of units across all lines.
    pub fn count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .fold(0, u64::saturating_add)
    }

    /// The line for `product`, if any.
    pub fn get(&self, product: &ProductId) -> Option<&CartLine<M>> {
        self.lines.iter().find(|line| line.product_id == *product)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine<M>] {
        &self.lines
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<M>> {
        self.lines.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency of all prices in the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Whether storage holds the current lines, i.e. the last write-through (or
    /// [`Cart::save`]) succeeded.
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Write the current lines to storage.
    ///
    /// Mutations call this themselves; it is exposed for callers that want to retry
    /// after a failed write, typically when [`Cart::is_saved`] is false.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the snapshot cannot be encoded or written.
    pub fn save(&mut self) -> Result<(), CartError> {
        self.saved = false;

        let raw = snapshot::encode(&self.lines)?;

        self.storage.put(CART_KEY, &raw)?;
        self.saved = true;

        Ok(())
    }

    fn persist(&mut self) {
        if let Err(error) = self.save() {
            warn!(%error, "failed to persist cart, in-memory cart stays authoritative");
        }
    }

    fn line_mut(&mut self, product: &ProductId) -> Option<&mut CartLine<M>> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == *product)
    }
}

fn rejected(product: &ProductId, rejection: Rejection) -> Mutation {
    debug!(product = %product, %rejection, "cart mutation rejected");

    Mutation::Rejected(rejection)
}
