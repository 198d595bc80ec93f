//! Sale payloads
//!
//! Field names follow the sales endpoint of the shop backend.

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    lines::CartLine,
    products::{Attributes, ProductId},
};

use super::CheckoutOptions;

/// Reference to a backend entity by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference<T> {
    /// Entity id
    pub id: T,
}

impl<T> Reference<T> {
    /// Reference entity `id`.
    pub fn new(id: T) -> Self {
        Self { id }
    }
}

/// A sale-creation request for one cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSale {
    /// Units sold
    #[serde(rename = "cantidad")]
    pub quantity: u32,

    /// Line total in minor units
    #[serde(rename = "precioTotal")]
    pub total_price: i64,

    /// Product sold
    #[serde(rename = "producto")]
    pub product: Reference<ProductId>,

    /// Sale status
    #[serde(rename = "estadoVenta")]
    pub status: Reference<u32>,

    /// Payment method
    #[serde(rename = "pago")]
    pub payment: Reference<u32>,

    /// Shipping method
    #[serde(rename = "envio")]
    pub shipping: Reference<u32>,

    /// Buyer, when known
    #[serde(rename = "usuario", skip_serializing_if = "Option::is_none")]
    pub user: Option<Reference<u64>>,
}

impl NewSale {
    /// Build the request for `line`, whose total is `total`.
    pub fn for_line<M>(
        line: &CartLine<M>,
        total: Money<'_, Currency>,
        options: CheckoutOptions,
        user: Option<u64>,
    ) -> Self {
        Self {
            quantity: line.quantity.get(),
            total_price: total.to_minor_units(),
            product: Reference::new(line.product_id.clone()),
            status: Reference::new(options.sale_status),
            payment: Reference::new(options.payment_method),
            shipping: Reference::new(options.shipping_method),
            user: user.map(Reference::new),
        }
    }
}

/// The sale record returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SaleReceipt {
    /// Backend sale id
    #[serde(default)]
    pub id: Option<u64>,

    /// Remaining fields, uninterpreted
    #[serde(flatten)]
    pub extra: Attributes,
}

impl SaleReceipt {
    /// Sale date as sent by the backend.
    pub fn date(&self) -> Option<&str> {
        self.extra.get("fecha").and_then(Value::as_str)
    }

    /// Sale status name.
    pub fn status(&self) -> Option<&str> {
        self.extra
            .get("estado")
            .and_then(Value::as_str)
            .filter(|status| !status.is_empty())
    }

    /// Amount charged, as reported by the backend.
    pub fn total(&self) -> Option<&Value> {
        self.extra
            .get("total")
            .or_else(|| self.extra.get("precioTotal"))
            .filter(|total| !total.is_null())
    }

    /// Units sold: the sum over `detalles`, or the sale's own `cantidad`.
    pub fn units(&self) -> u64 {
        match self.extra.get("detalles").and_then(Value::as_array) {
            Some(details) => details
                .iter()
                .filter_map(|detail| detail.get("cantidad").and_then(Value::as_u64))
                .fold(0, u64::saturating_add),
            None => self
                .extra
                .get("cantidad")
                .and_then(Value::as_u64)
                .unwrap_or_default(),
        }
    }
}
