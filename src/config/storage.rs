//! Storage Config

use std::path::PathBuf;

use clap::Args;
use rusty_money::iso::{self, Currency};

/// Cart storage settings.
#[derive(Debug, Args)]
pub(crate) struct StorageConfig {
    /// Directory holding the cart and session
    #[arg(long, global = true, env = "RECORD_CART_DATA_DIR", default_value = ".record-cart")]
    pub data_dir: PathBuf,

    /// ISO 4217 code of the currency prices are expressed in
    #[arg(long, global = true, env = "RECORD_CART_CURRENCY", default_value = "CLP")]
    pub currency: String,
}

impl StorageConfig {
    /// The configured currency.
    ///
    /// # Errors
    ///
    /// Returns an error message for codes that are not ISO 4217 currencies.
    pub(crate) fn currency(&self) -> Result<&'static Currency, String> {
        let code = self.currency.trim().to_ascii_uppercase();

        iso::find(&code).ok_or_else(|| format!("unknown currency code: {}", self.currency))
    }
}
