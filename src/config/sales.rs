//! Sales Config

use std::time::Duration;

use clap::Args;

use record_cart::checkout::SalesClientConfig;

/// Sales endpoint settings.
#[derive(Debug, Args)]
pub(crate) struct SalesConfig {
    /// Sales endpoint URL
    #[arg(
        long,
        global = true,
        env = "SALES_API_URL",
        default_value = "https://ragemusicbackend.onrender.com/api/ventas"
    )]
    pub sales_api_url: String,

    /// Sales request timeout in seconds
    #[arg(long, global = true, env = "SALES_API_TIMEOUT_SECONDS", default_value_t = 15u64)]
    pub sales_api_timeout_seconds: u64,
}

impl From<&SalesConfig> for SalesClientConfig {
    fn from(config: &SalesConfig) -> Self {
        SalesClientConfig {
            url: config.sales_api_url.clone(),
            timeout: Duration::from_secs(config.sales_api_timeout_seconds),
        }
    }
}
