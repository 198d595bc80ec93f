//! Command line configuration

use clap::Parser;

use crate::{
    cli::Command,
    config::{observability::LoggingConfig, sales::SalesConfig, storage::StorageConfig},
};

pub(crate) mod observability;
pub(crate) mod sales;
pub(crate) mod storage;

/// Record Cart command line configuration
#[derive(Debug, Parser)]
#[command(name = "record-cart", about = "Record shop cart", long_about = None)]
pub(crate) struct Config {
    /// Cart storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Sales endpoint settings.
    #[command(flatten)]
    pub sales: SalesConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Config::command().debug_assert();
    }

    #[test]
    fn global_options_after_subcommand() -> TestResult {
        let config = Config::try_parse_from([
            "record-cart",
            "show",
            "--data-dir",
            "/tmp/cart",
            "--currency",
            "usd",
        ])?;

        assert_eq!(config.storage.data_dir.to_str(), Some("/tmp/cart"));
        assert_eq!(config.storage.currency()?.iso_alpha_code, "USD");
        assert!(matches!(config.command, Command::Show));

        Ok(())
    }
}
