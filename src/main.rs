//! Record Cart CLI

use std::process::ExitCode;

use tracing::error;

use crate::config::Config;

mod cli;
mod config;
mod observability;

#[tokio::main]
pub async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(error) => error.exit(),
    };

    if let Err(error) = observability::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("{error}");
        }

        return ExitCode::FAILURE;
    }

    if let Err(message) = cli::run(config).await {
        error!(%message, "command failed");

        #[expect(clippy::print_stderr, reason = "command errors are reported to the user")]
        {
            eprintln!("{message}");
        }

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
