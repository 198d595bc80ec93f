//! Command dispatch

use clap::Subcommand;

use record_cart::storage::FileStorage;

use crate::config::Config;

mod cart;
mod checkout;
mod session;

pub(crate) use cart::{AddArgs, RemoveArgs, UpdateArgs};
pub(crate) use checkout::CheckoutArgs;
pub(crate) use session::LoginArgs;

/// Cart, session and checkout commands.
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print the cart lines, unit count and total
    Show,

    /// Add a product to the cart
    Add(AddArgs),

    /// Remove a product from the cart
    Remove(RemoveArgs),

    /// Set the quantity of a product already in the cart
    Update(UpdateArgs),

    /// Empty the cart
    Clear,

    /// Print the number of units in the cart
    Count,

    /// Print the cart total
    Total,

    /// Store a signed-in user and bearer token
    Login(LoginArgs),

    /// Forget the signed-in user
    Logout,

    /// Submit the cart as sales and empty it
    Checkout(CheckoutArgs),

    /// List the signed-in user's past purchases
    Purchases,
}

/// Run the configured command.
///
/// # Errors
///
/// Returns a message for the user when the command fails.
pub(crate) async fn run(config: Config) -> Result<(), String> {
    let storage = FileStorage::new(config.storage.data_dir.clone());

    match config.command {
        Command::Login(args) => session::login(&storage, args),
        Command::Logout => session::logout(&storage),
        Command::Checkout(args) => {
            let currency = config.storage.currency()?;
            let sales = (&config.sales).into();

            checkout::run(storage, currency, sales, args).await
        }
        Command::Purchases => checkout::purchases(&storage, (&config.sales).into()).await,
        command => {
            let currency = config.storage.currency()?;

            cart::run(storage, currency, command)
        }
    }
}
