//! Session commands

use std::io::{self, Write};

use clap::Args;

use record_cart::{
    session::{Session, SessionUser},
    storage::FileStorage,
};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Backend user id
    #[arg(long)]
    user_id: u64,

    /// Bearer token issued by the login endpoint
    #[arg(long, env = "RECORD_CART_TOKEN", hide_env_values = true)]
    token: String,

    /// Display name
    #[arg(long)]
    name: Option<String>,
}

pub(super) fn login(storage: &FileStorage, args: LoginArgs) -> Result<(), String> {
    let user = SessionUser {
        name: args.name,
        ..SessionUser::new(args.user_id)
    };

    let session = Session::login(storage, user, args.token)
        .map_err(|error| format!("failed to sign in: {error}"))?;

    let who = session
        .user()
        .name
        .clone()
        .unwrap_or_else(|| format!("user {}", session.user().id));

    writeln!(io::stdout().lock(), "signed in as {who}")
        .map_err(|error| format!("failed to write output: {error}"))
}

pub(super) fn logout(storage: &FileStorage) -> Result<(), String> {
    Session::logout(storage).map_err(|error| format!("failed to sign out: {error}"))?;

    writeln!(io::stdout().lock(), "signed out")
        .map_err(|error| format!("failed to write output: {error}"))
}
