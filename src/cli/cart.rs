//! Cart commands

use std::io::{self, Write};

use clap::Args;
use rusty_money::iso::Currency;
use serde_json::Value;

use record_cart::{
    cart::{Cart, Mutation},
    lines::RESERVED_DETAIL_KEYS,
    products::{Attributes, Product, ProductId},
    storage::{FileStorage, Storage},
    summary::write_summary,
};

use super::Command;

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Product id
    #[arg(long)]
    id: String,

    /// Unit price in minor units of the configured currency
    #[arg(long)]
    price: u64,

    /// Units to add
    #[arg(long, default_value_t = 1)]
    quantity: u32,

    /// Product name shown in the summary
    #[arg(long)]
    name: Option<String>,

    /// Extra product attribute as key=value; the value is read as JSON when it parses
    #[arg(long = "attr", value_parser = parse_attribute)]
    attributes: Vec<(String, Value)>,
}

#[derive(Debug, Args)]
pub(crate) struct RemoveArgs {
    /// Product id
    #[arg(long)]
    id: String,
}

#[derive(Debug, Args)]
pub(crate) struct UpdateArgs {
    /// Product id
    #[arg(long)]
    id: String,

    /// New quantity; values below one are refused
    #[arg(long, allow_negative_numbers = true)]
    quantity: i64,
}

pub(super) fn run(
    storage: FileStorage,
    currency: &'static Currency,
    command: Command,
) -> Result<(), String> {
    let mut cart: Cart<FileStorage> = Cart::hydrate(storage, currency);

    let message = match command {
        Command::Show => {
            return write_summary(&cart, io::stdout().lock())
                .map_err(|error| format!("failed to print cart: {error}"));
        }
        Command::Add(args) => {
            let id = ProductId::parse(&args.id);
            let details = details(args.name, args.attributes);

            let product = Product::with_details(id.clone(), args.price, details);

            applied(cart.add_items(product, args.quantity))?;
            ensure_saved(&mut cart)?;

            in_cart(&cart, &id)
        }
        Command::Remove(args) => {
            let id = ProductId::parse(&args.id);

            match cart.remove_item(&id) {
                Some(_) => {
                    ensure_saved(&mut cart)?;

                    format!("{id}: removed")
                }
                None => format!("{id}: not in cart"),
            }
        }
        Command::Update(args) => {
            let id = ProductId::parse(&args.id);

            applied(cart.update_quantity(&id, args.quantity))?;
            ensure_saved(&mut cart)?;

            in_cart(&cart, &id)
        }
        Command::Clear => {
            cart.clear();
            ensure_saved(&mut cart)?;

            "cart cleared".to_string()
        }
        Command::Count => cart.count().to_string(),
        Command::Total => cart
            .total()
            .map_err(|error| format!("failed to price cart: {error}"))?
            .to_string(),
        Command::Login(_) | Command::Logout | Command::Checkout(_) | Command::Purchases => {
            return Err("not a cart command".to_string());
        }
    };

    writeln!(io::stdout().lock(), "{message}")
        .map_err(|error| format!("failed to write output: {error}"))
}

fn in_cart(cart: &Cart<FileStorage>, id: &ProductId) -> String {
    let quantity = cart.get(id).map_or(0, |line| line.quantity.get());

    format!("{id}: {quantity} in cart")
}

fn details(name: Option<String>, attributes: Vec<(String, Value)>) -> Attributes {
    let mut details: Attributes = attributes.into_iter().collect();

    if let Some(name) = name {
        details.insert("name".to_string(), Value::String(name));
    }

    details
}

fn parse_attribute(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;

    let key = key.trim();

    if key.is_empty() {
        return Err(format!("attribute key cannot be empty in `{raw}`"));
    }

    if RESERVED_DETAIL_KEYS.contains(&key) {
        return Err(format!("attribute key `{key}` is reserved"));
    }

    let value =
        serde_json::from_str(value).unwrap_or_else(|_err| Value::String(value.to_string()));

    Ok((key.to_string(), value))
}

fn applied(mutation: Mutation) -> Result<(), String> {
    match mutation {
        Mutation::Applied => Ok(()),
        Mutation::Rejected(rejection) => Err(format!("cart unchanged: {rejection}")),
    }
}

/// Mutations write through on their own; only a failed write is retried here, so
/// the storage error reaches the user.
fn ensure_saved<S: Storage>(cart: &mut Cart<S>) -> Result<(), String> {
    if cart.is_saved() {
        return Ok(());
    }

    cart.save()
        .map_err(|error| format!("failed to save cart: {error}"))
}
