//! Cart behaviour against in-memory and file storage.

use rusty_money::{Money, iso::CLP};
use serde::{Deserialize, Serialize};
use tempfile::tempdir;
use testresult::TestResult;

use record_cart::{prelude::*, storage::CART_KEY};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Release {
    title: String,
    artist: String,
}

fn release(title: &str, artist: &str) -> Release {
    Release {
        title: title.to_string(),
        artist: artist.to_string(),
    }
}

#[test]
fn adding_the_same_product_twice_merges_lines() -> TestResult {
    let mut cart: Cart<_> = Cart::hydrate(MemoryStorage::new(), CLP);

    assert!(cart.add_item(Product::new(1, 1000)).is_applied());
    assert!(cart.add_item(Product::new(1, 1000)).is_applied());

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get(&ProductId::Int(1)).map(|line| line.quantity.get()), Some(2));
    assert_eq!(cart.total()?, Money::from_minor(2000, CLP));
    assert_eq!(cart.count(), 2);

    Ok(())
}

#[test]
fn repeated_adds_sum_quantities() {
    let mut cart: Cart<_> = Cart::hydrate(MemoryStorage::new(), CLP);

    for quantity in [3, 1, 4, 1, 5] {
        assert!(cart.add_items(Product::new("lp-42", 2500), quantity).is_applied());
    }

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.count(), 14);
}

#[test]
fn zero_quantity_update_leaves_line_alone() {
    let mut cart: Cart<_> = Cart::hydrate(MemoryStorage::new(), CLP);

    assert!(cart.add_items(Product::new(5, 500), 3).is_applied());

    for quantity in [0, -1, i64::MIN] {
        let mutation = cart.update_quantity(&ProductId::Int(5), quantity);

        assert!(!mutation.is_applied(), "{quantity} should be refused");
    }

    assert_eq!(cart.get(&ProductId::Int(5)).map(|line| line.quantity.get()), Some(3));
}

#[test]
fn update_sets_exact_quantity() {
    let mut cart: Cart<_> = Cart::hydrate(MemoryStorage::new(), CLP);

    assert!(cart.add_items(Product::new(5, 500), 3).is_applied());
    assert!(cart.update_quantity(&ProductId::Int(5), 1).is_applied());
    assert_eq!(cart.count(), 1);

    assert!(cart.update_quantity(&ProductId::Int(5), 12).is_applied());
    assert_eq!(cart.count(), 12);
}

#[test]
fn removing_a_line_is_persisted() -> TestResult {
    let storage = MemoryStorage::new();
    let mut cart: Cart<_> = Cart::hydrate(&storage, CLP);

    assert!(cart.add_item(Product::new(1, 1000)).is_applied());
    assert!(cart.add_item(Product::new(2, 2000)).is_applied());

    assert!(cart.remove_item(&ProductId::Int(2)).is_some());

    let stored = storage.get(CART_KEY)?.ok_or("cart snapshot missing")?;
    let lines: Vec<CartLine> = record_cart::snapshot::decode(&stored)?;

    assert_eq!(lines.len(), 1);
    assert_eq!(lines.first().map(|line| &line.product_id), Some(&ProductId::Int(1)));

    Ok(())
}

#[test]
fn add_then_remove_restores_previous_state() -> TestResult {
    let mut cart: Cart<_> = Cart::hydrate(MemoryStorage::new(), CLP);

    assert!(cart.add_items(Product::new(1, 1000), 2).is_applied());

    let before = cart.lines().to_vec();

    assert!(cart.add_item(Product::new(9, 300)).is_applied());
    assert!(cart.remove_item(&ProductId::Int(9)).is_some());

    assert_eq!(cart.lines(), before.as_slice());
    assert_eq!(cart.total()?, Money::from_minor(2000, CLP));

    Ok(())
}

#[test]
fn clear_empties_cart_and_totals() -> TestResult {
    let mut cart: Cart<_> = Cart::hydrate(MemoryStorage::new(), CLP);

    assert!(cart.add_items(Product::new(1, 1000), 2).is_applied());
    assert!(cart.add_item(Product::new(2, 990)).is_applied());

    cart.clear();

    assert!(cart.is_empty());
    assert_eq!(cart.count(), 0);
    assert_eq!(cart.total()?, Money::from_minor(0, CLP));

    Ok(())
}

#[test]
fn corrupt_snapshot_hydrates_empty() {
    for raw in ["not json", "{\"productId\":1}", "[{\"productId\":1}]", ""] {
        let storage = MemoryStorage::with_entries([(CART_KEY, raw)]);
        let cart: Cart<_> = Cart::hydrate(storage, CLP);

        assert!(cart.is_empty(), "{raw:?} should hydrate empty");
    }
}

#[test]
fn file_storage_round_trip_keeps_order_and_details() -> TestResult {
    let dir = tempdir()?;

    let mut cart = Cart::hydrate(FileStorage::new(dir.path()), CLP);

    assert!(
        cart.add_items(
            Product::with_details(3, 15_990, release("Kind of Blue", "Miles Davis")),
            2
        )
        .is_applied()
    );
    assert!(
        cart.add_item(Product::with_details("lp-1", 9_990, release("Blue Train", "John Coltrane")))
            .is_applied()
    );
    assert!(
        cart.add_item(Product::with_details(1, 12_500, release("Abbey Road", "The Beatles")))
            .is_applied()
    );

    let restored: Cart<_, Release> = Cart::hydrate(FileStorage::new(dir.path()), CLP);

    assert_eq!(restored.lines(), cart.lines());
    assert_eq!(restored.total()?, cart.total()?);
    assert_eq!(restored.count(), 4);

    Ok(())
}
