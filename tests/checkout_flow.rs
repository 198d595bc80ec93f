//! Checkout against a mocked sales endpoint.

use std::sync::{Arc, Mutex};

use rusty_money::{Money, iso::CLP};
use testresult::TestResult;

use record_cart::{checkout::MockSalesClient, prelude::*};

#[tokio::test]
async fn signed_in_checkout_records_every_line() -> TestResult {
    let storage = MemoryStorage::new();
    let session = Session::login(&storage, SessionUser::new(42), "token-42")?;

    let mut cart: Cart<_> = Cart::hydrate(&storage, CLP);

    assert!(cart.add_items(Product::new(10, 15_990), 2).is_applied());
    assert!(cart.add_item(Product::new(11, 9_990)).is_applied());

    let submitted = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&submitted);

    let mut client = MockSalesClient::new();

    client
        .expect_create_sale()
        .times(2)
        .withf(|sale, token| token == "token-42" && sale.user.is_some())
        .returning(move |sale, _| {
            if let Ok(mut sales) = recorder.lock() {
                sales.push(sale.clone());
            }

            Ok(SaleReceipt::default())
        });

    let receipt = checkout(&mut cart, &client, Some(&session), CheckoutOptions::default()).await?;

    assert_eq!(receipt.total, Money::from_minor(41_970, CLP));
    assert_eq!(receipt.count, 3);
    assert!(cart.is_empty());

    let reloaded: Cart<_> = Cart::hydrate(&storage, CLP);
    assert!(reloaded.is_empty(), "cleared cart should be persisted");

    let sales = submitted.lock().map_err(|error| error.to_string())?;
    let totals: Vec<i64> = sales.iter().map(|sale| sale.total_price).collect();

    assert_eq!(totals, vec![31_980, 9_990]);

    Ok(())
}

#[tokio::test]
async fn restored_session_is_required() -> TestResult {
    let storage = MemoryStorage::new();

    Session::login(&storage, SessionUser::new(42), "token-42")?;
    Session::logout(&storage)?;

    let mut cart: Cart<_> = Cart::hydrate(&storage, CLP);

    assert!(cart.add_item(Product::new(10, 15_990)).is_applied());

    let mut client = MockSalesClient::new();
    client.expect_create_sale().never();

    let session = Session::restore(&storage);
    let result = checkout(&mut cart, &client, session.as_ref(), CheckoutOptions::default()).await;

    assert!(matches!(result, Err(CheckoutError::NotSignedIn)), "got {result:?}");
    assert_eq!(cart.count(), 1);

    Ok(())
}

#[tokio::test]
async fn purchases_follow_checkout() -> TestResult {
    let storage = MemoryStorage::new();
    Session::login(&storage, SessionUser::new(42), "token-42")?;

    let session = Session::restore(&storage).ok_or("session should restore")?;
    let mut cart: Cart<_> = Cart::hydrate(&storage, CLP);

    assert!(cart.add_items(Product::new(10, 15_990), 2).is_applied());

    let mut client = MockSalesClient::new();

    client.expect_create_sale().once().returning(|sale, _| {
        let mut extra = Attributes::new();
        extra.insert("cantidad".to_string(), sale.quantity.into());
        extra.insert("precioTotal".to_string(), sale.total_price.into());

        Ok(SaleReceipt {
            id: Some(100),
            extra,
        })
    });

    client
        .expect_list_sales()
        .once()
        .withf(|token| token == "token-42")
        .returning(|_| {
            Ok(vec![SaleReceipt {
                id: Some(100),
                ..SaleReceipt::default()
            }])
        });

    checkout(&mut cart, &client, Some(&session), CheckoutOptions::default()).await?;

    let history = purchase_history(&client, Some(&session)).await?;

    assert_eq!(history.iter().map(|sale| sale.id).collect::<Vec<_>>(), vec![Some(100)]);

    Ok(())
}
