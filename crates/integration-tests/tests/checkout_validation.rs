//! Checkout validation against a drifting catalog.
//!
//! Lines carry a frozen product snapshot, but [`validate_cart`] resolves
//! products live so it sees stock taken by other shoppers and products
//! pulled from the catalog after the lines were added.

#![allow(clippy::unwrap_used)]

use marigold_cart::{InMemoryCatalog, StockIssue, VariantSelection, validate_cart};

use marigold_integration_tests::{
    belt, fixture_catalog, kurta, medium_blue, memory_engine, saree,
};

#[tokio::test]
async fn test_fresh_cart_validates_clean() {
    let (mut engine, _sink) = memory_engine();
    engine.add_item(&kurta(), 2, medium_blue());
    engine.add_item(&belt(), 1, VariantSelection::new());

    let validation = validate_cart(engine.cart(), &fixture_catalog());
    assert!(validation.is_valid());

    engine.shutdown().await;
}

#[tokio::test]
async fn test_empty_cart_is_a_validation_issue() {
    let (engine, _sink) = memory_engine();
    let validation = validate_cart(engine.cart(), &fixture_catalog());
    assert_eq!(validation.issues, vec![StockIssue::EmptyCart]);
    engine.shutdown().await;
}

#[tokio::test]
async fn test_stock_taken_by_others_is_caught() {
    let (mut engine, _sink) = memory_engine();
    engine.add_item(&kurta(), 10, medium_blue());

    // Another shopper drains the Medium size down to 4.
    let mut drained = kurta();
    drained
        .variants
        .iter_mut()
        .find(|v| v.name == "Size")
        .unwrap()
        .options
        .iter_mut()
        .find(|o| o.value == "Medium")
        .unwrap()
        .stock = 4;
    let catalog = InMemoryCatalog::new(vec![drained, saree(), belt()]);

    let validation = validate_cart(engine.cart(), &catalog);
    assert_eq!(validation.issues.len(), 1);
    assert!(matches!(
        validation.issues[0],
        StockIssue::InsufficientStock {
            requested: 10,
            available: 4,
            ..
        }
    ));

    engine.shutdown().await;
}

#[tokio::test]
async fn test_delisted_product_is_caught() {
    let (mut engine, _sink) = memory_engine();
    engine.add_item(&saree(), 1, VariantSelection::new().with("Color", "Deep Red"));

    // Saree pulled from the catalog after it entered the cart.
    let catalog = InMemoryCatalog::new(vec![kurta(), belt()]);

    let validation = validate_cart(engine.cart(), &catalog);
    assert_eq!(validation.issues.len(), 1);
    assert!(matches!(
        validation.issues[0],
        StockIssue::ProductMissing { .. }
    ));

    engine.shutdown().await;
}

#[tokio::test]
async fn test_all_issues_reported_in_one_pass() {
    let (mut engine, _sink) = memory_engine();
    engine.add_item(&kurta(), 100, medium_blue());
    engine.add_item(&saree(), 1, VariantSelection::new().with("Color", "Deep Red"));

    let catalog = InMemoryCatalog::new(vec![kurta(), belt()]);
    let validation = validate_cart(engine.cart(), &catalog);

    assert_eq!(validation.issues.len(), 2);
    assert!(!validation.is_valid());

    engine.shutdown().await;
}

#[tokio::test]
async fn test_issue_messages_are_customer_facing() {
    let (mut engine, _sink) = memory_engine();
    engine.add_item(&kurta(), 100, medium_blue());

    let validation = validate_cart(engine.cart(), &fixture_catalog());
    assert_eq!(
        validation.issues[0].to_string(),
        "Premium Cotton Kurta - Only 12 items available, but 100 requested"
    );

    engine.shutdown().await;
}
