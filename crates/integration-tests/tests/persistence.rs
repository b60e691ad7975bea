//! Snapshot durability across engine restarts.
//!
//! Each test stands up an engine over a [`JsonFileStore`] in a temp
//! directory, drives it, shuts it down (which drains the persistence
//! worker), and then reopens the same file with a fresh engine the way a
//! new CLI invocation or browser session would.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use marigold_cart::{
    CartEngine, CartStore, CartTotals, JsonFileStore, PricingConfig, RecordingSink,
    VariantSelection,
};

use marigold_integration_tests::{kurta, medium_blue, saree};

fn open(path: &Path) -> CartEngine {
    CartEngine::start(
        PricingConfig::default(),
        Arc::new(JsonFileStore::new(path)),
        Arc::new(RecordingSink::new()),
    )
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("cart.json");

    let mut engine = open(&path);
    engine.add_item(&kurta(), 2, medium_blue());
    engine.add_item(&saree(), 1, VariantSelection::new().with("Color", "Deep Red"));
    let saved = engine.cart().clone();
    engine.shutdown().await;

    let reopened = open(&path);
    assert_eq!(reopened.cart().id, saved.id);
    assert_eq!(reopened.cart().lines, saved.lines);
    assert_eq!(reopened.cart().totals, saved.totals);
    assert_eq!(reopened.cart().created_at, saved.created_at);
    reopened.shutdown().await;
}

#[tokio::test]
async fn test_missing_file_starts_empty() {
    let dir = tempfile::TempDir::new().unwrap();
    let engine = open(&dir.path().join("never-written.json"));
    assert!(engine.cart().is_empty());
    assert_eq!(*engine.totals(), CartTotals::zero());
    engine.shutdown().await;
}

#[tokio::test]
async fn test_malformed_snapshot_discarded_and_overwritten() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("cart.json");
    fs::write(&path, b"{ not json").unwrap();

    let mut engine = open(&path);
    assert!(engine.cart().is_empty());

    // The next mutation replaces the corrupt file with a valid snapshot.
    engine.add_item(&kurta(), 1, medium_blue());
    engine.shutdown().await;

    let reloaded = JsonFileStore::new(&path).load().unwrap().unwrap();
    assert_eq!(reloaded.lines.len(), 1);
}

#[tokio::test]
async fn test_tampered_totals_healed_on_load() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("cart.json");

    let mut engine = open(&path);
    engine.add_item(&kurta(), 2, medium_blue());
    let honest = *engine.totals();
    engine.shutdown().await;

    // Corrupt the persisted total in place.
    let mut doc: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    doc["totals"]["total"] = Value::String("1".to_owned());
    fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();

    let reopened = open(&path);
    assert_eq!(*reopened.totals(), honest);
    reopened.shutdown().await;
}

#[tokio::test]
async fn test_zero_quantity_lines_dropped_on_load() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("cart.json");

    let mut engine = open(&path);
    engine.add_item(&kurta(), 2, medium_blue());
    engine.shutdown().await;

    let mut doc: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    doc["lines"][0]["quantity"] = Value::from(0);
    fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();

    let reopened = open(&path);
    assert!(reopened.cart().is_empty());
    assert_eq!(*reopened.totals(), CartTotals::zero());
    reopened.shutdown().await;
}

#[tokio::test]
async fn test_only_latest_state_is_persisted() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("cart.json");

    let mut engine = open(&path);
    let line = engine.add_item(&kurta(), 1, medium_blue());
    engine.update_quantity(&line, 4);
    engine.update_quantity(&line, 7);
    engine.shutdown().await;

    let snapshot = JsonFileStore::new(&path).load().unwrap().unwrap();
    assert_eq!(snapshot.lines[0].quantity, 7);
}
