//! Integration tests for Marigold.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p marigold-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - End-to-end cart mutations and totals
//! - `persistence` - Snapshot durability across engine restarts
//! - `checkout_validation` - Stock validation against a drifting catalog
//!
//! This crate's library is the shared fixture set: a small catalog with
//! multi-axis variants, discounted prices, and stock ceilings that are
//! tighter at the variant level than the product level.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use marigold_cart::{
    CartEngine, InMemoryCatalog, MemoryStore, PricingConfig, Product, ProductVariant,
    RecordingSink, VariantOption, VariantSelection,
};
use marigold_core::{CurrencyCode, Price, ProductId};

/// Premium Cotton Kurta: two variant axes, on sale, product ceiling 38.
#[must_use]
pub fn kurta() -> Product {
    Product {
        id: ProductId::new("prod-1"),
        name: "Premium Cotton Kurta".to_owned(),
        description: "Handcrafted premium cotton kurta.".to_owned(),
        price: Price::from_major(2499, CurrencyCode::INR),
        original_price: Some(Price::from_major(2999, CurrencyCode::INR)),
        category: "Traditional Wear".to_owned(),
        variants: vec![
            variant(
                "Size",
                &[("Small", 10), ("Medium", 15), ("Large", 8), ("Extra Large", 5)],
            ),
            variant(
                "Color",
                &[("Royal Blue", 12), ("Ivory White", 15), ("Maroon", 11)],
            ),
        ],
        stock: 38,
        featured: true,
        tags: vec!["traditional".to_owned(), "cotton".to_owned()],
    }
}

/// Designer Silk Saree: single variant axis, on sale, ceiling 21.
#[must_use]
pub fn saree() -> Product {
    Product {
        id: ProductId::new("prod-2"),
        name: "Designer Silk Saree".to_owned(),
        description: "Exquisite silk saree with zari work.".to_owned(),
        price: Price::from_major(8999, CurrencyCode::INR),
        original_price: Some(Price::from_major(12999, CurrencyCode::INR)),
        category: "Women's Collection".to_owned(),
        variants: vec![variant(
            "Color",
            &[("Deep Red", 8), ("Emerald Green", 6), ("Navy Blue", 7)],
        )],
        stock: 21,
        featured: true,
        tags: vec!["silk".to_owned(), "saree".to_owned()],
    }
}

/// Handcrafted Leather Belt: no variants, below the free-shipping threshold
/// on its own.
#[must_use]
pub fn belt() -> Product {
    Product {
        id: ProductId::new("prod-5"),
        name: "Handcrafted Leather Belt".to_owned(),
        description: "Premium genuine leather belt.".to_owned(),
        price: Price::from_major(1999, CurrencyCode::INR),
        original_price: None,
        category: "Accessories".to_owned(),
        variants: Vec::new(),
        stock: 51,
        featured: false,
        tags: vec!["leather".to_owned(), "belt".to_owned()],
    }
}

/// Catalog holding all fixture products.
#[must_use]
pub fn fixture_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(vec![kurta(), saree(), belt()])
}

/// Medium / Royal Blue, the canonical kurta selection used across tests.
#[must_use]
pub fn medium_blue() -> VariantSelection {
    VariantSelection::new()
        .with("Size", "Medium")
        .with("Color", "Royal Blue")
}

/// Engine over an in-memory store with a recording sink, for tests that do
/// not care about durability.
#[must_use]
pub fn memory_engine() -> (CartEngine, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let engine = CartEngine::start(
        PricingConfig::default(),
        Arc::new(MemoryStore::new()),
        sink.clone(),
    );
    (engine, sink)
}

fn variant(name: &str, options: &[(&str, u32)]) -> ProductVariant {
    ProductVariant {
        name: name.to_owned(),
        options: options
            .iter()
            .map(|&(value, stock)| VariantOption {
                value: value.to_owned(),
                stock,
                price_modifier: None,
            })
            .collect(),
    }
}
