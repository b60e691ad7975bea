//! Marigold Cart - Cart & pricing engine.
//!
//! The storefront's one non-trivial subsystem: deriving a stable identity
//! for each (product, variant-selection) pairing, pricing lines with
//! per-variant modifiers, keeping aggregate totals consistent with line
//! items, and validating quantities against multi-level stock ceilings.
//!
//! # Architecture
//!
//! - [`types`] - catalog and cart domain types
//! - [`identity`] - order-independent line-item identity
//! - [`pricing`] - effective unit price with variant modifiers
//! - [`stock`] - multi-level stock ceilings and checkout validation
//! - [`totals`] - pure totals computation
//! - [`engine`] - the cart aggregate (all mutations go through it)
//! - [`catalog`] - read-only product repository
//! - [`store`] - snapshot schema and durable stores
//! - [`persist`] - fire-and-forget persistence worker
//! - [`events`] - advisory notifications
//! - [`config`] - pricing rules and engine configuration
//!
//! Page rendering, authentication, and the catalog's contents are external
//! collaborators; the engine consumes them through the narrow interfaces in
//! [`catalog`], [`store`], and [`events`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod engine;
pub mod events;
pub mod identity;
pub mod persist;
pub mod pricing;
pub mod stock;
pub mod store;
pub mod totals;
pub mod types;

pub use catalog::{CatalogReader, InMemoryCatalog};
pub use config::{CartConfig, ConfigError, PricingConfig};
pub use engine::CartEngine;
pub use events::{CartEvent, NotificationSink, RecordingSink, TracingSink};
pub use identity::{canonical_key, line_item_id};
pub use persist::PersistHandle;
pub use pricing::unit_price;
pub use stock::{
    CartValidation, StockIssue, StockStatus, available_stock, check, is_in_stock, is_satisfiable,
    validate_cart,
};
pub use store::{CartSnapshot, CartStore, JsonFileStore, LineSnapshot, MemoryStore, StoreError};
pub use totals::compute_totals;
pub use types::{
    Cart, CartTotals, LineItem, Product, ProductVariant, VariantOption, VariantSelection,
};
