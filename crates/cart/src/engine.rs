//! The cart aggregate.
//!
//! [`CartEngine`] owns the cart and is the only way to mutate it. Every
//! mutation is a total function from one valid cart to another: it rebuilds
//! the line collection, recomputes totals, refreshes the update timestamp,
//! and hands a snapshot to the persistence worker, in that order. Malformed
//! inputs (unknown line ids, zero quantities) are no-ops or clamped, never
//! errors.
//!
//! The engine performs no locking: it assumes one logical mutator at a time,
//! which `&mut self` on every mutation makes structural. Hosts with multiple
//! writers must serialize access externally.

use std::sync::Arc;

use tracing::{debug, info, warn};

use marigold_core::{LineItemId, ProductId};

use crate::config::PricingConfig;
use crate::events::{CartEvent, NotificationSink};
use crate::identity;
use crate::persist::PersistHandle;
use crate::pricing;
use crate::stock::{self, StockStatus};
use crate::store::{CartSnapshot, CartStore};
use crate::totals::compute_totals;
use crate::types::{Cart, CartTotals, LineItem, Product, VariantSelection};

/// The cart & pricing engine.
pub struct CartEngine {
    cart: Cart,
    pricing: PricingConfig,
    persist: PersistHandle,
    sink: Arc<dyn NotificationSink>,
}

impl CartEngine {
    /// Create an engine with a fresh empty cart.
    #[must_use]
    pub fn new(pricing: PricingConfig, persist: PersistHandle, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            cart: Cart::new(),
            pricing,
            persist,
            sink,
        }
    }

    /// Create an engine from a persisted snapshot, if one exists.
    ///
    /// Totals are recomputed from the loaded lines (the persisted figures
    /// are never trusted). A missing snapshot starts an empty cart; a
    /// malformed one is discarded with a warning rather than failing
    /// startup. The snapshot may have been written by another session.
    #[must_use]
    pub fn from_store(
        pricing: PricingConfig,
        store: &dyn CartStore,
        persist: PersistHandle,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let cart = match store.load() {
            Ok(Some(snapshot)) => {
                let cart = snapshot.restore(&pricing);
                info!(cart_id = %cart.id, lines = cart.lines.len(), "cart loaded from store");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "discarding unreadable cart snapshot; starting empty");
                Cart::new()
            }
        };
        Self {
            cart,
            pricing,
            persist,
            sink,
        }
    }

    /// Convenience: load from the store and spawn the persistence worker on
    /// the same store.
    #[must_use]
    pub fn start(
        pricing: PricingConfig,
        store: Arc<dyn CartStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let persist = PersistHandle::spawn(store.clone());
        Self::from_store(pricing, store.as_ref(), persist, sink)
    }

    /// The current cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The pricing rules in effect.
    #[must_use]
    pub const fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a product to the cart.
    ///
    /// If a line with the same product and set-equal selection already
    /// exists, its quantity grows by `quantity` and its frozen unit price is
    /// kept; otherwise a new line is created at the current effective price.
    /// A zero `quantity` is clamped to 1. Stock is not enforced here;
    /// callers use [`Self::stock_status`] as a policy choice.
    ///
    /// Returns the identity of the affected line.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: u32,
        selection: VariantSelection,
    ) -> LineItemId {
        let quantity = quantity.max(1);
        let line_id = identity::line_item_id(&product.id, &selection);

        let event = if let Some(line) = self.cart.lines.iter_mut().find(|l| l.id == line_id) {
            line.quantity += quantity;
            debug!(line_id = %line_id, quantity = line.quantity, "merged into existing line");
            CartEvent::QuantityIncreased {
                product_name: product.name.clone(),
                quantity: line.quantity,
            }
        } else {
            let unit_price = pricing::unit_price(product, &selection);
            self.cart.lines.push(LineItem {
                id: line_id.clone(),
                product_id: product.id.clone(),
                product: product.clone(),
                quantity,
                unit_price,
                selection,
            });
            debug!(line_id = %line_id, %unit_price, quantity, "line added");
            CartEvent::ItemAdded {
                product_name: product.name.clone(),
                quantity,
            }
        };

        self.commit();
        self.sink.notify(&event);
        line_id
    }

    /// Remove a line item. Unknown ids are a no-op, not an error.
    pub fn remove_item(&mut self, line_id: &LineItemId) {
        let Some(index) = self.cart.lines.iter().position(|l| &l.id == line_id) else {
            debug!(%line_id, "remove for unknown line; ignoring");
            return;
        };
        let line = self.cart.lines.remove(index);

        self.commit();
        self.sink.notify(&CartEvent::ItemRemoved {
            product_name: line.product.name,
        });
    }

    /// Set a line's quantity to exactly `new_quantity` (not additive).
    ///
    /// Zero means remove. Unknown ids are a no-op, not an error.
    pub fn update_quantity(&mut self, line_id: &LineItemId, new_quantity: u32) {
        if new_quantity == 0 {
            self.remove_item(line_id);
            return;
        }

        let Some(line) = self.cart.lines.iter_mut().find(|l| &l.id == line_id) else {
            debug!(%line_id, "quantity update for unknown line; ignoring");
            return;
        };
        line.quantity = new_quantity;
        let product_name = line.product.name.clone();

        self.commit();
        self.sink.notify(&CartEvent::QuantityUpdated {
            product_name,
            quantity: new_quantity,
        });
    }

    /// Remove all line items.
    ///
    /// The cart identifier and creation timestamp are preserved; totals go
    /// to zero and the update timestamp refreshes.
    pub fn clear(&mut self) {
        self.cart.lines.clear();
        self.commit();
        self.sink.notify(&CartEvent::CartCleared);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Check whether `quantity` of a product + selection is in stock.
    ///
    /// Idempotent query; emits an advisory `StockInsufficient` notification
    /// when it is not. Whether to block the mutation is the caller's policy.
    #[must_use]
    pub fn stock_status(
        &self,
        product: &Product,
        selection: &VariantSelection,
        quantity: u32,
    ) -> StockStatus {
        let status = stock::check(product, selection, quantity);
        if !status.is_satisfiable() {
            self.sink.notify(&CartEvent::StockInsufficient {
                product_name: product.name.clone(),
                requested: status.requested,
                available: status.available,
            });
        }
        status
    }

    /// The line for a product + selection, if present.
    #[must_use]
    pub fn line_for(
        &self,
        product_id: &ProductId,
        selection: &VariantSelection,
    ) -> Option<&LineItem> {
        self.cart.line(&identity::line_item_id(product_id, selection))
    }

    /// Whether a product + selection is already in the cart.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId, selection: &VariantSelection) -> bool {
        self.line_for(product_id, selection).is_some()
    }

    /// Total quantity of a product across all its variant lines.
    #[must_use]
    pub fn product_quantity(&self, product_id: &ProductId) -> u32 {
        self.cart
            .lines
            .iter()
            .filter(|l| &l.product_id == product_id)
            .map(|l| l.quantity)
            .sum()
    }

    /// Current derived totals.
    #[must_use]
    pub const fn totals(&self) -> &CartTotals {
        &self.cart.totals
    }

    /// Flush pending persistence and stop the worker.
    pub async fn shutdown(self) {
        self.persist.shutdown().await;
    }

    /// Recompute totals, refresh the update timestamp, and hand the new
    /// snapshot to the persistence worker. Runs after every mutation.
    fn commit(&mut self) {
        self.cart.totals = compute_totals(&self.cart.lines, &self.pricing);
        self.cart.updated_at = chrono::Utc::now();
        self.persist.enqueue(CartSnapshot::from(&self.cart));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    use marigold_core::{CurrencyCode, Price};

    use crate::events::RecordingSink;
    use crate::store::MemoryStore;
    use crate::types::{ProductVariant, VariantOption};

    fn kurta() -> Product {
        Product {
            id: ProductId::new("prod-1"),
            name: "Premium Cotton Kurta".to_owned(),
            description: String::new(),
            price: Price::from_major(2499, CurrencyCode::INR),
            original_price: None,
            category: "Traditional Wear".to_owned(),
            variants: vec![
                ProductVariant {
                    name: "Size".to_owned(),
                    options: vec![
                        VariantOption {
                            value: "Small".to_owned(),
                            stock: 10,
                            price_modifier: None,
                        },
                        VariantOption {
                            value: "Medium".to_owned(),
                            stock: 15,
                            price_modifier: None,
                        },
                    ],
                },
                ProductVariant {
                    name: "Color".to_owned(),
                    options: vec![VariantOption {
                        value: "Royal Blue".to_owned(),
                        stock: 12,
                        price_modifier: None,
                    }],
                },
            ],
            stock: 38,
            featured: true,
            tags: Vec::new(),
        }
    }

    fn test_engine() -> (CartEngine, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let engine = CartEngine::start(
            PricingConfig::default(),
            Arc::new(MemoryStore::new()),
            sink.clone(),
        );
        (engine, sink)
    }

    fn medium_blue() -> VariantSelection {
        VariantSelection::new()
            .with("Size", "Medium")
            .with("Color", "Royal Blue")
    }

    #[tokio::test]
    async fn test_add_item_creates_line_and_totals() {
        let (mut engine, _sink) = test_engine();
        engine.add_item(&kurta(), 2, medium_blue());

        let cart = engine.cart();
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.totals.subtotal, Decimal::from(4998));
        assert_eq!(cart.totals.tax, Decimal::new(89964, 2));
        assert_eq!(cart.totals.shipping, Decimal::ZERO);
        assert_eq!(cart.totals.total, Decimal::new(589764, 2));
        assert_eq!(cart.totals.item_count, 2);
    }

    #[tokio::test]
    async fn test_add_merges_order_independent_selections() {
        let (mut engine, _sink) = test_engine();
        let id1 = engine.add_item(&kurta(), 1, medium_blue());
        let id2 = engine.add_item(
            &kurta(),
            2,
            VariantSelection::new()
                .with("Color", "Royal Blue")
                .with("Size", "Medium"),
        );

        assert_eq!(id1, id2);
        let cart = engine.cart();
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_merge_keeps_frozen_price() {
        let (mut engine, _sink) = test_engine();
        let id = engine.add_item(&kurta(), 1, medium_blue());
        let frozen = engine.cart().line(&id).unwrap().unit_price;

        // Catalog price changes between adds
        let mut repriced = kurta();
        repriced.price = Price::from_major(2999, CurrencyCode::INR);
        engine.add_item(&repriced, 1, medium_blue());

        let line = engine.cart().line(&id).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, frozen);
        assert_eq!(engine.totals().subtotal, Decimal::from(4998));
    }

    #[tokio::test]
    async fn test_different_selections_are_separate_lines() {
        let (mut engine, _sink) = test_engine();
        engine.add_item(&kurta(), 1, VariantSelection::new().with("Size", "Small"));
        engine.add_item(&kurta(), 1, VariantSelection::new().with("Size", "Medium"));
        assert_eq!(engine.cart().lines.len(), 2);
    }

    #[tokio::test]
    async fn test_add_zero_quantity_clamped_to_one() {
        let (mut engine, _sink) = test_engine();
        let id = engine.add_item(&kurta(), 0, medium_blue());
        assert_eq!(engine.cart().line(&id).unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn test_remove_item() {
        let (mut engine, _sink) = test_engine();
        let id = engine.add_item(&kurta(), 2, medium_blue());
        engine.remove_item(&id);

        assert!(engine.cart().is_empty());
        assert_eq!(*engine.totals(), CartTotals::zero());
    }

    #[tokio::test]
    async fn test_remove_unknown_line_is_noop() {
        let (mut engine, _sink) = test_engine();
        engine.add_item(&kurta(), 2, medium_blue());
        let before = engine.cart().clone();

        engine.remove_item(&LineItemId::new("prod-9-"));

        assert_eq!(engine.cart().lines, before.lines);
        assert_eq!(engine.cart().totals, before.totals);
    }

    #[tokio::test]
    async fn test_update_quantity_sets_not_adds() {
        let (mut engine, _sink) = test_engine();
        let id = engine.add_item(&kurta(), 2, medium_blue());
        engine.update_quantity(&id, 5);

        assert_eq!(engine.cart().line(&id).unwrap().quantity, 5);
        assert_eq!(engine.totals().item_count, 5);
    }

    #[tokio::test]
    async fn test_update_quantity_zero_removes() {
        let (mut engine, _sink) = test_engine();
        let id = engine.add_item(&kurta(), 2, medium_blue());
        engine.update_quantity(&id, 0);
        assert!(engine.cart().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_line_is_noop() {
        let (mut engine, _sink) = test_engine();
        engine.add_item(&kurta(), 2, medium_blue());
        let before = engine.cart().clone();

        engine.update_quantity(&LineItemId::new("prod-9-"), 7);

        assert_eq!(engine.cart().lines, before.lines);
        assert_eq!(engine.cart().totals, before.totals);
    }

    #[tokio::test]
    async fn test_clear_preserves_identity() {
        let (mut engine, _sink) = test_engine();
        engine.add_item(&kurta(), 2, medium_blue());

        let id = engine.cart().id.clone();
        let created = engine.cart().created_at;
        engine.clear();

        let cart = engine.cart();
        assert!(cart.is_empty());
        assert_eq!(*engine.totals(), CartTotals::zero());
        assert_eq!(cart.id, id);
        assert_eq!(cart.created_at, created);
        assert!(cart.updated_at >= created);
    }

    #[tokio::test]
    async fn test_totals_invariant_after_every_mutation() {
        let (mut engine, _sink) = test_engine();
        let id = engine.add_item(&kurta(), 2, medium_blue());
        engine.add_item(&kurta(), 1, VariantSelection::new().with("Size", "Small"));
        engine.update_quantity(&id, 4);
        engine.remove_item(&id);

        let recomputed = compute_totals(&engine.cart().lines, engine.pricing());
        assert_eq!(*engine.totals(), recomputed);
    }

    #[tokio::test]
    async fn test_stock_status_emits_advisory() {
        let (engine, sink) = test_engine();
        let selection = VariantSelection::new()
            .with("Size", "Small")
            .with("Color", "Royal Blue");

        let ok = engine.stock_status(&kurta(), &selection, 10);
        assert!(ok.is_satisfiable());

        let short = engine.stock_status(&kurta(), &selection, 11);
        assert!(!short.is_satisfiable());
        assert_eq!(short.available, 10);

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            CartEvent::StockInsufficient {
                requested: 11,
                available: 10,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_membership_queries() {
        let (mut engine, _sink) = test_engine();
        engine.add_item(&kurta(), 2, medium_blue());
        engine.add_item(&kurta(), 1, VariantSelection::new().with("Size", "Small"));

        let product_id = ProductId::new("prod-1");
        assert!(engine.contains(&product_id, &medium_blue()));
        assert!(!engine.contains(&product_id, &VariantSelection::new().with("Size", "Large")));
        assert_eq!(engine.product_quantity(&product_id), 3);
        assert_eq!(engine.product_quantity(&ProductId::new("prod-2")), 0);
    }

    #[tokio::test]
    async fn test_notifications_for_mutations() {
        let (mut engine, sink) = test_engine();
        let id = engine.add_item(&kurta(), 1, medium_blue());
        engine.add_item(&kurta(), 1, medium_blue());
        engine.update_quantity(&id, 3);
        engine.remove_item(&id);
        engine.clear();

        let events = sink.events();
        assert!(matches!(events[0], CartEvent::ItemAdded { .. }));
        assert!(matches!(
            events[1],
            CartEvent::QuantityIncreased { quantity: 2, .. }
        ));
        assert!(matches!(
            events[2],
            CartEvent::QuantityUpdated { quantity: 3, .. }
        ));
        assert!(matches!(events[3], CartEvent::ItemRemoved { .. }));
        assert_eq!(events[4], CartEvent::CartCleared);
    }

    #[tokio::test]
    async fn test_shutdown_persists_final_state() {
        let store = Arc::new(MemoryStore::new());
        let mut engine = CartEngine::start(
            PricingConfig::default(),
            store.clone(),
            Arc::new(RecordingSink::new()),
        );
        engine.add_item(&kurta(), 2, medium_blue());
        let expected = engine.cart().clone();
        engine.shutdown().await;

        let loaded = store.load().unwrap().unwrap();
        let restored = loaded.restore(&PricingConfig::default());
        assert_eq!(restored.lines, expected.lines);
        assert_eq!(restored.totals, expected.totals);
    }

    #[tokio::test]
    async fn test_from_store_self_heals_totals() {
        let store = MemoryStore::new();
        {
            let mut engine = CartEngine::start(
                PricingConfig::default(),
                Arc::new(MemoryStore::new()),
                Arc::new(RecordingSink::new()),
            );
            engine.add_item(&kurta(), 2, medium_blue());
            let mut snapshot = CartSnapshot::from(engine.cart());
            snapshot.totals.total = Decimal::from(1);
            store.save(&snapshot).unwrap();
        }

        let persist = PersistHandle::spawn(Arc::new(MemoryStore::new()));
        let engine = CartEngine::from_store(
            PricingConfig::default(),
            &store,
            persist,
            Arc::new(RecordingSink::new()),
        );
        assert_eq!(engine.totals().total, Decimal::new(589764, 2));
    }
}
