//! Advisory cart notifications.
//!
//! The engine emits human-readable events a UI layer can render (the web
//! storefront showed these as toasts). They never affect engine state.

use std::sync::Mutex;

use tracing::info;

/// A human-readable cart event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line item was created.
    ItemAdded { product_name: String, quantity: u32 },
    /// An add merged into an existing line; `quantity` is the new line total.
    QuantityIncreased { product_name: String, quantity: u32 },
    /// A line's quantity was set directly.
    QuantityUpdated { product_name: String, quantity: u32 },
    /// A line item was removed.
    ItemRemoved { product_name: String },
    /// All line items were removed.
    CartCleared,
    /// A stock check found the requested quantity unsatisfiable.
    StockInsufficient {
        product_name: String,
        requested: u32,
        available: u32,
    },
}

impl std::fmt::Display for CartEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemAdded { product_name, .. } => {
                write!(f, "Added {product_name} to cart")
            }
            Self::QuantityIncreased { product_name, .. } => {
                write!(f, "Updated {product_name} quantity in cart")
            }
            Self::QuantityUpdated {
                product_name,
                quantity,
            } => write!(f, "Set {product_name} quantity to {quantity}"),
            Self::ItemRemoved { .. } => write!(f, "Item removed from cart"),
            Self::CartCleared => write!(f, "Cart cleared"),
            Self::StockInsufficient {
                product_name,
                requested,
                available,
            } => write!(
                f,
                "{product_name} - Only {available} items available, but {requested} requested"
            ),
        }
    }
}

/// Receiver for advisory cart events.
pub trait NotificationSink: Send + Sync {
    /// Handle one event. Must not block.
    fn notify(&self, event: &CartEvent);
}

/// Default sink: logs events at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, event: &CartEvent) {
        info!(%event, "cart notification");
    }
}

/// Test/support sink that records every event it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<CartEvent>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events received so far.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the lock panicked.
    #[must_use]
    pub fn events(&self) -> Vec<CartEvent> {
        self.events.lock().expect("recording sink poisoned").clone()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, event: &CartEvent) {
        self.events
            .lock()
            .expect("recording sink poisoned")
            .push(event.clone());
    }
}
