//! Durable cart snapshots.
//!
//! The engine persists through the narrow [`CartStore`] interface. The
//! persisted representation is an explicit snapshot schema, decoupled from
//! the in-memory [`Cart`] so the two can evolve independently. On load the
//! engine recomputes totals from the snapshot lines instead of trusting the
//! persisted figures, healing any drift from an older version or a partial
//! write.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use marigold_core::{CartId, LineItemId, ProductId};

use crate::config::PricingConfig;
use crate::totals::compute_totals;
use crate::types::{Cart, CartTotals, LineItem, Product, VariantSelection};

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot could not be serialized or parsed.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Durable load/save of cart snapshots.
///
/// `save` is called from the background persistence worker, never from a
/// mutation; implementations may block.
pub trait CartStore: Send + Sync {
    /// Load the persisted snapshot, `None` if nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the backing storage cannot be read or the
    /// snapshot fails to parse. Callers treat either as "no usable
    /// snapshot" and start from an empty cart.
    fn load(&self) -> Result<Option<CartSnapshot>, StoreError>;

    /// Durably store a snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the snapshot cannot be written.
    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StoreError>;
}

// =============================================================================
// Snapshot Schema
// =============================================================================

/// Persisted form of one cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSnapshot {
    /// Deterministic line identity.
    pub id: LineItemId,
    /// Identifier of the owning product.
    pub product_id: ProductId,
    /// Product copy frozen at add time.
    pub product: Product,
    /// Line quantity.
    pub quantity: u32,
    /// Unit price frozen at add time.
    pub unit_price: Decimal,
    /// The variant selection.
    pub selection: VariantSelection,
}

/// Persisted form of a whole cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Cart identifier.
    pub id: CartId,
    /// Persisted lines.
    pub lines: Vec<LineSnapshot>,
    /// Denormalized totals as of the save; advisory only, recomputed on load.
    pub totals: CartTotals,
    /// Cart creation time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time as of the save.
    pub updated_at: DateTime<Utc>,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        Self {
            id: cart.id.clone(),
            lines: cart
                .lines
                .iter()
                .map(|line| LineSnapshot {
                    id: line.id.clone(),
                    product_id: line.product_id.clone(),
                    product: line.product.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    selection: line.selection.clone(),
                })
                .collect(),
            totals: cart.totals,
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}

impl CartSnapshot {
    /// Rebuild a live cart from this snapshot.
    ///
    /// Lines with zero quantity are dropped and totals are recomputed from
    /// the surviving lines; the persisted totals are never trusted verbatim.
    #[must_use]
    pub fn restore(self, pricing: &PricingConfig) -> Cart {
        let lines: Vec<LineItem> = self
            .lines
            .into_iter()
            .filter(|line| line.quantity > 0)
            .map(|line| LineItem {
                id: line.id,
                product_id: line.product_id,
                product: line.product,
                quantity: line.quantity,
                unit_price: line.unit_price,
                selection: line.selection,
            })
            .collect();

        let totals = compute_totals(&lines, pricing);
        Cart {
            id: self.id,
            lines,
            totals,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// =============================================================================
// JSON File Store
// =============================================================================

/// Cart store backed by a single JSON file.
///
/// The web storefront kept the snapshot in browser local storage; a file
/// plays the same role here. Writes go through a sibling temp file and an
/// atomic rename so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the given snapshot path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot file path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CartStore for JsonFileStore {
    fn load(&self) -> Result<Option<CartSnapshot>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = serde_json::from_str(&raw)?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StoreError> {
        let raw = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(cart_id = %snapshot.id, path = %self.path.display(), "cart snapshot written");
        Ok(())
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Volatile store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<CartSnapshot>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a snapshot.
    #[must_use]
    pub fn with_snapshot(snapshot: CartSnapshot) -> Self {
        Self {
            slot: Mutex::new(Some(snapshot)),
        }
    }
}

impl CartStore for MemoryStore {
    fn load(&self) -> Result<Option<CartSnapshot>, StoreError> {
        Ok(self.slot.lock().expect("memory store poisoned").clone())
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StoreError> {
        *self.slot.lock().expect("memory store poisoned") = Some(snapshot.clone());
        Ok(())
    }
}
