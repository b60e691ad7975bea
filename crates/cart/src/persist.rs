//! Fire-and-forget persistence hand-off.
//!
//! Mutations update in-memory state immediately and enqueue a snapshot; a
//! background worker owns the [`CartStore`] and writes snapshots as they
//! arrive. The caller of a mutation never awaits the write, so persistence
//! is eventually-consistent best effort. When writes back up, the worker
//! coalesces the queue down to the latest snapshot (last write wins).

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::store::{CartSnapshot, CartStore};

/// Handle to the background persistence worker.
pub struct PersistHandle {
    tx: mpsc::UnboundedSender<CartSnapshot>,
    worker: JoinHandle<()>,
}

impl PersistHandle {
    /// Spawn the persistence worker on the current tokio runtime.
    #[must_use]
    pub fn spawn(store: Arc<dyn CartStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(store, rx));
        Self { tx, worker }
    }

    /// Enqueue a snapshot for durable storage without waiting for the write.
    ///
    /// A dead worker (runtime shutting down) only costs durability of this
    /// snapshot; in-memory state is already updated.
    pub fn enqueue(&self, snapshot: CartSnapshot) {
        if self.tx.send(snapshot).is_err() {
            warn!("persistence worker is gone; dropping cart snapshot");
        }
    }

    /// Flush pending snapshots and stop the worker.
    ///
    /// Closes the queue and waits for the worker to drain it. Call this
    /// before process exit so the final mutation reaches storage.
    pub async fn shutdown(self) {
        let Self { tx, worker } = self;
        drop(tx);
        if let Err(e) = worker.await {
            warn!(error = %e, "persistence worker did not shut down cleanly");
        }
    }
}

/// Worker loop: write snapshots until the queue closes, keeping only the
/// newest when several are pending.
async fn run_worker(store: Arc<dyn CartStore>, mut rx: mpsc::UnboundedReceiver<CartSnapshot>) {
    while let Some(mut snapshot) = rx.recv().await {
        // Coalesce a backlog to the latest snapshot
        while let Ok(newer) = rx.try_recv() {
            snapshot = newer;
        }
        match store.save(&snapshot) {
            Ok(()) => debug!(cart_id = %snapshot.id, "cart snapshot persisted"),
            Err(e) => warn!(cart_id = %snapshot.id, error = %e, "failed to persist cart snapshot"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::Cart;

    #[tokio::test]
    async fn test_enqueue_then_shutdown_persists_latest() {
        let store = Arc::new(MemoryStore::new());
        let handle = PersistHandle::spawn(store.clone());

        let mut cart = Cart::new();
        handle.enqueue(CartSnapshot::from(&cart));
        cart.updated_at = chrono::Utc::now();
        handle.enqueue(CartSnapshot::from(&cart));

        handle.shutdown().await;

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.id, cart.id);
        assert_eq!(loaded.updated_at, cart.updated_at);
    }

    #[tokio::test]
    async fn test_shutdown_with_empty_queue() {
        let store = Arc::new(MemoryStore::new());
        let handle = PersistHandle::spawn(store.clone());
        handle.shutdown().await;
        assert!(store.load().unwrap().is_none());
    }
}
