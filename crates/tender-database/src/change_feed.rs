//! In-process fan-out of collection changes.

use tokio::sync::broadcast;
use tracing::trace;

use tender_core::events::{ChangeKind, Collection, CollectionChange};

/// Broadcasts [`CollectionChange`]s to every subscriber.
///
/// Memory repositories publish directly after each write; the PostgreSQL
/// backend publishes what the LISTEN task receives.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<CollectionChange>,
}

impl ChangeFeed {
    /// Create a feed buffering up to `capacity` undelivered changes per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish a change. Having no subscribers is not an error.
    pub fn publish(&self, change: CollectionChange) {
        trace!(collection = %change.collection, kind = ?change.kind, "Collection change");
        let _ = self.sender.send(change);
    }

    /// Publish a change for a single document.
    pub fn publish_document(&self, collection: Collection, kind: ChangeKind, id: impl ToString) {
        self.publish(CollectionChange::new(collection, kind, Some(id.to_string())));
    }

    /// Subscribe to future changes.
    pub fn subscribe(&self) -> broadcast::Receiver<CollectionChange> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(256)
    }
}
