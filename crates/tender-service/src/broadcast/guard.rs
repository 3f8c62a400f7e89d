//! At most one in-flight send per client.

use std::sync::Arc;

use dashmap::DashSet;

use tender_core::types::SessionId;

/// Tracks which clients have a send in progress.
#[derive(Debug, Clone, Default)]
pub struct SendGuard {
    in_flight: Arc<DashSet<SessionId>>,
}

/// Held while a send is in progress; dropping it releases the client.
#[derive(Debug)]
pub struct SendPermit {
    client: SessionId,
    in_flight: Arc<DashSet<SessionId>>,
}

impl SendGuard {
    /// Creates an empty guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the client's send slot, or `None` if it is already taken.
    pub fn try_acquire(&self, client: SessionId) -> Option<SendPermit> {
        self.in_flight.insert(client).then(|| SendPermit {
            client,
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    /// Whether the client has a send in progress.
    pub fn is_busy(&self, client: SessionId) -> bool {
        self.in_flight.contains(&client)
    }
}

impl Drop for SendPermit {
    fn drop(&mut self) {
        self.in_flight.remove(&self.client);
    }
}
