//! Periodic removal of expired sessions.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::manager::SessionManager;

/// Background sweeper that signs out expired sessions.
#[derive(Debug, Clone)]
pub struct SessionCleanup {
    manager: SessionManager,
    interval: Duration,
}

impl SessionCleanup {
    /// Creates a sweeper that runs every `interval`.
    pub fn new(manager: SessionManager, interval: Duration) -> Self {
        Self { manager, interval }
    }

    /// Runs one cleanup cycle. Returns the number of sessions removed.
    pub fn run_cleanup(&self) -> usize {
        let cleaned = self.manager.purge_expired();
        if cleaned > 0 {
            info!(cleaned, "Expired sessions signed out");
        } else {
            debug!("No expired sessions");
        }
        cleaned
    }

    /// Spawn the sweeper on the runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.run_cleanup();
            }
        })
    }
}
