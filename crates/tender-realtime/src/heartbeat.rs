//! Periodic pings and dead-connection pruning.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::connection::ConnectionManager;
use crate::message::OutboundMessage;

/// Ping every connection each `interval` and forget the ones that went away.
pub fn spawn(
    connections: Arc<ConnectionManager>,
    interval: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = ticker.tick() => {
                    let ping = OutboundMessage::Ping {
                        timestamp: Utc::now().timestamp_millis(),
                    };
                    connections.broadcast_all(&ping);
                    let pruned = connections.prune_dead();
                    if pruned > 0 {
                        debug!(pruned, "Pruned closed connections");
                    }
                }
            }
        }
    })
}
