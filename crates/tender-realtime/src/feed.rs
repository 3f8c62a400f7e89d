//! The live notification feed.
//!
//! Every change to `guestNotifications` re-reads the latest entries and
//! pushes them to connections subscribed to [`FEED_CHANNEL`].

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use tender_core::error::AppError;
use tender_core::events::{Collection, CollectionChange};
use tender_service::NotificationBroadcaster;

use crate::connection::{ConnectionHandle, ConnectionManager};
use crate::message::{FEED_CHANNEL, OutboundMessage};

/// Pushes the latest notifications to feed subscribers.
#[derive(Debug, Clone)]
pub struct FeedPublisher {
    broadcaster: NotificationBroadcaster,
    connections: Arc<ConnectionManager>,
}

impl FeedPublisher {
    /// Creates a publisher reading through `broadcaster`.
    pub fn new(broadcaster: NotificationBroadcaster, connections: Arc<ConnectionManager>) -> Self {
        Self {
            broadcaster,
            connections,
        }
    }

    /// The current feed as an outbound message.
    pub async fn snapshot(&self) -> Result<OutboundMessage, AppError> {
        Ok(OutboundMessage::NotificationFeed {
            notifications: self.broadcaster.feed().await?,
        })
    }

    /// Send the current feed to one connection, typically right after it subscribed.
    pub async fn send_snapshot(&self, handle: &ConnectionHandle) {
        match self.snapshot().await {
            Ok(msg) => {
                handle.send(msg);
            }
            Err(e) => {
                warn!(conn_id = %handle.id, error = %e, "Failed to load notification feed");
                handle.send(OutboundMessage::error("FEED_UNAVAILABLE", e.message));
            }
        }
    }

    /// Push the current feed to every subscriber. Returns how many received it.
    pub async fn publish(&self) -> Result<usize, AppError> {
        let msg = self.snapshot().await?;
        let sent = self.connections.broadcast_to_channel(FEED_CHANNEL, &msg);
        debug!(sent, "Notification feed pushed");
        Ok(sent)
    }

    /// Follow collection changes until the change feed closes or shutdown fires.
    pub fn spawn(
        self,
        mut changes: broadcast::Receiver<CollectionChange>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown.recv() => break,
                    change = changes.recv() => match change {
                        Ok(change) if change.collection == Collection::GuestNotifications => {
                            self.publish_or_log().await;
                        }
                        Ok(_) => {}
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "Notification feed lagged behind the change feed");
                            self.publish_or_log().await;
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
            debug!("Notification feed task stopped");
        })
    }

    async fn publish_or_log(&self) {
        if let Err(e) = self.publish().await {
            error!(error = %e, "Failed to push notification feed");
        }
    }
}
