//! Connection manager: connection lifecycle and message routing.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

use tender_core::events::SignOutReason;
use tender_core::types::{ConnectionId, SessionId};

use super::handle::ConnectionHandle;
use crate::message::{FEED_CHANNEL, InboundMessage, OutboundMessage};

/// Manages all open WebSocket connections.
#[derive(Debug)]
pub struct ConnectionManager {
    connections: DashMap<ConnectionId, Arc<ConnectionHandle>>,
    buffer_size: usize,
}

impl ConnectionManager {
    /// Creates a manager whose connections buffer up to `buffer_size` messages.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            connections: DashMap::new(),
            buffer_size: buffer_size.max(1),
        }
    }

    /// Registers a connection for an authenticated session.
    ///
    /// Returns the handle and the receiver the socket task drains.
    pub fn register(
        &self,
        session_id: SessionId,
        email: String,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<OutboundMessage>) {
        let (tx, rx) = mpsc::channel(self.buffer_size);
        let handle = Arc::new(ConnectionHandle::new(session_id, email, tx));
        self.connections.insert(handle.id, handle.clone());

        info!(
            conn_id = %handle.id,
            session_id = %session_id,
            email = %handle.email,
            "WebSocket connection registered"
        );
        (handle, rx)
    }

    /// Unregisters a connection.
    pub fn unregister(&self, conn_id: ConnectionId) {
        if let Some((_, handle)) = self.connections.remove(&conn_id) {
            handle.mark_closed();
            info!(conn_id = %conn_id, session_id = %handle.session_id, "WebSocket connection unregistered");
        }
    }

    pub fn get(&self, conn_id: ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.connections.get(&conn_id).map(|e| e.value().clone())
    }

    /// Processes an inbound frame.
    ///
    /// Returns the channel a successful `subscribe` added, so the caller can
    /// send the initial snapshot.
    pub async fn handle_inbound(&self, conn_id: ConnectionId, raw: &str) -> Option<String> {
        let handle = self.get(conn_id)?;

        let msg: InboundMessage = match serde_json::from_str(raw) {
            Ok(m) => m,
            Err(e) => {
                handle.send(OutboundMessage::error(
                    "INVALID_MESSAGE",
                    format!("Failed to parse message: {e}"),
                ));
                return None;
            }
        };

        match msg {
            InboundMessage::Subscribe { channel } => {
                if channel != FEED_CHANNEL {
                    handle.send(OutboundMessage::error(
                        "UNKNOWN_CHANNEL",
                        format!("Unknown channel: {channel}"),
                    ));
                    return None;
                }
                handle.subscribe(&channel);
                handle.send(OutboundMessage::Subscribed {
                    channel: channel.clone(),
                });
                debug!(conn_id = %conn_id, channel = %channel, "Subscribed to channel");
                Some(channel)
            }
            InboundMessage::Unsubscribe { channel } => {
                handle.unsubscribe(&channel);
                debug!(conn_id = %conn_id, channel = %channel, "Unsubscribed from channel");
                None
            }
            InboundMessage::Pong { .. } => {
                handle.record_pong().await;
                None
            }
        }
    }

    /// Sends to every connection of a session. Returns how many accepted it.
    pub fn send_to_session(&self, session_id: SessionId, message: &OutboundMessage) -> usize {
        self.deliver(|h| h.session_id == session_id, message)
    }

    /// Sends to every connection subscribed to `channel`.
    pub fn broadcast_to_channel(&self, channel: &str, message: &OutboundMessage) -> usize {
        self.deliver(|h| h.is_subscribed(channel), message)
    }

    /// Sends to every connection.
    pub fn broadcast_all(&self, message: &OutboundMessage) -> usize {
        self.deliver(|_| true, message)
    }

    fn deliver(&self, filter: impl Fn(&ConnectionHandle) -> bool, message: &OutboundMessage) -> usize {
        let mut sent = 0;
        for handle in self.snapshot() {
            if filter(&handle) && handle.send(message.clone()) {
                sent += 1;
            }
        }
        sent
    }

    /// Tells every connection of a session that it ended, then drops them.
    pub fn close_session(&self, session_id: SessionId, reason: SignOutReason) -> usize {
        let message = OutboundMessage::SessionTerminated { session_id, reason };
        let targets: Vec<Arc<ConnectionHandle>> = self
            .snapshot()
            .into_iter()
            .filter(|h| h.session_id == session_id)
            .collect();

        for handle in &targets {
            handle.send(message.clone());
            self.connections.remove(&handle.id);
            handle.mark_closed();
        }
        if !targets.is_empty() {
            info!(session_id = %session_id, count = targets.len(), reason = ?reason, "Closed session connections");
        }
        targets.len()
    }

    /// Drops connections whose receiver is gone.
    pub fn prune_dead(&self) -> usize {
        let before = self.connections.len();
        self.connections.retain(|_, h| h.is_alive());
        before - self.connections.len()
    }

    /// Closes all connections.
    pub fn close_all(&self) {
        let count = self.connections.len();
        for entry in self.connections.iter() {
            entry.value().mark_closed();
        }
        self.connections.clear();
        info!(count, "All connections closed");
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    fn snapshot(&self) -> Vec<Arc<ConnectionHandle>> {
        self.connections.iter().map(|e| e.value().clone()).collect()
    }
}
