//! Individual WebSocket connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashSet;
use tokio::sync::{RwLock, mpsc};
use tracing::warn;

use tender_core::types::{ConnectionId, SessionId};

use crate::message::OutboundMessage;

/// A handle to a single operator WebSocket connection.
///
/// Holds the sender for pushing messages to the client plus the session
/// the connection was opened with.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Session this connection belongs to
    pub session_id: SessionId,
    /// Operator email (cached for logs)
    pub email: String,
    /// When the connection was established
    pub connected_at: DateTime<Utc>,
    sender: mpsc::Sender<OutboundMessage>,
    subscriptions: DashSet<String>,
    last_pong: RwLock<DateTime<Utc>>,
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Create a new connection handle
    pub fn new(session_id: SessionId, email: String, sender: mpsc::Sender<OutboundMessage>) -> Self {
        let now = Utc::now();
        Self {
            id: ConnectionId::new(),
            session_id,
            email,
            connected_at: now,
            sender,
            subscriptions: DashSet::new(),
            last_pong: RwLock::new(now),
            alive: AtomicBool::new(true),
        }
    }

    /// Queue a message for this connection. Returns false when it was dropped.
    pub fn send(&self, msg: OutboundMessage) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(msg) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(conn_id = %self.id, "Connection send buffer full, dropping message");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_closed();
                false
            }
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    pub fn mark_closed(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Record a pong response
    pub async fn record_pong(&self) {
        *self.last_pong.write().await = Utc::now();
    }

    /// When the client last answered a ping.
    pub async fn last_pong(&self) -> DateTime<Utc> {
        *self.last_pong.read().await
    }

    /// Add a subscription. Returns false if it already existed.
    pub fn subscribe(&self, channel: &str) -> bool {
        self.subscriptions.insert(channel.to_string())
    }

    /// Remove a subscription. Returns false if it did not exist.
    pub fn unsubscribe(&self, channel: &str) -> bool {
        self.subscriptions.remove(channel).is_some()
    }

    pub fn is_subscribed(&self, channel: &str) -> bool {
        self.subscriptions.contains(channel)
    }
}
