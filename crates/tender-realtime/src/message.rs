//! Inbound and outbound WebSocket message type definitions.

use serde::{Deserialize, Serialize};

use tender_core::events::SignOutReason;
use tender_core::types::SessionId;
use tender_entity::notification::Notification;
use tender_entity::toast::Toast;

/// Channel carrying the live notification feed.
pub const FEED_CHANNEL: &str = "notifications";

/// Messages sent by the client to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Subscribe to a channel.
    Subscribe {
        /// Channel name.
        channel: String,
    },
    /// Unsubscribe from a channel.
    Unsubscribe {
        /// Channel name.
        channel: String,
    },
    /// Pong response to server ping.
    Pong {
        /// Echoed timestamp.
        #[serde(default)]
        timestamp: Option<i64>,
    },
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Subscription confirmed.
    Subscribed {
        /// Channel name.
        channel: String,
    },
    /// The latest notifications, newest first.
    NotificationFeed {
        /// Feed entries.
        notifications: Vec<Notification>,
    },
    /// A toast for this operator.
    Toast {
        /// The toast.
        toast: Toast,
    },
    /// The session behind this connection has ended.
    SessionTerminated {
        /// Session ID.
        session_id: SessionId,
        /// Why it ended.
        reason: SignOutReason,
    },
    /// Keep-alive.
    Ping {
        /// Server time in milliseconds.
        timestamp: i64,
    },
    /// Request could not be handled.
    Error {
        /// Machine-readable code.
        code: String,
        /// Human-readable message.
        message: String,
    },
}

impl OutboundMessage {
    /// Build an error message.
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.into(),
        }
    }

    /// Whether the connection closes after this message is delivered.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::SessionTerminated { .. })
    }
}
