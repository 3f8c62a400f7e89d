//! Session-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::SessionId;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignOutReason {
    /// The operator signed out.
    UserRequested,
    /// The identity failed an allow-list check.
    PolicyViolation,
    /// The session token lifetime elapsed.
    Expired,
    /// The server is shutting down.
    Shutdown,
}

/// Events related to operator sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// An operator signed in and a session was created.
    SignedIn {
        /// The session ID.
        session_id: SessionId,
        /// The signed-in email address.
        email: String,
    },
    /// A session was ended.
    SignedOut {
        /// The session ID.
        session_id: SessionId,
        /// Why the session ended.
        reason: SignOutReason,
    },
}

impl SessionEvent {
    /// The session the event refers to.
    pub fn session_id(&self) -> SessionId {
        match self {
            Self::SignedIn { session_id, .. } | Self::SignedOut { session_id, .. } => *session_id,
        }
    }
}
