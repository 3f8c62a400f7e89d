//! The in-process table of live operator sessions.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use tender_core::types::SessionId;

use crate::identity::{Identity, SignInMethod};

/// A signed-in operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session id, also carried in the token's `sid` claim.
    pub id: SessionId,
    /// Provider user id.
    pub uid: String,
    /// Signed-in email address.
    pub email: String,
    /// How the operator signed in.
    pub method: SignInMethod,
    /// When the session started.
    pub created_at: DateTime<Utc>,
    /// When the session token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has passed its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// The identity this session was created for.
    pub fn identity(&self) -> Identity {
        Identity {
            uid: self.uid.clone(),
            email: self.email.clone(),
            method: self.method,
            display_name: None,
        }
    }
}

/// Live sessions keyed by id.
///
/// Tokens are only honoured while their session is present here, so removing
/// an entry signs the operator out even if the token itself has not expired.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<SessionId, Session>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a session.
    pub fn insert(&self, session: Session) {
        self.sessions.insert(session.id, session);
    }

    /// Look up a session.
    pub fn get(&self, id: SessionId) -> Option<Session> {
        self.sessions.get(&id).map(|entry| entry.value().clone())
    }

    /// Remove a session, returning it if it was present.
    pub fn remove(&self, id: SessionId) -> Option<Session> {
        self.sessions.remove(&id).map(|(_, session)| session)
    }

    /// All live sessions, oldest first.
    pub fn all(&self) -> Vec<Session> {
        let mut sessions: Vec<Session> = self
            .sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        sessions.sort_by_key(|s| s.created_at);
        sessions
    }

    /// Ids of sessions expired at `now`.
    pub fn expired_ids(&self, now: DateTime<Utc>) -> Vec<SessionId> {
        self.sessions
            .iter()
            .filter(|entry| entry.value().is_expired_at(now))
            .map(|entry| *entry.key())
            .collect()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are live.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
