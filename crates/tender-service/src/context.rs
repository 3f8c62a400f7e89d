//! Request context carrying the signed-in operator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tender_core::types::SessionId;

/// Who is acting, passed into service methods that have per-client state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The operator's session; also identifies the client for the busy guard.
    pub session_id: SessionId,
    /// The operator's email address.
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(session_id: SessionId, email: impl Into<String>) -> Self {
        Self {
            session_id,
            email: email.into(),
            request_time: Utc::now(),
        }
    }

    /// Context for maintenance commands run outside a browser session.
    pub fn system() -> Self {
        Self::new(SessionId::new(), "system")
    }
}
