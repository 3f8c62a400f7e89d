//! Closes sockets of sessions that ended.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use tender_core::events::SessionEvent;

use crate::connection::ConnectionManager;

/// Follow session events and push `session_terminated` for every sign-out.
pub fn spawn(
    connections: Arc<ConnectionManager>,
    mut events: broadcast::Receiver<SessionEvent>,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                event = events.recv() => match event {
                    Ok(SessionEvent::SignedOut { session_id, reason }) => {
                        connections.close_session(session_id, reason);
                    }
                    Ok(SessionEvent::SignedIn { .. }) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Session watcher lagged behind session events");
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
        debug!("Session watcher stopped");
    })
}
