//! Forwards PostgreSQL row-change notifications into the [`ChangeFeed`].

use serde::Deserialize;
use sqlx::PgPool;
use sqlx::postgres::PgListener;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use tender_core::error::{AppError, ErrorKind};
use tender_core::events::{ChangeKind, Collection, CollectionChange};

use crate::change_feed::ChangeFeed;

/// Channel the `notify_collection_change` trigger publishes on.
pub const CHANGE_CHANNEL: &str = "collection_changes";

#[derive(Debug, Deserialize)]
struct TriggerPayload {
    collection: String,
    op: String,
    id: Option<String>,
}

/// LISTEN task relaying trigger payloads.
#[derive(Debug)]
pub struct PgChangeListener;

impl PgChangeListener {
    /// Start listening and spawn the relay task.
    pub async fn spawn(pool: &PgPool, feed: ChangeFeed) -> Result<JoinHandle<()>, AppError> {
        let mut listener = PgListener::connect_with(pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to open change listener", e)
        })?;
        listener.listen(CHANGE_CHANNEL).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to LISTEN for changes", e)
        })?;
        info!(channel = CHANGE_CHANNEL, "Listening for collection changes");

        Ok(tokio::spawn(async move {
            loop {
                // `recv` reconnects transparently; an error here means the pool is closed.
                match listener.recv().await {
                    Ok(notification) => match parse_payload(notification.payload()) {
                        Some(change) => feed.publish(change),
                        None => warn!(payload = notification.payload(), "Unrecognized change payload"),
                    },
                    Err(e) => {
                        error!(error = %e, "Change listener stopped");
                        break;
                    }
                }
            }
            debug!("Change listener task finished");
        }))
    }
}

fn parse_payload(payload: &str) -> Option<CollectionChange> {
    let parsed: TriggerPayload = serde_json::from_str(payload).ok()?;
    let collection = Collection::parse(&parsed.collection)?;
    let kind = match parsed.op.as_str() {
        "INSERT" => ChangeKind::Created,
        "UPDATE" => ChangeKind::Updated,
        "DELETE" => ChangeKind::Deleted,
        "TRUNCATE" => ChangeKind::Cleared,
        _ => return None,
    };
    Some(CollectionChange::new(collection, kind, parsed.id))
}
