//! Document store that dispatches to the configured backend.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::AbortHandle;
use tracing::info;

use tender_core::config::database::{DatabaseConfig, PROVIDER_MEMORY, PROVIDER_POSTGRES};
use tender_core::error::AppError;
use tender_core::events::CollectionChange;
use tender_core::result::AppResult;

use crate::change_feed::ChangeFeed;
use crate::connection::DatabasePool;
use crate::listener::PgChangeListener;
use crate::repositories::memory::{
    MemoryDisplayImageRepository, MemoryFeedbackRepository, MemoryNotificationRepository,
    MemoryPortDayRepository,
};
use crate::repositories::postgres::{
    PgDisplayImageRepository, PgFeedbackRepository, PgNotificationRepository, PgPortDayRepository,
};
use crate::repositories::{
    DisplayImageRepository, FeedbackRepository, NotificationRepository, PortDayRepository,
};

/// Handle to the four collections plus their change feed.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    /// `guestNotifications`.
    pub notifications: Arc<dyn NotificationRepository>,
    /// `portDays`.
    pub port_days: Arc<dyn PortDayRepository>,
    /// `guestFeedback`.
    pub feedback: Arc<dyn FeedbackRepository>,
    /// `displayImages`.
    pub display_images: Arc<dyn DisplayImageRepository>,
    feed: ChangeFeed,
    pool: Option<DatabasePool>,
    listener: Option<AbortHandle>,
}

impl DocumentStore {
    /// Open the store described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let feed = ChangeFeed::new(config.change_buffer_size);
        match config.provider.as_str() {
            PROVIDER_POSTGRES => {
                info!("Initializing PostgreSQL document store");
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    crate::migration::run_migrations(pool.pool()).await?;
                }
                let listener = PgChangeListener::spawn(pool.pool(), feed.clone()).await?;
                let pg = pool.pool().clone();
                Ok(Self {
                    notifications: Arc::new(PgNotificationRepository::new(pg.clone())),
                    port_days: Arc::new(PgPortDayRepository::new(pg.clone())),
                    feedback: Arc::new(PgFeedbackRepository::new(pg.clone())),
                    display_images: Arc::new(PgDisplayImageRepository::new(pg)),
                    feed,
                    pool: Some(pool),
                    listener: Some(listener.abort_handle()),
                })
            }
            PROVIDER_MEMORY => {
                info!("Initializing in-memory document store");
                Ok(Self::in_memory_with(feed))
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: postgres, memory"
            ))),
        }
    }

    /// An empty process-local store.
    pub fn in_memory() -> Self {
        Self::in_memory_with(ChangeFeed::default())
    }

    fn in_memory_with(feed: ChangeFeed) -> Self {
        Self {
            notifications: Arc::new(MemoryNotificationRepository::new(feed.clone())),
            port_days: Arc::new(MemoryPortDayRepository::new(feed.clone())),
            feedback: Arc::new(MemoryFeedbackRepository::new(feed.clone())),
            display_images: Arc::new(MemoryDisplayImageRepository::new(feed.clone())),
            feed,
            pool: None,
            listener: None,
        }
    }

    /// Subscribe to changes on any collection.
    pub fn subscribe(&self) -> broadcast::Receiver<CollectionChange> {
        self.feed.subscribe()
    }

    /// The change feed shared by all repositories.
    pub fn change_feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Name of the active backend.
    pub fn provider_name(&self) -> &'static str {
        if self.pool.is_some() {
            PROVIDER_POSTGRES
        } else {
            PROVIDER_MEMORY
        }
    }

    /// Check that the backend is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Stop the change listener and close connections.
    pub async fn close(&self) {
        if let Some(listener) = &self.listener {
            listener.abort();
        }
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_provider_is_rejected() {
        let config = DatabaseConfig {
            provider: "firestore".to_string(),
            ..DatabaseConfig::default()
        };
        let err = DocumentStore::connect(&config).await.unwrap_err();
        assert_eq!(err.kind, tender_core::ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_memory_store_shares_one_feed() {
        let store = DocumentStore::connect(&DatabaseConfig::default()).await.unwrap();
        assert_eq!(store.provider_name(), PROVIDER_MEMORY);
        let mut rx = store.subscribe();
        assert!(!store.display_images.clear_image("tvDisplay").await.unwrap());
        store
            .display_images
            .set_image("tvDisplay", "data:image/png;base64,AA", chrono::Utc::now())
            .await
            .unwrap();
        let change = rx.recv().await.unwrap();
        assert_eq!(change.collection, tender_core::events::Collection::DisplayImages);
        assert!(store.health_check().await.unwrap());
    }
}
