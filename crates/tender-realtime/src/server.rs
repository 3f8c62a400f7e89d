//! Top-level real-time engine that ties together all subsystems.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;
use tracing::info;

use tender_core::config::realtime::RealtimeConfig;
use tender_core::events::{CollectionChange, SessionEvent};
use tender_core::types::{ConnectionId, SessionId};
use tender_entity::toast::Toast;
use tender_service::NotificationBroadcaster;

use crate::connection::ConnectionManager;
use crate::feed::FeedPublisher;
use crate::message::{FEED_CHANNEL, OutboundMessage};

/// Central real-time engine shared through application state.
#[derive(Debug, Clone)]
pub struct RealtimeEngine {
    /// Connection manager.
    pub connections: Arc<ConnectionManager>,
    /// Live notification feed.
    pub feed: FeedPublisher,
    config: RealtimeConfig,
    shutdown_tx: broadcast::Sender<()>,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl RealtimeEngine {
    /// Creates a new engine. Nothing runs until [`RealtimeEngine::start`].
    pub fn new(config: RealtimeConfig, broadcaster: NotificationBroadcaster) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let connections = Arc::new(ConnectionManager::new(config.channel_buffer_size));
        let feed = FeedPublisher::new(broadcaster, connections.clone());

        info!("Real-time engine initialized");

        Self {
            connections,
            feed,
            config,
            shutdown_tx,
            tasks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Start the feed, session watcher, and heartbeat tasks.
    pub async fn start(
        &self,
        changes: broadcast::Receiver<CollectionChange>,
        sessions: broadcast::Receiver<SessionEvent>,
    ) {
        let mut tasks = self.tasks.lock().await;
        tasks.push(self.feed.clone().spawn(changes, self.shutdown_tx.subscribe()));
        tasks.push(crate::session_watch::spawn(
            self.connections.clone(),
            sessions,
            self.shutdown_tx.subscribe(),
        ));
        if self.config.ping_interval_seconds > 0 {
            tasks.push(crate::heartbeat::spawn(
                self.connections.clone(),
                Duration::from_secs(self.config.ping_interval_seconds),
                self.shutdown_tx.subscribe(),
            ));
        }
        info!(tasks = tasks.len(), "Real-time engine started");
    }

    /// Returns a shutdown receiver for socket tasks.
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Handle a frame from a client, sending the feed snapshot after a subscribe.
    pub async fn handle_inbound(&self, conn_id: ConnectionId, raw: &str) {
        let subscribed = self.connections.handle_inbound(conn_id, raw).await;
        if subscribed.as_deref() != Some(FEED_CHANNEL) {
            return;
        }
        if let Some(handle) = self.connections.get(conn_id) {
            self.feed.send_snapshot(&handle).await;
        }
    }

    /// Push a toast to every connection of a session.
    pub fn push_toast(&self, session_id: SessionId, toast: Toast) -> usize {
        self.connections
            .send_to_session(session_id, &OutboundMessage::Toast { toast })
    }

    /// Stop background tasks and drop every connection.
    pub async fn shutdown(&self) {
        info!("Shutting down real-time engine");
        let _ = self.shutdown_tx.send(());
        for task in self.tasks.lock().await.drain(..) {
            let _ = task.await;
        }
        self.connections.close_all();
        info!("Real-time engine shut down");
    }
}
