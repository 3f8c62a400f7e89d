//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use tender_auth::{IdentityProvider, SessionManager};
use tender_core::config::AppConfig;
use tender_database::DocumentStore;
use tender_realtime::RealtimeEngine;
use tender_service::{
    DisplayService, FeedbackService, MessageComposer, NotificationBroadcaster, PortDayService,
    ToastFactory,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Every field is
/// cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Document store (Postgres or in-memory)
    pub store: DocumentStore,

    // ── Auth ─────────────────────────────────────────────────
    /// Session lifecycle manager
    pub sessions: SessionManager,

    // ── Services ─────────────────────────────────────────────
    /// Message composer
    pub composer: MessageComposer,
    /// Port day lifecycle
    pub port_days: PortDayService,
    /// Notification broadcaster
    pub notifications: NotificationBroadcaster,
    /// Feedback analytics
    pub feedback: FeedbackService,
    /// TV display image
    pub display: DisplayService,
    /// Toast construction
    pub toasts: ToastFactory,

    // ── Realtime ─────────────────────────────────────────────
    /// WebSocket realtime engine
    pub realtime: RealtimeEngine,

    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Wire every service on top of an open store and identity provider.
    pub fn new(config: AppConfig, store: DocumentStore, provider: Arc<dyn IdentityProvider>) -> Self {
        let sessions = SessionManager::from_config(&config.auth, provider);
        let composer = MessageComposer::from_config(&config.console);
        let port_days = PortDayService::new(store.port_days.clone());
        let notifications = NotificationBroadcaster::new(
            store.notifications.clone(),
            port_days.clone(),
            composer.clone(),
            config.realtime.feed_limit,
        );
        let feedback = FeedbackService::new(store.feedback.clone());
        let display = DisplayService::from_config(store.display_images.clone(), &config.console);
        let toasts = ToastFactory::from_config(&config.console);
        let realtime = RealtimeEngine::new(config.realtime.clone(), notifications.clone());

        Self {
            config: Arc::new(config),
            store,
            sessions,
            composer,
            port_days,
            notifications,
            feedback,
            display,
            toasts,
            realtime,
            started_at: Utc::now(),
        }
    }

    /// Start the realtime engine's background tasks.
    pub async fn start_background(&self) {
        self.realtime
            .start(self.store.subscribe(), self.sessions.subscribe())
            .await;
    }
}
