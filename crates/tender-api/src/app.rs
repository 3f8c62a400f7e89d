//! Application builder: wires router, state, and background tasks into a
//! running server.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use tender_auth::{IdentityProvider, SessionCleanup, build_provider};
use tender_core::config::AppConfig;
use tender_core::error::{AppError, ErrorKind};
use tender_database::DocumentStore;

use crate::router::build_router;
use crate::state::AppState;

/// How often expired sessions are swept.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Builds the complete Axum application over existing collaborators.
///
/// Background tasks are not started; call [`AppState::start_background`]
/// on the returned state to run the live feed.
pub fn build_app(
    config: AppConfig,
    store: DocumentStore,
    provider: Arc<dyn IdentityProvider>,
) -> (Router, AppState) {
    let state = AppState::new(config, store, provider);
    (build_router(state.clone()), state)
}

/// Runs the tender console server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting tender console server...");
    config.validate()?;

    // ── Step 1: Collaborators ────────────────────────────────────
    tracing::info!(provider = %config.database.provider, "Opening document store");
    let store = DocumentStore::connect(&config.database).await?;
    tracing::info!(provider = %config.auth.provider, "Initializing identity provider");
    let provider = build_provider(&config.auth)?;

    // ── Step 2: State and background tasks ───────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let (app, state) = build_app(config, store, provider);
    state.start_background().await;
    let sweeper = SessionCleanup::new(state.sessions.clone(), SESSION_SWEEP_INTERVAL).spawn();

    // ── Step 3: Serve ────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Io, format!("Failed to bind {addr}"), e))?;
    tracing::info!("Tender console listening on {}", addr);

    let realtime = state.realtime.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received");
            // Open sockets hold the server open until the engine closes them.
            if tokio::time::timeout(grace, realtime.shutdown()).await.is_err() {
                tracing::warn!("Real-time engine did not stop within the grace period");
            }
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 4: Teardown ─────────────────────────────────────────
    sweeper.abort();
    let ended = state.sessions.shutdown();
    state.store.close().await;
    tracing::info!(sessions_ended = ended, "Tender console stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
