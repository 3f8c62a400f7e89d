//! Health check handler.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let reachable = state.store.health_check().await.unwrap_or(false);
    Json(ApiResponse::ok(HealthResponse {
        status: if reachable { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
        database: state.store.provider_name().to_string(),
        database_reachable: reachable,
        ws_connections: state.realtime.connections.connection_count(),
    }))
}
