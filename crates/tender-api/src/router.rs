//! Route definitions for the tender console.
//!
//! Page routes sit at the root, the JSON API is mounted under `/api`, and
//! the live feed is served on `/ws`.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(notification_routes())
        .merge(port_day_routes())
        .merge(feedback_routes())
        .merge(display_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&server.cors);

    Router::new()
        .merge(page_routes())
        .nest("/api", api_routes)
        .route("/ws", get(handlers::ws::ws_upgrade))
        .fallback(handlers::views::not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::toast::configured_error_toasts,
        ))
        .layer(DefaultBodyLimit::max(server.max_body_size_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_seconds),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Pages: sign-in, email link landing, operator, analytics
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::views::root))
        .route("/signin", get(handlers::views::sign_in_page))
        .route("/email-link-signin/verify", get(handlers::views::verify_link))
        .route("/operator", get(handlers::views::operator_page))
        .route("/analytics", get(handlers::views::analytics_page))
}

/// Sign-in flows, sign-out, current session
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signin", post(handlers::auth::sign_in))
        .route("/auth/signup", post(handlers::auth::sign_up))
        .route("/auth/federated", post(handlers::auth::federated))
        .route("/auth/email-link", post(handlers::auth::send_email_link))
        .route(
            "/auth/email-link/complete",
            post(handlers::auth::complete_email_link),
        )
        .route("/auth/password-reset", post(handlers::auth::password_reset))
        .route("/auth/signout", post(handlers::auth::sign_out))
        .route("/auth/session", get(handlers::auth::current_session))
}

/// Notification preview, send, list, delete
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications/preview", post(handlers::notification::preview))
        .route(
            "/notifications",
            get(handlers::notification::list).post(handlers::notification::send),
        )
        .route(
            "/notifications/{id}",
            axum::routing::delete(handlers::notification::delete),
        )
}

/// Port day lifecycle
fn port_day_routes() -> Router<AppState> {
    Router::new()
        .route("/port-days/active", get(handlers::port_day::active))
        .route(
            "/port-days",
            get(handlers::port_day::list).post(handlers::port_day::create),
        )
        .route(
            "/port-days/{id}",
            put(handlers::port_day::update).delete(handlers::port_day::end),
        )
}

/// Guest feedback analytics
fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/feedback/summary", get(handlers::feedback::summary))
        .route("/feedback/comments", get(handlers::feedback::comments))
}

/// TV display image
fn display_routes() -> Router<AppState> {
    Router::new().route(
        "/display/tv",
        get(handlers::display::current)
            .put(handlers::display::upload)
            .delete(handlers::display::delete),
    )
}

/// Health check (no auth)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
