//! Re-stamps error toasts with the configured lifetime.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::{ApiError, ErrorDetails};
use crate::state::AppState;

/// Renders error responses again with the console's toast factory.
pub async fn configured_error_toasts(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    match response.extensions().get::<ErrorDetails>() {
        Some(details) => ApiError::from(details).render(&state.toasts),
        None => response,
    }
}
