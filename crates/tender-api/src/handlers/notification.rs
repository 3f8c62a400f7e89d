//! Notification handlers: preview, send, list, delete.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use tender_core::types::NotificationId;
use tender_entity::notification::Notification;
use tender_service::SendRequest;

use crate::dto::request::ListQuery;
use crate::dto::response::{ApiResponse, MessageResponse, PreviewResponse};
use crate::error::ApiError;
use crate::extractors::{AppJson, AppPath, AppQuery, AuthUser};
use crate::state::AppState;

/// POST /api/notifications/preview
pub async fn preview(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppJson(req): AppJson<SendRequest>,
) -> Json<ApiResponse<PreviewResponse>> {
    Json(ApiResponse::ok(PreviewResponse {
        message: state.notifications.preview(&req),
    }))
}

/// POST /api/notifications
pub async fn send(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<SendRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Notification>>), ApiError> {
    let notification = state
        .notifications
        .send(&auth, &req)
        .await
        .map_err(|e| ApiError::transient_as(e, "Failed to send notification."))?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_toast(
            notification,
            state.toasts.success("Notification sent."),
        )),
    ))
}

/// GET /api/notifications
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    let limit = query.limit.unwrap_or(state.config.realtime.feed_limit);
    let notifications = state
        .notifications
        .latest(limit)
        .await
        .map_err(|e| ApiError::transient_as(e, "Failed to load notifications."))?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// DELETE /api/notifications/{id}
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppPath(id): AppPath<NotificationId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .notifications
        .delete(id)
        .await
        .map_err(|e| ApiError::transient_as(e, "Failed to delete notification."))?;
    Ok(Json(ApiResponse::with_toast(
        MessageResponse {
            message: "Notification deleted".to_string(),
        },
        state.toasts.success("Notification deleted."),
    )))
}
