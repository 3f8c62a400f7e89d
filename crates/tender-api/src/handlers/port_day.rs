//! Port day handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use tender_core::types::PortDayId;
use tender_entity::port_day::PortDay;
use tender_service::PortDayInput;

use crate::dto::request::CreatePortDayRequest;
use crate::dto::response::{ActivePortDayResponse, ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AppJson, AppPath, AuthUser};
use crate::state::AppState;

/// GET /api/port-days/active
pub async fn active(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<ActivePortDayResponse>>, ApiError> {
    let port_day = state.port_days.active_port_day().await?;
    Ok(Json(ApiResponse::ok(ActivePortDayResponse { port_day })))
}

/// GET /api/port-days
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<PortDay>>>, ApiError> {
    Ok(Json(ApiResponse::ok(state.port_days.list().await?)))
}

/// POST /api/port-days
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<CreatePortDayRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PortDay>>), ApiError> {
    let port_day = state
        .port_days
        .create(&req.port_day, &req.confirmation)
        .await
        .map_err(|e| ApiError::transient_as(e, "Failed to create port day."))?;
    tracing::info!(port_day_id = %port_day.id, operator = %auth.email, "Port day started from console");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_toast(
            port_day,
            state.toasts.success("Port day created."),
        )),
    ))
}

/// PUT /api/port-days/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppPath(id): AppPath<PortDayId>,
    AppJson(input): AppJson<PortDayInput>,
) -> Result<Json<ApiResponse<PortDay>>, ApiError> {
    let port_day = state
        .port_days
        .edit(id, &input)
        .await
        .map_err(|e| ApiError::transient_as(e, "Failed to update port day."))?;
    Ok(Json(ApiResponse::with_toast(
        port_day,
        state.toasts.success("Port day updated."),
    )))
}

/// DELETE /api/port-days/{id}
pub async fn end(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppPath(id): AppPath<PortDayId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .port_days
        .end(id)
        .await
        .map_err(|e| ApiError::transient_as(e, "Failed to end port day."))?;
    Ok(Json(ApiResponse::with_toast(
        MessageResponse {
            message: "Port day ended".to_string(),
        },
        state.toasts.success("Port day ended."),
    )))
}
