//! TV display image handlers.

use axum::Json;
use axum::extract::State;
use bytes::Bytes;

use tender_entity::display::DisplayImage;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/display/tv
pub async fn current(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Option<DisplayImage>>>, ApiError> {
    let image = state
        .display
        .current()
        .await
        .map_err(|e| ApiError::transient_as(e, "Failed to load the image"))?;
    Ok(Json(ApiResponse::ok(image)))
}

/// PUT /api/display/tv with the raw image as the body
pub async fn upload(
    State(state): State<AppState>,
    _auth: AuthUser,
    body: Bytes,
) -> Result<Json<ApiResponse<DisplayImage>>, ApiError> {
    let image = state
        .display
        .upload(&body)
        .await
        .map_err(|e| ApiError::transient_as(e, "Failed to upload image"))?;
    Ok(Json(ApiResponse::with_toast(
        image,
        state.toasts.success("Image uploaded successfully!"),
    )))
}

/// DELETE /api/display/tv
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .display
        .delete()
        .await
        .map_err(|e| ApiError::transient_as(e, "Failed to delete image"))?;
    Ok(Json(ApiResponse::with_toast(
        MessageResponse {
            message: "Image deleted".to_string(),
        },
        state.toasts.success("Image deleted successfully!"),
    )))
}
