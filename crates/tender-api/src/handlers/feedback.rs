//! Feedback analytics handlers.

use axum::Json;
use axum::extract::State;

use tender_service::FeedbackSummary;
use tender_service::feedback::CommentEntry;

use crate::dto::request::CommentsQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AppQuery, AuthUser};
use crate::state::AppState;

/// GET /api/feedback/summary
pub async fn summary(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<FeedbackSummary>>, ApiError> {
    Ok(Json(ApiResponse::ok(state.feedback.summary().await?)))
}

/// GET /api/feedback/comments?date=YYYY-MM-DD
pub async fn comments(
    State(state): State<AppState>,
    _auth: AuthUser,
    AppQuery(query): AppQuery<CommentsQuery>,
) -> Result<Json<ApiResponse<Vec<CommentEntry>>>, ApiError> {
    Ok(Json(ApiResponse::ok(
        state.feedback.comments_on(&query.date).await?,
    )))
}
