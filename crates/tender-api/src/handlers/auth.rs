//! Auth handlers: the sign-in flows, sign-out, and the current session.

use axum::Json;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use tender_auth::SignInResult;
use tender_core::events::SignOutReason;
use tender_entity::toast::Toast;

use crate::dto::request::{
    CompleteLinkRequest, EmailRequest, FederatedSignInRequest, SignInRequest, SignUpRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse, SessionResponse};
use crate::error::ApiError;
use crate::extractors::{AppJson, AuthUser, SESSION_COOKIE, ValidatedJson};
use crate::state::AppState;

/// `Set-Cookie` value carrying a session token.
pub fn session_cookie(token: &str, max_age_seconds: i64) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        max_age_seconds.max(0)
    )
}

/// `Set-Cookie` value that removes the session cookie.
pub fn cleared_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Respond to a successful sign-in with the token in the body and a cookie.
pub(crate) fn signed_in(result: SignInResult, toast: Toast) -> Response {
    let max_age = (result.expires_at - Utc::now()).num_seconds();
    let cookie = session_cookie(&result.token, max_age);
    (
        [(SET_COOKIE, cookie)],
        Json(ApiResponse::with_toast(result, toast)),
    )
        .into_response()
}

/// POST /api/auth/signin
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignInRequest>,
) -> Result<Response, ApiError> {
    let result = state
        .sessions
        .sign_in_with_password(&req.email, &req.password)
        .await?;
    Ok(signed_in(result, state.toasts.success("Signed in successfully.")))
}

/// POST /api/auth/signup
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignUpRequest>,
) -> Result<Response, ApiError> {
    let result = state
        .sessions
        .sign_up(&req.email, &req.password, &req.confirm_password)
        .await?;
    Ok(signed_in(result, state.toasts.success("Account created successfully!")))
}

/// POST /api/auth/federated
pub async fn federated(
    State(state): State<AppState>,
    AppJson(req): AppJson<FederatedSignInRequest>,
) -> Result<Response, ApiError> {
    let request_uri = req
        .request_uri
        .unwrap_or_else(|| state.config.auth.public_base_url.clone());
    let result = state
        .sessions
        .sign_in_federated(&req.id_token, &request_uri)
        .await?;
    Ok(signed_in(result, state.toasts.success("Signed in successfully.")))
}

/// POST /api/auth/email-link
pub async fn send_email_link(
    State(state): State<AppState>,
    AppJson(req): AppJson<EmailRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.sessions.send_sign_in_link(&req.email).await?;
    let message =
        "Sign-in link sent successfully! Please check your email inbox (and spam folder).";
    Ok(Json(ApiResponse::with_toast(
        MessageResponse {
            message: message.to_string(),
        },
        state.toasts.success(message),
    )))
}

/// POST /api/auth/email-link/complete
pub async fn complete_email_link(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CompleteLinkRequest>,
) -> Result<Response, ApiError> {
    let result = state
        .sessions
        .complete_link_sign_in(req.email.as_deref(), &req.oob_code)
        .await?;
    Ok(signed_in(result, state.toasts.success("Signed in successfully.")))
}

/// POST /api/auth/password-reset
pub async fn password_reset(
    State(state): State<AppState>,
    AppJson(req): AppJson<EmailRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.sessions.request_password_reset(&req.email).await?;
    let message = "Password reset email sent. Please check your inbox.";
    Ok(Json(ApiResponse::with_toast(
        MessageResponse {
            message: message.to_string(),
        },
        state.toasts.success(message),
    )))
}

/// POST /api/auth/signout
pub async fn sign_out(State(state): State<AppState>, auth: AuthUser) -> Response {
    state
        .sessions
        .sign_out(auth.session.id, SignOutReason::UserRequested);
    (
        [(SET_COOKIE, cleared_cookie())],
        Json(ApiResponse::with_toast(
            MessageResponse {
                message: "Signed out".to_string(),
            },
            state.toasts.info("Signed out."),
        )),
    )
        .into_response()
}

/// GET /api/auth/session
pub async fn current_session(auth: AuthUser) -> Json<ApiResponse<SessionResponse>> {
    Json(ApiResponse::ok(SessionResponse {
        session: auth.session,
    }))
}
