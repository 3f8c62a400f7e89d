//! Page routes. Each returns the view model the page renders.

use axum::Json;
use axum::extract::{OriginalUri, Query, State};
use axum::http::StatusCode;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::Utc;

use tender_entity::notification::{Direction, TenderAction};

use crate::dto::request::{SignInPageQuery, VerifyLinkQuery};
use crate::dto::response::{AnalyticsView, ChoiceOption, OperatorView, SignInView, VerifyLinkView};
use crate::error::{ApiError, ApiErrorResponse};
use crate::extractors::MaybeAuthUser;
use crate::handlers::auth::session_cookie;
use crate::state::AppState;

/// Landing page after sign-in.
pub const HOME_PATH: &str = "/operator";

/// Only same-site absolute paths are followed after sign-in.
pub fn safe_from(from: Option<&str>) -> String {
    match from {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => HOME_PATH.to_string(),
    }
}

fn sign_in_redirect(path: &str) -> Response {
    let from: String = path
        .bytes()
        .map(|b| match b {
            b'/' | b'-' | b'_' | b'.' | b'~' => (b as char).to_string(),
            b if b.is_ascii_alphanumeric() => (b as char).to_string(),
            b => format!("%{b:02X}"),
        })
        .collect();
    Redirect::to(&format!("/signin?from={from}")).into_response()
}

/// GET /
pub async fn root(MaybeAuthUser(auth): MaybeAuthUser) -> Response {
    match auth {
        Some(_) => Redirect::to(HOME_PATH).into_response(),
        None => sign_in_redirect(HOME_PATH),
    }
}

/// GET /signin
pub async fn sign_in_page(
    State(state): State<AppState>,
    MaybeAuthUser(auth): MaybeAuthUser,
    Query(query): Query<SignInPageQuery>,
) -> Response {
    let from = safe_from(query.from.as_deref());
    if auth.is_some() {
        return Redirect::to(&from).into_response();
    }
    Json(SignInView {
        page: "signin".to_string(),
        allowed_email_domain: state.sessions.policy().allowed_domain().to_string(),
        from,
    })
    .into_response()
}

/// GET /email-link-signin/verify
///
/// Completes the sign-in when the link carries both the code and the
/// address. Otherwise the page asks for what is missing.
pub async fn verify_link(
    State(state): State<AppState>,
    Query(query): Query<VerifyLinkQuery>,
) -> Response {
    let view = |needs_email: bool, error: Option<String>, oob_code: Option<String>| {
        Json(VerifyLinkView {
            page: "email-link-signin".to_string(),
            needs_email,
            oob_code,
            error,
        })
        .into_response()
    };

    let Some(oob_code) = query.oob_code.filter(|c| !c.trim().is_empty()) else {
        return view(false, Some("Invalid sign-in link.".to_string()), None);
    };
    if query.mode.as_deref().is_some_and(|mode| mode != "signIn") {
        return view(false, Some("Invalid sign-in link.".to_string()), None);
    }
    let Some(email) = query.email.filter(|e| !e.trim().is_empty()) else {
        return view(true, None, Some(oob_code));
    };

    match state
        .sessions
        .complete_link_sign_in(Some(&email), &oob_code)
        .await
    {
        Ok(result) => {
            let max_age = (result.expires_at - Utc::now()).num_seconds();
            (
                [(SET_COOKIE, session_cookie(&result.token, max_age))],
                Redirect::to(HOME_PATH),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Email link sign-in failed");
            let message = if e.is_transient() {
                "Failed to sign in. The link might be invalid or expired. Please try requesting a new link."
                    .to_string()
            } else {
                e.message
            };
            view(false, Some(message), Some(oob_code))
        }
    }
}

/// GET /operator
pub async fn operator_page(
    State(state): State<AppState>,
    MaybeAuthUser(auth): MaybeAuthUser,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, ApiError> {
    let Some(auth) = auth else {
        return Ok(sign_in_redirect(uri.path()));
    };

    let active_port_day = state.port_days.active_port_day().await?;
    let notifications = state.notifications.feed().await?;
    let tv_display = state.display.current().await?;
    let console = &state.config.console;
    let map_center = active_port_day
        .as_ref()
        .and_then(|d| d.pier_location)
        .map(|p| [p.lat, p.lng])
        .unwrap_or(console.default_map_center);

    Ok(Json(OperatorView {
        page: "operator".to_string(),
        operator: auth.email.clone(),
        vessel_name: state.composer.vessel_name().to_string(),
        tenders: console.tender_labels.clone(),
        actions: TenderAction::SELECTABLE
            .iter()
            .map(|a| ChoiceOption {
                value: *a,
                label: title_case(a.as_str()),
            })
            .collect(),
        directions: [Direction::Shoreside, Direction::Shipside]
            .iter()
            .map(|d| ChoiceOption {
                value: *d,
                label: title_case(d.as_str()),
            })
            .collect(),
        active_port_day,
        notifications,
        map_center,
        tv_display,
        max_display_image_bytes: console.max_display_image_bytes,
    })
    .into_response())
}

/// GET /analytics
pub async fn analytics_page(
    State(state): State<AppState>,
    MaybeAuthUser(auth): MaybeAuthUser,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, ApiError> {
    if auth.is_none() {
        return Ok(sign_in_redirect(uri.path()));
    }
    let summary = state
        .feedback
        .summary()
        .await
        .map_err(|e| ApiError::transient_as(e, "Failed to load feedback data."))?;
    Ok(Json(AnalyticsView {
        page: "analytics".to_string(),
        summary,
        generated_at: Utc::now(),
    })
    .into_response())
}

/// Fallback for unknown paths.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    tracing::debug!(path = %uri.path(), "No route");
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse {
            error: "NOT_FOUND".to_string(),
            message: "Page not found".to_string(),
            toast: None,
        }),
    )
}

fn title_case(label: &str) -> String {
    let lower = label.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_from() {
        assert_eq!(safe_from(Some("/analytics")), "/analytics");
        assert_eq!(safe_from(Some("//evil.example")), HOME_PATH);
        assert_eq!(safe_from(Some("https://evil.example")), HOME_PATH);
        assert_eq!(safe_from(Some("/\\evil")), HOME_PATH);
        assert_eq!(safe_from(None), HOME_PATH);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("SHORESIDE"), "Shoreside");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_sign_in_redirect_location() {
        let response = sign_in_redirect("/analytics");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()["location"],
            "/signin?from=/analytics"
        );
    }
}
