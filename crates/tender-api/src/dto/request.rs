//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use tender_service::PortDayInput;

/// Email and password sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Please enter your email address."))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Please enter your password."))]
    pub password: String,
}

/// Account registration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Please enter your email address."))]
    pub email: String,
    /// Password.
    pub password: String,
    /// Password typed a second time.
    #[serde(default)]
    pub confirm_password: String,
}

/// Google sign-in with an ID token obtained by the browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedSignInRequest {
    /// Google ID token.
    #[serde(default)]
    pub id_token: String,
    /// Page the token was obtained on.
    #[serde(default)]
    pub request_uri: Option<String>,
}

/// A request addressed only by email: sign-in links and password resets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRequest {
    /// Email address.
    #[serde(default)]
    pub email: String,
}

/// Completing a passwordless sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompleteLinkRequest {
    /// Address the link was sent to.
    #[serde(default)]
    pub email: Option<String>,
    /// One-time code from the link.
    #[validate(length(min = 1, message = "Invalid sign-in link."))]
    pub oob_code: String,
}

/// Creating a port day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortDayRequest {
    /// Port day fields.
    #[serde(flatten)]
    pub port_day: PortDayInput,
    /// The word typed to confirm.
    #[serde(default)]
    pub confirmation: String,
}

/// `?date=YYYY-MM-DD`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsQuery {
    /// UTC calendar day.
    pub date: String,
}

/// `?limit=` on notification listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListQuery {
    /// Maximum entries, defaults to the feed size.
    pub limit: Option<usize>,
}

/// `?from=` on the sign-in page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignInPageQuery {
    /// Where to return after signing in.
    pub from: Option<String>,
}

/// Query string of an emailed sign-in link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyLinkQuery {
    /// One-time code.
    pub oob_code: Option<String>,
    /// Link mode, `signIn` for sign-in links.
    pub mode: Option<String>,
    /// Address the link was sent to, when the browser knows it.
    pub email: Option<String>,
}

/// `?token=` on the WebSocket upgrade.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WsQuery {
    /// Session token; the session cookie is used when absent.
    pub token: Option<String>,
}
