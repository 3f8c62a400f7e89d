//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tender_auth::Session;
use tender_entity::display::DisplayImage;
use tender_entity::notification::{Direction, Notification, TenderAction};
use tender_entity::port_day::PortDay;
use tender_entity::toast::Toast;
use tender_service::FeedbackSummary;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
    /// Toast confirming a write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toast: Option<Toast>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            toast: None,
        }
    }

    /// Creates a successful response carrying a toast.
    pub fn with_toast(data: T, toast: Toast) -> Self {
        Self {
            success: true,
            data,
            toast: Some(toast),
        }
    }
}

/// Simple message payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since start.
    pub uptime_seconds: i64,
    /// Active document store backend.
    pub database: String,
    /// Whether the store answered.
    pub database_reachable: bool,
    /// Open WebSocket connections.
    pub ws_connections: usize,
}

/// The signed-in session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Session details.
    pub session: Session,
}

/// Notification preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewResponse {
    /// The sentence a send would write; empty when incomplete.
    pub message: String,
}

/// Result of removing several records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearedResponse {
    /// How many were removed.
    pub removed: u64,
}

/// The active port day, or none.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePortDayResponse {
    /// The day in effect.
    pub port_day: Option<PortDay>,
}

/// Sign-in page view model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInView {
    /// Page name.
    pub page: String,
    /// Domain required for email sign-in.
    pub allowed_email_domain: String,
    /// Where to go after signing in.
    pub from: String,
}

/// Email link landing page view model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyLinkView {
    /// Page name.
    pub page: String,
    /// Whether the email must be re-entered to finish.
    pub needs_email: bool,
    /// The code from the link.
    pub oob_code: Option<String>,
    /// Error shown when the link cannot be used.
    pub error: Option<String>,
}

/// A selectable option on the operator form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceOption<T> {
    /// Stored value.
    pub value: T,
    /// Label shown.
    pub label: String,
}

/// Operator dashboard view model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorView {
    /// Page name.
    pub page: String,
    /// Signed-in operator.
    pub operator: String,
    /// Vessel name used in messages.
    pub vessel_name: String,
    /// Tender labels.
    pub tenders: Vec<String>,
    /// Selectable actions.
    pub actions: Vec<ChoiceOption<TenderAction>>,
    /// Selectable directions.
    pub directions: Vec<ChoiceOption<Direction>>,
    /// Port day in effect.
    pub active_port_day: Option<PortDay>,
    /// Latest notifications, newest first.
    pub notifications: Vec<Notification>,
    /// Map center `[lat, lng]` for the pier picker.
    pub map_center: [f64; 2],
    /// TV display document.
    pub tv_display: Option<DisplayImage>,
    /// Largest accepted TV image in bytes.
    pub max_display_image_bytes: usize,
}

/// Analytics page view model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsView {
    /// Page name.
    pub page: String,
    /// Aggregated feedback.
    pub summary: FeedbackSummary,
    /// When the summary was computed.
    pub generated_at: DateTime<Utc>,
}
