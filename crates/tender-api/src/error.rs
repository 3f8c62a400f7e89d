//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use tender_core::error::{AppError, ErrorKind};
use tender_entity::toast::Toast;
use tender_service::ToastFactory;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Toast to show, when the failure is not reported inline.
    pub toast: Option<Toast>,
}

/// An `AppError` on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Replace the message of a transient failure with `message`.
    ///
    /// Validation, precondition, and not-found messages are already written
    /// for the operator and pass through unchanged.
    pub fn transient_as(err: AppError, message: &str) -> Self {
        if err.is_transient() {
            tracing::error!(error = %err, "{message}");
            Self(AppError::new(err.kind, message))
        } else {
            Self(err)
        }
    }

    /// HTTP status and error code for a kind.
    pub fn status_of(kind: ErrorKind) -> (StatusCode, &'static str) {
        match kind {
            ErrorKind::Validation => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            ErrorKind::Precondition => (StatusCode::PRECONDITION_FAILED, "PRECONDITION_FAILED"),
            ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Busy => (StatusCode::CONFLICT, "BUSY"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::RateLimit => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
            ErrorKind::Database | ErrorKind::ExternalService | ErrorKind::Io => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ErrorKind::Internal | ErrorKind::Configuration | ErrorKind::Serialization => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }

    fn toast(&self, toasts: &ToastFactory) -> Option<Toast> {
        match self.0.kind {
            ErrorKind::Busy | ErrorKind::NotFound => Some(toasts.for_error(&self.0)),
            _ if self.0.is_transient() => Some(toasts.for_error(&self.0)),
            ErrorKind::Internal => Some(toasts.for_error(&self.0)),
            _ => None,
        }
    }

    /// Status and JSON envelope, with toasts stamped by `toasts`.
    ///
    /// The kind and message also ride along as an [`ErrorDetails`]
    /// extension so the body can be rendered again with the configured
    /// toast lifetime.
    pub fn render(&self, toasts: &ToastFactory) -> Response {
        let (status, error_code) = Self::status_of(self.0.kind);
        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: self.0.message.clone(),
            toast: self.toast(toasts),
        };
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorDetails {
            kind: self.0.kind,
            message: self.0.message.clone(),
        });
        response
    }
}

/// Kind and message of an error response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetails {
    /// Error kind.
    pub kind: ErrorKind,
    /// Operator-facing message.
    pub message: String,
}

impl From<&ErrorDetails> for ApiError {
    fn from(details: &ErrorDetails) -> Self {
        Self(AppError::new(details.kind, details.message.clone()))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if Self::status_of(self.0.kind).0.is_server_error() {
            tracing::error!(error = %self.0, source = ?self.0.source, "Request failed");
        } else {
            tracing::debug!(error = %self.0, "Request rejected");
        }
        self.render(&ToastFactory::default())
    }
}
