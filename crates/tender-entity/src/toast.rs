//! Ephemeral operator notices.

use serde::{Deserialize, Serialize};
use tender_core::types::ToastId;

/// Lifetime of a toast unless stated otherwise.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 4000;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    /// The operation completed.
    #[default]
    Success,
    /// The operation failed.
    Error,
    /// The operation was refused, nothing changed.
    Warning,
    /// Informational.
    Info,
}

/// A self-expiring notice shown to the operator. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    /// Unique toast identifier.
    pub id: ToastId,
    /// Text shown to the operator.
    pub message: String,
    /// Severity.
    pub kind: ToastKind,
    /// How long the toast stays visible.
    pub duration_ms: u64,
}

impl Toast {
    /// Create a toast with the default duration.
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            id: ToastId::new(),
            message: message.into(),
            kind,
            duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }

    /// Create a success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    /// Create an error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    /// Create a warning toast.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, message)
    }

    /// Create an info toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    /// Override the display duration.
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}
