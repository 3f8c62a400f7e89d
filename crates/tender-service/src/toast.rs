//! Toast construction with the configured lifetime.

use tender_core::config::console::ConsoleConfig;
use tender_core::error::{AppError, ErrorKind};
use tender_entity::toast::{DEFAULT_TOAST_DURATION_MS, Toast};

/// Builds toasts that share one display duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastFactory {
    duration_ms: u64,
}

impl ToastFactory {
    /// Creates a factory stamping `duration_ms` on every toast.
    pub fn new(duration_ms: u64) -> Self {
        Self { duration_ms }
    }

    /// Creates a factory from console configuration.
    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::new(config.toast_duration_ms)
    }

    /// The configured duration.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn success(&self, message: impl Into<String>) -> Toast {
        Toast::success(message).with_duration(self.duration_ms)
    }

    pub fn error(&self, message: impl Into<String>) -> Toast {
        Toast::error(message).with_duration(self.duration_ms)
    }

    pub fn warning(&self, message: impl Into<String>) -> Toast {
        Toast::warning(message).with_duration(self.duration_ms)
    }

    pub fn info(&self, message: impl Into<String>) -> Toast {
        Toast::info(message).with_duration(self.duration_ms)
    }

    /// The toast shown for a failed operation.
    ///
    /// A busy refusal is a warning since nothing went wrong; everything
    /// else is an error carrying the operator-facing message.
    pub fn for_error(&self, err: &AppError) -> Toast {
        match err.kind {
            ErrorKind::Busy => self.warning(err.message.clone()),
            _ => self.error(err.message.clone()),
        }
    }
}

impl Default for ToastFactory {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION_MS)
    }
}

#[cfg(test)]
mod tests {
    use tender_entity::toast::ToastKind;

    use super::*;

    #[test]
    fn test_duration_applied() {
        let toasts = ToastFactory::new(2500);
        assert_eq!(toasts.success("Saved").duration_ms, 2500);
        assert_eq!(toasts.info("Hi").kind, ToastKind::Info);
        assert_eq!(ToastFactory::default().duration_ms(), DEFAULT_TOAST_DURATION_MS);
    }

    #[test]
    fn test_error_toasts() {
        let toasts = ToastFactory::default();
        let busy = toasts.for_error(&AppError::busy("Please wait."));
        assert_eq!(busy.kind, ToastKind::Warning);
        let failed = toasts.for_error(&AppError::precondition("No active port day."));
        assert_eq!(failed.kind, ToastKind::Error);
        assert_eq!(failed.message, "No active port day.");
    }
}
