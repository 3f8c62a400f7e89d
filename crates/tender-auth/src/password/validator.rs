//! Password rules for account creation.

use tender_core::config::auth::AuthConfig;
use tender_core::error::AppError;

/// Validates a new password and its confirmation.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a validator with an explicit minimum length.
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Creates a validator from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.password_min_length)
    }

    /// Check length and that the confirmation matches.
    pub fn validate(&self, password: &str, confirmation: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long.",
                self.min_length
            )));
        }
        if password != confirmation {
            return Err(AppError::validation("Passwords do not match."));
        }
        Ok(())
    }
}
