//! Identity provider, allow-list, and session configuration.

use serde::{Deserialize, Serialize};

/// Provider name for the hosted Identity Toolkit REST backend.
pub const PROVIDER_IDENTITY_TOOLKIT: &str = "identity_toolkit";
/// Provider name for the process-local identity backend.
pub const PROVIDER_MEMORY: &str = "memory";

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Identity backend: `"identity_toolkit"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Web API key of the hosted identity project.
    #[serde(default)]
    pub api_key: String,
    /// Base URL of the Identity Toolkit REST API.
    #[serde(default = "default_identity_toolkit_url")]
    pub identity_toolkit_url: String,
    /// The single Google account permitted to use federated sign-in.
    #[serde(default = "default_allowed_federated_email")]
    pub allowed_federated_email: String,
    /// Email domain required for password and email-link sign-in.
    #[serde(default = "default_allowed_email_domain")]
    pub allowed_email_domain: String,
    /// HMAC secret for session tokens.
    #[serde(default = "default_session_secret")]
    pub session_secret: String,
    /// Session token lifetime in hours.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_hours: u64,
    /// Minimum password length for new accounts.
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
    /// Validity of a passwordless sign-in link in minutes.
    #[serde(default = "default_email_link_ttl")]
    pub email_link_ttl_minutes: u64,
    /// Public origin used to build the email-link continue URL.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: String::new(),
            identity_toolkit_url: default_identity_toolkit_url(),
            allowed_federated_email: default_allowed_federated_email(),
            allowed_email_domain: default_allowed_email_domain(),
            session_secret: default_session_secret(),
            session_ttl_hours: default_session_ttl(),
            password_min_length: default_password_min_length(),
            email_link_ttl_minutes: default_email_link_ttl(),
            public_base_url: default_public_base_url(),
        }
    }
}

impl AuthConfig {
    /// URL the passwordless sign-in link returns to.
    pub fn email_link_continue_url(&self) -> String {
        format!(
            "{}/email-link-signin/verify",
            self.public_base_url.trim_end_matches('/')
        )
    }
}

fn default_provider() -> String {
    PROVIDER_MEMORY.to_string()
}

fn default_identity_toolkit_url() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

fn default_allowed_federated_email() -> String {
    "evrimatenderrcyc@gmail.com".to_string()
}

fn default_allowed_email_domain() -> String {
    "ritz-carltonyachtcollection.com".to_string()
}

fn default_session_secret() -> String {
    "change-me-in-production".to_string()
}

fn default_session_ttl() -> u64 {
    12
}

fn default_password_min_length() -> usize {
    6
}

fn default_email_link_ttl() -> u64 {
    60
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continue_url_strips_trailing_slash() {
        let config = AuthConfig {
            public_base_url: "https://tenders.example.com/".to_string(),
            ..AuthConfig::default()
        };
        assert_eq!(
            config.email_link_continue_url(),
            "https://tenders.example.com/email-link-signin/verify"
        );
    }
}
