//! The identity provider collaborator.
//!
//! The console never stores operator credentials itself when running against
//! the hosted Identity Toolkit; the in-memory provider exists for local runs
//! and tests.

pub mod identity_toolkit;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use tender_core::config::auth::{AuthConfig, PROVIDER_IDENTITY_TOOLKIT, PROVIDER_MEMORY};
use tender_core::error::AppError;

use crate::identity::Identity;

pub use identity_toolkit::IdentityToolkitProvider;
pub use memory::{MemoryIdentityProvider, SentEmail, SentEmailKind};

/// Operations the console needs from an identity backend.
///
/// Implementations return identities as the provider sees them. Allow-list
/// checks are applied afterwards by the session manager.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Authenticate an existing account with email and password.
    async fn sign_in_with_password(&self, email: &str, password: &str)
    -> Result<Identity, AppError>;

    /// Register a new account and sign it in.
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AppError>;

    /// Exchange a Google ID token for an identity.
    async fn sign_in_federated(
        &self,
        id_token: &str,
        request_uri: &str,
    ) -> Result<Identity, AppError>;

    /// Email a passwordless sign-in link that returns to `continue_url`.
    async fn send_sign_in_link(&self, email: &str, continue_url: &str) -> Result<(), AppError>;

    /// Complete a passwordless sign-in with the code carried by the link.
    async fn complete_link_sign_in(&self, email: &str, oob_code: &str)
    -> Result<Identity, AppError>;

    /// Email a password reset link.
    async fn send_password_reset(&self, email: &str) -> Result<(), AppError>;
}

/// Build the configured identity provider.
pub fn build_provider(config: &AuthConfig) -> Result<Arc<dyn IdentityProvider>, AppError> {
    match config.provider.as_str() {
        PROVIDER_IDENTITY_TOOLKIT => Ok(Arc::new(IdentityToolkitProvider::new(config)?)),
        PROVIDER_MEMORY => Ok(Arc::new(MemoryIdentityProvider::from_config(config))),
        other => Err(AppError::configuration(format!(
            "Unknown identity provider '{other}'"
        ))),
    }
}
