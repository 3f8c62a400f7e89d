//! Authenticated identities returned by the provider.

use serde::{Deserialize, Serialize};

/// How an identity proved itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignInMethod {
    /// Email and password.
    Password,
    /// Google account.
    Federated,
    /// Passwordless email link.
    EmailLink,
}

impl SignInMethod {
    /// Return the method as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Federated => "federated",
            Self::EmailLink => "email_link",
        }
    }
}

impl std::fmt::Display for SignInMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user the identity provider has authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-assigned user id.
    pub uid: String,
    /// Verified email address.
    pub email: String,
    /// How the user signed in.
    pub method: SignInMethod,
    /// Display name, when the provider has one.
    pub display_name: Option<String>,
}
