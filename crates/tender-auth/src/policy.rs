//! Allow-list policies applied on top of the identity provider.
//!
//! Two rules gate the console: federated sign-in must resolve to one fixed
//! Google account, and every email-based flow must use the corporate domain.

use tender_core::config::auth::AuthConfig;
use tender_core::error::AppError;

use crate::identity::{Identity, SignInMethod};

/// The operator allow-list.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    allowed_federated_email: String,
    allowed_domain: String,
}

impl AccessPolicy {
    /// Build a policy from explicit values.
    pub fn new(allowed_federated_email: &str, allowed_domain: &str) -> Self {
        Self {
            allowed_federated_email: allowed_federated_email.trim().to_lowercase(),
            allowed_domain: allowed_domain.trim().trim_start_matches('@').to_lowercase(),
        }
    }

    /// Build a policy from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.allowed_federated_email, &config.allowed_email_domain)
    }

    /// The allowed email domain, without `@`.
    pub fn allowed_domain(&self) -> &str {
        &self.allowed_domain
    }

    /// Reject strings that are not email addresses.
    pub fn check_email_format(&self, email: &str) -> Result<(), AppError> {
        let email = email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(AppError::validation("Please enter a valid email address.")),
        }
    }

    /// Reject email addresses outside the allowed domain.
    pub fn check_email_domain(&self, email: &str) -> Result<(), AppError> {
        self.check_email_format(email)?;
        let suffix = format!("@{}", self.allowed_domain);
        if email.trim().to_lowercase().ends_with(&suffix) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Only {suffix} email addresses are allowed."
            )))
        }
    }

    /// Reject federated identities other than the allow-listed account.
    pub fn check_federated(&self, identity: &Identity) -> Result<(), AppError> {
        if identity.email.trim().to_lowercase() == self.allowed_federated_email {
            Ok(())
        } else {
            Err(AppError::authorization(
                "This Google account is not authorized for access.",
            ))
        }
    }

    /// Apply the rule matching how the identity signed in.
    pub fn check(&self, identity: &Identity) -> Result<(), AppError> {
        match identity.method {
            SignInMethod::Federated => self.check_federated(identity),
            SignInMethod::Password | SignInMethod::EmailLink => {
                self.check_email_domain(&identity.email)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tender_core::ErrorKind;

    fn policy() -> AccessPolicy {
        AccessPolicy::new("evrimatenderrcyc@gmail.com", "ritz-carltonyachtcollection.com")
    }

    fn identity(email: &str, method: SignInMethod) -> Identity {
        Identity {
            uid: "uid-1".to_string(),
            email: email.to_string(),
            method,
            display_name: None,
        }
    }

    #[test]
    fn test_domain_rule() {
        let p = policy();
        assert!(p.check_email_domain("radio@ritz-carltonyachtcollection.com").is_ok());
        assert!(p.check_email_domain("Radio@Ritz-CarltonYachtCollection.com").is_ok());

        let err = p.check_email_domain("radio@gmail.com").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert_eq!(
            err.message,
            "Only @ritz-carltonyachtcollection.com email addresses are allowed."
        );

        // Suffix must be a whole domain, not a look-alike.
        assert!(p.check_email_domain("x@evil-ritz-carltonyachtcollection.com").is_err());
    }

    #[test]
    fn test_email_format() {
        let p = policy();
        for bad in ["", "radio", "@ritz-carltonyachtcollection.com", "radio@"] {
            assert_eq!(p.check_email_format(bad).unwrap_err().kind, ErrorKind::Validation, "{bad}");
        }
    }

    #[test]
    fn test_federated_rule() {
        let p = policy();
        assert!(p.check(&identity("EvrimaTenderRCYC@gmail.com", SignInMethod::Federated)).is_ok());
        let err = p
            .check(&identity("someone@gmail.com", SignInMethod::Federated))
            .unwrap_err();
        assert_eq!(err.message, "This Google account is not authorized for access.");
        // A corporate Google account still is not the allow-listed one.
        assert!(p
            .check(&identity("radio@ritz-carltonyachtcollection.com", SignInMethod::Federated))
            .is_err());
    }

    #[test]
    fn test_link_sign_in_uses_domain_rule() {
        let p = policy();
        assert!(p.check(&identity("radio@ritz-carltonyachtcollection.com", SignInMethod::EmailLink)).is_ok());
        assert!(p.check(&identity("evrimatenderrcyc@gmail.com", SignInMethod::EmailLink)).is_err());
    }
}
