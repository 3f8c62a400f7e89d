//! Session token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use tender_core::config::auth::AuthConfig;
use tender_core::error::AppError;

use super::claims::Claims;

/// Validates session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_secret(config.session_secret.as_bytes())
    }

    /// Creates a decoder with an explicit secret.
    pub fn with_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock skew

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Decode and verify a token's signature and expiry.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Your session has expired. Please sign in again.")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid session token signature")
                }
                _ => AppError::authentication(format!("Invalid session token: {e}")),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use tender_core::ErrorKind;
    use tender_core::types::SessionId;

    use super::*;
    use crate::identity::{Identity, SignInMethod};
    use crate::jwt::JwtEncoder;

    fn identity() -> Identity {
        Identity {
            uid: "uid-42".to_string(),
            email: "radio@ritz-carltonyachtcollection.com".to_string(),
            method: SignInMethod::EmailLink,
            display_name: None,
        }
    }

    #[test]
    fn test_issue_and_decode() {
        let encoder = JwtEncoder::with_secret(b"secret", Duration::hours(1));
        let decoder = JwtDecoder::with_secret(b"secret");
        let sid = SessionId::new();
        let (token, exp) = encoder.issue(&identity(), sid).unwrap();

        let claims = decoder.decode(&token).unwrap();
        assert_eq!(claims.session_id(), sid);
        assert_eq!(claims.sub, "uid-42");
        assert_eq!(claims.method, SignInMethod::EmailLink);
        assert_eq!(claims.exp, exp.timestamp());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let encoder = JwtEncoder::with_secret(b"secret", Duration::hours(1));
        let (token, _) = encoder.issue(&identity(), SessionId::new()).unwrap();
        let err = JwtDecoder::with_secret(b"other").decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_expired_rejected() {
        let encoder = JwtEncoder::with_secret(b"secret", Duration::hours(-1));
        let (token, _) = encoder.issue(&identity(), SessionId::new()).unwrap();
        let err = JwtDecoder::with_secret(b"secret").decode(&token).unwrap_err();
        assert_eq!(err.message, "Your session has expired. Please sign in again.");
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(JwtDecoder::with_secret(b"secret").decode("not.a.token").is_err());
    }
}
