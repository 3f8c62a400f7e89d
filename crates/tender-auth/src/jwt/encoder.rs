//! Session token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use tender_core::config::auth::AuthConfig;
use tender_core::error::AppError;
use tender_core::types::SessionId;

use super::claims::Claims;
use crate::identity::Identity;

/// Creates signed HS256 session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").field("ttl", &self.ttl).finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_secret(
            config.session_secret.as_bytes(),
            Duration::hours(config.session_ttl_hours as i64),
        )
    }

    /// Creates an encoder with an explicit secret and lifetime.
    pub fn with_secret(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Issue a token for `identity` bound to `session_id`.
    pub fn issue(
        &self,
        identity: &Identity,
        session_id: SessionId,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + self.ttl;
        let claims = Claims {
            sub: identity.uid.clone(),
            sid: session_id,
            email: identity.email.clone(),
            method: identity.method,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;
        Ok((token, exp))
    }
}
