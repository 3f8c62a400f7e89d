//! Session lifecycle: sign-in flows, token validation, and sign-out.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{info, warn};

use tender_core::config::auth::AuthConfig;
use tender_core::error::{AppError, ErrorKind};
use tender_core::events::session::{SessionEvent, SignOutReason};
use tender_core::types::SessionId;

use super::store::{Session, SessionStore};
use crate::identity::Identity;
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordValidator;
use crate::policy::AccessPolicy;
use crate::provider::IdentityProvider;

const EVENT_BUFFER: usize = 64;

/// Result of a successful sign-in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResult {
    /// Session token to present on later requests.
    pub token: String,
    /// The session that was created.
    pub session: Session,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Creates, validates, and ends operator sessions.
///
/// Every sign-in flow runs the provider first and the allow-list second. An
/// identity that authenticates with the provider but fails the allow-list
/// never gets a session.
#[derive(Clone)]
pub struct SessionManager {
    provider: Arc<dyn IdentityProvider>,
    policy: AccessPolicy,
    validator: PasswordValidator,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    store: Arc<SessionStore>,
    events: broadcast::Sender<SessionEvent>,
    continue_url: String,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("provider", &self.provider.name())
            .field("policy", &self.policy)
            .field("live_sessions", &self.store.len())
            .finish()
    }
}

impl SessionManager {
    /// Creates a session manager with explicit collaborators.
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        policy: AccessPolicy,
        validator: PasswordValidator,
        encoder: JwtEncoder,
        decoder: JwtDecoder,
        store: Arc<SessionStore>,
        continue_url: impl Into<String>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            provider,
            policy,
            validator,
            encoder,
            decoder,
            store,
            events,
            continue_url: continue_url.into(),
        }
    }

    /// Creates a session manager from auth configuration.
    pub fn from_config(config: &AuthConfig, provider: Arc<dyn IdentityProvider>) -> Self {
        Self::new(
            provider,
            AccessPolicy::from_config(config),
            PasswordValidator::from_config(config),
            JwtEncoder::new(config),
            JwtDecoder::new(config),
            Arc::new(SessionStore::new()),
            config.email_link_continue_url(),
        )
    }

    /// The allow-list in force.
    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Subscribe to sign-in and sign-out events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Sign in with email and password.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignInResult, AppError> {
        self.policy.check_email_domain(email)?;
        let identity = self
            .provider
            .sign_in_with_password(email.trim(), password)
            .await?;
        self.establish(identity)
    }

    /// Register a new account and sign it in.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<SignInResult, AppError> {
        self.policy.check_email_domain(email)?;
        self.validator.validate(password, confirmation)?;
        let identity = self.provider.create_account(email.trim(), password).await?;
        self.establish(identity)
    }

    /// Sign in with a Google ID token.
    pub async fn sign_in_federated(
        &self,
        id_token: &str,
        request_uri: &str,
    ) -> Result<SignInResult, AppError> {
        if id_token.trim().is_empty() {
            return Err(AppError::validation("Sign-in cancelled."));
        }
        let identity = self
            .provider
            .sign_in_federated(id_token, request_uri)
            .await?;
        self.establish(identity)
    }

    /// Email a passwordless sign-in link.
    pub async fn send_sign_in_link(&self, email: &str) -> Result<(), AppError> {
        if email.trim().is_empty() {
            return Err(AppError::validation(
                "Please enter your email address first.",
            ));
        }
        self.policy.check_email_domain(email)?;
        self.provider
            .send_sign_in_link(email.trim(), &self.continue_url)
            .await
            .map_err(|e| {
                collaborator_failure(e, "Failed to send sign-in link. Please try again.")
            })?;
        info!(continue_url = %self.continue_url, "Sign-in link sent");
        Ok(())
    }

    /// Complete a passwordless sign-in.
    ///
    /// `email` is the address the link was requested for; the browser that
    /// requested the link remembers it, other browsers must ask for it.
    pub async fn complete_link_sign_in(
        &self,
        email: Option<&str>,
        oob_code: &str,
    ) -> Result<SignInResult, AppError> {
        if oob_code.trim().is_empty() {
            return Err(AppError::validation("Invalid sign-in link."));
        }
        let email = email.map(str::trim).filter(|e| !e.is_empty()).ok_or_else(|| {
            AppError::validation("Email confirmation is required to complete sign-in.")
        })?;
        self.policy.check_email_domain(email)?;
        let identity = self.provider.complete_link_sign_in(email, oob_code).await?;
        self.establish(identity)
    }

    /// Email a password reset link.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        if email.trim().is_empty() {
            return Err(AppError::validation(
                "Please enter your email address first.",
            ));
        }
        self.policy.check_email_domain(email)?;
        self.provider
            .send_password_reset(email.trim())
            .await
            .map_err(|e| collaborator_failure(e, "Failed to send reset email. Please try again."))
    }

    /// Resolve a session token to its live session.
    ///
    /// Sessions that have expired, or whose identity no longer passes the
    /// allow-list, are signed out.
    pub fn authenticate(&self, token: &str) -> Result<Session, AppError> {
        let claims = self.decoder.decode(token)?;
        let session = self.store.get(claims.session_id()).ok_or_else(|| {
            AppError::authentication("Your session has ended. Please sign in again.")
        })?;

        if session.is_expired_at(Utc::now()) {
            self.sign_out(session.id, SignOutReason::Expired);
            return Err(AppError::authentication(
                "Your session has expired. Please sign in again.",
            ));
        }

        if let Err(e) = self.policy.check(&session.identity()) {
            warn!(session_id = %session.id, "Session no longer passes the allow-list");
            self.sign_out(session.id, SignOutReason::PolicyViolation);
            return Err(e);
        }

        Ok(session)
    }

    /// End a session. Returns whether it was live.
    pub fn sign_out(&self, session_id: SessionId, reason: SignOutReason) -> bool {
        let Some(session) = self.store.remove(session_id) else {
            return false;
        };
        info!(session_id = %session_id, email = %session.email, ?reason, "Session ended");
        let _ = self.events.send(SessionEvent::SignedOut { session_id, reason });
        true
    }

    /// All live sessions.
    pub fn active_sessions(&self) -> Vec<Session> {
        self.store.all()
    }

    /// Sign out every expired session. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.store
            .expired_ids(Utc::now())
            .into_iter()
            .filter(|id| self.sign_out(*id, SignOutReason::Expired))
            .count()
    }

    /// Sign out every session before the server stops.
    pub fn shutdown(&self) -> usize {
        self.store
            .all()
            .into_iter()
            .filter(|s| self.sign_out(s.id, SignOutReason::Shutdown))
            .count()
    }

    fn establish(&self, identity: Identity) -> Result<SignInResult, AppError> {
        if let Err(e) = self.policy.check(&identity) {
            warn!(
                method = %identity.method,
                provider = self.provider.name(),
                "Provider identity rejected by allow-list; no session created"
            );
            return Err(e);
        }

        let session_id = SessionId::new();
        let (token, expires_at) = self.encoder.issue(&identity, session_id)?;
        let session = Session {
            id: session_id,
            uid: identity.uid,
            email: identity.email,
            method: identity.method,
            created_at: Utc::now(),
            expires_at,
        };
        self.store.insert(session.clone());

        info!(
            session_id = %session.id,
            email = %session.email,
            method = %session.method,
            "Operator signed in"
        );
        let _ = self.events.send(SessionEvent::SignedIn {
            session_id: session.id,
            email: session.email.clone(),
        });

        Ok(SignInResult {
            token,
            session,
            expires_at,
        })
    }
}

/// Keep operator-actionable errors, replace collaborator failures with a
/// retry message.
fn collaborator_failure(err: AppError, message: &str) -> AppError {
    match err.kind {
        ErrorKind::Validation
        | ErrorKind::Authorization
        | ErrorKind::NotFound
        | ErrorKind::RateLimit => err,
        _ => AppError::with_source(ErrorKind::ExternalService, message, err),
    }
}
