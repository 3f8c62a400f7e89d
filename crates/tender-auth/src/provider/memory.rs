//! Process-local identity provider for development and tests.
//!
//! Accounts live in memory with Argon2id password hashes. Emails that the
//! hosted provider would send are recorded in an outbox instead, so a local
//! operator (or a test) can read the sign-in code back.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use moka::future::Cache;
use rand::Rng;
use rand::distributions::Alphanumeric;
use tokio::sync::Mutex;
use tracing::{debug, info};

use tender_core::config::auth::AuthConfig;
use tender_core::error::AppError;

use super::IdentityProvider;
use crate::identity::{Identity, SignInMethod};
use crate::password::PasswordHasher;

const UID_LENGTH: usize = 28;
const CODE_LENGTH: usize = 32;
const MAX_FAILED_ATTEMPTS: u32 = 5;
const MIN_PROVIDER_PASSWORD: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    email: String,
    password_hash: Option<String>,
}

/// What kind of email the provider would have sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentEmailKind {
    /// Passwordless sign-in link.
    SignInLink,
    /// Password reset link.
    PasswordReset,
}

/// An email recorded in the outbox.
#[derive(Debug, Clone)]
pub struct SentEmail {
    /// Recipient.
    pub email: String,
    /// Email type.
    pub kind: SentEmailKind,
    /// One-time code carried by the link.
    pub code: String,
    /// Where the link returns to, for sign-in links.
    pub continue_url: Option<String>,
    /// When it was "sent".
    pub sent_at: DateTime<Utc>,
}

impl SentEmail {
    /// The full link as the operator would receive it.
    pub fn link(&self) -> String {
        match &self.continue_url {
            Some(url) => format!("{url}?oobCode={}&mode=signIn", self.code),
            None => format!("?oobCode={}&mode=resetPassword", self.code),
        }
    }
}

/// In-memory identity provider.
#[derive(Debug)]
pub struct MemoryIdentityProvider {
    accounts: DashMap<String, Account>,
    federated_tokens: DashMap<String, Identity>,
    link_codes: Cache<String, String>,
    failed_attempts: DashMap<String, u32>,
    outbox: Mutex<Vec<SentEmail>>,
    hasher: PasswordHasher,
}

impl MemoryIdentityProvider {
    /// Create a provider whose sign-in links expire after `link_ttl`.
    pub fn new(link_ttl: Duration) -> Self {
        Self {
            accounts: DashMap::new(),
            federated_tokens: DashMap::new(),
            link_codes: Cache::builder().time_to_live(link_ttl).build(),
            failed_attempts: DashMap::new(),
            outbox: Mutex::new(Vec::new()),
            hasher: PasswordHasher::new(),
        }
    }

    /// Create a provider from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(Duration::from_secs(config.email_link_ttl_minutes * 60))
    }

    /// Register a Google ID token that will resolve to `email`.
    pub fn register_federated_token(&self, id_token: &str, email: &str) {
        self.federated_tokens.insert(
            id_token.to_string(),
            Identity {
                uid: random_string(UID_LENGTH),
                email: email.to_string(),
                method: SignInMethod::Federated,
                display_name: None,
            },
        );
    }

    /// All emails sent so far.
    pub async fn sent_emails(&self) -> Vec<SentEmail> {
        self.outbox.lock().await.clone()
    }

    /// The most recent email sent to `email`.
    pub async fn last_email_to(&self, email: &str) -> Option<SentEmail> {
        let key = normalize(email);
        self.outbox
            .lock()
            .await
            .iter()
            .rev()
            .find(|sent| sent.email == key)
            .cloned()
    }

    async fn record(&self, email: &str, kind: SentEmailKind, continue_url: Option<&str>) -> String {
        let code = random_string(CODE_LENGTH);
        self.outbox.lock().await.push(SentEmail {
            email: email.to_string(),
            kind,
            code: code.clone(),
            continue_url: continue_url.map(str::to_string),
            sent_at: Utc::now(),
        });
        code
    }

    fn register_failure(&self, email: &str) {
        *self.failed_attempts.entry(email.to_string()).or_insert(0) += 1;
    }

    fn is_throttled(&self, email: &str) -> bool {
        self.failed_attempts
            .get(email)
            .is_some_and(|count| *count >= MAX_FAILED_ATTEMPTS)
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

fn invalid_credentials() -> AppError {
    AppError::authentication("Invalid email or password. Please try again.")
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, AppError> {
        let key = normalize(email);
        if self.is_throttled(&key) {
            return Err(AppError::rate_limit(
                "Too many unsuccessful login attempts. Please try again later.",
            ));
        }

        let account = self
            .accounts
            .get(&key)
            .map(|entry| entry.value().clone());
        let Some(account) = account else {
            self.register_failure(&key);
            return Err(invalid_credentials());
        };
        let Some(hash) = account.password_hash.as_deref() else {
            self.register_failure(&key);
            return Err(invalid_credentials());
        };

        if !self.hasher.verify_password(password, hash)? {
            self.register_failure(&key);
            return Err(invalid_credentials());
        }

        self.failed_attempts.remove(&key);
        Ok(Identity {
            uid: account.uid,
            email: account.email,
            method: SignInMethod::Password,
            display_name: None,
        })
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        if password.chars().count() < MIN_PROVIDER_PASSWORD {
            return Err(AppError::validation(
                "Password is too weak. Please use at least 6 characters.",
            ));
        }
        let key = normalize(email);
        let password_hash = self.hasher.hash_password(password)?;

        let account = match self.accounts.entry(key.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(
                    "This email is already registered. Please sign in instead.",
                ));
            }
            Entry::Vacant(slot) => slot
                .insert(Account {
                    uid: random_string(UID_LENGTH),
                    email: key,
                    password_hash: Some(password_hash),
                })
                .clone(),
        };
        info!(uid = %account.uid, "Created in-memory account");

        Ok(Identity {
            uid: account.uid,
            email: account.email,
            method: SignInMethod::Password,
            display_name: None,
        })
    }

    async fn sign_in_federated(
        &self,
        id_token: &str,
        _request_uri: &str,
    ) -> Result<Identity, AppError> {
        self.federated_tokens
            .get(id_token)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::authentication("Authentication failed. Please try again."))
    }

    async fn send_sign_in_link(&self, email: &str, continue_url: &str) -> Result<(), AppError> {
        let key = normalize(email);
        let code = self
            .record(&key, SentEmailKind::SignInLink, Some(continue_url))
            .await;
        self.link_codes.insert(code, key).await;
        debug!(continue_url, "Recorded sign-in link");
        Ok(())
    }

    async fn complete_link_sign_in(
        &self,
        email: &str,
        oob_code: &str,
    ) -> Result<Identity, AppError> {
        let expired = || {
            AppError::authentication(
                "Failed to sign in with email link. The link may be invalid or expired.",
            )
        };
        let key = normalize(email);
        let addressed_to = self.link_codes.remove(oob_code).await.ok_or_else(expired)?;
        if addressed_to != key {
            return Err(expired());
        }

        let account = self
            .accounts
            .entry(key.clone())
            .or_insert_with(|| Account {
                uid: random_string(UID_LENGTH),
                email: key,
                password_hash: None,
            })
            .clone();

        Ok(Identity {
            uid: account.uid,
            email: account.email,
            method: SignInMethod::EmailLink,
            display_name: None,
        })
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AppError> {
        let key = normalize(email);
        if !self.accounts.contains_key(&key) {
            return Err(AppError::not_found(
                "No account exists with this email address.",
            ));
        }
        self.record(&key, SentEmailKind::PasswordReset, None).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tender_core::ErrorKind;

    const EMAIL: &str = "radio@ritz-carltonyachtcollection.com";

    fn provider() -> MemoryIdentityProvider {
        MemoryIdentityProvider::new(Duration::from_secs(600))
    }

    #[tokio::test]
    async fn test_create_then_sign_in() {
        let p = provider();
        let created = p.create_account(EMAIL, "anchor").await.unwrap();
        let signed_in = p.sign_in_with_password("Radio@Ritz-CarltonYachtCollection.com", "anchor").await.unwrap();
        assert_eq!(created.uid, signed_in.uid);
        assert_eq!(signed_in.method, SignInMethod::Password);

        let err = p.create_account(EMAIL, "another").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_wrong_password_and_throttle() {
        let p = provider();
        p.create_account(EMAIL, "anchor").await.unwrap();
        for _ in 0..MAX_FAILED_ATTEMPTS {
            let err = p.sign_in_with_password(EMAIL, "wrong!").await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authentication);
        }
        let err = p.sign_in_with_password(EMAIL, "anchor").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::RateLimit);
    }

    #[tokio::test]
    async fn test_email_link_round_trip() {
        let p = provider();
        p.send_sign_in_link(EMAIL, "http://localhost:8080/email-link-signin/verify")
            .await
            .unwrap();
        let sent = p.last_email_to(EMAIL).await.unwrap();
        assert_eq!(sent.kind, SentEmailKind::SignInLink);
        assert!(sent.link().starts_with("http://localhost:8080/email-link-signin/verify?oobCode="));

        // Wrong address does not consume a different user's link.
        assert!(p.complete_link_sign_in("other@ritz-carltonyachtcollection.com", "nope").await.is_err());

        let identity = p.complete_link_sign_in(EMAIL, &sent.code).await.unwrap();
        assert_eq!(identity.method, SignInMethod::EmailLink);

        // Codes are single use.
        assert!(p.complete_link_sign_in(EMAIL, &sent.code).await.is_err());
    }

    #[tokio::test]
    async fn test_password_reset_requires_account() {
        let p = provider();
        assert_eq!(
            p.send_password_reset(EMAIL).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        p.create_account(EMAIL, "anchor").await.unwrap();
        p.send_password_reset(EMAIL).await.unwrap();
        assert_eq!(
            p.last_email_to(EMAIL).await.unwrap().kind,
            SentEmailKind::PasswordReset
        );
    }

    #[tokio::test]
    async fn test_federated_tokens() {
        let p = provider();
        p.register_federated_token("tok-1", "evrimatenderrcyc@gmail.com");
        let identity = p.sign_in_federated("tok-1", "http://localhost").await.unwrap();
        assert_eq!(identity.email, "evrimatenderrcyc@gmail.com");
        assert_eq!(identity.method, SignInMethod::Federated);
        assert!(p.sign_in_federated("tok-2", "http://localhost").await.is_err());
    }
}
