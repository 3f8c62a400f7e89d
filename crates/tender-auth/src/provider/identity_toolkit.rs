//! REST client for the hosted Identity Toolkit accounts API.
//!
//! Every operation is a `POST {base}/accounts:{operation}?key={api_key}` with a
//! JSON body. Failures come back as `{"error": {"message": "CODE : detail"}}`
//! and are mapped onto operator-facing messages here.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use tender_core::config::auth::AuthConfig;
use tender_core::error::{AppError, ErrorKind};

use super::IdentityProvider;
use crate::identity::{Identity, SignInMethod};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const GOOGLE_PROVIDER_ID: &str = "google.com";

/// Identity provider backed by the Identity Toolkit REST API.
#[derive(Debug, Clone)]
pub struct IdentityToolkitProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// The subset of an accounts response the console reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl IdentityToolkitProvider {
    /// Build a client from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.api_key is required for the identity_toolkit provider",
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build identity provider HTTP client",
                    e,
                )
            })?;
        Ok(Self {
            client,
            base_url: config.identity_toolkit_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, operation: &str) -> String {
        format!("{}/accounts:{}?key={}", self.base_url, operation, self.api_key)
    }

    async fn call<T: DeserializeOwned>(&self, operation: &str, body: Value) -> Result<T, AppError> {
        debug!(operation, "Calling identity provider");
        let response = self
            .client
            .post(self.endpoint(operation))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Could not reach the identity provider. Please try again.",
                    e,
                )
            })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Unexpected response from the identity provider.",
                    e,
                )
            });
        }

        let code = response
            .json::<ErrorEnvelope>()
            .await
            .map(|envelope| envelope.error.message)
            .unwrap_or_default();
        warn!(operation, status = status.as_u16(), code = %code, "Identity provider rejected request");
        Err(map_error_code(&code))
    }

    fn identity(account: AccountResponse, fallback_email: &str, method: SignInMethod) -> Identity {
        Identity {
            uid: account.local_id,
            email: account.email.unwrap_or_else(|| fallback_email.to_string()),
            method,
            display_name: account.display_name,
        }
    }
}

/// Map an Identity Toolkit error code onto an application error.
///
/// Codes may carry a detail suffix, e.g. `WEAK_PASSWORD : Password should be ...`.
pub(crate) fn map_error_code(raw: &str) -> AppError {
    let code = raw.split(':').next().unwrap_or_default().trim();
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "USER_DISABLED" => {
            AppError::authentication("Invalid email or password. Please try again.")
        }
        "EMAIL_EXISTS" => {
            AppError::conflict("This email is already registered. Please sign in instead.")
        }
        "WEAK_PASSWORD" => {
            AppError::validation("Password is too weak. Please use at least 6 characters.")
        }
        "INVALID_EMAIL" | "MISSING_EMAIL" => {
            AppError::validation("Please enter a valid email address.")
        }
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AppError::rate_limit(
            "Too many unsuccessful login attempts. Please try again later.",
        ),
        "INVALID_OOB_CODE" | "EXPIRED_OOB_CODE" => AppError::authentication(
            "Failed to sign in with email link. The link may be invalid or expired.",
        ),
        "INVALID_IDP_RESPONSE" | "INVALID_ID_TOKEN" => {
            AppError::authentication("Authentication failed. Please try again.")
        }
        "UNAUTHORIZED_DOMAIN" | "INVALID_CONTINUE_URI" => AppError::configuration(
            "The sign-in link return address is not authorized for this project.",
        ),
        _ => AppError::external_service("Authentication failed. Please try again."),
    }
}

#[async_trait]
impl IdentityProvider for IdentityToolkitProvider {
    fn name(&self) -> &'static str {
        "identity_toolkit"
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, AppError> {
        let account: AccountResponse = self
            .call(
                "signInWithPassword",
                json!({ "email": email, "password": password, "returnSecureToken": true }),
            )
            .await?;
        Ok(Self::identity(account, email, SignInMethod::Password))
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        let account: AccountResponse = self
            .call(
                "signUp",
                json!({ "email": email, "password": password, "returnSecureToken": true }),
            )
            .await?;
        Ok(Self::identity(account, email, SignInMethod::Password))
    }

    async fn sign_in_federated(
        &self,
        id_token: &str,
        request_uri: &str,
    ) -> Result<Identity, AppError> {
        let post_body = format!("id_token={id_token}&providerId={GOOGLE_PROVIDER_ID}");
        let account: AccountResponse = self
            .call(
                "signInWithIdp",
                json!({
                    "postBody": post_body,
                    "requestUri": request_uri,
                    "returnSecureToken": true,
                    "returnIdpCredential": true,
                }),
            )
            .await?;
        if account.email.is_none() {
            return Err(AppError::authentication(
                "Authentication failed. Please try again.",
            ));
        }
        Ok(Self::identity(account, "", SignInMethod::Federated))
    }

    async fn send_sign_in_link(&self, email: &str, continue_url: &str) -> Result<(), AppError> {
        let _: Value = self
            .call(
                "sendOobCode",
                json!({
                    "requestType": "EMAIL_SIGNIN",
                    "email": email,
                    "continueUrl": continue_url,
                    "canHandleCodeInApp": true,
                }),
            )
            .await?;
        Ok(())
    }

    async fn complete_link_sign_in(
        &self,
        email: &str,
        oob_code: &str,
    ) -> Result<Identity, AppError> {
        let account: AccountResponse = self
            .call(
                "signInWithEmailLink",
                json!({ "email": email, "oobCode": oob_code }),
            )
            .await?;
        Ok(Self::identity(account, email, SignInMethod::EmailLink))
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AppError> {
        let result: Result<Value, AppError> = self
            .call(
                "sendOobCode",
                json!({ "requestType": "PASSWORD_RESET", "email": email }),
            )
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if e.kind == ErrorKind::Authentication => Err(AppError::not_found(
                "No account exists with this email address.",
            )),
            Err(e) => Err(e),
        }
    }
}
