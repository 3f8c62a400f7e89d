//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use tender_api::{AppState, build_app};
use tender_auth::provider::MemoryIdentityProvider;
use tender_core::config::AppConfig;
use tender_database::DocumentStore;

/// Address inside the allowed staff domain.
pub const STAFF_EMAIL: &str = "radio@ritz-carltonyachtcollection.com";
/// The one Google account allowed in.
pub const GOOGLE_EMAIL: &str = "evrimatenderrcyc@gmail.com";
/// Password used for test accounts.
pub const PASSWORD: &str = "tender-pass";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for reaching services directly
    pub state: AppState,
    /// In-memory store behind the router
    pub store: DocumentStore,
    /// In-memory identity provider, for reading sent emails
    pub identity: Arc<MemoryIdentityProvider>,
}

impl TestApp {
    /// Create a test application over in-memory collaborators
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a test application with a tweaked configuration
    pub async fn with_config(mut config: AppConfig) -> Self {
        config.database.provider = "memory".to_string();
        config.auth.provider = "memory".to_string();
        config.realtime.ping_interval_seconds = 0;

        let store = DocumentStore::in_memory();
        let identity = Arc::new(MemoryIdentityProvider::new(Duration::from_secs(600)));
        let (router, state) = build_app(config, store.clone(), identity.clone());
        state.start_background().await;

        Self {
            router,
            state,
            store,
            identity,
        }
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body = body
            .map(|b| serde_json::to_vec(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.send(method, path, body, "application/json", token).await
    }

    /// Make a request with a raw body
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", content_type);
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        let req = req.body(Body::from(body)).expect("Failed to build request");
        self.dispatch(req).await
    }

    /// Make a GET request carrying only a cookie header
    pub async fn get_with_cookie(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        let mut req = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            req = req.header("Cookie", cookie);
        }
        let req = req.body(Body::empty()).expect("Failed to build request");
        self.dispatch(req).await
    }

    async fn dispatch(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 4 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Register a staff account and return its session token
    pub async fn sign_up(&self, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/signup",
                Some(json!({
                    "email": email,
                    "password": PASSWORD,
                    "confirmPassword": PASSWORD,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "Sign-up failed: {:?}", response.body);
        response.token()
    }

    /// Sign in the default staff operator
    pub async fn sign_in_operator(&self) -> String {
        self.sign_up(STAFF_EMAIL).await
    }

    /// Start a port day through the API and return its ID
    pub async fn create_port_day(&self, token: &str, name: &str, timezone: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/port-days",
                Some(port_day_body(name, timezone, "PORT")),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "Create failed: {:?}", response.body);
        response.body["data"]["id"]
            .as_str()
            .expect("No port day id")
            .to_string()
    }
}

/// Port day form values
pub fn port_day_body(name: &str, timezone: &str, confirmation: &str) -> Value {
    json!({
        "name": name,
        "pierLocation": { "lat": 36.143, "lng": -5.353 },
        "avgTime": 12,
        "lastTenderTime": "18:30",
        "timezone": timezone,
        "confirmation": confirmation,
    })
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The session token of a sign-in response
    pub fn token(&self) -> String {
        self.body["data"]["token"]
            .as_str()
            .expect("No token in sign-in response")
            .to_string()
    }

    /// The `Location` header of a redirect
    pub fn location(&self) -> Option<&str> {
        self.headers.get("location").and_then(|v| v.to_str().ok())
    }

    /// The `Set-Cookie` header
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers.get("set-cookie").and_then(|v| v.to_str().ok())
    }

    /// The error code of a failed request
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
