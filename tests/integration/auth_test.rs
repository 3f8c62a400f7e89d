//! Integration tests for the sign-in flows and the page session guard.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{GOOGLE_EMAIL, PASSWORD, STAFF_EMAIL, TestApp};

#[tokio::test]
async fn test_sign_up_then_sign_in() {
    let app = TestApp::new().await;
    app.sign_up(STAFF_EMAIL).await;

    let response = app
        .request(
            "POST",
            "/api/auth/signin",
            Some(json!({ "email": STAFF_EMAIL, "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["session"]["email"], STAFF_EMAIL);
    assert!(response.set_cookie().unwrap().starts_with("tender_session="));

    let token = response.token();
    let session = app.request("GET", "/api/auth/session", None, Some(&token)).await;
    assert_eq!(session.status, StatusCode::OK);
    assert_eq!(session.body["data"]["session"]["email"], STAFF_EMAIL);
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let app = TestApp::new().await;
    app.sign_up(STAFF_EMAIL).await;

    let response = app
        .request(
            "POST",
            "/api/auth/signin",
            Some(json!({ "email": STAFF_EMAIL, "password": "not-it" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body["message"],
        "Invalid email or password. Please try again."
    );
}

#[tokio::test]
async fn test_outside_domain_rejected() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "email": "someone@example.com",
                "password": PASSWORD,
                "confirmPassword": PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["message"],
        "Only @ritz-carltonyachtcollection.com email addresses are allowed."
    );
}

#[tokio::test]
async fn test_sign_up_password_rules() {
    let app = TestApp::new().await;
    let mismatch = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "email": STAFF_EMAIL,
                "password": PASSWORD,
                "confirmPassword": "something-else",
            })),
            None,
        )
        .await;
    assert_eq!(mismatch.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(mismatch.body["message"], "Passwords do not match.");

    app.sign_up(STAFF_EMAIL).await;
    let again = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({
                "email": STAFF_EMAIL,
                "password": PASSWORD,
                "confirmPassword": PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_federated_allow_list() {
    let app = TestApp::new().await;
    app.identity.register_federated_token("google-ok", GOOGLE_EMAIL);
    app.identity.register_federated_token("google-other", "guest@gmail.com");

    let allowed = app
        .request("POST", "/api/auth/federated", Some(json!({ "idToken": "google-ok" })), None)
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
    assert_eq!(allowed.body["data"]["session"]["email"], GOOGLE_EMAIL);

    let denied = app
        .request("POST", "/api/auth/federated", Some(json!({ "idToken": "google-other" })), None)
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(
        denied.body["message"],
        "This Google account is not authorized for access."
    );
    assert_eq!(app.state.sessions.active_sessions().len(), 1);
}

#[tokio::test]
async fn test_email_link_flow() {
    let app = TestApp::new().await;
    let sent = app
        .request("POST", "/api/auth/email-link", Some(json!({ "email": STAFF_EMAIL })), None)
        .await;
    assert_eq!(sent.status, StatusCode::OK);
    assert_eq!(
        sent.body["toast"]["message"],
        "Sign-in link sent successfully! Please check your email inbox (and spam folder)."
    );

    let email = app.identity.last_email_to(STAFF_EMAIL).await.unwrap();
    assert!(
        email
            .continue_url
            .as_deref()
            .unwrap()
            .ends_with("/email-link-signin/verify")
    );

    let path = format!(
        "/email-link-signin/verify?oobCode={}&mode=signIn&email={}",
        email.code, STAFF_EMAIL
    );
    let verified = app.get_with_cookie(&path, None).await;
    assert_eq!(verified.status, StatusCode::SEE_OTHER);
    assert_eq!(verified.location(), Some("/operator"));
    assert!(verified.set_cookie().unwrap().starts_with("tender_session="));

    // Codes are single use.
    let reused = app.get_with_cookie(&path, None).await;
    assert_eq!(reused.status, StatusCode::OK);
    assert!(reused.body["error"].is_string());
}

#[tokio::test]
async fn test_verify_page_asks_for_missing_email() {
    let app = TestApp::new().await;
    let response = app
        .get_with_cookie("/email-link-signin/verify?oobCode=abc&mode=signIn", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["needsEmail"], true);
    assert_eq!(response.body["oobCode"], "abc");

    let missing = app.get_with_cookie("/email-link-signin/verify", None).await;
    assert_eq!(missing.body["error"], "Invalid sign-in link.");
}

#[tokio::test]
async fn test_password_reset_requires_known_account() {
    let app = TestApp::new().await;
    let unknown = app
        .request("POST", "/api/auth/password-reset", Some(json!({ "email": STAFF_EMAIL })), None)
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    app.sign_up(STAFF_EMAIL).await;
    let known = app
        .request("POST", "/api/auth/password-reset", Some(json!({ "email": STAFF_EMAIL })), None)
        .await;
    assert_eq!(known.status, StatusCode::OK);
    assert_eq!(
        known.body["data"]["message"],
        "Password reset email sent. Please check your inbox."
    );
}

#[tokio::test]
async fn test_sign_out_ends_session() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;

    let response = app.request("POST", "/api/auth/signout", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.set_cookie().unwrap().contains("Max-Age=0"));

    let after = app.request("GET", "/api/auth/session", None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_pages_redirect() {
    let app = TestApp::new().await;

    let operator = app.get_with_cookie("/operator", None).await;
    assert_eq!(operator.status, StatusCode::SEE_OTHER);
    assert_eq!(operator.location(), Some("/signin?from=/operator"));

    let analytics = app.get_with_cookie("/analytics", None).await;
    assert_eq!(analytics.location(), Some("/signin?from=/analytics"));

    let root = app.get_with_cookie("/", None).await;
    assert_eq!(root.location(), Some("/signin?from=/operator"));

    let signin = app.get_with_cookie("/signin?from=/analytics", None).await;
    assert_eq!(signin.status, StatusCode::OK);
    assert_eq!(signin.body["from"], "/analytics");
    assert_eq!(signin.body["allowedEmailDomain"], "ritz-carltonyachtcollection.com");
}

#[tokio::test]
async fn test_signed_in_pages() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;
    let cookie = format!("tender_session={token}");

    let root = app.get_with_cookie("/", Some(&cookie)).await;
    assert_eq!(root.location(), Some("/operator"));

    let signin = app.get_with_cookie("/signin?from=//evil.example", Some(&cookie)).await;
    assert_eq!(signin.status, StatusCode::SEE_OTHER);
    assert_eq!(signin.location(), Some("/operator"));

    let operator = app.get_with_cookie("/operator", Some(&cookie)).await;
    assert_eq!(operator.status, StatusCode::OK);
    assert_eq!(operator.body["operator"], STAFF_EMAIL);
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let app = TestApp::new().await;
    let response = app.get_with_cookie("/nowhere", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Page not found");
}

#[tokio::test]
async fn test_api_requires_session() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/notifications", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHENTICATED");

    let garbage = app.request("GET", "/api/notifications", None, Some("not-a-token")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_needs_no_session() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], "memory");
    assert_eq!(response.body["data"]["wsConnections"], 0);
}
