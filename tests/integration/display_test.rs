//! Integration tests for the TV display image.

mod helpers;

use axum::http::StatusCode;

use tender_core::config::AppConfig;

use helpers::TestApp;

// PNG signature and the start of an IHDR chunk.
const PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
];

#[tokio::test]
async fn test_upload_replace_delete() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;

    let empty = app.request("GET", "/api/display/tv", None, Some(&token)).await;
    assert_eq!(empty.status, StatusCode::OK);
    assert!(empty.body["data"].is_null());

    let uploaded = app
        .send("PUT", "/api/display/tv", PNG.to_vec(), "image/png", Some(&token))
        .await;
    assert_eq!(uploaded.status, StatusCode::OK);
    assert!(
        uploaded.body["data"]["imageData"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,")
    );
    assert_eq!(uploaded.body["toast"]["message"], "Image uploaded successfully!");

    let current = app.request("GET", "/api/display/tv", None, Some(&token)).await;
    assert_eq!(current.body["data"]["id"], "tvDisplay");
    assert_eq!(current.body["data"]["imageData"], uploaded.body["data"]["imageData"]);

    let deleted = app.request("DELETE", "/api/display/tv", None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["toast"]["message"], "Image deleted successfully!");

    let cleared = app.request("GET", "/api/display/tv", None, Some(&token)).await;
    assert!(cleared.body["data"]["imageData"].is_null());

    let again = app.request("DELETE", "/api/display/tv", None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.body["message"], "No image to delete");
}

#[tokio::test]
async fn test_rejects_bad_uploads() {
    let mut config = AppConfig::default();
    config.console.max_display_image_bytes = 1024;
    let app = TestApp::with_config(config).await;
    let token = app.sign_in_operator().await;

    let nothing = app
        .send("PUT", "/api/display/tv", Vec::new(), "image/png", Some(&token))
        .await;
    assert_eq!(nothing.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(nothing.body["message"], "Please select an image first");

    let mut oversized = PNG.to_vec();
    oversized.resize(2048, 0);
    let too_big = app
        .send("PUT", "/api/display/tv", oversized, "image/png", Some(&token))
        .await;
    assert_eq!(too_big.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(too_big.body["message"], "Image must be less than 1KB");

    let text = app
        .send("PUT", "/api/display/tv", b"not an image".to_vec(), "text/plain", Some(&token))
        .await;
    assert_eq!(text.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(text.body["message"], "The selected file is not a supported image");

    let stored = app.request("GET", "/api/display/tv", None, Some(&token)).await;
    assert!(stored.body["data"].is_null());
}

#[tokio::test]
async fn test_display_requires_session() {
    let app = TestApp::new().await;
    let response = app
        .send("PUT", "/api/display/tv", PNG.to_vec(), "image/png", None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_error_toasts_use_configured_duration() {
    let mut config = AppConfig::default();
    config.console.toast_duration_ms = 1500;
    let app = TestApp::with_config(config).await;
    let token = app.sign_in_operator().await;

    let missing = app.request("DELETE", "/api/display/tv", None, Some(&token)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.error_code(), "NOT_FOUND");
    assert_eq!(missing.body["toast"]["kind"], "error");
    assert_eq!(missing.body["toast"]["durationMs"], 1500);
}
