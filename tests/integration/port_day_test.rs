//! Integration tests for the port day lifecycle.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{TestApp, port_day_body};

#[tokio::test]
async fn test_create_and_fetch_active() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;

    let none = app.request("GET", "/api/port-days/active", None, Some(&token)).await;
    assert_eq!(none.status, StatusCode::OK);
    assert!(none.body["data"]["portDay"].is_null());

    let created = app
        .request(
            "POST",
            "/api/port-days",
            Some(port_day_body("Gibraltar", "5.5", "PORT")),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["name"], "Gibraltar");
    assert_eq!(created.body["data"]["isActive"], true);
    assert_eq!(created.body["data"]["timezone"], "5.5");
    assert_eq!(created.body["data"]["lastTenderTime"], "18:30");
    assert_eq!(created.body["toast"]["message"], "Port day created.");

    let active = app.request("GET", "/api/port-days/active", None, Some(&token)).await;
    assert_eq!(active.body["data"]["portDay"]["id"], created.body["data"]["id"]);
}

#[tokio::test]
async fn test_new_port_day_replaces_active() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;
    let first = app.create_port_day(&token, "Gibraltar", "1").await;
    let second = app.create_port_day(&token, "Malaga", "2").await;

    let active = app.request("GET", "/api/port-days/active", None, Some(&token)).await;
    assert_eq!(active.body["data"]["portDay"]["id"], second);

    let list = app.request("GET", "/api/port-days", None, Some(&token)).await;
    let days = list.body["data"].as_array().unwrap();
    assert_eq!(days.len(), 2);
    let old = days.iter().find(|d| d["id"] == first).unwrap();
    assert_eq!(old["isActive"], false);
    assert_eq!(days.iter().filter(|d| d["isActive"] == true).count(), 1);
}

#[tokio::test]
async fn test_create_requires_typed_confirmation() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;

    let response = app
        .request(
            "POST",
            "/api/port-days",
            Some(port_day_body("Gibraltar", "1", "port")),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.body["message"],
        "Port day creation cancelled. You must type PORT to confirm."
    );

    let list = app.request("GET", "/api/port-days", None, Some(&token)).await;
    assert!(list.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_validates_fields() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;

    for timezone in ["3.25", "15", "abc"] {
        let response = app
            .request(
                "POST",
                "/api/port-days",
                Some(port_day_body("Gibraltar", timezone, "PORT")),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY, "{timezone}");
    }

    let mut body = port_day_body("  ", "1", "PORT");
    let response = app
        .request("POST", "/api/port-days", Some(body.clone()), Some(&token))
        .await;
    assert_eq!(response.body["message"], "Port day name is required.");

    body["name"] = json!("Gibraltar");
    body["avgTime"] = json!(0);
    let response = app.request("POST", "/api/port-days", Some(body), Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_keeps_activation() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;
    let id = app.create_port_day(&token, "Gibraltar", "1").await;

    let mut body = port_day_body("Gibraltar North Mole", "-3", "");
    body["avgTime"] = json!(20);
    let updated = app
        .request("PUT", &format!("/api/port-days/{id}"), Some(body.clone()), Some(&token))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["name"], "Gibraltar North Mole");
    assert_eq!(updated.body["data"]["avgTime"], 20);
    assert_eq!(updated.body["data"]["timezone"], "-3");
    assert_eq!(updated.body["data"]["isActive"], true);

    let missing = app
        .request(
            "PUT",
            "/api/port-days/00000000-0000-0000-0000-000000000000",
            Some(body),
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_end_port_day() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;
    let id = app.create_port_day(&token, "Gibraltar", "0").await;
    let path = format!("/api/port-days/{id}");

    let ended = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(ended.status, StatusCode::OK);
    assert_eq!(ended.body["toast"]["message"], "Port day ended.");

    let active = app.request("GET", "/api/port-days/active", None, Some(&token)).await;
    assert!(active.body["data"]["portDay"].is_null());

    let again = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let send = app
        .request(
            "POST",
            "/api/notifications",
            Some(json!({ "action": "ARRIVED", "direction": "SHORESIDE" })),
            Some(&token),
        )
        .await;
    assert_eq!(send.status, StatusCode::PRECONDITION_FAILED);
}

#[tokio::test]
async fn test_operator_page_centers_on_pier() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;
    let cookie = format!("tender_session={token}");

    let before = app.get_with_cookie("/operator", Some(&cookie)).await;
    assert!(before.body["activePortDay"].is_null());
    assert_eq!(
        before.body["mapCenter"],
        json!(app.state.config.console.default_map_center)
    );

    app.create_port_day(&token, "Gibraltar", "1").await;
    let after = app.get_with_cookie("/operator", Some(&cookie)).await;
    assert_eq!(after.body["activePortDay"]["name"], "Gibraltar");
    assert_eq!(after.body["mapCenter"], json!([36.143, -5.353]));
    assert_eq!(after.body["actions"][0]["label"], "Arrived");
    assert_eq!(after.body["directions"][1]["value"], "SHIPSIDE");
}

#[tokio::test]
async fn test_malformed_port_day_requests_use_error_envelope() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;

    let mut body = port_day_body("Gibraltar", "1", "PORT");
    body["avgTime"] = json!("ten");
    let wrong_type = app.request("POST", "/api/port-days", Some(body), Some(&token)).await;
    assert_eq!(wrong_type.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(wrong_type.error_code(), "VALIDATION_ERROR");

    let bad_id = app
        .request(
            "PUT",
            "/api/port-days/42",
            Some(port_day_body("Gibraltar", "1", "")),
            Some(&token),
        )
        .await;
    assert_eq!(bad_id.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(bad_id.error_code(), "VALIDATION_ERROR");

    let end_bad_id = app.request("DELETE", "/api/port-days/42", None, Some(&token)).await;
    assert_eq!(end_bad_id.error_code(), "VALIDATION_ERROR");

    let list = app.request("GET", "/api/port-days", None, Some(&token)).await;
    assert!(list.body["data"].as_array().unwrap().is_empty());
}
