//! Integration tests for composing, sending, and deleting notifications.

mod helpers;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;
use tokio::sync::mpsc;

use tender_realtime::message::OutboundMessage;

use helpers::{STAFF_EMAIL, TestApp};

fn departed_shipside() -> serde_json::Value {
    json!({
        "action": "DEPARTED",
        "direction": "SHIPSIDE",
        "tender": "Tender 1",
    })
}

async fn next_feed(rx: &mut mpsc::Receiver<OutboundMessage>) -> Vec<String> {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("Timed out waiting for the feed")
            .expect("Connection closed");
        if let OutboundMessage::NotificationFeed { notifications } = msg {
            return notifications.into_iter().map(|n| n.message).collect();
        }
    }
}

#[tokio::test]
async fn test_preview_composes_without_writing() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;

    let preview = app
        .request("POST", "/api/notifications/preview", Some(departed_shipside()), Some(&token))
        .await;
    assert_eq!(preview.status, StatusCode::OK);
    assert_eq!(preview.body["data"]["message"], "Tender 1 has departed Evrima.");

    let shoreside = app
        .request(
            "POST",
            "/api/notifications/preview",
            Some(json!({ "action": "ARRIVED", "direction": "SHORESIDE" })),
            Some(&token),
        )
        .await;
    assert_eq!(shoreside.body["data"]["message"], "A tender has arrived at the pier.");

    let incomplete = app
        .request(
            "POST",
            "/api/notifications/preview",
            Some(json!({ "action": "ARRIVED" })),
            Some(&token),
        )
        .await;
    assert_eq!(incomplete.body["data"]["message"], "");

    assert_eq!(app.store.notifications.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_send_requires_active_port_day() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;

    let response = app
        .request("POST", "/api/notifications", Some(departed_shipside()), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(
        response.body["message"],
        "No active port day. Create a port day before sending notifications."
    );
    assert_eq!(app.store.notifications.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_send_and_list() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;
    let port_day_id = app.create_port_day(&token, "Gibraltar", "+2").await;

    let sent = app
        .request("POST", "/api/notifications", Some(departed_shipside()), Some(&token))
        .await;
    assert_eq!(sent.status, StatusCode::CREATED);
    assert_eq!(sent.body["data"]["message"], "Tender 1 has departed Evrima.");
    assert_eq!(sent.body["data"]["action"], "DEPARTED");
    assert_eq!(sent.body["data"]["portDayId"], port_day_id);
    assert!(sent.body["data"]["timestampSort"].as_str().unwrap().ends_with("+02:00"));
    assert_eq!(sent.body["toast"]["message"], "Notification sent.");

    let custom = app
        .request(
            "POST",
            "/api/notifications",
            Some(json!({
                "action": "ARRIVED",
                "direction": "SHORESIDE",
                "isCustom": true,
                "customText": "Last tender leaves at 18:30.",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(custom.status, StatusCode::CREATED);
    assert_eq!(custom.body["data"]["message"], "Last tender leaves at 18:30.");
    assert!(custom.body["data"]["action"].is_null());

    let list = app.request("GET", "/api/notifications", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::OK);
    let messages: Vec<&str> = list.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages.len(), 2);
    assert!(messages.contains(&"Last tender leaves at 18:30."));

    let limited = app
        .request("GET", "/api/notifications?limit=1", None, Some(&token))
        .await;
    assert_eq!(limited.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_message_is_rejected() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;
    app.create_port_day(&token, "Gibraltar", "0").await;

    let response = app
        .request(
            "POST",
            "/api/notifications",
            Some(json!({ "isCustom": true, "customText": "   " })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(app.store.notifications.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_second_send_while_busy_is_rejected() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;
    app.create_port_day(&token, "Gibraltar", "0").await;
    let session = app.state.sessions.authenticate(&token).unwrap();

    let permit = app.state.notifications.guard().try_acquire(session.id).unwrap();
    let busy = app
        .request("POST", "/api/notifications", Some(departed_shipside()), Some(&token))
        .await;
    assert_eq!(busy.status, StatusCode::CONFLICT);
    assert_eq!(busy.error_code(), "BUSY");

    drop(permit);
    let sent = app
        .request("POST", "/api/notifications", Some(departed_shipside()), Some(&token))
        .await;
    assert_eq!(sent.status, StatusCode::CREATED);
    assert_eq!(app.store.notifications.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_notification() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;
    app.create_port_day(&token, "Gibraltar", "0").await;
    let sent = app
        .request("POST", "/api/notifications", Some(departed_shipside()), Some(&token))
        .await;
    let id = sent.body["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/notifications/{id}");

    let deleted = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["toast"]["message"], "Notification deleted.");
    assert_eq!(app.store.notifications.count().await.unwrap(), 0);

    let again = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_live_feed_follows_sends() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;
    app.create_port_day(&token, "Gibraltar", "0").await;
    let session = app.state.sessions.authenticate(&token).unwrap();

    let (handle, mut rx) = app
        .state
        .realtime
        .connections
        .register(session.id, STAFF_EMAIL.to_string());
    app.state
        .realtime
        .handle_inbound(handle.id, r#"{"type":"subscribe","channel":"notifications"}"#)
        .await;
    assert!(next_feed(&mut rx).await.is_empty());

    app.request("POST", "/api/notifications", Some(departed_shipside()), Some(&token))
        .await;
    assert_eq!(next_feed(&mut rx).await, vec!["Tender 1 has departed Evrima."]);
}

#[tokio::test]
async fn test_sign_out_closes_live_connections() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;
    let session = app.state.sessions.authenticate(&token).unwrap();
    let (_handle, mut rx) = app
        .state
        .realtime
        .connections
        .register(session.id, STAFF_EMAIL.to_string());

    app.request("POST", "/api/auth/signout", None, Some(&token)).await;

    let terminal = loop {
        let msg = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("Timed out waiting for termination")
            .expect("Connection closed");
        if msg.is_terminal() {
            break msg;
        }
    };
    assert!(matches!(
        terminal,
        OutboundMessage::SessionTerminated { session_id, .. } if session_id == session.id
    ));
}

#[tokio::test]
async fn test_malformed_requests_use_error_envelope() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;
    app.create_port_day(&token, "Gibraltar", "0").await;

    let unknown_action = app
        .request(
            "POST",
            "/api/notifications",
            Some(json!({ "action": "DOCKED", "direction": "SHIPSIDE" })),
            Some(&token),
        )
        .await;
    assert_eq!(unknown_action.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(unknown_action.error_code(), "VALIDATION_ERROR");
    assert!(unknown_action.body["message"].is_string());

    let unknown_direction = app
        .request(
            "POST",
            "/api/notifications/preview",
            Some(json!({ "action": "ARRIVED", "direction": "PORTSIDE" })),
            Some(&token),
        )
        .await;
    assert_eq!(unknown_direction.error_code(), "VALIDATION_ERROR");

    let bad_id = app
        .request("DELETE", "/api/notifications/not-a-uuid", None, Some(&token))
        .await;
    assert_eq!(bad_id.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(bad_id.error_code(), "VALIDATION_ERROR");

    let bad_limit = app
        .request("GET", "/api/notifications?limit=many", None, Some(&token))
        .await;
    assert_eq!(bad_limit.error_code(), "VALIDATION_ERROR");

    assert_eq!(app.store.notifications.count().await.unwrap(), 0);
}
