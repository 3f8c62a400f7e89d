//! Integration tests for the feedback analytics endpoints.

mod helpers;

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use tender_core::types::FeedbackId;
use tender_entity::feedback::FeedbackRecord;

use helpers::TestApp;

async fn seed(app: &TestApp, website: Value, tender: Value, comment: &str, day: u32, hour: u32) {
    app.store
        .feedback
        .insert(&FeedbackRecord {
            id: FeedbackId::new(),
            website_rating: Some(website),
            tender_rating: Some(tender),
            comments: Some(comment.to_string()),
            timestamp: Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).single(),
        })
        .await
        .unwrap();
}

async fn seeded_app() -> TestApp {
    let app = TestApp::new().await;
    seed(&app, json!(5), json!(4), "Lovely crew", 16, 9).await;
    seed(&app, json!(3), json!(2), "Long wait at the pier", 17, 10).await;
    seed(&app, json!("n/a"), json!(5), "", 17, 11).await;
    seed(&app, json!(7), json!(5), "Smooth ride", 17, 12).await;
    app
}

#[tokio::test]
async fn test_summary() {
    let app = seeded_app().await;
    let token = app.sign_in_operator().await;

    let response = app.request("GET", "/api/feedback/summary", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["totalRecords"], 4);
    assert_eq!(data["website"]["count"], 2);
    assert_eq!(data["website"]["average"], 4.0);
    assert_eq!(data["tender"]["count"], 4);
    assert_eq!(data["tender"]["distribution"], json!([0, 1, 0, 1, 2]));
    assert_eq!(data["averageChart"]["datasets"][0]["data"], json!([4.0, 4.0]));
    assert_eq!(data["commentDates"], json!(["2026-10-17", "2026-10-16"]));

    let comments: Vec<&str> = data["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["comment"].as_str().unwrap())
        .collect();
    assert_eq!(comments, vec!["Smooth ride", "Long wait at the pier", "Lovely crew"]);
}

#[tokio::test]
async fn test_comments_for_day() {
    let app = seeded_app().await;
    let token = app.sign_in_operator().await;

    let day = app
        .request("GET", "/api/feedback/comments?date=2026-10-17", None, Some(&token))
        .await;
    assert_eq!(day.status, StatusCode::OK);
    assert_eq!(day.body["data"].as_array().unwrap().len(), 2);
    assert_eq!(day.body["data"][0]["date"], "2026-10-17");

    let empty = app
        .request("GET", "/api/feedback/comments?date=2026-01-01", None, Some(&token))
        .await;
    assert!(empty.body["data"].as_array().unwrap().is_empty());

    let bad = app
        .request("GET", "/api/feedback/comments?date=17/10/2026", None, Some(&token))
        .await;
    assert_eq!(bad.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_empty_collection() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;

    let response = app.request("GET", "/api/feedback/summary", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["totalRecords"], 0);
    assert_eq!(response.body["data"]["website"]["average"], 0.0);
    assert!(response.body["data"]["comments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_analytics_page() {
    let app = seeded_app().await;

    let signed_out = app.get_with_cookie("/analytics", None).await;
    assert_eq!(signed_out.status, StatusCode::SEE_OTHER);

    let token = app.sign_in_operator().await;
    let page = app
        .get_with_cookie("/analytics", Some(&format!("tender_session={token}")))
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["page"], "analytics");
    assert_eq!(page.body["summary"]["stackedChart"]["labels"], json!(["Website", "Tender Service"]));
    assert_eq!(page.body["summary"]["groupedChart"]["datasets"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_comments_without_date_is_validation_error() {
    let app = TestApp::new().await;
    let token = app.sign_in_operator().await;
    let response = app
        .request("GET", "/api/feedback/comments", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}
