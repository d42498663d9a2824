mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use std::sync::Arc;

use common::{DownStore, SequenceGenerator};

#[tokio::test]
async fn test_redirect_success() {
    let (state, store) = common::create_test_state();
    common::insert_link(&store, "aB3xZ9", "https://openai.com", None).await;

    let server = common::create_test_server(state);

    let response = server.get("/aB3xZ9").await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://openai.com");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _store) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.get("/zzzzzz").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_expired_link_looks_missing() {
    let (state, store) = common::create_test_state();
    common::insert_link(
        &store,
        "old001",
        "https://example.com",
        Some(Utc::now() - Duration::hours(1)),
    )
    .await;

    let server = common::create_test_server(state);

    let expired = server.get("/old001").await;
    let missing = server.get("/none01").await;

    expired.assert_status_not_found();
    missing.assert_status_not_found();
    assert_eq!(
        expired.json::<serde_json::Value>()["error"]["message"],
        missing.json::<serde_json::Value>()["error"]["message"]
    );
}

#[tokio::test]
async fn test_redirect_malformed_code() {
    let (state, _store) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.get("/bad-code!").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_is_repeatable() {
    let (state, store) = common::create_test_state();
    common::insert_link(&store, "rep001", "https://example.com/a", None).await;

    let server = common::create_test_server(state);

    for _ in 0..3 {
        let response = server.get("/rep001").await;
        response.assert_status(StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.header("location"), "https://example.com/a");
    }

    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_redirect_store_down() {
    let state = common::create_state_with(
        Arc::new(DownStore),
        Arc::new(SequenceGenerator::new(&["abc123"])),
    );
    let server = common::create_test_server(state);

    let response = server.get("/abc123").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}
