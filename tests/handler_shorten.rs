mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;

use common::{ConflictStore, DownStore, SequenceGenerator};
use snaplink::infrastructure::persistence::InMemoryLinkStore;

#[tokio::test]
async fn test_shorten_bare_domain_success() {
    let store = Arc::new(InMemoryLinkStore::new());
    let state = common::create_state_with(
        store.clone(),
        Arc::new(SequenceGenerator::new(&["aB3xZ9"])),
    );
    let server = common::create_test_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "openai.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["short_code"], "aB3xZ9");
    assert_eq!(json["short_url"], "https://s.example.com/aB3xZ9");
    assert_eq!(json["original_url"], "https://openai.com");
    assert!(json["expires_at"].is_null());
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_shorten_random_code_shape() {
    let (state, _store) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/path?q=1" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    let code = json["short_code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(json["original_url"], "https://example.com/path?q=1");
}

#[tokio::test]
async fn test_shorten_with_expiry() {
    let (state, _store) = common::create_test_state();
    let server = common::create_test_server(state);

    let expires_at = (Utc::now() + Duration::days(1)).to_rfc3339();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com", "expires_at": expires_at }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert!(json["expires_at"].is_string());
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let (state, store) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "not a url" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let (state, store) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.post("/api/shorten").json(&json!({ "url": "" })).await;

    response.assert_status_bad_request();
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_shorten_past_expiry() {
    let (state, store) = common::create_test_state();
    let server = common::create_test_server(state);

    let expires_at = (Utc::now() - Duration::hours(1)).to_rfc3339();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com", "expires_at": expires_at }))
        .await;

    response.assert_status_bad_request();
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_shorten_exhausted_is_retryable() {
    let state = common::create_state_with(
        Arc::new(ConflictStore),
        Arc::new(SequenceGenerator::new(&["taken1", "taken2"])),
    );
    let server = common::create_test_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.header("retry-after"), "1");

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "service_unavailable");
    assert_eq!(json["error"]["details"]["attempts"], 10);
}

#[tokio::test]
async fn test_shorten_store_down() {
    let state = common::create_state_with(
        Arc::new(DownStore),
        Arc::new(SequenceGenerator::new(&["abc123"])),
    );
    let server = common::create_test_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_shorten_skips_colliding_code() {
    let store = Arc::new(InMemoryLinkStore::new());
    common::insert_link(&store, "dup001", "https://first.com", None).await;

    let state = common::create_state_with(
        store.clone(),
        Arc::new(SequenceGenerator::new(&["dup001", "new002"])),
    );
    let server = common::create_test_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "second.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["short_code"], "new002");
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_shorten_never_hands_out_route_name() {
    let store = Arc::new(InMemoryLinkStore::new());
    let state = common::create_state_with(
        store.clone(),
        Arc::new(SequenceGenerator::new(&["health", "abc123"])),
    );
    let server = common::create_test_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["short_code"], "abc123");
    assert_eq!(store.len(), 1);

    server.get("/health").await.assert_status_ok();
}
