//! # Tests Module
//!
//! Integration tests for the tweetwall HTTP surface plus unit tests for
//! the configuration helpers. The transformation, authentication and
//! client internals carry their own unit tests next to the code.
//!
//! The tweets-endpoint tests never talk to the real Twitter API: the
//! invalid-cursor case is rejected before any network I/O, and the
//! failure-envelope case points the client at an unroutable local
//! endpoint so the token exchange fails immediately.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::{
    config::{get_server_port, TwitterConfig},
    handlers::{handle_health, handle_root, handle_tweets},
    twitter::TwitterApi,
};

/// Builds a config that points at a local port nothing listens on, so any
/// request the client does make fails fast instead of leaving the test
/// machine.
fn offline_config() -> TwitterConfig {
    TwitterConfig {
        consumer_key: "test-key".to_string(),
        consumer_secret: "test-secret".to_string(),
        base_url: "http://127.0.0.1:9/".to_string(),
        default_hashtag: "custserv".to_string(),
        default_min_retweets: 1,
    }
}

/// Creates a test application instance with all routes configured.
///
/// This helper sets up a minimal Axum router with the same routes as the
/// main application, but without middleware layers that might interfere
/// with testing.
fn create_test_app() -> Router {
    let api = Arc::new(TwitterApi::new(offline_config()).unwrap());
    Router::new()
        .route("/", get(handle_root))
        .route("/api/v1/tweets", get(handle_tweets))
        .route("/health", get(handle_health))
        .with_state(api)
}

/// Tests the root endpoint handler function directly.
#[tokio::test]
async fn test_handle_root() {
    let response = handle_root().await;
    assert!(response.contains("tweetwall"));
}

/// Tests the health endpoint handler function directly.
#[tokio::test]
async fn test_handle_health() {
    let response = handle_health().await;
    let Json(json_response): Json<Value> = response;

    assert_eq!(json_response["status"], "healthy");
    assert_eq!(json_response["service"], "tweetwall");
}

/// Integration test for the health endpoint (GET /health).
#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/health")
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json_response: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json_response["status"], "healthy");
    assert_eq!(json_response["service"], "tweetwall");
}

/// Integration test for the root endpoint (GET /).
#[tokio::test]
async fn test_root_endpoint() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/")
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

/// A malformed pagination cursor must be rejected with a 400 failure
/// envelope before any upstream request is attempted.
#[tokio::test]
async fn test_tweets_endpoint_invalid_cursor() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/api/v1/tweets?max_id=not-a-number")
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json_response: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json_response["response_code"], 400);
    assert_eq!(json_response["status"], "failure");
    assert_eq!(json_response["message"], "Invalid max_id parameter");
    assert!(json_response.get("result").is_none());
}

/// When the token exchange cannot complete, the endpoint responds with the
/// generic failure envelope and no partial result.
#[tokio::test]
async fn test_tweets_endpoint_maps_core_failure_to_envelope() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/api/v1/tweets?count=5")
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        response
            .headers()
            .get("cache-control")
            .and_then(|v| v.to_str().ok()),
        Some("no-cache, no-store, must-revalidate")
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json_response: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json_response["response_code"], 502);
    assert_eq!(json_response["status"], "failure");
    assert_eq!(json_response["message"], "Method failed");
    assert!(json_response.get("result").is_none());
}

/// Unit test for the get_server_port function.
///
/// Verifies the default port (3000) when PORT is not set and a custom
/// port when it is.
#[test]
fn test_get_server_port() {
    // Test default port
    std::env::remove_var("PORT");
    let port = get_server_port();
    assert_eq!(port, 3000);

    // Test custom port
    std::env::set_var("PORT", "8080");
    let port = get_server_port();
    assert_eq!(port, 8080);

    // Clean up
    std::env::remove_var("PORT");
}

/// Unit test for configuration loading from the environment, covering
/// both the missing-credential failure and the defaulted optional values.
#[test]
fn test_twitter_config_from_env() {
    std::env::remove_var("TWITTER_CONSUMER_KEY");
    std::env::remove_var("TWITTER_CONSUMER_SECRET");
    assert!(TwitterConfig::from_env().is_err());

    std::env::set_var("TWITTER_CONSUMER_KEY", "test-key");
    std::env::set_var("TWITTER_CONSUMER_SECRET", "test-secret");
    std::env::remove_var("TWEETWALL_HASHTAG");
    std::env::remove_var("TWEETWALL_MIN_RETWEETS");
    std::env::remove_var("TWITTER_API_BASE_URL");

    let config = TwitterConfig::from_env().unwrap();
    assert_eq!(config.consumer_key, "test-key");
    assert_eq!(config.consumer_secret, "test-secret");
    assert_eq!(config.base_url, "https://api.twitter.com/");
    assert_eq!(config.default_hashtag, "custserv");
    assert_eq!(config.default_min_retweets, 1);

    // Clean up
    std::env::remove_var("TWITTER_CONSUMER_KEY");
    std::env::remove_var("TWITTER_CONSUMER_SECRET");
}
