//! HTTP route handlers for the tweetwall service.
//!
//! This module contains all the HTTP route handler functions that process
//! incoming requests and return appropriate responses. The tweets endpoint
//! wraps every outcome in the envelope the browser client expects:
//! `{ response_code, status, message, result }`.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Json,
};
use log::{error, info};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::twitter::{SearchQuery, TwitterApi, TwitterError};

/// Query parameters accepted by the tweets endpoint.
#[derive(Debug, Deserialize)]
pub struct TweetsParams {
    /// Pagination cursor from the previous page's
    /// `search_metadata.load_more_max_id`
    pub max_id: Option<String>,
    /// Number of tweets to fetch (defaults to 20)
    pub count: Option<u32>,
}

/// Builds the response headers shared by every tweets response: the feed
/// must never be served from an intermediary cache.
fn no_cache_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    headers
}

/// Handles GET requests to the `/api/v1/tweets` endpoint.
///
/// Fetches one page of tweets for the configured hashtag. Accepts two
/// optional query parameters:
///
/// - `max_id`: the cursor returned by the previous call, for "load more"
/// - `count`: the page size (defaults to 20)
///
/// # Success Response
///
/// ```json
/// {
///   "response_code": 200,
///   "status": "success",
///   "message": "Tweets fetched",
///   "result": { "statuses": [...], "search_metadata": {...} }
/// }
/// ```
///
/// # Failure Responses
///
/// A malformed `max_id` yields a 400; any core failure (authentication,
/// transport, upstream error) yields a 502 with a generic message. No
/// partial page is ever returned.
pub async fn handle_tweets(
    State(api): State<Arc<TwitterApi>>,
    Query(params): Query<TweetsParams>,
) -> (StatusCode, HeaderMap, Json<Value>) {
    let query = SearchQuery {
        hashtag: api.default_hashtag().to_string(),
        min_retweet_count: api.default_min_retweets(),
        max_id: params.max_id,
        count: params.count.filter(|c| *c > 0).unwrap_or(20),
    };

    match api.get_featured_tweets(query).await {
        Ok(page) => {
            info!("Tweets fetched: {} in page", page.statuses.len());
            (
                StatusCode::OK,
                no_cache_headers(),
                Json(json!({
                    "response_code": 200,
                    "status": "success",
                    "message": "Tweets fetched",
                    "result": page,
                })),
            )
        }
        Err(TwitterError::InvalidCursor(cursor)) => {
            error!("Rejected tweets request with invalid max_id '{}'", cursor);
            (
                StatusCode::BAD_REQUEST,
                no_cache_headers(),
                Json(json!({
                    "response_code": 400,
                    "status": "failure",
                    "message": "Invalid max_id parameter",
                })),
            )
        }
        Err(e) => {
            error!("Failed to fetch tweets: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                no_cache_headers(),
                Json(json!({
                    "response_code": 502,
                    "status": "failure",
                    "message": "Method failed",
                })),
            )
        }
    }
}

/// Handles GET requests to the `/health` endpoint.
///
/// This endpoint provides a health check for the service, returning the
/// current status and service name. It's commonly used by load balancers
/// and monitoring systems to verify that the service is running and
/// responsive.
///
/// # Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "tweetwall"
/// }
/// ```
pub async fn handle_health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "tweetwall"}))
}

/// Handles GET requests to the root `/` endpoint.
///
/// # Returns
///
/// A short banner identifying the service.
pub async fn handle_root() -> &'static str {
    info!("Root endpoint hit");
    "tweetwall is up - GET /api/v1/tweets for the feed"
}
