//! Authenticated search client for the Twitter REST API.
//!
//! [`TwitterApi`] owns the HTTP client, the application credentials and a
//! lazily-populated bearer-token cache. Its public entry point,
//! [`TwitterApi::get_featured_tweets`], validates the pagination cursor,
//! runs the authenticated search and hands the raw payload to the
//! transformer.

use std::sync::RwLock;
use std::time::Duration;

use log::{debug, info, warn};

use super::auth::fetch_bearer_token;
use super::error::TwitterError;
use super::transform::{transform, RawSearchResult, SearchResultPage};
use crate::config::TwitterConfig;

/// Timeout applied to both the token exchange and the search call so a
/// stalled upstream cannot block a page fetch indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Parameters of one search call.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// The hashtag to search for, without the leading `#`.
    pub hashtag: String,
    /// Tweets with fewer retweets than this are dropped after the fetch.
    pub min_retweet_count: i64,
    /// Exclusive upper bound on tweet IDs, as a decimal string. Absent on
    /// the first page.
    pub max_id: Option<String>,
    /// Number of tweets to request per page.
    pub count: u32,
}

impl SearchQuery {
    /// Creates a query for the given hashtag with the default retweet
    /// threshold (1) and page size (20) and no cursor.
    pub fn new(hashtag: impl Into<String>) -> Self {
        SearchQuery {
            hashtag: hashtag.into(),
            min_retweet_count: 1,
            max_id: None,
            count: 20,
        }
    }
}

/// Client for the Twitter REST API using application-only authentication.
///
/// The bearer token is fetched lazily on the first authenticated call and
/// cached for the lifetime of the instance. There is no expiry tracking:
/// a 401 caused by an upstream token invalidation surfaces as an API error
/// rather than triggering a re-authentication.
pub struct TwitterApi {
    http: reqwest::Client,
    config: TwitterConfig,
    // Unset until the first successful exchange, then reused indefinitely.
    // Concurrent callers may race to populate it; redundant fetches are
    // harmless and the last write wins.
    bearer_token: RwLock<Option<String>>,
}

/// Builds the path-and-query part of a search request.
///
/// The query is always `#hashtag -filter:retweets`: retweets are excluded
/// at the query level, independent of the retweet-count filter applied
/// after the fetch. `include_entities` is disabled because the
/// transformation works on the plain tweet text.
fn build_search_path(query: &SearchQuery) -> String {
    let q = format!("#{} -filter:retweets", query.hashtag);
    let mut path = format!(
        "1.1/search/tweets.json?include_entities=0&count={}&q={}",
        query.count,
        urlencoding::encode(&q)
    );
    if let Some(max_id) = &query.max_id {
        path.push_str(&format!("&max_id={}", max_id));
    }
    path
}

/// Checks that a cursor is a valid signed 64-bit decimal string before it
/// gets anywhere near a request URL.
fn validate_cursor(cursor: &str) -> Result<(), TwitterError> {
    cursor
        .parse::<i64>()
        .map(|_| ())
        .map_err(|_| TwitterError::InvalidCursor(cursor.to_string()))
}

impl TwitterApi {
    /// Creates a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `TwitterError::Api` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: TwitterConfig) -> Result<Self, TwitterError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(TwitterApi {
            http,
            config,
            bearer_token: RwLock::new(None),
        })
    }

    /// The configured default hashtag served by this instance.
    pub fn default_hashtag(&self) -> &str {
        &self.config.default_hashtag
    }

    /// The configured default minimum retweet count.
    pub fn default_min_retweets(&self) -> i64 {
        self.config.default_min_retweets
    }

    /// Returns the cached bearer token, performing the client-credentials
    /// exchange first if no token is cached yet.
    ///
    /// This is a lazy-initialization guard, not a per-request freshness
    /// check: once set, the token is reused for the lifetime of the
    /// instance.
    async fn ensure_token(&self) -> Result<String, TwitterError> {
        if let Some(token) = self
            .bearer_token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
        {
            return Ok(token);
        }

        debug!("No cached bearer token, performing client-credentials exchange");
        let token = fetch_bearer_token(&self.http, &self.config).await?;

        let mut cache = self.bearer_token.write().unwrap_or_else(|e| e.into_inner());
        *cache = Some(token.clone());
        Ok(token)
    }

    /// Issues an authenticated search request and decodes the raw payload.
    ///
    /// # Errors
    ///
    /// - `TwitterError::Auth` if no bearer token could be obtained
    /// - `TwitterError::Api` on transport failure, non-2xx status or a
    ///   malformed JSON body; none of these are retried
    pub async fn search(&self, query: &SearchQuery) -> Result<RawSearchResult, TwitterError> {
        let token = self.ensure_token().await?;

        let url = format!("{}{}", self.config.base_url, build_search_path(query));
        info!("Searching tweets: GET {}", url);
        debug!("Request headers: Authorization: Bearer [REDACTED]");

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Search request failed with status {}", status);
            return Err(TwitterError::Api(format!(
                "search endpoint returned status {}",
                status
            )));
        }

        let body = response.text().await?;
        debug!("Search response: {} bytes received", body.len());

        serde_json::from_str(&body)
            .map_err(|e| TwitterError::Api(format!("malformed search response: {}", e)))
    }

    /// Fetches one page of tweets for a hashtag: ensures a bearer token,
    /// runs the search and transforms the result.
    ///
    /// Any component error short-circuits; no partial page is returned.
    ///
    /// # Errors
    ///
    /// - `TwitterError::InvalidCursor` if `query.max_id` is not a valid
    ///   signed 64-bit decimal string
    /// - `TwitterError::Auth` / `TwitterError::Api` propagated from the
    ///   token exchange and the search call
    pub async fn get_featured_tweets(
        &self,
        query: SearchQuery,
    ) -> Result<SearchResultPage, TwitterError> {
        if let Some(cursor) = &query.max_id {
            validate_cursor(cursor)?;
        }

        let raw = self.search(&query).await?;
        let page = transform(raw, query.min_retweet_count);

        info!(
            "Fetched page for #{}: {} tweets, next cursor: {}",
            query.hashtag,
            page.statuses.len(),
            page.search_metadata
                .load_more_max_id
                .as_deref()
                .unwrap_or("none")
        );
        Ok(page)
    }
}
