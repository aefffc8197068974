//! OAuth 2.0 application-only authentication for the Twitter API.
//!
//! This module implements the client-credentials exchange described at
//! https://developer.twitter.com/en/docs/authentication/oauth-2-0/application-only:
//! the consumer key and secret are percent-encoded, joined with `:`,
//! base64-encoded and sent as a Basic-Auth header to the token endpoint,
//! which responds with a bearer token used for all subsequent requests.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, error, info};
use serde_json::Value;

use super::error::TwitterError;
use crate::config::TwitterConfig;

/// Encodes the consumer key and secret into the credential string required
/// by the token endpoint.
///
/// Each half is RFC 3986 percent-encoded, the two are joined with `:` and
/// the result is base64-encoded with the standard alphabet.
///
/// # Example
///
/// ```rust
/// use tweetwall::twitter::encode_bearer_credentials;
///
/// let creds = encode_bearer_credentials("key", "secret");
/// assert_eq!(creds, "a2V5OnNlY3JldA==");
/// ```
pub fn encode_bearer_credentials(consumer_key: &str, consumer_secret: &str) -> String {
    let encoded_key = urlencoding::encode(consumer_key);
    let encoded_secret = urlencoding::encode(consumer_secret);
    STANDARD.encode(format!("{}:{}", encoded_key, encoded_secret))
}

/// Validates a token-endpoint response body and extracts the bearer token.
///
/// The response is accepted only if `token_type` is exactly `"bearer"` and
/// `access_token` is a non-empty string. Anything else leaves the caller
/// without a token.
///
/// # Returns
///
/// - `Ok(String)`: The bearer token
/// - `Err(TwitterError::Auth)`: If the response is malformed or the token
///   type is wrong
pub(crate) fn parse_token_response(body: &Value) -> Result<String, TwitterError> {
    let token_type = body.get("token_type").and_then(|v| v.as_str());
    if token_type != Some("bearer") {
        return Err(TwitterError::Auth(format!(
            "unexpected token_type in response: {:?}",
            token_type
        )));
    }

    match body.get("access_token").and_then(|v| v.as_str()) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(TwitterError::Auth(
            "response did not contain a non-empty access_token".to_string(),
        )),
    }
}

/// Performs the OAuth 2.0 client-credentials exchange against the token
/// endpoint and returns the bearer token.
///
/// # Parameters
///
/// - `http`: The shared reqwest client (carries the request timeout)
/// - `config`: Twitter credentials and the API base URL
///
/// # Returns
///
/// - `Ok(String)`: The bearer token to cache
/// - `Err(TwitterError::Auth)`: If the exchange fails at the transport
///   level, returns a non-2xx status or a malformed body
pub(crate) async fn fetch_bearer_token(
    http: &reqwest::Client,
    config: &TwitterConfig,
) -> Result<String, TwitterError> {
    let url = format!("{}oauth2/token", config.base_url);
    info!("Requesting bearer token from {}", url);
    debug!("Request headers: Authorization: Basic [REDACTED]");

    let credentials = encode_bearer_credentials(&config.consumer_key, &config.consumer_secret);

    let response = http
        .post(&url)
        .header("Authorization", format!("Basic {}", credentials))
        .header(
            "Content-Type",
            "application/x-www-form-urlencoded;charset=UTF-8",
        )
        .body("grant_type=client_credentials")
        .send()
        .await
        .map_err(|e| TwitterError::Auth(format!("token request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        error!("Token exchange failed with status {}", status);
        return Err(TwitterError::Auth(format!(
            "token endpoint returned status {}",
            status
        )));
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| TwitterError::Auth(format!("malformed token response: {}", e)))?;

    let token = parse_token_response(&body)?;
    info!("Bearer token obtained successfully");
    Ok(token)
}
