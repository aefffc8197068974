//! Configuration module for the tweetwall service.
//!
//! Credentials and defaults are read from the environment exactly once, at
//! startup, into an explicit [`TwitterConfig`] struct that gets handed to
//! the API client. Nothing inside the client reads ambient process state.

use log::{debug, error, info, warn};
use std::env;

/// Configuration for the Twitter REST API client.
///
/// Holds the consumer key/secret pair used for the OAuth 2.0
/// client-credentials exchange, the API base URL, and the defaults applied
/// when the caller does not specify them.
#[derive(Debug, Clone)]
pub struct TwitterConfig {
    /// Consumer key of the Twitter app
    pub consumer_key: String,
    /// Consumer secret of the Twitter app
    pub consumer_secret: String,
    /// Base URL of the API, including the trailing slash
    pub base_url: String,
    /// Hashtag served when the caller does not pick one
    pub default_hashtag: String,
    /// Minimum retweet count applied to every page fetch
    pub default_min_retweets: i64,
}

/// Masks a secret for logging: first few characters, then an ellipsis.
fn mask_secret(secret: &str) -> String {
    format!("{}...", &secret[..std::cmp::min(secret.len(), 8)])
}

impl TwitterConfig {
    /// Creates a new `TwitterConfig` by loading credentials from
    /// environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `TWITTER_CONSUMER_KEY`: Consumer key of the Twitter app
    /// - `TWITTER_CONSUMER_SECRET`: Consumer secret of the Twitter app
    ///
    /// # Optional Environment Variables
    ///
    /// - `TWEETWALL_HASHTAG`: Default hashtag to serve (defaults to
    ///   `custserv`)
    /// - `TWEETWALL_MIN_RETWEETS`: Minimum retweet count (defaults to 1)
    /// - `TWITTER_API_BASE_URL`: API base URL (defaults to
    ///   `https://api.twitter.com/`)
    ///
    /// # Returns
    ///
    /// - `Ok(TwitterConfig)`: If both required variables are present and
    ///   non-empty
    /// - `Err(...)`: If a required variable is missing or empty
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        info!("Loading Twitter configuration from environment variables");

        let consumer_key = match env::var("TWITTER_CONSUMER_KEY") {
            Ok(key) if !key.is_empty() => {
                debug!("Consumer key (masked): {}", mask_secret(&key));
                key
            }
            Ok(_) => {
                error!("TWITTER_CONSUMER_KEY is empty");
                return Err("TWITTER_CONSUMER_KEY cannot be empty".into());
            }
            Err(e) => {
                error!("Failed to load TWITTER_CONSUMER_KEY from environment: {}", e);
                return Err(
                    format!("Missing TWITTER_CONSUMER_KEY environment variable: {}", e).into(),
                );
            }
        };

        let consumer_secret = match env::var("TWITTER_CONSUMER_SECRET") {
            Ok(secret) if !secret.is_empty() => {
                debug!("Consumer secret (masked): {}", mask_secret(&secret));
                secret
            }
            Ok(_) => {
                error!("TWITTER_CONSUMER_SECRET is empty");
                return Err("TWITTER_CONSUMER_SECRET cannot be empty".into());
            }
            Err(e) => {
                error!(
                    "Failed to load TWITTER_CONSUMER_SECRET from environment: {}",
                    e
                );
                return Err(format!(
                    "Missing TWITTER_CONSUMER_SECRET environment variable: {}",
                    e
                )
                .into());
            }
        };

        let base_url = env::var("TWITTER_API_BASE_URL")
            .unwrap_or_else(|_| "https://api.twitter.com/".to_string());

        let default_hashtag =
            env::var("TWEETWALL_HASHTAG").unwrap_or_else(|_| "custserv".to_string());

        let default_min_retweets = match env::var("TWEETWALL_MIN_RETWEETS") {
            Ok(value) => match value.parse::<i64>() {
                Ok(n) if n >= 0 => n,
                _ => {
                    warn!(
                        "TWEETWALL_MIN_RETWEETS '{}' is not a non-negative integer, using default 1",
                        value
                    );
                    1
                }
            },
            Err(_) => 1,
        };

        info!(
            "Twitter configuration loaded: hashtag=#{}, min_retweets={}",
            default_hashtag, default_min_retweets
        );

        Ok(TwitterConfig {
            consumer_key,
            consumer_secret,
            base_url,
            default_hashtag,
            default_min_retweets,
        })
    }
}

/// Gets the server port from environment variables or returns the default.
///
/// Reads the `PORT` environment variable and parses it as a u16,
/// defaulting to 3000 when it is not set.
///
/// # Panics
///
/// Panics if `PORT` is set to a value that cannot be parsed as a valid
/// port number.
pub fn get_server_port() -> u16 {
    env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .expect("PORT must be a valid number")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("0123456789abcdef"), "01234567...");
        assert_eq!(mask_secret("abc"), "abc...");
    }
}
