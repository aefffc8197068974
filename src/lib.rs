//! # Tweetwall Library
//!
//! A Rust web service library that fetches tweets matching a hashtag from
//! the Twitter REST API and exposes them through a small paginated JSON
//! endpoint. Authentication uses the OAuth 2.0 application-only
//! (client-credentials) flow; the bearer token is obtained lazily and
//! cached for the lifetime of the client.
//!
//! ## Features
//!
//! - HTTP server with a paginated tweets endpoint (`/api/v1/tweets`)
//! - OAuth 2.0 application-only authentication with lazy token caching
//! - Result transformation: Unix timestamps, linkified URLs, retweet-count
//!   filtering, precision-safe 64-bit pagination cursors
//! - Structured logging
//! - Health check endpoint
//!
//! ## Configuration
//!
//! The following environment variables are read at startup:
//! - `TWITTER_CONSUMER_KEY` / `TWITTER_CONSUMER_SECRET`: Twitter app
//!   credentials (required)
//! - `TWEETWALL_HASHTAG`: hashtag to serve (defaults to `custserv`)
//! - `TWEETWALL_MIN_RETWEETS`: retweet threshold (defaults to 1)
//! - `PORT`: server port (defaults to 3000)
//!
//! ## API Endpoints
//!
//! - `GET /`: Returns a service banner
//! - `GET /api/v1/tweets`: Returns a page of tweets plus the cursor for
//!   the next page
//! - `GET /health`: Returns service health status

pub mod config;
pub mod handlers;
pub mod twitter;

// Re-export commonly used types and functions
pub use config::{get_server_port, TwitterConfig};
pub use handlers::{handle_health, handle_root, handle_tweets};
pub use twitter::{SearchQuery, SearchResultPage, Tweet, TwitterApi, TwitterError};

#[cfg(test)]
mod tests;
