//! # Tweetwall
//!
//! A Rust web service that fetches tweets matching a hashtag from the
//! Twitter REST API using OAuth 2.0 application-only authentication and
//! serves them through a paginated JSON endpoint consumed by a browser
//! client with incremental "load more" fetching.
//!
//! ## Environment Variables
//!
//! - `TWITTER_CONSUMER_KEY`: Twitter app consumer key (required)
//! - `TWITTER_CONSUMER_SECRET`: Twitter app consumer secret (required)
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

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use log::{error, info};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

mod config;
mod handlers;
mod twitter;

use config::{get_server_port, TwitterConfig};
use handlers::{handle_health, handle_root, handle_tweets};
use twitter::TwitterApi;

/// Main entry point for the tweetwall web service.
///
/// Initializes the logging system, loads the Twitter credentials from the
/// environment, builds the shared API client and starts the HTTP server.
/// The server runs until terminated.
///
/// # Logging
///
/// The application uses the `env_logger` crate; log levels are controlled
/// via the `RUST_LOG` environment variable.
///
/// # Example Usage
///
/// ```bash
/// # Run with default port 3000
/// TWITTER_CONSUMER_KEY=... TWITTER_CONSUMER_SECRET=... cargo run
///
/// # Run on custom port with debug logging
/// PORT=8080 RUST_LOG=debug cargo run
/// ```
#[tokio::main]
async fn main() {
    // Initialize the logging system
    env_logger::init();

    // Load the Twitter credentials once; the client never reads the
    // environment itself
    let config = match TwitterConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let api = match TwitterApi::new(config) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            error!("Failed to build Twitter API client: {}", e);
            std::process::exit(1);
        }
    };

    // Build the HTTP application with all routes and middleware
    let app = Router::new()
        .route("/", get(handle_root))
        .route("/api/v1/tweets", get(handle_tweets))
        .route("/health", get(handle_health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(api);

    // Get the server port and bind address
    let port = get_server_port();
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    info!("Starting tweetwall server on {}", addr);

    // Bind to the address and start serving requests
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("HTTP server error: {}", e);
    }
}
