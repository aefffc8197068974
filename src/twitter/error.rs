//! Error types for the Twitter API client.
//!
//! All failures in the token exchange, the search call and the result
//! transformation surface as one of the variants below. None of them are
//! retried automatically; they bubble up to the HTTP layer which maps them
//! to a failure envelope.

use std::error::Error;
use std::fmt;

/// Errors produced by the Twitter API client.
#[derive(Debug)]
pub enum TwitterError {
    /// The bearer-token exchange failed or returned a malformed/absent token.
    Auth(String),
    /// Transport failure, non-2xx response or malformed JSON from the
    /// search endpoint.
    Api(String),
    /// The supplied pagination cursor is not a valid signed 64-bit decimal
    /// string.
    InvalidCursor(String),
}

impl fmt::Display for TwitterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwitterError::Auth(msg) => write!(f, "authentication failed: {}", msg),
            TwitterError::Api(msg) => write!(f, "Twitter API request failed: {}", msg),
            TwitterError::InvalidCursor(cursor) => {
                write!(f, "invalid pagination cursor: {}", cursor)
            }
        }
    }
}

impl Error for TwitterError {}

impl From<reqwest::Error> for TwitterError {
    fn from(err: reqwest::Error) -> Self {
        // Timeouts and connection failures are API errors, not auth errors;
        // the token exchange wraps its own failures in Auth explicitly.
        TwitterError::Api(err.to_string())
    }
}
