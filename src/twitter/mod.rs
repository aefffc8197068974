//! Twitter REST API integration module.
//!
//! This module contains everything needed to serve a page of hashtag
//! tweets: the OAuth 2.0 application-only token exchange, the
//! authenticated search client, and the result transformation that
//! normalizes timestamps, linkifies URLs and computes the pagination
//! cursor.

mod auth;
mod client;
mod error;
mod transform;

// Re-export public API
pub use auth::encode_bearer_credentials;
pub use client::{SearchQuery, TwitterApi};
pub use error::TwitterError;
pub use transform::{
    linkify, transform, RawSearchResult, RawStatus, RawUser, SearchMetadata, SearchResultPage,
    Tweet, TweetAuthor,
};
