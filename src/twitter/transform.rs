//! Post-processing of raw search results.
//!
//! This module turns the raw payload of the `1.1/search/tweets.json`
//! endpoint into the page format served to the browser client: timestamps
//! are normalized to Unix epoch seconds, bare URLs in the tweet text are
//! wrapped in anchor tags, the next pagination cursor is computed from the
//! lowest tweet ID in the batch, and tweets below the retweet threshold are
//! dropped.
//!
//! The transformation is a pure mapping from raw records to new values;
//! nothing is mutated in place.

use chrono::DateTime;
use log::{debug, warn};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Format of the `created_at` field in v1.1 API responses,
/// e.g. "Wed Aug 27 13:08:45 +0000 2008".
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Matches a bare URL that is not already inside markup. Group 1 captures
/// the preceding character (or the empty start-of-string) so that URLs
/// preceded by a quote, `=`, `'` or `>` are left alone, which keeps the
/// substitution idempotent. The final character class stops the match from
/// swallowing a trailing `.` or `)`.
const LINK_PATTERN: &str = r#"(?i)(^|[^"='>])((?:http|https|ftp)://[^\s<]+[^\s<.)])"#;

/// One raw tweet record as returned by the search endpoint.
///
/// Only the fields the transformation needs are deserialized; everything
/// else in the upstream record is ignored. The ID is a 64-bit integer and
/// must stay one end to end.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStatus {
    pub id: i64,
    pub created_at: String,
    pub text: String,
    #[serde(default)]
    pub retweet_count: i64,
    #[serde(default)]
    pub favorite_count: i64,
    pub user: RawUser,
}

/// Author details embedded in a raw tweet record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    pub name: String,
    pub screen_name: String,
    #[serde(default)]
    pub profile_image_url_https: String,
}

/// The decoded body of a search response: the tweet records plus the
/// upstream metadata object, which is passed through untouched.
#[derive(Debug, Deserialize)]
pub struct RawSearchResult {
    #[serde(default)]
    pub statuses: Vec<RawStatus>,
    #[serde(default)]
    pub search_metadata: serde_json::Map<String, Value>,
}

/// A tweet after transformation, in the shape the browser client renders.
///
/// The ID is serialized as a decimal string so that clients with 53-bit
/// numeric types never lose precision.
#[derive(Debug, Clone, Serialize)]
pub struct Tweet {
    pub id_str: String,
    pub user: TweetAuthor,
    pub text: String,
    pub timestamp: i64,
    pub retweet_count: i64,
    pub favorite_count: i64,
}

/// Author details of a transformed tweet.
#[derive(Debug, Clone, Serialize)]
pub struct TweetAuthor {
    pub name: String,
    pub screen_name: String,
    pub profile_image_url: String,
}

/// Metadata attached to a result page.
///
/// `count` is the number of records fetched from upstream before the
/// retweet filter ran, so a caller comparing it against the requested page
/// size detects end-of-pagination even when filtering shrinks the page.
/// `load_more_max_id` is the cursor for the next page and is absent once
/// pagination is exhausted. All other upstream metadata fields are
/// flattened through unchanged.
#[derive(Debug, Serialize)]
pub struct SearchMetadata {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_more_max_id: Option<String>,
    #[serde(flatten)]
    pub upstream: serde_json::Map<String, Value>,
}

/// One page of transformed tweets, constructed once per call and immutable
/// thereafter.
#[derive(Debug, Serialize)]
pub struct SearchResultPage {
    pub statuses: Vec<Tweet>,
    pub search_metadata: SearchMetadata,
}

/// Parses a v1.1 `created_at` date string into Unix epoch seconds.
///
/// Returns `None` when the string does not match the documented format.
pub(crate) fn parse_created_at(created_at: &str) -> Option<i64> {
    DateTime::parse_from_str(created_at, CREATED_AT_FORMAT)
        .ok()
        .map(|dt| dt.timestamp())
}

/// Wraps bare URLs in the given text in anchor tags that open in a new
/// browsing context.
///
/// A URL is "bare" when it starts with `http://`, `https://` or `ftp://`
/// (case-insensitive), runs until whitespace or `<`, does not end in `.`
/// or `)`, and is not preceded by a quote, `=` or `>` — the latter check
/// keeps URLs already sitting inside an anchor or attribute from being
/// wrapped a second time. The matched URL is preserved verbatim as both
/// the link target and the visible text.
pub fn linkify(text: &str) -> String {
    // The pattern is a constant; a compile failure would be a programming
    // error, in which case the text is passed through untouched.
    let re = match Regex::new(LINK_PATTERN) {
        Ok(re) => re,
        Err(_) => return text.to_string(),
    };

    re.replace_all(text, |caps: &Captures| {
        format!(
            r#"{}<a href="{}" target="_blank">{}</a>"#,
            &caps[1], &caps[2], &caps[2]
        )
    })
    .into_owned()
}

/// Transforms a raw search result into a page of tweets plus the cursor
/// for the next page.
///
/// Steps, in order:
///
/// 1. Each record gets its `created_at` parsed into a Unix timestamp and
///    its text linkified.
/// 2. The minimum tweet ID across the whole batch is tracked. The API
///    returns IDs in decreasing order but the minimum is computed
///    defensively rather than taken from the last position.
/// 3. If the batch was non-empty, the next cursor is `min_id - 1`,
///    serialized as a decimal string into
///    `search_metadata.load_more_max_id`. An empty batch emits no cursor,
///    which terminates pagination.
/// 4. Only then is the retweet filter applied: for
///    `min_retweet_count > 0`, records with fewer retweets are dropped.
///    The cursor reflects the unfiltered minimum so no tweet is silently
///    skipped on the next page.
///
/// Records whose `created_at` cannot be parsed keep a timestamp of 0
/// rather than failing the whole page.
pub fn transform(raw: RawSearchResult, min_retweet_count: i64) -> SearchResultPage {
    let fetched_count = raw.statuses.len();
    let mut lowest_id: Option<i64> = None;

    let mut statuses: Vec<Tweet> = raw
        .statuses
        .into_iter()
        .map(|status| {
            lowest_id = Some(match lowest_id {
                Some(current) => current.min(status.id),
                None => status.id,
            });

            let timestamp = parse_created_at(&status.created_at).unwrap_or_else(|| {
                warn!(
                    "Could not parse created_at '{}' for tweet {}",
                    status.created_at, status.id
                );
                0
            });

            Tweet {
                id_str: status.id.to_string(),
                user: TweetAuthor {
                    name: status.user.name,
                    screen_name: status.user.screen_name,
                    profile_image_url: status.user.profile_image_url_https,
                },
                text: linkify(&status.text),
                timestamp,
                retweet_count: status.retweet_count,
                favorite_count: status.favorite_count,
            }
        })
        .collect();

    // The cursor comes from the unfiltered batch; subtracting 1 makes the
    // bound exclusive so the next page does not repeat the last tweet.
    let load_more_max_id = lowest_id.map(|id| (id - 1).to_string());

    if min_retweet_count > 0 {
        statuses.retain(|tweet| tweet.retweet_count >= min_retweet_count);
    }

    debug!(
        "Transformed {} raw statuses into {} tweets (min_retweet_count={})",
        fetched_count,
        statuses.len(),
        min_retweet_count
    );

    let mut upstream = raw.search_metadata;
    // These keys are owned by the transformation; drop any upstream copies
    // so the flattened serialization cannot emit duplicates.
    upstream.remove("count");
    upstream.remove("load_more_max_id");

    SearchResultPage {
        statuses,
        search_metadata: SearchMetadata {
            count: fetched_count,
            load_more_max_id,
            upstream,
        },
    }
}
