//! Search service abstraction and the tweet type it returns.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::Result;

/// Timestamp layout used by the v1.1 API, e.g. `Wed Aug 27 13:08:45 +0000 2008`.
pub const TWITTER_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Author of a tweet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TweetUser {
    pub screen_name: String,
}

/// A tweet as returned by the search endpoint. Only the fields the export
/// reads are decoded; everything else in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawTweet")]
pub struct Tweet {
    pub id: u64,
    /// `full_text` when present, `text` otherwise.
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub user: TweetUser,
    pub lang: Option<String>,
}

/// Wire shape: extended mode sends `full_text`, compat mode sends `text`,
/// and some payloads carry both.
#[derive(Deserialize)]
struct RawTweet {
    id: u64,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    full_text: Option<String>,
    #[serde(deserialize_with = "deserialize_twitter_date")]
    created_at: DateTime<Utc>,
    user: TweetUser,
    #[serde(default)]
    lang: Option<String>,
}

impl From<RawTweet> for Tweet {
    fn from(raw: RawTweet) -> Self {
        Tweet {
            id: raw.id,
            text: raw.full_text.or(raw.text).unwrap_or_default(),
            created_at: raw.created_at,
            user: raw.user,
            lang: raw.lang,
        }
    }
}

fn deserialize_twitter_date<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_str(&raw, TWITTER_DATE_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

/// Result of one search call.
#[derive(Debug, Clone, Default)]
pub struct SearchResponse {
    /// Tweets in the order the API returned them.
    pub tweets: Vec<Tweet>,
    /// When the current rate-limit window resets, if the API said so.
    pub rate_limit_reset: Option<DateTime<Utc>>,
}

/// A configured search service that answers one query at a time.
///
/// The Twitter implementation lives in [`crate::TwitterSearchClient`]; tests
/// substitute an in-memory client.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResponse>;
}
