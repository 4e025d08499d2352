use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::search::Tweet;

/// The reduced record persisted for each tweet. Field names are part of the
/// output contract and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedTweet {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "UserScreenName")]
    pub user_screen_name: String,
    #[serde(rename = "Language")]
    pub language: String,
}

impl From<&Tweet> for ProjectedTweet {
    fn from(tweet: &Tweet) -> Self {
        ProjectedTweet {
            id: tweet.id,
            text: tweet.text.clone(),
            created_at: tweet.created_at,
            user_screen_name: tweet.user.screen_name.clone(),
            language: tweet.lang.clone().unwrap_or_default(),
        }
    }
}
