//! Immutable run configuration, built once from the parsed command line.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use tracing::warn;

use crate::args::Args;

/// Maximum query length accepted by the search API, operators included.
pub const MAX_QUERY_CHARS: usize = 500;

/// Ranking mode of the search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ResultType {
    /// Only the most recent tweets.
    #[default]
    Recent,
    /// Only the most popular tweets.
    Popular,
    /// Both popular and real-time results.
    Mixed,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::Recent => "recent",
            ResultType::Popular => "popular",
            ResultType::Mixed => "mixed",
        }
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application credentials for app-only authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .finish()
    }
}

/// Filters applied to the search client before the query is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilters {
    pub language: String,
    pub result_type: ResultType,
    /// Exclusive lower bound on tweet IDs. `None` means no floor.
    pub since_id: Option<u64>,
    pub count: Option<u8>,
}

/// Everything a run needs, fixed at startup.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub credentials: Credentials,
    pub query: String,
    pub language: String,
    pub result_type: ResultType,
    /// 0 means unset.
    pub since_id: u64,
    pub count: Option<u8>,
    pub output_folder: PathBuf,
    pub api_url: String,
}

impl SearchConfig {
    /// Filters for the search client. A zero `since_id` applies no floor.
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            language: self.language.clone(),
            result_type: self.result_type,
            since_id: (self.since_id > 0).then_some(self.since_id),
            count: self.count,
        }
    }

    /// Logs a warning when the query exceeds the API limit. The query is
    /// still sent as-is and the API decides whether to reject it.
    pub fn check_query(&self) {
        let chars = self.query.chars().count();
        if chars > MAX_QUERY_CHARS {
            warn!(
                chars,
                limit = MAX_QUERY_CHARS,
                "Query is longer than the search API accepts"
            );
        }
    }
}

impl From<Args> for SearchConfig {
    fn from(args: Args) -> Self {
        SearchConfig {
            credentials: Credentials {
                consumer_key: args.consumer_key,
                consumer_secret: args.consumer_secret,
            },
            query: args.query,
            language: args.language,
            result_type: args.result_type,
            since_id: args.since_id,
            count: args.count,
            output_folder: PathBuf::from(args.output_folder),
            api_url: args.api_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CapturedLogs;
    use clap::Parser;

    fn config_from(extra: &[&str]) -> SearchConfig {
        let mut argv = vec!["twitter-search-export"];
        argv.extend_from_slice(extra);
        SearchConfig::from(Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn zero_since_id_applies_no_floor() {
        let config = config_from(&["--since-id", "0"]);
        assert_eq!(config.filters().since_id, None);
    }

    #[test]
    fn positive_since_id_applies_floor() {
        let config = config_from(&["--since-id", "1234567890"]);
        assert_eq!(config.filters().since_id, Some(1234567890));
    }

    #[test]
    fn filters_carry_language_and_result_type() {
        let config = config_from(&["--language", "de", "--result-type", "mixed", "--count", "50"]);
        let filters = config.filters();
        assert_eq!(filters.language, "de");
        assert_eq!(filters.result_type, ResultType::Mixed);
        assert_eq!(filters.count, Some(50));
    }

    #[test]
    fn converts_output_folder_to_path() {
        let config = config_from(&["--output-folder", "data/tweets", "--query", "golang"]);
        assert_eq!(config.output_folder, PathBuf::from("data/tweets"));
        assert_eq!(config.query, "golang");
    }

    #[test]
    fn overlong_query_is_warned_about() {
        let (logs, _guard) = CapturedLogs::install();
        let query = "a".repeat(MAX_QUERY_CHARS + 1);
        config_from(&["--query", &query]).check_query();

        let output = logs.contents();
        assert!(output.contains("WARN"));
        assert!(output.contains("Query is longer than the search API accepts"));
        assert!(output.contains("chars=501"));
    }

    #[test]
    fn query_at_the_limit_is_not_warned_about() {
        let (logs, _guard) = CapturedLogs::install();
        let query = "é".repeat(MAX_QUERY_CHARS);
        config_from(&["--query", &query]).check_query();

        assert!(!logs.contents().contains("Query is longer"));
    }

    #[test]
    fn debug_output_hides_secret() {
        let credentials = Credentials {
            consumer_key: "key".into(),
            consumer_secret: "hunter2".into(),
        };
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("key"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn result_type_query_values() {
        assert_eq!(ResultType::Recent.to_string(), "recent");
        assert_eq!(ResultType::Popular.as_str(), "popular");
        assert_eq!(ResultType::Mixed.as_str(), "mixed");
    }
}
