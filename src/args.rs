use clap::Parser;

use crate::config::ResultType;
use crate::logging::LogLevel;

/// Twitter search export tool: runs a single search query and saves the
/// matching tweets as newline-delimited JSON.
///
/// Every option can also be supplied through the environment variable named
/// in its help text; a `.env` file in the working directory is honoured.
#[derive(Parser, Debug, Clone)]
#[clap(
    author,
    version,
    about,
    long_about = "Authenticates against the Twitter search API, issues one search query and writes a reduced record for every matching tweet to <output-folder>/<query>.json, one JSON object per line."
)]
pub struct Args {
    /// Twitter API consumer key.
    #[clap(long, env = "CONSUMER_KEY", default_value = "", hide_env_values = true)]
    pub consumer_key: String,

    /// Twitter API consumer secret.
    #[clap(long, env = "CONSUMER_SECRET", default_value = "", hide_env_values = true)]
    pub consumer_secret: String,

    /// Folder the `<query>.json` file is written to. Created if missing.
    #[clap(short, long, env = "OUTPUT_FOLDER", default_value = "")]
    pub output_folder: String,

    /// Search query of 500 characters maximum, including operators.
    #[clap(short, long, env = "QUERY", default_value = "")]
    pub query: String,

    /// Restricts tweets to the given language, given by an ISO 639-1 code.
    #[clap(short, long, env = "LANGUAGE", default_value = "en")]
    pub language: String,

    /// What type of search results you would prefer to receive.
    #[clap(long, env = "RESULT_TYPE", value_enum, default_value_t = ResultType::Recent)]
    pub result_type: ResultType,

    /// Only return tweets with an ID greater than this one. 0 disables the filter.
    #[clap(long, env = "SINCE_ID", default_value_t = 0)]
    pub since_id: u64,

    /// Number of tweets to request (1-100). Uses the API default when unset.
    #[clap(long, env = "COUNT", value_parser = clap::value_parser!(u8).range(1..=100))]
    pub count: Option<u8>,

    /// Whether to log in JSON format or not.
    #[clap(
        long,
        env = "JSON_LOGGING",
        default_value_t = true,
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub json_logging: bool,

    /// The log level (panic, fatal, error, warn, info, debug, trace).
    #[clap(long, env = "LOG_LEVEL", value_enum, ignore_case = true, default_value = "debug")]
    pub log_level: LogLevel,

    /// Base URL of the Twitter API.
    #[clap(long, env = "TWITTER_API_URL", default_value = "https://api.twitter.com")]
    pub api_url: String,
}
