//! # Twitter Search Export
//!
//! A Rust library for running a single Twitter search and saving the
//! matching tweets as newline-delimited JSON, one reduced record per tweet.
//!
//! ## Main Components
//!
//! - [`Args`]: Command line arguments, each with an environment fallback
//! - [`SearchConfig`]: The immutable configuration built from [`Args`]
//! - [`TwitterSearchClient`]: App-only authenticated client for the search API
//! - [`TweetExporter`]: Runs the query and writes `<output-folder>/<query>.json`
//!
//! ## Example
//!
//! ```no_run
//! use twitter_search_export_lib::{Args, SearchConfig, TweetExporter, TwitterSearchClient};
//! use clap::Parser;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     // Parse command line arguments
//!     let config = SearchConfig::from(Args::parse());
//!
//!     // Authenticate and apply the language/result-type/since-id filters
//!     let client = TwitterSearchClient::connect(&config).await?;
//!
//!     // Search once and write the results
//!     let summary = TweetExporter::new(client, &config).run().await?;
//!     println!("{} tweets written to {}", summary.tweets, summary.path.display());
//!
//!     Ok(())
//! }
//! ```

mod args;
mod config;
mod error;
mod exporter;
pub mod logging;
pub mod output;
mod projection;
mod search;
#[cfg(test)]
mod test_support;
mod twitter_client;

// Re-export main components for documentation and external use
pub use crate::args::Args;
pub use crate::config::{Credentials, ResultType, SearchConfig, SearchFilters, MAX_QUERY_CHARS};
pub use crate::error::{Error, Result};
pub use crate::exporter::{ExportSummary, TweetExporter};
pub use crate::logging::LogLevel;
pub use crate::projection::ProjectedTweet;
pub use crate::search::{SearchClient, SearchResponse, Tweet, TweetUser};
pub use crate::twitter_client::TwitterSearchClient;
