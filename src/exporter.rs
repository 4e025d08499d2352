use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use crate::config::SearchConfig;
use crate::error::Result;
use crate::output::ResultWriter;
use crate::projection::ProjectedTweet;
use crate::search::SearchClient;

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub tweets: usize,
}

/// Runs one query through a [`SearchClient`] and writes the projected tweets
/// to `<output-folder>/<query>.json`.
pub struct TweetExporter<C> {
    client: C,
    query: String,
    output_folder: PathBuf,
}

impl<C: SearchClient> TweetExporter<C> {
    pub fn new(client: C, config: &SearchConfig) -> Self {
        TweetExporter {
            client,
            query: config.query.clone(),
            output_folder: config.output_folder.clone(),
        }
    }

    /// Search, then write every result in API order. Stops at the first
    /// error; a partially written file is left as-is.
    pub async fn run(&self) -> Result<ExportSummary> {
        let spinner = search_spinner(&self.query);
        let searched = self.client.search(&self.query).await;
        spinner.finish_and_clear();

        let response = match searched {
            Ok(response) => response,
            Err(e) => {
                error!(query = %self.query, error = %e, "Cannot get tweets for query");
                return Err(e);
            }
        };

        if let Some(reset) = response.rate_limit_reset {
            if Utc::now() < reset {
                info!("Rate limit resets at {}", reset);
            }
        }

        info!(
            "Downloaded {} tweets for query term {}",
            response.tweets.len(),
            self.query
        );

        let mut writer = ResultWriter::create(&self.output_folder, &self.query)
            .await
            .inspect_err(|e| error!(error = %e, "Cannot prepare output file"))?;

        for tweet in &response.tweets {
            let projected = ProjectedTweet::from(tweet);
            if let Err(e) = writer.write_record(&projected).await {
                error!(id = projected.id, error = %e, "Cannot write tweet to output file");
                return Err(e);
            }
        }

        let path = writer.path().to_path_buf();
        let tweets = writer
            .finish()
            .await
            .inspect_err(|e| error!(error = %e, "Cannot flush output file"))?;

        info!("Finished writing {} tweets to {}", tweets, path.display());
        Ok(ExportSummary { path, tweets })
    }
}

fn search_spinner(query: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {wide_msg}")
    {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(format!("Searching tweets for '{}'", query));
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
