use clap::Parser;
use dotenv::dotenv;
use tracing::{error, info};

use twitter_search_export_lib::{logging, Args, SearchConfig, TweetExporter, TwitterSearchClient};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();

    // Invalid option values (log level, result type, ...) exit here.
    let args = Args::parse();
    logging::init(args.json_logging, args.log_level);

    let config = SearchConfig::from(args);
    config.check_query();

    let client = match TwitterSearchClient::connect(&config).await {
        Ok(client) => client,
        Err(e) => {
            error!(query = %config.query, error = %e, "Cannot create Twitter client");
            std::process::exit(1);
        }
    };
    info!("Twitter client created successfully");

    // The exporter logs the failing stage itself.
    if TweetExporter::new(client, &config).run().await.is_err() {
        std::process::exit(1);
    }
}
