use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{Credentials, SearchConfig, SearchFilters};
use crate::error::{Error, Result};
use crate::search::{SearchClient, SearchResponse, Tweet};

const TOKEN_PATH: &str = "/oauth2/token";
const SEARCH_PATH: &str = "/1.1/search/tweets.json";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(default)]
    statuses: Vec<Tweet>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    errors: Vec<ApiErrorEntry>,
}

#[derive(Deserialize)]
struct ApiErrorEntry {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}

/// Search client for the Twitter v1.1 standard search API using
/// application-only (bearer token) authentication.
#[derive(Debug)]
pub struct TwitterSearchClient {
    client: Client,
    base_url: String,
    bearer_token: String,
    filters: SearchFilters,
}

impl TwitterSearchClient {
    /// Authenticate with the consumer credentials and return a client with
    /// the configured filters applied.
    pub async fn connect(config: &SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("twitter-search-export/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base_url = config.api_url.trim_end_matches('/').to_string();

        let bearer_token = fetch_bearer_token(&client, &base_url, &config.credentials).await?;

        Ok(TwitterSearchClient {
            client,
            base_url,
            bearer_token,
            filters: config.filters(),
        })
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    fn query_params(&self, query: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.to_string()),
            ("lang", self.filters.language.clone()),
            ("result_type", self.filters.result_type.to_string()),
            ("tweet_mode", "extended".to_string()),
        ];
        if let Some(since_id) = self.filters.since_id {
            params.push(("since_id", since_id.to_string()));
        }
        if let Some(count) = self.filters.count {
            params.push(("count", count.to_string()));
        }
        params
    }
}

#[async_trait]
impl SearchClient for TwitterSearchClient {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let url = format!("{}{}", self.base_url, SEARCH_PATH);
        let params = self.query_params(query);

        debug!(url = %url, ?params, "Requesting search");
        let response = self
            .client
            .get(&url)
            .query(&params)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let status = response.status();
        let rate_limit_reset = rate_limit_reset(response.headers());

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(reset = ?rate_limit_reset, "Search rate limit exceeded");
            return Err(Error::RateLimited {
                reset: rate_limit_reset,
            });
        }

        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(&bytes),
            });
        }

        let body: SearchBody = serde_json::from_slice(&bytes)?;
        Ok(SearchResponse {
            tweets: body.statuses,
            rate_limit_reset,
        })
    }
}

async fn fetch_bearer_token(client: &Client, base_url: &str, credentials: &Credentials) -> Result<String> {
    let url = format!("{}{}", base_url, TOKEN_PATH);

    // Key and secret are URL-encoded before being joined for basic auth.
    let key = urlencoding::encode(&credentials.consumer_key);
    let secret = urlencoding::encode(&credentials.consumer_secret);

    debug!(url = %url, "Requesting application bearer token");
    let response = client
        .post(&url)
        .basic_auth(key, Some(secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    let bytes = response.bytes().await?;
    if !status.is_success() {
        return Err(Error::Auth {
            status: status.as_u16(),
            message: error_message(&bytes),
        });
    }

    let token: TokenResponse = serde_json::from_slice(&bytes)?;
    Ok(token.access_token)
}

/// `x-rate-limit-reset` is a unix timestamp in seconds.
fn rate_limit_reset(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    headers
        .get("x-rate-limit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed
            .errors
            .iter()
            .map(|e| match e.code {
                Some(code) => format!("{} (code {})", e.message, code),
                None => e.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => String::from_utf8_lossy(body).into_owned(),
    }
}
