//! Error types for twitter-search-export
//!
//! Every stage of the export returns [`Result`]; the binary turns the first
//! error into a logged message and a non-zero exit status. Nothing is retried.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias for export operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The token endpoint rejected the consumer credentials
    #[error("authentication failed with status {status}: {message}")]
    Auth { status: u16, message: String },

    /// The search endpoint returned a non-success status
    #[error("Twitter API error {status}: {message}")]
    Api { status: u16, message: String },

    /// HTTP 429 from the search endpoint
    #[error("rate limited{}", reset_suffix(.reset))]
    RateLimited { reset: Option<DateTime<Utc>> },

    /// Transport failure talking to the API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A record could not be encoded as JSON
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("cannot create folder {}: {source}", .path.display())]
    CreateFolder {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot create output file {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write line to output file {}: {source}", .path.display())]
    WriteLine {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot flush writer of file {}: {source}", .path.display())]
    Flush {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A write was attempted after an earlier write failed
    #[error("writer for {} was aborted by an earlier error", .path.display())]
    WriterAborted { path: PathBuf },
}

fn reset_suffix(reset: &Option<DateTime<Utc>>) -> String {
    match reset {
        Some(at) => format!(", resets at {}", at.to_rfc3339()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rate_limited_message_includes_reset_when_known() {
        let reset = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let err = Error::RateLimited { reset: Some(reset) };
        assert_eq!(err.to_string(), "rate limited, resets at 2024-01-02T03:04:05+00:00");

        let err = Error::RateLimited { reset: None };
        assert_eq!(err.to_string(), "rate limited");
    }

    #[test]
    fn io_errors_name_the_path() {
        let err = Error::CreateFile {
            path: PathBuf::from("/out/golang.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("/out/golang.json"));
        assert!(message.contains("denied"));
    }
}
