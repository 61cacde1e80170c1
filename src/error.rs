// src/error.rs
// =============================================================================
// Error types shared by the crawler modules.
//
// Two layers:
// - AppError: anything that stops the whole run (bad seed URL, bad filter
//   regex, output directory not writable, ...)
// - FetchError: what can go wrong with a single page. These never stop the
//   run; the crawler turns them into a skip reason and moves on.
//
// Rust concepts:
// - thiserror: derive Display and From for error enums
// - #[from]: lets the ? operator convert library errors automatically
// =============================================================================

use serde::Serialize;
use thiserror::Error;

/// Result type alias for crawler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors that abort a crawl run.
#[derive(Error, Debug)]
pub enum AppError {
    /// Writing output files failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Building the HTTP client failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// The filter pattern is not a valid regular expression
    #[error("Invalid filter pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Report serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The seed URL can't start a crawl
    #[error("Invalid seed URL: {0}")]
    InvalidSeed(String),
}

impl AppError {
    pub fn invalid_seed(message: impl Into<String>) -> Self {
        Self::InvalidSeed(message.into())
    }
}

// Why fetching one page failed.
//
// Categorised the same way for every page so the report can show
// "timeout" or "HTTP 404" instead of a raw library message.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FetchFailure {
    /// Request timed out
    #[error("request timed out")]
    Timeout,
    /// Could not resolve hostname
    #[error("could not resolve hostname")]
    Dns,
    /// Connection refused or reset
    #[error("connection failed")]
    Connect,
    /// SSL/TLS certificate error
    #[error("TLS error")]
    Tls,
    /// Redirect loop
    #[error("too many redirects")]
    TooManyRedirects,
    /// Server answered with a non-2xx status
    #[error("HTTP {0}")]
    Status(u16),
    /// Anything else reqwest reports
    #[error("{0}")]
    Other(String),
}

// Error returned by a Fetcher for one page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request itself failed
    #[error("request failed: {0}")]
    Transport(FetchFailure),

    /// The response arrived but the body couldn't be read as text
    #[error("could not decode body: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failure_display() {
        assert_eq!(FetchFailure::Status(404).to_string(), "HTTP 404");
        assert_eq!(FetchFailure::Timeout.to_string(), "request timed out");
    }

    #[test]
    fn test_fetch_failure_json_shape() {
        let json = serde_json::to_string(&FetchFailure::Status(503)).unwrap();
        assert_eq!(json, r#"{"kind":"status","detail":503}"#);

        let json = serde_json::to_string(&FetchFailure::Dns).unwrap();
        assert_eq!(json, r#"{"kind":"dns"}"#);
    }

    #[test]
    fn test_invalid_seed_message() {
        let err = AppError::invalid_seed("no host in 'mailto:x@y.io'");
        assert_eq!(err.to_string(), "Invalid seed URL: no host in 'mailto:x@y.io'");
    }
}
