// src/fetch/http.rs
// =============================================================================
// This module fetches pages over HTTP(S).
//
// Key functionality:
// - One reqwest Client for the whole run (connection pooling)
// - Fixed per-request timeout (10 seconds unless overridden)
// - Library-default redirect handling, no cookies, no custom headers
// - Sorts failures into a few categories (timeout, DNS, TLS, status, ...)
//
// Rust concepts:
// - async/await: each request is awaited before the crawler moves on
// - Result<T, E>: every failure becomes a FetchError value, never a panic
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::Fetcher;
use crate::error::{FetchError, FetchFailure, Result};

// Fetches pages with a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Creates a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> std::result::Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport(categorize_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(FetchFailure::Status(status.as_u16())));
        }

        // Invalid bytes are replaced, not rejected, so only a decode error is
        // a parse failure; a timeout or reset mid-body is still a network one
        response.text().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Parse(e.to_string())
            } else {
                FetchError::Transport(categorize_error(&e))
            }
        })
    }
}

// Categorizes different error types from reqwest
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
fn categorize_error(error: &reqwest::Error) -> FetchFailure {
    // Convert error to string once; the DNS/TLS cases are only visible there
    let error_string = format!("{:?}", error).to_lowercase();

    if error.is_timeout() {
        FetchFailure::Timeout
    } else if error.is_redirect() {
        FetchFailure::TooManyRedirects
    } else if error.is_connect() {
        if error_string.contains("dns") || error_string.contains("resolve") {
            FetchFailure::Dns
        } else if error_string.contains("certificate") || error_string.contains("tls") {
            FetchFailure::Tls
        } else {
            FetchFailure::Connect
        }
    } else if let Some(status) = error.status() {
        FetchFailure::Status(status.as_u16())
    } else {
        FetchFailure::Other(error.to_string())
    }
}
