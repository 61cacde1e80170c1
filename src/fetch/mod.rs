// src/fetch/mod.rs
// =============================================================================
// This module downloads pages for the crawler.
//
// Submodules:
// - http: the real fetcher, built on reqwest
//
// The crawler only talks to the Fetcher trait, so tests can hand it a set of
// canned pages instead of going to the network.
// =============================================================================

mod http;

use async_trait::async_trait;
use url::Url;

use crate::error::FetchError;

pub use http::HttpFetcher;

// Anything that can turn a URL into page text.
//
// One call = one GET. Implementations must not retry; a failed page is
// simply skipped by the crawler.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}
