// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-first crawl of the seed's own domain, bounded by a depth limit
// - Links to other domains are deferred and crawled after the seed's domain
// - Every URL is fetched at most once per run
// - A typed report of what happened to each page
//
// Rust concepts:
// - Async programming: fetches are awaited one after the other
// - Collections: HashSet for tracking visited URLs, VecDeque for the
//   deferred queue
// =============================================================================

mod config;
mod observer;
mod queue;
mod report;

use url::Url;

use crate::error::{AppError, Result};

pub use config::{CrawlConfig, DeferredDepth, DEFAULT_MAX_DEPTH, DEFAULT_TIMEOUT};
pub use observer::LogObserver;
pub use queue::Crawler;
pub use report::{CrawlReport, PageOutcome};

// The "domain" two URLs are compared on: host, plus the port when the URL
// spells out a non-default one
//
// Examples:
//   https://Example.com/a      -> "example.com"
//   http://example.com:8080/a  -> "example.com:8080"
pub fn domain_of(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}

// Checks that `seed` can start a crawl and returns its origin domain
pub fn origin_domain(seed: &Url) -> Result<String> {
    if !matches!(seed.scheme(), "http" | "https") {
        return Err(AppError::invalid_seed(format!(
            "'{}' is not an http(s) URL",
            seed
        )));
    }

    match seed.host_str() {
        Some(host) if !host.is_empty() => Ok(domain_of(seed)),
        _ => Err(AppError::invalid_seed(format!("'{}' has no host", seed))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_of() {
        let url = Url::parse("https://Example.com/page").unwrap();
        assert_eq!(domain_of(&url), "example.com");

        let url = Url::parse("http://example.com:8080/page").unwrap();
        assert_eq!(domain_of(&url), "example.com:8080");

        // default port is dropped by the url crate
        let url = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(domain_of(&url), "example.com");
    }

    #[test]
    fn test_subdomain_is_a_different_domain() {
        let a = Url::parse("https://example.com/").unwrap();
        let b = Url::parse("https://www.example.com/").unwrap();
        assert_ne!(domain_of(&a), domain_of(&b));
    }

    #[test]
    fn test_origin_domain() {
        let seed = Url::parse("https://acme.io/start").unwrap();
        assert_eq!(origin_domain(&seed).unwrap(), "acme.io");
    }

    #[test]
    fn test_origin_domain_rejects_non_http() {
        let seed = Url::parse("mailto:someone@acme.io").unwrap();
        assert!(matches!(origin_domain(&seed), Err(AppError::InvalidSeed(_))));

        let seed = Url::parse("ftp://acme.io/").unwrap();
        assert!(origin_domain(&seed).is_err());
    }
}
