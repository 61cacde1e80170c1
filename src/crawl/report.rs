// src/crawl/report.rs
// =============================================================================
// What happened to every page the crawler touched.
//
// A failed page is not an error for the crawl as a whole; it shows up here as
// a Skipped outcome with the reason attached, so callers (and tests) can
// look at exactly why a page was left out.
// =============================================================================

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::FetchFailure;

// Why a page was not processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// Already fetched earlier in this run
    AlreadyVisited,
    /// Further from the seed than the depth limit allows
    DepthExceeded,
    /// The request failed
    Fetch(FetchFailure),
    /// The response body couldn't be read
    Parse(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyVisited => write!(f, "already visited"),
            SkipReason::DepthExceeded => write!(f, "depth limit exceeded"),
            SkipReason::Fetch(failure) => write!(f, "request failed: {}", failure),
            SkipReason::Parse(message) => write!(f, "could not parse page: {}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageOutcome {
    Visited {
        url: String,
        depth: usize,
        emails: BTreeSet<String>,
        /// Crawlable links on the page, in document order
        links: Vec<String>,
    },
    Skipped {
        url: String,
        depth: usize,
        reason: SkipReason,
    },
}

impl PageOutcome {
    pub fn url(&self) -> &str {
        match self {
            PageOutcome::Visited { url, .. } | PageOutcome::Skipped { url, .. } => url,
        }
    }

    // True if a request went out for this page, whether or not it worked
    pub fn was_fetched(&self) -> bool {
        match self {
            PageOutcome::Visited { .. } => true,
            PageOutcome::Skipped { reason, .. } => {
                matches!(reason, SkipReason::Fetch(_) | SkipReason::Parse(_))
            }
        }
    }
}

// Per-page outcomes of one crawl, in the order they happened
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    pub pages: Vec<PageOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlSummary {
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub pages_skipped: usize,
    pub emails: BTreeSet<String>,
}

impl CrawlReport {
    // URLs a request was sent for, in request order
    pub fn fetched_urls(&self) -> Vec<&str> {
        self.pages
            .iter()
            .filter(|page| page.was_fetched())
            .map(PageOutcome::url)
            .collect()
    }

    // Every distinct address found during the run
    pub fn emails(&self) -> BTreeSet<String> {
        self.pages
            .iter()
            .filter_map(|page| match page {
                PageOutcome::Visited { emails, .. } => Some(emails),
                PageOutcome::Skipped { .. } => None,
            })
            .flatten()
            .cloned()
            .collect()
    }

    pub fn summary(&self) -> CrawlSummary {
        let pages_fetched = self.fetched_urls().len();
        let pages_visited = self
            .pages
            .iter()
            .filter(|p| matches!(p, PageOutcome::Visited { .. }))
            .count();

        CrawlSummary {
            pages_fetched,
            pages_failed: pages_fetched - pages_visited,
            pages_skipped: self.pages.len() - pages_fetched,
            emails: self.emails(),
        }
    }
}
