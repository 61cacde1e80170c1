// src/crawl/observer.rs
// =============================================================================
// Progress hooks for the crawler.
//
// The crawler never logs on its own; it reports events to whatever observer
// it was built with. The binary passes LogObserver, which forwards to the
// `log` facade (env_logger prints it). Tests pass an observer that just
// remembers what it saw.
// =============================================================================

use std::collections::BTreeSet;
use url::Url;

use super::report::{CrawlReport, SkipReason};

// Every hook has an empty default, so an observer only implements what it
// cares about
pub trait CrawlObserver {
    fn page_started(&mut self, _url: &Url, _depth: usize) {}

    fn emails_found(&mut self, _url: &Url, _emails: &BTreeSet<String>) {}

    fn page_skipped(&mut self, _url: &Url, _depth: usize, _reason: &SkipReason) {}

    fn link_deferred(&mut self, _url: &Url, _depth: usize) {}

    fn deferred_drain_started(&mut self, _pending: usize) {}

    fn crawl_finished(&mut self, _report: &CrawlReport) {}
}

// Observer that writes each event to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl CrawlObserver for LogObserver {
    fn page_started(&mut self, url: &Url, depth: usize) {
        log::info!("Scraping URL: {}, Depth: {}", url, depth);
    }

    fn emails_found(&mut self, url: &Url, emails: &BTreeSet<String>) {
        log::info!("Emails found on {}: {:?}", url, emails);
    }

    fn page_skipped(&mut self, url: &Url, depth: usize, reason: &SkipReason) {
        match reason {
            SkipReason::Fetch(failure) => log::error!("Request failed for {}: {}", url, failure),
            SkipReason::Parse(message) => {
                log::error!("Error parsing HTML for URL {}: {}", url, message)
            }
            SkipReason::AlreadyVisited | SkipReason::DepthExceeded => {
                log::debug!("Skipping {} at depth {}: {}", url, depth, reason)
            }
        }
    }

    fn link_deferred(&mut self, url: &Url, depth: usize) {
        log::debug!("Deferring cross-domain link {} (depth {})", url, depth);
    }

    fn deferred_drain_started(&mut self, pending: usize) {
        log::info!("Same-domain pages done, following {} deferred link(s)", pending);
    }

    fn crawl_finished(&mut self, report: &CrawlReport) {
        let summary = report.summary();
        log::info!(
            "Crawl finished: {} page(s) fetched, {} failed, {} unique email(s)",
            summary.pages_fetched,
            summary.pages_failed,
            summary.emails.len()
        );
    }
}
