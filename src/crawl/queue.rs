// src/crawl/queue.rs
// =============================================================================
// This module implements the crawl itself.
//
// How it works:
// 1. Start at the seed URL, depth 0
// 2. Fetch the page, look for email addresses, record any we find
// 3. Walk the page's links in document order:
//    - same domain as the seed: crawl it right now, one level deeper
//      (depth-first, so its whole subtree finishes before the next sibling)
//    - any other domain: push it onto the deferred queue
// 4. When the seed's tree is exhausted, pop the deferred queue front to back
//    and crawl each entry the same way (which may queue even more links)
//
// Two rules keep this finite:
// - a URL goes into `visited` before it is fetched, and nothing in
//   `visited` is fetched again
// - same-domain pages deeper than max_depth are never fetched
//
// Rust concepts:
// - Vec as a stack: replaces recursion, which async fns can't do directly
// - VecDeque: FIFO queue for the deferred cross-domain links
// - HashSet: O(1) "have we seen this URL?" checks
// =============================================================================

use regex::Regex;
use std::collections::{HashSet, VecDeque};
use url::Url;

use super::config::CrawlConfig;
use super::domain_of;
use super::observer::CrawlObserver;
use super::report::{CrawlReport, PageOutcome, SkipReason};
use crate::error::{FetchError, Result};
use crate::extract::{find_emails, parse_page};
use crate::fetch::Fetcher;
use crate::record::Recorder;

// Represents a page in the deferred queue
#[derive(Debug, Clone)]
struct CrawlItem {
    url: Url,
    depth: usize, // Depth the page will be crawled at
}

// A fetched page whose links we are still walking
struct Frame {
    depth: usize,
    links: std::vec::IntoIter<Url>,
}

// State that lives for exactly one call to `crawl`
struct CrawlRun<'r> {
    origin_domain: &'r str,
    filter: Option<&'r Regex>,
    visited: HashSet<String>,
    deferred: VecDeque<CrawlItem>,
    pages: Vec<PageOutcome>,
}

// Crawls a site and hands every email it finds to a Recorder
//
// The fetcher, recorder and observer are borrowed, so the caller still
// owns them (and can inspect them) once the crawl is over.
pub struct Crawler<'a> {
    fetcher: &'a dyn Fetcher,
    recorder: &'a mut dyn Recorder,
    observer: &'a mut dyn CrawlObserver,
    config: CrawlConfig,
}

impl<'a> Crawler<'a> {
    pub fn new(
        fetcher: &'a dyn Fetcher,
        recorder: &'a mut dyn Recorder,
        observer: &'a mut dyn CrawlObserver,
        config: CrawlConfig,
    ) -> Self {
        Self {
            fetcher,
            recorder,
            observer,
            config,
        }
    }

    // Crawls everything reachable from `seed`
    //
    // Parameters:
    //   seed: where to start
    //   origin_domain: links to this host:port are "same domain"
    //   filter: if given, only addresses matching it are recorded
    //
    // Returns: the outcome of every page, or an error if the recorder
    // failed (page-level network/parse failures never end the crawl)
    pub async fn crawl(
        &mut self,
        seed: &Url,
        origin_domain: &str,
        filter: Option<&Regex>,
    ) -> Result<CrawlReport> {
        let mut run = CrawlRun {
            origin_domain,
            filter,
            visited: HashSet::new(),
            deferred: VecDeque::new(),
            pages: Vec::new(),
        };

        // Links are compared without their fragment, so the seed is too
        let mut seed = seed.clone();
        seed.set_fragment(None);

        self.crawl_tree(&mut run, seed, 0).await?;

        if !run.deferred.is_empty() {
            self.observer.deferred_drain_started(run.deferred.len());
        }

        // The queue can keep growing while we drain it
        while let Some(item) = run.deferred.pop_front() {
            self.crawl_tree(&mut run, item.url, item.depth).await?;
        }

        let report = CrawlReport { pages: run.pages };
        self.observer.crawl_finished(&report);
        Ok(report)
    }

    // Depth-first walk of the same-domain pages below `url`
    //
    // Each stack frame keeps the rest of its page's links, so the pages are
    // visited in exactly the order plain recursion would visit them.
    async fn crawl_tree(&mut self, run: &mut CrawlRun<'_>, url: Url, depth: usize) -> Result<()> {
        let mut stack: Vec<Frame> = Vec::new();

        if let Some(frame) = self.visit(run, url, depth).await? {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let depth = frame.depth;
            let Some(link) = frame.links.next() else {
                stack.pop();
                continue;
            };

            // A sibling's subtree may have reached this link already
            if run.visited.contains(link.as_str()) {
                continue;
            }

            if domain_of(&link) == run.origin_domain {
                if let Some(child) = self.visit(run, link, depth + 1).await? {
                    stack.push(child);
                }
            } else {
                let deferred_depth = self.config.deferred_depth.depth_for(depth);
                self.observer.link_deferred(&link, deferred_depth);
                run.deferred.push_back(CrawlItem {
                    url: link,
                    depth: deferred_depth,
                });
            }
        }

        Ok(())
    }

    // Processes a single page
    //
    // Returns the page's links as a new frame, or None if the page was
    // skipped (already seen, too deep, fetch or parse failure)
    async fn visit(&mut self, run: &mut CrawlRun<'_>, url: Url, depth: usize) -> Result<Option<Frame>> {
        if run.visited.contains(url.as_str()) {
            self.skip(run, url, depth, SkipReason::AlreadyVisited);
            return Ok(None);
        }
        if depth > self.config.max_depth {
            self.skip(run, url, depth, SkipReason::DepthExceeded);
            return Ok(None);
        }

        // Mark before fetching so a page linking to itself is not requested twice
        run.visited.insert(url.to_string());
        self.observer.page_started(&url, depth);

        let html = match self.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(FetchError::Transport(failure)) => {
                self.skip(run, url, depth, SkipReason::Fetch(failure));
                return Ok(None);
            }
            Err(FetchError::Parse(message)) => {
                self.skip(run, url, depth, SkipReason::Parse(message));
                return Ok(None);
            }
        };

        let page = parse_page(&html, &url);
        let emails = find_emails(&page.text, run.filter);

        if !emails.is_empty() {
            self.observer.emails_found(&url, &emails);
            self.recorder.record(&url, &page.text, &emails)?;
        }

        run.pages.push(PageOutcome::Visited {
            url: url.to_string(),
            depth,
            emails,
            links: page.links.iter().map(Url::to_string).collect(),
        });

        Ok(Some(Frame {
            depth,
            links: page.links.into_iter(),
        }))
    }

    fn skip(&mut self, run: &mut CrawlRun<'_>, url: Url, depth: usize, reason: SkipReason) {
        self.observer.page_skipped(&url, depth, &reason);
        run.pages.push(PageOutcome::Skipped {
            url: url.to_string(),
            depth,
            reason,
        });
    }
}
