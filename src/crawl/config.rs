// src/crawl/config.rs
// =============================================================================
// Knobs that shape a crawl. Every default reproduces the behaviour of the
// plain `mailcrawl <url>` invocation; the CLI can override each one.
// =============================================================================

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Same-domain pages deeper than this are never fetched
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Depth assigned to links taken from the deferred queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredDepth {
    /// Every deferred link restarts at this depth, wherever it was found
    Fixed(usize),
    /// A deferred link is one hop deeper than the page it was found on
    Inherit,
}

impl DeferredDepth {
    // Depth a cross-domain link gets when it was found on a page at
    // `found_at`
    pub fn depth_for(self, found_at: usize) -> usize {
        match self {
            DeferredDepth::Fixed(depth) => depth,
            DeferredDepth::Inherit => found_at + 1,
        }
    }
}

impl Default for DeferredDepth {
    fn default() -> Self {
        DeferredDepth::Fixed(1)
    }
}

impl fmt::Display for DeferredDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeferredDepth::Fixed(depth) => write!(f, "{}", depth),
            DeferredDepth::Inherit => write!(f, "inherit"),
        }
    }
}

// Parses "inherit" or a plain number, so clap can take it straight from
// the command line
impl FromStr for DeferredDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("inherit") {
            return Ok(DeferredDepth::Inherit);
        }

        s.parse::<usize>()
            .map(DeferredDepth::Fixed)
            .map_err(|_| format!("expected a depth or 'inherit', got '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    pub max_depth: usize,
    pub timeout: Duration,
    pub deferred_depth: DeferredDepth,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            timeout: DEFAULT_TIMEOUT,
            deferred_depth: DeferredDepth::default(),
        }
    }
}
