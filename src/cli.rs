// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   mailcrawl <SEED_URL> [FILTER]
//
// Everything else is an optional flag whose default matches the plain
// two-argument invocation.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use crate::crawl::{DeferredDepth, DEFAULT_MAX_DEPTH, DEFAULT_TIMEOUT};

#[derive(Parser, Debug)]
#[command(
    name = "mailcrawl",
    version,
    about = "Crawl a website and log the email addresses found on its pages",
    long_about = "mailcrawl walks every page reachable from the seed URL on the same domain \
                  (up to a depth limit), then follows the links it found to other domains. \
                  Each email address is logged together with the page it was found on."
)]
pub struct Cli {
    /// URL to start crawling from (e.g., https://example.com)
    pub seed_url: String,

    /// Only keep addresses matching this regular expression
    ///
    /// Example: mailcrawl https://example.com '@example\.com$'
    pub filter: Option<String>,

    /// Directory for the saved pages and emails_found.txt
    #[arg(long, default_value = "Scraper Output")]
    pub output_dir: PathBuf,

    /// Same-domain pages further than this many links from the seed are not fetched
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Depth given to links on other domains when they are crawled:
    /// a number, or 'inherit' for one deeper than the page they were found on
    #[arg(long, default_value_t = DeferredDepth::default())]
    pub deferred_depth: DeferredDepth,

    /// Print the crawl report as JSON when done
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mailcrawl", "https://acme.io"]).unwrap();
        assert_eq!(cli.seed_url, "https://acme.io");
        assert_eq!(cli.filter, None);
        assert_eq!(cli.output_dir, PathBuf::from("Scraper Output"));
        assert_eq!(cli.max_depth, 2);
        assert_eq!(cli.timeout, 10);
        assert_eq!(cli.deferred_depth, DeferredDepth::Fixed(1));
        assert!(!cli.json);
    }

    #[test]
    fn test_filter_and_flags() {
        let cli = Cli::try_parse_from([
            "mailcrawl",
            "https://acme.io",
            r"@acme\.io$",
            "--deferred-depth",
            "inherit",
            "--max-depth",
            "3",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.filter.as_deref(), Some(r"@acme\.io$"));
        assert_eq!(cli.deferred_depth, DeferredDepth::Inherit);
        assert_eq!(cli.max_depth, 3);
        assert!(cli.json);
    }

    #[test]
    fn test_seed_is_required() {
        assert!(Cli::try_parse_from(["mailcrawl"]).is_err());
    }

    #[test]
    fn test_bad_deferred_depth() {
        let result = Cli::try_parse_from(["mailcrawl", "https://acme.io", "--deferred-depth", "x"]);
        assert!(result.is_err());
    }
}
