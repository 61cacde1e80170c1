// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (env_logger, RUST_LOG overrides --verbose)
// 3. Validate the seed URL and the optional filter pattern
// 4. Run the crawl, recording emails into the output directory
// 5. Print a per-page table (or JSON) and exit
//
// Exit codes: 0 when the crawl ran to the end, however many pages failed;
// 2 when it couldn't start or couldn't write its output.
// =============================================================================

mod cli;
mod crawl;
mod error;
mod extract;
mod fetch;
mod record;

use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use std::time::Duration;
use url::Url;

use cli::Cli;
use crawl::{CrawlConfig, CrawlReport, Crawler, LogObserver, PageOutcome};
use error::AppError;
use fetch::HttpFetcher;
use record::{FileRecorder, EMAIL_LOG_FILE};

// Pages are fetched one at a time, so a single-threaded runtime is enough
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let seed = Url::parse(&cli.seed_url)
        .map_err(AppError::from)
        .with_context(|| format!("Invalid URL '{}'", cli.seed_url))?;
    let origin_domain = crawl::origin_domain(&seed)?;

    let filter = cli
        .filter
        .as_deref()
        .map(Regex::new)
        .transpose()
        .map_err(AppError::from)?;

    let config = CrawlConfig {
        max_depth: cli.max_depth,
        timeout: Duration::from_secs(cli.timeout),
        deferred_depth: cli.deferred_depth,
    };

    let fetcher = HttpFetcher::new(config.timeout)?;
    let mut recorder = FileRecorder::new(&cli.output_dir).with_context(|| {
        format!("Cannot create output directory {}", cli.output_dir.display())
    })?;
    let mut observer = LogObserver;

    log::info!("Crawling {} (domain {})", seed, origin_domain);
    log::info!(
        "Max depth {}, deferred links at depth {}, timeout {}s",
        config.max_depth,
        config.deferred_depth,
        cli.timeout
    );

    let report = Crawler::new(&fetcher, &mut recorder, &mut observer, config)
        .crawl(&seed, &origin_domain, filter.as_ref())
        .await?;

    log::info!(
        "Results written to {}",
        recorder.output_dir().join(EMAIL_LOG_FILE).display()
    );

    print_report(&report, cli.json)?;
    Ok(())
}

// Prints the report either as a table or JSON
fn print_report(report: &CrawlReport, json: bool) -> error::Result<()> {
    if json {
        let output = serde_json::json!({
            "summary": report.summary(),
            "pages": &report.pages,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_table(report);
    }
    Ok(())
}

// Prints every page as a human-readable table in the terminal
fn print_table(report: &CrawlReport) {
    println!("{:<60} {:<6} {:<40}", "URL", "DEPTH", "RESULT");
    println!("{}", "=".repeat(106));

    for page in &report.pages {
        let (depth, result) = match page {
            PageOutcome::Visited { depth, emails, .. } => {
                (*depth, format!("✅ {} email(s)", emails.len()))
            }
            PageOutcome::Skipped { depth, reason, .. } => (*depth, format!("⏭️  {}", reason)),
        };

        // Truncate URL if too long for display (URLs serialize as ASCII)
        let url = page.url();
        let url_display = if url.len() > 57 {
            format!("{}...", &url[..57])
        } else {
            url.to_string()
        };

        println!("{:<60} {:<6} {:<40}", url_display, depth, result);
    }

    println!();

    let summary = report.summary();
    println!("📊 Summary:");
    println!("   📄 Fetched: {}", summary.pages_fetched);
    println!("   ❌ Failed: {}", summary.pages_failed);
    println!("   ⏭️  Skipped: {}", summary.pages_skipped);
    println!("   📧 Emails: {}", summary.emails.len());
    for email in &summary.emails {
        println!("      {}", email);
    }
}
