//! # Search Ingest
//!
//! Builds a page corpus for a search index from raw user search queries.
//!
//! ## Usage
//!
//! ```sh
//! search_ingest -q queries.txt -o pages.json
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Loading**: Read raw queries, one per line
//! 2. **Clustering**: Group queries into topics by their tail n-grams
//! 3. **Resolving**: Sample candidate source URLs for every strong topic
//! 4. **Scraping**: Fetch, extract and language-tag each unseen URL (4 at a time)
//! 5. **Output**: Write the collected pages as a JSON array
//!
//! Only a failure to load queries (or to write the output) aborts the run.
//! Every per-URL failure is logged and skipped.

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod ingest;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use ingest::loader::load_queries;
use ingest::topics::TopicUrlResolver;
use outputs::json;
use pipeline::{IngestContext, run_ingest};
use scrapers::Scraper;
use scrapers::fetch::HttpFetcher;
use utils::ensure_writable_parent;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("search_ingest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // Early check: a bad output path should fail before any fetching
    if let Err(e) = ensure_writable_parent(&args.output).await {
        error!(
            path = %args.output.display(),
            error = %e,
            "Output location is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Load ----
    let queries = load_queries(&args.queries).await.inspect_err(|e| {
        error!(error = %e, "Failed to load queries; aborting");
    })?;

    // ---- Cluster, resolve, scrape ----
    let settings = args.settings();
    let ctx = IngestContext::new(settings.clone());
    let resolver = TopicUrlResolver::new(settings.max_urls_per_topic);
    let mut rng = match args.seed {
        Some(seed) => {
            info!(seed, "Seeded URL sampling");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };
    let fetcher = HttpFetcher::new(args.fetch_timeout(), &args.user_agent)?;
    let scraper = Scraper::new(fetcher);

    info!(
        concurrency = settings.concurrency,
        min_topic_queries = settings.min_topic_queries,
        max_urls_per_topic = settings.max_urls_per_topic,
        "Starting ingest"
    );
    let report = run_ingest(&queries, &ctx, &resolver, &mut rng, &scraper).await;

    info!(
        topics_found = report.topics_found,
        topics_kept = report.topics_kept,
        candidates = report.candidates,
        dispatched = report.dispatched,
        duplicates_skipped = report.duplicates_skipped,
        collected = report.pages.len(),
        failed = report.failed,
        seen_urls = ctx.seen.len(),
        "Completed scraping"
    );

    // ---- Output ----
    if let Err(e) = json::write_pages(&report.pages, &args.output).await {
        error!(path = %args.output.display(), error = %e, "Failed to write page corpus");
        return Err(e);
    }
    info!(
        pages = report.pages.len(),
        path = %args.output.display(),
        "Saved pages"
    );

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
