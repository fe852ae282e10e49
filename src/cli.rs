//! Command-line interface definitions for search ingest.
//!
//! Every option can be given as a flag or through its environment variable.
//! Defaults reproduce the standard run: `queries.txt` in, `pages.json` out,
//! topics need 3 queries, 5 URLs per topic, 4 scrapes in flight, 15 s fetch
//! timeout.

use crate::ingest::topics::DEFAULT_MAX_URLS_PER_TOPIC;
use crate::pipeline::{DEFAULT_CONCURRENCY, DEFAULT_MIN_TOPIC_QUERIES, IngestSettings};
use crate::scrapers::fetch::{DEFAULT_FETCH_TIMEOUT, DEFAULT_USER_AGENT};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for the ingest run.
///
/// # Examples
///
/// ```sh
/// # Defaults: queries.txt -> pages.json
/// search_ingest
///
/// # Reproducible URL sampling, wider pool
/// search_ingest -q data/queries.txt -o out/pages.json --seed 42 --concurrency 8
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Line-oriented file of raw search queries
    #[arg(short, long, env = "INGEST_QUERIES", default_value = "queries.txt")]
    pub queries: PathBuf,

    /// Path of the JSON page corpus to write
    #[arg(short, long, env = "INGEST_OUTPUT", default_value = "pages.json")]
    pub output: PathBuf,

    /// Minimum contributing queries for a topic to be scraped
    #[arg(long, env = "INGEST_MIN_TOPIC_QUERIES", default_value_t = DEFAULT_MIN_TOPIC_QUERIES)]
    pub min_topic_queries: usize,

    /// Maximum candidate URLs sampled per topic
    #[arg(long, env = "INGEST_MAX_URLS_PER_TOPIC", default_value_t = DEFAULT_MAX_URLS_PER_TOPIC)]
    pub max_urls_per_topic: usize,

    /// Maximum simultaneously in-flight scrapes
    #[arg(short, long, env = "INGEST_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request fetch timeout in seconds
    #[arg(long, env = "INGEST_FETCH_TIMEOUT_SECS", default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs())]
    pub fetch_timeout_secs: u64,

    /// User-Agent header sent with every fetch
    #[arg(long, env = "INGEST_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Seed for candidate URL sampling (random when omitted)
    #[arg(long, env = "INGEST_SEED")]
    pub seed: Option<u64>,
}

impl Cli {
    /// Pipeline tunables, with zero caps and pool sizes clamped to 1.
    pub fn settings(&self) -> IngestSettings {
        IngestSettings {
            min_topic_queries: self.min_topic_queries,
            max_urls_per_topic: self.max_urls_per_topic.max(1),
            concurrency: self.concurrency.max(1),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["search_ingest"]);

        assert_eq!(cli.queries, PathBuf::from("queries.txt"));
        assert_eq!(cli.output, PathBuf::from("pages.json"));
        assert_eq!(cli.fetch_timeout(), Duration::from_secs(15));
        assert_eq!(cli.user_agent, "search-ingest/1.0");
        assert_eq!(cli.seed, None);
        assert_eq!(cli.settings(), IngestSettings::default());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "search_ingest",
            "-q",
            "/tmp/q.txt",
            "-o",
            "/tmp/out/pages.json",
            "--min-topic-queries",
            "2",
            "--max-urls-per-topic",
            "3",
            "-c",
            "8",
            "--seed",
            "42",
        ]);

        assert_eq!(cli.queries, PathBuf::from("/tmp/q.txt"));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(
            cli.settings(),
            IngestSettings {
                min_topic_queries: 2,
                max_urls_per_topic: 3,
                concurrency: 8,
            }
        );
    }

    #[test]
    fn test_cli_clamps_zero_pool() {
        let cli = Cli::parse_from(["search_ingest", "--concurrency", "0", "--max-urls-per-topic", "0"]);
        assert_eq!(cli.settings().concurrency, 1);
        assert_eq!(cli.settings().max_urls_per_topic, 1);
    }
}
