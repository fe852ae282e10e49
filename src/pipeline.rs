//! End-to-end ingest orchestration.
//!
//! ```text
//! queries ──▶ cluster ──▶ filter weak topics ──▶ resolve URLs
//!         ──▶ dedup + bounded scrape ──▶ collect pages
//! ```
//!
//! Shared run state lives in an explicit [`IngestContext`] rather than in
//! globals, so a pipeline can be run more than once in the same process.
//!
//! # Concurrency
//!
//! Scrape jobs are pulled lazily from the candidate list into a
//! `buffer_unordered` pool of `concurrency` slots. A job is only pulled when a
//! slot is free, and its URL is claimed in the seen set at that moment. The
//! claim is a single insert on a concurrent set, so a URL resolved by several
//! topics is dispatched once. Results are collected in completion order.
//!
//! # Failure isolation
//!
//! A failed scrape is logged and counted; it never stops other jobs or the run.
//! A scrape that panics is caught at the job boundary and treated the same way.

use crate::ingest::cluster::cluster_queries;
use crate::ingest::topics::{DEFAULT_MAX_URLS_PER_TOPIC, TopicUrlResolver};
use crate::models::Page;
use crate::scrapers::PageSource;
use crate::utils::truncate_for_log;
use chrono::Utc;
use dashmap::DashSet;
use futures::FutureExt;
use futures::stream::{self, StreamExt};
use rand::Rng;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::pin::pin;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Default minimum number of contributing queries for a topic to be scraped.
pub const DEFAULT_MIN_TOPIC_QUERIES: usize = 3;

/// Default number of simultaneously in-flight scrapes.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Tunables of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSettings {
    pub min_topic_queries: usize,
    pub max_urls_per_topic: usize,
    pub concurrency: usize,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            min_topic_queries: DEFAULT_MIN_TOPIC_QUERIES,
            max_urls_per_topic: DEFAULT_MAX_URLS_PER_TOPIC,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// URLs already dispatched in this run.
#[derive(Debug, Clone, Default)]
pub struct SeenUrls(Arc<DashSet<String>>);

impl SeenUrls {
    /// Mark `url` as seen. Returns `true` only for the first caller.
    pub fn claim(&self, url: &str) -> bool {
        self.0.insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Shared state threaded through one run.
#[derive(Debug, Clone, Default)]
pub struct IngestContext {
    pub settings: IngestSettings,
    pub seen: SeenUrls,
}

impl IngestContext {
    pub fn new(settings: IngestSettings) -> Self {
        Self {
            settings,
            seen: SeenUrls::default(),
        }
    }
}

/// What a run produced.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Successfully scraped pages, in completion order.
    pub pages: Vec<Page>,
    pub topics_found: usize,
    pub topics_kept: usize,
    /// Candidate URLs resolved across all kept topics, duplicates included.
    pub candidates: usize,
    pub dispatched: usize,
    pub duplicates_skipped: usize,
    pub failed: usize,
}

#[derive(Debug)]
struct ScrapeJob {
    topic: String,
    url: String,
}

/// Run the ingest pipeline over already-loaded `queries`.
///
/// Topics below `min_topic_queries` are dropped, each kept topic is resolved
/// to at most `max_urls_per_topic` candidate URLs with `rng`, and every
/// not-yet-seen URL is scraped through `source` with at most `concurrency`
/// scrapes in flight.
///
/// # Arguments
///
/// * `queries` - Raw queries as loaded, in input order
/// * `ctx` - Run settings and the seen-URL set shared by all jobs
/// * `resolver` - Template catalog used to derive candidate URLs per topic
/// * `rng` - Random source for URL sampling; seed it for reproducible runs
/// * `source` - Scrapes one URL into a [`ScrapedPage`](crate::models::ScrapedPage)
///
/// # Returns
///
/// An [`IngestReport`] with the collected pages in completion order and the
/// run counters. The call returns only after every dispatched scrape has
/// resolved.
///
/// # Errors
///
/// None. Scrape failures and panics are logged, counted in
/// [`IngestReport::failed`] and left out of the pages.
#[instrument(level = "info", skip_all, fields(queries = queries.len()))]
pub async fn run_ingest<S, R>(
    queries: &[String],
    ctx: &IngestContext,
    resolver: &TopicUrlResolver,
    rng: &mut R,
    source: &S,
) -> IngestReport
where
    S: PageSource,
    R: Rng + ?Sized,
{
    let settings = &ctx.settings;
    let clusters = cluster_queries(queries);
    info!(topics = clusters.len(), "Found topics");

    let kept = clusters.with_min_queries(settings.min_topic_queries);
    info!(
        kept = kept.len(),
        min_topic_queries = settings.min_topic_queries,
        "Kept topics above threshold"
    );

    let jobs: Vec<ScrapeJob> = kept
        .iter()
        .flat_map(|topic| {
            let mut urls = resolver.resolve(&topic.key, &mut *rng);
            urls.truncate(settings.max_urls_per_topic);
            debug!(topic = %topic.key, queries = topic.queries.len(), urls = ?urls, "Resolved candidate URLs");
            urls.into_iter().map(move |url| ScrapeJob {
                topic: topic.key.clone(),
                url,
            })
        })
        .collect();

    let mut report = IngestReport {
        topics_found: clusters.len(),
        topics_kept: kept.len(),
        candidates: jobs.len(),
        ..Default::default()
    };

    let seen = &ctx.seen;
    let completed = stream::iter(jobs)
        .filter(|job| {
            let fresh = seen.claim(&job.url);
            if !fresh {
                debug!(topic = %job.topic, url = %job.url, "URL already dispatched");
            }
            std::future::ready(fresh)
        })
        .map(|job| async move {
            let result = AssertUnwindSafe(source.scrape(&job.url))
                .catch_unwind()
                .await;
            (job, result)
        })
        .buffer_unordered(settings.concurrency.max(1));
    let mut completed = pin!(completed);

    while let Some((job, result)) = completed.next().await {
        report.dispatched += 1;
        match result {
            Ok(Ok(scraped)) => {
                info!(topic = %job.topic, url = %job.url, "Collected");
                debug!(
                    url = %job.url,
                    language = %scraped.language,
                    preview = %truncate_for_log(&scraped.content, 120),
                    "Collected content"
                );
                report.pages.push(Page::collected(scraped, Utc::now()));
            }
            Ok(Err(e)) => {
                warn!(url = %job.url, stage = %e.stage(), error = %e, "Skipped");
                report.failed += 1;
            }
            Err(panic) => {
                error!(
                    url = %job.url,
                    panic = %panic_message(panic.as_ref()),
                    "Skipped after scrape panicked"
                );
                report.failed += 1;
            }
        }
    }

    report.duplicates_skipped = report.candidates - report.dispatched;
    report
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg
    } else {
        "non-string panic payload"
    }
}
