//! Per-URL scraping: fetch, extract, detect language.
//!
//! Each URL moves through a small sequential state machine:
//!
//! ```text
//! Fetching ──▶ Extracting ──▶ DetectingLanguage ──▶ Succeeded
//!    │             │
//!    └─────────────┴──▶ Failed
//! ```
//!
//! Each stage hands its typed result to the next only on success. A failure
//! in any stage stops that URL and surfaces exactly one [`ScrapeError`];
//! there is no partial result. Language detection cannot fail.
//!
//! # Submodules
//!
//! - [`fetch`]: HTTP GET with timeout and identifying `User-Agent`
//! - [`extract`]: readability-style main-content extraction
//! - [`language`]: corpus language classification

pub mod extract;
pub mod fetch;
pub mod language;

use crate::models::ScrapedPage;
use extract::{ExtractError, extract_content};
use fetch::{FetchError, FetchHtml};
use language::detect_language;
use std::fmt;
use thiserror::Error;
use tracing::{debug, instrument};

/// Stage of a single URL's scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeStage {
    Fetching,
    Extracting,
    DetectingLanguage,
}

impl fmt::Display for ScrapeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScrapeStage::Fetching => "fetch",
            ScrapeStage::Extracting => "extract",
            ScrapeStage::DetectingLanguage => "detect_language",
        })
    }
}

/// The one failure a scrape reports to its caller.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

impl ScrapeError {
    /// The stage the scrape stopped in.
    pub fn stage(&self) -> ScrapeStage {
        match self {
            ScrapeError::Fetch(_) => ScrapeStage::Fetching,
            ScrapeError::Extract(_) => ScrapeStage::Extracting,
        }
    }
}

/// Anything that turns a URL into a [`ScrapedPage`] as one failable unit.
pub trait PageSource {
    async fn scrape(&self, url: &str) -> Result<ScrapedPage, ScrapeError>;
}

/// The production [`PageSource`]: fetch, then extract, then detect language.
#[derive(Debug, Clone)]
pub struct Scraper<F> {
    fetcher: F,
}

impl<F: FetchHtml> Scraper<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }
}

impl<F: FetchHtml> PageSource for Scraper<F> {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn scrape(&self, url: &str) -> Result<ScrapedPage, ScrapeError> {
        debug!(stage = %ScrapeStage::Fetching, "Scrape stage");
        let html = self.fetcher.fetch_html(url).await?;

        debug!(stage = %ScrapeStage::Extracting, bytes = html.len(), "Scrape stage");
        let extracted = extract_content(&html, url)?;

        debug!(stage = %ScrapeStage::DetectingLanguage, chars = extracted.content.len(), "Scrape stage");
        let language = detect_language(&extracted.content);

        Ok(ScrapedPage {
            title: extracted.title,
            url: url.to_string(),
            content: extracted.content,
            language,
        })
    }
}
