//! Data models shared by the ingest pipeline.
//!
//! - [`ScrapedPage`]: the result of a fully successful scrape of one URL
//! - [`Page`]: the corpus record written to the output JSON array
//! - [`Language`]: the closed set of corpus languages
//!
//! Field order on [`Page`] matches the order the bulk importer expects:
//! `title`, `url`, `language`, `last_updated`, `content`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A language the corpus is indexed in.
///
/// Anything detected outside this set is pinned to [`Language::English`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "da")]
    Danish,
}

impl Language {
    /// Two-letter ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Danish => "da",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Output of a successful fetch → extract → detect run for one URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedPage {
    pub title: String,
    pub url: String,
    pub content: String,
    pub language: Language,
}

/// One record of the emitted corpus.
///
/// Created only at collection time, after the scrape of its URL fully
/// succeeded; `last_updated` is the collection timestamp.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Page {
    /// Title of the extracted article (falls back to the URL when the document has none).
    pub title: String,
    /// The scraped URL; the downstream importer upserts on this key.
    pub url: String,
    /// Detected corpus language.
    pub language: Language,
    /// Collection time, formatted `YYYY-MM-DDTHH:MM:SS.mmmZ`.
    pub last_updated: String,
    /// Full extracted plain text.
    pub content: String,
}

impl Page {
    /// Stamp a scraped page with its collection time.
    pub fn collected(scraped: ScrapedPage, at: DateTime<Utc>) -> Self {
        Page {
            title: scraped.title,
            url: scraped.url,
            language: scraped.language,
            last_updated: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            content: scraped.content,
        }
    }
}
