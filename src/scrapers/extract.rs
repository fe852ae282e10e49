//! Readable-content extraction stage.
//!
//! Runs Mozilla's readability algorithm over the fetched document and keeps
//! the article title and its plain text. Titles missing from the readability
//! result fall back to the document's `og:title`, then `<title>`, then the URL.
//!
//! A document counts as having readable content when the extracted text has
//! at least one non-whitespace character after trimming. Anything shorter,
//! including an extraction that yields nothing, is [`ExtractError::NoContent`].
//! Short but non-empty text such as a single word is kept.

use scraper::{Html, Selector};
use std::io::Cursor;
use thiserror::Error;
use url::Url;

/// Failure to find readable content in a document.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid document URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("document could not be parsed for readable content")]
    Unreadable,
    #[error("no readable text content")]
    NoContent,
}

/// Title and body text of a document's main content.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub title: String,
    pub content: String,
}

/// Extract the main readable content of `html`, fetched from `url`.
pub fn extract_content(html: &str, url: &str) -> Result<Extracted, ExtractError> {
    let base = Url::parse(url)?;
    let mut cursor = Cursor::new(html.as_bytes());
    let product =
        readability::extractor::extract(&mut cursor, &base).map_err(|_| ExtractError::Unreadable)?;

    let content = readable_text(&product.text)?.to_string();

    let title = match product.title.trim() {
        "" => fallback_title(html).unwrap_or_else(|| url.to_string()),
        t => t.to_string(),
    };

    Ok(Extracted { title, content })
}

/// Trimmed readable text, or [`ExtractError::NoContent`] when nothing is left.
fn readable_text(raw: &str) -> Result<&str, ExtractError> {
    match raw.trim() {
        "" => Err(ExtractError::NoContent),
        text => Ok(text),
    }
}

fn fallback_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let og_selector = Selector::parse(r#"meta[property="og:title"]"#).ok()?;
    let og = document
        .select(&og_selector)
        .filter_map(|m| m.value().attr("content"))
        .map(str::trim)
        .find(|t| !t.is_empty());
    if let Some(t) = og {
        return Some(t.to_string());
    }

    let title_selector = Selector::parse("title").ok()?;
    document
        .select(&title_selector)
        .map(|t| t.text().collect::<String>().trim().to_string())
        .find(|t| !t.is_empty())
}
