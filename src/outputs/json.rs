//! JSON sink for the collected page corpus.
//!
//! The corpus is a single pretty-printed JSON array, one object per page:
//!
//! ```text
//! [
//!   {
//!     "title": "...",
//!     "url": "...",
//!     "language": "en",
//!     "last_updated": "2025-05-06T07:08:09.000Z",
//!     "content": "..."
//!   }
//! ]
//! ```
//!
//! A bulk importer upserts these records keyed by `url`.

use crate::models::Page;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `pages` as a pretty-printed JSON array to `path`.
///
/// # Arguments
///
/// * `pages` - The collected corpus; an empty slice is written as `[]`
/// * `path` - Output file; its parent directory is created if missing
///
/// # Returns
///
/// `Ok(())` once the file has been written.
///
/// # Errors
///
/// Returns an error if serialization fails, the parent directory cannot be
/// created, or the file cannot be written.
#[instrument(level = "info", skip_all, fields(path = %path.display(), pages = pages.len()))]
pub async fn write_pages(pages: &[Page], path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(pages)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!("Wrote page corpus");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;

    fn page(url: &str) -> Page {
        Page {
            title: "Web framework".to_string(),
            url: url.to_string(),
            language: Language::English,
            last_updated: "2025-05-06T07:08:09.000Z".to_string(),
            content: "A web framework is a software framework.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_write_pages_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("pages.json");
        let pages = vec![
            page("https://en.wikipedia.org/wiki/web_framework"),
            page("https://dev.to/search?q=web%20framework"),
        ];

        write_pages(&pages, &path).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n  {"));
        let back: Vec<Page> = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, pages);
    }

    #[tokio::test]
    async fn test_write_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.json");

        write_pages(&[], &path).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
