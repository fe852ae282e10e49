//! Query loading from a line-oriented text file.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Lines at or below this many characters (after trimming) are discarded.
const MIN_QUERY_CHARS: usize = 3;

/// Failure to produce any queries. Fatal to the run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read queries from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no usable queries in {path}")]
    Empty { path: PathBuf },
}

/// Read queries from `path`, one per line.
///
/// Each line is trimmed; lines of three characters or fewer are dropped.
///
/// # Arguments
///
/// * `path` - Line-oriented text file of raw search queries
///
/// # Returns
///
/// The surviving queries in file order.
///
/// # Errors
///
/// - [`LoadError::Io`] if the file cannot be read
/// - [`LoadError::Empty`] if no line survives trimming and filtering
#[instrument(level = "info", fields(path = %path.display()))]
pub async fn load_queries(path: &Path) -> Result<Vec<String>, LoadError> {
    let raw = fs::read_to_string(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let queries = parse_queries(&raw);
    if queries.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    info!(count = queries.len(), "Loaded queries");
    Ok(queries)
}

/// Split `raw` into trimmed queries longer than three characters.
pub fn parse_queries(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|q| q.chars().count() > MIN_QUERY_CHARS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_queries_trims_and_filters() {
        let raw = "  rust async runtime  \nabc\n\n   \ngo\r\nbest python web framework\n";
        let queries = parse_queries(raw);
        assert_eq!(
            queries,
            vec!["rust async runtime", "best python web framework"]
        );
    }

    #[test]
    fn test_parse_queries_keeps_four_chars() {
        assert_eq!(parse_queries("abcd\nabc"), vec!["abcd"]);
    }

    #[tokio::test]
    async fn test_load_queries_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "how to install docker on ubuntu").unwrap();
        writeln!(file, "xy").unwrap();
        writeln!(file, "kubernetes pod networking").unwrap();

        let queries = load_queries(file.path()).await.unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0], "how to install docker on ubuntu");
    }

    #[tokio::test]
    async fn test_load_queries_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_queries(&dir.path().join("nope.txt")).await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_queries_only_short_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a\nbb\nccc\n").unwrap();

        let err = load_queries(file.path()).await.unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }
}
