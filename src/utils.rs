//! Small helpers for logging and output-path validation.

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` characters are cut at a character boundary and
/// suffixed with `"…(+N bytes)"`, where `N` is the number of bytes dropped.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Ensure the directory that will hold `output` exists and is writable.
///
/// Creates the directory if missing, then writes and removes a probe file.
/// Run before scraping so a bad output path fails fast instead of after the
/// whole corpus has been fetched.
#[instrument(level = "info", skip_all, fields(path = %output.display()))]
pub async fn ensure_writable_parent(output: &Path) -> Result<(), Box<dyn Error>> {
    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).await?;

    let probe_path = dir.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.ends_with("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        assert_eq!(truncate_for_log("ææææ", 2), "ææ…(+4 bytes)");
    }

    #[tokio::test]
    async fn test_ensure_writable_parent_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("pages.json");

        ensure_writable_parent(&output).await.unwrap();

        assert!(dir.path().join("nested").is_dir());
        assert!(!dir.path().join("nested").join("..__probe_write__").exists());
    }
}
