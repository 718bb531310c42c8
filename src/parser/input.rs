//! The page list: one page URL per line.

use std::path::Path;

use tracing::debug;

use super::error::InputError;

/// One page to process, taken from a single line of the input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageJob {
    /// The page URL, exactly as written (after trimming).
    pub source_url: String,
}

impl PageJob {
    /// Creates a job for `source_url`.
    #[must_use]
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
        }
    }
}

/// Splits input text into page jobs.
///
/// Lines are trimmed and blank lines skipped. Nothing is validated here;
/// malformed URLs fail later when the page is fetched.
#[must_use]
pub fn parse_page_list(text: &str) -> Vec<PageJob> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PageJob::new)
        .collect()
}

/// Reads and parses the page list at `path`.
///
/// # Errors
///
/// Returns [`InputError`] when the file is missing or cannot be read as UTF-8 text.
pub async fn read_page_list(path: &Path) -> Result<Vec<PageJob>, InputError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| InputError::from_io(path, e))?;
    let jobs = parse_page_list(&text);
    debug!(path = %path.display(), pages = jobs.len(), "input list loaded");
    Ok(jobs)
}
