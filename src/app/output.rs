//! User-facing messages for the three failure classes and the final summary.

use std::path::Path;

use pagegrab_core::{BatchError, InputError, RunSummary};

/// Truncates text to at most `width` chars, appending ellipsis if truncated.
pub(crate) fn truncate_to_width(text: &str, width: usize) -> String {
    let text_len = text.chars().count();
    if text_len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    if width == 1 {
        return "…".to_string();
    }

    let mut output: String = text.chars().take(width - 1).collect();
    output.push('…');
    output
}

/// Message for an input list that could not be loaded.
pub(crate) fn input_error_message(error: &InputError) -> String {
    match error {
        InputError::NotFound { path } => format!("Input file not found: {}", path.display()),
        InputError::Unreadable { path, source } => {
            format!("Input file unreadable: {}: {source}", path.display())
        }
    }
}

/// Message for a run that stopped early.
pub(crate) fn run_failure_message(error: &BatchError) -> String {
    match error {
        BatchError::Cancelled => "Download cancelled.".to_string(),
        other => format!("Download failed: {other}"),
    }
}

/// Message for a run that finished.
pub(crate) fn summary_message(summary: &RunSummary, output_dir: &Path) -> String {
    format!(
        "Downloaded {} file(s) from {} page(s) into {}",
        summary.files,
        summary.pages,
        output_dir.display()
    )
}
