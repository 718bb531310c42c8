//! Error types for page resolution.

use thiserror::Error;

use crate::download::FetchError;

/// The page was fetched but does not have the shape we need.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// No `<h1>` element on the page.
    #[error("no <h1> heading found on {url}\n  Suggestion: Check that the page lists downloads under a top-level heading")]
    MissingHeading {
        /// The page URL.
        url: String,
    },

    /// The `<h1>` exists but nothing usable remains after sanitization.
    #[error("heading '{heading}' on {url} is empty after removing invalid folder-name characters")]
    EmptyHeading {
        /// The page URL.
        url: String,
        /// The raw heading text.
        heading: String,
    },
}

impl ParseError {
    /// Creates a `MissingHeading` error.
    #[must_use]
    pub fn missing_heading(url: &str) -> Self {
        Self::MissingHeading {
            url: url.to_string(),
        }
    }

    /// Creates an `EmptyHeading` error.
    #[must_use]
    pub fn empty_heading(url: &str, heading: &str) -> Self {
        Self::EmptyHeading {
            url: url.to_string(),
            heading: heading.to_string(),
        }
    }
}

/// Errors that can occur while resolving a page into download links.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_heading_display_names_url() {
        let error = ParseError::missing_heading("https://x.test/page");
        let msg = error.to_string();
        assert!(msg.contains("<h1>"), "Expected heading hint in: {msg}");
        assert!(msg.contains("https://x.test/page"), "Expected URL in: {msg}");
    }

    #[test]
    fn test_empty_heading_display_includes_raw_text() {
        let error = ParseError::empty_heading("https://x.test/page", "???");
        assert!(error.to_string().contains("'???'"));
    }

    #[test]
    fn test_resolve_error_is_transparent() {
        let error: ResolveError = ParseError::missing_heading("https://x.test/p").into();
        assert_eq!(
            error.to_string(),
            ParseError::missing_heading("https://x.test/p").to_string()
        );
    }
}
