//! Error type for batch runs.

use thiserror::Error;
use tokio::task::JoinError;

use crate::download::{FetchError, FetchFileError, WriteError};
use crate::resolver::{ParseError, ResolveError};

/// Why a run stopped before finishing.
///
/// Resolver and fetcher failures are carried through untouched, so callers
/// can still match on the original [`FetchError`], [`ParseError`] or
/// [`WriteError`].
#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Write(#[from] WriteError),

    /// The run was cancelled through its handle.
    #[error("run cancelled")]
    Cancelled,

    /// The worker task panicked or was aborted.
    #[error("download worker stopped unexpectedly: {0}")]
    Worker(String),
}

impl From<ResolveError> for BatchError {
    fn from(error: ResolveError) -> Self {
        match error {
            ResolveError::Fetch(e) => Self::Fetch(e),
            ResolveError::Parse(e) => Self::Parse(e),
        }
    }
}

impl From<FetchFileError> for BatchError {
    fn from(error: FetchFileError) -> Self {
        match error {
            FetchFileError::Fetch(e) => Self::Fetch(e),
            FetchFileError::Write(e) => Self::Write(e),
            FetchFileError::Cancelled { .. } => Self::Cancelled,
        }
    }
}

impl From<JoinError> for BatchError {
    fn from(error: JoinError) -> Self {
        Self::Worker(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_flattens_without_wrapping() {
        let error: BatchError = ResolveError::from(ParseError::missing_heading("https://x.test/p")).into();
        assert!(matches!(error, BatchError::Parse(ParseError::MissingHeading { .. })));

        let error: BatchError = ResolveError::from(FetchError::timeout("https://x.test/p")).into();
        assert!(matches!(error, BatchError::Fetch(FetchError::Timeout { .. })));
    }

    #[test]
    fn test_fetch_file_error_flattens_without_wrapping() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: BatchError = FetchFileError::from(WriteError::io("/out/a", io)).into();
        assert!(matches!(error, BatchError::Write(WriteError::Io { .. })));

        let error: BatchError = FetchFileError::Cancelled {
            url: "https://x.test/a".into(),
        }
        .into();
        assert!(matches!(error, BatchError::Cancelled));
    }

    #[test]
    fn test_display_is_the_original_message() {
        let error: BatchError = FetchError::http_status("https://x.test/a", 503).into();
        assert_eq!(error.to_string(), "HTTP 503 fetching https://x.test/a");
    }
}
