//! Failures of a page request or a file transfer.
//!
//! [`FetchError`] covers everything that can go wrong on the wire (shared
//! with the page resolver), [`WriteError`] covers the local filesystem side,
//! and [`FetchFileError`] is what a single file fetch returns.

use std::path::PathBuf;

use thiserror::Error;

/// Network or HTTP failure while requesting a URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection could not be established or broke mid-transfer.
    #[error("network error fetching {url}: {source}")]
    Network {
        /// Requested URL.
        url: String,
        /// Error reported by reqwest.
        #[source]
        source: reqwest::Error,
    },

    /// Connect or read timeout elapsed.
    #[error("timeout fetching {url}")]
    Timeout {
        /// Requested URL.
        url: String,
    },

    /// Non-2xx HTTP response.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// Status code returned by the server.
        status: u16,
    },

    /// Not an absolute http(s) URL.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// Rejected input.
        url: String,
    },
}

impl FetchError {
    /// Creates a network error from a reqwest error, promoting timeouts.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            return Self::Timeout { url: url.into() };
        }
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an error for a non-2xx response.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an error for an elapsed connect or read timeout.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an error for a URL that does not parse.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }
}

/// Filesystem failure while preparing or writing a download.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Destination directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// Folder that was being created.
        path: PathBuf,
        /// OS error.
        #[source]
        source: std::io::Error,
    },

    /// File could not be opened, written or flushed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Target file.
        path: PathBuf,
        /// OS error.
        #[source]
        source: std::io::Error,
    },
}

impl WriteError {
    /// Creates an error for a destination folder that could not be made.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Creates an error for a failed open, write or flush of `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors returned by a single file fetch.
#[derive(Debug, Error)]
pub enum FetchFileError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Write(#[from] WriteError),

    /// Cancellation was requested at a chunk boundary.
    #[error("download of {url} cancelled")]
    Cancelled {
        /// The URL whose transfer was interrupted.
        url: String,
    },
}

// Note: no `From<reqwest::Error>` / `From<std::io::Error>` here. Every variant
// needs a url or path that the source error does not carry.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_timeout_display() {
        let error = FetchError::timeout("https://example.com/file.zip");
        assert!(error.to_string().contains("timeout"));
        assert!(error.to_string().contains("https://example.com/file.zip"));
    }

    #[test]
    fn test_fetch_error_http_status_display() {
        let error = FetchError::http_status("https://example.com/file.zip", 404);
        let msg = error.to_string();
        assert!(msg.contains("404"), "Expected '404' in: {msg}");
        assert!(
            msg.contains("https://example.com/file.zip"),
            "Expected URL in: {msg}"
        );
    }

    #[test]
    fn test_fetch_error_invalid_url_display() {
        let error = FetchError::invalid_url("not-a-url");
        let msg = error.to_string();
        assert!(msg.contains("invalid URL"), "Expected 'invalid URL' in: {msg}");
        assert!(msg.contains("not-a-url"), "Expected URL in: {msg}");
    }

    #[test]
    fn test_write_error_display_includes_path() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error = WriteError::io(PathBuf::from("/tmp/out/a.zip"), io_error);
        assert!(error.to_string().contains("/tmp/out/a.zip"));

        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error = WriteError::create_dir(PathBuf::from("/tmp/out"), io_error);
        assert!(error.to_string().contains("failed to create directory /tmp/out"));
    }

    #[test]
    fn test_fetch_file_error_is_transparent_over_cause() {
        let error: FetchFileError = FetchError::http_status("https://example.com/a", 500).into();
        assert_eq!(error.to_string(), "HTTP 500 fetching https://example.com/a");
        assert!(matches!(
            error,
            FetchFileError::Fetch(FetchError::HttpStatus { status: 500, .. })
        ));
    }
}
