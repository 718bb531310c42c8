//! Error types for reading the input list.

use std::path::PathBuf;

use thiserror::Error;

/// The input list could not be read.
#[derive(Debug, Error)]
pub enum InputError {
    /// No file at the given path.
    #[error("input file not found: {path}\n  Suggestion: Check the path to the URL list")]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The file exists but could not be read (permissions, not UTF-8, a directory, ...).
    #[error("input file unreadable: {path}: {source}")]
    Unreadable {
        /// Path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl InputError {
    /// Maps an IO error from reading `path` to the matching variant.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Unreadable { path, source }
        }
    }
}
