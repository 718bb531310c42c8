//! HTTP download engine for streaming files to disk.
//!
//! This module provides functionality for downloading a single file from an
//! HTTP/HTTPS URL into a destination folder, reporting byte progress as it
//! goes.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large files)
//! - Fixed 8 KiB chunked writes with one progress event per chunk
//! - Configurable timeouts (30s connect, 5min read by default)
//! - Structured error types split into network and filesystem failures
//! - Cooperative cancellation at chunk boundaries
//!
//! # Example
//!
//! ```no_run
//! use pagegrab_core::download::{filename_from_url, sanitize_folder_name};
//!
//! assert_eq!(sanitize_folder_name("Pack: Vol 1?"), "Pack Vol 1");
//! assert_eq!(filename_from_url("https://example.com/download/a.zip"), "a.zip");
//! ```

mod client;
mod constants;
mod error;
mod filename;

use std::path::Path;

use async_trait::async_trait;

use crate::batch::{CancelFlag, EventSink};

pub use client::{HttpClient, PageText, progress_percent};
pub use constants::{CHUNK_SIZE, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
pub use error::{FetchError, FetchFileError, WriteError};
pub use filename::{
    FALLBACK_FILENAME, FORBIDDEN_CHARS, MAX_FOLDER_NAME_LEN, filename_from_url,
    sanitize_folder_name,
};

/// Streams one URL into one local folder.
///
/// Implementations emit `ProgressUpdate` events through `events` and must
/// finish a successful fetch with `ProgressUpdate { percent: 100 }`. They
/// check `cancel` at chunk boundaries.
///
/// # Object Safety
///
/// Uses `async_trait` so the batch engine can hold a `Arc<dyn FileFetcher>`.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    /// Downloads `url` into `dest_folder`, returning the number of bytes written.
    async fn fetch(
        &self,
        url: &str,
        dest_folder: &Path,
        events: &EventSink,
        cancel: &CancelFlag,
    ) -> Result<u64, FetchFileError>;
}

// Note: no module-local Result aliases. Use `Result<T, FetchError>` explicitly.
