//! HTTP client wrapper for page fetches and streaming file downloads.
//!
//! This module provides the `HttpClient` struct which handles streaming
//! downloads with timeout configuration, fixed-size chunked writes and
//! per-chunk progress events.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::CONTENT_LENGTH;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};
use url::Url;

use super::FileFetcher;
use super::constants::{CHUNK_SIZE, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::{FetchError, FetchFileError, WriteError};
use super::filename::filename_from_url;
use crate::batch::{CancelFlag, EventSink};

/// A fetched page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// URL the body was served from; relative links resolve against it.
    pub final_url: String,
    /// Response body.
    pub body: String,
}

/// HTTP client used for both page requests and file downloads.
///
/// Cloning is cheap and shares the underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use pagegrab_core::batch::{CancelFlag, EventSink};
/// use pagegrab_core::download::{FileFetcher, HttpClient};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let (events, _rx) = EventSink::channel();
/// let bytes = client
///     .fetch("https://example.com/download/a.zip", Path::new("./out"), &events, &CancelFlag::new())
///     .await?;
/// println!("Downloaded {bytes} bytes");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes (for large files)
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::try_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
            .expect("failed to build HTTP client with static configuration")
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns the builder error when the TLS backend cannot be initialized.
    pub fn try_with_timeouts(
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .build()?;
        debug!(connect_timeout_secs, read_timeout_secs, "HTTP client built");
        Ok(Self { client })
    }

    /// Fetches `url` and returns the response body as text, together with
    /// the URL the body was served from after redirects.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] for malformed URLs, network failures, timeouts
    /// and non-2xx responses.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_text(&self, url: &str) -> Result<PageText, FetchError> {
        let response = self.send_get(url).await?;
        let final_url = response.url().to_string();
        if final_url != url {
            debug!(final_url = %final_url, "page request redirected");
        }
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::network(url, e))?;
        Ok(PageText { final_url, body })
    }

    async fn send_get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url, status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl FileFetcher for HttpClient {
    #[instrument(skip(self, events, cancel), fields(url = %url))]
    async fn fetch(
        &self,
        url: &str,
        dest_folder: &Path,
        events: &EventSink,
        cancel: &CancelFlag,
    ) -> Result<u64, FetchFileError> {
        let filename = filename_from_url(url);
        debug!(filename = %filename, "starting download");

        let response = self.send_get(url).await?;
        let total_size = content_length(&response);

        tokio::fs::create_dir_all(dest_folder)
            .await
            .map_err(|e| WriteError::create_dir(dest_folder, e))?;

        let file_path = dest_folder.join(&filename);
        let file = File::create(&file_path)
            .await
            .map_err(|e| WriteError::io(file_path.clone(), e))?;

        let bytes_written = stream_to_file(
            ChunkWriter {
                file,
                path: file_path.clone(),
                written: 0,
                total_size,
            },
            response,
            url,
            events,
            cancel,
        )
        .await?;

        events.progress(100);

        info!(
            path = %file_path.display(),
            bytes = bytes_written,
            "download complete"
        );
        Ok(bytes_written)
    }
}

/// Completed percentage for `written` out of `total` bytes.
///
/// Floors, caps at 100, and reports 0 when the total is unknown.
#[must_use]
pub fn progress_percent(written: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = (u128::from(written) * 100 / u128::from(total)).min(100);
    u8::try_from(percent).unwrap_or(100)
}

fn content_length(response: &reqwest::Response) -> u64 {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0)
}

struct ChunkWriter {
    file: File,
    path: PathBuf,
    written: u64,
    total_size: u64,
}

impl ChunkWriter {
    async fn write_chunk(
        &mut self,
        chunk: &[u8],
        url: &str,
        events: &EventSink,
        cancel: &CancelFlag,
    ) -> Result<(), FetchFileError> {
        if cancel.is_cancelled() {
            self.flush().await?;
            debug!(path = %self.path.display(), written = self.written, "cancelled; leaving partial file");
            return Err(FetchFileError::Cancelled {
                url: url.to_string(),
            });
        }

        self.file
            .write_all(chunk)
            .await
            .map_err(|e| WriteError::io(self.path.clone(), e))?;
        self.written += chunk.len() as u64;
        events.progress(progress_percent(self.written, self.total_size));
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), WriteError> {
        self.file
            .flush()
            .await
            .map_err(|e| WriteError::io(self.path.clone(), e))
    }
}

/// Streams the response body to disk in [`CHUNK_SIZE`] pieces, returning
/// bytes written. Network chunks are regrouped so that every write except
/// the last is exactly `CHUNK_SIZE` bytes.
async fn stream_to_file(
    mut writer: ChunkWriter,
    response: reqwest::Response,
    url: &str,
    events: &EventSink,
    cancel: &CancelFlag,
) -> Result<u64, FetchFileError> {
    let mut stream = response.bytes_stream();
    let mut pending: Vec<u8> = Vec::with_capacity(CHUNK_SIZE);

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| FetchError::network(url, e))?;

        let mut rest: &[u8] = &chunk;
        while !rest.is_empty() {
            let take = (CHUNK_SIZE - pending.len()).min(rest.len());
            pending.extend_from_slice(&rest[..take]);
            rest = &rest[take..];

            if pending.len() == CHUNK_SIZE {
                writer.write_chunk(&pending, url, events, cancel).await?;
                pending.clear();
            }
        }
    }

    if !pending.is_empty() {
        writer.write_chunk(&pending, url, events, cancel).await?;
    }

    writer.flush().await?;
    Ok(writer.written)
}
