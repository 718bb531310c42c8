//! Sequential batch engine: pages → links → files.
//!
//! A run walks the page list in order. Each page is resolved, its folder
//! created under the output directory, and its links fetched one at a time.
//! Only one download is ever in flight, so progress events from different
//! files never interleave.
//!
//! # Example
//!
//! ```no_run
//! use pagegrab_core::batch::BatchDownloader;
//! use pagegrab_core::download::HttpClient;
//! use std::path::{Path, PathBuf};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = BatchDownloader::with_http_client(HttpClient::new());
//! let mut run = downloader
//!     .start_from_list(Path::new("urls.txt"), PathBuf::from("./out"))
//!     .await?;
//! while let Some(event) = run.next_event().await {
//!     println!("{event:?}");
//! }
//! let summary = run.wait().await?;
//! println!("{} file(s) from {} page(s)", summary.files, summary.pages);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::error::BatchError;
use super::events::{CancelFlag, EventSink};
use super::handle::RunHandle;
use super::RunSummary;
use crate::download::{FileFetcher, HttpClient, WriteError, filename_from_url};
use crate::parser::{InputError, PageJob, read_page_list};
use crate::resolver::{HtmlLinkResolver, PageResolver};

/// Where a run currently is; logged on every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState<'a> {
    /// Not started, or finished.
    Idle,
    /// Fetching and parsing a page.
    Resolving {
        /// The page URL.
        page: &'a str,
    },
    /// Fetching one link of a page.
    Downloading {
        /// The page URL.
        page: &'a str,
        /// The link being fetched.
        link: &'a str,
    },
}

impl fmt::Display for RunState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Resolving { page } => write!(f, "resolving {page}"),
            Self::Downloading { page, link } => write!(f, "downloading {link} (from {page})"),
        }
    }
}

fn enter(state: &RunState<'_>) {
    debug!(state = %state, "run state");
}

/// Orchestrates resolver and fetcher over a list of pages.
///
/// Cloning is cheap; clones share the same resolver and fetcher.
#[derive(Clone)]
pub struct BatchDownloader {
    resolver: Arc<dyn PageResolver>,
    fetcher: Arc<dyn FileFetcher>,
}

impl fmt::Debug for BatchDownloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchDownloader").finish_non_exhaustive()
    }
}

impl BatchDownloader {
    /// Creates a downloader from explicit collaborators.
    #[must_use]
    pub fn new(resolver: Arc<dyn PageResolver>, fetcher: Arc<dyn FileFetcher>) -> Self {
        Self { resolver, fetcher }
    }

    /// Creates the standard downloader: HTML page resolution and streaming
    /// fetches sharing one connection pool.
    #[must_use]
    pub fn with_http_client(client: HttpClient) -> Self {
        let resolver = Arc::new(HtmlLinkResolver::new(client.clone()));
        Self::new(resolver, Arc::new(client))
    }

    /// Reads the page list at `input`, then starts the run.
    ///
    /// The list is read before anything is spawned: an unreadable list never
    /// reaches the network.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] if the list cannot be read.
    pub async fn start_from_list(
        &self,
        input: &Path,
        output_folder: PathBuf,
    ) -> Result<RunHandle, InputError> {
        let jobs = read_page_list(input).await?;
        Ok(self.start(jobs, output_folder))
    }

    /// Starts a run on a dedicated worker task and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use = "the handle is the only way to observe the run"]
    pub fn start(&self, jobs: Vec<PageJob>, output_folder: PathBuf) -> RunHandle {
        let (events, rx) = EventSink::channel();
        let cancel = CancelFlag::new();
        let downloader = self.clone();
        let worker_cancel = cancel.clone();

        let worker = tokio::spawn(async move {
            downloader
                .run(&jobs, &output_folder, &events, &worker_cancel)
                .await
        });

        RunHandle::new(rx, cancel, worker)
    }

    /// Runs the batch on the current task.
    ///
    /// Emits, per link: `FilenameChanged`, the fetcher's progress events,
    /// then `FileCompleted { "Downloaded: <link>" }`.
    ///
    /// # Errors
    ///
    /// The first failure aborts the whole run and is returned unchanged:
    /// - [`BatchError::Fetch`] for page or file request failures
    /// - [`BatchError::Parse`] for pages without a usable heading
    /// - [`BatchError::Write`] for directory or file write failures
    /// - [`BatchError::Cancelled`] when `cancel` was set
    #[instrument(skip_all, fields(pages = jobs.len(), output = %output_folder.display()))]
    pub async fn run(
        &self,
        jobs: &[PageJob],
        output_folder: &Path,
        events: &EventSink,
        cancel: &CancelFlag,
    ) -> Result<RunSummary, BatchError> {
        let mut summary = RunSummary::default();

        for job in jobs {
            let page = job.source_url.as_str();
            ensure_not_cancelled(cancel)?;

            enter(&RunState::Resolving { page });
            let resolved = self.resolver.resolve(page).await?;

            let dest = output_folder.join(&resolved.folder_name);
            tokio::fs::create_dir_all(&dest)
                .await
                .map_err(|e| WriteError::create_dir(dest.clone(), e))?;
            info!(
                page = %page,
                folder = %dest.display(),
                links = resolved.file_links.len(),
                "page resolved"
            );

            for link in &resolved.file_links {
                ensure_not_cancelled(cancel)?;

                enter(&RunState::Downloading { page, link });
                events.filename_changed(filename_from_url(link));
                let bytes = self.fetcher.fetch(link, &dest, events, cancel).await?;
                events.file_completed(format!("Downloaded: {link}"));

                summary.files += 1;
                summary.bytes += bytes;
            }
            summary.pages += 1;
        }

        enter(&RunState::Idle);
        info!(
            pages = summary.pages,
            files = summary.files,
            bytes = summary.bytes,
            "run complete"
        );
        Ok(summary)
    }
}

fn ensure_not_cancelled(cancel: &CancelFlag) -> Result<(), BatchError> {
    if cancel.is_cancelled() {
        debug!("cancellation requested; stopping run");
        return Err(BatchError::Cancelled);
    }
    Ok(())
}
