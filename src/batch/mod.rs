//! Batch runs over a list of pages.
//!
//! - [`BatchDownloader`] - walks pages and links strictly in order
//! - [`RunHandle`] - returned by [`BatchDownloader::start`]; events, cancel, outcome
//! - [`DownloadEvent`] / [`EventSink`] - the typed event stream
//! - [`CancelFlag`] - cooperative cancellation shared with the worker

mod engine;
mod error;
mod events;
mod handle;

pub use engine::{BatchDownloader, RunState};
pub use error::BatchError;
pub use events::{CancelFlag, DownloadEvent, EventSink};
pub use handle::RunHandle;

use serde::Serialize;

/// Totals for a run that finished without error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Pages fully processed.
    pub pages: usize,
    /// Files downloaded.
    pub files: usize,
    /// Bytes written across all files.
    pub bytes: u64,
}
