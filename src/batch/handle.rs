//! Handle to a run executing on its own worker task.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::error::BatchError;
use super::events::{CancelFlag, DownloadEvent};
use super::RunSummary;

/// Explicit handle returned when a run starts.
///
/// The control surface reads events from it, may request cancellation, and
/// finally waits for the run's outcome. Dropping the handle does not stop
/// the worker.
#[derive(Debug)]
pub struct RunHandle {
    events: mpsc::UnboundedReceiver<DownloadEvent>,
    cancel: CancelFlag,
    worker: JoinHandle<Result<RunSummary, BatchError>>,
}

impl RunHandle {
    pub(crate) fn new(
        events: mpsc::UnboundedReceiver<DownloadEvent>,
        cancel: CancelFlag,
        worker: JoinHandle<Result<RunSummary, BatchError>>,
    ) -> Self {
        Self {
            events,
            cancel,
            worker,
        }
    }

    /// Waits for the next event.
    ///
    /// Returns `None` once the worker has finished and every event it
    /// emitted has been received.
    pub async fn next_event(&mut self) -> Option<DownloadEvent> {
        self.events.recv().await
    }

    /// Requests cooperative cancellation. The worker stops at the next chunk
    /// or link boundary; files already on disk are kept.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns a clone of the run's cancellation flag (e.g. for a Ctrl-C handler).
    #[must_use]
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Waits for the run to end and returns its outcome.
    ///
    /// Events not yet received are discarded.
    ///
    /// # Errors
    ///
    /// Returns the [`BatchError`] that aborted the run, or
    /// [`BatchError::Worker`] if the worker task panicked.
    pub async fn wait(self) -> Result<RunSummary, BatchError> {
        self.worker.await?
    }

    /// Drains every event, then returns them together with the outcome.
    pub async fn collect(mut self) -> (Vec<DownloadEvent>, Result<RunSummary, BatchError>) {
        let mut events = Vec::new();
        while let Some(event) = self.next_event().await {
            events.push(event);
        }
        let outcome = self.wait().await;
        (events, outcome)
    }
}
