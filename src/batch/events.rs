//! Typed run events and the channel they travel through.
//!
//! The worker only ever holds an [`EventSink`]; the control surface owns the
//! receiving half (usually through a [`RunHandle`](super::RunHandle)).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::trace;

/// An event emitted by a run.
///
/// For every file the order is: one `FilenameChanged`, one or more
/// `ProgressUpdate` ending with `percent == 100`, one `FileCompleted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DownloadEvent {
    /// Byte progress of the current file, 0..=100.
    ProgressUpdate {
        /// Completed percentage, floored.
        percent: u8,
    },
    /// A new file is about to be fetched.
    FilenameChanged {
        /// Local filename derived from the link.
        name: String,
    },
    /// The current file finished successfully.
    FileCompleted {
        /// Human-readable completion message (`Downloaded: <link>`).
        message: String,
    },
}

impl DownloadEvent {
    /// Returns the progress percentage if this is a progress event.
    #[must_use]
    pub fn percent(&self) -> Option<u8> {
        match self {
            Self::ProgressUpdate { percent } => Some(*percent),
            _ => None,
        }
    }
}

/// Sending half of a run's event stream.
///
/// Emitting never blocks. If the receiver is gone the event is dropped; the
/// run itself keeps going.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<DownloadEvent>,
}

impl EventSink {
    /// Creates a connected sink/receiver pair.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DownloadEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Emits one event.
    pub fn emit(&self, event: DownloadEvent) {
        if self.tx.send(event).is_err() {
            trace!("event receiver dropped; discarding event");
        }
    }

    /// Emits a `ProgressUpdate`.
    pub fn progress(&self, percent: u8) {
        self.emit(DownloadEvent::ProgressUpdate { percent });
    }

    /// Emits a `FilenameChanged`.
    pub fn filename_changed(&self, name: impl Into<String>) {
        self.emit(DownloadEvent::FilenameChanged { name: name.into() });
    }

    /// Emits a `FileCompleted`.
    pub fn file_completed(&self, message: impl Into<String>) {
        self.emit(DownloadEvent::FileCompleted {
            message: message.into(),
        });
    }
}

/// Cooperative cancellation flag shared between a [`RunHandle`](super::RunHandle)
/// and its worker. Checked between links and at every chunk boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates a flag that is not yet cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_event_sink_delivers_in_order() {
        let (sink, mut rx) = EventSink::channel();
        sink.filename_changed("a.zip");
        sink.progress(50);
        sink.file_completed("Downloaded: https://x.test/a.zip");

        assert_eq!(
            rx.try_recv().unwrap(),
            DownloadEvent::FilenameChanged {
                name: "a.zip".into()
            }
        );
        assert_eq!(rx.try_recv().unwrap().percent(), Some(50));
        assert!(matches!(
            rx.try_recv().unwrap(),
            DownloadEvent::FileCompleted { .. }
        ));
    }

    #[test]
    fn test_event_sink_survives_dropped_receiver() {
        let (sink, rx) = EventSink::channel();
        drop(rx);
        sink.progress(10);
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let json = serde_json::to_string(&DownloadEvent::ProgressUpdate { percent: 42 }).unwrap();
        assert_eq!(json, r#"{"type":"progress_update","percent":42}"#);

        let json = serde_json::to_string(&DownloadEvent::FilenameChanged {
            name: "b.bin".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"filename_changed","name":"b.bin"}"#);
    }

    #[test]
    fn test_cancel_flag_is_shared_between_clones() {
        let flag = CancelFlag::new();
        let clone = flag.clone();
        assert!(!clone.is_cancelled());
        flag.cancel();
        assert!(clone.is_cancelled());
    }
}
