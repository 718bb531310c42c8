//! Renders run events: progress bar, plain lines, JSON lines, or nothing.

use indicatif::{ProgressBar, ProgressStyle};
use pagegrab_core::{BatchError, DownloadEvent, RunHandle, RunSummary};
use tracing::{debug, warn};

use crate::app::output::truncate_to_width;

/// Widest filename shown next to the bar.
const FILENAME_DISPLAY_WIDTH: usize = 40;

/// How events reach the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventOutput {
    /// Interactive bar on stderr, completion lines on stdout.
    ProgressBar,
    /// Completion lines only (non-interactive stderr).
    Plain,
    /// One JSON object per event on stdout.
    Json,
    /// Nothing (quiet).
    Silent,
}

impl EventOutput {
    pub(crate) fn select(json: bool, quiet: bool, progress_bar: bool) -> Self {
        if json {
            Self::Json
        } else if quiet {
            Self::Silent
        } else if progress_bar {
            Self::ProgressBar
        } else {
            Self::Plain
        }
    }
}

enum Renderer {
    Bar(ProgressBar),
    Plain,
    Json,
    Silent,
}

impl Renderer {
    fn new(output: EventOutput) -> Self {
        match output {
            EventOutput::ProgressBar => {
                let bar = ProgressBar::new(100);
                bar.set_style(
                    ProgressStyle::with_template("{msg:40} [{bar:40}] {pos:>3}%")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("=> "),
                );
                Self::Bar(bar)
            }
            EventOutput::Plain => Self::Plain,
            EventOutput::Json => Self::Json,
            EventOutput::Silent => Self::Silent,
        }
    }

    fn render(&self, event: &DownloadEvent) {
        match self {
            Self::Bar(bar) => match event {
                DownloadEvent::FilenameChanged { name } => {
                    bar.reset();
                    bar.set_message(truncate_to_width(name, FILENAME_DISPLAY_WIDTH));
                }
                DownloadEvent::ProgressUpdate { percent } => bar.set_position(u64::from(*percent)),
                DownloadEvent::FileCompleted { message } => {
                    bar.suspend(|| println!("{message}"));
                }
            },
            Self::Plain => match event {
                DownloadEvent::FileCompleted { message } => println!("{message}"),
                DownloadEvent::FilenameChanged { name } => debug!(file = %name, "downloading"),
                DownloadEvent::ProgressUpdate { .. } => {}
            },
            Self::Json => match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(error) => warn!(error = %error, "failed to serialize event"),
            },
            Self::Silent => {}
        }
    }

    fn finish(&self) {
        if let Self::Bar(bar) = self {
            bar.finish_and_clear();
        }
    }
}

/// Consumes every event of `handle`, rendering it, then returns the run outcome.
///
/// Ctrl-C requests cooperative cancellation of the run.
pub(crate) async fn drive_run(
    mut handle: RunHandle,
    output: EventOutput,
) -> Result<RunSummary, BatchError> {
    let cancel = handle.cancel_flag();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received; stopping after the current chunk");
            cancel.cancel();
        }
    });

    let renderer = Renderer::new(output);
    while let Some(event) = handle.next_event().await {
        renderer.render(&event);
    }
    renderer.finish();
    interrupt.abort();

    handle.wait().await
}
