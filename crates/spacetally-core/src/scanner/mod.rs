/// Scanner module: orchestrates filesystem scanning.
///
/// [`walker::scan`] does the work synchronously. [`start_scan`] runs it on a
/// dedicated worker thread so the caller stays responsive, streaming
/// progress over a bounded crossbeam channel and exposing cooperative
/// cancellation through a [`ScanHandle`].
pub mod options;
pub mod progress;
pub mod walker;

pub use options::{ScanOptions, DEFAULT_MAX_RESULTS, DEFAULT_MIN_FILE_SIZE};
pub use progress::{ChannelSink, NullSink, ProgressSink, ScanProgress};
pub use walker::{count_files, scan, PROGRESS_INTERVAL};

use crate::error::ScanError;
use crate::model::ScanResult;
use crossbeam_channel::Receiver;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::info;

/// Shared cancellation flag, polled by the walker before every entry.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the scan to stop as soon as possible.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Maximum number of progress messages that may queue up in the channel.
///
/// Intermediate updates are dropped rather than blocking the walker once the
/// channel is full, so this only bounds memory; the consumer sees the most
/// recent updates it had room for plus the terminal 100% update.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

/// Handle to a running or completed scan. Allows cancellation, receiving
/// progress updates and collecting the result.
pub struct ScanHandle {
    /// Receiver for progress updates from the scan thread. Disconnects when
    /// the scan thread finishes.
    pub progress_rx: Receiver<ScanProgress>,
    cancel: CancelToken,
    thread: thread::JoinHandle<Result<ScanResult, ScanError>>,
}

impl ScanHandle {
    /// Request the scan to stop as soon as possible.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the scan thread and return its result.
    ///
    /// Undelivered progress updates are discarded.
    pub fn join(self) -> Result<ScanResult, ScanError> {
        let ScanHandle {
            progress_rx,
            thread,
            ..
        } = self;
        drop(progress_rx);
        thread.join().map_err(|_| ScanError::WorkerPanicked)?
    }
}

/// Start a new scan on a background thread.
///
/// The options are validated on the calling thread, so configuration errors
/// are reported before any worker exists.
pub fn start_scan(options: ScanOptions) -> Result<ScanHandle, ScanError> {
    start_scan_with(options, CancelToken::new())
}

/// Like [`start_scan`], but stopped through an existing `cancel` token, e.g.
/// one shared with a Ctrl-C handler installed before the scan starts.
pub fn start_scan_with(
    options: ScanOptions,
    cancel: CancelToken,
) -> Result<ScanHandle, ScanError> {
    options.validate()?;

    let (sink, progress_rx) = ChannelSink::bounded(PROGRESS_CHANNEL_CAPACITY);
    let cancel_clone = cancel.clone();

    let thread = thread::Builder::new()
        .name("spacetally-scanner".into())
        .spawn(move || {
            info!("Starting scan of {}", options.root.display());
            walker::scan(&options, &sink, &cancel_clone)
        })
        .map_err(ScanError::WorkerSpawn)?;

    Ok(ScanHandle {
        progress_rx,
        cancel,
        thread,
    })
}
