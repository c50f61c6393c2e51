/// Scanner module — finds project marker files in a directory tree.
///
/// Two entry points:
/// - [`scan`] / [`ProjectScanner::scan`] run the walk on the calling thread.
/// - [`start_scan`] runs it on a dedicated background thread and hands back a
///   [`ScanHandle`] for progress, live results and cancellation.
///
/// Either way the walk itself is a single sequential depth-first traversal;
/// concurrent scans share nothing but what the caller gives them.
pub mod progress;
pub mod walker;

use crate::model::{ScanOutcome, ScanRequest};
use progress::ScanProgress;
pub use walker::ProjectScanner;

use crossbeam_channel::Receiver;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::info;

/// Markers found so far, readable while the scan is still running.
pub type LiveMarkers = Arc<RwLock<Vec<PathBuf>>>;

/// Cooperative cancellation flag shared between a scan and its caller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the scan to stop at the next directory boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Scan the real filesystem on the calling thread.
pub fn scan(request: &ScanRequest, cancel: &CancelToken) -> ScanOutcome {
    ProjectScanner::new().scan(request, cancel)
}

/// Maximum number of progress messages that may queue up in the channel.
///
/// A caller that stops draining stalls the scanner once this many messages
/// are pending. [`ScanHandle::join`] drops the receiver first, so joining
/// never deadlocks on a full channel.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

/// Handle to a running or completed background scan.
pub struct ScanHandle {
    /// Receiver for progress updates from the scan thread.
    pub progress_rx: Receiver<ScanProgress>,
    /// Markers found so far.
    pub live_markers: LiveMarkers,
    cancel: CancelToken,
    thread: thread::JoinHandle<ScanOutcome>,
}

impl ScanHandle {
    /// Request the scan to stop as soon as possible.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Wait for the scan thread and return its outcome.
    ///
    /// Undelivered progress messages are discarded. A panic on the scan
    /// thread is resumed on the caller's thread.
    pub fn join(self) -> ScanOutcome {
        let Self {
            progress_rx,
            thread,
            ..
        } = self;
        drop(progress_rx);
        match thread.join() {
            Ok(outcome) => outcome,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}

/// Start a scan on a background thread.
///
/// Fails only if the OS refuses to spawn the thread.
pub fn start_scan(request: ScanRequest) -> std::io::Result<ScanHandle> {
    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);
    let cancel = CancelToken::new();
    let live_markers = LiveMarkers::default();

    let scanner = ProjectScanner::new()
        .with_progress(progress_tx)
        .with_live_markers(live_markers.clone());
    let token = cancel.clone();

    let thread = thread::Builder::new()
        .name("projectsleuth-scanner".into())
        .spawn(move || {
            info!("Starting background scan of {}", request.root_path().display());
            scanner.scan(&request, &token)
        })?;

    Ok(ScanHandle {
        progress_rx,
        live_markers,
        cancel,
        thread,
    })
}
