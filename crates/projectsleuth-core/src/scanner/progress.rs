/// Scan progress reporting — lightweight messages sent from the scan
/// thread to the caller via a crossbeam channel.
use crate::model::ScanDiagnostic;
use std::path::PathBuf;
use std::time::Duration;

/// Progress updates sent while a scan runs.
///
/// The markers themselves are also collected in the shared `LiveMarkers`
/// list and in the final report; these messages are for live display.
#[derive(Debug, Clone)]
pub enum ScanProgress {
    /// A directory is about to be listed.
    DirectoryEntered {
        path: PathBuf,
        directories_visited: u64,
    },
    /// A marker file was found.
    MarkerFound(PathBuf),
    /// A non-fatal problem; the path was skipped.
    Diagnostic(ScanDiagnostic),
    /// Scanning completed.
    Complete {
        duration: Duration,
        marker_count: usize,
        diagnostic_count: usize,
    },
    /// Scan was cancelled by the caller.
    Cancelled,
    /// The root was unusable; nothing was scanned.
    Failed(String),
}

impl ScanProgress {
    /// `true` for the last message a scan sends.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Complete { .. } | Self::Cancelled | Self::Failed(_)
        )
    }
}
