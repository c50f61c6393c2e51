/// Scan results: discovered markers, non-fatal diagnostics and the
/// three-way outcome returned to the caller.
use crate::error::ScanError;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Why a path below the root was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Listing the directory failed (permission denied, vanished, ...).
    DirectoryUnreadable,
    /// The path could not be canonicalized, typically a dangling symlink.
    PathResolutionFailed,
}

impl DiagnosticKind {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::DirectoryUnreadable => "directory unreadable",
            Self::PathResolutionFailed => "path resolution failed",
        }
    }
}

/// A non-fatal problem recorded during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanDiagnostic {
    pub path: PathBuf,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl ScanDiagnostic {
    pub fn new(path: impl Into<PathBuf>, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}

/// Everything a scan accumulated, complete or not.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Absolute paths of the marker files found. Sorted, no duplicates.
    pub markers: BTreeSet<PathBuf>,
    /// Skipped paths, in the order they were encountered.
    pub diagnostics: Vec<ScanDiagnostic>,
    /// Number of directories whose contents were listed (or attempted).
    pub directories_visited: u64,
    /// Wall-clock time spent scanning.
    pub duration: Duration,
}

impl ScanReport {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn contains_marker(&self, path: &Path) -> bool {
        self.markers.contains(path)
    }

    /// Diagnostics of one kind only.
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &ScanDiagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }
}

/// Result of [`scan`](crate::scanner::scan).
///
/// `Cancelled` carries the partial report; callers are free to discard it.
#[derive(Debug)]
pub enum ScanOutcome {
    Completed(ScanReport),
    Cancelled(ScanReport),
    Failed(ScanError),
}

impl ScanOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// The report, for either a completed or a cancelled scan.
    pub fn report(&self) -> Option<&ScanReport> {
        match self {
            Self::Completed(report) | Self::Cancelled(report) => Some(report),
            Self::Failed(_) => None,
        }
    }

    /// Convert to a `Result`, treating cancellation as success with a
    /// partial report.
    pub fn into_result(self) -> Result<ScanReport, ScanError> {
        match self {
            Self::Completed(report) | Self::Cancelled(report) => Ok(report),
            Self::Failed(err) => Err(err),
        }
    }
}
