/// Sequential depth-first marker scanner.
///
/// The walk uses an explicit stack instead of recursion, so deep trees cannot
/// overflow the thread stack, and a single [`VisitedSet`] owned by the walk
/// acts as the symlink-cycle guard. Directories are marked visited when they
/// are pushed, which keeps every canonical directory on the stack at most
/// once.
///
/// # Failure tolerance
///
/// Only an unusable root aborts the scan. An unreadable directory or an
/// unresolvable path below the root is logged, recorded as a
/// [`ScanDiagnostic`] and skipped; the rest of the tree is still scanned.
use crate::error::ScanError;
use crate::fs::{DirEntryInfo, EntryKind, FileSystem, OsFileSystem};
use crate::model::{
    DiagnosticKind, ScanDiagnostic, ScanOutcome, ScanReport, ScanRequest, VisitedSet,
};
use crate::scanner::progress::ScanProgress;
use crate::scanner::{CancelToken, LiveMarkers};
use crossbeam_channel::Sender;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Finds marker files under a root directory.
///
/// Holds no per-scan state, so one scanner can run any number of scans,
/// one after another or from several threads.
#[derive(Debug, Default)]
pub struct ProjectScanner<F = OsFileSystem> {
    fs: F,
    progress_tx: Option<Sender<ScanProgress>>,
    live_markers: Option<LiveMarkers>,
}

impl ProjectScanner<OsFileSystem> {
    /// Scanner over the real filesystem.
    pub fn new() -> Self {
        Self::with_fs(OsFileSystem)
    }
}

impl<F: FileSystem> ProjectScanner<F> {
    pub fn with_fs(fs: F) -> Self {
        Self {
            fs,
            progress_tx: None,
            live_markers: None,
        }
    }

    /// Send [`ScanProgress`] messages to `tx` while scanning.
    pub fn with_progress(mut self, tx: Sender<ScanProgress>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Append every marker to `live` as soon as it is found.
    pub fn with_live_markers(mut self, live: LiveMarkers) -> Self {
        self.live_markers = Some(live);
        self
    }

    /// Scan `request.root_path()` for marker files.
    ///
    /// Blocks for the whole walk. `cancel` is polled before each directory
    /// is listed; a listing already in progress is not interrupted.
    pub fn scan(&self, request: &ScanRequest, cancel: &CancelToken) -> ScanOutcome {
        let start = Instant::now();
        let root = request.root_path();

        if let Err(err) = self.validate_root(root) {
            warn!("{err}");
            self.send(ScanProgress::Failed(err.to_string()));
            return ScanOutcome::Failed(err);
        }

        info!(
            "Scanning {} for '{}'",
            root.display(),
            request.marker_file_name()
        );

        let mut walk = Walk {
            scanner: self,
            request,
            visited: VisitedSet::new(),
            report: ScanReport::default(),
        };

        // Seed the guard with the root so a link back to it is never followed.
        match self.fs.canonicalize(root) {
            Ok(canonical) => {
                walk.visited.insert(canonical);
            }
            Err(err) => walk.diagnose(root, DiagnosticKind::PathResolutionFailed, err.to_string()),
        }

        let mut stack: Vec<PathBuf> = vec![root.to_path_buf()];
        while let Some(dir) = stack.pop() {
            if cancel.is_cancelled() {
                let mut report = walk.report;
                report.duration = start.elapsed();
                info!(
                    "Scan of {} cancelled after {} directories",
                    root.display(),
                    report.directories_visited
                );
                self.send(ScanProgress::Cancelled);
                return ScanOutcome::Cancelled(report);
            }
            let children = walk.visit(&dir);
            // Reversed so the stack pops children in name order.
            stack.extend(children.into_iter().rev());
        }

        let mut report = walk.report;
        report.duration = start.elapsed();
        info!(
            "Scan complete: {} markers, {} directories, {} diagnostics in {:?}",
            report.markers.len(),
            report.directories_visited,
            report.diagnostics.len(),
            report.duration
        );
        self.send(ScanProgress::Complete {
            duration: report.duration,
            marker_count: report.markers.len(),
            diagnostic_count: report.diagnostics.len(),
        });
        ScanOutcome::Completed(report)
    }

    fn validate_root(&self, root: &Path) -> Result<(), ScanError> {
        match self.fs.is_dir(root) {
            Ok(true) => Ok(()),
            Ok(false) => Err(ScanError::RootInvalid {
                path: root.to_path_buf(),
                reason: "not a directory".to_string(),
            }),
            Err(err) => Err(ScanError::RootInvalid {
                path: root.to_path_buf(),
                reason: err.to_string(),
            }),
        }
    }

    /// A disconnected receiver is not an error; the scan carries on.
    fn send(&self, msg: ScanProgress) {
        if let Some(tx) = &self.progress_tx {
            let _ = tx.send(msg);
        }
    }
}

/// State of one scan. Dropped when the scan returns.
struct Walk<'a, F> {
    scanner: &'a ProjectScanner<F>,
    request: &'a ScanRequest,
    visited: VisitedSet,
    report: ScanReport,
}

impl<F: FileSystem> Walk<'_, F> {
    /// List `dir` and return the subdirectories still to be scanned.
    ///
    /// Returns nothing if `dir` holds a marker (no nested projects) or
    /// could not be listed.
    fn visit(&mut self, dir: &Path) -> Vec<PathBuf> {
        self.report.directories_visited += 1;
        debug!("Listing {}", dir.display());
        self.scanner.send(ScanProgress::DirectoryEntered {
            path: dir.to_path_buf(),
            directories_visited: self.report.directories_visited,
        });

        let mut entries = match self.scanner.fs.read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                self.diagnose(dir, DiagnosticKind::DirectoryUnreadable, err.to_string());
                return Vec::new();
            }
        };
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        if let Some(marker) = entries.iter().find(|e| self.is_marker(e)) {
            self.record_marker(marker.path.clone());
            return Vec::new();
        }

        let mut children = Vec::new();
        for entry in entries {
            if entry.name.to_str().is_some_and(|n| self.request.is_excluded(n)) {
                debug!("Skipping excluded {}", entry.path.display());
                continue;
            }
            match entry.kind {
                EntryKind::Directory => {}
                EntryKind::Dangling(reason) => {
                    self.diagnose(&entry.path, DiagnosticKind::PathResolutionFailed, reason);
                    continue;
                }
                EntryKind::File | EntryKind::Other => continue,
            }
            match self.scanner.fs.canonicalize(&entry.path) {
                Ok(canonical) => {
                    if !self.visited.insert(canonical) {
                        debug!("Already visited {}, not following", entry.path.display());
                        continue;
                    }
                }
                Err(err) => {
                    self.diagnose(&entry.path, DiagnosticKind::PathResolutionFailed, err.to_string());
                    continue;
                }
            }
            children.push(entry.path);
        }
        children
    }

    fn is_marker(&self, entry: &DirEntryInfo) -> bool {
        entry.kind == EntryKind::File && entry.name == self.request.marker_file_name()
    }

    fn record_marker(&mut self, path: PathBuf) {
        debug!("Found marker {}", path.display());
        if let Some(live) = &self.scanner.live_markers {
            live.write().push(path.clone());
        }
        self.scanner.send(ScanProgress::MarkerFound(path.clone()));
        self.report.markers.insert(path);
    }

    fn diagnose(&mut self, path: &Path, kind: DiagnosticKind, message: String) {
        warn!("Skipping {} ({}): {message}", path.display(), kind.label());
        let diagnostic = ScanDiagnostic::new(path, kind, message);
        self.scanner.send(ScanProgress::Diagnostic(diagnostic.clone()));
        self.report.diagnostics.push(diagnostic);
    }
}
