/// ProjectSleuth Core — project-marker scanning, naming and import planning.
///
/// This crate contains all scanning logic with no UI or CLI dependencies.
/// It never clones, creates projects or talks to a VCS; it only reports
/// which directories under a root are importable units.
///
/// # Modules
///
/// - [`model`] — Scan request, per-scan visited set and result types.
/// - [`fs`] — Filesystem abstraction the scanner runs against.
/// - [`scanner`] — Cycle-safe marker scan, inline or on a background thread.
/// - [`naming`] — Project-name derivation from a discovered marker.
/// - [`import`] — Import plan built from a scan report.
/// - [`error`] — Fatal scan errors and marker-parse errors.
pub mod error;
pub mod fs;
pub mod import;
pub mod model;
pub mod naming;
pub mod scanner;

pub use error::{MarkerParseError, ScanError};
pub use model::{ScanOutcome, ScanReport, ScanRequest};
pub use scanner::{scan, start_scan, CancelToken, ProjectScanner};
