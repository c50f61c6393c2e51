/// Data model for a project scan.
///
/// Re-exports the request, the per-scan recursion guard and the result types.
pub mod outcome;
pub mod request;
pub mod visited;

pub use outcome::{DiagnosticKind, ScanDiagnostic, ScanOutcome, ScanReport};
pub use request::{ScanRequest, DEFAULT_MARKER_FILE, METADATA_FOLDER};
pub use visited::VisitedSet;
