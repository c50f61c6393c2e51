/// Error types for the scanner and the marker-metadata reader.
///
/// Only [`ScanError`] can abort a scan. Everything that goes wrong below the
/// root is absorbed into a [`ScanDiagnostic`](crate::model::ScanDiagnostic)
/// and the walk carries on.
use std::path::PathBuf;

/// Fatal scan errors.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The scan root is missing or is not a directory.
    #[error("scan root {} is not a usable directory: {reason}", path.display())]
    RootInvalid { path: PathBuf, reason: String },
}

/// Failure to read a project name out of a marker file.
#[derive(Debug, thiserror::Error)]
pub enum MarkerParseError {
    #[error("failed to read marker {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed marker metadata: {0}")]
    Malformed(String),

    #[error("marker does not declare a project name")]
    MissingName,
}
