/// Import planning — turns a scan report into the list of projects a caller
/// should create after a clone.
///
/// Nothing is created here; the plan is handed to whatever owns the project
/// model. When the scan found no markers, the scanned root itself becomes
/// the single project, named after its last path segment.
use crate::fs::FileSystem;
use crate::model::ScanReport;
use crate::naming::{derive_project_name, ProjectName};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One project the caller should create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCandidate {
    /// `None` when no name could be derived; the caller must prompt.
    pub name: Option<ProjectName>,
    /// Directory holding the project.
    pub location: PathBuf,
    /// The marker file, or `None` when the root is imported as-is.
    pub descriptor: Option<PathBuf>,
    /// `true` if `location` is inside the default root, so the project
    /// model can use its default location instead of an explicit one.
    pub use_default_location: bool,
}

/// Build the import plan for `root` from a finished scan.
///
/// Candidates follow the report's marker order (sorted by path).
pub fn plan_import<F: FileSystem>(
    root: &Path,
    report: &ScanReport,
    default_root: Option<&Path>,
    fs: &F,
) -> Vec<ProjectCandidate> {
    if report.markers.is_empty() {
        return vec![ProjectCandidate {
            name: root
                .file_name()
                .map(|name| ProjectName::new(name.to_string_lossy())),
            location: root.to_path_buf(),
            descriptor: None,
            use_default_location: under_default_root(root, default_root),
        }];
    }

    report
        .markers
        .iter()
        .map(|marker| {
            let location = marker.parent().unwrap_or(root).to_path_buf();
            ProjectCandidate {
                name: derive_project_name(marker, default_root, fs),
                use_default_location: under_default_root(&location, default_root),
                location,
                descriptor: Some(marker.clone()),
            }
        })
        .collect()
}

fn under_default_root(location: &Path, default_root: Option<&Path>) -> bool {
    default_root.is_some_and(|root| location.starts_with(root))
}
