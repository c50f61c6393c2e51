/// Scan request: what to look for and where.
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// File name of an Eclipse-style project descriptor.
pub const DEFAULT_MARKER_FILE: &str = ".project";

/// Name of the folder holding workspace metadata. Never scanned by default.
pub const METADATA_FOLDER: &str = ".metadata";

/// Parameters of a single scan. Immutable once the scan starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    root_path: PathBuf,
    marker_file_name: String,
    excluded_directory_names: BTreeSet<String>,
}

impl ScanRequest {
    /// Build a request with the default marker (`.project`) and the
    /// metadata folder excluded.
    ///
    /// A relative `root` is resolved against the current directory. If the
    /// current directory cannot be determined the path is kept as given and
    /// root validation reports the problem.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let root_path = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        Self {
            root_path,
            marker_file_name: DEFAULT_MARKER_FILE.to_string(),
            excluded_directory_names: BTreeSet::from([METADATA_FOLDER.to_string()]),
        }
    }

    /// Look for `name` instead of the default marker.
    pub fn with_marker(mut self, name: impl Into<String>) -> Self {
        self.marker_file_name = name.into();
        self
    }

    /// Add one directory name to the exclusion set.
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.excluded_directory_names.insert(name.into());
        self
    }

    /// Replace the exclusion set entirely (an empty iterator clears it).
    pub fn with_excluded<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_directory_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn marker_file_name(&self) -> &str {
        &self.marker_file_name
    }

    pub fn excluded_directory_names(&self) -> &BTreeSet<String> {
        &self.excluded_directory_names
    }

    /// `true` if a directory called `name` must not be entered.
    #[inline]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_directory_names.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_exclude_metadata_folder() {
        let req = ScanRequest::new("/r");
        assert_eq!(req.marker_file_name(), ".project");
        assert!(req.is_excluded(".metadata"));
        assert!(!req.is_excluded("src"));
    }

    #[test]
    fn relative_root_is_made_absolute() {
        let req = ScanRequest::new("some/relative/dir");
        assert!(req.root_path().is_absolute());
        assert!(req.root_path().ends_with("some/relative/dir"));
    }

    #[test]
    fn with_excluded_replaces_the_default_set() {
        let req = ScanRequest::new("/r").with_excluded(["target", "node_modules"]);
        assert!(!req.is_excluded(".metadata"));
        assert!(req.is_excluded("target"));
        assert_eq!(req.excluded_directory_names().len(), 2);
    }
}
