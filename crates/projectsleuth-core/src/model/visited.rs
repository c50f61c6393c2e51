/// Recursion guard for a single scan.
///
/// Holds the canonical (symlink-resolved) path of every directory entered so
/// far. One instance is created per scan and dropped with it; it is never
/// shared between scans, so it needs no locking.
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct VisitedSet {
    dirs: HashSet<PathBuf>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `canonical`. Returns `false` if it was already present, in
    /// which case the directory must not be entered again.
    pub fn insert(&mut self, canonical: PathBuf) -> bool {
        self.dirs.insert(canonical)
    }

    pub fn contains(&self, canonical: &std::path::Path) -> bool {
        self.dirs.contains(canonical)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}
