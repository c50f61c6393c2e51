/// Filesystem abstraction used by the scanner and the name reader.
///
/// The scanner only ever lists directories, canonicalizes paths, checks the
/// root and reads marker files. Keeping those four calls behind a trait lets
/// the traversal run against an in-memory tree in tests, where cycles and
/// permission failures are easy to stage.
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(test)]
pub(crate) mod memory;

/// What a directory entry turned out to be, with symlinks followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Sockets, devices, FIFOs.
    Other,
    /// A symlink whose target could not be resolved.
    Dangling(String),
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    /// Parent path joined with `name`. Not canonicalized.
    pub path: PathBuf,
    pub name: OsString,
    pub kind: EntryKind,
}

pub trait FileSystem {
    /// List the immediate entries of `dir`.
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>>;

    /// Resolve every symlink in `path`.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// `true` if `path` exists and is a directory (symlinks followed).
    fn is_dir(&self, path: &Path) -> io::Result<bool>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The real filesystem, via `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type()?;

            // Symlinks are classified by their target, matching what a
            // plain `is_dir()` / `is_file()` check on the path would say.
            let kind = if file_type.is_symlink() {
                match std::fs::metadata(&path) {
                    Ok(meta) => kind_of(meta.file_type()),
                    Err(err) => EntryKind::Dangling(err.to_string()),
                }
            } else {
                kind_of(file_type)
            };

            entries.push(DirEntryInfo {
                path,
                name: entry.file_name(),
                kind,
            });
        }
        Ok(entries)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        Ok(std::fs::metadata(path)?.is_dir())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

fn kind_of(file_type: std::fs::FileType) -> EntryKind {
    if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}
