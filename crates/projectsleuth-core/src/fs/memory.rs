/// In-memory filesystem for unit tests.
///
/// Paths are absolute and symlink targets must be absolute too. Parent
/// directories are created implicitly.
use super::{DirEntryInfo, EntryKind, FileSystem};
use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Symlink hops allowed before resolution gives up, as on Linux.
const MAX_LINK_DEPTH: u32 = 40;

#[derive(Debug, Clone)]
enum Node {
    Dir,
    /// A directory whose listing fails with `PermissionDenied`.
    Unreadable,
    File(String),
    Symlink(PathBuf),
}

#[derive(Debug, Default)]
pub(crate) struct MemoryFs {
    nodes: BTreeMap<PathBuf, Node>,
}

impl MemoryFs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn dir(mut self, path: &str) -> Self {
        self.insert(path, Node::Dir);
        self
    }

    pub(crate) fn unreadable_dir(mut self, path: &str) -> Self {
        self.insert(path, Node::Unreadable);
        self
    }

    pub(crate) fn file(mut self, path: &str, contents: &str) -> Self {
        self.insert(path, Node::File(contents.to_string()));
        self
    }

    pub(crate) fn symlink(mut self, path: &str, target: &str) -> Self {
        self.insert(path, Node::Symlink(PathBuf::from(target)));
        self
    }

    fn insert(&mut self, path: &str, node: Node) {
        let path = PathBuf::from(path);
        let mut ancestor = path.parent();
        while let Some(dir) = ancestor {
            if dir.parent().is_some() {
                self.nodes.entry(dir.to_path_buf()).or_insert(Node::Dir);
            }
            ancestor = dir.parent();
        }
        self.nodes.insert(path, node);
    }

    fn resolve(&self, path: &Path, depth: u32) -> io::Result<PathBuf> {
        if depth > MAX_LINK_DEPTH {
            return Err(io::Error::other("too many levels of symbolic links"));
        }
        let mut current = PathBuf::from("/");
        for component in path.components() {
            match component {
                Component::Normal(name) => {
                    current.push(name);
                    match self.nodes.get(&current) {
                        Some(Node::Symlink(target)) => current = self.resolve(target, depth + 1)?,
                        Some(_) => {}
                        None => return Err(io::ErrorKind::NotFound.into()),
                    }
                }
                Component::ParentDir => {
                    current.pop();
                }
                Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
            }
        }
        Ok(current)
    }

    fn node(&self, canonical: &Path) -> Option<&Node> {
        if canonical.parent().is_none() {
            return Some(&Node::Dir);
        }
        self.nodes.get(canonical)
    }
}

impl FileSystem for MemoryFs {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let canonical = self.resolve(dir, 0)?;
        match self.node(&canonical) {
            Some(Node::Dir) => {}
            Some(Node::Unreadable) => return Err(io::ErrorKind::PermissionDenied.into()),
            _ => return Err(io::Error::other("not a directory")),
        }

        let entries = self
            .nodes
            .keys()
            .filter(|p| p.parent() == Some(canonical.as_path()))
            .filter_map(|p| p.file_name())
            .map(|name| {
                let path = dir.join(name);
                let kind = match self.resolve(&path, 0) {
                    Ok(target) => match self.node(&target) {
                        Some(Node::Dir | Node::Unreadable) => EntryKind::Directory,
                        Some(Node::File(_)) => EntryKind::File,
                        _ => EntryKind::Other,
                    },
                    Err(err) => EntryKind::Dangling(err.to_string()),
                };
                DirEntryInfo {
                    path,
                    name: name.to_os_string(),
                    kind,
                }
            })
            .collect();
        Ok(entries)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        self.resolve(path, 0)
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        let canonical = self.resolve(path, 0)?;
        Ok(matches!(
            self.node(&canonical),
            Some(Node::Dir | Node::Unreadable)
        ))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let canonical = self.resolve(path, 0)?;
        match self.node(&canonical) {
            Some(Node::File(contents)) => Ok(contents.clone()),
            _ => Err(io::Error::other("not a file")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symlinked_directory_resolves_to_its_target() {
        let fs = MemoryFs::new()
            .dir("/r/real")
            .symlink("/r/link", "/r/real")
            .file("/r/real/a.txt", "");
        assert_eq!(
            fs.canonicalize(Path::new("/r/link/a.txt")).unwrap(),
            PathBuf::from("/r/real/a.txt")
        );
        let kinds: Vec<_> = fs
            .read_dir(Path::new("/r"))
            .unwrap()
            .into_iter()
            .map(|e| e.kind)
            .collect();
        assert_eq!(kinds, vec![EntryKind::Directory, EntryKind::Directory]);
    }

    #[test]
    fn self_referencing_link_fails_to_resolve() {
        let fs = MemoryFs::new().symlink("/r/loop", "/r/loop");
        assert!(fs.canonicalize(Path::new("/r/loop")).is_err());
    }
}
