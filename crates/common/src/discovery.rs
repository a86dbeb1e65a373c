//! Candidate file discovery
//!
//! A directory root is walked level by level: directories found while
//! reading one directory are queued behind every directory already waiting.
//! Entries within a directory keep the order the filesystem returns them in.

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::registry::dotted_extension;

/// Extensions a discovery run accepts; empty accepts every file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter(HashSet<String>);

impl ExtensionFilter {
    /// Filter that accepts every file
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(extensions.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn accepts(&self, path: &Path) -> bool {
        self.0.is_empty() || self.0.contains(&dotted_extension(path))
    }
}

/// Split a comma-separated list such as `".md, .js"`; whitespace is ignored
pub fn parse_extension_list(list: &str) -> Vec<String> {
    let compact: String = list.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .split(',')
        .filter(|ext| !ext.is_empty())
        .map(String::from)
        .collect()
}

/// Directories waiting to be read, oldest first
#[derive(Debug, Default)]
pub struct DirectoryQueue {
    pending: VecDeque<PathBuf>,
}

impl DirectoryQueue {
    pub fn new(root: PathBuf) -> Self {
        Self {
            pending: VecDeque::from([root]),
        }
    }

    /// Queue a directory behind everything already waiting
    pub fn enqueue(&mut self, dir: PathBuf) {
        self.pending.push_back(dir);
    }

    pub fn dequeue(&mut self) -> Option<PathBuf> {
        self.pending.pop_front()
    }
}

/// Resolve `root` into an ordered list of candidate files.
///
/// A regular file is returned on its own regardless of the filter. A
/// directory is read breadth-first; subdirectories are only entered when
/// `recursive` is set. Symlinks are followed and cycles are not detected.
pub fn discover(root: &Path, recursive: bool, filter: &ExtensionFilter) -> Result<Vec<PathBuf>> {
    let root = absolute(root)?;
    let metadata = fs::metadata(&root).map_err(|_| Error::InvalidInputPath { path: root.clone() })?;

    if metadata.is_file() {
        debug!(file = %root.display(), "Input is a single file");
        return Ok(vec![root]);
    }
    if !metadata.is_dir() {
        return Err(Error::InvalidInputPath { path: root });
    }

    let mut files = Vec::new();
    let mut queue = DirectoryQueue::new(root);

    while let Some(dir) = queue.dequeue() {
        trace!(dir = %dir.display(), "Reading directory");
        let entries = fs::read_dir(&dir).map_err(|e| Error::read(&dir, e))?;

        for entry in entries {
            let path = entry.map_err(|e| Error::read(&dir, e))?.path();
            let metadata = fs::metadata(&path).map_err(|e| Error::read(&path, e))?;

            if metadata.is_file() {
                if filter.accepts(&path) {
                    debug!(file = %path.display(), "Discovered file");
                    files.push(path);
                }
            } else if metadata.is_dir() && recursive {
                queue.enqueue(path);
            }
        }
    }

    Ok(files)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|_| Error::InvalidInputPath {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extension_list_strips_whitespace() {
        assert_eq!(parse_extension_list(" .md ,\t.js,"), [".md", ".js"]);
        assert_eq!(parse_extension_list(". m d"), [".md"]);
    }

    #[test]
    fn test_empty_filter_accepts_everything() {
        let filter = ExtensionFilter::new(parse_extension_list(""));
        assert!(filter.is_empty());
        assert!(filter.accepts(Path::new("a.css")));
        assert!(filter.accepts(Path::new("Makefile")));
    }

    #[test]
    fn test_filter_matches_dotted_extension() {
        let filter = ExtensionFilter::new([".js"]);
        assert!(filter.accepts(Path::new("/src/app.js")));
        assert!(!filter.accepts(Path::new("/src/app.jsx")));
        assert!(!filter.accepts(Path::new("/src/js")));
    }

    #[test]
    fn test_queue_is_first_in_first_out() {
        let mut queue = DirectoryQueue::new(PathBuf::from("root"));
        assert_eq!(queue.dequeue(), Some(PathBuf::from("root")));
        queue.enqueue(PathBuf::from("a"));
        queue.enqueue(PathBuf::from("b"));
        queue.enqueue(PathBuf::from("a/c"));
        assert_eq!(queue.dequeue(), Some(PathBuf::from("a")));
        assert_eq!(queue.dequeue(), Some(PathBuf::from("b")));
        assert_eq!(queue.dequeue(), Some(PathBuf::from("a/c")));
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_missing_root_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover(&dir.path().join("nope"), true, &ExtensionFilter::all()).unwrap_err();
        assert!(matches!(err, Error::InvalidInputPath { .. }));
    }

    #[test]
    fn test_file_root_ignores_filter() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("style.css");
        fs::write(&file, "body {}").unwrap();

        let files = discover(&file, false, &ExtensionFilter::new([".md"])).unwrap();
        assert_eq!(files, vec![file]);
    }
}
