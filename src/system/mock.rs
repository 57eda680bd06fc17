//! Mock system implementation for testing

#![expect(clippy::module_name_repetitions)]

use super::{System, WalkEntry};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// In-memory implementation of System trait for testing
///
/// # Example
/// ```
/// use alertcheck::system::{mock::MockSystem, System};
/// use std::path::Path;
///
/// let system = MockSystem::new()
///     .with_file("/inbox/alert.json", b"{}").unwrap()
///     .with_dir("/empty").unwrap();
///
/// assert!(system.is_file(Path::new("/inbox/alert.json")));
/// assert!(system.is_dir(Path::new("/inbox")));
/// ```
#[derive(Clone)]
pub struct MockSystem {
    state: Arc<RwLock<MockSystemState>>,
}

struct MockSystemState {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
}

impl MockSystem {
    /// Create a new `MockSystem` with an empty filesystem
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockSystemState {
                files: BTreeMap::new(),
                dirs: BTreeSet::from([PathBuf::from("/")]),
            })),
        }
    }

    /// Add a file with contents (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The state lock is poisoned
    #[inline]
    pub fn with_file<P: AsRef<Path>>(self, path: P, contents: &[u8]) -> io::Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;

        if let Some(parent) = path_buf.parent() {
            Self::ensure_dirs(&mut state.dirs, parent);
        }

        state.files.insert(path_buf, contents.to_vec());
        drop(state);
        Ok(self)
    }

    /// Add a directory (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The state lock is poisoned
    #[inline]
    pub fn with_dir<P: AsRef<Path>>(self, path: P) -> io::Result<Self> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        Self::ensure_dirs(&mut state.dirs, path.as_ref());
        drop(state);
        Ok(self)
    }

    /// Insert `path` and all of its ancestors
    fn ensure_dirs(dirs: &mut BTreeSet<PathBuf>, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }
}

impl Default for MockSystem {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl System for MockSystem {
    #[inline]
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let state = self
            .state
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;
        let bytes = state.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })?;
        drop(state);
        String::from_utf8(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {e}")))
    }

    #[inline]
    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    #[inline]
    fn is_file(&self, path: &Path) -> bool {
        self.state
            .read()
            .is_ok_and(|state| state.files.contains_key(path))
    }

    #[inline]
    fn is_dir(&self, path: &Path) -> bool {
        self.state
            .read()
            .is_ok_and(|state| state.dirs.contains(path))
    }

    #[inline]
    fn walk_dir(&self, path: &Path) -> io::Result<Vec<WalkEntry>> {
        let state = self
            .state
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !state.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory not found: {}", path.display()),
            ));
        }

        let dirs = state
            .dirs
            .iter()
            .filter(|dir| dir.starts_with(path) && dir.as_path() != path)
            .map(|dir| WalkEntry {
                path: dir.clone(),
                is_file: false,
            });
        let files = state
            .files
            .keys()
            .filter(|file| file.starts_with(path))
            .map(|file| WalkEntry {
                path: file.clone(),
                is_file: true,
            });

        let mut entries: Vec<WalkEntry> = dirs.chain(files).collect();
        drop(state);

        // Sort entries by path for deterministic output
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}
