//! Real system implementation using `std::fs` and `walkdir`

use super::{System, WalkEntry};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Production implementation of System trait
///
/// Delegates directly to the standard library's filesystem functions.
#[derive(Debug, Clone, Copy)]
pub struct RealSystem;

impl RealSystem {
    /// Create a new `RealSystem` instance
    #[must_use]
    pub const fn new() -> Self {
        return Self;
    }
}

impl Default for RealSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for RealSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn walk_dir(&self, path: &Path) -> io::Result<Vec<WalkEntry>> {
        WalkDir::new(path)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                let entry = entry.map_err(io::Error::from)?;
                Ok(WalkEntry {
                    is_file: entry.file_type().is_file(),
                    path: entry.into_path(),
                })
            })
            .collect()
    }
}
