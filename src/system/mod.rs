//! System abstraction for filesystem access
//!
//! Everything alertcheck reads from disk goes through the [`System`] trait so
//! the check operation can run against an in-memory filesystem in tests.

use std::io;
use std::path::{Path, PathBuf};

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// Entry from directory walking
#[derive(Debug, Clone)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub is_file: bool,
}

/// Filesystem operations used by the check operation
///
/// # Implementations
/// - `RealSystem`: Production implementation using `std::fs` and `walkdir`
/// - `MockSystem`: Test implementation using in-memory storage
pub trait System: Send + Sync {
    /// Read entire file contents as a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path points to a file
    fn is_file(&self, path: &Path) -> bool;

    /// Check if a path points to a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Recursively walk a directory
    ///
    /// Returns every entry below `path` (excluding `path` itself) in a
    /// deterministic order.
    fn walk_dir(&self, path: &Path) -> io::Result<Vec<WalkEntry>>;
}
