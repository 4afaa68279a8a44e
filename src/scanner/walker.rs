//! Directory walker for file discovery.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and yielding the regular files below it. Traversal is recursive,
//! single-threaded, and depth-unbounded, with entries sorted by file name
//! per directory for deterministic output.
//!
//! Symbolic links are not followed; the walk sees the tree as the
//! filesystem presents it.
//!
//! # Example
//!
//! ```no_run
//! use dupesweep::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"));
//! for entry in walker.files() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileEntry, ScanError};

/// Directory walker for single-threaded file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
}

impl Walker {
    /// Create a new walker for the given root directory.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Count the regular files reachable from the root.
    ///
    /// Used as a pre-pass so per-file progress percentages are exact rather
    /// than estimated. Entries that cannot be read are skipped here; the
    /// hashing pass reports them individually.
    #[must_use]
    pub fn count(&self) -> usize {
        self.walk_dir()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .count()
    }

    /// Walk the directory tree, yielding file entries.
    ///
    /// Returns an iterator over [`FileEntry`] results. Errors are yielded
    /// as [`ScanError`] values rather than stopping iteration, so a single
    /// unreadable file or subdirectory never aborts the walk.
    pub fn files(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        self.walk_dir().into_iter().filter_map(|entry_result| {
            match entry_result {
                Ok(entry) => {
                    // Only regular files are hashed; directories and
                    // symlinks are passed over.
                    if !entry.file_type().is_file() {
                        return None;
                    }

                    let path = entry.path().to_path_buf();
                    match entry.metadata() {
                        Ok(metadata) => Some(Ok(FileEntry::new(path, metadata.len()))),
                        Err(e) => Some(Err(walk_error(path, &e))),
                    }
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    Some(Err(walk_error(path, &e)))
                }
            }
        })
    }

    fn walk_dir(&self) -> WalkDir {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
    }
}

/// Convert a walkdir error into a [`ScanError`] for the given path.
fn walk_error(path: PathBuf, error: &walkdir::Error) -> ScanError {
    if let Some(io_err) = error.io_error() {
        match io_err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                log::warn!("Permission denied: {}", path.display());
                return ScanError::PermissionDenied(path);
            }
            std::io::ErrorKind::NotFound => {
                log::debug!("Path vanished during walk: {}", path.display());
                return ScanError::NotFound(path);
            }
            _ => {}
        }
    }

    log::warn!("Walker error for {}: {}", path.display(), error);
    ScanError::Io {
        path,
        source: std::io::Error::other(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    /// Create a test directory with some files.
    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        let mut f = File::create(dir.path().join("file1.txt")).unwrap();
        writeln!(f, "Hello, world!").unwrap();

        let mut f = File::create(dir.path().join("file2.txt")).unwrap();
        writeln!(f, "Another file").unwrap();

        let subdir = dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();
        let mut f = File::create(subdir.join("nested.txt")).unwrap();
        writeln!(f, "Nested file content").unwrap();

        dir
    }

    #[test]
    fn test_walker_finds_files() {
        let dir = create_test_dir();
        let walker = Walker::new(dir.path());

        let files: Vec<_> = walker.files().filter_map(Result::ok).collect();

        assert_eq!(files.len(), 3);
        for file in &files {
            assert!(file.size > 0);
            assert!(file.path.exists());
        }
    }

    #[test]
    fn test_walker_count_matches_files() {
        let dir = create_test_dir();
        let walker = Walker::new(dir.path());

        let yielded = walker.files().filter_map(Result::ok).count();
        assert_eq!(walker.count(), yielded);
    }

    #[test]
    fn test_walker_deterministic_order() {
        let dir = create_test_dir();
        let walker = Walker::new(dir.path());

        let first: Vec<_> = walker
            .files()
            .filter_map(Result::ok)
            .map(|f| f.path)
            .collect();
        let second: Vec<_> = walker
            .files()
            .filter_map(Result::ok)
            .map(|f| f.path)
            .collect();

        assert_eq!(first, second);
        // Sorted by file name within each directory.
        assert!(first[0].ends_with("file1.txt"));
        assert!(first[1].ends_with("file2.txt"));
    }

    #[test]
    fn test_walker_skips_directories() {
        let dir = create_test_dir();
        let walker = Walker::new(dir.path());

        for file in walker.files().filter_map(Result::ok) {
            assert!(file.path.is_file());
        }
    }

    #[test]
    fn test_walker_includes_empty_files() {
        let dir = create_test_dir();
        File::create(dir.path().join("empty.txt")).unwrap();

        let walker = Walker::new(dir.path());
        let files: Vec<_> = walker.files().filter_map(Result::ok).collect();

        assert_eq!(files.len(), 4);
        assert!(files.iter().any(|f| f.size == 0));
    }

    #[test]
    fn test_walker_handles_nonexistent_path() {
        let walker = Walker::new(Path::new("/nonexistent/path/12345"));

        let results: Vec<_> = walker.files().collect();

        assert!(!results.is_empty());
        assert!(results.iter().all(Result::is_err));
        assert_eq!(walker.count(), 0);
    }
}
