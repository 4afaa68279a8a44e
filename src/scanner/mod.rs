//! Scanner module for directory traversal and content fingerprinting.
//!
//! This module implements the first half of the sweep pipeline:
//! - [`walker`]: recursive, deterministic directory traversal
//! - [`hasher`]: streaming SHA-256 fingerprinting
//! - [`Scanner`]: drives both and groups files by digest into a [`ScanIndex`]
//!
//! # Example
//!
//! ```no_run
//! use dupesweep::scanner::Scanner;
//! use std::path::Path;
//!
//! let scanner = Scanner::new(Path::new("/home/user/Downloads"));
//! let (index, stats) = scanner.scan(None);
//!
//! println!(
//!     "{} files hashed, {} duplicate groups, {} failures",
//!     stats.hashed_files,
//!     index.duplicate_groups().count(),
//!     stats.failures.len()
//! );
//! ```

pub mod hasher;
pub mod walker;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::progress::ProgressSink;

// Re-export main types
pub use hasher::{fingerprint, CHUNK_SIZE};
pub use walker::Walker;

/// A file discovered during the walk.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path to the file, as visited by the walk
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileEntry {
    /// Create a new file entry.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Files sharing one content fingerprint.
///
/// Member order is walk order: the first element was seen first. A group
/// with a single member is not a duplicate group.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// Hex-encoded SHA-256 digest shared by every member
    pub digest: String,
    /// Member files, in the order the walk visited them
    pub files: Vec<FileEntry>,
}

impl DuplicateGroup {
    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether this group holds more than one copy of the content.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.files.len() > 1
    }

    /// Number of redundant copies (all members minus the one kept).
    #[must_use]
    pub fn redundant_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }
}

/// Mapping from fingerprint to the files sharing it.
///
/// Built incrementally during a single scan, entirely in memory, and owned
/// by the run that created it. Groups are kept in first-seen order so that
/// downstream processing is repeatable.
#[derive(Debug, Default)]
pub struct ScanIndex {
    groups: Vec<DuplicateGroup>,
    by_digest: HashMap<String, usize>,
}

impl ScanIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hashed file under its digest.
    ///
    /// The first file seen for a digest creates the group; later files
    /// append to it, preserving walk order.
    pub fn insert(&mut self, digest: String, entry: FileEntry) {
        match self.by_digest.get(&digest) {
            Some(&idx) => self.groups[idx].files.push(entry),
            None => {
                self.by_digest.insert(digest.clone(), self.groups.len());
                self.groups.push(DuplicateGroup {
                    digest,
                    files: vec![entry],
                });
            }
        }
    }

    /// All groups, in first-seen order.
    #[must_use]
    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.groups
    }

    /// Only the groups holding two or more files.
    pub fn duplicate_groups(&self) -> impl Iterator<Item = &DuplicateGroup> {
        self.groups.iter().filter(|g| g.has_duplicates())
    }

    /// Number of duplicate groups (two or more members).
    #[must_use]
    pub fn duplicate_group_count(&self) -> usize {
        self.duplicate_groups().count()
    }

    /// Total number of files recorded in the index.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::len).sum()
    }

    /// Check if the index holds no files at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Statistics and per-file failures from a scan.
#[derive(Debug, Default)]
pub struct ScanStats {
    /// Regular files counted by the pre-walk
    pub total_files: usize,
    /// Files successfully hashed into the index
    pub hashed_files: usize,
    /// Files (or subtrees) that could not be read
    pub failures: Vec<ScanError>,
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path was not found (e.g., deleted mid-scan).
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing a path.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(p) | Self::NotFound(p) => p,
            Self::Io { path, .. } => path,
        }
    }
}

impl From<HashError> for ScanError {
    fn from(err: HashError) -> Self {
        match err {
            HashError::NotFound(p) => Self::NotFound(p),
            HashError::PermissionDenied(p) => Self::PermissionDenied(p),
            HashError::Io { path, source } => Self::Io { path, source },
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The file was not found when hashing began.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Scanner that walks a directory tree and groups files by content digest.
///
/// Runs single-threaded: each file is opened, streamed, and closed before
/// the next is considered. A full pre-walk counts the files first so the
/// per-file progress percentage is exact.
#[derive(Debug)]
pub struct Scanner {
    root: PathBuf,
}

impl Scanner {
    /// Create a scanner rooted at the given directory.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Walk the tree, fingerprint every regular file, and group by digest.
    ///
    /// Every successfully hashed file appears in the returned index exactly
    /// once; files that cannot be read are reported in the stats and left
    /// out of the index. One progress notification is emitted per processed
    /// file, carrying the path and an exact 0-100 percentage. Pass `None`
    /// to skip progress reporting entirely.
    pub fn scan(&self, progress: Option<&dyn ProgressSink>) -> (ScanIndex, ScanStats) {
        let walker = Walker::new(&self.root);

        let total_files = walker.count();
        log::info!(
            "Scanning {} ({} files)",
            self.root.display(),
            total_files
        );
        if let Some(sink) = progress {
            sink.on_scan_start(total_files);
        }

        let mut index = ScanIndex::new();
        let mut stats = ScanStats {
            total_files,
            ..Default::default()
        };
        let mut processed = 0usize;

        for item in walker.files() {
            processed += 1;
            let percent = percent_of(processed, total_files);

            match item {
                Ok(entry) => {
                    let path = entry.path.clone();
                    match fingerprint(&entry.path) {
                        Ok(digest) => {
                            log::trace!("{}  {}", digest, path.display());
                            index.insert(digest, entry);
                            stats.hashed_files += 1;
                        }
                        Err(e) => {
                            log::warn!("Failed to hash {}: {}", path.display(), e);
                            stats.failures.push(e.into());
                        }
                    }
                    if let Some(sink) = progress {
                        sink.on_file(&path, percent);
                    }
                }
                Err(e) => {
                    let path = e.path().to_path_buf();
                    stats.failures.push(e);
                    if let Some(sink) = progress {
                        sink.on_file(&path, percent);
                    }
                }
            }
        }

        if let Some(sink) = progress {
            sink.on_scan_end();
        }

        log::info!(
            "Scan complete: {} hashed, {} groups, {} duplicate groups, {} failures",
            stats.hashed_files,
            index.groups().len(),
            index.duplicate_group_count(),
            stats.failures.len()
        );

        (index, stats)
    }
}

/// Exact integer percentage, clamped to 100.
///
/// The total comes from the pre-walk; if files appear between the two
/// passes the counter may overshoot, so the result is clamped.
fn percent_of(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((processed * 100) / total).min(100) as u8
}
