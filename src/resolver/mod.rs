//! Retention resolution for duplicate groups.
//!
//! # Overview
//!
//! Given the grouping a scan produced, this module decides which member of
//! each duplicate group to keep and disposes of the rest. The kept member
//! is always the oldest by creation timestamp, with ties broken by walk
//! order, and the same selection applies in both disposition modes:
//!
//! - [`delete`]: permanently remove the redundant copies in place
//! - [`quarantine`]: relocate them into a mirror tree plus a CSV manifest
//!
//! Timestamps are read fresh when resolution runs, never cached from the
//! scan, so the decision reflects the filesystem as it is at that moment.

pub mod delete;
pub mod quarantine;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::scanner::DuplicateGroup;

// Re-export main types
pub use delete::{resolve_delete, DeleteReport};
pub use quarantine::{resolve_move, MoveReport};

/// A per-file failure captured during scanning or resolution.
///
/// Failures are aggregated into the final report instead of aborting the
/// run; each carries enough detail to diagnose the file afterwards.
#[derive(Debug, Clone)]
pub struct Failure {
    /// Path the failure refers to
    pub path: PathBuf,
    /// Human-readable reason
    pub reason: String,
}

impl Failure {
    /// Create a new failure record.
    #[must_use]
    pub fn new(path: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            path,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Errors raised while disposing of a single redundant file.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// File was not found (may have been removed since the scan).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied for the operation.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The move target is already occupied.
    #[error("destination already exists: {0}")]
    DestinationExists(PathBuf),

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Map an I/O error to a [`ResolveError`] for the given path.
pub(crate) fn classify_io(path: &Path, error: io::Error) -> ResolveError {
    match error.kind() {
        io::ErrorKind::NotFound => ResolveError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => ResolveError::PermissionDenied(path.to_path_buf()),
        _ => ResolveError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}

/// Pick the member to keep from (walk index, creation timestamp) pairs.
///
/// Returns the walk index of the oldest member; equal timestamps fall back
/// to the lowest walk index. Pure: the result depends only on the pairs
/// passed in, so the same metadata always selects the same member,
/// regardless of input ordering.
#[must_use]
pub fn select_oldest(candidates: &[(usize, SystemTime)]) -> Option<usize> {
    candidates
        .iter()
        .min_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)))
        .map(|&(index, _)| index)
}

/// Read a file's creation timestamp.
///
/// Falls back to the modification time on filesystems that do not expose
/// birth time.
pub(crate) fn creation_time(path: &Path) -> io::Result<SystemTime> {
    let metadata = fs::metadata(path)?;
    metadata.created().or_else(|_| metadata.modified())
}

/// The retention decision for one duplicate group.
///
/// Derived fresh each time resolution runs; positions index into the
/// group's member list.
#[derive(Debug)]
pub(crate) struct Retention {
    /// Position of the member to keep, if one could be determined
    pub canonical: Option<usize>,
    /// Positions of the members to dispose of, in walk order
    pub redundant: Vec<usize>,
    /// Members whose metadata could not be read
    pub failures: Vec<Failure>,
}

/// Decide which member of a group to keep.
///
/// Reads each member's creation timestamp and keeps the oldest. A member
/// whose metadata cannot be read is reported and left untouched for this
/// run: it is neither kept nor disposed of. With fewer than two readable
/// members nothing is redundant.
pub(crate) fn retain_oldest(group: &DuplicateGroup) -> Retention {
    let mut candidates = Vec::with_capacity(group.files.len());
    let mut failures = Vec::new();

    for (index, file) in group.files.iter().enumerate() {
        match creation_time(&file.path) {
            Ok(created) => candidates.push((index, created)),
            Err(e) => {
                log::warn!("Failed to stat {}: {}", file.path.display(), e);
                failures.push(Failure::new(
                    file.path.clone(),
                    classify_io(&file.path, e).to_string(),
                ));
            }
        }
    }

    if candidates.len() < 2 {
        return Retention {
            canonical: candidates.first().map(|&(index, _)| index),
            redundant: Vec::new(),
            failures,
        };
    }

    let canonical = select_oldest(&candidates);
    if let Some(keep) = canonical {
        if let Some(&(_, created)) = candidates.iter().find(|&&(i, _)| i == keep) {
            log::debug!(
                "Keeping {} (created {})",
                group.files[keep].path.display(),
                DateTime::<Utc>::from(created).to_rfc3339()
            );
        }
    }

    let redundant = candidates
        .iter()
        .map(|&(index, _)| index)
        .filter(|&index| Some(index) != canonical)
        .collect();

    Retention {
        canonical,
        redundant,
        failures,
    }
}
