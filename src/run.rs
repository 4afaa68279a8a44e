//! Top-level operations wired for a presentation layer.
//!
//! # Overview
//!
//! The two entry points here are what a front end calls: plain directory
//! arguments in, optional sinks for progress and completion, a report out.
//! Argument validation happens up front, before any filesystem mutation;
//! after that, every failure is per-file and lands in the report instead
//! of aborting the run.

use std::path::Path;

use thiserror::Error;

use crate::progress::{CompletionSink, ProgressSink};
use crate::resolver::{resolve_delete, resolve_move, DeleteReport, Failure, MoveReport};
use crate::scanner::{Scanner, ScanStats};

/// Errors detected before an operation touches the filesystem.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A directory argument was empty.
    #[error("directory argument is empty")]
    EmptyPath,

    /// The directory does not exist.
    #[error("directory not found: {0}")]
    Missing(std::path::PathBuf),

    /// The path exists but is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(std::path::PathBuf),
}

/// Validate a root directory argument: non-empty, exists, is a directory.
fn validate_root(path: &Path) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(ValidationError::EmptyPath);
    }
    if !path.exists() {
        return Err(ValidationError::Missing(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(ValidationError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Validate a quarantine destination: non-empty and not an existing
/// regular file. A missing destination is fine; it is created later.
fn validate_destination(path: &Path) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(ValidationError::EmptyPath);
    }
    if path.exists() && !path.is_dir() {
        return Err(ValidationError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Fold scan failures into a report's failure list, keeping them first
/// so the list reads chronologically.
fn merge_scan_failures(failures: &mut Vec<Failure>, stats: ScanStats) {
    let scan_failures: Vec<Failure> = stats
        .failures
        .iter()
        .map(|e| Failure::new(e.path().to_path_buf(), e.to_string()))
        .collect();
    if !scan_failures.is_empty() {
        let resolved = std::mem::replace(failures, scan_failures);
        failures.extend(resolved);
    }
}

/// Scan `root` and permanently delete every redundant duplicate.
///
/// The oldest copy of each duplicate set survives; the rest are removed.
/// Fails fast with a [`ValidationError`] for a bad root argument; once the
/// scan starts, per-file failures accumulate in the report.
///
/// # Errors
///
/// Returns [`ValidationError`] if `root` is empty, missing, or not a
/// directory. No filesystem mutation has happened in that case.
pub fn run_delete(
    root: &Path,
    progress: Option<&dyn ProgressSink>,
    completion: Option<&dyn CompletionSink>,
) -> Result<DeleteReport, ValidationError> {
    validate_root(root)?;

    let (index, stats) = Scanner::new(root).scan(progress);
    let mut report = resolve_delete(&index);
    merge_scan_failures(&mut report.failures, stats);

    if let Some(sink) = completion {
        sink.on_complete(&report.summary());
    }
    Ok(report)
}

/// Scan `root` and relocate every redundant duplicate under `destination`.
///
/// The oldest copy of each duplicate set stays in place; the rest are moved
/// into a mirror tree under `destination`, and a `files.csv` manifest of the
/// moves is written there. Fails fast with a [`ValidationError`] for bad
/// arguments; once the scan starts, per-file failures accumulate in the
/// report.
///
/// # Errors
///
/// Returns [`ValidationError`] if `root` is empty, missing, or not a
/// directory, or if `destination` is empty or occupied by a regular file.
/// No filesystem mutation has happened in that case.
pub fn run_move(
    root: &Path,
    destination: &Path,
    progress: Option<&dyn ProgressSink>,
    completion: Option<&dyn CompletionSink>,
) -> Result<MoveReport, ValidationError> {
    validate_root(root)?;
    validate_destination(destination)?;

    let (index, stats) = Scanner::new(root).scan(progress);
    let mut report = resolve_move(&index, destination);
    merge_scan_failures(&mut report.failures, stats);

    if let Some(sink) = completion {
        sink.on_complete(&report.summary());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut f = File::create(&path).unwrap();
        f.write_all(content).unwrap();
        path
    }

    #[derive(Default)]
    struct RecordingCompletion {
        message: RefCell<Option<String>>,
    }

    impl CompletionSink for RecordingCompletion {
        fn on_complete(&self, message: &str) {
            *self.message.borrow_mut() = Some(message.to_string());
        }
    }

    #[test]
    fn test_run_delete_rejects_empty_root() {
        let result = run_delete(Path::new(""), None, None);
        assert!(matches!(result, Err(ValidationError::EmptyPath)));
    }

    #[test]
    fn test_run_delete_rejects_missing_root() {
        let result = run_delete(Path::new("/no/such/dir/12345"), None, None);
        assert!(matches!(result, Err(ValidationError::Missing(_))));
    }

    #[test]
    fn test_run_delete_rejects_file_root() {
        let dir = TempDir::new().unwrap();
        let file = write_file(dir.path(), "file.txt", b"x");

        let result = run_delete(&file, None, None);
        assert!(matches!(result, Err(ValidationError::NotADirectory(_))));
        assert!(file.exists());
    }

    #[test]
    fn test_run_move_rejects_file_destination_before_mutation() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("data");
        write_file(&root, "a.txt", b"same");
        let dup = write_file(&root, "b.txt", b"same");
        let obstacle = write_file(dir.path(), "dest", b"a file, not a dir");

        let result = run_move(&root, &obstacle, None, None);

        assert!(matches!(result, Err(ValidationError::NotADirectory(_))));
        // Fail-fast: nothing was scanned or moved.
        assert!(dup.exists());
        assert_eq!(fs::read(&obstacle).unwrap(), b"a file, not a dir");
    }

    #[test]
    fn test_run_delete_reports_through_completion_sink() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", b"same");
        write_file(dir.path(), "b.txt", b"same");

        let completion = RecordingCompletion::default();
        let report = run_delete(dir.path(), None, Some(&completion)).unwrap();

        assert_eq!(report.deleted, 1);
        let message = completion.message.borrow().clone().unwrap();
        assert_eq!(message, report.summary());
        assert!(message.contains("1 duplicate file(s)"));
    }

    #[test]
    fn test_run_move_end_to_end() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("data");
        let dest = dir.path().join("quarantine");
        let kept = write_file(&root, "a.txt", b"dup content");
        let dup = write_file(&root, "sub/copy.txt", b"dup content");

        let completion = RecordingCompletion::default();
        let report = run_move(&root, &dest, None, Some(&completion)).unwrap();

        assert_eq!(report.moved, 1);
        assert!(kept.exists());
        assert!(!dup.exists());
        assert!(dest.join("sub/copy.txt").exists());
        assert!(report.manifest_path.as_ref().unwrap().exists());
        assert!(completion.message.borrow().is_some());
    }

    #[test]
    fn test_run_delete_zero_duplicates() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "one.txt", b"alpha");
        write_file(dir.path(), "two.txt", b"beta");

        let completion = RecordingCompletion::default();
        let report = run_delete(dir.path(), None, Some(&completion)).unwrap();

        assert_eq!(report.groups, 0);
        assert_eq!(report.deleted, 0);
        assert_eq!(
            completion.message.borrow().as_deref(),
            Some("No duplicate files found (0 groups)")
        );
    }
}
