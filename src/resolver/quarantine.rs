//! Relocation of redundant duplicates into a quarantine tree.
//!
//! # Overview
//!
//! Instead of removing redundant copies, this mode moves them under a
//! destination directory, mirroring their position relative to the kept
//! copy's directory. Every successful move is recorded and the records are
//! serialized as a CSV manifest (`files.csv`) inside the destination, so
//! the operation can be audited or manually undone.
//!
//! Moves are best-effort per file: a failure is recorded in the report and
//! never recorded in the manifest, and processing continues.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::manifest::{DisplacementRecord, Manifest, MANIFEST_FILE_NAME};
use crate::scanner::ScanIndex;

use super::{classify_io, retain_oldest, Failure, ResolveError};

/// Results of a move run.
#[derive(Debug, Default)]
pub struct MoveReport {
    /// Duplicate groups processed (two or more members)
    pub groups: usize,
    /// Files relocated into the quarantine tree
    pub moved: usize,
    /// Total bytes relocated
    pub bytes_moved: u64,
    /// One record per successful move, in the order moves were performed
    pub records: Vec<DisplacementRecord>,
    /// Per-file failures, in the order they occurred
    pub failures: Vec<Failure>,
    /// Path of the written manifest, if writing it succeeded
    pub manifest_path: Option<PathBuf>,
}

impl MoveReport {
    /// Check if every attempted move succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the run.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.groups == 0 {
            return "No duplicate files found (0 groups)".to_string();
        }
        let mut s = format!(
            "Relocated {} duplicate file(s) across {} group(s), {} bytes",
            self.moved, self.groups, self.bytes_moved
        );
        if !self.failures.is_empty() {
            s.push_str(&format!(", {} failed", self.failures.len()));
        }
        s
    }
}

/// Move every redundant member of every duplicate group under `destination`.
///
/// The oldest member of each group (ties broken by walk order) stays at its
/// original path. Every other member is moved to `destination` joined with
/// the member's path relative to the kept copy's directory, creating
/// intermediate directories as needed. The destination directory itself is
/// created if absent.
///
/// On completion the manifest is written as `files.csv` inside the
/// destination, header row included even when nothing moved.
#[must_use]
pub fn resolve_move(index: &ScanIndex, destination: &Path) -> MoveReport {
    let mut report = MoveReport::default();

    if let Err(e) = fs::create_dir_all(destination) {
        log::error!(
            "Cannot create quarantine directory {}: {}",
            destination.display(),
            e
        );
        report
            .failures
            .push(Failure::new(destination.to_path_buf(), e.to_string()));
        return report;
    }

    for group in index.duplicate_groups() {
        report.groups += 1;

        let retention = retain_oldest(group);
        report.failures.extend(retention.failures);

        let Some(keep) = retention.canonical else {
            continue;
        };
        let keep_dir = group.files[keep]
            .path
            .parent()
            .unwrap_or_else(|| Path::new(""));

        for idx in retention.redundant {
            let file = &group.files[idx];
            let relative = relative_from(&file.path, keep_dir);
            let target = destination.join(&relative);

            match displace(&file.path, &target) {
                Ok(()) => {
                    log::info!(
                        "Relocated {} -> {}",
                        file.path.display(),
                        target.display()
                    );
                    report.moved += 1;
                    report.bytes_moved += file.size;
                    report
                        .records
                        .push(DisplacementRecord::new(file.path.clone(), target));
                }
                Err(e) => {
                    log::warn!("Failed to relocate {}: {}", file.path.display(), e);
                    report
                        .failures
                        .push(Failure::new(file.path.clone(), e.to_string()));
                }
            }
        }
    }

    match Manifest::new(&report.records).write_into_dir(destination) {
        Ok(path) => report.manifest_path = Some(path),
        Err(e) => {
            log::error!("Failed to write manifest: {}", e);
            report.failures.push(Failure::new(
                destination.join(MANIFEST_FILE_NAME),
                e.to_string(),
            ));
        }
    }

    log::info!("{}", report.summary());
    report
}

/// Move one file to its quarantine target.
///
/// Refuses to overwrite an occupied target, creates the target's parent
/// directories, and falls back to copy-then-delete when the rename crosses
/// a filesystem boundary.
fn displace(src: &Path, target: &Path) -> Result<(), ResolveError> {
    if target.exists() {
        return Err(ResolveError::DestinationExists(target.to_path_buf()));
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| classify_io(parent, e))?;
    }

    relocate_file(src, target).map_err(|e| classify_io(src, e))
}

/// Rename `src` to `dest`, copying across volumes when necessary.
///
/// On the copy path the destination is synced before the source is removed,
/// and a failed copy is cleaned up.
fn relocate_file(src: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(err) if is_cross_device_error(&err) => match fs::copy(src, dest) {
            Ok(_) => {
                let file = fs::File::open(dest)?;
                file.sync_all()?;
                fs::remove_file(src)
            }
            Err(copy_err) => {
                let _ = fs::remove_file(dest);
                Err(copy_err)
            }
        },
        Err(err) => Err(err),
    }
}

fn is_cross_device_error(err: &io::Error) -> bool {
    match err.raw_os_error() {
        Some(code) if code == 18 => true, // POSIX EXDEV
        Some(code) if code == 17 => true, // Windows ERROR_NOT_SAME_DEVICE
        _ => false,
    }
}

/// Compute `path` relative to `base`, inserting `..` components where the
/// two diverge. Both paths must share a root (they come from one walk).
fn relative_from(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part);
    }
    relative
}
