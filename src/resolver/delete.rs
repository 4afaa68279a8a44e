//! In-place removal of redundant duplicates.
//!
//! # Overview
//!
//! For every group with two or more members, the oldest copy stays on disk
//! untouched and every other member is permanently removed. There are no
//! trash semantics: removal cannot be undone.
//!
//! Deletion is best-effort per file. A failure (permission denied, already
//! removed, path too long) is recorded in the report and processing moves
//! on to the next file.
//!
//! # Example
//!
//! ```no_run
//! use dupesweep::scanner::Scanner;
//! use dupesweep::resolver::resolve_delete;
//! use std::path::Path;
//!
//! let (index, _) = Scanner::new(Path::new("/data")).scan(None);
//! let report = resolve_delete(&index);
//! println!("{}", report.summary());
//! ```

use std::fs;

use crate::scanner::ScanIndex;

use super::{classify_io, retain_oldest, Failure};

/// Results of a delete run.
#[derive(Debug, Default)]
pub struct DeleteReport {
    /// Duplicate groups processed (two or more members)
    pub groups: usize,
    /// Files permanently removed
    pub deleted: usize,
    /// Total bytes freed
    pub bytes_freed: u64,
    /// Per-file failures, in the order they occurred
    pub failures: Vec<Failure>,
}

impl DeleteReport {
    /// Check if every attempted removal succeeded.
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
            "Removed {} duplicate file(s) across {} group(s), freed {} bytes",
            self.deleted, self.groups, self.bytes_freed
        );
        if !self.failures.is_empty() {
            s.push_str(&format!(", {} failed", self.failures.len()));
        }
        s
    }
}

/// Remove every redundant member of every duplicate group.
///
/// The oldest member of each group (ties broken by walk order) is kept;
/// the rest are removed with [`fs::remove_file`]. Groups with a single
/// member are skipped entirely.
#[must_use]
pub fn resolve_delete(index: &ScanIndex) -> DeleteReport {
    let mut report = DeleteReport::default();

    for group in index.duplicate_groups() {
        report.groups += 1;

        let retention = retain_oldest(group);
        report.failures.extend(retention.failures);

        for idx in retention.redundant {
            let file = &group.files[idx];
            match fs::remove_file(&file.path) {
                Ok(()) => {
                    log::info!(
                        "Removed duplicate: {} ({} bytes)",
                        file.path.display(),
                        file.size
                    );
                    report.deleted += 1;
                    report.bytes_freed += file.size;
                }
                Err(e) => {
                    let err = classify_io(&file.path, e);
                    log::warn!("Failed to remove {}: {}", file.path.display(), err);
                    report
                        .failures
                        .push(Failure::new(file.path.clone(), err.to_string()));
                }
            }
        }
    }

    log::info!("{}", report.summary());
    report
}
