//! CSV manifest of relocated duplicates.
//!
//! A move run records every displacement as a (original path, new path)
//! pair and serializes the list as `files.csv` inside the quarantine
//! directory: UTF-8, comma separated, header row present, one data row per
//! moved file in the order the moves were performed. A run that moved
//! nothing still produces the header row.
//!
//! # Example
//!
//! ```no_run
//! use dupesweep::manifest::{DisplacementRecord, Manifest};
//! use std::path::{Path, PathBuf};
//!
//! let records = vec![DisplacementRecord::new(
//!     PathBuf::from("/data/b/x.txt"),
//!     PathBuf::from("/quarantine/b/x.txt"),
//! )];
//!
//! let written = Manifest::new(&records).write_into_dir(Path::new("/quarantine")).unwrap();
//! println!("manifest at {}", written.display());
//! ```

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// File name of the manifest inside the quarantine directory.
pub const MANIFEST_FILE_NAME: &str = "files.csv";

/// Errors that can occur while writing the manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Where a relocated duplicate came from and where it went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplacementRecord {
    /// Path the duplicate occupied before the move
    pub original: PathBuf,
    /// Path the duplicate occupies now, under the quarantine directory
    pub relocated: PathBuf,
}

impl DisplacementRecord {
    /// Create a new displacement record.
    #[must_use]
    pub fn new(original: PathBuf, relocated: PathBuf) -> Self {
        Self {
            original,
            relocated,
        }
    }
}

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow {
    /// Path the file was moved from
    original: String,
    /// Path the file was moved to
    relocated: String,
}

/// CSV manifest formatter.
pub struct Manifest<'a> {
    records: &'a [DisplacementRecord],
}

impl<'a> Manifest<'a> {
    /// Create a new manifest formatter over the given records.
    #[must_use]
    pub fn new(records: &'a [DisplacementRecord]) -> Self {
        Self { records }
    }

    /// Write the manifest to the given writer.
    ///
    /// The header row is always written, even for an empty record list.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), ManifestError> {
        // Header is written explicitly so an empty manifest still gets one.
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record(["Original File", "Duplicate File"])?;

        for record in self.records {
            csv_writer.serialize(CsvRow {
                original: record.original.to_string_lossy().to_string(),
                relocated: record.relocated.to_string_lossy().to_string(),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write the manifest as [`MANIFEST_FILE_NAME`] inside `dir`.
    ///
    /// Returns the path of the written file.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError` if the file cannot be created or written.
    pub fn write_into_dir(&self, dir: &Path) -> Result<PathBuf, ManifestError> {
        let path = dir.join(MANIFEST_FILE_NAME);
        let file = File::create(&path)?;
        self.write_to(file)?;
        log::info!(
            "Wrote manifest with {} row(s): {}",
            self.records.len(),
            path.display()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(records: &[DisplacementRecord]) -> String {
        let mut buffer = Vec::new();
        Manifest::new(records).write_to(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_manifest_header_and_rows() {
        let records = vec![
            DisplacementRecord::new(PathBuf::from("/data/b/x.txt"), PathBuf::from("/q/b/x.txt")),
            DisplacementRecord::new(PathBuf::from("/data/c/x.txt"), PathBuf::from("/q/c/x.txt")),
        ];

        let csv_str = render(&records);
        let lines: Vec<_> = csv_str.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Original File,Duplicate File");
        assert_eq!(lines[1], "/data/b/x.txt,/q/b/x.txt");
        assert_eq!(lines[2], "/data/c/x.txt,/q/c/x.txt");
    }

    #[test]
    fn test_manifest_empty_still_has_header() {
        let csv_str = render(&[]);
        assert_eq!(csv_str, "Original File,Duplicate File\n");
    }

    #[test]
    fn test_manifest_rows_keep_move_order() {
        let records: Vec<_> = (0..5)
            .map(|i| {
                DisplacementRecord::new(
                    PathBuf::from(format!("/src/{i}.txt")),
                    PathBuf::from(format!("/q/{i}.txt")),
                )
            })
            .collect();

        let csv_str = render(&records);
        let lines: Vec<_> = csv_str.lines().skip(1).collect();
        for (i, line) in lines.iter().enumerate() {
            assert!(line.starts_with(&format!("/src/{i}.txt")));
        }
    }

    #[test]
    fn test_manifest_quotes_commas_in_paths() {
        let records = vec![DisplacementRecord::new(
            PathBuf::from("/data/a,b.txt"),
            PathBuf::from("/q/a,b.txt"),
        )];

        let csv_str = render(&records);
        assert!(csv_str.contains("\"/data/a,b.txt\""));
    }

    #[test]
    fn test_manifest_write_into_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let records = vec![DisplacementRecord::new(
            PathBuf::from("/a.txt"),
            PathBuf::from("/q/a.txt"),
        )];

        let path = Manifest::new(&records).write_into_dir(dir.path()).unwrap();

        assert_eq!(path, dir.path().join(MANIFEST_FILE_NAME));
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Original File,Duplicate File\n"));
        assert!(contents.contains("/a.txt,/q/a.txt"));
    }
}
