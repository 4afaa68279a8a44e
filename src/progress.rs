//! Progress and completion reporting.
//!
//! The core pipeline is pure and synchronous; anything it has to say while
//! running goes through the [`ProgressSink`] and [`CompletionSink`] traits,
//! invoked inline at well-defined points (once per processed file, once per
//! finished operation). Callers that do not care pass `None`.
//!
//! [`Progress`] implements both traits on top of indicatif for terminal
//! output.

use std::path::Path;
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

/// Per-file progress notifications from a scan.
///
/// Implement this trait to observe the scan as it walks. All methods are
/// called from the scanning thread, in order, with no reentrancy.
pub trait ProgressSink {
    /// Called once before hashing begins.
    ///
    /// # Arguments
    ///
    /// * `total_files` - Exact number of regular files the scan will visit
    fn on_scan_start(&self, _total_files: usize) {}

    /// Called after each file is processed (hashed or failed).
    ///
    /// # Arguments
    ///
    /// * `path` - The file just processed
    /// * `percent` - Exact completion percentage, 0-100
    fn on_file(&self, path: &Path, percent: u8);

    /// Called once after the last file.
    fn on_scan_end(&self) {}
}

/// Terminal notification once an operation finishes.
pub trait CompletionSink {
    /// Called with a final status message (e.g. a report summary).
    fn on_complete(&self, message: &str);
}

/// Progress reporter using indicatif.
///
/// Renders a single progress bar during the scan and prints the completion
/// message afterwards. With `quiet` set, both are suppressed.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, nothing is displayed.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }
}

impl ProgressSink for Progress {
    fn on_scan_start(&self, total_files: usize) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total_files as u64);
        pb.set_style(Self::bar_style());
        pb.set_message("Hashing");
        *self.bar.lock().unwrap() = Some(pb);
    }

    fn on_file(&self, path: &Path, _percent: u8) {
        if self.quiet {
            return;
        }

        if let Some(ref pb) = *self.bar.lock().unwrap() {
            pb.inc(1);
            pb.set_message(truncate_path(&path.to_string_lossy(), 30));
        }
    }

    fn on_scan_end(&self) {
        if self.quiet {
            return;
        }

        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.finish_with_message("Hashing complete");
        }
    }
}

impl CompletionSink for Progress {
    fn on_complete(&self, message: &str) {
        if self.quiet {
            return;
        }
        println!("{message}");
    }
}

/// Truncate a path for display in the progress bar.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.len() <= max_len {
        return path.to_string();
    }

    let path_buf = std::path::Path::new(path);
    let file_name = path_buf
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if file_name.len() >= max_len {
        return format!("...{}", &file_name[file_name.len() - max_len + 3..]);
    }

    format!(".../{}", file_name)
}
