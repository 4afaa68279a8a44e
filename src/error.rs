//! Exit codes for the command-line surface.

/// Exit codes for the dupesweep application.
///
/// - 0: Success (completed normally, duplicates handled)
/// - 1: General error (unexpected failure, or bad arguments)
/// - 2: No duplicates found (completed normally, nothing to do)
/// - 3: Partial success (completed with some per-file failures)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: duplicates were found and handled.
    Success = 0,
    /// General error: an unexpected error occurred.
    GeneralError = 1,
    /// No duplicates: the scan completed but found nothing redundant.
    NoDuplicates = 2,
    /// Partial success: completed but some files failed.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DS000",
            Self::GeneralError => "DS001",
            Self::NoDuplicates => "DS002",
            Self::PartialSuccess => "DS003",
        }
    }

    /// Exit code for a finished run.
    ///
    /// # Arguments
    ///
    /// * `groups` - Duplicate groups the run found
    /// * `failures` - Per-file failures the run accumulated
    #[must_use]
    pub fn for_outcome(groups: usize, failures: usize) -> Self {
        if failures > 0 {
            Self::PartialSuccess
        } else if groups == 0 {
            Self::NoDuplicates
        } else {
            Self::Success
        }
    }
}
