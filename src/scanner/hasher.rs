//! SHA-256 file hasher with streaming support.
//!
//! # Overview
//!
//! Computes a content fingerprint for a single file by streaming it through
//! an incremental SHA-256 accumulator in fixed-size chunks. Two files with
//! byte-identical content always produce the same digest regardless of
//! their name or location; any byte difference changes it.
//!
//! # Example
//!
//! ```no_run
//! use dupesweep::scanner::hasher::fingerprint;
//! use std::path::Path;
//!
//! match fingerprint(Path::new("/some/file.bin")) {
//!     Ok(digest) => println!("{digest}"),
//!     Err(e) => eprintln!("Warning: {e}"),
//! }
//! ```

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use super::HashError;

/// Read size for streaming file content through the hasher.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Compute the SHA-256 digest of a file's content, hex-encoded.
///
/// The file is opened, streamed in [`CHUNK_SIZE`] chunks, and closed before
/// returning on every path, including read failures. No partial digest is
/// ever produced: any I/O error discards the accumulator state.
///
/// # Errors
///
/// - [`HashError::NotFound`] if the file vanished before hashing began
/// - [`HashError::PermissionDenied`] if the file cannot be read
/// - [`HashError::Io`] for any other I/O failure
pub fn fingerprint(path: &Path) -> Result<String, HashError> {
    let file = File::open(path).map_err(|e| classify(path, e))?;
    let mut reader = BufReader::with_capacity(CHUNK_SIZE, file);
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buffer).map_err(|e| classify(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Map an I/O error to a [`HashError`] for the given path.
fn classify(path: &Path, error: io::Error) -> HashError {
    match error.kind() {
        io::ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
        _ => HashError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}
