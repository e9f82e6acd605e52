//! Streaming SHA-256 computation for artefact files.

use super::error::{ChecksumError, Result};
use super::sha256_digest::Sha256Digest;
use camino::Utf8Path;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Read;

/// Compute the SHA-256 digest of a file.
///
/// Reads the file at `path` in chunks and returns the lowercase hex
/// digest as a validated [`Sha256Digest`].
///
/// # Errors
///
/// Returns [`ChecksumError::NotAFile`] when `path` is a directory or other
/// non-regular file, and [`ChecksumError::Read`] when it cannot be read.
pub fn compute_sha256(path: &Utf8Path) -> Result<Sha256Digest> {
    let read_error = |source| ChecksumError::Read {
        path: path.to_owned(),
        source,
    };
    let metadata = fs::metadata(path).map_err(read_error)?;
    if !metadata.is_file() {
        return Err(ChecksumError::NotAFile {
            path: path.to_owned(),
        });
    }

    let mut file = fs::File::open(path).map_err(read_error)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer).map_err(read_error)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(buffer.get(..bytes_read).unwrap_or_default());
    }
    Sha256Digest::try_from(format!("{:x}", hasher.finalize()))
}
