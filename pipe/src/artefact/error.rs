//! Error types for artefact checksums and digests.
//!
//! Each variant names the file or value involved so a failed run can be
//! diagnosed without re-running it.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors arising while computing or validating an artefact checksum.
#[derive(Debug, Error)]
pub enum ChecksumError {
    /// A SHA-256 digest is not a valid 64-character lowercase hex string.
    #[error("invalid SHA-256 digest: {reason}")]
    InvalidDigest {
        /// Description of the validation failure.
        reason: String,
    },

    /// The artefact path exists but is not a regular file.
    #[error("cannot checksum {path}: not a regular file")]
    NotAFile {
        /// Path that was expected to be a file.
        path: Utf8PathBuf,
    },

    /// The artefact file could not be opened or read.
    #[error("cannot read {path}")]
    Read {
        /// Path of the unreadable file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`ChecksumError`].
pub type Result<T> = std::result::Result<T, ChecksumError>;
