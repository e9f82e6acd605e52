//! SHA-256 digest newtype for manifest resources.
//!
//! Scoop compares a manifest's `hash` against the archive it downloads, so
//! the value must be exactly 64 lowercase hex characters.

use super::error::{ChecksumError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expected length of a hex-encoded SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// A hex-encoded SHA-256 digest.
///
/// Serialises as a bare string and re-validates on deserialisation.
///
/// # Examples
///
/// ```
/// use scoop_pipe::artefact::sha256_digest::Sha256Digest;
///
/// let hex = "a".repeat(64);
/// let digest = Sha256Digest::try_from(hex.as_str()).expect("valid digest");
/// assert_eq!(digest.as_str().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// The digest as lowercase hex.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Sha256Digest {
    type Error = ChecksumError;

    fn try_from(value: &str) -> Result<Self> {
        Self::try_from(value.to_owned())
    }
}

impl TryFrom<String> for Sha256Digest {
    type Error = ChecksumError;

    fn try_from(value: String) -> Result<Self> {
        match digest_problem(&value) {
            Some(reason) => Err(ChecksumError::InvalidDigest { reason }),
            None => Ok(Self(value)),
        }
    }
}

impl From<Sha256Digest> for String {
    fn from(digest: Sha256Digest) -> Self {
        digest.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn digest_problem(value: &str) -> Option<String> {
    if value.len() != DIGEST_HEX_LEN {
        return Some(format!(
            "expected {DIGEST_HEX_LEN} hex characters, got {}",
            value.len()
        ));
    }
    let bad = value
        .chars()
        .find(|c| !matches!(c, '0'..='9' | 'a'..='f'))?;
    Some(if bad.is_ascii_hexdigit() {
        "digest must be lowercase".to_owned()
    } else {
        format!("non-hex character '{bad}'")
    })
}
