//! Scoop architecture keys.
//!
//! Scoop groups per-architecture download details under the keys `32bit`
//! and `64bit`. Only the Go architectures `386` and `amd64` map onto them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Scoop manifest architecture key.
///
/// Ordering follows the serialised names so manifests list `32bit` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ArchKey {
    /// 32-bit x86 (`386`).
    #[serde(rename = "32bit")]
    Bits32,
    /// 64-bit x86 (`amd64`).
    #[serde(rename = "64bit")]
    Bits64,
}

impl ArchKey {
    /// Map a Go architecture name onto a Scoop key.
    ///
    /// Returns `None` for architectures Scoop manifests do not describe.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoop_pipe::arch::ArchKey;
    ///
    /// assert_eq!(ArchKey::from_goarch("amd64"), Some(ArchKey::Bits64));
    /// assert_eq!(ArchKey::from_goarch("386"), Some(ArchKey::Bits32));
    /// assert_eq!(ArchKey::from_goarch("arm64"), None);
    /// ```
    #[must_use]
    pub fn from_goarch(goarch: &str) -> Option<Self> {
        match goarch {
            "386" => Some(Self::Bits32),
            "amd64" => Some(Self::Bits64),
            _ => None,
        }
    }

    /// Return the manifest key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bits32 => "32bit",
            Self::Bits64 => "64bit",
        }
    }
}

impl fmt::Display for ArchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::x86(ArchKey::Bits32)]
    #[case::x86_64(ArchKey::Bits64)]
    fn serialised_key_matches_display(#[case] key: ArchKey) {
        let json = serde_json::to_string(&key).expect("serialisation succeeds");
        assert_eq!(json, format!("\"{key}\""));
    }

    #[test]
    fn thirty_two_bit_sorts_first() {
        assert!(ArchKey::Bits32 < ArchKey::Bits64);
    }

    #[rstest]
    #[case("arm64")]
    #[case("arm")]
    #[case("")]
    fn unsupported_architectures_have_no_key(#[case] goarch: &str) {
        assert_eq!(ArchKey::from_goarch(goarch), None);
    }
}
