//! Artefact classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role an artefact plays in a release.
///
/// Only [`ArtefactKind::UploadableArchive`] is eligible for a Scoop
/// manifest. Kinds this crate has no use for (SBOMs, packages, images and
/// the like) deserialise as [`ArtefactKind::Other`] so a full
/// `artifacts.json` from the build phase still loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtefactKind {
    /// A compressed bundle published with the release.
    UploadableArchive,
    /// A raw binary published with the release.
    UploadableBinary,
    /// A compiled binary that is not uploaded on its own.
    #[default]
    Binary,
    /// A checksums file.
    Checksum,
    /// A detached signature.
    Signature,
    /// A generated Scoop manifest.
    ScoopManifest,
    /// Any kind not listed above.
    #[serde(other)]
    Other,
}

impl ArtefactKind {
    /// Return the serialised name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UploadableArchive => "uploadable_archive",
            Self::UploadableBinary => "uploadable_binary",
            Self::Binary => "binary",
            Self::Checksum => "checksum",
            Self::Signature => "signature",
            Self::ScoopManifest => "scoop_manifest",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ArtefactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
