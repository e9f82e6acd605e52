//! The artefact record produced by the build phase.
//!
//! Artefacts are read-only here. The build phase attaches an
//! [`ArtefactExtras`] value to every archive describing the binaries it
//! bundles and the directory they are wrapped in.

use super::checksum::compute_sha256;
use super::error::Result;
use super::kind::ArtefactKind;
use super::sha256_digest::Sha256Digest;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// A built release asset.
///
/// # Examples
///
/// ```
/// use scoop_pipe::artefact::kind::ArtefactKind;
/// use scoop_pipe::artefact::model::Artefact;
///
/// let json = r#"{
///     "name": "myapp_windows_amd64.zip",
///     "path": "dist/myapp_windows_amd64.zip",
///     "goos": "windows",
///     "goarch": "amd64",
///     "goamd64": "v1",
///     "type": "uploadable_archive",
///     "extra": { "builds": [{ "name": "myapp.exe" }] }
/// }"#;
/// let artefact: Artefact = serde_json::from_str(json).expect("valid artefact");
/// assert_eq!(artefact.kind, ArtefactKind::UploadableArchive);
/// assert_eq!(artefact.extra.builds.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artefact {
    /// File name of the artefact, e.g. `myapp_windows_amd64.zip`.
    pub name: String,
    /// Location of the artefact on disk.
    #[serde(default)]
    pub path: Utf8PathBuf,
    /// Target operating system (`windows`, `linux`, ...).
    #[serde(default)]
    pub goos: String,
    /// Target architecture (`amd64`, `386`, `arm64`, ...).
    #[serde(default)]
    pub goarch: String,
    /// amd64 micro-architecture level (`v1` to `v4`); empty elsewhere.
    #[serde(default)]
    pub goamd64: String,
    /// What the artefact is.
    #[serde(rename = "type", default)]
    pub kind: ArtefactKind,
    /// Build-phase metadata about the archive contents.
    #[serde(default)]
    pub extra: ArtefactExtras,
}

/// Typed build-phase metadata attached to an artefact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtefactExtras {
    /// Directory inside the archive that wraps its contents, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapped_in: Option<String>,
    /// The binaries bundled into the archive.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub builds: Vec<Artefact>,
}

impl Artefact {
    /// Compute the SHA-256 checksum of the artefact file.
    ///
    /// # Errors
    ///
    /// Returns a [`ChecksumError`](super::error::ChecksumError) if the path
    /// is not a regular file or cannot be read.
    pub fn checksum(&self) -> Result<Sha256Digest> {
        compute_sha256(&self.path)
    }

    /// Return the in-archive relative paths of the bundled binaries.
    ///
    /// Each build name is joined onto the wrap directory with `/`, the
    /// separator Scoop expects regardless of the host platform.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoop_pipe::artefact::model::{Artefact, ArtefactExtras};
    ///
    /// let archive = Artefact {
    ///     name: "myapp_windows_386.zip".to_owned(),
    ///     extra: ArtefactExtras {
    ///         wrapped_in: Some("myapp_1.0.0".to_owned()),
    ///         builds: vec![Artefact {
    ///             name: "myapp.exe".to_owned(),
    ///             ..Artefact::default()
    ///         }],
    ///     },
    ///     ..Artefact::default()
    /// };
    /// assert_eq!(archive.binaries(), vec!["myapp_1.0.0/myapp.exe"]);
    /// ```
    #[must_use]
    pub fn binaries(&self) -> Vec<String> {
        let wrap = self
            .extra
            .wrapped_in
            .as_deref()
            .map(|dir| dir.trim_end_matches('/'))
            .filter(|dir| !dir.is_empty());
        self.extra
            .builds
            .iter()
            .map(|build| match wrap {
                Some(dir) => format!("{dir}/{}", build.name),
                None => build.name.clone(),
            })
            .collect()
    }
}
