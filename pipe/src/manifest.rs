//! The Scoop app manifest and its serialised form.
//!
//! Rendering is deterministic: keys follow declaration order, architecture
//! entries are sorted (`32bit` before `64bit`), empty optional fields are
//! omitted and the output is indented with four spaces without a trailing
//! newline. The bytes written by the run phase are exactly the bytes the
//! publish phase commits.

use crate::arch::ArchKey;
use crate::artefact::sha256_digest::Sha256Digest;
use crate::config::ScoopConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Download details for one architecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Archive download URL.
    pub url: String,
    /// Executables inside the archive, `/`-separated.
    pub bin: Vec<String>,
    /// SHA-256 of the archive.
    pub hash: Sha256Digest,
}

/// A Scoop app manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// The released version, without a leading `v`.
    pub version: String,
    /// Per-architecture downloads.
    pub architecture: BTreeMap<ArchKey, Resource>,
    /// Project homepage.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub homepage: String,
    /// Licence identifier.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub license: String,
    /// One-line description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Paths kept across updates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub persist: Vec<String>,
    /// Commands run before installation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_install: Vec<String>,
    /// Commands run after installation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_install: Vec<String>,
}

impl Manifest {
    /// Combine static metadata from `config` with resolved resources.
    #[must_use]
    pub fn from_config(
        version: impl Into<String>,
        config: &ScoopConfig,
        architecture: BTreeMap<ArchKey, Resource>,
    ) -> Self {
        Self {
            version: version.into(),
            architecture,
            homepage: config.homepage.clone(),
            license: config.license.clone(),
            description: config.description.clone(),
            persist: config.persist.clone(),
            pre_install: config.pre_install.clone(),
            post_install: config.post_install.clone(),
        }
    }
}

/// Serialise `manifest` to pretty JSON with four-space indentation.
///
/// # Errors
///
/// Returns [`PipeError::Serialization`](crate::error::PipeError::Serialization)
/// if serialisation fails.
///
/// # Examples
///
/// ```
/// use scoop_pipe::manifest::{Manifest, render_manifest};
/// use std::collections::BTreeMap;
///
/// let manifest = Manifest {
///     version: "1.0.0".to_owned(),
///     architecture: BTreeMap::new(),
///     homepage: String::new(),
///     license: "MIT".to_owned(),
///     description: String::new(),
///     persist: Vec::new(),
///     pre_install: Vec::new(),
///     post_install: Vec::new(),
/// };
/// let bytes = render_manifest(&manifest).expect("renders");
/// assert_eq!(
///     String::from_utf8(bytes).expect("utf-8"),
///     "{\n    \"version\": \"1.0.0\",\n    \"architecture\": {},\n    \"license\": \"MIT\"\n}"
/// );
/// ```
pub fn render_manifest(manifest: &Manifest) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    manifest.serialize(&mut serializer)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn digest(fill: char) -> Sha256Digest {
        Sha256Digest::try_from(fill.to_string().repeat(64)).expect("valid digest")
    }

    #[fixture]
    fn manifest() -> Manifest {
        let mut architecture = BTreeMap::new();
        architecture.insert(
            ArchKey::Bits64,
            Resource {
                url: "https://example.com/v1.0.0/myapp_windows_amd64.zip".to_owned(),
                bin: vec!["myapp.exe".to_owned()],
                hash: digest('b'),
            },
        );
        architecture.insert(
            ArchKey::Bits32,
            Resource {
                url: "https://example.com/v1.0.0/myapp_windows_386.zip".to_owned(),
                bin: vec!["myapp.exe".to_owned()],
                hash: digest('a'),
            },
        );
        Manifest {
            version: "1.0.0".to_owned(),
            architecture,
            homepage: "https://example.com".to_owned(),
            license: "MIT".to_owned(),
            description: "An app".to_owned(),
            persist: vec!["data".to_owned(), "config.toml".to_owned()],
            pre_install: vec!["Write-Host \"pre\"".to_owned()],
            post_install: Vec::new(),
        }
    }

    #[rstest]
    fn renders_exact_bytes(manifest: Manifest) {
        let rendered = String::from_utf8(render_manifest(&manifest).expect("renders")).expect("utf-8");
        let a = "a".repeat(64);
        let b = "b".repeat(64);
        let expected = format!(
            r#"{{
    "version": "1.0.0",
    "architecture": {{
        "32bit": {{
            "url": "https://example.com/v1.0.0/myapp_windows_386.zip",
            "bin": [
                "myapp.exe"
            ],
            "hash": "{a}"
        }},
        "64bit": {{
            "url": "https://example.com/v1.0.0/myapp_windows_amd64.zip",
            "bin": [
                "myapp.exe"
            ],
            "hash": "{b}"
        }}
    }},
    "homepage": "https://example.com",
    "license": "MIT",
    "description": "An app",
    "persist": [
        "data",
        "config.toml"
    ],
    "pre_install": [
        "Write-Host \"pre\""
    ]
}}"#
        );
        assert_eq!(rendered, expected);
    }

    #[rstest]
    fn parsing_rendered_output_round_trips(manifest: Manifest) {
        let rendered = render_manifest(&manifest).expect("renders");
        let parsed: Manifest = serde_json::from_slice(&rendered).expect("parses");
        assert_eq!(parsed, manifest);
    }

    #[rstest]
    fn rendering_is_deterministic(manifest: Manifest) {
        let first = render_manifest(&manifest).expect("renders");
        let second = render_manifest(&manifest.clone()).expect("renders");
        assert_eq!(first, second);
    }

    #[test]
    fn from_config_copies_static_metadata() {
        let config = ScoopConfig {
            homepage: "https://example.com".to_owned(),
            license: "Apache-2.0".to_owned(),
            description: "desc".to_owned(),
            persist: vec!["data".to_owned()],
            pre_install: vec!["pre".to_owned()],
            post_install: vec!["post".to_owned()],
            ..ScoopConfig::default()
        };
        let manifest = Manifest::from_config("2.0.0", &config, BTreeMap::new());
        assert_eq!(manifest.version, "2.0.0");
        assert_eq!(manifest.license, "Apache-2.0");
        assert_eq!(manifest.persist, vec!["data"]);
        assert_eq!(manifest.pre_install, vec!["pre"]);
        assert_eq!(manifest.post_install, vec!["post"]);
    }

    #[test]
    fn rejects_malformed_hashes_when_parsing() {
        let json = r#"{"version":"1.0.0","architecture":{"64bit":{"url":"u","bin":[],"hash":"abc"}}}"#;
        assert!(serde_json::from_str::<Manifest>(json).is_err());
    }
}
