//! Error types for the Scoop pipe.
//!
//! Each variant names the artefact, architecture, file or repository that
//! failed so a broken release can be diagnosed from the message alone.
//! Skipping a publish is not an error; see
//! [`PublishOutcome`](crate::publisher::PublishOutcome).

use crate::arch::ArchKey;
use crate::artefact::error::ChecksumError;
use crate::client::ClientError;
use crate::template::TemplateError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while generating or publishing a manifest.
#[derive(Debug, Error)]
pub enum PipeError {
    /// No Windows archive was produced by the build.
    #[error("scoop requires a windows build and archive")]
    NoWindowsBuild,

    /// A configured template could not be expanded.
    #[error("failed to expand {field}")]
    Template {
        /// The configuration field holding the template.
        field: &'static str,
        /// The expansion failure.
        #[source]
        source: TemplateError,
    },

    /// The expanded manifest name is not a plain file name.
    #[error("invalid manifest name {name:?}: must be a single path component")]
    InvalidManifestName {
        /// The expanded name.
        name: String,
    },

    /// The download URL template could not be expanded for an archive.
    #[error("failed to expand scoop.url_template for {artefact} ({arch})")]
    UrlExpansion {
        /// The archive name.
        artefact: String,
        /// The architecture the archive was selected for.
        arch: ArchKey,
        /// The expansion failure.
        #[source]
        source: TemplateError,
    },

    /// An archive could not be checksummed.
    #[error("failed to checksum {path} for {arch}")]
    Checksum {
        /// The archive path.
        path: Utf8PathBuf,
        /// The architecture the archive was selected for.
        arch: ArchKey,
        /// The underlying checksum failure.
        #[source]
        source: ChecksumError,
    },

    /// An archive carries no record of the binaries it bundles.
    #[error("archive {artefact} ({arch}) has no recorded builds")]
    Metadata {
        /// The archive name.
        artefact: String,
        /// The architecture the archive was selected for.
        arch: ArchKey,
    },

    /// The client could not supply a default download URL template.
    #[error("failed to determine the download URL template")]
    UrlTemplate(#[source] ClientError),

    /// The manifest could not be committed to the bucket.
    #[error("failed to write {path} to {repo}")]
    RemoteWrite {
        /// The bucket repository, as `owner/name[@branch]`.
        repo: String,
        /// Repository-relative destination path.
        path: String,
        /// The client failure.
        #[source]
        source: ClientError,
    },

    /// The manifest could not be written to the dist directory.
    #[error("failed to write manifest to {path}")]
    ManifestWrite {
        /// The destination path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A previously written manifest could not be read back.
    #[error("failed to read manifest from {path}")]
    ManifestRead {
        /// The manifest path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest or its publish record could not be (de)serialised.
    #[error("manifest serialisation failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The client could not be scoped or otherwise failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl PipeError {
    /// Wrap a template failure for the named configuration field.
    #[must_use]
    pub fn template(field: &'static str) -> impl FnOnce(TemplateError) -> Self {
        move |source| Self::Template { field, source }
    }
}

/// Result type alias using [`PipeError`].
pub type Result<T> = std::result::Result<T, PipeError>;
