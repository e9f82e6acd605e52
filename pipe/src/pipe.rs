//! The two-phase Scoop pipe.
//!
//! [`ScoopPipe::run`] turns the build's artefacts into a manifest on local
//! disk and hands back a [`ManifestArtifact`]: the manifest location plus a
//! [`PublishConfig`] snapshot. [`ScoopPipe::publish`] needs nothing else,
//! so the two phases can run in different processes by persisting the
//! record with [`ManifestArtifact::save`].

use crate::artefact::model::Artefact;
use crate::client::BucketClient;
use crate::client::author::CommitAuthor;
use crate::client::repo::RepoRef;
use crate::config::{ProjectConfig, ScoopConfig};
use crate::context::ReleaseContext;
use crate::error::{PipeError, Result};
use crate::manifest::{Manifest, render_manifest};
use crate::publisher::{self, PublishOutcome};
use crate::resolver::{resolve_resources, resolve_url_template};
use crate::selector::select_windows_archives;
use crate::template::{Expand, Template};
use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Everything the publish phase needs from the configuration.
///
/// Templates are kept unexpanded; they are expanded against the release
/// context at publish time. The URL template is the one resolved during
/// the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishConfig {
    /// The bucket repository reference.
    pub bucket: RepoRef,
    /// Bucket sub-directory for the manifest.
    pub folder: String,
    /// Commit message template.
    pub commit_msg_template: String,
    /// Commit author templates.
    pub commit_author: CommitAuthor,
    /// Skip directive (`true`, `auto`, or anything else).
    pub skip_upload: String,
    /// The download URL template used for the manifest.
    pub url_template: String,
}

impl PublishConfig {
    /// Snapshot `config` together with the resolved URL template.
    #[must_use]
    pub fn new(config: &ScoopConfig, url_template: String) -> Self {
        Self {
            bucket: config.bucket.clone(),
            folder: config.folder.clone(),
            commit_msg_template: config.commit_msg_template.clone(),
            commit_author: config.commit_author.clone(),
            skip_upload: config.skip_upload.clone(),
            url_template,
        }
    }
}

/// A manifest written by the run phase, ready to publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestArtifact {
    /// Manifest file name, `{name}.json`.
    pub name: String,
    /// Where the manifest was written.
    pub path: Utf8PathBuf,
    /// Publish settings captured during the run.
    pub publish: PublishConfig,
}

impl ManifestArtifact {
    /// Where [`Self::save`] writes the record: next to the manifest, as
    /// `{name}.publish.json`.
    #[must_use]
    pub fn record_path(&self) -> Utf8PathBuf {
        self.path.with_extension("publish.json")
    }

    /// Persist the record next to the manifest and return its path.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::Serialization`] or [`PipeError::ManifestWrite`].
    pub fn save(&self) -> Result<Utf8PathBuf> {
        let path = self.record_path();
        let bytes = serde_json::to_vec_pretty(self)?;
        write_atomically(&path, &bytes)?;
        Ok(path)
    }

    /// Load a record written by [`Self::save`].
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::ManifestRead`] when the file cannot be read and
    /// [`PipeError::Serialization`] when it is not a valid record.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| PipeError::ManifestRead {
            path: path.to_owned(),
            source,
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// The Scoop pipe for one release.
///
/// # Examples
///
/// ```
/// use scoop_pipe::config::ProjectConfig;
/// use scoop_pipe::context::ReleaseContext;
/// use scoop_pipe::pipe::ScoopPipe;
///
/// let config = ProjectConfig::from_toml_str("project_name = \"myapp\"\n").expect("valid");
/// let ctx = ReleaseContext::new("myapp", "v1.0.0").expect("valid tag");
/// // No bucket is configured, so there is nothing to do.
/// assert!(ScoopPipe::new(&ctx, &config).skip());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScoopPipe<'a> {
    ctx: &'a ReleaseContext,
    config: &'a ProjectConfig,
}

impl<'a> ScoopPipe<'a> {
    /// Create the pipe for `ctx` configured by `config`.
    #[must_use]
    pub fn new(ctx: &'a ReleaseContext, config: &'a ProjectConfig) -> Self {
        Self { ctx, config }
    }

    /// Whether the pipe is disabled because no bucket is configured.
    #[must_use]
    pub fn skip(&self) -> bool {
        self.config.scoop.bucket.name.trim().is_empty()
    }

    /// Expanded manifest name.
    ///
    /// The name becomes a file name in `dist` and in the bucket, so it must
    /// be a single path component.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::Template`] when `scoop.name` does not expand and
    /// [`PipeError::InvalidManifestName`] when the result is empty, `.`,
    /// `..`, or contains a path separator.
    pub fn manifest_name(&self) -> Result<String> {
        let name = Template::new(self.ctx)
            .expand(&self.config.scoop.name, None)
            .map_err(PipeError::template("scoop.name"))?;
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed == "." || trimmed == ".." || trimmed.contains(['/', '\\']) {
            return Err(PipeError::InvalidManifestName { name });
        }
        Ok(trimmed.to_owned())
    }

    /// Where the run phase writes the manifest.
    ///
    /// # Errors
    ///
    /// See [`Self::manifest_name`].
    pub fn manifest_path(&self) -> Result<Utf8PathBuf> {
        Ok(self.config.dist.join(format!("{}.json", self.manifest_name()?)))
    }

    /// Generate the manifest and write it to `{dist}/{name}.json`.
    ///
    /// The Windows-build precondition is checked before the client is
    /// consulted, and the client's default URL template is fetched at most
    /// once. Nothing is written unless every archive resolves.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::NoWindowsBuild`] when no archive qualifies,
    /// [`PipeError::InvalidManifestName`] before the client is consulted
    /// when the name is unusable, or the first resolution, rendering or
    /// write failure.
    pub fn run(&self, artefacts: &[Artefact], client: &dyn BucketClient) -> Result<ManifestArtifact> {
        let scoop = &self.config.scoop;
        let archives = select_windows_archives(artefacts, &scoop.goamd64)?;
        let name = format!("{}.json", self.manifest_name()?);
        let url_template = resolve_url_template(scoop, client)?;
        let architecture = resolve_resources(&archives, &url_template, &Template::new(self.ctx))?;

        let manifest = Manifest::from_config(self.ctx.version(), scoop, architecture);
        let bytes = render_manifest(&manifest)?;

        let path = self.config.dist.join(&name);
        info!("writing {path}");
        write_atomically(&path, &bytes)?;

        Ok(ManifestArtifact {
            name,
            path,
            publish: PublishConfig::new(scoop, url_template),
        })
    }

    /// Publish a manifest produced by [`Self::run`].
    ///
    /// # Errors
    ///
    /// See [`publisher::publish`].
    pub fn publish(&self, artefact: &ManifestArtifact, client: &dyn BucketClient) -> Result<PublishOutcome> {
        publisher::publish(self.ctx, artefact, client)
    }
}

/// Write `bytes` to `path` via a temporary file in the same directory, so
/// readers never observe a partial file.
fn write_atomically(path: &Utf8Path, bytes: &[u8]) -> Result<()> {
    let write_error = |source| PipeError::ManifestWrite {
        path: path.to_owned(),
        source,
    };
    let dir = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    std::fs::create_dir_all(dir).map_err(write_error)?;
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(bytes).map_err(write_error)?;
    file.persist(path).map_err(|err| write_error(err.error))?;
    Ok(())
}

#[cfg(test)]
#[path = "pipe_tests.rs"]
mod tests;
