//! Committing a generated manifest to its bucket.
//!
//! The guard runs before anything else, so a skipped publish never touches
//! the client. Otherwise the manifest is read back from disk, never rebuilt,
//! and committed in a single [`BucketClient::create_file`] call. Failures
//! are not retried here.

use crate::client::repo::Repo;
use crate::client::{BucketClient, FileCommit};
use crate::context::ReleaseContext;
use crate::error::{PipeError, Result};
use crate::guard::{self, SkipReason};
use crate::pipe::ManifestArtifact;
use crate::template::{Expand, Template};
use log::{debug, info};

/// What a publish did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The manifest was committed (or was already up to date).
    Published {
        /// The bucket repository.
        repo: Repo,
        /// Repository-relative manifest path.
        path: String,
    },
    /// A guard condition held; nothing was sent.
    Skipped(SkipReason),
}

/// Publish the manifest described by `artefact`.
///
/// # Errors
///
/// Returns [`PipeError::Template`] when the token, commit message, author
/// or bucket reference does not expand, [`PipeError::ManifestRead`] when
/// the manifest file is missing, [`PipeError::Client`] when the client
/// cannot be scoped and [`PipeError::RemoteWrite`] when the commit fails.
pub fn publish(
    ctx: &ReleaseContext,
    artefact: &ManifestArtifact,
    client: &dyn BucketClient,
) -> Result<PublishOutcome> {
    let config = &artefact.publish;
    if let Some(reason) = guard::check(&config.skip_upload, ctx) {
        info!("skipped {}: {reason}", artefact.name);
        return Ok(PublishOutcome::Skipped(reason));
    }

    let expander = Template::new(ctx);
    let scoped: Box<dyn BucketClient>;
    let client: &dyn BucketClient = match bucket_token(artefact, &expander)? {
        Some(token) => {
            debug!("using bucket token for {}", artefact.name);
            scoped = client.scoped(&token)?;
            scoped.as_ref()
        }
        None => client,
    };

    let message = expander
        .expand(&config.commit_msg_template, None)
        .map_err(PipeError::template("scoop.commit_msg_template"))?;
    let author = config
        .commit_author
        .resolve(&expander)
        .map_err(PipeError::template("scoop.commit_author"))?;
    let content = std::fs::read(&artefact.path).map_err(|source| PipeError::ManifestRead {
        path: artefact.path.clone(),
        source,
    })?;
    let bucket = config
        .bucket
        .expand(&expander)
        .map_err(PipeError::template("scoop.bucket"))?;
    let repo = Repo::from(&bucket);
    let path = bucket_path(&config.folder, &artefact.name);

    info!("pushing {path} to {repo}");
    let commit = FileCommit {
        author,
        repo,
        content,
        path,
        message,
    };
    client
        .create_file(&commit)
        .map_err(|source| PipeError::RemoteWrite {
            repo: commit.repo.to_string(),
            path: commit.path.clone(),
            source,
        })?;

    Ok(PublishOutcome::Published {
        repo: commit.repo,
        path: commit.path,
    })
}

/// Expand the bucket token; a blank result means the ambient client is used.
fn bucket_token(artefact: &ManifestArtifact, expander: &dyn Expand) -> Result<Option<String>> {
    let Some(template) = artefact.publish.bucket.token.as_deref() else {
        return Ok(None);
    };
    let token = expander
        .expand(template, None)
        .map_err(PipeError::template("scoop.bucket.token"))?;
    let token = token.trim();
    Ok((!token.is_empty()).then(|| token.to_owned()))
}

/// Join the bucket folder and manifest file name with `/`.
#[must_use]
pub fn bucket_path(folder: &str, name: &str) -> String {
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        name.to_owned()
    } else {
        format!("{folder}/{name}")
    }
}

#[cfg(test)]
#[path = "publisher_tests.rs"]
mod tests;
