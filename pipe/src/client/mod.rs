//! Version-control client seam for publishing manifests.
//!
//! The publish phase only needs three things from a hosting client: the
//! host's default download URL convention, a way to commit one file to a
//! repository, and a way to re-scope itself to a bucket-specific token.
//! [`BucketClient`] captures exactly that so tests can substitute a mock.
//!
//! # Sub-modules
//!
//! - [`author`] - Commit author templates and defaults.
//! - [`git`] - [`GitClient`](git::GitClient), backed by the system `git`.
//! - [`repo`] - Bucket references and resolved repositories.

pub mod author;
pub mod git;
pub mod repo;

use author::CommitAuthor;
use repo::Repo;
use thiserror::Error;

/// A single file commit to a bucket repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCommit {
    /// Who the commit is attributed to.
    pub author: CommitAuthor,
    /// The repository to commit into.
    pub repo: Repo,
    /// The file content.
    pub content: Vec<u8>,
    /// Repository-relative destination path, `/`-separated.
    pub path: String,
    /// The commit message.
    pub message: String,
}

/// Errors raised by a [`BucketClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// A git command failed or timed out.
    #[error("git {operation} failed: {message}")]
    Git {
        /// The git operation that failed (clone, commit, push, ...).
        operation: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// The client has no release repository to derive download URLs from.
    #[error("no release repository configured; set release.owner and release.name or scoop.url_template")]
    MissingReleaseRepository,

    /// The destination path escapes the repository.
    #[error("refusing to write outside the repository: {path}")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A hosted version-control client able to publish bucket files.
#[cfg_attr(test, mockall::automock)]
pub trait BucketClient {
    /// Return the host's default download URL template for release assets.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot derive a template, for
    /// example because no release repository is known.
    fn release_url_template(&self) -> Result<String, ClientError>;

    /// Create or update a file in a repository with a single commit.
    ///
    /// Committing content identical to what the repository already holds
    /// must succeed without creating a commit.
    ///
    /// # Errors
    ///
    /// Returns an error when the commit cannot be created or pushed.
    fn create_file(&self, commit: &FileCommit) -> Result<(), ClientError>;

    /// Return a client authenticated with `token` instead of the ambient
    /// credentials.
    ///
    /// # Errors
    ///
    /// Returns an error when the token cannot be applied.
    fn scoped(&self, token: &str) -> Result<Box<dyn BucketClient>, ClientError>;
}
