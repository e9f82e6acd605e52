//! Bucket client backed by the system `git` binary.
//!
//! Each [`BucketClient::create_file`] call clones the bucket into a fresh
//! temporary directory, writes the file, and pushes a single commit. If the
//! file already holds the same content nothing is committed, which keeps
//! repeated publishes of the same tag free of empty commits. Operations
//! have a timeout to prevent hangs on network issues.

use super::{BucketClient, ClientError, FileCommit};
use crate::client::repo::Repo;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use std::process::{Command, Output, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Default timeout for git operations (5 minutes).
const GIT_TIMEOUT: Duration = Duration::from_secs(300);

/// Default host for repositories and release downloads.
pub const DEFAULT_DOWNLOAD_URL: &str = "https://github.com";

/// A [`BucketClient`] that shells out to `git`.
///
/// # Examples
///
/// ```
/// use scoop_pipe::client::BucketClient;
/// use scoop_pipe::client::git::GitClient;
///
/// let client = GitClient::new("https://github.com").with_release_repository("acme", "myapp");
/// let template = client.release_url_template().expect("release repository is set");
/// assert_eq!(
///     template,
///     "https://github.com/acme/myapp/releases/download/{{ .Tag }}/{{ .ArtifactName }}"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitClient {
    download_url: String,
    release: Option<(String, String)>,
    token: Option<String>,
}

impl GitClient {
    /// Create a client for the host at `download_url`.
    #[must_use]
    pub fn new(download_url: impl Into<String>) -> Self {
        Self {
            download_url: download_url.into().trim_end_matches('/').to_owned(),
            release: None,
            token: None,
        }
    }

    /// Set the repository whose releases host the artefacts.
    #[must_use]
    pub fn with_release_repository(mut self, owner: impl Into<String>, name: impl Into<String>) -> Self {
        self.release = Some((owner.into(), name.into()));
        self
    }

    /// Return the clone URL for `repo`, with the token embedded for HTTP(S)
    /// hosts.
    #[must_use]
    pub fn remote_url(&self, repo: &Repo) -> String {
        let base = match (&self.token, self.download_url.split_once("://")) {
            (Some(token), Some((scheme @ ("http" | "https"), host))) => {
                format!("{scheme}://x-access-token:{token}@{host}")
            }
            _ => self.download_url.clone(),
        };
        format!("{base}/{}/{}.git", repo.owner, repo.name)
    }

    /// Remove the token from text that may echo the remote URL.
    fn redact(&self, text: &str) -> String {
        match &self.token {
            Some(token) if !token.is_empty() => text.replace(token.as_str(), "***"),
            _ => text.to_owned(),
        }
    }

    fn git(&self, args: &[&str], working_dir: Option<&Utf8Path>, operation: &'static str) -> Result<Output, ClientError> {
        let output = run_git_with_timeout(args, working_dir, operation)?;
        if output.status.success() {
            return Ok(output);
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(ClientError::Git {
            operation,
            message: self.redact(stderr.trim()),
        })
    }

    fn checkout(&self, repo: &Repo, dir: &Utf8Path) -> Result<(), ClientError> {
        let url = self.remote_url(repo);
        let mut args = vec!["clone", "--quiet", "--depth", "1"];
        if let Some(branch) = &repo.branch {
            args.extend(["--branch", branch.as_str()]);
        }
        args.extend([url.as_str(), dir.as_str()]);
        self.git(&args, None, "clone").map(drop)
    }

    /// Stage `path` and report whether it differs from `HEAD`.
    fn stage(&self, dir: &Utf8Path, path: &str) -> Result<bool, ClientError> {
        self.git(&["add", "--", path], Some(dir), "add")?;
        let output = run_git_with_timeout(
            &["diff", "--cached", "--quiet", "--", path],
            Some(dir),
            "diff",
        )?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(ClientError::Git {
                operation: "diff",
                message: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            }),
        }
    }
}

impl BucketClient for GitClient {
    fn release_url_template(&self) -> Result<String, ClientError> {
        let (owner, name) = self
            .release
            .as_ref()
            .ok_or(ClientError::MissingReleaseRepository)?;
        Ok(format!(
            "{}/{owner}/{name}/releases/download/{{{{ .Tag }}}}/{{{{ .ArtifactName }}}}",
            self.download_url
        ))
    }

    fn create_file(&self, commit: &FileCommit) -> Result<(), ClientError> {
        let relative = validate_relative_path(&commit.path)?;
        let workdir = tempfile::Builder::new().prefix("scoop-bucket-").tempdir()?;
        let dir = Utf8PathBuf::try_from(workdir.path().to_path_buf()).map_err(|err| {
            ClientError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                err.to_string(),
            ))
        })?;

        debug!("cloning {} into {dir}", commit.repo);
        self.checkout(&commit.repo, &dir)?;

        let target = dir.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, &commit.content)?;

        if !self.stage(&dir, &commit.path)? {
            info!("{} in {} is already up to date", commit.path, commit.repo);
            return Ok(());
        }

        let name = format!("user.name={}", commit.author.name);
        let email = format!("user.email={}", commit.author.email);
        self.git(
            &[
                "-c",
                name.as_str(),
                "-c",
                email.as_str(),
                "commit",
                "--quiet",
                "-m",
                commit.message.as_str(),
            ],
            Some(&dir),
            "commit",
        )?;
        self.git(&["push", "--quiet", "origin", "HEAD"], Some(&dir), "push")?;
        info!("pushed {} to {}", commit.path, commit.repo);
        Ok(())
    }

    fn scoped(&self, token: &str) -> Result<Box<dyn BucketClient>, ClientError> {
        Ok(Box::new(Self {
            token: Some(token.to_owned()),
            ..self.clone()
        }))
    }
}

/// Reject absolute paths and parent-directory components.
fn validate_relative_path(path: &str) -> Result<&Utf8Path, ClientError> {
    let candidate = Utf8Path::new(path);
    let escapes = candidate.is_absolute()
        || path.starts_with('/')
        || candidate
            .components()
            .any(|component| matches!(component, camino::Utf8Component::ParentDir));
    if path.is_empty() || escapes {
        return Err(ClientError::InvalidPath {
            path: path.to_owned(),
        });
    }
    Ok(candidate)
}

/// Runs a git command with a timeout.
///
/// Returns the command output if it completes within the timeout, or an error
/// if the command times out or fails to start.
fn run_git_with_timeout(
    args: &[&str],
    working_dir: Option<&Utf8Path>,
    operation: &'static str,
) -> Result<Output, ClientError> {
    let mut cmd = Command::new("git");
    cmd.args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(dir) = working_dir {
        cmd.current_dir(dir.as_std_path());
    }

    let mut child = cmd.spawn()?;

    match child.wait_timeout(GIT_TIMEOUT)? {
        Some(status) => {
            let stdout = child
                .stdout
                .take()
                .map(std::io::read_to_string)
                .transpose()?
                .unwrap_or_default();
            let stderr = child
                .stderr
                .take()
                .map(std::io::read_to_string)
                .transpose()?
                .unwrap_or_default();

            Ok(Output {
                status,
                stdout: stdout.into_bytes(),
                stderr: stderr.into_bytes(),
            })
        }
        None => {
            // Timeout - kill the process
            let _ = child.kill();
            let _ = child.wait();
            Err(ClientError::Git {
                operation,
                message: format!(
                    "operation timed out after {} seconds",
                    GIT_TIMEOUT.as_secs()
                ),
            })
        }
    }
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
