//! CLI argument definitions and phase dispatch for `scoop-pipe`.
//!
//! The binary parses a [`Cli`], loads configuration and builds a client;
//! everything after that lives here in [`execute`] so it can be driven
//! with a mock client.

use crate::artefact::model::Artefact;
use crate::client::BucketClient;
use crate::client::git::GitClient;
use crate::config::{ConfigError, DEFAULT_CONFIG_FILE, ProjectConfig};
use crate::context::{ContextError, ReleaseContext};
use crate::error::PipeError;
use crate::pipe::{ManifestArtifact, ScoopPipe};
use crate::publisher::PublishOutcome;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use log::info;
use thiserror::Error;

/// Artefact list written by the build phase, relative to `dist`.
pub const ARTEFACTS_FILE: &str = "artifacts.json";

/// Generate and publish Scoop manifests for a release.
#[derive(Parser, Debug)]
#[command(name = "scoop-pipe")]
#[command(version, about)]
#[command(long_about = concat!(
    "Generate and publish Scoop manifests for a release.\n\n",
    "The run phase reads the build's artifacts.json, writes {name}.json into ",
    "the dist directory and records what the publish phase needs next to it. ",
    "The publish phase commits that manifest to the configured bucket unless ",
    "the release is a draft, disabled, a prerelease under skip_upload = \"auto\", ",
    "or skip_upload is \"true\".",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Write the manifest for v1.2.0:\n",
    "    $ scoop-pipe run --tag v1.2.0\n\n",
    "  Publish the manifest written earlier:\n",
    "    $ scoop-pipe publish --tag v1.2.0\n\n",
    "  Both phases in one go, with debug logging:\n",
    "    $ scoop-pipe -vv release --tag v1.2.0",
))]
pub struct Cli {
    /// Configuration file.
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: Utf8PathBuf,

    /// Increase log verbosity (repeatable: -v, -vv). `RUST_LOG` wins when set.
    #[arg(short, long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Phase to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write the manifest into the dist directory.
    Run(PhaseArgs),
    /// Commit a previously written manifest to the bucket.
    Publish(PhaseArgs),
    /// Run then publish.
    Release(PhaseArgs),
}

impl Command {
    /// The arguments shared by every phase.
    #[must_use]
    pub fn args(&self) -> &PhaseArgs {
        match self {
            Self::Run(args) | Self::Publish(args) | Self::Release(args) => args,
        }
    }
}

/// Arguments shared by every phase.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PhaseArgs {
    /// The release tag, e.g. `v1.2.0`.
    #[arg(short, long)]
    pub tag: String,

    /// Artefact list [default: {dist}/artifacts.json].
    #[arg(short, long, value_name = "PATH")]
    pub artifacts: Option<Utf8PathBuf>,
}

/// Errors surfaced by the binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The release context is invalid.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// The pipe failed.
    #[error(transparent)]
    Pipe(#[from] PipeError),

    /// The artefact list could not be read.
    #[error("cannot read artefacts from {path}")]
    ArtefactsRead {
        /// The artefact list path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The artefact list is not valid JSON.
    #[error("invalid artefacts file {path}")]
    ArtefactsParse {
        /// The artefact list path.
        path: Utf8PathBuf,
        /// The JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Build the release context for `tag` from configuration and the process
/// environment.
///
/// # Errors
///
/// Returns [`ContextError::InvalidTag`] when the tag is not a semantic
/// version.
pub fn release_context(
    config: &ProjectConfig,
    tag: &str,
    env: impl IntoIterator<Item = (String, String)>,
) -> Result<ReleaseContext, ContextError> {
    Ok(ReleaseContext::new(config.project_name.clone(), tag)?
        .with_draft(config.release.draft)
        .with_disable(config.release.disable)
        .with_env(env))
}

/// Build the git client described by the `[release]` table.
#[must_use]
pub fn git_client(config: &ProjectConfig) -> GitClient {
    let client = GitClient::new(config.release.download_url.as_str());
    match config.release.repository() {
        Some((owner, name)) => client.with_release_repository(owner, name),
        None => client,
    }
}

/// Read the build phase's artefact list.
///
/// # Errors
///
/// Returns [`CliError::ArtefactsRead`] or [`CliError::ArtefactsParse`].
pub fn load_artefacts(path: &Utf8Path) -> Result<Vec<Artefact>, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::ArtefactsRead {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| CliError::ArtefactsParse {
        path: path.to_owned(),
        source,
    })
}

/// Execute `command` for the release described by `ctx`.
///
/// A pipe without a bucket is skipped, as is a publish whose guard holds;
/// both succeed.
///
/// # Errors
///
/// Returns the first failure of the requested phases.
pub fn execute(
    command: &Command,
    config: &ProjectConfig,
    ctx: &ReleaseContext,
    client: &dyn BucketClient,
) -> Result<(), CliError> {
    let pipe = ScoopPipe::new(ctx, config);
    if pipe.skip() {
        info!("scoop: skipped: scoop.bucket.name is not set");
        return Ok(());
    }
    match command {
        Command::Run(args) => {
            run_phase(&pipe, config, args, client)?;
        }
        Command::Publish(_) => {
            let record = pipe.manifest_path()?.with_extension("publish.json");
            let written = ManifestArtifact::load(&record)?;
            publish_phase(&pipe, &written, client)?;
        }
        Command::Release(args) => {
            let written = run_phase(&pipe, config, args, client)?;
            publish_phase(&pipe, &written, client)?;
        }
    }
    Ok(())
}

fn run_phase(
    pipe: &ScoopPipe<'_>,
    config: &ProjectConfig,
    args: &PhaseArgs,
    client: &dyn BucketClient,
) -> Result<ManifestArtifact, CliError> {
    let path = args
        .artifacts
        .clone()
        .unwrap_or_else(|| config.dist.join(ARTEFACTS_FILE));
    let artefacts = load_artefacts(&path)?;
    let written = pipe.run(&artefacts, client)?;
    let record = written.save()?;
    info!("scoop: wrote {} ({record})", written.path);
    Ok(written)
}

fn publish_phase(
    pipe: &ScoopPipe<'_>,
    written: &ManifestArtifact,
    client: &dyn BucketClient,
) -> Result<(), CliError> {
    match pipe.publish(written, client)? {
        PublishOutcome::Published { repo, path } => info!("scoop: published {path} to {repo}"),
        PublishOutcome::Skipped(reason) => info!("scoop: skipped: {reason}"),
    }
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
