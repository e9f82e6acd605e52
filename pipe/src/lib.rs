//! Scoop manifest generation and publishing.
//!
//! This crate turns a release's Windows archives into a Scoop app manifest
//! and commits it to a bucket repository. It is used by the `scoop-pipe`
//! CLI binary and can be driven programmatically with any
//! [`BucketClient`](client::BucketClient).
//!
//! The work happens in two phases. [`pipe::ScoopPipe::run`] selects the
//! archives, resolves their download URLs, checksums and binaries, and
//! writes the manifest to disk. [`pipe::ScoopPipe::publish`] checks the
//! skip conditions and commits exactly those bytes.
//!
//! # Modules
//!
//! - [`arch`] - Scoop architecture keys
//! - [`artefact`] - Build artefacts, filters and checksums
//! - [`cli`] - Command-line arguments and phase dispatch
//! - [`client`] - Bucket client seam and the git-backed implementation
//! - [`config`] - `.scoop-pipe.toml` loading and defaults
//! - [`context`] - The release being processed
//! - [`error`] - Pipe error taxonomy
//! - [`guard`] - Publish skip conditions
//! - [`logging`] - Log subscriber set-up for the binary
//! - [`manifest`] - The manifest document and its rendering
//! - [`pipe`] - The two-phase pipe and its publish record
//! - [`publisher`] - Committing manifests to a bucket
//! - [`resolver`] - Per-architecture download resources
//! - [`selector`] - Windows archive selection
//! - [`template`] - `{{ .Field }}` placeholder expansion

pub mod arch;
pub mod artefact;
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod guard;
pub mod logging;
pub mod manifest;
pub mod pipe;
pub mod publisher;
pub mod resolver;
pub mod selector;
pub mod template;

#[cfg(test)]
mod test_utils;
