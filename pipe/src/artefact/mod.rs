//! Release artefacts as recorded by the build phase.
//!
//! # Sub-modules
//!
//! - [`checksum`] - Streaming SHA-256 computation.
//! - [`error`] - Checksum and digest errors.
//! - [`filter`] - Composable artefact predicates.
//! - [`kind`] - Artefact classification (`ArtefactKind`).
//! - [`model`] - The artefact record (`Artefact`, `ArtefactExtras`).
//! - [`sha256_digest`] - SHA-256 digest newtype (`Sha256Digest`).

pub mod checksum;
pub mod error;
pub mod filter;
pub mod kind;
pub mod model;
pub mod sha256_digest;
