//! Conditions under which the publish phase does nothing.

use crate::context::ReleaseContext;
use std::fmt;

/// Why a publish was skipped.
///
/// Skips are successful no-ops: the orchestrator logs the reason and
/// carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `scoop.skip_upload` is `true`.
    SkipUpload,
    /// `scoop.skip_upload` is `auto` and the tag is a prerelease.
    Prerelease,
    /// The release is a draft.
    Draft,
    /// Releasing is disabled.
    Disabled,
}

impl SkipReason {
    /// Human-readable reason.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::SkipUpload => "scoop.skip_upload is true",
            Self::Prerelease => "release is prerelease",
            Self::Draft => "release is marked as draft",
            Self::Disabled => "release is disabled",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Evaluate the skip conditions in order and return the first that holds.
///
/// # Examples
///
/// ```
/// use scoop_pipe::context::ReleaseContext;
/// use scoop_pipe::guard::{SkipReason, check};
///
/// let ctx = ReleaseContext::new("myapp", "v1.0.0-rc1").expect("valid tag");
/// assert_eq!(check("auto", &ctx), Some(SkipReason::Prerelease));
/// assert_eq!(check("", &ctx), None);
/// ```
#[must_use]
pub fn check(skip_upload: &str, ctx: &ReleaseContext) -> Option<SkipReason> {
    let skip_upload = skip_upload.trim();
    if skip_upload == "true" {
        return Some(SkipReason::SkipUpload);
    }
    if skip_upload == "auto" && ctx.is_prerelease() {
        return Some(SkipReason::Prerelease);
    }
    if ctx.is_draft() {
        return Some(SkipReason::Draft);
    }
    if ctx.is_disabled() {
        return Some(SkipReason::Disabled);
    }
    None
}
