//! Release context shared by both pipe phases.
//!
//! Captures what is being released (project, tag, parsed version), the
//! release-level switches the publish guard consults, and the environment
//! exposed to templates as `{{ .Env.NAME }}`.

use semver::Version;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors building a [`ReleaseContext`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// The tag does not carry a semantic version.
    #[error("tag {tag} is not a semantic version: {reason}")]
    InvalidTag {
        /// The rejected tag.
        tag: String,
        /// Parser message.
        reason: String,
    },
}

/// Everything the pipe knows about the release being processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseContext {
    project_name: String,
    tag: String,
    semver: Version,
    draft: bool,
    disable: bool,
    env: BTreeMap<String, String>,
}

impl ReleaseContext {
    /// Build a context for `tag`, which may carry a leading `v`.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::InvalidTag`] when the tag is not a semantic
    /// version.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoop_pipe::context::ReleaseContext;
    ///
    /// let ctx = ReleaseContext::new("myapp", "v1.0.0-rc1").expect("valid tag");
    /// assert_eq!(ctx.version(), "1.0.0-rc1");
    /// assert!(ctx.is_prerelease());
    /// ```
    pub fn new(project_name: impl Into<String>, tag: impl Into<String>) -> Result<Self, ContextError> {
        let tag = tag.into();
        let raw = tag.strip_prefix('v').unwrap_or(&tag);
        let semver = Version::parse(raw).map_err(|err| ContextError::InvalidTag {
            tag: tag.clone(),
            reason: err.to_string(),
        })?;
        Ok(Self {
            project_name: project_name.into(),
            tag,
            semver,
            draft: false,
            disable: false,
            env: BTreeMap::new(),
        })
    }

    /// Mark the release as a draft.
    #[must_use]
    pub fn with_draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }

    /// Mark the release as disabled.
    #[must_use]
    pub fn with_disable(mut self, disable: bool) -> Self {
        self.disable = disable;
        self
    }

    /// Replace the environment visible to templates.
    #[must_use]
    pub fn with_env(mut self, env: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env = env.into_iter().collect();
        self
    }

    /// The project name.
    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// The git tag as given, e.g. `v1.2.3`.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The version string written into the manifest (tag without `v`).
    #[must_use]
    pub fn version(&self) -> String {
        self.semver.to_string()
    }

    /// The parsed semantic version.
    #[must_use]
    pub fn semver(&self) -> &Version {
        &self.semver
    }

    /// Whether the version carries a pre-release component.
    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        !self.semver.pre.is_empty()
    }

    /// Whether the release is a draft.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.draft
    }

    /// Whether releasing is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disable
    }

    /// Look up an environment variable exposed to templates.
    #[must_use]
    pub fn env(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(String::as_str)
    }
}
