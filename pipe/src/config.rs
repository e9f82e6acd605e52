//! Project configuration loaded from `.scoop-pipe.toml`.
//!
//! Every table is optional and unknown keys are rejected, so a typo in a
//! key name fails loudly instead of silently falling back to a default.
//! [`ProjectConfig::load`] applies the Scoop defaults once after parsing;
//! downstream code can assume they are in place.

use crate::client::author::CommitAuthor;
use crate::client::git::DEFAULT_DOWNLOAD_URL;
use crate::client::repo::RepoRef;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;

/// Default configuration file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".scoop-pipe.toml";

/// Commit message used when none is configured.
pub const DEFAULT_COMMIT_MSG_TEMPLATE: &str = "Scoop update for {{ .ProjectName }} version {{ .Tag }}";

/// amd64 micro-architecture level preferred when none is configured.
pub const DEFAULT_GOAMD64: &str = "v1";

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read configuration {path}")]
    Read {
        /// The configuration path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration.
    #[error("invalid configuration {path}")]
    Parse {
        /// The configuration path.
        path: Utf8PathBuf,
        /// The TOML parser error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// No project name is configured.
    #[error("project_name must be set")]
    MissingProjectName,

    /// The bucket token is a literal secret rather than a template.
    #[error("scoop.bucket.token must reference the environment, e.g. \"{{{{ .Env.SCOOP_BUCKET_TOKEN }}}}\"")]
    LiteralToken,
}

/// The whole configuration file.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// The project being released.
    pub project_name: String,
    /// Directory holding build artefacts and generated manifests.
    pub dist: Utf8PathBuf,
    /// Release-level switches and the release repository.
    pub release: ReleaseConfig,
    /// Scoop manifest and bucket settings.
    pub scoop: ScoopConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            dist: Utf8PathBuf::from("dist"),
            release: ReleaseConfig::default(),
            scoop: ScoopConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Read, parse and default the configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, does not parse,
    /// names no project, or holds a literal bucket token.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let parsed: Self = toml::from_str(&source).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source: Box::new(source),
        })?;
        parsed.with_defaults()
    }

    /// Parse and default configuration held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] (with an `<inline>` path),
    /// [`ConfigError::MissingProjectName`] or [`ConfigError::LiteralToken`].
    ///
    /// # Examples
    ///
    /// ```
    /// use scoop_pipe::config::ProjectConfig;
    ///
    /// let config = ProjectConfig::from_toml_str("project_name = \"myapp\"\n").expect("valid");
    /// assert_eq!(config.scoop.name, "myapp");
    /// assert_eq!(config.scoop.goamd64, "v1");
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let parsed: Self = toml::from_str(source).map_err(|source| ConfigError::Parse {
            path: Utf8PathBuf::from("<inline>"),
            source: Box::new(source),
        })?;
        parsed.with_defaults()
    }

    fn with_defaults(self) -> Result<Self, ConfigError> {
        let project_name = self.project_name.trim().to_owned();
        if project_name.is_empty() {
            return Err(ConfigError::MissingProjectName);
        }
        // The token travels unexpanded into the publish record on disk.
        let literal_token = self
            .scoop
            .bucket
            .token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty() && !token.contains("{{"));
        if literal_token {
            return Err(ConfigError::LiteralToken);
        }
        let scoop = self.scoop.with_defaults(&project_name);
        Ok(Self {
            project_name,
            scoop,
            ..self
        })
    }
}

/// Release-level settings shared with other publishers.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseConfig {
    /// The release is a draft; publishing is skipped.
    pub draft: bool,
    /// Releasing is disabled; publishing is skipped.
    pub disable: bool,
    /// Owner of the repository hosting release downloads.
    pub owner: String,
    /// Name of the repository hosting release downloads.
    pub name: String,
    /// Base URL of the hosting service.
    pub download_url: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            draft: false,
            disable: false,
            owner: String::new(),
            name: String::new(),
            download_url: DEFAULT_DOWNLOAD_URL.to_owned(),
        }
    }
}

impl ReleaseConfig {
    /// The release repository, when both owner and name are set.
    #[must_use]
    pub fn repository(&self) -> Option<(&str, &str)> {
        let owner = self.owner.trim();
        let name = self.name.trim();
        (!owner.is_empty() && !name.is_empty()).then_some((owner, name))
    }
}

/// The `[scoop]` table.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoopConfig {
    /// Manifest name; the file is written as `{name}.json`.
    pub name: String,
    /// Bucket sub-directory for the manifest.
    pub folder: String,
    /// Project homepage.
    pub homepage: String,
    /// Licence identifier.
    pub license: String,
    /// One-line description.
    pub description: String,
    /// Paths Scoop keeps across updates.
    pub persist: Vec<String>,
    /// Commands run before installation.
    pub pre_install: Vec<String>,
    /// Commands run after installation.
    pub post_install: Vec<String>,
    /// Download URL template; the client's default is used when blank.
    pub url_template: String,
    /// Commit message template.
    pub commit_msg_template: String,
    /// `"true"` skips publishing, `"auto"` skips prereleases.
    pub skip_upload: String,
    /// Preferred amd64 micro-architecture level.
    pub goamd64: String,
    /// The bucket repository.
    pub bucket: RepoRef,
    /// Who bucket commits are attributed to.
    pub commit_author: CommitAuthor,
}

impl ScoopConfig {
    /// Fill unset fields with their defaults.
    ///
    /// The manifest name falls back to `project_name`, the commit message to
    /// [`DEFAULT_COMMIT_MSG_TEMPLATE`], the amd64 level to
    /// [`DEFAULT_GOAMD64`], and the commit author to the bot identity.
    #[must_use]
    pub fn with_defaults(self, project_name: &str) -> Self {
        Self {
            name: or_default(self.name, project_name),
            commit_msg_template: or_default(self.commit_msg_template, DEFAULT_COMMIT_MSG_TEMPLATE),
            goamd64: or_default(self.goamd64, DEFAULT_GOAMD64),
            commit_author: self.commit_author.with_defaults(),
            ..self
        }
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_owned()
    } else {
        value
    }
}
