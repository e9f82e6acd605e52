//! Commit author resolution.

use crate::template::{Expand, TemplateError};
use serde::{Deserialize, Serialize};

/// Author name used when none is configured.
pub const DEFAULT_AUTHOR_NAME: &str = "scoop-pipe-bot";

/// Author email used when none is configured.
pub const DEFAULT_AUTHOR_EMAIL: &str = "bot@scoop-pipe.dev";

/// The identity a bucket commit is attributed to.
///
/// Both fields may contain placeholders; they are expanded at publish time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommitAuthor {
    /// Author name.
    pub name: String,
    /// Author email.
    pub email: String,
}

impl CommitAuthor {
    /// Fill blank fields with the default bot identity.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoop_pipe::client::author::{CommitAuthor, DEFAULT_AUTHOR_EMAIL};
    ///
    /// let author = CommitAuthor { name: "Ada".to_owned(), email: String::new() }.with_defaults();
    /// assert_eq!(author.name, "Ada");
    /// assert_eq!(author.email, DEFAULT_AUTHOR_EMAIL);
    /// ```
    #[must_use]
    pub fn with_defaults(self) -> Self {
        Self {
            name: non_blank_or(self.name, DEFAULT_AUTHOR_NAME),
            email: non_blank_or(self.email, DEFAULT_AUTHOR_EMAIL),
        }
    }

    /// Expand the name and email templates.
    ///
    /// A field that expands to nothing falls back to the default identity,
    /// so an unset environment-driven author still produces a valid commit.
    ///
    /// # Errors
    ///
    /// Returns the first [`TemplateError`] encountered.
    pub fn resolve(&self, expander: &dyn Expand) -> Result<Self, TemplateError> {
        Ok(Self {
            name: expander.expand(&self.name, None)?,
            email: expander.expand(&self.email, None)?,
        }
        .with_defaults())
    }
}

fn non_blank_or(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_owned()
    } else {
        value
    }
}
