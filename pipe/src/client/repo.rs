//! Bucket repository references.
//!
//! A [`RepoRef`] is what the configuration says, placeholders included. It
//! is expanded once per publish into a [`Repo`], the concrete repository
//! the commit goes to.

use crate::template::{Expand, TemplateError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A possibly templated reference to a bucket repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepoRef {
    /// Repository owner (user or organisation).
    pub owner: String,
    /// Repository name.
    pub name: String,
    /// Branch to commit to; the remote default branch when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Bucket-specific access token; the ambient client is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl RepoRef {
    /// Expand placeholders in the owner, name and branch.
    ///
    /// The token is left untouched; it is expanded separately when the
    /// client is scoped so it never ends up in a [`Repo`].
    ///
    /// # Errors
    ///
    /// Returns the first [`TemplateError`] encountered.
    pub fn expand(&self, expander: &dyn Expand) -> Result<Self, TemplateError> {
        let branch = self
            .branch
            .as_deref()
            .map(|branch| expander.expand(branch, None))
            .transpose()?
            .filter(|branch| !branch.trim().is_empty());
        Ok(Self {
            owner: expander.expand(&self.owner, None)?,
            name: expander.expand(&self.name, None)?,
            branch,
            token: self.token.clone(),
        })
    }
}

/// A concrete repository to commit into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub name: String,
    /// Target branch, if not the default one.
    pub branch: Option<String>,
}

impl From<&RepoRef> for Repo {
    fn from(reference: &RepoRef) -> Self {
        Self {
            owner: reference.owner.clone(),
            name: reference.name.clone(),
            branch: reference.branch.clone(),
        }
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)?;
        if let Some(branch) = &self.branch {
            write!(f, "@{branch}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ReleaseContext;
    use crate::template::Template;

    fn ctx() -> ReleaseContext {
        ReleaseContext::new("myapp", "v1.0.0")
            .expect("valid tag")
            .with_env([("BUCKET_OWNER".to_owned(), "acme".to_owned())])
    }

    #[test]
    fn expand_resolves_owner_name_and_branch() {
        let reference = RepoRef {
            owner: "{{ .Env.BUCKET_OWNER }}".to_owned(),
            name: "{{ .ProjectName }}-bucket".to_owned(),
            branch: Some("release-{{ .Major }}".to_owned()),
            token: Some("{{ .Env.TOKEN }}".to_owned()),
        };
        let ctx = ctx();
        let expanded = reference.expand(&Template::new(&ctx)).expect("expands");
        assert_eq!(expanded.owner, "acme");
        assert_eq!(expanded.name, "myapp-bucket");
        assert_eq!(expanded.branch.as_deref(), Some("release-1"));
        assert_eq!(expanded.token.as_deref(), Some("{{ .Env.TOKEN }}"));
    }

    #[test]
    fn blank_branch_falls_back_to_default() {
        let reference = RepoRef {
            owner: "acme".to_owned(),
            name: "bucket".to_owned(),
            branch: Some("  ".to_owned()),
            token: None,
        };
        let ctx = ctx();
        let expanded = reference.expand(&Template::new(&ctx)).expect("expands");
        assert_eq!(expanded.branch, None);
    }

    #[test]
    fn expand_propagates_template_errors() {
        let reference = RepoRef {
            owner: "{{ .Env.UNSET }}".to_owned(),
            ..RepoRef::default()
        };
        let ctx = ctx();
        assert!(reference.expand(&Template::new(&ctx)).is_err());
    }

    #[test]
    fn repo_display_includes_branch() {
        let repo = Repo {
            owner: "acme".to_owned(),
            name: "bucket".to_owned(),
            branch: Some("main".to_owned()),
        };
        assert_eq!(repo.to_string(), "acme/bucket@main");
        let repo = Repo { branch: None, ..repo };
        assert_eq!(repo.to_string(), "acme/bucket");
    }
}
