//! Placeholder expansion for configuration templates.
//!
//! Templates embed `{{ .Field }}` placeholders which are replaced with
//! values from the [`ReleaseContext`] and, when expanding per-artefact
//! values such as download URLs, from the [`Artefact`] being processed.
//! Environment variables are reachable as `{{ .Env.NAME }}`.
//!
//! This is placeholder substitution only: there are no conditionals,
//! pipelines or functions. Anything that is not a known field is an error
//! rather than silently passing through into a manifest or commit.

use crate::artefact::model::Artefact;
use crate::context::ReleaseContext;
use thiserror::Error;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A template could not be expanded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("template \"{template}\": {reason}")]
pub struct TemplateError {
    /// The template source.
    pub template: String,
    /// What went wrong.
    pub reason: String,
}

/// Expands templates against a release, optionally for one artefact.
pub trait Expand {
    /// Expand `template`, exposing `artefact` fields when one is given.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] for unknown fields, missing environment
    /// variables, artefact fields used without an artefact, or unbalanced
    /// braces.
    fn expand(&self, template: &str, artefact: Option<&Artefact>) -> Result<String, TemplateError>;
}

/// The built-in placeholder expander.
///
/// # Examples
///
/// ```
/// use scoop_pipe::context::ReleaseContext;
/// use scoop_pipe::template::{Expand, Template};
///
/// let ctx = ReleaseContext::new("myapp", "v1.2.3").expect("valid tag");
/// let message = Template::new(&ctx)
///     .expand("Scoop update for {{ .ProjectName }} version {{ .Tag }}", None)
///     .expect("template expands");
/// assert_eq!(message, "Scoop update for myapp version v1.2.3");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Template<'a> {
    ctx: &'a ReleaseContext,
}

impl<'a> Template<'a> {
    /// Create an expander for `ctx`.
    #[must_use]
    pub fn new(ctx: &'a ReleaseContext) -> Self {
        Self { ctx }
    }

    fn field(&self, name: &str, artefact: Option<&Artefact>) -> Result<String, String> {
        if let Some(var) = name.strip_prefix("Env.") {
            return self
                .ctx
                .env(var)
                .map(str::to_owned)
                .ok_or_else(|| format!("environment variable {var} is not set"));
        }

        let version = self.ctx.semver();
        let value = match name {
            "ProjectName" => self.ctx.project_name().to_owned(),
            "Tag" => self.ctx.tag().to_owned(),
            "Version" => self.ctx.version(),
            "RawVersion" => format!("{}.{}.{}", version.major, version.minor, version.patch),
            "Major" => version.major.to_string(),
            "Minor" => version.minor.to_string(),
            "Patch" => version.patch.to_string(),
            "Prerelease" => version.pre.to_string(),
            "ArtifactName" | "ArtifactPath" | "Os" | "Arch" | "Amd64" => {
                let artefact =
                    artefact.ok_or_else(|| format!(".{name} is only available for artefacts"))?;
                artefact_field(name, artefact)
            }
            other => return Err(format!("unknown field .{other}")),
        };
        Ok(value)
    }
}

fn artefact_field(name: &str, artefact: &Artefact) -> String {
    match name {
        "ArtifactName" => artefact.name.clone(),
        "ArtifactPath" => artefact.path.to_string(),
        "Os" => artefact.goos.clone(),
        "Arch" => artefact.goarch.clone(),
        _ => artefact.goamd64.clone(),
    }
}

impl Expand for Template<'_> {
    fn expand(&self, template: &str, artefact: Option<&Artefact>) -> Result<String, TemplateError> {
        let fail = |reason: String| TemplateError {
            template: template.to_owned(),
            reason,
        };

        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find(OPEN) {
            let (literal, tail) = rest.split_at(start);
            out.push_str(literal);
            let body = tail.strip_prefix(OPEN).unwrap_or(tail);
            let end = body
                .find(CLOSE)
                .ok_or_else(|| fail("unclosed \"{{\"".to_owned()))?;
            let (expr, after) = body.split_at(end);
            let expr = expr.trim();
            let name = expr
                .strip_prefix('.')
                .filter(|name| !name.is_empty() && !name.contains(char::is_whitespace))
                .ok_or_else(|| fail(format!("unsupported expression \"{expr}\"")))?;
            out.push_str(&self.field(name, artefact).map_err(fail)?);
            rest = after.strip_prefix(CLOSE).unwrap_or(after);
        }
        if rest.contains(CLOSE) {
            return Err(fail("unexpected \"}}\"".to_owned()));
        }
        out.push_str(rest);
        Ok(out)
    }
}
