//! Per-architecture download resources.
//!
//! Each selected archive becomes one [`Resource`]: its download URL, its
//! SHA-256 digest and the in-archive paths of the binaries it bundles.

use crate::arch::ArchKey;
use crate::artefact::model::Artefact;
use crate::client::BucketClient;
use crate::config::ScoopConfig;
use crate::error::{PipeError, Result};
use crate::manifest::Resource;
use crate::template::Expand;
use log::{debug, warn};
use std::collections::BTreeMap;

/// Return the download URL template for this run.
///
/// A non-blank `scoop.url_template` wins. Otherwise the client's default
/// template is fetched; callers do this once per run and reuse the result.
///
/// # Errors
///
/// Returns [`PipeError::UrlTemplate`] when the client cannot supply a
/// default.
pub fn resolve_url_template(config: &ScoopConfig, client: &dyn BucketClient) -> Result<String> {
    if !config.url_template.trim().is_empty() {
        return Ok(config.url_template.clone());
    }
    let template = client.release_url_template().map_err(PipeError::UrlTemplate)?;
    debug!("using default url template {template}");
    Ok(template)
}

/// Build the resource for a single archive.
///
/// # Errors
///
/// Fails when the URL template does not expand, the archive cannot be
/// checksummed, or it has no recorded builds.
pub fn resolve_resource(
    artefact: &Artefact,
    arch: ArchKey,
    url_template: &str,
    expander: &dyn Expand,
) -> Result<Resource> {
    let url = expander
        .expand(url_template, Some(artefact))
        .map_err(|source| PipeError::UrlExpansion {
            artefact: artefact.name.clone(),
            arch,
            source,
        })?;
    debug!("resolved {arch} download url {url}");

    let hash = artefact.checksum().map_err(|source| PipeError::Checksum {
        path: artefact.path.clone(),
        arch,
        source,
    })?;

    if artefact.extra.builds.is_empty() {
        return Err(PipeError::Metadata {
            artefact: artefact.name.clone(),
            arch,
        });
    }

    Ok(Resource {
        url,
        bin: artefact.binaries(),
        hash,
    })
}

/// Resolve every archive into the manifest's architecture mapping.
///
/// Archives for architectures Scoop cannot describe are skipped. When two
/// archives map onto the same key the later one wins.
///
/// # Errors
///
/// Returns the first failure from [`resolve_resource`]; no partial mapping
/// is returned.
pub fn resolve_resources(
    archives: &[&Artefact],
    url_template: &str,
    expander: &dyn Expand,
) -> Result<BTreeMap<ArchKey, Resource>> {
    let mut architecture = BTreeMap::new();
    for &artefact in archives {
        let Some(arch) = ArchKey::from_goarch(&artefact.goarch) else {
            debug!("ignoring {} built for {}", artefact.name, artefact.goarch);
            continue;
        };
        let resource = resolve_resource(artefact, arch, url_template, expander)?;
        if architecture.insert(arch, resource).is_some() {
            warn!("{} replaces an earlier {arch} archive", artefact.name);
        }
    }
    Ok(architecture)
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
