//! Test support utilities for scoop-pipe behavioural tests.
//!
//! Provides a recording [`BucketClient`] stub and a temporary dist
//! directory that writes fake Windows archives.

#![allow(dead_code, reason = "each behaviour binary uses a different subset")]

use camino::{Utf8Path, Utf8PathBuf};
use scoop_pipe::artefact::kind::ArtefactKind;
use scoop_pipe::artefact::model::{Artefact, ArtefactExtras};
use scoop_pipe::client::{BucketClient, ClientError, FileCommit};
use std::cell::RefCell;
use std::rc::Rc;
use tempfile::TempDir;

/// Default URL template handed out by [`StubClient`].
pub const STUB_URL_TEMPLATE: &str =
    "https://github.com/acme/myapp/releases/download/{{ .Tag }}/{{ .ArtifactName }}";

/// Everything a [`StubClient`] (and the clients it scopes) was asked to do.
#[derive(Debug, Default)]
pub struct Calls {
    /// Number of default URL template lookups.
    pub url_template: usize,
    /// Tokens passed to `scoped`.
    pub scoped: Vec<String>,
    /// Commits with the token of the client that made them.
    pub commits: Vec<(Option<String>, FileCommit)>,
}

impl Calls {
    /// Total number of client interactions.
    #[must_use]
    pub fn total(&self) -> usize {
        self.url_template + self.scoped.len() + self.commits.len()
    }
}

/// A [`BucketClient`] that records calls instead of talking to a host.
#[derive(Debug, Clone, Default)]
pub struct StubClient {
    calls: Rc<RefCell<Calls>>,
    token: Option<String>,
}

impl StubClient {
    /// Shared view of the recorded calls.
    #[must_use]
    pub fn calls(&self) -> Rc<RefCell<Calls>> {
        Rc::clone(&self.calls)
    }
}

impl BucketClient for StubClient {
    fn release_url_template(&self) -> Result<String, ClientError> {
        self.calls.borrow_mut().url_template += 1;
        Ok(STUB_URL_TEMPLATE.to_owned())
    }

    fn create_file(&self, commit: &FileCommit) -> Result<(), ClientError> {
        self.calls
            .borrow_mut()
            .commits
            .push((self.token.clone(), commit.clone()));
        Ok(())
    }

    fn scoped(&self, token: &str) -> Result<Box<dyn BucketClient>, ClientError> {
        self.calls.borrow_mut().scoped.push(token.to_owned());
        Ok(Box::new(Self {
            calls: Rc::clone(&self.calls),
            token: Some(token.to_owned()),
        }))
    }
}

/// A temporary dist directory.
#[derive(Debug)]
pub struct Dist {
    dir: TempDir,
}

impl Default for Dist {
    fn default() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }
}

impl Dist {
    /// The directory path.
    #[must_use]
    pub fn root(&self) -> Utf8PathBuf {
        Utf8Path::from_path(self.dir.path())
            .expect("utf-8 temp dir")
            .to_owned()
    }

    /// Write an archive named `name` and return its record, bundling
    /// `myapp.exe`.
    #[must_use]
    pub fn archive(&self, name: &str, goos: &str, goarch: &str) -> Artefact {
        let path = self.root().join(name);
        std::fs::write(&path, name).expect("write archive");
        Artefact {
            name: name.to_owned(),
            path,
            goos: goos.to_owned(),
            goarch: goarch.to_owned(),
            goamd64: if goarch == "amd64" {
                "v1".to_owned()
            } else {
                String::new()
            },
            kind: ArtefactKind::UploadableArchive,
            extra: ArtefactExtras {
                wrapped_in: None,
                builds: vec![Artefact {
                    name: "myapp.exe".to_owned(),
                    kind: ArtefactKind::Binary,
                    ..Artefact::default()
                }],
            },
        }
    }
}
