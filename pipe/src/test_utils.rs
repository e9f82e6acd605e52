//! Shared test utilities for the pipe crate.

use crate::artefact::kind::ArtefactKind;
use crate::artefact::model::{Artefact, ArtefactExtras};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary dist directory populated with fake archives.
#[derive(Debug)]
pub struct DistDir {
    dir: TempDir,
}

impl DistDir {
    /// Create an empty dist directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    /// The directory path.
    pub fn root(&self) -> Utf8PathBuf {
        Utf8Path::from_path(self.dir.path())
            .expect("utf-8 temp dir")
            .to_owned()
    }

    /// Write `myapp_windows_{goarch}.zip` and return its artefact record,
    /// bundling a single `myapp.exe`.
    pub fn windows_archive(&self, goarch: &str) -> Artefact {
        let name = format!("myapp_windows_{goarch}.zip");
        let path = self.root().join(&name);
        std::fs::write(&path, format!("archive for {goarch}")).expect("write archive");
        Artefact {
            name,
            path,
            goos: "windows".to_owned(),
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
                    goos: "windows".to_owned(),
                    goarch: goarch.to_owned(),
                    kind: ArtefactKind::Binary,
                    ..Artefact::default()
                }],
            },
        }
    }
}
