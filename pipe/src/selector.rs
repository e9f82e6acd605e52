//! Selection of the Windows archives a manifest is built from.

use crate::artefact::filter::{and, by_goamd64, by_goarch, by_goos, by_kind, or, select};
use crate::artefact::kind::ArtefactKind;
use crate::artefact::model::Artefact;
use crate::error::{PipeError, Result};

/// Return the Windows archives eligible for a Scoop manifest.
///
/// An artefact qualifies when it is an uploadable archive built for
/// Windows, and is either amd64 at the preferred `goamd64` level or 386.
/// Input order is preserved.
///
/// # Errors
///
/// Returns [`PipeError::NoWindowsBuild`] when nothing qualifies.
///
/// # Examples
///
/// ```
/// use scoop_pipe::artefact::kind::ArtefactKind;
/// use scoop_pipe::artefact::model::Artefact;
/// use scoop_pipe::selector::select_windows_archives;
///
/// let archive = Artefact {
///     name: "myapp_windows_386.zip".to_owned(),
///     goos: "windows".to_owned(),
///     goarch: "386".to_owned(),
///     kind: ArtefactKind::UploadableArchive,
///     ..Artefact::default()
/// };
/// let selected = select_windows_archives(std::slice::from_ref(&archive), "v1").expect("one archive");
/// assert_eq!(selected, vec![&archive]);
/// ```
pub fn select_windows_archives<'a>(artefacts: &'a [Artefact], goamd64: &str) -> Result<Vec<&'a Artefact>> {
    let filter = and(vec![
        by_goos("windows"),
        by_kind(ArtefactKind::UploadableArchive),
        or(vec![
            and(vec![by_goarch("amd64"), by_goamd64(goamd64)]),
            by_goarch("386"),
        ]),
    ]);
    let selected = select(artefacts, &filter);
    if selected.is_empty() {
        return Err(PipeError::NoWindowsBuild);
    }
    Ok(selected)
}
