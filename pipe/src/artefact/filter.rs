//! Composable artefact predicates.
//!
//! Each helper returns a boxed predicate so filters can be assembled from
//! configuration at runtime and combined with [`and`] and [`or`].

use super::kind::ArtefactKind;
use super::model::Artefact;

/// A predicate over artefacts.
pub type Filter = Box<dyn Fn(&Artefact) -> bool>;

/// Match artefacts built for the given operating system.
#[must_use]
pub fn by_goos(goos: &str) -> Filter {
    let goos = goos.to_owned();
    Box::new(move |artefact| artefact.goos == goos)
}

/// Match artefacts built for the given architecture.
#[must_use]
pub fn by_goarch(goarch: &str) -> Filter {
    let goarch = goarch.to_owned();
    Box::new(move |artefact| artefact.goarch == goarch)
}

/// Match amd64 artefacts built for the given micro-architecture level.
#[must_use]
pub fn by_goamd64(level: &str) -> Filter {
    let level = level.to_owned();
    Box::new(move |artefact| artefact.goamd64 == level)
}

/// Match artefacts of the given kind.
#[must_use]
pub fn by_kind(kind: ArtefactKind) -> Filter {
    Box::new(move |artefact| artefact.kind == kind)
}

/// Match artefacts accepted by every filter.
#[must_use]
pub fn and(filters: Vec<Filter>) -> Filter {
    Box::new(move |artefact| filters.iter().all(|filter| filter(artefact)))
}

/// Match artefacts accepted by at least one filter.
#[must_use]
pub fn or(filters: Vec<Filter>) -> Filter {
    Box::new(move |artefact| filters.iter().any(|filter| filter(artefact)))
}

/// Return the artefacts accepted by `filter`, preserving their order.
///
/// # Examples
///
/// ```
/// use scoop_pipe::artefact::filter::{by_goos, select};
/// use scoop_pipe::artefact::model::Artefact;
///
/// let artefacts = vec![
///     Artefact { name: "a".to_owned(), goos: "linux".to_owned(), ..Artefact::default() },
///     Artefact { name: "b".to_owned(), goos: "windows".to_owned(), ..Artefact::default() },
/// ];
/// let windows = select(&artefacts, &by_goos("windows"));
/// assert_eq!(windows.len(), 1);
/// assert_eq!(windows[0].name, "b");
/// ```
#[must_use]
pub fn select<'a>(artefacts: &'a [Artefact], filter: &Filter) -> Vec<&'a Artefact> {
    artefacts.iter().filter(|&artefact| filter(artefact)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn artefact(goos: &str, goarch: &str, goamd64: &str) -> Artefact {
        Artefact {
            name: format!("app_{goos}_{goarch}"),
            goos: goos.to_owned(),
            goarch: goarch.to_owned(),
            goamd64: goamd64.to_owned(),
            kind: ArtefactKind::UploadableArchive,
            ..Artefact::default()
        }
    }

    #[rstest]
    #[case::both_match("windows", "amd64", true)]
    #[case::wrong_os("linux", "amd64", false)]
    #[case::wrong_arch("windows", "arm64", false)]
    fn and_requires_every_filter(#[case] goos: &str, #[case] goarch: &str, #[case] expected: bool) {
        let filter = and(vec![by_goos("windows"), by_goarch("amd64")]);
        assert_eq!(filter(&artefact(goos, goarch, "")), expected);
    }

    #[rstest]
    #[case::first("amd64", true)]
    #[case::second("386", true)]
    #[case::neither("arm64", false)]
    fn or_accepts_any_filter(#[case] goarch: &str, #[case] expected: bool) {
        let filter = or(vec![by_goarch("amd64"), by_goarch("386")]);
        assert_eq!(filter(&artefact("windows", goarch, "")), expected);
    }

    #[test]
    fn empty_and_accepts_everything_and_empty_or_rejects_everything() {
        let sample = artefact("windows", "amd64", "v1");
        assert!(and(Vec::new())(&sample));
        assert!(!or(Vec::new())(&sample));
    }

    #[test]
    fn by_kind_and_goamd64_compare_exactly() {
        let sample = artefact("windows", "amd64", "v2");
        assert!(by_kind(ArtefactKind::UploadableArchive)(&sample));
        assert!(!by_kind(ArtefactKind::Binary)(&sample));
        assert!(by_goamd64("v2")(&sample));
        assert!(!by_goamd64("v1")(&sample));
    }
}
