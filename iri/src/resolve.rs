//! I define [`BaseIri`],
//! an absolute IRI against which relative references can be resolved.

use crate::{InvalidIri, Iri};

/// A `BaseIri` is an absolute IRI against which relative IRIs can be
/// resolved. It stores the internal structure of the IRI, to allow for
/// efficient resolution of relative IRIs against itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BaseIri(oxiri::Iri<String>);

impl BaseIri {
    /// Create a new `BaseIri` if `iri` is a valid absolute IRI,
    /// otherwise fail with [`InvalidIri`].
    pub fn new<T: Into<String>>(iri: T) -> Result<Self, InvalidIri> {
        let iri = iri.into();
        match oxiri::Iri::parse(iri) {
            Ok(parsed) => Ok(BaseIri(parsed)),
            Err(err) => Err(InvalidIri(err.to_string())),
        }
    }

    /// Resolve `reference` against this base.
    pub fn resolve(&self, reference: &str) -> Result<Iri<Box<str>>, InvalidIri> {
        self.0
            .resolve(reference)
            .map(|iri| Iri::new_unchecked(Box::from(iri.as_str())))
            .map_err(|_| InvalidIri(reference.to_string()))
    }

    /// The text of this base IRI.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    #[test_case("g", "http://a/b/c/g"; "sibling")]
    #[test_case("./g", "http://a/b/c/g"; "dot sibling")]
    #[test_case("../g", "http://a/b/g"; "parent")]
    #[test_case("#s", "http://a/b/c/d;p?q#s"; "fragment")]
    #[test_case("", "http://a/b/c/d;p?q"; "empty")]
    #[test_case("http://x/y", "http://x/y"; "already absolute")]
    fn resolve(reference: &str, expected: &str) {
        let base = BaseIri::new("http://a/b/c/d;p?q").unwrap();
        assert_eq!(base.resolve(reference).unwrap().as_str(), expected);
    }

    #[test]
    fn relative_base_rejected() {
        assert!(BaseIri::new("../relative").is_err());
    }
}
