//! I define the wrapper types [`IriRef`] and [`Iri`].

use std::borrow::Borrow;
use std::fmt;

use crate::InvalidIri;

/// A `str` satisfying the `IRI-reference` rule of RFC 3987
/// (i.e. either an absolute or a relative IRI reference).
///
/// Comparison, ordering and hashing all rely on the underlying text,
/// so that `IriRef<&str>` and `IriRef<Box<str>>` are interchangeable.
#[derive(Clone, Copy, Debug)]
pub struct IriRef<T: Borrow<str>>(T);

impl<T: Borrow<str>> IriRef<T> {
    /// Build an `IriRef`, checking that the given string is valid.
    pub fn new(iri: T) -> Result<Self, InvalidIri> {
        match oxiri::IriRef::parse(iri.borrow()) {
            Ok(_) => Ok(IriRef(iri)),
            Err(_) => Err(InvalidIri(iri.borrow().to_string())),
        }
    }

    /// Build an `IriRef` without checking that the given string is valid.
    ///
    /// The behaviour of functions accepting a malformed `IriRef` is undefined
    /// (in the functional sense, not in the compiler sense).
    pub fn new_unchecked(iri: T) -> Self {
        IriRef(iri)
    }

    /// The inner text of this IRI reference.
    pub fn as_str(&self) -> &str {
        self.0.borrow()
    }

    /// Whether this IRI reference is absolute (i.e. has a scheme).
    pub fn is_absolute(&self) -> bool {
        let txt = self.0.borrow();
        match txt.find(':') {
            None => false,
            Some(i) => {
                let scheme = &txt[..i];
                let mut chars = scheme.chars();
                match chars.next() {
                    Some(c) if c.is_ascii_alphabetic() => chars
                        .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.'),
                    _ => false,
                }
            }
        }
    }

    /// Unwrap the inner text.
    pub fn unwrap(self) -> T {
        self.0
    }

    /// Borrow this `IriRef`'s text in a new `IriRef`.
    pub fn as_ref(&self) -> IriRef<&str> {
        IriRef(self.0.borrow())
    }

    /// Convert into an `IriRef` owning its text.
    pub fn to_box(&self) -> IriRef<Box<str>> {
        IriRef(Box::from(self.0.borrow()))
    }
}

impl<T: Borrow<str>> fmt::Display for IriRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.borrow())
    }
}

impl<T: Borrow<str>> Borrow<str> for IriRef<T> {
    fn borrow(&self) -> &str {
        self.0.borrow()
    }
}

impl<T: Borrow<str>, U: Borrow<str>> PartialEq<IriRef<U>> for IriRef<T> {
    fn eq(&self, other: &IriRef<U>) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<T: Borrow<str>> Eq for IriRef<T> {}

impl<T: Borrow<str>, U: Borrow<str>> PartialOrd<IriRef<U>> for IriRef<T> {
    fn partial_cmp(&self, other: &IriRef<U>) -> Option<std::cmp::Ordering> {
        Some(self.as_str().cmp(other.as_str()))
    }
}

impl<T: Borrow<str>> Ord for IriRef<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl<T: Borrow<str>> std::hash::Hash for IriRef<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

/// A `str` satisfying the `IRI` rule of RFC 3987
/// (i.e. an absolute IRI reference).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Iri<T: Borrow<str>>(IriRef<T>);

impl<T: Borrow<str>> Iri<T> {
    /// Build an `Iri`, checking that the given string is a valid absolute IRI.
    pub fn new(iri: T) -> Result<Self, InvalidIri> {
        match oxiri::Iri::parse(iri.borrow()) {
            Ok(_) => Ok(Iri(IriRef(iri))),
            Err(_) => Err(InvalidIri(iri.borrow().to_string())),
        }
    }

    /// Build an `Iri` without checking the given string.
    ///
    /// See [`IriRef::new_unchecked`].
    pub fn new_unchecked(iri: T) -> Self {
        Iri(IriRef(iri))
    }

    /// The inner text of this IRI.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// View this `Iri` as an [`IriRef`].
    pub fn as_iri_ref(&self) -> IriRef<&str> {
        IriRef(self.0.as_str())
    }

    /// Unwrap the inner text.
    pub fn unwrap(self) -> T {
        self.0.unwrap()
    }
}

impl<T: Borrow<str>> fmt::Display for Iri<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    #[test_case("http://example.org/", true; "http absolute")]
    #[test_case("urn:isbn:0451450523", true; "urn")]
    #[test_case("../relative", false; "relative path")]
    #[test_case("#fragment", false; "fragment only")]
    #[test_case("", false; "empty")]
    fn absoluteness(txt: &str, expected: bool) {
        let iri = IriRef::new(txt).unwrap();
        assert_eq!(iri.is_absolute(), expected);
    }

    #[test_case("http://example.org/a b"; "space")]
    #[test_case("http://example.org/<a>"; "angle brackets")]
    fn invalid(txt: &str) {
        assert!(IriRef::new(txt).is_err());
    }

    #[test]
    fn absolute_only() {
        assert!(Iri::new("http://example.org/").is_ok());
        assert!(Iri::new("../relative").is_err());
    }
}
