//! I define [`Prefix`] and [`PrefixMap`],
//! associating namespace prefixes to IRIs,
//! as declared by `@prefix` / `PREFIX` in Turtle.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use terrapin_iri::IriRef;

lazy_static! {
    /// Match a valid (possibly empty) PN_PREFIX.
    static ref PN_PREFIX: Regex = Regex::new(r"(?x)^
        (
            [A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}]
            (
                [A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}_0-9\u{00B7}\u{0300}-\u{036F}\u{203F}-\u{2040}.-]*
                [A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}_0-9\u{00B7}\u{0300}-\u{036F}\u{203F}-\u{2040}-]
            )?
        )?
    $").unwrap();
}

/// This error is raised when trying to build an invalid [`Prefix`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("The given prefix is invalid: {0:?}")]
pub struct InvalidPrefix(pub String);

/// A valid Turtle namespace prefix (possibly the empty default prefix).
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Prefix(Box<str>);

impl Prefix {
    /// Build a `Prefix`, checking the given text against the `PN_PREFIX`
    /// production (the empty string is accepted, as the default prefix).
    pub fn new<T: AsRef<str>>(prefix: T) -> Result<Self, InvalidPrefix> {
        let txt = prefix.as_ref();
        if PN_PREFIX.is_match(txt) {
            Ok(Prefix(Box::from(txt)))
        } else {
            Err(InvalidPrefix(txt.to_string()))
        }
    }

    /// Build a `Prefix` without checking the given text.
    pub fn new_unchecked<T: AsRef<str>>(prefix: T) -> Self {
        Prefix(Box::from(prefix.as_ref()))
    }

    /// The text of this prefix (without the trailing colon).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A prefix map associates prefixes to namespace IRIs.
///
/// Insertion order is preserved; re-declaring a prefix replaces its
/// namespace in place, as in Turtle.
#[derive(Clone, Debug, Default)]
pub struct PrefixMap {
    pairs: Vec<(Prefix, IriRef<Box<str>>)>,
}

impl PrefixMap {
    /// Build an empty prefix map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of prefixes in this map.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether this map is empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Associate `prefix` to `ns`, replacing any previous association.
    pub fn insert(&mut self, prefix: Prefix, ns: IriRef<Box<str>>) {
        for (p, n) in &mut self.pairs {
            if *p == prefix {
                *n = ns;
                return;
            }
        }
        self.pairs.push((prefix, ns));
    }

    /// Return the namespace IRI associated to this prefix, if any.
    pub fn get_namespace(&self, prefix: &str) -> Option<&IriRef<Box<str>>> {
        self.pairs
            .iter()
            .find(|(p, _)| p.as_str() == prefix)
            .map(|(_, n)| n)
    }

    /// Return a prefix-suffix pair describing the given IRI, if any,
    /// guaranteeing that the suffix satisfies the given predicate.
    ///
    /// The longest matching namespace wins.
    pub fn get_checked_prefixed_pair<'s, F>(
        &'s self,
        iri: &'s str,
        suffix_check: F,
    ) -> Option<(&'s Prefix, &'s str)>
    where
        F: Fn(&str) -> bool,
    {
        let mut matched = 0;
        let mut found = None;
        for (p, n) in &self.pairs {
            let n_str = n.as_str();
            if iri.starts_with(n_str) && (n_str.len() > matched || found.is_none()) {
                let suffix = &iri[n_str.len()..];
                if suffix_check(suffix) {
                    matched = n_str.len();
                    found = Some((p, suffix));
                }
            }
        }
        found
    }

    /// Iterate over the `(prefix, namespace)` pairs, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Prefix, &IriRef<Box<str>>)> {
        self.pairs.iter().map(|(p, n)| (p, n))
    }
}

impl FromIterator<(Prefix, IriRef<Box<str>>)> for PrefixMap {
    fn from_iter<I: IntoIterator<Item = (Prefix, IriRef<Box<str>>)>>(iter: I) -> Self {
        let mut map = PrefixMap::new();
        for (p, n) in iter {
            map.insert(p, n);
        }
        map
    }
}
