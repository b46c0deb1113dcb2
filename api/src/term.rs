//! I define how RDF terms
//! (IRIs, blank nodes and literals)
//! are represented in terrapin.

use std::borrow::Borrow;
use std::fmt;

use terrapin_iri::{InvalidIri, IriRef};

use crate::ns::{rdf, xsd};

/// The different kinds of terms that a [`Term`] can represent.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub enum TermKind {
    /// An RDF IRI
    Iri,
    /// An RDF blank node
    BlankNode,
    /// An RDF literal
    Literal,
}

/// An RDF literal: a lexical form,
/// an optional language tag,
/// and an optional datatype IRI.
///
/// A literal with a language tag implicitly has the datatype
/// `rdf:langString`; a literal with neither tag nor datatype is a simple
/// (`xsd:string`) literal.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Literal {
    lexical: Box<str>,
    lang: Option<Box<str>>,
    datatype: Option<IriRef<Box<str>>>,
}

impl Literal {
    /// The lexical form of this literal.
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// The language tag of this literal, if any.
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    /// The explicit datatype of this literal, if any.
    pub fn datatype(&self) -> Option<&IriRef<Box<str>>> {
        self.datatype.as_ref()
    }

    /// The effective datatype IRI of this literal
    /// (`rdf:langString` for language-tagged literals,
    /// `xsd:string` when no datatype was given).
    pub fn effective_datatype(&self) -> &str {
        if self.lang.is_some() {
            rdf::langString().unwrap()
        } else {
            match &self.datatype {
                Some(dt) => dt.as_str(),
                None => xsd::string().unwrap(),
            }
        }
    }
}

/// An owned RDF term.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Term {
    /// An IRI
    Iri(IriRef<Box<str>>),
    /// A blank node, identified by its label (without the `_:` sigil)
    BlankNode(Box<str>),
    /// A literal
    Literal(Literal),
}

impl Term {
    /// Build an IRI term, checking the given text.
    pub fn iri<T: Into<String>>(iri: T) -> Result<Self, InvalidIri> {
        let iri: String = iri.into();
        IriRef::new(Box::from(iri.as_str())).map(Term::Iri)
    }

    /// Build an IRI term without checking the given text.
    pub fn iri_unchecked<T: AsRef<str>>(iri: T) -> Self {
        Term::Iri(IriRef::new_unchecked(Box::from(iri.as_ref())))
    }

    /// Build a blank node term from its label (without the `_:` sigil).
    pub fn bnode<T: AsRef<str>>(id: T) -> Self {
        Term::BlankNode(Box::from(id.as_ref()))
    }

    /// Build a simple (`xsd:string`) literal.
    pub fn literal<T: AsRef<str>>(lexical: T) -> Self {
        Term::Literal(Literal {
            lexical: Box::from(lexical.as_ref()),
            lang: None,
            datatype: None,
        })
    }

    /// Build a language-tagged literal.
    pub fn literal_lang<T: AsRef<str>, U: AsRef<str>>(lexical: T, lang: U) -> Self {
        Term::Literal(Literal {
            lexical: Box::from(lexical.as_ref()),
            lang: Some(Box::from(lang.as_ref())),
            datatype: None,
        })
    }

    /// Build a datatyped literal.
    pub fn literal_dt<T: AsRef<str>, U: Borrow<str>>(lexical: T, datatype: IriRef<U>) -> Self {
        Term::Literal(Literal {
            lexical: Box::from(lexical.as_ref()),
            lang: None,
            datatype: Some(datatype.to_box()),
        })
    }

    /// Return the kind of RDF term that this [`Term`] represents.
    pub fn kind(&self) -> TermKind {
        match self {
            Term::Iri(_) => TermKind::Iri,
            Term::BlankNode(_) => TermKind::BlankNode,
            Term::Literal(_) => TermKind::Literal,
        }
    }

    /// Return true if this [`Term`] is an IRI.
    pub fn is_iri(&self) -> bool {
        self.kind() == TermKind::Iri
    }

    /// Return true if this [`Term`] is a blank node.
    pub fn is_blank_node(&self) -> bool {
        self.kind() == TermKind::BlankNode
    }

    /// Return true if this [`Term`] is a literal.
    pub fn is_literal(&self) -> bool {
        self.kind() == TermKind::Literal
    }

    /// The IRI text of this term, if it is an IRI.
    pub fn iri_str(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri.as_str()),
            _ => None,
        }
    }

    /// The label of this term (without the `_:` sigil),
    /// if it is a blank node.
    pub fn bnode_id(&self) -> Option<&str> {
        match self {
            Term::BlankNode(id) => Some(id),
            _ => None,
        }
    }

    /// The literal of this term, if it is one.
    pub fn literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

impl<T: Borrow<str>> PartialEq<IriRef<T>> for Term {
    fn eq(&self, other: &IriRef<T>) -> bool {
        self.iri_str() == Some(other.as_str())
    }
}

impl fmt::Display for Term {
    /// Display in an N-Triples-like form, for messages and debugging.
    /// The Turtle serializer has its own, complete formatting rules.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::BlankNode(id) => write!(f, "_:{id}"),
            Term::Literal(lit) => {
                write!(f, "\"")?;
                for c in lit.lexical().chars() {
                    match c {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\r' => write!(f, "\\r")?,
                        _ => write!(f, "{c}")?,
                    }
                }
                write!(f, "\"")?;
                if let Some(lang) = lit.lang() {
                    write!(f, "@{lang}")?;
                } else if let Some(dt) = lit.datatype() {
                    write!(f, "^^<{dt}>")?;
                }
                Ok(())
            }
        }
    }
}
