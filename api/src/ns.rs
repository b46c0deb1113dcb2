//! Standard namespaces.
//!
//! This module provides modules for the most common RDF namespaces,
//! generated with the [`namespace!`](crate::namespace) macro,
//! plus the [`STANDARD`] registry used for automatic prefix discovery.
//!
//! # Example
//! ```
//! use terrapin_api::ns::{rdf, xsd};
//! use terrapin_api::term::Term;
//!
//! let t = Term::iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#nil").unwrap();
//! assert!(t == rdf::nil());
//! assert_eq!(xsd::integer().as_str(), "http://www.w3.org/2001/XMLSchema#integer");
//! ```

/// Define a module exposing the terms of an RDF namespace as functions.
///
/// Identifiers that are Rust keywords take an alternative spelling and an
/// explicit suffix after a `;` (e.g. `rdf:type` spells `rdf::type_`).
#[macro_export]
macro_rules! namespace {
    ($ns:literal $(, $id:ident)* $(; $r_id:ident, $r_txt:literal)* $(,)?) => {
        /// The IRI of this namespace.
        pub const NS: &str = $ns;

        /// The IRI of this namespace, as an [`IriRef`](crate::IriRef).
        pub fn namespace_iri() -> $crate::IriRef<&'static str> {
            $crate::IriRef::new_unchecked(NS)
        }

        $(
            #[allow(non_snake_case)]
            #[doc = concat!("The term `", $ns, stringify!($id), "`.")]
            pub fn $id() -> $crate::IriRef<&'static str> {
                $crate::IriRef::new_unchecked(concat!($ns, stringify!($id)))
            }
        )*
        $(
            #[allow(non_snake_case)]
            #[doc = concat!("The term `", $ns, $r_txt, "`.")]
            pub fn $r_id() -> $crate::IriRef<&'static str> {
                $crate::IriRef::new_unchecked(concat!($ns, $r_txt))
            }
        )*
    };
}

/// The standard `rdf:` namespace.
///
/// NB: since `type` is a reserved keyword in Rust,
/// the term `rdf:type` spells `rdf::type_` (with a trailing underscore).
#[allow(non_snake_case)]
pub mod rdf {
    namespace!(
        "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
        Property,
        List,
        langString,
        first,
        rest,
        nil,
        value,
        subject,
        predicate,
        object;
        type_, "type"
    );

    /// The prefix conventionally used for numbered container membership
    /// properties (`rdf:_1`, `rdf:_2`, ...).
    pub const MEMBER_PREFIX: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#_";
}

/// The standard `rdfs:` namespace.
#[allow(non_snake_case)]
pub mod rdfs {
    namespace!(
        "http://www.w3.org/2000/01/rdf-schema#",
        Class,
        Resource,
        Literal,
        label,
        comment,
        domain,
        range,
        subClassOf,
        subPropertyOf,
        seeAlso,
    );
}

/// The standard `xsd:` namespace.
#[allow(non_snake_case)]
pub mod xsd {
    namespace!(
        "http://www.w3.org/2001/XMLSchema#",
        string,
        boolean,
        integer,
        decimal,
        double,
        float,
        date,
        dateTime,
        anyURI,
    );
}

/// The standard `owl:` namespace (the part of it used here).
#[allow(non_snake_case)]
pub mod owl {
    namespace!(
        "http://www.w3.org/2002/07/owl#",
        Class,
        Ontology,
        ObjectProperty,
        DatatypeProperty,
        sameAs,
    );
}

/// The DCMI terms namespace.
pub mod dcterms {
    namespace!(
        "http://purl.org/dc/terms/",
        title,
        creator,
        description,
        date,
    );
}

/// The FOAF namespace (the part of it used here).
#[allow(non_snake_case)]
pub mod foaf {
    namespace!(
        "http://xmlns.com/foaf/0.1/",
        Person,
        name,
        knows,
        mbox,
        homepage,
    );
}

/// The registry of standard vocabularies, as `(prefix, namespace)` pairs.
///
/// Serializers use it to discover prefixes for IRIs in well-known
/// namespaces when configured to do so.
pub const STANDARD: &[(&str, &str)] = &[
    ("rdf", rdf::NS),
    ("rdfs", rdfs::NS),
    ("xsd", xsd::NS),
    ("owl", owl::NS),
    ("dcterms", dcterms::NS),
    ("foaf", foaf::NS),
];
