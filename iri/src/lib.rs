//! I define [`IriRef`] and [`Iri`],
//! lightweight wrappers guaranteeing that the wrapped text
//! is a valid IRI reference (resp. absolute IRI)
//! as per [RFC 3987](https://tools.ietf.org/html/rfc3987),
//! as well as [`BaseIri`] for resolving relative references.
//!
//! Validation and resolution are delegated to [`oxiri`].

mod _wrapper;
pub use _wrapper::*;
mod resolve;
pub use resolve::*;

/// This error is raised when trying to wrap an invalid IRI.
#[derive(Debug, Clone, thiserror::Error)]
#[error("The given IRI is invalid: {0}")]
pub struct InvalidIri(pub String);
