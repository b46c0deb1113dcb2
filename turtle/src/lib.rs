//! Reading and writing the [Turtle] concrete syntax of RDF.
//!
//! The [parser] drives the LL(1) engine of `terrapin-grammar` with the
//! Turtle terminal table and branch tables, and emits
//! [`Statement`](terrapin_api::triple::Statement)s through a callback.
//! The [serializer] pretty-prints an in-memory
//! [`Graph`](terrapin_api::graph::Graph), abbreviating IRIs with prefixes,
//! inlining blank nodes and using the collection syntax where possible.
//!
//! [Turtle]: https://www.w3.org/TR/turtle/

pub mod error;
pub mod parser;
pub mod serializer;

pub use error::{TurtleError, WriterError};
pub use parser::{parse_str, TurtleParser};
pub use serializer::{serialize_str, TurtleConfig, TurtleSerializer};

/// The canonical media type of Turtle.
pub const MEDIA_TYPE: &str = "text/turtle";

/// All media types recognized for Turtle.
pub const MEDIA_TYPES: &[&str] = &[
    "text/turtle",
    "text/rdf+turtle",
    "application/turtle",
    "application/x-turtle",
];

/// The usual file extension of Turtle files.
pub const EXTENSION: &str = "ttl";
