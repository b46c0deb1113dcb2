//! I define the error types raised by this crate.

use terrapin_grammar::error::{ConfigError, ParseError};

/// An error raised while parsing Turtle.
#[derive(Debug, thiserror::Error)]
pub enum TurtleError {
    /// The grammar tables are inconsistent. Fatal; never recovered.
    #[error("grammar configuration: {0}")]
    Config(#[from] ConfigError),
    /// The input could not be parsed;
    /// all recorded problems are aggregated.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// An error raised while serializing a graph to Turtle.
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// The output stream failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// A term of the graph is not serializable in the requested position
    /// (e.g. a literal used as subject).
    #[error("non-serializable term: {0}")]
    NonSerializable(String),
    /// A base or prefix IRI is invalid.
    #[error("{0}")]
    InvalidIri(#[from] terrapin_iri::InvalidIri),
}
