//! Serializer for the [Turtle] concrete syntax of RDF.
//!
//! Statements are buffered by [`TurtleSerializer::write_graph`],
//! [`write_statement`](TurtleSerializer::write_statement) and
//! [`write_triple`](TurtleSerializer::write_triple);
//! [`write_epilogue`](TurtleSerializer::write_epilogue) commits
//! everything to the output stream, pretty-printed: IRIs abbreviated with
//! prefixes, blank nodes inlined as `[ ... ]` where their reference count
//! allows, well-formed `rdf:first`/`rdf:rest` chains written as `( ... )`.
//!
//! **Important**: no effort is made to minimize the number of write
//! operations; in most cases the serializer should be given a
//! [`BufWriter`](std::io::BufWriter).
//!
//! [Turtle]: https://www.w3.org/TR/turtle/

mod _pretty;
#[cfg(test)]
mod test;

use std::io;

use terrapin_api::graph::Graph;
use terrapin_api::ns::{rdf, rdfs, xsd};
use terrapin_api::prefix::{Prefix, PrefixMap};
use terrapin_api::term::Term;
use terrapin_api::triple::Statement;
use terrapin_iri::{InvalidIri, Iri, IriRef};

use crate::error::WriterError;

/// Serialize `graph` to a string, with the default configuration.
pub fn serialize_str(graph: &Graph) -> Result<String, WriterError> {
    let mut serializer = TurtleSerializer::new_stringifier();
    serializer.write_graph(graph);
    serializer.write_epilogue()?;
    Ok(serializer.as_str().to_string())
}

/// Turtle serializer configuration.
#[derive(Clone, Debug)]
pub struct TurtleConfig {
    pub(crate) base_uri: Option<Iri<Box<str>>>,
    pub(crate) prefixes: PrefixMap,
    pub(crate) standard_prefixes: bool,
    pub(crate) max_depth: usize,
    pub(crate) canonicalize: bool,
    pub(crate) indentation: String,
}

impl TurtleConfig {
    /// Build a new default configuration:
    /// no base, the default prefix map
    /// ([`default_prefix_map`](TurtleConfig::default_prefix_map)),
    /// no standard-prefix discovery, `max_depth` 3, no canonicalization.
    pub fn new() -> Self {
        TurtleConfig {
            base_uri: None,
            prefixes: Self::default_prefix_map(),
            standard_prefixes: false,
            max_depth: 3,
            canonicalize: false,
            indentation: "  ".to_string(),
        }
    }

    /// The base IRI, if any.
    pub fn base_uri(&self) -> Option<&str> {
        self.base_uri.as_ref().map(Iri::as_str)
    }

    /// The configured prefix map.
    pub fn prefixes(&self) -> &PrefixMap {
        &self.prefixes
    }

    /// Whether standard-vocabulary prefixes are discovered automatically.
    pub fn standard_prefixes(&self) -> bool {
        self.standard_prefixes
    }

    /// The recursion cutoff when inlining blank nodes.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Whether literals are canonicalized before formatting.
    pub fn canonicalize(&self) -> bool {
        self.canonicalize
    }

    /// The indentation unit.
    pub fn indentation(&self) -> &str {
        &self.indentation
    }

    /// The prefix map used when none is provided
    /// (`rdf:`, `rdfs:` and `xsd:`).
    pub fn default_prefix_map() -> PrefixMap {
        [
            ("rdf", rdf::NS),
            ("rdfs", rdfs::NS),
            ("xsd", xsd::NS),
        ]
        .into_iter()
        .map(|(p, n)| {
            (
                Prefix::new_unchecked(p),
                IriRef::new_unchecked(Box::from(n)),
            )
        })
        .collect()
    }

    /// Set the base IRI: it is emitted as `@base`, and IRI references
    /// that start with it are written relative to it.
    pub fn with_base_uri<T: AsRef<str>>(mut self, base: T) -> Result<Self, InvalidIri> {
        self.base_uri = Some(Iri::new(Box::from(base.as_ref()))?);
        Ok(self)
    }

    /// Replace the prefix map. Only prefixes actually used in the output
    /// are emitted in the preamble.
    pub fn with_prefixes(mut self, prefixes: PrefixMap) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Set the default namespace (the prefix of `:x`);
    /// equivalent to mapping the empty prefix.
    pub fn with_default_namespace<T: AsRef<str>>(
        mut self,
        ns: T,
    ) -> Result<Self, InvalidIri> {
        let ns = IriRef::new(Box::from(ns.as_ref()))?;
        self.prefixes.insert(Prefix::new_unchecked(""), ns);
        Ok(self)
    }

    /// Discover prefixes from the registry of standard vocabularies
    /// ([`ns::STANDARD`](terrapin_api::ns::STANDARD)) for IRIs that no
    /// configured prefix covers.
    pub fn with_standard_prefixes(mut self, standard: bool) -> Self {
        self.standard_prefixes = standard;
        self
    }

    /// Set the recursion cutoff when inlining blank nodes (default 3).
    /// Beyond it, blank nodes fall back to their labeled form.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Canonicalize the lexical form of `xsd:` numeric and boolean
    /// literals before writing them.
    pub fn with_canonicalize(mut self, canonicalize: bool) -> Self {
        self.canonicalize = canonicalize;
        self
    }

    /// Set the indentation unit (default two spaces).
    ///
    /// # Precondition
    /// `indentation` must only contain whitespace, otherwise this method
    /// will panic.
    pub fn with_indentation<T: ToString>(mut self, indentation: T) -> Self {
        let indentation = indentation.to_string();
        assert!(indentation.chars().all(char::is_whitespace));
        self.indentation = indentation;
        self
    }
}

impl Default for TurtleConfig {
    fn default() -> Self {
        TurtleConfig::new()
    }
}

/// Turtle serializer.
pub struct TurtleSerializer<W> {
    config: TurtleConfig,
    write: W,
    graph: Graph,
}

impl<W> TurtleSerializer<W>
where
    W: io::Write,
{
    /// Build a new Turtle serializer writing to `write`,
    /// with the default configuration.
    pub fn new(write: W) -> Self {
        Self::new_with_config(write, TurtleConfig::default())
    }

    /// Build a new Turtle serializer writing to `write`,
    /// with the given configuration.
    pub fn new_with_config(write: W, config: TurtleConfig) -> Self {
        TurtleSerializer {
            config,
            write,
            graph: Graph::new(),
        }
    }

    /// Borrow this serializer's configuration.
    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    /// Buffer all statements of `graph`.
    pub fn write_graph(&mut self, graph: &Graph) -> &mut Self {
        for st in graph {
            self.graph.insert(st.clone());
        }
        self
    }

    /// Buffer one statement.
    pub fn write_statement(&mut self, st: &Statement) -> &mut Self {
        self.graph.insert(st.clone());
        self
    }

    /// Buffer one triple.
    pub fn write_triple(&mut self, s: Term, p: Term, o: Term) -> &mut Self {
        self.graph.insert(Statement::new(s, p, o));
        self
    }

    /// Commit every buffered statement to the output stream.
    pub fn write_epilogue(&mut self) -> Result<(), WriterError> {
        _pretty::prettify(&self.graph, &self.config, &mut self.write)?;
        self.write.flush()?;
        Ok(())
    }
}

impl TurtleSerializer<Vec<u8>> {
    /// Build a serializer which targets a `String`.
    pub fn new_stringifier() -> Self {
        TurtleSerializer::new(Vec::new())
    }

    /// Build a serializer which targets a `String`,
    /// with a custom configuration.
    pub fn new_stringifier_with_config(config: TurtleConfig) -> Self {
        TurtleSerializer::new_with_config(Vec::new(), config)
    }

    /// The text written so far.
    pub fn as_str(&self) -> &str {
        // the serializer only ever writes UTF-8
        std::str::from_utf8(&self.write).expect("serializer output is UTF-8")
    }
}
