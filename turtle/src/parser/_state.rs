//! The reader-side state: the shared [`TurtleState`] context
//! and the per-production [`NodeData`] record.

use std::collections::HashMap;

use terrapin_api::prefix::PrefixMap;
use terrapin_api::term::Term;
use terrapin_api::triple::Statement;
use terrapin_grammar::error::ParseIssue;
use terrapin_iri::{BaseIri, InvalidIri};

/// Shared state of one parse run: prefixes, base, blank node allocation,
/// the statement sink, and semantic problems found by the handlers.
pub(crate) struct TurtleState<'s> {
    pub prefixes: PrefixMap,
    pub base: Option<BaseIri>,
    pub sink: &'s mut dyn FnMut(Statement),
    /// Problems that are not syntax errors (unknown prefix, invalid IRI).
    pub issues: Vec<ParseIssue>,
    /// The line of the most recently handled token, for handlers that
    /// have no token at hand.
    pub lineno: usize,
    bnode_seq: usize,
    /// Parsed labels are renamed through the allocator, so that they can
    /// never collide with generated nodes. Identity is stable per label
    /// within one run.
    labels: HashMap<String, String>,
}

impl<'s> TurtleState<'s> {
    pub fn new(base: Option<BaseIri>, sink: &'s mut dyn FnMut(Statement)) -> Self {
        TurtleState {
            prefixes: PrefixMap::new(),
            base,
            sink,
            issues: Vec::new(),
            lineno: 1,
            bnode_seq: 0,
            labels: HashMap::new(),
        }
    }

    /// Build an IRI term from the text of an `IRIREF`
    /// (delimiters and escapes already removed),
    /// resolving it against the current base if any.
    pub fn resolve_iri(&self, text: &str) -> Result<Term, InvalidIri> {
        match &self.base {
            Some(base) => {
                let resolved = base.resolve(text)?;
                Ok(Term::iri_unchecked(resolved.as_str()))
            }
            None => Term::iri(text),
        }
    }

    /// Build an IRI term from a prefixed name
    /// (the local part already unescaped).
    pub fn expand_pname(&self, prefix: &str, local: &str) -> Result<Term, String> {
        let Some(ns) = self.prefixes.get_namespace(prefix) else {
            return Err(format!("undefined prefix {prefix:?}"));
        };
        let iri = format!("{}{}", ns.as_str(), local);
        Term::iri(iri).map_err(|err| err.to_string())
    }

    /// A fresh blank node.
    pub fn fresh_bnode(&mut self) -> Term {
        let id = format!("b{}", self.bnode_seq);
        self.bnode_seq += 1;
        Term::bnode(id)
    }

    /// The blank node for a parsed `_:label`.
    pub fn labeled_bnode(&mut self, label: &str) -> Term {
        if let Some(id) = self.labels.get(label) {
            return Term::bnode(id);
        }
        let id = format!("b{}", self.bnode_seq);
        self.bnode_seq += 1;
        self.labels.insert(label.to_string(), id.clone());
        Term::bnode(id)
    }

    /// Emit a statement to the caller.
    pub fn emit(&mut self, s: Term, p: Term, o: Term) {
        (self.sink)(Statement::new(s, p, o));
    }

    /// Record a semantic problem.
    pub fn issue(&mut self, production: &'static str, message: String, lineno: usize) {
        log::debug!("turtle issue: {message} (line {lineno})");
        self.issues.push(ParseIssue {
            production: Some(production),
            message,
            lineno,
        });
    }
}

/// The per-production record of the Turtle grammar.
///
/// Only a subset of productions registers a handler; tokens and finished
/// children of transparent productions report to the nearest handled
/// ancestor's record.
#[derive(Debug, Default)]
pub(crate) struct NodeData {
    /// The current subject (set by `triples` / property lists).
    pub subject: Option<Term>,
    /// The current predicate (set by `verb`).
    pub predicate: Option<Term>,
    /// The term produced by this production, reported upward on finish.
    pub resource: Option<Term>,
    /// Items gathered while inside a collection; `Some` marks the record
    /// as a collection accumulator.
    pub collection: Option<Vec<Term>>,
    /// The lexical form of a string literal being assembled.
    pub lexical: Option<String>,
    /// The language tag of the literal being assembled.
    pub lang: Option<String>,
    /// The prefix text of a prefix declaration (without the colon).
    pub prefix: Option<String>,
}

/// Report a produced term to `parent`:
/// collection accumulators collect it, anything else stores it.
pub(crate) fn yield_resource(parent: &mut NodeData, term: Term) {
    match &mut parent.collection {
        Some(items) => items.push(term),
        None => parent.resource = Some(term),
    }
}
