//! Parser for the [Turtle] concrete syntax of RDF.
//!
//! The parser drives the generic LL(1) engine of `terrapin-grammar` with
//! the Turtle terminal table ([`_terminals`]) and branch tables
//! ([`_grammar`]); the handlers below translate parse events into
//! [`Statement`]s, which are emitted through a caller-supplied callback
//! as soon as they are complete.
//!
//! [Turtle]: https://www.w3.org/TR/turtle/

mod _grammar;
mod _state;
pub(crate) mod _terminals;
#[cfg(test)]
mod test;

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

use terrapin_api::graph::Graph;
use terrapin_api::ns::{rdf, xsd};
use terrapin_api::prefix::Prefix;
use terrapin_api::term::Term;
use terrapin_api::triple::Statement;
use terrapin_grammar::error::ConfigError;
use terrapin_grammar::{Grammar, GrammarBuilder, ParseOptions, Parser, Stage, Token};
use terrapin_iri::{BaseIri, InvalidIri};

use crate::error::TurtleError;
use _state::{yield_resource, NodeData, TurtleState};

/// Parse a Turtle document into a [`Graph`], with default configuration.
pub fn parse_str(src: &str) -> Result<Graph, TurtleError> {
    TurtleParser::new().parse_str_to_graph(src)
}

/// A configurable Turtle parser.
///
/// ```
/// use terrapin_turtle::TurtleParser;
///
/// let g = TurtleParser::new()
///     .parse_str_to_graph("@prefix ex: <http://e/> . ex:a ex:b ex:c .")
///     .unwrap();
/// assert_eq!(g.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TurtleParser {
    base: Option<BaseIri>,
    validate: bool,
}

impl TurtleParser {
    /// Build a parser with the default configuration:
    /// no base IRI, recovering mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base IRI against which relative IRI references are resolved.
    pub fn with_base<T: Into<String>>(mut self, base: T) -> Result<Self, InvalidIri> {
        self.base = Some(BaseIri::new(base)?);
        Ok(self)
    }

    /// Abort at the first problem instead of recovering.
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Parse `src`, invoking `sink` for each complete statement.
    ///
    /// Without `validate`, problems are accumulated while the parse keeps
    /// going, and raised as one aggregated error at the end; statements
    /// parsed after a recovered error are still emitted.
    pub fn parse_str<F>(&self, src: &str, mut sink: F) -> Result<(), TurtleError>
    where
        F: FnMut(Statement),
    {
        let grammar = build_grammar()?;
        let parser = Parser::new(&grammar, _grammar::START)?;
        let mut state = TurtleState::new(self.base.clone(), &mut sink);
        let result = parser.parse(
            src,
            &mut state,
            ParseOptions {
                validate: self.validate,
            },
        );
        let mut issues = match result {
            Ok(()) => Vec::new(),
            Err(err) => err.issues,
        };
        issues.append(&mut state.issues);
        issues.sort_by_key(|issue| issue.lineno);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(TurtleError::Parse(terrapin_grammar::ParseError { issues }))
        }
    }

    /// Parse `src` into a [`Graph`].
    pub fn parse_str_to_graph(&self, src: &str) -> Result<Graph, TurtleError> {
        let mut graph = Graph::new();
        self.parse_str(src, |st| {
            graph.insert(st);
        })?;
        Ok(graph)
    }
}

lazy_static! {
    /// Reserved-character escapes allowed in `PN_LOCAL`.
    static ref PN_LOCAL_ESC: Regex = Regex::new(r"\\([_~.!$&'()*+,;=/?#@%\-])")
        .expect("PN_LOCAL_ESC is a valid pattern");
}

fn unescape_pn_local(local: &str) -> Cow<'_, str> {
    PN_LOCAL_ESC.replace_all(local, "$1")
}

/// Strip the `n` delimiter characters on both sides of a string token.
fn quoted_content(value: &str, n: usize) -> &str {
    &value[n..value.len() - n]
}

/// Assemble the Turtle grammar: terminals in priority order, terminal and
/// production handlers, and the precomputed tables.
fn build_grammar<'s>() -> Result<Grammar<TurtleState<'s>, NodeData>, ConfigError> {
    let mut b: GrammarBuilder<TurtleState<'s>, NodeData> = GrammarBuilder::new();

    b.terminal(Some("ANON"), _terminals::ANON, false)
        .terminal(Some("BLANK_NODE_LABEL"), &_terminals::BLANK_NODE_LABEL, false)
        .terminal(Some("IRIREF"), &_terminals::IRIREF, true)
        .terminal(Some("DOUBLE"), _terminals::DOUBLE, false)
        .terminal(Some("DECIMAL"), _terminals::DECIMAL, false)
        .terminal(Some("INTEGER"), _terminals::INTEGER, false)
        .terminal(Some("PNAME_LN"), &_terminals::PNAME_LN, false)
        .terminal(Some("PNAME_NS"), &_terminals::PNAME_NS, false)
        .terminal(
            Some("STRING_LITERAL_LONG_SINGLE_QUOTE"),
            &_terminals::STRING_LITERAL_LONG_SINGLE_QUOTE,
            true,
        )
        .terminal(
            Some("STRING_LITERAL_LONG_QUOTE"),
            &_terminals::STRING_LITERAL_LONG_QUOTE,
            true,
        )
        .terminal(
            Some("STRING_LITERAL_QUOTE"),
            &_terminals::STRING_LITERAL_QUOTE,
            true,
        )
        .terminal(
            Some("STRING_LITERAL_SINGLE_QUOTE"),
            &_terminals::STRING_LITERAL_SINGLE_QUOTE,
            true,
        )
        .terminal(None, _terminals::PUNCTUATION, false)
        .terminal(Some("LANGTAG"), _terminals::LANGTAG, false);

    // -- terminal handlers --------------------------------------------

    b.on_terminal(Some("IRIREF"), |ctx, prod, token, data| {
        on_iriref(ctx, prod, token, data)
    });
    b.on_terminal(Some("PNAME_NS"), |ctx, prod, token, data| {
        on_pname_ns(ctx, prod, token, data)
    });
    b.on_terminal(Some("PNAME_LN"), |ctx, prod, token, data| {
        on_pname_ln(ctx, prod, token, data)
    });
    b.on_terminal(Some("BLANK_NODE_LABEL"), |ctx, _, token, data| {
        ctx.lineno = token.lineno();
        data.resource = Some(ctx.labeled_bnode(&token.value()[2..]));
    });
    b.on_terminal(Some("ANON"), |ctx, _, token, data| {
        ctx.lineno = token.lineno();
        data.resource = Some(ctx.fresh_bnode());
    });
    b.on_terminal(Some("LANGTAG"), |ctx, _, token, data| {
        ctx.lineno = token.lineno();
        data.lang = Some(token.value()[1..].to_string());
    });
    b.on_terminal(Some("INTEGER"), |ctx, _, token, data| {
        ctx.lineno = token.lineno();
        data.resource = Some(Term::literal_dt(token.value(), xsd::integer()));
    });
    b.on_terminal(Some("DECIMAL"), |ctx, _, token, data| {
        ctx.lineno = token.lineno();
        data.resource = Some(Term::literal_dt(token.value(), xsd::decimal()));
    });
    b.on_terminal(Some("DOUBLE"), |ctx, _, token, data| {
        ctx.lineno = token.lineno();
        data.resource = Some(Term::literal_dt(token.value(), xsd::double()));
    });
    b.on_terminal(Some("STRING_LITERAL_QUOTE"), |ctx, _, token, data| {
        ctx.lineno = token.lineno();
        data.lexical = Some(quoted_content(token.value(), 1).to_string());
    });
    b.on_terminal(Some("STRING_LITERAL_SINGLE_QUOTE"), |ctx, _, token, data| {
        ctx.lineno = token.lineno();
        data.lexical = Some(quoted_content(token.value(), 1).to_string());
    });
    b.on_terminal(Some("STRING_LITERAL_LONG_QUOTE"), |ctx, _, token, data| {
        ctx.lineno = token.lineno();
        data.lexical = Some(quoted_content(token.value(), 3).to_string());
    });
    b.on_terminal(
        Some("STRING_LITERAL_LONG_SINGLE_QUOTE"),
        |ctx, _, token, data| {
            ctx.lineno = token.lineno();
            data.lexical = Some(quoted_content(token.value(), 3).to_string());
        },
    );
    b.on_terminal(None, |ctx, prod, token, data| {
        ctx.lineno = token.lineno();
        match (prod, token.value()) {
            ("verb", "a") => {
                data.resource = Some(Term::iri_unchecked(rdf::type_().as_str()));
            }
            ("BooleanLiteral", "true") | ("BooleanLiteral", "false") => {
                data.resource = Some(Term::literal_dt(token.value(), xsd::boolean()));
            }
            _ => {}
        }
    });

    // -- production handlers ------------------------------------------

    b.production("prefixID", |ctx, stage, parent, current| {
        prefix_directive(ctx, stage, parent, current)
    });
    b.production("sparqlPrefix", |ctx, stage, parent, current| {
        prefix_directive(ctx, stage, parent, current)
    });
    b.production("base", |ctx, stage, parent, current| {
        base_directive(ctx, stage, parent, current)
    });
    b.production("sparqlBase", |ctx, stage, parent, current| {
        base_directive(ctx, stage, parent, current)
    });
    // `triples` has a handler only to give each statement group a record
    // of its own: its children fill in `resource` (the subject).
    b.production("triples", |_, _, _, _| {});
    b.production("predicateObjectList", |_, stage, parent, current| {
        if stage == Stage::Start {
            current.subject = parent
                .resource
                .take()
                .or_else(|| parent.subject.clone());
        }
    });
    b.production("objectList", |_, stage, parent, current| {
        if stage == Stage::Start {
            current.subject = parent.subject.clone();
            current.predicate = parent.resource.take();
        }
    });
    b.production("object", |ctx, stage, parent, current| {
        if stage == Stage::Finish {
            let Some(value) = current.resource.take() else {
                return; // recovery dropped the object
            };
            match &mut parent.collection {
                Some(items) => items.push(value),
                None => {
                    if let (Some(s), Some(p)) = (parent.subject.clone(), parent.predicate.clone())
                    {
                        ctx.emit(s, p, value);
                    }
                }
            }
        }
    });
    b.production("collection", |ctx, stage, parent, current| match stage {
        Stage::Start => current.collection = Some(Vec::new()),
        Stage::Finish => {
            let items = current.collection.take().unwrap_or_default();
            yield_resource(parent, emit_list(ctx, items));
        }
    });
    b.production("blankNodePropertyList", |ctx, stage, parent, current| {
        match stage {
            Stage::Start => current.subject = Some(ctx.fresh_bnode()),
            Stage::Finish => {
                if let Some(node) = current.subject.take() {
                    yield_resource(parent, node);
                }
            }
        }
    });
    b.production("RDFLiteral", |_, stage, parent, current| {
        if stage == Stage::Finish {
            let lexical = current.lexical.take().unwrap_or_default();
            let term = if let Some(lang) = current.lang.take() {
                Term::literal_lang(lexical, lang)
            } else if let Some(Term::Iri(datatype)) = current.resource.take() {
                Term::literal_dt(lexical, datatype)
            } else {
                Term::literal(lexical)
            };
            yield_resource(parent, term);
        }
    });

    _grammar::install(&mut b);
    b.build()
}

fn on_iriref(ctx: &mut TurtleState, prod: &'static str, token: &Token, data: &mut NodeData) {
    ctx.lineno = token.lineno();
    let value = token.value();
    let inner = quoted_content(value, 1);
    match ctx.resolve_iri(inner) {
        Ok(term) => data.resource = Some(term),
        Err(err) => ctx.issue(prod, format!("invalid IRI <{inner}>: {err}"), token.lineno()),
    }
}

fn on_pname_ns(ctx: &mut TurtleState, prod: &'static str, token: &Token, data: &mut NodeData) {
    ctx.lineno = token.lineno();
    let value = token.value();
    let prefix = &value[..value.len() - 1];
    if prod == "prefixID" || prod == "sparqlPrefix" {
        data.prefix = Some(prefix.to_string());
    } else {
        match ctx.expand_pname(prefix, "") {
            Ok(term) => data.resource = Some(term),
            Err(message) => ctx.issue(prod, message, token.lineno()),
        }
    }
}

fn on_pname_ln(ctx: &mut TurtleState, prod: &'static str, token: &Token, data: &mut NodeData) {
    ctx.lineno = token.lineno();
    let value = token.value();
    let colon = value.find(':').unwrap_or(0);
    let (prefix, local) = (&value[..colon], &value[colon + 1..]);
    let local = unescape_pn_local(local);
    match ctx.expand_pname(prefix, &local) {
        Ok(term) => data.resource = Some(term),
        Err(message) => ctx.issue(prod, message, token.lineno()),
    }
}

fn prefix_directive(
    ctx: &mut TurtleState,
    stage: Stage,
    _parent: &mut NodeData,
    current: &mut NodeData,
) {
    if stage == Stage::Finish {
        if let (Some(prefix), Some(Term::Iri(ns))) =
            (current.prefix.take(), current.resource.take())
        {
            log::trace!("prefix {prefix}: <{ns}>");
            ctx.prefixes.insert(Prefix::new_unchecked(&prefix), ns);
        }
    }
}

fn base_directive(
    ctx: &mut TurtleState,
    stage: Stage,
    _parent: &mut NodeData,
    current: &mut NodeData,
) {
    if stage == Stage::Finish {
        if let Some(Term::Iri(iri)) = current.resource.take() {
            match BaseIri::new(iri.as_str()) {
                Ok(base) => {
                    log::trace!("base <{base}>", base = base.as_str());
                    ctx.base = Some(base);
                }
                Err(err) => {
                    let lineno = ctx.lineno;
                    ctx.issue("base", format!("cannot use base: {err}"), lineno);
                }
            }
        }
    }
}

/// Emit the `rdf:first`/`rdf:rest` chain for a collection and return its
/// head (`rdf:nil` for an empty collection).
fn emit_list(ctx: &mut TurtleState, items: Vec<Term>) -> Term {
    let nil = Term::iri_unchecked(rdf::nil().as_str());
    if items.is_empty() {
        return nil;
    }
    let first = Term::iri_unchecked(rdf::first().as_str());
    let rest = Term::iri_unchecked(rdf::rest().as_str());
    let links: Vec<Term> = items.iter().map(|_| ctx.fresh_bnode()).collect();
    let n = items.len();
    for (i, item) in items.into_iter().enumerate() {
        ctx.emit(links[i].clone(), first.clone(), item);
        let next = if i + 1 < n {
            links[i + 1].clone()
        } else {
            nil.clone()
        };
        ctx.emit(links[i].clone(), rest.clone(), next);
    }
    links.into_iter().next().expect("non-empty collection")
}
