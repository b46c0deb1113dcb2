//! Utility code for pretty-printing Turtle.
//!
//! One [`Prettifier`] lives for one
//! [`write_epilogue`](super::TurtleSerializer::write_epilogue) call:
//! it counts references, assigns QNames, orders subjects, and picks for
//! every node between the collection syntax, the anonymous `[ ... ]`
//! syntax, and the plain form.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::io;

use lazy_static::lazy_static;
use regex::Regex;

use terrapin_api::graph::Graph;
use terrapin_api::ns::{self, dcterms, rdf, rdfs, xsd};
use terrapin_api::prefix::{Prefix, PrefixMap};
use terrapin_api::term::{Literal, Term};
use terrapin_iri::IriRef;

use super::TurtleConfig;
use crate::error::WriterError;
use crate::parser::_terminals::PN_LOCAL_FULL;

lazy_static! {
    static ref INTEGER: Regex = Regex::new(r"^[+-]?[0-9]+$").expect("valid pattern");
    static ref DECIMAL: Regex = Regex::new(r"^[+-]?[0-9]*\.[0-9]+$").expect("valid pattern");
    static ref DOUBLE: Regex = Regex::new(
        r"^[+-]?(?:[0-9]+\.[0-9]*|\.[0-9]+|[0-9]+)[eE][+-]?[0-9]+$"
    )
    .expect("valid pattern");
    static ref BOOLEAN: Regex = Regex::new(r"^(?:true|false)$").expect("valid pattern");
}

/// Serialize `graph` in pretty Turtle on `write`, using `config`.
pub(super) fn prettify<W: io::Write>(
    graph: &Graph,
    config: &TurtleConfig,
    write: &mut W,
) -> Result<(), WriterError> {
    let mut p = Prettifier::new(graph, config);
    p.preprocess();
    let body = p.write_body()?;
    p.write_out(write, &body)
}

/// A valid, well-formed RDF list.
struct ListInfo<'a> {
    /// The `rdf:first` values, in order.
    items: Vec<&'a Term>,
    /// The chain of link nodes, head included.
    links: Vec<&'a Term>,
    /// Whether the head carries nothing but `rdf:first`/`rdf:rest`.
    head_pure: bool,
}

struct Prettifier<'a> {
    graph: &'a Graph,
    config: &'a TurtleConfig,
    /// Object-position + predicate-position occurrences per term.
    references: HashMap<&'a Term, usize>,
    /// Subjects (and inlined nodes) already committed to the body.
    serialized: HashSet<&'a Term>,
    /// IRI → QName cache (`None` = no QName possible).
    qnames: HashMap<&'a str, Option<String>>,
    /// Working prefix map: configured + discovered.
    prefixes: PrefixMap,
    /// Prefixes that actually occur in the body.
    used: BTreeSet<String>,
}

impl<'a> Prettifier<'a> {
    fn new(graph: &'a Graph, config: &'a TurtleConfig) -> Self {
        Prettifier {
            graph,
            config,
            references: HashMap::new(),
            serialized: HashSet::new(),
            qnames: HashMap::new(),
            prefixes: config.prefixes.clone(),
            used: BTreeSet::new(),
        }
    }

    /// Count references and warm the QName cache
    /// (which also performs standard-prefix discovery).
    fn preprocess(&mut self) {
        for t in self.graph {
            *self.references.entry(t.p()).or_insert(0) += 1;
            *self.references.entry(t.o()).or_insert(0) += 1;
            for term in [t.s(), t.p(), t.o()] {
                if let Some(iri) = term.iri_str() {
                    self.get_qname(iri);
                }
                if let Some(dt) = term.literal().and_then(Literal::datatype) {
                    self.get_qname(dt.as_str());
                }
            }
        }
    }

    fn ref_count(&self, term: &Term) -> usize {
        self.references.get(term).copied().unwrap_or(0)
    }

    /// The QName for `iri` under the working prefix map, if any.
    /// With `standard_prefixes`, unknown namespaces are looked up in the
    /// vocabulary registry and registered on first use.
    fn get_qname(&mut self, iri: &'a str) -> Option<String> {
        if let Some(cached) = self.qnames.get(iri) {
            return cached.clone();
        }
        let mut computed = self
            .prefixes
            .get_checked_prefixed_pair(iri, |suffix| escape_local(suffix).is_some())
            .and_then(|(p, suffix)| Some(format!("{}:{}", p, escape_local(suffix)?)));
        if computed.is_none() && self.config.standard_prefixes {
            for (pfx, ns_iri) in ns::STANDARD {
                // never shadow a configured prefix
                if self.prefixes.get_namespace(pfx).is_some() {
                    continue;
                }
                if let Some(local) = iri.strip_prefix(ns_iri) {
                    if let Some(escaped) = escape_local(local) {
                        log::trace!("discovered prefix {pfx}: <{ns_iri}>");
                        self.prefixes.insert(
                            Prefix::new_unchecked(*pfx),
                            IriRef::new_unchecked(Box::from(*ns_iri)),
                        );
                        computed = Some(format!("{pfx}:{escaped}"));
                        break;
                    }
                }
            }
        }
        self.qnames.insert(iri, computed.clone());
        computed
    }

    /// The emission order: the base subject first, then instances of the
    /// top classes sorted by IRI, then everything else, named resources
    /// with few references first and blank nodes last.
    fn order_subjects(&self) -> Vec<&'a Term> {
        let subjects = self.graph.subjects();
        let mut result: Vec<&'a Term> = Vec::new();
        let mut seen: HashSet<&'a Term> = HashSet::new();
        if let Some(base) = &self.config.base_uri {
            if let Some(s) = subjects
                .iter()
                .find(|s| s.iri_str() == Some(base.as_str()))
                .copied()
            {
                seen.insert(s);
                result.push(s);
            }
        }
        let type_ = Term::iri_unchecked(rdf::type_().as_str());
        let top_classes = [Term::iri_unchecked(rdfs::Class().as_str())];
        for top in &top_classes {
            let mut instances: Vec<&'a Term> = self
                .graph
                .iter()
                .filter(|t| t.p() == &type_ && t.o() == top)
                .map(|t| t.s())
                .collect();
            instances.sort();
            instances.dedup();
            for s in instances {
                if seen.insert(s) {
                    result.push(s);
                }
            }
        }
        let mut rest: Vec<&'a Term> = subjects
            .into_iter()
            .filter(|s| !seen.contains(s))
            .collect();
        rest.sort_by(|a, b| {
            (a.is_blank_node(), self.ref_count(a), *a)
                .cmp(&(b.is_blank_node(), self.ref_count(b), *b))
        });
        result.extend(rest);
        result
    }

    fn write_body(&mut self) -> Result<String, WriterError> {
        let mut chunks = Vec::new();
        for subject in self.order_subjects() {
            if self.serialized.contains(subject) {
                continue;
            }
            chunks.push(self.statement(subject)?);
        }
        let mut body = chunks.join("\n\n");
        if !body.is_empty() {
            body.push('\n');
        }
        Ok(body)
    }

    /// Emit one subject with all its properties.
    fn statement(&mut self, subject: &'a Term) -> Result<String, WriterError> {
        self.serialized.insert(subject);
        if subject.is_literal() {
            return Err(WriterError::NonSerializable(format!(
                "literal as subject: {subject}"
            )));
        }
        if subject.is_blank_node() && self.ref_count(subject) == 0 {
            if let Some(list) = self.valid_list(subject) {
                // a list head used as subject: collection syntax,
                // followed by its other predicates
                let preds = self.predicate_list(subject, true, 1)?;
                if !preds.is_empty() {
                    for &link in &list.links {
                        self.serialized.insert(link);
                    }
                    let items = self.render_items(&list.items, 1)?;
                    return Ok(format!("{items} {preds} ."));
                }
            } else {
                // s-squared: an unreferenced blank subject
                let preds = self.predicate_list(subject, false, 1)?;
                return Ok(format!("[ {preds} ] ."));
            }
        }
        let subject_txt = self.format_term(subject)?;
        let preds = self.predicate_list(subject, false, 1)?;
        Ok(format!("{subject_txt} {preds} ."))
    }

    /// The sorted predicate-object list of `subject`:
    /// predicate groups separated by `;`, objects by `,`.
    /// Depth 1 renders multi-line; nested levels stay inline.
    fn predicate_list(
        &mut self,
        subject: &'a Term,
        skip_list_predicates: bool,
        depth: usize,
    ) -> Result<String, WriterError> {
        let unit = self.config.indentation.clone();
        let (pred_sep, obj_sep) = if depth <= 1 {
            (format!(";\n{unit}"), format!(",\n{unit}{unit}"))
        } else {
            ("; ".to_string(), ", ".to_string())
        };
        let groups = self.sorted_properties(subject, skip_list_predicates);
        let mut parts = Vec::new();
        for (p, objects) in groups {
            let p_txt = if *p == rdf::type_() {
                "a".to_string()
            } else {
                self.format_term(p)?
            };
            let mut o_parts = Vec::new();
            for o in objects {
                o_parts.push(self.path(o, depth)?);
            }
            parts.push(format!("{} {}", p_txt, o_parts.join(&obj_sep)));
        }
        Ok(parts.join(&pred_sep))
    }

    /// Pick the form of one object: collection, inlined `[ ... ]`,
    /// or the plain form.
    fn path(&mut self, node: &'a Term, depth: usize) -> Result<String, WriterError> {
        if node.iri_str() == Some(rdf::nil().as_str()) {
            return Ok("()".to_string());
        }
        if node.is_blank_node()
            && !self.serialized.contains(node)
            && self.ref_count(node) <= 1
            && depth < self.config.max_depth
        {
            match self.valid_list(node) {
                Some(list) if list.head_pure => {
                    for &link in &list.links {
                        self.serialized.insert(link);
                    }
                    return self.render_items(&list.items, depth);
                }
                // a head with extra properties still inlines as [ ... ],
                // with its rdf:first/rdf:rest written out
                _ => {
                    self.serialized.insert(node);
                    let preds = self.predicate_list(node, false, depth + 1)?;
                    return Ok(if preds.is_empty() {
                        "[]".to_string()
                    } else {
                        format!("[ {preds} ]")
                    });
                }
            }
        }
        self.format_term(node)
    }

    fn render_items(&mut self, items: &[&'a Term], depth: usize) -> Result<String, WriterError> {
        if items.is_empty() {
            return Ok("()".to_string());
        }
        let mut parts = Vec::new();
        for &item in items {
            parts.push(self.path(item, depth + 1)?);
        }
        Ok(format!("( {} )", parts.join(" ")))
    }

    /// Walk `head` along `rdf:rest`; a valid list has exactly one
    /// `rdf:first` and one `rdf:rest` per link, blank link nodes, no
    /// extra properties on any link but (possibly) the head, and ends at
    /// `rdf:nil`.
    fn valid_list(&self, head: &'a Term) -> Option<ListInfo<'a>> {
        let first_p = Term::iri_unchecked(rdf::first().as_str());
        let rest_p = Term::iri_unchecked(rdf::rest().as_str());
        let mut info = ListInfo {
            items: Vec::new(),
            links: Vec::new(),
            head_pure: true,
        };
        let mut visited: HashSet<&Term> = HashSet::new();
        let mut node = head;
        loop {
            if node.iri_str() == Some(rdf::nil().as_str()) {
                return Some(info);
            }
            if !node.is_blank_node() || !visited.insert(node) {
                return None;
            }
            let firsts = self.graph.objects_for(node, &first_p);
            let rests = self.graph.objects_for(node, &rest_p);
            if firsts.len() != 1 || rests.len() != 1 {
                return None;
            }
            if self.graph.triples_with_s(node).count() != 2 {
                if node == head {
                    info.head_pure = false;
                } else {
                    return None;
                }
            }
            // inner links may only be reached through their predecessor,
            // otherwise the collection syntax would lose the extra reference
            if node != head && self.ref_count(node) != 1 {
                return None;
            }
            info.links.push(node);
            info.items.push(firsts[0]);
            node = rests[0];
        }
    }

    fn sorted_properties(
        &self,
        subject: &'a Term,
        skip_list_predicates: bool,
    ) -> Vec<(&'a Term, Vec<&'a Term>)> {
        let mut groups = self.graph.properties(subject);
        if skip_list_predicates {
            groups.retain(|(p, _)| !(**p == rdf::first() || **p == rdf::rest()));
        }
        for (_, objects) in &mut groups {
            objects.sort();
        }
        groups.sort_by(|a, b| cmp_predicates(a.0, b.0));
        groups
    }

    fn format_term(&mut self, term: &'a Term) -> Result<String, WriterError> {
        match term {
            Term::Iri(iri) => Ok(self.format_iri(iri.as_str())),
            Term::BlankNode(id) => Ok(format!("_:{id}")),
            Term::Literal(lit) => self.format_literal(lit),
        }
    }

    fn format_iri(&mut self, iri: &'a str) -> String {
        if let Some(base) = &self.config.base_uri {
            if let Some(suffix) = iri.strip_prefix(base.as_str()) {
                return format!("<{suffix}>");
            }
        }
        if let Some(qname) = self.get_qname(iri) {
            if let Some((prefix, _)) = qname.split_once(':') {
                self.used.insert(prefix.to_string());
            }
            return qname;
        }
        format!("<{iri}>")
    }

    fn format_literal(&mut self, lit: &'a Literal) -> Result<String, WriterError> {
        if lit.lang().is_none() {
            if let Some(dt) = lit.datatype() {
                let dt_str = dt.as_str();
                let lexical = if self.config.canonicalize {
                    canonical_lexical(dt_str, lit.lexical())
                } else {
                    lit.lexical().to_string()
                };
                if dt_str == xsd::boolean().as_str() && BOOLEAN.is_match(&lexical) {
                    return Ok(lexical);
                }
                if dt_str == xsd::integer().as_str() && INTEGER.is_match(&lexical) {
                    return Ok(lexical);
                }
                if dt_str == xsd::decimal().as_str() && DECIMAL.is_match(&lexical) {
                    return Ok(lexical);
                }
                if dt_str == xsd::double().as_str() && DOUBLE.is_match(&lexical) {
                    return Ok(lexical.replace('E', "e"));
                }
                let dt_txt = self.format_iri(dt.as_str());
                return Ok(format!("{}^^{}", quoted(&lexical), dt_txt));
            }
        }
        let mut out = quoted(lit.lexical());
        if let Some(lang) = lit.lang() {
            out.push('@');
            out.push_str(lang);
        }
        Ok(out)
    }

    /// Write the `@base`/`@prefix` preamble (used prefixes only, sorted)
    /// followed by the body.
    fn write_out<W: io::Write>(&self, write: &mut W, body: &str) -> Result<(), WriterError> {
        let mut head = String::new();
        if let Some(base) = &self.config.base_uri {
            head.push_str(&format!("@base <{base}> .\n"));
        }
        let mut pairs: Vec<(&str, &str)> = self
            .prefixes
            .iter()
            .filter(|(p, _)| self.used.contains(p.as_str()))
            .map(|(p, n)| (p.as_str(), n.as_str()))
            .collect();
        pairs.sort();
        for (prefix, ns_iri) in pairs {
            head.push_str(&format!("@prefix {prefix}: <{ns_iri}> .\n"));
        }
        if !head.is_empty() && !body.is_empty() {
            head.push('\n');
        }
        write.write_all(head.as_bytes())?;
        write.write_all(body.as_bytes())?;
        Ok(())
    }
}

/// Order predicates: `rdf:type`, `rdfs:label`, `dcterms:title`, then the
/// remainder lexicographically, except that container membership
/// properties (`rdf:_N`) compare numerically among themselves.
fn cmp_predicates(a: &Term, b: &Term) -> Ordering {
    fn rank(p: &Term) -> u8 {
        let iri = p.iri_str().unwrap_or("");
        if iri == rdf::type_().as_str() {
            0
        } else if iri == rdfs::label().as_str() {
            1
        } else if iri == dcterms::title().as_str() {
            2
        } else {
            3
        }
    }
    fn member_index(p: &Term) -> Option<u64> {
        p.iri_str()?
            .strip_prefix(rdf::MEMBER_PREFIX)?
            .parse()
            .ok()
    }
    rank(a).cmp(&rank(b)).then_with(|| {
        match (member_index(a), member_index(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => a.iri_str().unwrap_or("").cmp(b.iri_str().unwrap_or("")),
        }
    })
}

/// Escape the reserved characters of a QName local part;
/// `None` when no amount of escaping makes it a valid `PN_LOCAL`.
/// The empty suffix is valid (the bare `prefix:` form).
fn escape_local(suffix: &str) -> Option<String> {
    if suffix.is_empty() {
        return Some(String::new());
    }
    if PN_LOCAL_FULL.is_match(suffix) {
        return Some(suffix.to_string());
    }
    let mut escaped = String::with_capacity(suffix.len());
    for c in suffix.chars() {
        if "~.!$&'()*+,;=/?#@%-".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    if PN_LOCAL_FULL.is_match(&escaped) {
        Some(escaped)
    } else {
        None
    }
}

/// Quote a literal: values containing tabs or line breaks take the long
/// (triple-quoted) form with line breaks kept verbatim.
fn quoted(value: &str) -> String {
    if value.contains(['\n', '\r', '\t']) {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"\"\"{escaped}\"\"\"")
    } else {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('"');
        for c in value.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                other => out.push(other),
            }
        }
        out.push('"');
        out
    }
}

/// The XSD canonical lexical form for the numeric and boolean datatypes;
/// anything unrecognized is left alone.
fn canonical_lexical(datatype: &str, lexical: &str) -> String {
    if datatype == xsd::boolean().as_str() {
        return match lexical {
            "1" | "true" => "true".to_string(),
            "0" | "false" => "false".to_string(),
            _ => lexical.to_string(),
        };
    }
    if datatype == xsd::integer().as_str() && INTEGER.is_match(lexical) {
        let (sign, digits) = split_sign(lexical);
        let digits = digits.trim_start_matches('0');
        return if digits.is_empty() {
            "0".to_string()
        } else {
            format!("{sign}{digits}")
        };
    }
    if datatype == xsd::decimal().as_str() && INTEGER.is_match(lexical) {
        // xsd:decimal admits a dot-less lexical form; its canonical form
        // always carries one
        let (sign, digits) = split_sign(lexical);
        let digits = digits.trim_start_matches('0');
        return if digits.is_empty() {
            "0.0".to_string()
        } else {
            format!("{sign}{digits}.0")
        };
    }
    if datatype == xsd::decimal().as_str() && DECIMAL.is_match(lexical) {
        let (sign, rest) = split_sign(lexical);
        let (int_part, frac_part) = rest.split_once('.').unwrap_or((rest, "0"));
        let int_part = int_part.trim_start_matches('0');
        let frac_part = frac_part.trim_end_matches('0');
        let int_part = if int_part.is_empty() { "0" } else { int_part };
        let frac_part = if frac_part.is_empty() { "0" } else { frac_part };
        let zero = int_part == "0" && frac_part == "0";
        let sign = if zero { "" } else { sign };
        return format!("{sign}{int_part}.{frac_part}");
    }
    if datatype == xsd::double().as_str() {
        if let Ok(f) = lexical.parse::<f64>() {
            if f.is_nan() {
                return "NaN".to_string();
            }
            if f.is_infinite() {
                return if f > 0.0 { "INF" } else { "-INF" }.to_string();
            }
            let mut formatted = format!("{f:e}");
            if let Some(e) = formatted.find('e') {
                if !formatted[..e].contains('.') {
                    formatted.insert_str(e, ".0");
                }
            }
            return formatted;
        }
    }
    lexical.to_string()
}

fn split_sign(lexical: &str) -> (&str, &str) {
    match lexical.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", lexical.strip_prefix('+').unwrap_or(lexical)),
    }
}
