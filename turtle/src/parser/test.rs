use terrapin_api::graph::Graph;
use terrapin_api::ns::{rdf, xsd};
use terrapin_api::term::Term;
use terrapin_api::triple::Statement;
use test_case::test_case;

use super::{parse_str, TurtleParser};
use crate::error::TurtleError;

fn iri(txt: &str) -> Term {
    Term::iri(txt).unwrap()
}

fn graph(src: &str) -> Graph {
    parse_str(src).unwrap()
}

#[test]
fn empty_document() {
    assert!(graph("").is_empty());
    assert!(graph("# just a comment\n").is_empty());
}

#[test]
fn prefix_and_triple() {
    let g = graph("@prefix ex: <http://e/> . ex:a ex:b ex:c .");
    assert_eq!(g.len(), 1);
    assert!(g.contains(&Statement::new(
        iri("http://e/a"),
        iri("http://e/b"),
        iri("http://e/c"),
    )));
}

#[test_case("@prefix : <http://e/> . :a :b :c ."; "default prefix")]
#[test_case("PREFIX : <http://e/>\n:a :b :c ."; "sparql prefix")]
fn default_and_sparql_prefixes(src: &str) {
    let g = graph(src);
    assert!(g.contains(&Statement::new(
        iri("http://e/a"),
        iri("http://e/b"),
        iri("http://e/c"),
    )));
}

#[test_case("@base <http://e/dir/> . <a> <b> <c> ."; "at base")]
#[test_case("BASE <http://e/dir/>\n<a> <b> <c> ."; "sparql base")]
fn base_resolution(src: &str) {
    let g = graph(src);
    assert!(g.contains(&Statement::new(
        iri("http://e/dir/a"),
        iri("http://e/dir/b"),
        iri("http://e/dir/c"),
    )));
}

#[test]
fn successive_bases_chain() {
    let g = graph("@base <http://e/a/> . @base <b/> . <c> <p> <o> .");
    assert!(g
        .iter()
        .any(|t| t.s().iri_str() == Some("http://e/a/b/c")));
}

#[test]
fn external_base_config() {
    let g = TurtleParser::new()
        .with_base("http://e/dir/")
        .unwrap()
        .parse_str_to_graph("<a> <b> <c> .")
        .unwrap();
    assert!(g.contains(&Statement::new(
        iri("http://e/dir/a"),
        iri("http://e/dir/b"),
        iri("http://e/dir/c"),
    )));
}

#[test]
fn keyword_a_is_rdf_type() {
    let g = graph("@prefix : <http://e/> . :alice a :Person .");
    let t = g.iter().next().unwrap();
    assert!(t.p() == &rdf::type_());
}

#[test]
fn predicate_and_object_lists() {
    let g = graph(
        "@prefix : <http://e/> .\n\
         :s :p :o1, :o2 ;\n\
            :q \"x\" ; .",
    );
    assert_eq!(g.len(), 3);
    let s = iri("http://e/s");
    assert_eq!(g.objects_for(&s, &iri("http://e/p")).len(), 2);
    assert_eq!(g.objects_for(&s, &iri("http://e/q")).len(), 1);
}

#[test]
fn literals() {
    let g = graph(
        "@prefix : <http://e/> . @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .\n\
         :s :p \"plain\", \"tagged\"@en-GB, \"typed\"^^xsd:date, 42, 3.14, 4.2e1, true .",
    );
    let s = iri("http://e/s");
    let objects = g.objects_for(&s, &iri("http://e/p"));
    assert_eq!(objects.len(), 7);
    assert!(objects.contains(&&Term::literal("plain")));
    assert!(objects.contains(&&Term::literal_lang("tagged", "en-GB")));
    assert!(objects.contains(&&Term::literal_dt("typed", xsd::date())));
    assert!(objects.contains(&&Term::literal_dt("42", xsd::integer())));
    assert!(objects.contains(&&Term::literal_dt("3.14", xsd::decimal())));
    assert!(objects.contains(&&Term::literal_dt("4.2e1", xsd::double())));
    assert!(objects.contains(&&Term::literal_dt("true", xsd::boolean())));
}

#[test]
fn multi_line_literal() {
    let g = graph("<http://e/a> <http://e/b> \"\"\"line1\nline2\"\"\" .");
    let t = g.iter().next().unwrap();
    assert_eq!(t.o().literal().unwrap().lexical(), "line1\nline2");
}

#[test]
fn escaped_newline_in_long_literal() {
    let g = graph(r#"<http://e/a> <http://e/b> """line1\nline2""" ."#);
    let t = g.iter().next().unwrap();
    assert_eq!(t.o().literal().unwrap().lexical(), "line1\nline2");
}

#[test]
fn escape_normalization() {
    let g = graph(r#"<http://e/a> <http://e/b> "A\n\\B" ."#);
    let t = g.iter().next().unwrap();
    assert_eq!(t.o().literal().unwrap().lexical(), "A\n\\B");
}

#[test]
fn pn_local_escapes() {
    let g = graph(r"@prefix ex: <http://e/> . ex:a\~b ex:p ex:o .");
    assert!(g.iter().any(|t| t.s().iri_str() == Some("http://e/a~b")));
}

#[test]
fn blank_node_labels_are_stable() {
    let g = graph("_:x <http://e/p> _:y . _:y <http://e/p> _:x .");
    assert_eq!(g.len(), 2);
    let mut iter = g.iter();
    let t1 = iter.next().unwrap();
    let t2 = iter.next().unwrap();
    assert_eq!(t1.s(), t2.o());
    assert_eq!(t1.o(), t2.s());
    assert_ne!(t1.s(), t1.o());
}

#[test]
fn anonymous_nodes_are_distinct() {
    let g = graph("[] <http://e/p> \"a\" . [] <http://e/p> \"b\" .");
    assert_eq!(g.len(), 2);
    let subjects = g.subjects();
    assert_eq!(subjects.len(), 2);
    assert_ne!(subjects[0], subjects[1]);
}

#[test]
fn blank_node_property_lists() {
    let g = graph("_:b <http://e/p> [ <http://e/q> \"x\" ] .");
    assert_eq!(g.len(), 2);
    let inner = g
        .iter()
        .find(|t| t.p() == &iri("http://e/q"))
        .expect("inner triple");
    let outer = g
        .iter()
        .find(|t| t.p() == &iri("http://e/p"))
        .expect("outer triple");
    assert_eq!(outer.o(), inner.s());
    assert!(inner.s().is_blank_node());
    assert_eq!(inner.o(), &Term::literal("x"));
}

#[test]
fn property_list_as_whole_statement() {
    let g = graph("[ <http://e/p> \"x\" ; <http://e/q> \"y\" ] .");
    assert_eq!(g.len(), 2);
    assert_eq!(g.subjects().len(), 1);
}

#[test]
fn collection() {
    let g = graph("@prefix : <http://e/> . :s :p ( 1 2 3 ) .");
    assert_eq!(g.len(), 7);
    // exactly one user triple
    let heads = g.objects_for(&iri("http://e/s"), &iri("http://e/p"));
    assert_eq!(heads.len(), 1);
    let mut node = heads[0].clone();
    // walk the chain
    for expected in ["1", "2", "3"] {
        assert!(node.is_blank_node());
        let first = g.objects_for(&node, &Term::iri_unchecked(rdf::first().as_str()));
        assert_eq!(
            first,
            vec![&Term::literal_dt(expected, xsd::integer())],
        );
        let rest = g.objects_for(&node, &Term::iri_unchecked(rdf::rest().as_str()));
        assert_eq!(rest.len(), 1);
        node = rest[0].clone();
    }
    assert!(node == rdf::nil());
}

#[test]
fn empty_collection_is_nil() {
    let g = graph("@prefix : <http://e/> . :s :p () .");
    assert_eq!(g.len(), 1);
    let t = g.iter().next().unwrap();
    assert!(t.o() == &rdf::nil());
}

#[test]
fn nested_collection() {
    let g = graph("@prefix : <http://e/> . :s :p ( 1 ( 2 ) ) .");
    // outer list: 2 links x 2 triples; inner list: 1 link x 2; user: 1
    assert_eq!(g.len(), 7);
}

#[test]
fn collection_as_subject() {
    let g = graph("@prefix : <http://e/> . ( 1 2 ) :p :o .");
    assert_eq!(g.len(), 5);
    let user = g
        .iter()
        .find(|t| t.p() == &iri("http://e/p"))
        .expect("user triple");
    assert!(user.s().is_blank_node());
}

#[test]
fn parsing_is_deterministic() {
    let src = "@prefix : <http://e/> . :s :p ( 1 2 ), [ :q :o ] ; a :C .";
    let reference: Vec<Statement> = graph(src).iter().cloned().collect();
    for _ in 0..3 {
        let again: Vec<Statement> = graph(src).iter().cloned().collect();
        assert_eq!(again, reference);
    }
}

#[test]
fn recovery_continues_after_bad_token() {
    let src = "@prefix ex: <http://e/> . ex:a ex:b % . ex:c ex:d ex:e .";
    let mut emitted = Vec::new();
    let res = TurtleParser::new().parse_str(src, |st| emitted.push(st));
    let TurtleError::Parse(err) = res.unwrap_err() else {
        panic!("expected a parse error");
    };
    assert_eq!(err.issues.len(), 1);
    assert_eq!(err.issues[0].lineno, 1);
    assert_eq!(
        emitted,
        vec![Statement::new(
            iri("http://e/c"),
            iri("http://e/d"),
            iri("http://e/e"),
        )]
    );
}

#[test]
fn validate_aborts_at_first_problem() {
    let src = "@prefix ex: <http://e/> . ex:a ex:b % . ex:c ex:d ex:e .";
    let mut emitted = Vec::new();
    let res = TurtleParser::new()
        .with_validate(true)
        .parse_str(src, |st| emitted.push(st));
    assert!(res.is_err());
    assert!(emitted.is_empty());
}

#[test]
fn undefined_prefix_is_reported() {
    let res = parse_str("ex:a ex:b ex:c .");
    let TurtleError::Parse(err) = res.unwrap_err() else {
        panic!("expected a parse error");
    };
    assert!(err
        .issues
        .iter()
        .any(|i| i.message.contains("undefined prefix")));
}

#[test]
fn missing_dot_is_reported_with_line() {
    let src = "@prefix ex: <http://e/> .\nex:a ex:b ex:c\nex:d ex:e ex:f .";
    let res = parse_str(src);
    let TurtleError::Parse(err) = res.unwrap_err() else {
        panic!("expected a parse error");
    };
    assert!(err.issues[0].lineno >= 2);
}

#[test]
fn comments_are_skipped_anywhere() {
    let g = graph(
        "# leading\n\
         @prefix : <http://e/> . # trailing\n\
         :a # subject\n\
           :b :c .",
    );
    assert_eq!(g.len(), 1);
}

#[test]
fn unicode_escape_in_iri() {
    let g = graph(r"<http://e/\u0041> <http://e/p> <http://e/o> .");
    assert!(g.iter().any(|t| t.s().iri_str() == Some("http://e/A")));
}
