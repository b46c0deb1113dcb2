use terrapin_api::graph::Graph;
use terrapin_api::isomorphism::isomorphic_graphs;
use terrapin_api::ns::xsd;
use terrapin_api::prefix::{Prefix, PrefixMap};
use terrapin_api::term::Term;
use terrapin_api::triple::Statement;
use terrapin_iri::IriRef;

use super::{serialize_str, TurtleConfig, TurtleSerializer};
use crate::error::WriterError;
use crate::parser::parse_str;

const TESTS: &[&str] = &[
    "# empty\n",
    "# simple triples\n\
     @prefix : <http://example.org/ns/> .\n\
     :alice a :Person ; :name \"Alice\" ; :age 42 .\n\
     :bob a :Person, :Man ; :nick \"bob\"@fr, \"bobby\"@en ; :admin true .\n",
    "# lists\n\
     <tag:alice> <tag:likes> ( 1 2 ( 3 4 ) 5 ), ( \"a\" \"b\" ) .\n",
    "# subject list\n\
     ( 1 2 3 ) a <tag:List> .\n",
    "# empty list\n\
     <tag:s> <tag:p> () .\n",
    "# malformed list\n\
     @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .\n\
     _:a rdf:first 42, 43 ; rdf:rest ( 44 ) .\n\
     _:b rdf:first 45 ; rdf:rest ( 46 ), ( 47 ) .\n",
    "# blank node cycles\n\
     _:a <tag:n> \"a\" ; <tag:p> [ <tag:q> [ <tag:r> _:a ] ] .\n\
     _:b <tag:s> [ <tag:s> _:b ] .\n",
    "# shared blank node\n\
     <tag:x> <tag:p> _:s .\n\
     <tag:y> <tag:p> _:s .\n\
     _:s <tag:q> \"v\" .\n",
    "# literals\n\
     @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .\n\
     <tag:s> <tag:p> \"plain\", \"tagged\"@en, \"typed\"^^xsd:date,\n\
       -3, 3.14, 4.2e1, false,\n\
       \"\"\"two\nlines\"\"\", \"with \\\"quotes\\\"\" .\n",
    "# nested property lists\n\
     <tag:s> <tag:p> [ <tag:q> [ <tag:r> \"deep\" ] ] .\n",
    "# anonymous subject\n\
     [ <tag:p> \"x\" ; <tag:q> \"y\" ] .\n",
];

#[test]
fn round_trip() {
    for ttl in TESTS {
        let g1 = parse_str(ttl).unwrap();
        let out = serialize_str(&g1).unwrap();
        let g2 = parse_str(&out)
            .unwrap_or_else(|e| panic!("reparsing failed for {ttl:?}:\n{out}\n{e}"));
        assert!(
            isomorphic_graphs(&g1, &g2),
            "round-trip failed for {ttl:?}:\n{out}"
        );
    }
}

#[test]
fn every_emitted_prefix_is_used() {
    for ttl in TESTS {
        let g = parse_str(ttl).unwrap();
        let out = serialize_str(&g).unwrap();
        let body: String = out
            .lines()
            .filter(|l| !l.starts_with("@prefix"))
            .collect::<Vec<_>>()
            .join("\n");
        for line in out.lines().filter(|l| l.starts_with("@prefix")) {
            let prefix = line["@prefix ".len()..].split(':').next().unwrap();
            assert!(
                body.contains(&format!("{prefix}:")),
                "unused prefix {prefix:?} in:\n{out}"
            );
        }
    }
}

#[test]
fn unused_default_prefixes_are_dropped() {
    let g = parse_str("<tag:a> <tag:b> \"x\" .").unwrap();
    let out = serialize_str(&g).unwrap();
    assert!(!out.contains("@prefix"));
}

#[test]
fn collection_fidelity() {
    let g1 = parse_str("@prefix : <http://e/> . :s :p ( 1 2 3 ) .").unwrap();
    let out = serialize_str(&g1).unwrap();
    assert!(out.contains("( 1 2 3 )"), "no collection in:\n{out}");
    let g2 = parse_str(&out).unwrap();
    assert_eq!(g2.len(), 7);
    assert!(isomorphic_graphs(&g1, &g2));
}

#[test]
fn nested_blank_uses_square_brackets() {
    let g1 = parse_str("_:b <http://e/p> [ <http://e/q> \"x\" ] .").unwrap();
    let out = serialize_str(&g1).unwrap();
    assert!(out.contains("[ <http://e/q> \"x\" ]"), "no inline node in:\n{out}");
    assert!(isomorphic_graphs(&g1, &parse_str(&out).unwrap()));
}

#[test]
fn shared_blank_node_is_not_inlined() {
    let src = "<tag:x> <tag:p> _:s . <tag:y> <tag:p> _:s . _:s <tag:q> \"v\" .";
    let g = parse_str(src).unwrap();
    let out = serialize_str(&g).unwrap();
    assert!(!out.contains('['), "ref-count 2 node was inlined:\n{out}");
}

#[test]
fn literal_forms() {
    let mut g = Graph::new();
    let s = Term::iri("http://e/s").unwrap();
    g.insert(Statement::new(
        s.clone(),
        Term::iri("http://e/int").unwrap(),
        Term::literal_dt("42", xsd::integer()),
    ));
    g.insert(Statement::new(
        s.clone(),
        Term::iri("http://e/bool").unwrap(),
        Term::literal_dt("true", xsd::boolean()),
    ));
    g.insert(Statement::new(
        s.clone(),
        Term::iri("http://e/dbl").unwrap(),
        Term::literal_dt("4.2E1", xsd::double()),
    ));
    g.insert(Statement::new(
        s.clone(),
        Term::iri("http://e/dec").unwrap(),
        Term::literal_dt("3.14", xsd::decimal()),
    ));
    g.insert(Statement::new(
        s,
        Term::iri("http://e/txt").unwrap(),
        Term::literal("two\nlines"),
    ));
    let out = serialize_str(&g).unwrap();
    assert!(out.contains("<http://e/int> 42"), "{out}");
    assert!(out.contains("<http://e/bool> true"), "{out}");
    assert!(out.contains("<http://e/dbl> 4.2e1"), "{out}");
    assert!(out.contains("<http://e/dec> 3.14"), "{out}");
    assert!(out.contains("\"\"\"two\nlines\"\"\""), "{out}");
}

#[test]
fn invalid_numeric_lexicals_stay_quoted() {
    let mut g = Graph::new();
    g.insert(Statement::new(
        Term::iri("http://e/s").unwrap(),
        Term::iri("http://e/p").unwrap(),
        Term::literal_dt("not a number", xsd::integer()),
    ));
    let out = serialize_str(&g).unwrap();
    assert!(out.contains("\"not a number\"^^xsd:integer"), "{out}");
}

#[test]
fn canonicalization() {
    let mut g = Graph::new();
    let s = Term::iri("http://e/s").unwrap();
    g.insert(Statement::new(
        s.clone(),
        Term::iri("http://e/a").unwrap(),
        Term::literal_dt("+007", xsd::integer()),
    ));
    g.insert(Statement::new(
        s.clone(),
        Term::iri("http://e/b").unwrap(),
        Term::literal_dt("01.2300", xsd::decimal()),
    ));
    g.insert(Statement::new(
        s.clone(),
        Term::iri("http://e/c").unwrap(),
        Term::literal_dt("0", xsd::boolean()),
    ));
    g.insert(Statement::new(
        s,
        Term::iri("http://e/d").unwrap(),
        Term::literal_dt("420e-1", xsd::double()),
    ));
    let mut serializer = TurtleSerializer::new_stringifier_with_config(
        TurtleConfig::new().with_canonicalize(true),
    );
    serializer.write_graph(&g);
    serializer.write_epilogue().unwrap();
    let out = serializer.as_str().to_string();
    assert!(out.contains("<http://e/a> 7"), "{out}");
    assert!(out.contains("<http://e/b> 1.23"), "{out}");
    assert!(out.contains("<http://e/c> false"), "{out}");
    assert!(out.contains("<http://e/d> 4.2e1"), "{out}");
}

#[test]
fn base_relativizes_iris() {
    let g = parse_str("<http://e/dir/a> <http://e/dir/b> <http://other/c> .").unwrap();
    let config = TurtleConfig::new().with_base_uri("http://e/dir/").unwrap();
    let mut serializer = TurtleSerializer::new_stringifier_with_config(config);
    serializer.write_graph(&g);
    serializer.write_epilogue().unwrap();
    let out = serializer.as_str().to_string();
    assert!(out.starts_with("@base <http://e/dir/> .\n"), "{out}");
    assert!(out.contains("<a> <b> <http://other/c>"), "{out}");
    assert!(isomorphic_graphs(&g, &parse_str(&out).unwrap()));
}

#[test]
fn standard_prefix_discovery() {
    let g = parse_str(
        "<http://e/x> <http://www.w3.org/2000/01/rdf-schema#label> \"x\" .",
    )
    .unwrap();
    let config = TurtleConfig::new()
        .with_prefixes(PrefixMap::new())
        .with_standard_prefixes(true);
    let mut serializer = TurtleSerializer::new_stringifier_with_config(config);
    serializer.write_graph(&g);
    serializer.write_epilogue().unwrap();
    let out = serializer.as_str().to_string();
    assert!(
        out.contains("@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> ."),
        "{out}"
    );
    assert!(out.contains("rdfs:label"), "{out}");
}

#[test]
fn custom_prefixes_shorten_iris() {
    let g = parse_str("@prefix ex: <http://e/> . ex:a ex:b ex:c .").unwrap();
    let mut prefixes = PrefixMap::new();
    prefixes.insert(
        Prefix::new_unchecked("ex"),
        IriRef::new_unchecked(Box::from("http://e/")),
    );
    let config = TurtleConfig::new().with_prefixes(prefixes);
    let mut serializer = TurtleSerializer::new_stringifier_with_config(config);
    serializer.write_graph(&g);
    serializer.write_epilogue().unwrap();
    let out = serializer.as_str().to_string();
    assert!(out.contains("ex:a ex:b ex:c"), "{out}");
}

#[test]
fn default_namespace() {
    let g = parse_str("@prefix : <http://e/> . :a :b :c .").unwrap();
    let config = TurtleConfig::new()
        .with_default_namespace("http://e/")
        .unwrap();
    let mut serializer = TurtleSerializer::new_stringifier_with_config(config);
    serializer.write_graph(&g);
    serializer.write_epilogue().unwrap();
    let out = serializer.as_str().to_string();
    assert!(out.contains("@prefix : <http://e/> ."), "{out}");
    assert!(out.contains(":a :b :c"), "{out}");
}

#[test]
fn qname_requires_valid_local() {
    // the local part starts with a combining mark, which PN_LOCAL forbids
    // even with escaping; that object must stay in full IRI form
    let mut g = Graph::new();
    g.insert(Statement::new(
        Term::iri("http://e/s").unwrap(),
        Term::iri("http://e/p").unwrap(),
        Term::iri("http://e/\u{0300}x").unwrap(),
    ));
    let mut prefixes = PrefixMap::new();
    prefixes.insert(
        Prefix::new_unchecked("ex"),
        IriRef::new_unchecked(Box::from("http://e/")),
    );
    let config = TurtleConfig::new().with_prefixes(prefixes);
    let mut serializer = TurtleSerializer::new_stringifier_with_config(config);
    serializer.write_graph(&g);
    serializer.write_epilogue().unwrap();
    let out = serializer.as_str().to_string();
    assert!(out.contains("ex:s ex:p <http://e/\u{0300}x>"), "{out}");
}

#[test]
fn max_depth_falls_back_to_labels() {
    let src = "<tag:s> <tag:p> [ <tag:q> [ <tag:r> [ <tag:t> [ <tag:u> \"deep\" ] ] ] ] .";
    let g1 = parse_str(src).unwrap();
    let out = serialize_str(&g1).unwrap();
    assert!(out.contains("_:"), "expected a label fallback in:\n{out}");
    let g2 = parse_str(&out).unwrap();
    assert!(isomorphic_graphs(&g1, &g2), "{out}");
}

#[test]
fn unlimited_depth_when_raised() {
    let src = "<tag:s> <tag:p> [ <tag:q> [ <tag:r> [ <tag:t> [ <tag:u> \"deep\" ] ] ] ] .";
    let g1 = parse_str(src).unwrap();
    let config = TurtleConfig::new().with_max_depth(10);
    let mut serializer = TurtleSerializer::new_stringifier_with_config(config);
    serializer.write_graph(&g1);
    serializer.write_epilogue().unwrap();
    let out = serializer.as_str().to_string();
    assert!(!out.contains("_:"), "{out}");
    assert!(isomorphic_graphs(&g1, &parse_str(&out).unwrap()));
}

#[test]
fn rdf_type_is_abbreviated_and_sorted_first() {
    let g = parse_str(
        "@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
         <tag:s> <tag:z> \"last\" ; rdfs:label \"l\" ; a <tag:C> .",
    )
    .unwrap();
    let out = serialize_str(&g).unwrap();
    let a = out.find(" a <tag:C>").expect("abbreviated type");
    let label = out.find("rdfs:label").expect("label");
    let z = out.find("<tag:z>").expect("plain predicate");
    assert!(a < label && label < z, "{out}");
}

#[test]
fn container_membership_sorts_numerically() {
    let g = parse_str(
        "@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .\n\
         <tag:s> rdf:_10 \"j\" ; rdf:_2 \"b\" ; rdf:_1 \"a\" .",
    )
    .unwrap();
    let out = serialize_str(&g).unwrap();
    let p1 = out.find("rdf:_1 ").expect("_1");
    let p2 = out.find("rdf:_2").expect("_2");
    let p10 = out.find("rdf:_10").expect("_10");
    assert!(p1 < p2 && p2 < p10, "{out}");
}

#[test]
fn class_instances_come_first() {
    let g = parse_str(
        "@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
         <tag:other> <tag:p> \"z\" .\n\
         <tag:C> a rdfs:Class .",
    )
    .unwrap();
    let out = serialize_str(&g).unwrap();
    let class_pos = out.find("<tag:C>").expect("class subject");
    let other_pos = out.find("<tag:other>").expect("other subject");
    assert!(class_pos < other_pos, "{out}");
}

#[test]
fn literal_subject_is_rejected() {
    let mut serializer = TurtleSerializer::new_stringifier();
    serializer.write_triple(
        Term::literal("oops"),
        Term::iri("http://e/p").unwrap(),
        Term::literal("x"),
    );
    assert!(matches!(
        serializer.write_epilogue(),
        Err(WriterError::NonSerializable(_))
    ));
}

#[test]
fn epilogue_of_nothing_is_empty() {
    let mut serializer = TurtleSerializer::new_stringifier();
    serializer.write_epilogue().unwrap();
    assert_eq!(serializer.as_str(), "");
}
