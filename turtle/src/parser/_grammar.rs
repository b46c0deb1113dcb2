//! The precomputed LL(1) tables for the Turtle grammar:
//! branch table, FIRST and FOLLOW sets.
//!
//! The tables correspond to the W3C Turtle grammar with its EBNF
//! repetitions lowered to right-recursive helper nonterminals
//! (`objectListTail`, `predicateObjectListTail`, `objectSeq`, ...),
//! which is what makes the grammar LL(1).

use terrapin_grammar::GrammarBuilder;
use terrapin_grammar::GrammarTerm::{Literal, NonTerminal, Terminal};
use terrapin_grammar::TokenMatcher::{self, ByKind, ByValue};

use super::_state::{NodeData, TurtleState};

/// The start production.
pub(crate) const START: &str = "turtleDoc";

const IRI_FIRST: &[TokenMatcher] = &[
    ByKind("IRIREF"),
    ByKind("PNAME_LN"),
    ByKind("PNAME_NS"),
];

const BLANK_FIRST: &[TokenMatcher] = &[ByKind("BLANK_NODE_LABEL"), ByKind("ANON")];

const STRING_FIRST: &[TokenMatcher] = &[
    ByKind("STRING_LITERAL_LONG_SINGLE_QUOTE"),
    ByKind("STRING_LITERAL_LONG_QUOTE"),
    ByKind("STRING_LITERAL_QUOTE"),
    ByKind("STRING_LITERAL_SINGLE_QUOTE"),
];

const NUMBER_FIRST: &[TokenMatcher] = &[ByKind("INTEGER"), ByKind("DECIMAL"), ByKind("DOUBLE")];

const BOOLEAN_FIRST: &[TokenMatcher] = &[ByValue("true"), ByValue("false")];

const DIRECTIVE_FIRST: &[TokenMatcher] = &[
    ByValue("@prefix"),
    ByValue("@base"),
    ByValue("PREFIX"),
    ByValue("BASE"),
];

fn union(sets: &[&[TokenMatcher]]) -> Vec<TokenMatcher> {
    let mut out = Vec::new();
    for set in sets {
        for m in *set {
            if !out.contains(m) {
                out.push(*m);
            }
        }
    }
    out
}

/// Install the branch, FIRST and FOLLOW tables into `builder`.
pub(crate) fn install(builder: &mut GrammarBuilder<TurtleState<'_>, NodeData>) {
    let verb_first = union(&[IRI_FIRST, &[ByValue("a")]]);
    let subject_first = union(&[IRI_FIRST, BLANK_FIRST, &[ByValue("(")]]);
    let literal_first = union(&[STRING_FIRST, NUMBER_FIRST, BOOLEAN_FIRST]);
    let object_first = union(&[&subject_first, &[ByValue("[")], &literal_first]);
    let triples_first = union(&[&subject_first, &[ByValue("[")]]);
    let statement_first = union(&[DIRECTIVE_FIRST, &triples_first]);
    let object_follow = union(&[
        &[
            ByValue(","),
            ByValue(";"),
            ByValue("."),
            ByValue("]"),
            ByValue(")"),
        ],
        &object_first,
    ]);

    // -- branch table -------------------------------------------------

    for key in &statement_first {
        builder.branch(
            "turtleDoc",
            *key,
            &[NonTerminal("statement"), NonTerminal("turtleDoc")],
        );
    }
    builder.nullable("turtleDoc");

    for key in DIRECTIVE_FIRST {
        builder.branch("statement", *key, &[NonTerminal("directive")]);
    }
    for key in &triples_first {
        builder.branch("statement", *key, &[NonTerminal("triples"), Literal(".")]);
    }

    builder
        .branch("directive", ByValue("@prefix"), &[NonTerminal("prefixID")])
        .branch("directive", ByValue("@base"), &[NonTerminal("base")])
        .branch("directive", ByValue("PREFIX"), &[NonTerminal("sparqlPrefix")])
        .branch("directive", ByValue("BASE"), &[NonTerminal("sparqlBase")])
        .branch(
            "prefixID",
            ByValue("@prefix"),
            &[
                Literal("@prefix"),
                Terminal("PNAME_NS"),
                Terminal("IRIREF"),
                Literal("."),
            ],
        )
        .branch(
            "base",
            ByValue("@base"),
            &[Literal("@base"), Terminal("IRIREF"), Literal(".")],
        )
        .branch(
            "sparqlPrefix",
            ByValue("PREFIX"),
            &[Literal("PREFIX"), Terminal("PNAME_NS"), Terminal("IRIREF")],
        )
        .branch(
            "sparqlBase",
            ByValue("BASE"),
            &[Literal("BASE"), Terminal("IRIREF")],
        );

    for key in &subject_first {
        builder.branch(
            "triples",
            *key,
            &[NonTerminal("subject"), NonTerminal("predicateObjectList")],
        );
    }
    builder.branch(
        "triples",
        ByValue("["),
        &[
            NonTerminal("blankNodePropertyList"),
            NonTerminal("predicateObjectListOpt"),
        ],
    );

    for key in &verb_first {
        builder.branch(
            "predicateObjectListOpt",
            *key,
            &[NonTerminal("predicateObjectList")],
        );
        builder.branch(
            "predicateObjectList",
            *key,
            &[
                NonTerminal("verb"),
                NonTerminal("objectList"),
                NonTerminal("predicateObjectListTail"),
            ],
        );
        builder.branch(
            "verbObjectListOpt",
            *key,
            &[NonTerminal("verb"), NonTerminal("objectList")],
        );
    }
    builder.nullable("predicateObjectListOpt");
    builder.nullable("verbObjectListOpt");

    builder
        .branch(
            "predicateObjectListTail",
            ByValue(";"),
            &[
                Literal(";"),
                NonTerminal("verbObjectListOpt"),
                NonTerminal("predicateObjectListTail"),
            ],
        )
        .nullable("predicateObjectListTail");

    for key in &object_first {
        builder.branch(
            "objectList",
            *key,
            &[NonTerminal("object"), NonTerminal("objectListTail")],
        );
        builder.branch(
            "objectSeq",
            *key,
            &[NonTerminal("object"), NonTerminal("objectSeq")],
        );
    }
    builder.nullable("objectSeq");
    builder
        .branch(
            "objectListTail",
            ByValue(","),
            &[
                Literal(","),
                NonTerminal("object"),
                NonTerminal("objectListTail"),
            ],
        )
        .nullable("objectListTail");

    builder.branch("verb", ByValue("a"), &[Literal("a")]);
    for key in IRI_FIRST {
        builder.branch("verb", *key, &[NonTerminal("predicate")]);
        builder.branch("predicate", *key, &[NonTerminal("iri")]);
        builder.branch("subject", *key, &[NonTerminal("iri")]);
        builder.branch("object", *key, &[NonTerminal("iri")]);
    }
    for key in BLANK_FIRST {
        builder.branch("subject", *key, &[NonTerminal("BlankNode")]);
        builder.branch("object", *key, &[NonTerminal("BlankNode")]);
    }
    builder.branch("subject", ByValue("("), &[NonTerminal("collection")]);
    builder.branch("object", ByValue("("), &[NonTerminal("collection")]);
    builder.branch(
        "object",
        ByValue("["),
        &[NonTerminal("blankNodePropertyList")],
    );
    for key in &literal_first {
        builder.branch("object", *key, &[NonTerminal("literal")]);
    }

    for key in STRING_FIRST {
        builder.branch("literal", *key, &[NonTerminal("RDFLiteral")]);
        builder.branch(
            "RDFLiteral",
            *key,
            &[NonTerminal("String"), NonTerminal("RDFLiteralSuffixOpt")],
        );
        if let ByKind(kind) = *key {
            builder.branch("String", *key, &[Terminal(kind)]);
        }
    }
    for key in NUMBER_FIRST {
        builder.branch("literal", *key, &[NonTerminal("NumericLiteral")]);
        if let ByKind(kind) = *key {
            builder.branch("NumericLiteral", *key, &[Terminal(kind)]);
        }
    }
    for key in BOOLEAN_FIRST {
        builder.branch("literal", *key, &[NonTerminal("BooleanLiteral")]);
        if let ByValue(value) = *key {
            builder.branch("BooleanLiteral", *key, &[Literal(value)]);
        }
    }

    builder
        .branch(
            "RDFLiteralSuffixOpt",
            ByKind("LANGTAG"),
            &[Terminal("LANGTAG")],
        )
        .branch(
            "RDFLiteralSuffixOpt",
            ByValue("^^"),
            &[Literal("^^"), NonTerminal("iri")],
        )
        .nullable("RDFLiteralSuffixOpt");

    builder
        .branch(
            "blankNodePropertyList",
            ByValue("["),
            &[
                Literal("["),
                NonTerminal("predicateObjectList"),
                Literal("]"),
            ],
        )
        .branch(
            "collection",
            ByValue("("),
            &[Literal("("), NonTerminal("objectSeq"), Literal(")")],
        );

    builder
        .branch("iri", ByKind("IRIREF"), &[Terminal("IRIREF")])
        .branch("iri", ByKind("PNAME_LN"), &[NonTerminal("PrefixedName")])
        .branch("iri", ByKind("PNAME_NS"), &[NonTerminal("PrefixedName")])
        .branch(
            "PrefixedName",
            ByKind("PNAME_LN"),
            &[Terminal("PNAME_LN")],
        )
        .branch(
            "PrefixedName",
            ByKind("PNAME_NS"),
            &[Terminal("PNAME_NS")],
        )
        .branch(
            "BlankNode",
            ByKind("BLANK_NODE_LABEL"),
            &[Terminal("BLANK_NODE_LABEL")],
        )
        .branch("BlankNode", ByKind("ANON"), &[Terminal("ANON")]);

    // -- FIRST sets (recovery) ----------------------------------------

    builder
        .first("turtleDoc", &statement_first)
        .first("statement", &statement_first)
        .first("directive", DIRECTIVE_FIRST)
        .first("prefixID", &[ByValue("@prefix")])
        .first("base", &[ByValue("@base")])
        .first("sparqlPrefix", &[ByValue("PREFIX")])
        .first("sparqlBase", &[ByValue("BASE")])
        .first("triples", &triples_first)
        .first("predicateObjectListOpt", &verb_first)
        .first("predicateObjectList", &verb_first)
        .first("predicateObjectListTail", &[ByValue(";")])
        .first("verbObjectListOpt", &verb_first)
        .first("objectList", &object_first)
        .first("objectListTail", &[ByValue(",")])
        .first("objectSeq", &object_first)
        .first("verb", &verb_first)
        .first("predicate", IRI_FIRST)
        .first("subject", &subject_first)
        .first("object", &object_first)
        .first("literal", &literal_first)
        .first("RDFLiteral", STRING_FIRST)
        .first(
            "RDFLiteralSuffixOpt",
            &[ByKind("LANGTAG"), ByValue("^^")],
        )
        .first("NumericLiteral", NUMBER_FIRST)
        .first("BooleanLiteral", BOOLEAN_FIRST)
        .first("String", STRING_FIRST)
        .first("blankNodePropertyList", &[ByValue("[")])
        .first("collection", &[ByValue("(")])
        .first("iri", IRI_FIRST)
        .first("PrefixedName", &[ByKind("PNAME_LN"), ByKind("PNAME_NS")])
        .first("BlankNode", BLANK_FIRST);

    // -- FOLLOW sets (recovery) ---------------------------------------

    let iri_follow = union(&[&verb_first, &object_first, &object_follow]);
    builder
        .follow("turtleDoc", &[])
        .follow("statement", &statement_first)
        .follow("directive", &statement_first)
        .follow("prefixID", &statement_first)
        .follow("base", &statement_first)
        .follow("sparqlPrefix", &statement_first)
        .follow("sparqlBase", &statement_first)
        .follow("triples", &[ByValue(".")])
        .follow("subject", &verb_first)
        .follow("predicateObjectList", &[ByValue("."), ByValue("]")])
        .follow("predicateObjectListOpt", &[ByValue(".")])
        .follow("predicateObjectListTail", &[ByValue("."), ByValue("]")])
        .follow(
            "verbObjectListOpt",
            &[ByValue(";"), ByValue("."), ByValue("]")],
        )
        .follow("verb", &object_first)
        .follow("predicate", &object_first)
        .follow(
            "objectList",
            &[ByValue(";"), ByValue("."), ByValue("]")],
        )
        .follow(
            "objectListTail",
            &[ByValue(";"), ByValue("."), ByValue("]")],
        )
        .follow("object", &object_follow)
        .follow("objectSeq", &[ByValue(")")])
        .follow("literal", &object_follow)
        .follow("RDFLiteral", &object_follow)
        .follow("RDFLiteralSuffixOpt", &object_follow)
        .follow("NumericLiteral", &object_follow)
        .follow("BooleanLiteral", &object_follow)
        .follow(
            "String",
            &union(&[&[ByKind("LANGTAG"), ByValue("^^")], &object_follow]),
        )
        .follow("iri", &iri_follow)
        .follow("PrefixedName", &iri_follow)
        .follow("BlankNode", &union(&[&verb_first, &object_follow]))
        .follow("collection", &union(&[&verb_first, &object_follow]))
        .follow(
            "blankNodePropertyList",
            &union(&[&verb_first, &[ByValue(".")], &object_follow]),
        );
}
