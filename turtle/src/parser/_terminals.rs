//! The Turtle terminal patterns, as defined by the
//! [W3C Turtle grammar](https://www.w3.org/TR/turtle/#sec-grammar),
//! expressed in `regex` syntax.
//!
//! The lexer anchors every pattern itself; patterns here are unanchored.

use lazy_static::lazy_static;
use regex::Regex;

/// `PN_CHARS_BASE`, as a character class body.
const PN_CHARS_BASE: &str = r"A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}";

/// `PN_CHARS`, as a character class body (`PN_CHARS_BASE` + `_`, digits,
/// middle dot, combining marks, undertie, hyphen).
const PN_CHARS_EXT: &str = r"_0-9\u{00B7}\u{0300}-\u{036F}\u{203F}-\u{2040}\-";

/// `UCHAR`: numeric escapes.
const UCHAR: &str = r"\\u[0-9A-Fa-f]{4}|\\U[0-9A-Fa-f]{8}";

/// `ECHAR`: string escapes.
const ECHAR: &str = r#"\\[tbnrf"'\\]"#;

/// `PLX`: percent-encoded bytes and reserved-character escapes.
const PLX: &str = r"%[0-9A-Fa-f]{2}|\\[_~.!$&'()*+,;=/?#@%\-]";

lazy_static! {
    /// `PN_PREFIX`.
    static ref PN_PREFIX: String = [
        "[", PN_CHARS_BASE, "](?:[", PN_CHARS_BASE, PN_CHARS_EXT, ".]*[",
        PN_CHARS_BASE, PN_CHARS_EXT, "])?",
    ]
    .concat();

    /// `PN_LOCAL`.
    static ref PN_LOCAL: String = [
        "(?:[", PN_CHARS_BASE, "_0-9:]|", PLX, ")(?:(?:[", PN_CHARS_BASE, PN_CHARS_EXT,
        ".:]|", PLX, ")*(?:[", PN_CHARS_BASE, PN_CHARS_EXT, ":]|", PLX, "))?",
    ]
    .concat();

    /// `IRIREF`.
    pub(crate) static ref IRIREF: String = [
        r#"<(?:[^\u{00}-\u{20}<>"{}|^`\\]|"#, UCHAR, r")*>",
    ]
    .concat();

    /// `PNAME_NS`.
    pub(crate) static ref PNAME_NS: String = ["(?:", PN_PREFIX.as_str(), ")?:"].concat();

    /// `PNAME_LN`.
    pub(crate) static ref PNAME_LN: String = [PNAME_NS.as_str(), PN_LOCAL.as_str()].concat();

    /// `BLANK_NODE_LABEL`.
    pub(crate) static ref BLANK_NODE_LABEL: String = [
        "_:[", PN_CHARS_BASE, "_0-9](?:[", PN_CHARS_BASE, PN_CHARS_EXT, ".]*[",
        PN_CHARS_BASE, PN_CHARS_EXT, "])?",
    ]
    .concat();

    /// `STRING_LITERAL_QUOTE`.
    pub(crate) static ref STRING_LITERAL_QUOTE: String = [
        r#""(?:[^\u{22}\u{5C}\u{0A}\u{0D}]|"#, ECHAR, "|", UCHAR, r#")*""#,
    ]
    .concat();

    /// `STRING_LITERAL_SINGLE_QUOTE`.
    pub(crate) static ref STRING_LITERAL_SINGLE_QUOTE: String = [
        r"'(?:[^\u{27}\u{5C}\u{0A}\u{0D}]|", ECHAR, "|", UCHAR, r")*'",
    ]
    .concat();

    /// `STRING_LITERAL_LONG_QUOTE`.
    pub(crate) static ref STRING_LITERAL_LONG_QUOTE: String = [
        r#""""(?:(?:"|"")?(?:[^"\\]|"#, ECHAR, "|", UCHAR, r#"))*""""#,
    ]
    .concat();

    /// `STRING_LITERAL_LONG_SINGLE_QUOTE`.
    pub(crate) static ref STRING_LITERAL_LONG_SINGLE_QUOTE: String = [
        r"'''(?:(?:'|'')?(?:[^'\\]|", ECHAR, "|", UCHAR, r"))*'''",
    ]
    .concat();

}

/// The anonymous punctuation/keyword terminal.
/// Keywords take a word boundary, so that e.g. `@based` is still a
/// valid LANGTAG and `truely:x` a valid prefixed name
/// (prefixed names are tried before this terminal anyway).
pub(crate) const PUNCTUATION: &str =
    r"(?:@prefix|@base|true|false|PREFIX|BASE|a)\b|\^\^|[()\[\],;.]";

/// `LANGTAG`.
pub(crate) const LANGTAG: &str = r"@[a-zA-Z]+(?:-[a-zA-Z0-9]+)*";

/// `INTEGER`.
pub(crate) const INTEGER: &str = r"[+-]?[0-9]+";

/// `DECIMAL`.
pub(crate) const DECIMAL: &str = r"[+-]?[0-9]*\.[0-9]+";

/// `DOUBLE`.
pub(crate) const DOUBLE: &str =
    r"[+-]?(?:[0-9]+\.[0-9]*[eE][+-]?[0-9]+|\.[0-9]+[eE][+-]?[0-9]+|[0-9]+[eE][+-]?[0-9]+)";

/// `ANON`.
pub(crate) const ANON: &str = r"\[[ \t\r\n]*\]";

lazy_static! {
    /// Anchored `PN_LOCAL`, for validating serializer-produced QNames.
    pub(crate) static ref PN_LOCAL_FULL: Regex = {
        let pattern = ["^(?:", PN_LOCAL.as_str(), ")$"].concat();
        Regex::new(&pattern).expect("PN_LOCAL is a valid pattern")
    };

    /// Anchored `PN_PREFIX`? (possibly empty), for prefix validation.
    pub(crate) static ref PN_PREFIX_FULL: Regex = {
        let pattern = ["^(?:", PN_PREFIX.as_str(), ")?$"].concat();
        Regex::new(&pattern).expect("PN_PREFIX is a valid pattern")
    };
}
