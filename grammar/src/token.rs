//! I define [`Token`] and [`TokenMatcher`].

use std::fmt;

use mownstr::MownStr;

/// A lexical token.
///
/// A token without a kind is a punctuation or keyword literal:
/// its value is its identity.
/// The value borrows the input except when unescaping rewrote it.
#[derive(Clone, Debug)]
pub struct Token<'a> {
    kind: Option<&'static str>,
    value: MownStr<'a>,
    lineno: usize,
}

impl<'a> Token<'a> {
    /// Build a new token.
    pub fn new(kind: Option<&'static str>, value: MownStr<'a>, lineno: usize) -> Self {
        Token {
            kind,
            value,
            lineno,
        }
    }

    /// The kind of this token,
    /// one of the terminals registered at lexer construction,
    /// or `None` for punctuation/keyword literals.
    pub fn kind(&self) -> Option<&'static str> {
        self.kind
    }

    /// The text of this token.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The line (1-based) on which this token starts.
    pub fn lineno(&self) -> usize {
        self.lineno
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "{}({:?})", kind, self.value()),
            None => write!(f, "{:?}", self.value()),
        }
    }
}

/// How a grammar term matches a token:
/// by kind (named terminals) or by value (punctuation/keyword literals).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenMatcher {
    /// Match any token of the given kind.
    ByKind(&'static str),
    /// Match any token with the given text.
    ByValue(&'static str),
}

impl TokenMatcher {
    /// Whether the given token matches.
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            TokenMatcher::ByKind(kind) => token.kind() == Some(kind),
            TokenMatcher::ByValue(value) => token.value() == *value,
        }
    }
}

impl fmt::Display for TokenMatcher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenMatcher::ByKind(kind) => write!(f, "{kind}"),
            TokenMatcher::ByValue(value) => write!(f, "{value:?}"),
        }
    }
}

/// Whether the given token matches any of the given matchers.
pub fn matches_any(token: &Token, matchers: &[TokenMatcher]) -> bool {
    matchers.iter().any(|m| m.matches(token))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn match_by_kind_and_value() {
        let typed = Token::new(Some("IRIREF"), "<http://e/>".into(), 1);
        let punct = Token::new(None, ".".into(), 1);
        assert!(TokenMatcher::ByKind("IRIREF").matches(&typed));
        assert!(!TokenMatcher::ByKind("IRIREF").matches(&punct));
        assert!(TokenMatcher::ByValue(".").matches(&punct));
        assert!(!TokenMatcher::ByValue(",").matches(&punct));
        // by-value matching ignores the kind
        assert!(TokenMatcher::ByValue("<http://e/>").matches(&typed));
    }
}
