//! I define the error types shared by the lexer and the parser engine.

use std::fmt;

/// Raised when a grammar is built from inconsistent parts.
/// Fatal; never recovered.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// No terminal was registered.
    #[error("no terminal registered")]
    NoTerminals,
    /// No branch table entry was registered.
    #[error("empty branch table")]
    NoBranchTable,
    /// A terminal or whitespace pattern failed to compile.
    #[error("invalid pattern for {name}: {message}")]
    BadPattern {
        /// The terminal (or `whitespace` / `comment`) the pattern belongs to.
        name: String,
        /// The regex compilation error.
        message: String,
    },
    /// The start production is not in the branch table.
    #[error("unknown start production {0:?}")]
    UnknownStart(String),
}

/// Raised when no terminal matches at a non-EOF position.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid token {offending_token:?} on line {lineno} (near {snippet:?})")]
pub struct LexerError {
    /// The beginning of the unmatched input.
    pub snippet: String,
    /// The offending whitespace-delimited slice, truncated to 100 bytes.
    pub offending_token: String,
    /// The line (1-based) of the first uncoverable character.
    pub lineno: usize,
}

/// A single problem recorded while parsing.
#[derive(Debug, Clone)]
pub struct ParseIssue {
    /// The production being parsed, if any.
    pub production: Option<&'static str>,
    /// What went wrong.
    pub message: String,
    /// The line (1-based) of the token that triggered the problem.
    pub lineno: usize,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.production {
            Some(prod) => write!(f, "{} (in {}, line {})", self.message, prod, self.lineno),
            None => write!(f, "{} (line {})", self.message, self.lineno),
        }
    }
}

/// Raised at the end of a parse that recorded at least one problem
/// (or immediately, when parsing with `validate`).
#[derive(Debug, Clone)]
pub struct ParseError {
    /// The problems recorded, in input order.
    pub issues: Vec<ParseIssue>,
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl ParseError {
    /// The line of the first recorded problem.
    pub fn lineno(&self) -> Option<usize> {
        self.issues.first().map(|i| i.lineno)
    }
}
