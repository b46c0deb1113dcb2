//! A small, format-agnostic reader toolkit:
//! a [`Scanner`](scanner::Scanner) cursor,
//! a regex-driven [`Lexer`](lexer::Lexer) over an ordered terminal table,
//! and a table-driven LL(1) [`Parser`](parser::Parser)
//! with FIRST/FOLLOW panic-mode error recovery.
//!
//! Grammars are built with a [`GrammarBuilder`](parser::GrammarBuilder)
//! and frozen into a [`Grammar`](parser::Grammar) value;
//! the engine itself knows nothing about any concrete syntax.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod scanner;
pub mod token;

pub use error::{ConfigError, LexerError, ParseError};
pub use lexer::{Lexer, LexerOptions, Terminal};
pub use parser::{Grammar, GrammarBuilder, GrammarTerm, ParseOptions, Parser, Stage};
pub use token::{Token, TokenMatcher};
