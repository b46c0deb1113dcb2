//! I define [`Lexer`],
//! producing a lazy sequence of [`Token`]s from an ordered terminal table.

use mownstr::MownStr;
use regex::Regex;

use crate::error::{ConfigError, LexerError};
use crate::scanner::Scanner;
use crate::token::Token;

/// A terminal of the lexer: an optional kind, an anchored pattern, and
/// whether matched text must be unescaped before being emitted.
///
/// The registration order of terminals defines their priority:
/// the first pattern that matches at the cursor wins.
#[derive(Clone, Debug)]
pub struct Terminal {
    pub(crate) kind: Option<&'static str>,
    pub(crate) pattern: Regex,
    pub(crate) unescape: bool,
}

impl Terminal {
    /// Build a terminal from its kind and pattern.
    pub fn new(
        kind: Option<&'static str>,
        pattern: &str,
        unescape: bool,
    ) -> Result<Self, ConfigError> {
        let anchored = format!("^(?:{pattern})");
        let pattern = Regex::new(&anchored).map_err(|err| ConfigError::BadPattern {
            name: kind.unwrap_or("<anonymous>").to_string(),
            message: err.to_string(),
        })?;
        Ok(Terminal {
            kind,
            pattern,
            unescape,
        })
    }
}

/// The trivia patterns of a lexer.
#[derive(Clone, Debug)]
pub struct LexerOptions {
    pub(crate) whitespace: Regex,
    pub(crate) comment: Regex,
}

impl LexerOptions {
    /// Build lexer options from whitespace and comment patterns.
    pub fn new(whitespace: &str, comment: &str) -> Result<Self, ConfigError> {
        let compile = |name: &str, pattern: &str| {
            Regex::new(&format!("^(?:{pattern})")).map_err(|err| ConfigError::BadPattern {
                name: name.to_string(),
                message: err.to_string(),
            })
        };
        Ok(LexerOptions {
            whitespace: compile("whitespace", whitespace)?,
            comment: compile("comment", comment)?,
        })
    }
}

impl Default for LexerOptions {
    fn default() -> Self {
        LexerOptions::new(r"\s+", r"#[^\n\r]*").unwrap()
    }
}

/// A lexer over a UTF-8 input, driven by an ordered terminal table.
#[derive(Debug)]
pub struct Lexer<'t, 'a> {
    scanner: Scanner<'a>,
    terminals: &'t [Terminal],
    options: &'t LexerOptions,
    lineno: usize,
    peeked: Option<Token<'a>>,
}

impl<'t, 'a> Lexer<'t, 'a> {
    /// Build a lexer over `input`.
    /// Fail with [`ConfigError::NoTerminals`] when `terminals` is empty.
    pub fn new(
        input: &'a str,
        terminals: &'t [Terminal],
        options: &'t LexerOptions,
    ) -> Result<Self, ConfigError> {
        if terminals.is_empty() {
            return Err(ConfigError::NoTerminals);
        }
        Ok(Lexer {
            scanner: Scanner::new(input),
            terminals,
            options,
            lineno: 1,
            peeked: None,
        })
    }

    /// The line (1-based) the cursor is currently on.
    pub fn lineno(&self) -> usize {
        match &self.peeked {
            Some(token) => token.lineno(),
            None => self.lineno,
        }
    }

    /// Return the next token without consuming it.
    /// Idempotent until [`shift`](Lexer::shift) is called.
    pub fn first(&mut self) -> Result<Option<Token<'a>>, LexerError> {
        if self.peeked.is_none() {
            self.peeked = self.next_token()?;
        }
        Ok(self.peeked.clone())
    }

    /// Return the next token and consume it.
    pub fn shift(&mut self) -> Result<Option<Token<'a>>, LexerError> {
        match self.peeked.take() {
            Some(token) => Ok(Some(token)),
            None => self.next_token(),
        }
    }

    /// Attempt to resynchronize after a [`LexerError`]:
    /// skip `pattern` (if given), then retry;
    /// as long as tokenization keeps failing, advance one character.
    pub fn recover(&mut self, pattern: Option<&Regex>) {
        if let Some(pattern) = pattern {
            if let Some(skipped) = self.scanner.scan(pattern) {
                self.lineno += newlines(skipped);
            }
        }
        while self.first().is_err() {
            match self.scanner.rest().chars().next() {
                Some(c) => {
                    if c == '\n' {
                        self.lineno += 1;
                    }
                    self.scanner.advance_char();
                }
                None => return,
            }
        }
    }

    /// Iterate over the remaining tokens.
    ///
    /// The sequence is finite: it ends at EOF, or after yielding the first
    /// tokenization error. It can only be restarted by building a new lexer.
    pub fn tokens(&mut self) -> Tokens<'_, 't, 'a> {
        Tokens {
            lexer: self,
            done: false,
        }
    }

    fn next_token(&mut self) -> Result<Option<Token<'a>>, LexerError> {
        self.skip_trivia();
        if self.scanner.eos() {
            return Ok(None);
        }
        for terminal in self.terminals {
            if let Some(matched) = self.scanner.scan(&terminal.pattern) {
                let lineno = self.lineno;
                self.lineno += newlines(matched);
                let value = if terminal.unescape {
                    unescape(matched)
                } else {
                    MownStr::from(matched)
                };
                return Ok(Some(Token::new(terminal.kind, value, lineno)));
            }
        }
        Err(self.error())
    }

    /// Skip whitespace then comments, repeatedly, until neither matches.
    fn skip_trivia(&mut self) {
        loop {
            let mut skipped = false;
            if let Some(ws) = self.scanner.scan(&self.options.whitespace) {
                self.lineno += newlines(ws);
                skipped = true;
            }
            if self.scanner.scan(&self.options.comment).is_some() {
                skipped = true;
            }
            if !skipped {
                return;
            }
        }
    }

    fn error(&self) -> LexerError {
        let rest = self.scanner.rest();
        let offending = rest.split_whitespace().next().unwrap_or("");
        LexerError {
            snippet: truncate(rest, 100).to_string(),
            offending_token: truncate(offending, 100).to_string(),
            lineno: self.lineno,
        }
    }
}

/// The iterator returned by [`Lexer::tokens`].
#[derive(Debug)]
pub struct Tokens<'l, 't, 'a> {
    lexer: &'l mut Lexer<'t, 'a>,
    done: bool,
}

impl<'a> Iterator for Tokens<'_, '_, 'a> {
    type Item = Result<Token<'a>, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.lexer.shift() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

fn newlines(text: &str) -> usize {
    text.bytes().filter(|b| *b == b'\n').count()
}

fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Apply the escape transformation to `text`, in a single left-to-right
/// pass: `\uXXXX` / `\UXXXXXXXX` are checked first at each backslash, then
/// the string escapes (`\t \n \r \b \f \" \' \\`). Characters produced by
/// an escape are final, they are never re-interpreted by a later escape.
/// Unknown escapes are left untouched.
///
/// The result borrows `text` when it contains no backslash.
pub fn unescape(text: &str) -> MownStr<'_> {
    if !text.contains('\\') {
        return MownStr::from(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = rest.find('\\') {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx + 1..];
        let (replacement, consumed) = match tail.chars().next() {
            Some('u') => match decode_codepoint(tail.get(1..5)) {
                Some(c) => (c, 5),
                None => ('\\', 0),
            },
            Some('U') => match decode_codepoint(tail.get(1..9)) {
                Some(c) => (c, 9),
                None => ('\\', 0),
            },
            Some('t') => ('\t', 1),
            Some('n') => ('\n', 1),
            Some('r') => ('\r', 1),
            Some('b') => ('\u{8}', 1),
            Some('f') => ('\u{c}', 1),
            Some('"') => ('"', 1),
            Some('\'') => ('\'', 1),
            Some('\\') => ('\\', 1),
            _ => ('\\', 0),
        };
        out.push(replacement);
        rest = &tail[consumed..];
    }
    out.push_str(rest);
    MownStr::from(out)
}

fn decode_codepoint(hex: Option<&str>) -> Option<char> {
    let hex = hex?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let code = u32::from_str_radix(hex, 16).ok()?;
    // lone surrogates and out-of-range values become U+FFFD
    Some(char::from_u32(code).unwrap_or('\u{FFFD}'))
}
