//! I define [`Scanner`], a pull-based cursor over a UTF-8 string
//! with regex-anchored matching.

use regex::Regex;

/// A cursor over a string, advanced by anchored regex matches.
///
/// All patterns are matched at the cursor only: a match starting past the
/// cursor is not a match.
#[derive(Clone, Debug)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Build a new scanner at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Whether the cursor reached the end of the input.
    pub fn eos(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// The remaining input, from the cursor to the end.
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// The current cursor position (a byte offset).
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Move the cursor to the given byte offset.
    ///
    /// # Panics
    /// Panics if `pos` is not a character boundary of the input.
    pub fn set_pos(&mut self, pos: usize) {
        assert!(self.input.is_char_boundary(pos));
        self.pos = pos;
    }

    /// Try to match `pattern` at the cursor.
    /// On success, advance the cursor past the match and return the matched
    /// text; on failure, leave the cursor untouched and return `None`.
    pub fn scan(&mut self, pattern: &Regex) -> Option<&'a str> {
        let m = pattern.find(self.rest())?;
        // an empty match cannot advance the cursor, treat it as a failure
        if m.start() != 0 || m.end() == 0 {
            return None;
        }
        let matched = &self.rest()[..m.end()];
        self.pos += m.end();
        Some(matched)
    }

    /// Like [`scan`](Scanner::scan), but only return the matched length.
    pub fn skip(&mut self, pattern: &Regex) -> Option<usize> {
        self.scan(pattern).map(str::len)
    }

    /// Advance the cursor by one character.
    /// Return `false` when already at the end of the input.
    pub fn advance_char(&mut self) -> bool {
        match self.rest().chars().next() {
            Some(c) => {
                self.pos += c.len_utf8();
                true
            }
            None => false,
        }
    }
}
