//! I define the table-driven LL(1) parser engine:
//! [`GrammarBuilder`], the frozen [`Grammar`] value, and [`Parser`].
//!
//! The engine is grammar-agnostic.
//! It is parameterized by a caller context `C`
//! (shared state such as prefix maps or statement sinks)
//! and a per-production record `N`
//! (the data each handled production accumulates).
//! Productions registered without a handler are transparent:
//! tokens and child productions below them
//! report to the nearest handled ancestor.

use std::collections::{HashMap, VecDeque};

use regex::Regex;

use crate::error::{ConfigError, ParseError, ParseIssue};
use crate::lexer::{Lexer, LexerOptions, Terminal};
use crate::token::{matches_any, Token, TokenMatcher};

/// The two boundaries at which a production handler is invoked.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    /// The production was just entered; its record is freshly allocated.
    Start,
    /// The production is complete; its record is fully populated.
    Finish,
}

/// One element of a branch table expansion.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GrammarTerm {
    /// A nonterminal, present in the branch table.
    NonTerminal(&'static str),
    /// A named terminal, matched by kind.
    Terminal(&'static str),
    /// A punctuation/keyword literal, matched by value.
    Literal(&'static str),
}

/// Callback invoked at the start and finish of a handled production.
/// Receives the caller context, the stage, the parent's record,
/// and the production's own record.
pub type ProductionHandler<C, N> = Box<dyn Fn(&mut C, Stage, &mut N, &mut N)>;

/// Callback invoked for each consumed token of a given terminal.
/// Receives the caller context, the enclosing production,
/// the token, and the record of the nearest handled production.
pub type TerminalHandler<C, N> = Box<dyn Fn(&mut C, &'static str, &Token, &mut N)>;

struct ProductionEntry<C, N> {
    handler: ProductionHandler<C, N>,
    recover_to: Option<Regex>,
}

#[derive(Clone, Debug, Default)]
struct ProdBranch {
    by_kind: HashMap<&'static str, Vec<GrammarTerm>>,
    by_value: HashMap<&'static str, Vec<GrammarTerm>>,
    nullable: bool,
}

/// Collect terminals, handlers and tables, then freeze them
/// into a [`Grammar`] with [`build`](GrammarBuilder::build).
///
/// Terminal registration order defines lexing priority.
pub struct GrammarBuilder<C, N> {
    terminals: Vec<(Option<&'static str>, String, bool)>,
    terminal_handlers: HashMap<&'static str, TerminalHandler<C, N>>,
    anon_handler: Option<TerminalHandler<C, N>>,
    productions: HashMap<&'static str, ProductionEntry<C, N>>,
    branch: HashMap<&'static str, ProdBranch>,
    first: HashMap<&'static str, Vec<TokenMatcher>>,
    follow: HashMap<&'static str, Vec<TokenMatcher>>,
    whitespace: String,
    comment: String,
}

impl<C, N> Default for GrammarBuilder<C, N> {
    fn default() -> Self {
        GrammarBuilder {
            terminals: Vec::new(),
            terminal_handlers: HashMap::new(),
            anon_handler: None,
            productions: HashMap::new(),
            branch: HashMap::new(),
            first: HashMap::new(),
            follow: HashMap::new(),
            whitespace: r"\s+".to_string(),
            comment: r"#[^\n\r]*".to_string(),
        }
    }
}

impl<C, N> GrammarBuilder<C, N> {
    /// Build an empty grammar builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a terminal.
    /// `kind` is `None` for the anonymous punctuation/keyword terminal;
    /// `unescape` marks terminals whose matched text must be unescaped
    /// (which are also the ones whose patterns may span newlines).
    pub fn terminal(
        &mut self,
        kind: Option<&'static str>,
        pattern: &str,
        unescape: bool,
    ) -> &mut Self {
        self.terminals.push((kind, pattern.to_string(), unescape));
        self
    }

    /// Register the callback invoked for each token of the given kind.
    /// A callback registered under `None` acts as a catch-all
    /// for anonymous string terminals.
    pub fn on_terminal<F>(&mut self, kind: Option<&'static str>, handler: F) -> &mut Self
    where
        F: Fn(&mut C, &'static str, &Token, &mut N) + 'static,
    {
        match kind {
            Some(kind) => {
                self.terminal_handlers.insert(kind, Box::new(handler));
            }
            None => self.anon_handler = Some(Box::new(handler)),
        }
        self
    }

    /// Register a production handler,
    /// invoked at [`Stage::Start`] and [`Stage::Finish`]
    /// of every instance of that nonterminal.
    pub fn production<F>(&mut self, symbol: &'static str, handler: F) -> &mut Self
    where
        F: Fn(&mut C, Stage, &mut N, &mut N) + 'static,
    {
        self.productions.insert(
            symbol,
            ProductionEntry {
                handler: Box::new(handler),
                recover_to: None,
            },
        );
        self
    }

    /// Set the pattern skipped by the lexer when the given production
    /// is abandoned during panic-mode recovery.
    pub fn recover_to(&mut self, symbol: &'static str, pattern: &str) -> &mut Self {
        if let (Some(entry), Ok(re)) = (
            self.productions.get_mut(symbol),
            Regex::new(&format!("^(?:{pattern})")),
        ) {
            entry.recover_to = Some(re);
        }
        self
    }

    /// Add a branch table entry:
    /// on `key`, expand `symbol` to `expansion`.
    pub fn branch(
        &mut self,
        symbol: &'static str,
        key: TokenMatcher,
        expansion: &[GrammarTerm],
    ) -> &mut Self {
        let entry = self.branch.entry(symbol).or_default();
        match key {
            TokenMatcher::ByKind(kind) => entry.by_kind.insert(kind, expansion.to_vec()),
            TokenMatcher::ByValue(value) => entry.by_value.insert(value, expansion.to_vec()),
        };
        self
    }

    /// Mark `symbol` as nullable (the `ε` key of the branch table).
    pub fn nullable(&mut self, symbol: &'static str) -> &mut Self {
        self.branch.entry(symbol).or_default().nullable = true;
        self
    }

    /// Set the FIRST set of `symbol` (used for error recovery only).
    pub fn first(&mut self, symbol: &'static str, matchers: &[TokenMatcher]) -> &mut Self {
        self.first.insert(symbol, matchers.to_vec());
        self
    }

    /// Set the FOLLOW set of `symbol` (used for error recovery only).
    pub fn follow(&mut self, symbol: &'static str, matchers: &[TokenMatcher]) -> &mut Self {
        self.follow.insert(symbol, matchers.to_vec());
        self
    }

    /// Override the whitespace pattern (default `\s+`).
    pub fn whitespace(&mut self, pattern: &str) -> &mut Self {
        self.whitespace = pattern.to_string();
        self
    }

    /// Override the comment pattern (default `#[^\n\r]*`).
    pub fn comment(&mut self, pattern: &str) -> &mut Self {
        self.comment = pattern.to_string();
        self
    }

    /// Freeze this builder into a [`Grammar`].
    pub fn build(self) -> Result<Grammar<C, N>, ConfigError> {
        if self.terminals.is_empty() {
            return Err(ConfigError::NoTerminals);
        }
        if self.branch.is_empty() {
            return Err(ConfigError::NoBranchTable);
        }
        let mut terminals = Vec::with_capacity(self.terminals.len());
        for (kind, pattern, unescape) in &self.terminals {
            terminals.push(Terminal::new(*kind, pattern, *unescape)?);
        }
        let lexer_options = LexerOptions::new(&self.whitespace, &self.comment)?;
        Ok(Grammar {
            terminals,
            lexer_options,
            terminal_handlers: self.terminal_handlers,
            anon_handler: self.anon_handler,
            productions: self.productions,
            branch: self.branch,
            first: self.first,
            follow: self.follow,
        })
    }
}

/// A frozen grammar: terminal table, handlers,
/// and the branch/FIRST/FOLLOW tables.
pub struct Grammar<C, N> {
    terminals: Vec<Terminal>,
    lexer_options: LexerOptions,
    terminal_handlers: HashMap<&'static str, TerminalHandler<C, N>>,
    anon_handler: Option<TerminalHandler<C, N>>,
    productions: HashMap<&'static str, ProductionEntry<C, N>>,
    branch: HashMap<&'static str, ProdBranch>,
    first: HashMap<&'static str, Vec<TokenMatcher>>,
    follow: HashMap<&'static str, Vec<TokenMatcher>>,
}

impl<C, N> Grammar<C, N> {
    fn lookup(&self, symbol: &str, token: &Token) -> Option<&[GrammarTerm]> {
        let branch = self.branch.get(symbol)?;
        let expansion = match token.kind() {
            Some(kind) => branch.by_kind.get(kind),
            None => branch.by_value.get(token.value()),
        };
        expansion.map(Vec::as_slice)
    }

    fn is_nonterminal(&self, symbol: &str) -> bool {
        self.branch.contains_key(symbol)
    }

    fn is_nullable(&self, symbol: &str) -> bool {
        self.branch.get(symbol).map(|b| b.nullable).unwrap_or(false)
    }

    fn first_of(&self, symbol: &str) -> &[TokenMatcher] {
        self.first.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    fn follow_of(&self, symbol: &str) -> &[TokenMatcher] {
        self.follow.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Options for one [`Parser::parse`] run.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseOptions {
    /// Abort at the first recorded problem instead of recovering.
    pub validate: bool,
}

/// A stack frame of the driver: a production being expanded,
/// and the terms still to consume (`None` until the branch is chosen).
#[derive(Debug)]
struct Frame {
    prod: &'static str,
    terms: Option<VecDeque<GrammarTerm>>,
    pushed_data: bool,
}

impl Frame {
    fn new(prod: &'static str) -> Self {
        Frame {
            prod,
            terms: None,
            pushed_data: false,
        }
    }
}

/// What `skip_until_valid` hands back to the driver.
enum Lookahead<'a> {
    /// A usable token (not consumed).
    Token(Token<'a>),
    /// End of input.
    Eof,
    /// Resynchronization reached the FOLLOW of an open production:
    /// the driver must pop frames.
    Recover,
}

/// A table-driven LL(1) parser for a given [`Grammar`].
pub struct Parser<'g, C, N> {
    grammar: &'g Grammar<C, N>,
    start: &'static str,
}

impl<'g, C, N: Default> Parser<'g, C, N> {
    /// Build a parser for `grammar`, starting at the given production.
    pub fn new(grammar: &'g Grammar<C, N>, start: &'static str) -> Result<Self, ConfigError> {
        if !grammar.is_nonterminal(start) {
            return Err(ConfigError::UnknownStart(start.to_string()));
        }
        Ok(Parser { grammar, start })
    }

    /// Drive the grammar over `input`, firing handlers into `ctx`.
    ///
    /// Problems are accumulated and raised as one aggregated [`ParseError`]
    /// at the end, except with [`ParseOptions::validate`], where the first
    /// problem aborts immediately.
    pub fn parse(&self, input: &str, ctx: &mut C, options: ParseOptions) -> Result<(), ParseError> {
        let mut lexer = match Lexer::new(input, &self.grammar.terminals, &self.grammar.lexer_options)
        {
            Ok(lexer) => lexer,
            // cannot happen on a grammar that passed `build`
            Err(err) => {
                return Err(ParseError {
                    issues: vec![ParseIssue {
                        production: None,
                        message: err.to_string(),
                        lineno: 0,
                    }],
                })
            }
        };
        let mut todo = vec![Frame::new(self.start)];
        let mut prod_data = vec![N::default()];
        let mut errors: Vec<ParseIssue> = Vec::new();
        let mut recovering = false;

        'driver: while !todo.is_empty() {
            // open: choose the branch for the top production
            if todo.last().is_some_and(|f| f.terms.is_none()) {
                let prod = top(&todo).prod;
                let pushed_data = self.on_start(prod, ctx, &mut prod_data);
                top_mut(&mut todo).pushed_data = pushed_data;
                let looked = self.skip_until_valid(
                    &mut lexer,
                    &todo,
                    &mut recovering,
                    &mut errors,
                    options,
                )?;
                match looked {
                    Lookahead::Eof => break 'driver,
                    Lookahead::Recover => {
                        recovering = true;
                        self.pop_frame(&mut todo, ctx, &mut prod_data, &mut lexer, recovering);
                        continue 'driver;
                    }
                    Lookahead::Token(token) => {
                        match self.grammar.lookup(prod, &token) {
                            Some(expansion) => {
                                top_mut(&mut todo).terms =
                                    Some(expansion.iter().copied().collect());
                            }
                            None if self.grammar.is_nullable(prod) => {
                                top_mut(&mut todo).terms = Some(VecDeque::new());
                            }
                            None => {
                                // the token was accepted by skip_until_valid
                                // but has no branch entry: inconsistent tables
                                self.log_issue(
                                    &mut errors,
                                    Some(prod),
                                    format!("no branch entry for {token}"),
                                    token.lineno(),
                                    options,
                                )?;
                                recovering = true;
                                self.pop_frame(
                                    &mut todo,
                                    ctx,
                                    &mut prod_data,
                                    &mut lexer,
                                    recovering,
                                );
                                continue 'driver;
                            }
                        }
                    }
                }
            }
            // consume: work through the chosen terms
            let mut pushed = false;
            loop {
                let front = top(&todo).terms.as_ref().and_then(|t| t.front().copied());
                let Some(term) = front else { break };
                let matcher = match term {
                    GrammarTerm::NonTerminal(nt) => {
                        if recovering && !self.can_start(nt, &mut lexer) {
                            break;
                        }
                        shift_term(&mut todo);
                        todo.push(Frame::new(nt));
                        pushed = true;
                        break;
                    }
                    GrammarTerm::Terminal(kind) => TokenMatcher::ByKind(kind),
                    GrammarTerm::Literal(value) => TokenMatcher::ByValue(value),
                };
                match self.accept(&mut lexer, &matcher) {
                    Some(token) => {
                        recovering = false;
                        shift_term(&mut todo);
                        self.on_token(top(&todo).prod, &token, ctx, &mut prod_data);
                    }
                    None if recovering => break,
                    None => {
                        let (found, lineno) = describe_lookahead(&mut lexer);
                        self.log_issue(
                            &mut errors,
                            Some(top(&todo).prod),
                            format!("expected {matcher}, found {found}"),
                            lineno,
                            options,
                        )?;
                        if !self.resync_on(&matcher, &mut lexer, &todo) {
                            recovering = true;
                            break;
                        }
                        // the expected token is now the lookahead;
                        // the next round of the loop consumes it
                    }
                }
            }
            if !pushed {
                self.pop_frame(&mut todo, ctx, &mut prod_data, &mut lexer, recovering);
            }
        }

        // unwind whatever recursion is left (EOF breaks out mid-stack)
        while !todo.is_empty() {
            self.pop_frame(&mut todo, ctx, &mut prod_data, &mut lexer, recovering);
        }
        // the grammar is done; the input must be too
        if let Ok(Some(token)) = lexer.first() {
            self.log_issue(
                &mut errors,
                None,
                "finished processing before end of file".to_string(),
                token.lineno(),
                options,
            )?;
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ParseError { issues: errors })
        }
    }

    /// Phase 1: peek a token and hand it out if this production can use it.
    /// Phase 2 (panic mode): log, then discard tokens until one is in the
    /// production's FIRST set (resume) or in the FOLLOW set of any open
    /// production (abort via [`Lookahead::Recover`]).
    fn skip_until_valid<'a>(
        &self,
        lexer: &mut Lexer<'_, 'a>,
        todo: &[Frame],
        recovering: &mut bool,
        errors: &mut Vec<ParseIssue>,
        options: ParseOptions,
    ) -> Result<Lookahead<'a>, ParseError> {
        let prod = top(todo).prod;
        let first_set = self.grammar.first_of(prod);
        let nullable = self.grammar.is_nullable(prod);
        let mut in_panic = false;
        loop {
            let token = match lexer.first() {
                Err(err) => {
                    let lineno = err.lineno;
                    self.log_issue(errors, Some(prod), err.to_string(), lineno, options)?;
                    let recover_pattern = self
                        .grammar
                        .productions
                        .get(prod)
                        .and_then(|e| e.recover_to.as_ref());
                    lexer.recover(recover_pattern);
                    in_panic = true;
                    continue;
                }
                Ok(None) => return Ok(Lookahead::Eof),
                Ok(Some(token)) => token,
            };
            let in_first = matches_any(&token, first_set);
            if !in_panic {
                let usable = in_first
                    || (!*recovering && nullable)
                    || (*recovering
                        && nullable
                        && matches_any(&token, self.grammar.follow_of(prod)));
                if usable {
                    *recovering = false;
                    return Ok(Lookahead::Token(token));
                }
                self.log_issue(
                    errors,
                    Some(prod),
                    format!("unexpected {token}"),
                    token.lineno(),
                    options,
                )?;
                in_panic = true;
            }
            if in_first {
                *recovering = false;
                return Ok(Lookahead::Token(token));
            }
            if self.in_follow_union(&token, todo) {
                return Ok(Lookahead::Recover);
            }
            let _ = lexer.shift();
        }
    }

    /// Discard tokens until the expected terminal shows up (true) or a
    /// token in the FOLLOW of an open production does (false).
    fn resync_on(&self, matcher: &TokenMatcher, lexer: &mut Lexer, todo: &[Frame]) -> bool {
        loop {
            match lexer.first() {
                // already reported; just get the lexer going again
                Err(_) => lexer.recover(None),
                Ok(None) => return false,
                Ok(Some(token)) => {
                    if matcher.matches(&token) {
                        return true;
                    }
                    if self.in_follow_union(&token, todo) {
                        return false;
                    }
                    let _ = lexer.shift();
                }
            }
        }
    }

    fn in_follow_union(&self, token: &Token, todo: &[Frame]) -> bool {
        todo.iter()
            .any(|f| matches_any(token, self.grammar.follow_of(f.prod)))
    }

    fn can_start(&self, symbol: &'static str, lexer: &mut Lexer) -> bool {
        match lexer.first() {
            Ok(Some(token)) => {
                matches_any(&token, self.grammar.first_of(symbol))
                    || (self.grammar.is_nullable(symbol)
                        && matches_any(&token, self.grammar.follow_of(symbol)))
            }
            _ => false,
        }
    }

    /// Consume the lookahead if it matches; never consume otherwise.
    fn accept<'a>(&self, lexer: &mut Lexer<'_, 'a>, matcher: &TokenMatcher) -> Option<Token<'a>> {
        match lexer.first() {
            Ok(Some(token)) if matcher.matches(&token) => lexer.shift().ok().flatten(),
            _ => None,
        }
    }

    fn on_start(&self, prod: &'static str, ctx: &mut C, prod_data: &mut Vec<N>) -> bool {
        log::debug!("start {prod}");
        let Some(entry) = self.grammar.productions.get(prod) else {
            return false;
        };
        let mut current = N::default();
        let parent = prod_data.last_mut().expect("root accumulator is never popped");
        (entry.handler)(ctx, Stage::Start, parent, &mut current);
        prod_data.push(current);
        true
    }

    fn pop_frame(
        &self,
        todo: &mut Vec<Frame>,
        ctx: &mut C,
        prod_data: &mut Vec<N>,
        lexer: &mut Lexer,
        recovering: bool,
    ) {
        let Some(frame) = todo.pop() else { return };
        log::debug!("finish {}", frame.prod);
        if frame.pushed_data {
            if let Some(entry) = self.grammar.productions.get(frame.prod) {
                let mut current = prod_data.pop().expect("pushed_data implies a record");
                let parent = prod_data.last_mut().expect("root accumulator is never popped");
                (entry.handler)(ctx, Stage::Finish, parent, &mut current);
            }
        }
        if recovering {
            if let Some(pattern) = self
                .grammar
                .productions
                .get(frame.prod)
                .and_then(|e| e.recover_to.as_ref())
            {
                lexer.recover(Some(pattern));
            }
        }
    }

    fn on_token(&self, prod: &'static str, token: &Token, ctx: &mut C, prod_data: &mut Vec<N>) {
        log::trace!("token {token} in {prod}");
        let handler = match token.kind() {
            Some(kind) => self.grammar.terminal_handlers.get(kind),
            None => self.grammar.anon_handler.as_ref(),
        };
        if let Some(handler) = handler {
            let data = prod_data.last_mut().expect("root accumulator is never popped");
            handler(ctx, prod, token, data);
        }
    }

    fn log_issue(
        &self,
        errors: &mut Vec<ParseIssue>,
        production: Option<&'static str>,
        message: String,
        lineno: usize,
        options: ParseOptions,
    ) -> Result<(), ParseError> {
        log::debug!("parse issue: {message} (line {lineno})");
        errors.push(ParseIssue {
            production,
            message,
            lineno,
        });
        if options.validate {
            Err(ParseError {
                issues: errors.clone(),
            })
        } else {
            Ok(())
        }
    }
}

fn top<'t>(todo: &'t [Frame]) -> &'t Frame {
    todo.last().expect("driver loop guarantees a top frame")
}

fn top_mut<'t>(todo: &'t mut Vec<Frame>) -> &'t mut Frame {
    todo.last_mut().expect("driver loop guarantees a top frame")
}

fn shift_term(todo: &mut Vec<Frame>) {
    if let Some(terms) = top_mut(todo).terms.as_mut() {
        terms.pop_front();
    }
}

fn describe_lookahead(lexer: &mut Lexer) -> (String, usize) {
    match lexer.first() {
        Ok(Some(token)) => (token.to_string(), token.lineno()),
        Ok(None) => ("end of file".to_string(), lexer.lineno()),
        Err(err) => (format!("invalid token {:?}", err.offending_token), err.lineno),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::GrammarTerm::*;
    use super::TokenMatcher::*;

    /// Per-production record for the toy list grammar below.
    #[derive(Debug, Default)]
    struct Node {
        items: Vec<String>,
    }

    /// The toy grammar:
    /// doc   → group doc | ε
    /// group → '(' items ')'
    /// items → WORD items | ε
    /// Each finished group reports "(a b c)" to the context.
    fn grammar() -> Grammar<Vec<String>, Node> {
        let mut b = GrammarBuilder::new();
        b.terminal(Some("WORD"), r"[a-z]+", false)
            .terminal(None, r"[()]", false)
            .on_terminal(Some("WORD"), |_, _, token, data: &mut Node| {
                data.items.push(token.value().to_string());
            })
            .production("group", |ctx: &mut Vec<String>, stage, _, current| {
                if stage == Stage::Finish {
                    ctx.push(format!("({})", current.items.join(" ")));
                }
            })
            .branch("doc", ByValue("("), &[NonTerminal("group"), NonTerminal("doc")])
            .nullable("doc")
            .branch(
                "group",
                ByValue("("),
                &[Literal("("), NonTerminal("items"), Literal(")")],
            )
            .branch("items", ByKind("WORD"), &[Terminal("WORD"), NonTerminal("items")])
            .nullable("items")
            .first("doc", &[ByValue("(")])
            .first("group", &[ByValue("(")])
            .first("items", &[ByKind("WORD")])
            .follow("doc", &[])
            .follow("group", &[ByValue("(")])
            .follow("items", &[ByValue(")")]);
        b.build().unwrap()
    }

    fn parse(input: &str, validate: bool) -> (Vec<String>, Result<(), ParseError>) {
        let grammar = grammar();
        let parser = Parser::new(&grammar, "doc").unwrap();
        let mut groups = Vec::new();
        let res = parser.parse(input, &mut groups, ParseOptions { validate });
        (groups, res)
    }

    #[test]
    fn empty_input() {
        let (groups, res) = parse("", false);
        assert!(res.is_ok());
        assert!(groups.is_empty());
    }

    #[test]
    fn nested_sequences() {
        let (groups, res) = parse("(a b) ( c )", false);
        assert!(res.is_ok());
        assert_eq!(groups, vec!["(a b)", "(c)"]);
    }

    #[test]
    fn determinism() {
        let first = parse("(a b) (c)", false).0;
        for _ in 0..3 {
            assert_eq!(parse("(a b) (c)", false).0, first);
        }
    }

    #[test]
    fn missing_close_recovers() {
        // ')' is missing: one issue, and the next group still parses
        let (groups, res) = parse("(a b ( c )", false);
        let err = res.unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(groups, vec!["(a b)", "(c)"]);
    }

    #[test]
    fn unexpected_token_recovers() {
        let (groups, res) = parse("(a 42 b) (c)", false);
        let err = res.unwrap_err();
        assert!(!err.issues.is_empty());
        assert!(groups.contains(&"(c)".to_string()));
    }

    #[test]
    fn validate_aborts_on_first_issue() {
        let (groups, res) = parse("(a 42 b) (c)", true);
        let err = res.unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert!(groups.is_empty() || !groups.contains(&"(c)".to_string()));
    }

    #[test]
    fn trailing_garbage_is_reported() {
        let (groups, res) = parse("(a))", false);
        let err = res.unwrap_err();
        assert_eq!(groups, vec!["(a)"]);
        assert!(err
            .issues
            .iter()
            .any(|i| i.message.contains("finished processing")));
    }

    #[test]
    fn unknown_start_is_a_config_error() {
        let grammar = grammar();
        assert!(matches!(
            Parser::<Vec<String>, Node>::new(&grammar, "nope"),
            Err(ConfigError::UnknownStart(_))
        ));
    }
}
