//! Parser infrastructure — token navigation, newline handling,
//! error reporting.

use std::collections::VecDeque;

use wren_ast::Module;
use wren_diagnostics::Diagnostic;
use wren_lexer::{Scanner, SourceBuffer, Token, TokenKind};

/// Result of parsing a source file. The module is always produced;
/// syntax problems surface as `parse-error` diagnostics.
#[derive(Debug)]
pub struct ParseResult {
    pub module: Module,
    pub diagnostics: Vec<Diagnostic>,
}

/// The parser. Tokens are pulled lazily from the scanner through a
/// one-token `current` slot; a small pushback queue holds tokens
/// read speculatively while deciding whether a method chain
/// continues past a newline.
pub struct Parser<'src> {
    scanner: Scanner<'src>,
    pub(crate) current: Token,
    lookahead: VecDeque<Token>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src SourceBuffer) -> Self {
        let mut scanner = Scanner::new(source);
        let current = scanner.read_token();
        Self {
            scanner,
            current,
            lookahead: VecDeque::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Parse a whole module: `definition (newline definition)* EOF`,
    /// tolerating leading blank lines.
    pub fn parse(mut self) -> ParseResult {
        let module = self.parse_module();
        ParseResult {
            module,
            diagnostics: self.diagnostics,
        }
    }

    pub(crate) fn parse_module(&mut self) -> Module {
        let mut statements = Vec::new();
        self.ignore_line();
        while !self.at(TokenKind::Eof) {
            statements.push(self.parse_definition());
            if self.at(TokenKind::Eof) {
                break;
            }
            self.consume_line("expected newline after statement");
        }
        Module { statements }
    }

    // ---- Token navigation ----

    fn next_token(&mut self) -> Token {
        self.lookahead
            .pop_front()
            .unwrap_or_else(|| self.scanner.read_token())
    }

    /// Take the current token and step to the next one.
    pub(crate) fn advance(&mut self) -> Token {
        let next = self.next_token();
        std::mem::replace(&mut self.current, next)
    }

    /// Undo an `advance`: re-queue the current token and make
    /// `token` current again. Used by the chain-dot speculation.
    pub(crate) fn push_back(&mut self, token: Token) {
        let current = std::mem::replace(&mut self.current, token);
        self.lookahead.push_front(current);
    }

    // ---- Matching helpers ----

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub(crate) fn at_name(&self) -> bool {
        matches!(self.current.kind, TokenKind::Name(_))
    }

    /// True if the current token is the identifier `text`. Used for
    /// contextual keywords like `as` in import lists.
    pub(crate) fn at_name_text(&self, text: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Name(name) if name == text)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Expect a token of `kind`. On mismatch, report and take the
    /// offending token anyway; no recovery beyond that.
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> Token {
        if self.at(kind) {
            self.advance()
        } else {
            self.error_at_current(message);
            self.advance()
        }
    }

    pub(crate) fn expect_name(&mut self, message: &str) -> Token {
        if self.at_name() {
            self.advance()
        } else {
            self.error_at_current(message);
            self.advance()
        }
    }

    pub(crate) fn expect_string(&mut self, message: &str) -> Token {
        if self.at(TokenKind::String) {
            self.advance()
        } else {
            self.error_at_current(message);
            self.advance()
        }
    }

    // ---- Newline handling ----

    /// Consume any run of `Line` tokens; true if at least one was.
    pub(crate) fn match_line(&mut self) -> bool {
        let mut matched = false;
        while self.at(TokenKind::Line) {
            self.advance();
            matched = true;
        }
        matched
    }

    /// Skip newlines where they are insignificant.
    pub(crate) fn ignore_line(&mut self) {
        self.match_line();
    }

    /// Require at least one newline, then skip the rest.
    pub(crate) fn consume_line(&mut self, message: &str) {
        if !self.match_line() {
            self.error_at_current(message);
            self.advance();
            self.ignore_line();
        }
    }

    // ---- Error reporting ----

    /// Append a `parse-error` diagnostic at the current token. An
    /// `Error` token carries the scanner's own message; use it.
    pub(crate) fn error_at_current(&mut self, message: &str) {
        let text = match &self.current.kind {
            TokenKind::Error(scan_message) => scan_message.clone(),
            kind => format!("{message}, found {kind}"),
        };
        self.diagnostics
            .push(Diagnostic::error(text, self.current.span).with_code("parse-error"));
    }
}
