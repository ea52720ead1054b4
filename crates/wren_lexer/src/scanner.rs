//! Core scanner implementation.
//!
//! Scans Wren source byte by byte, producing tokens on demand.
//! Whitespace and comments are discarded, but line feeds are not:
//! every `\n` becomes a `Line` token, since Wren statements are
//! newline-terminated. The scanner itself never reports diagnostics;
//! an unscannable byte becomes an `Error` token for the parser to
//! surface.

use wren_diagnostics::Span;

use crate::source::SourceBuffer;
use crate::token::{Token, TokenKind};

/// The Wren scanner. Tokens are pulled one at a time with
/// [`Scanner::read_token`]; after the end of input it returns `Eof`
/// forever.
pub struct Scanner<'src> {
    source: &'src SourceBuffer,
    pos: usize,
    start: usize,
    /// Stack tracking interpolation nesting. Each entry counts the
    /// open parentheses inside one `%(...)` expression; when an
    /// entry reaches zero the scanner resumes reading the string.
    interpolations: Vec<u32>,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src SourceBuffer) -> Self {
        let mut scanner = Self {
            source,
            pos: 0,
            start: 0,
            interpolations: Vec::new(),
        };
        scanner.skip_bom_and_shebang();
        scanner
    }

    /// Read the next token. Returns `Eof` once the input is exhausted.
    pub fn read_token(&mut self) -> Token {
        self.skip_trivia();
        self.start = self.pos;

        if self.is_at_end() {
            return self.make(TokenKind::Eof);
        }

        let c = self.advance();
        match c {
            b'(' => {
                if let Some(depth) = self.interpolations.last_mut() {
                    *depth += 1;
                }
                self.make(TokenKind::LeftParen)
            }
            b')' => {
                if let Some(depth) = self.interpolations.last_mut() {
                    *depth -= 1;
                    if *depth == 0 {
                        // The `%(...)` expression is complete; the
                        // rest of the string starts at this paren.
                        self.interpolations.pop();
                        return self.read_string();
                    }
                }
                self.make(TokenKind::RightParen)
            }
            b'[' => self.make(TokenKind::LeftBracket),
            b']' => self.make(TokenKind::RightBracket),
            b'{' => self.make(TokenKind::LeftBrace),
            b'}' => self.make(TokenKind::RightBrace),
            b':' => self.make(TokenKind::Colon),
            b',' => self.make(TokenKind::Comma),
            b'*' => self.make(TokenKind::Star),
            b'/' => self.make(TokenKind::Slash),
            b'%' => self.make(TokenKind::Percent),
            b'^' => self.make(TokenKind::Caret),
            b'+' => self.make(TokenKind::Plus),
            b'~' => self.make(TokenKind::Tilde),
            b'?' => self.make(TokenKind::Question),
            b'#' => self.read_attribute(),
            b'.' => {
                if self.eat(b'.') {
                    if self.eat(b'.') {
                        self.make(TokenKind::DotDotDot)
                    } else {
                        self.make(TokenKind::DotDot)
                    }
                } else {
                    self.make(TokenKind::Dot)
                }
            }
            b'-' => {
                if self.eat(b'>') {
                    self.make(TokenKind::Arrow)
                } else {
                    self.make(TokenKind::Minus)
                }
            }
            b'|' => {
                if self.eat(b'|') {
                    self.make(TokenKind::PipePipe)
                } else {
                    self.make(TokenKind::Pipe)
                }
            }
            b'&' => {
                if self.eat(b'&') {
                    self.make(TokenKind::AmpAmp)
                } else {
                    self.make(TokenKind::Amp)
                }
            }
            b'!' => {
                if self.eat(b'=') {
                    self.make(TokenKind::BangEqual)
                } else {
                    self.make(TokenKind::Bang)
                }
            }
            b'=' => {
                if self.eat(b'=') {
                    self.make(TokenKind::EqualEqual)
                } else {
                    self.make(TokenKind::Equal)
                }
            }
            b'<' => {
                if self.eat(b'<') {
                    self.make(TokenKind::LessLess)
                } else if self.eat(b'=') {
                    self.make(TokenKind::LessEqual)
                } else {
                    self.make(TokenKind::Less)
                }
            }
            b'>' => {
                if self.eat(b'>') {
                    self.make(TokenKind::GreaterGreater)
                } else if self.eat(b'=') {
                    self.make(TokenKind::GreaterEqual)
                } else {
                    self.make(TokenKind::Greater)
                }
            }
            b'\n' => self.make(TokenKind::Line),
            b'"' => {
                if self.peek() == b'"' && self.peek_next() == b'"' {
                    self.advance();
                    self.advance();
                    self.read_raw_string()
                } else {
                    self.read_string()
                }
            }
            b'_' => self.read_field(),
            b'0'..=b'9' => self.read_number(c),
            c if is_name_start(c) => self.read_name(),
            c => {
                let message = if c.is_ascii_graphic() {
                    format!("unexpected character '{}'", c as char)
                } else {
                    format!("unexpected byte 0x{c:02x}")
                };
                self.make(TokenKind::Error(message))
            }
        }
    }

    // === Byte navigation ===

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.source.byte_at(self.pos)
        }
    }

    fn peek_next(&self) -> u8 {
        if self.pos + 1 >= self.source.len() {
            0
        } else {
            self.source.byte_at(self.pos + 1)
        }
    }

    fn advance(&mut self) -> u8 {
        let c = self.source.byte_at(self.pos);
        self.pos += 1;
        c
    }

    fn eat(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn make(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.start as u32, self.pos as u32))
    }

    fn text(&self) -> &'src str {
        &self.source.text()[self.start..self.pos]
    }

    // === Leading junk ===

    /// Skip a UTF-8 byte order mark and a `#!` shebang line, if the
    /// source begins with them.
    fn skip_bom_and_shebang(&mut self) {
        let text = self.source.text().as_bytes();
        if text.starts_with(&[0xef, 0xbb, 0xbf]) {
            self.pos = 3;
        }
        if text[self.pos..].starts_with(b"#!") {
            while !self.is_at_end() && self.peek() != b'\n' {
                self.pos += 1;
            }
        }
    }

    // === Whitespace and comments ===

    /// Skip spaces, tabs, carriage returns, and comments. Line feeds
    /// are significant and stay put.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                b' ' | b'\t' | b'\r' => {
                    self.pos += 1;
                }
                b'/' if self.peek_next() == b'/' => {
                    while !self.is_at_end() && self.peek() != b'\n' {
                        self.pos += 1;
                    }
                }
                b'/' if self.peek_next() == b'*' => self.skip_block_comment(),
                _ => return,
            }
        }
    }

    /// Skip a `/* ... */` comment with arbitrary nesting. An
    /// unterminated comment is silently closed at end of input.
    fn skip_block_comment(&mut self) {
        self.pos += 2;
        let mut depth: u32 = 1;
        while !self.is_at_end() && depth > 0 {
            if self.peek() == b'/' && self.peek_next() == b'*' {
                self.pos += 2;
                depth += 1;
            } else if self.peek() == b'*' && self.peek_next() == b'/' {
                self.pos += 2;
                depth -= 1;
            } else {
                self.pos += 1;
            }
        }
    }

    // === Attributes ===

    /// `#` starts an attribute: `#!` or `#`, then everything to the
    /// end of the line at zero parenthesis depth, so grouped values
    /// like `#key(a, b,\n c)` may span lines. Attributes produce no
    /// token; the scanner resumes with whatever follows.
    fn read_attribute(&mut self) -> Token {
        self.eat(b'!');
        let mut parens: u32 = 0;
        while !self.is_at_end() {
            match self.peek() {
                b'(' => parens += 1,
                b')' => parens = parens.saturating_sub(1),
                b'\n' if parens == 0 => break,
                _ => {}
            }
            self.pos += 1;
        }
        self.read_token()
    }

    // === Identifiers, fields, keywords ===

    fn read_name(&mut self) -> Token {
        while is_name_continue(self.peek()) {
            self.pos += 1;
        }
        let kind = TokenKind::for_identifier(self.text());
        self.make(kind)
    }

    fn read_field(&mut self) -> Token {
        let is_static = self.peek() == b'_';
        while is_name_continue(self.peek()) {
            self.pos += 1;
        }
        let text = self.text().to_string();
        if is_static {
            self.make(TokenKind::StaticField(text))
        } else {
            self.make(TokenKind::Field(text))
        }
    }

    // === Numbers ===

    fn read_number(&mut self, first: u8) -> Token {
        if first == b'0' && (self.peek() == b'x' || self.peek() == b'X') {
            return self.read_hex_number();
        }

        while self.peek().is_ascii_digit() {
            self.pos += 1;
        }

        // A fractional part only if a digit follows the dot, so that
        // `1..2` stays a range expression.
        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.pos += 1;
            while self.peek().is_ascii_digit() {
                self.pos += 1;
            }
        }

        if self.peek() == b'e' || self.peek() == b'E' {
            let mut lookahead = self.pos + 1;
            if matches!(
                self.source.text().as_bytes().get(lookahead),
                Some(&b'+') | Some(&b'-')
            ) {
                lookahead += 1;
            }
            if self
                .source
                .text()
                .as_bytes()
                .get(lookahead)
                .is_some_and(|b| b.is_ascii_digit())
            {
                self.pos = lookahead;
                while self.peek().is_ascii_digit() {
                    self.pos += 1;
                }
            }
        }

        let value = self.text().parse::<f64>().unwrap_or(f64::NAN);
        self.make(TokenKind::Number(value))
    }

    fn read_hex_number(&mut self) -> Token {
        self.pos += 1; // x
        while self.peek().is_ascii_hexdigit() {
            self.pos += 1;
        }
        let digits = &self.source.text()[self.start + 2..self.pos];
        let value = u64::from_str_radix(digits, 16).map(|v| v as f64).unwrap_or(f64::NAN);
        self.make(TokenKind::Number(value))
    }

    // === Strings ===

    /// Read string content up to a closing `"` (a `String` token) or
    /// a `%(` interpolation opener (an `Interpolation` token). Also
    /// called to resume after an interpolation's closing paren, which
    /// is included at the front of the resumed token. Unterminated
    /// strings are silently closed at end of input.
    fn read_string(&mut self) -> Token {
        let mut kind = TokenKind::String;
        while !self.is_at_end() {
            let c = self.advance();
            match c {
                b'"' => break,
                b'\\' => {
                    // The escaped byte is swallowed unvalidated; the
                    // analyzer never evaluates string values.
                    if !self.is_at_end() {
                        self.pos += 1;
                    }
                }
                b'%' if self.peek() == b'(' => {
                    self.pos += 1;
                    self.interpolations.push(1);
                    kind = TokenKind::Interpolation;
                    break;
                }
                _ => {}
            }
        }
        self.make(kind)
    }

    /// Read a `"""` raw string to the next `"""` (or end of input).
    /// No escapes, no interpolation.
    fn read_raw_string(&mut self) -> Token {
        while !self.is_at_end() {
            if self.peek() == b'"' && self.peek_next() == b'"' && self.peek_at(2) == b'"' {
                self.pos += 3;
                break;
            }
            self.pos += 1;
        }
        self.make(TokenKind::String)
    }

    fn peek_at(&self, n: usize) -> u8 {
        if self.pos + n >= self.source.len() {
            0
        } else {
            self.source.byte_at(self.pos + n)
        }
    }
}

fn is_name_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_name_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}
