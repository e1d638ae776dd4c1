//! Token cursor for navigating the token stream.
//!
//! Provides lookahead, consumption and the `expect` helpers the grammar uses.

use snek_ir::Line;

use crate::lexer::{SpannedToken, Token};
use crate::ParseError;

pub struct Cursor {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl Cursor {
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|t| &t.token)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Line of the current token, or of the last token once the stream is
    /// exhausted.
    pub fn line(&self) -> Line {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    #[inline]
    pub fn check(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }

    pub fn advance(&mut self) -> Option<SpannedToken> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume `token` if it is next.
    pub fn eat(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `token` or fail describing it as `expected`.
    pub fn expect(&mut self, token: &Token, expected: &str) -> Result<Line, ParseError> {
        let line = self.line();
        if self.eat(token) {
            Ok(line)
        } else {
            Err(self.error(expected))
        }
    }

    /// Consume an identifier and return its text.
    pub fn expect_ident(&mut self, expected: &str) -> Result<(String, Line), ParseError> {
        let line = self.line();
        match self.peek() {
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok((name, line))
            }
            _ => Err(self.error(expected)),
        }
    }

    /// Consume a string literal and return its contents.
    pub fn expect_string(&mut self, expected: &str) -> Result<String, ParseError> {
        match self.peek() {
            Some(Token::Str(s)) => {
                let s = s.clone();
                self.pos += 1;
                Ok(s)
            }
            _ => Err(self.error(expected)),
        }
    }

    /// Error for the current position: "expected X, found Y".
    #[cold]
    pub fn error(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(found) => ParseError::unexpected(expected, found, self.line()),
            None => ParseError::unexpected_eof(expected, self.line()),
        }
    }
}
