//! Binding and match patterns.

use snek_ir::{NamePattern, Pattern};

use super::Parser;
use crate::lexer::Token;
use crate::ParseError;

impl Parser {
    /// `'_' | IDENT | '[' pattern* ']' | '(' qualname pattern* ')' | const`
    pub(super) fn parse_pattern(&mut self) -> Result<Pattern, ParseError> {
        snek_stack::ensure_sufficient_stack(|| self.parse_pattern_inner())
    }

    fn parse_pattern_inner(&mut self) -> Result<Pattern, ParseError> {
        let line = self.cursor.line();
        match self.cursor.peek() {
            Some(Token::Ident(name)) if name == "_" => {
                self.cursor.advance();
                Ok(Pattern::Wildcard)
            }
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.cursor.advance();
                Ok(Pattern::Name(NamePattern {
                    id: self.fresh_id(),
                    name,
                    line,
                }))
            }
            Some(Token::LBracket) => {
                self.cursor.advance();
                let mut inners = Vec::new();
                while !self.cursor.eat(&Token::RBracket) {
                    if self.cursor.is_at_end() {
                        return Err(self.cursor.error("`]`"));
                    }
                    inners.push(self.parse_pattern()?);
                }
                Ok(Pattern::List(inners))
            }
            Some(Token::LParen) => {
                self.cursor.advance();
                let name = self.parse_qualname()?;
                let mut params = Vec::new();
                while !self.cursor.eat(&Token::RParen) {
                    if self.cursor.is_at_end() {
                        return Err(self.cursor.error("`)`"));
                    }
                    params.push(self.parse_pattern()?);
                }
                Ok(Pattern::Type { name, params })
            }
            _ => match self.parse_const() {
                Some(c) => Ok(Pattern::Const(c)),
                None => Err(self.cursor.error("a pattern")),
            },
        }
    }
}
