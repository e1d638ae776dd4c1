//! Recursive descent parser for Snek.
//!
//! One method per grammar rule, split by area: top-level items, expressions
//! and patterns. Every name pattern and qualified name gets a fresh
//! [`NodeId`] so the resolver can key its links by occurrence.

mod expr;
mod items;
mod patterns;

use snek_ir::{ConstKind, ConstLiteral, NodeId, NodeIdGen, Program};

use crate::cursor::Cursor;
use crate::lexer::{tokenize, Token};
use crate::ParseError;

/// Parse a whole source file.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source)?;
    Parser::new(Cursor::new(tokens)).parse_program()
}

/// Parser state.
pub struct Parser {
    cursor: Cursor,
    ids: NodeIdGen,
}

impl Parser {
    pub fn new(cursor: Cursor) -> Self {
        Parser {
            cursor,
            ids: NodeIdGen::new(),
        }
    }

    #[inline]
    fn fresh_id(&mut self) -> NodeId {
        self.ids.fresh()
    }

    /// `NUMBER | STRING | '()' | '[]'`, consumed only if present.
    fn parse_const(&mut self) -> Option<ConstLiteral> {
        let line = self.cursor.line();
        let kind = match self.cursor.peek()? {
            Token::Number(n) => ConstKind::Number(*n),
            Token::Str(s) => ConstKind::String(s.clone()),
            Token::Unit => ConstKind::Unit,
            Token::EmptyList => ConstKind::EmptyList,
            _ => return None,
        };
        self.cursor.advance();
        Some(ConstLiteral { kind, line })
    }
}
