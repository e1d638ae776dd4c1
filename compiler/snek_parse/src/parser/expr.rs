//! Blocks and expressions.

use snek_ir::{Block, CallExpr, Expr, LambdaExpr, ListExpr, QualifiedName};

use super::Parser;
use crate::lexer::Token;
use crate::ParseError;

impl Parser {
    fn at_expr_start(&self) -> bool {
        matches!(
            self.cursor.peek(),
            Some(
                Token::LParen
                    | Token::LBrace
                    | Token::LBracket
                    | Token::Number(_)
                    | Token::Str(_)
                    | Token::Unit
                    | Token::EmptyList
                    | Token::Ident(_)
            )
        )
    }

    /// `binding* expr`
    pub(super) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let mut bindings = Vec::new();
        while self.cursor.check(&Token::Let) {
            bindings.push(self.parse_binding(false)?);
        }
        let expr = self.parse_expr()?;
        Ok(Block { bindings, expr })
    }

    /// `call | lambda | list | const | qualname`
    pub(super) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        snek_stack::ensure_sufficient_stack(|| self.parse_expr_inner())
    }

    fn parse_expr_inner(&mut self) -> Result<Expr, ParseError> {
        match self.cursor.peek() {
            Some(Token::LParen) => self.parse_call().map(Expr::Call),
            Some(Token::LBrace) => self.parse_lambda().map(Expr::Lambda),
            Some(Token::LBracket) => self.parse_list().map(Expr::List),
            Some(Token::Ident(_)) => self.parse_qualname().map(Expr::Name),
            _ => match self.parse_const() {
                Some(c) => Ok(Expr::Const(c)),
                None => Err(self.cursor.error("an expression")),
            },
        }
    }

    /// `'(' ('.' | expr) expr* ')'`
    pub(super) fn parse_call(&mut self) -> Result<CallExpr, ParseError> {
        let line = self.cursor.expect(&Token::LParen, "`(`")?;

        let callable = if self.cursor.check(&Token::Dot) {
            let line = self.cursor.line();
            self.cursor.advance();
            Expr::SelfRef { line }
        } else {
            self.parse_expr()?
        };

        let mut args = Vec::new();
        while self.at_expr_start() {
            args.push(self.parse_expr()?);
        }
        self.cursor.expect(&Token::RParen, "`)` or an argument")?;

        Ok(CallExpr {
            callable: Box::new(callable),
            args,
            line,
        })
    }

    /// `'{' pattern* '->' block '}'`
    fn parse_lambda(&mut self) -> Result<LambdaExpr, ParseError> {
        let line = self.cursor.expect(&Token::LBrace, "`{`")?;

        let mut params = Vec::new();
        while !self.cursor.eat(&Token::Arrow) {
            if self.cursor.is_at_end() {
                return Err(self.cursor.error("`->`"));
            }
            params.push(self.parse_pattern()?);
        }

        let block = self.parse_block()?;
        self.cursor.expect(&Token::RBrace, "`}`")?;

        Ok(LambdaExpr {
            params,
            block: Box::new(block),
            line,
        })
    }

    /// `'[' block* ']'`
    fn parse_list(&mut self) -> Result<ListExpr, ParseError> {
        let line = self.cursor.expect(&Token::LBracket, "`[`")?;

        let mut elements = Vec::new();
        while self.cursor.check(&Token::Let) || self.at_expr_start() {
            elements.push(self.parse_block()?);
        }
        self.cursor.expect(&Token::RBracket, "`]` or a list element")?;

        Ok(ListExpr { elements, line })
    }

    /// `IDENT ('.' IDENT)*`
    pub(super) fn parse_qualname(&mut self) -> Result<QualifiedName, ParseError> {
        let (first, line) = self.cursor.expect_ident("a name")?;
        let mut parts = vec![first];
        while self.cursor.check(&Token::Dot)
            && matches!(self.cursor.peek_nth(1), Some(Token::Ident(_)))
        {
            self.cursor.advance();
            let (part, _) = self.cursor.expect_ident("a name")?;
            parts.push(part);
        }
        Ok(QualifiedName {
            id: self.fresh_id(),
            parts,
            line,
        })
    }
}
