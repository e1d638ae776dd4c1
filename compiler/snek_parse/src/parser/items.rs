//! Imports and declarations.

use snek_ir::{
    Binding, Decl, ImportStmt, NamespaceDecl, Program, QualifiedName, TypeCaseDecl, TypeDecl,
};

use super::Parser;
use crate::lexer::Token;
use crate::ParseError;

impl Parser {
    /// `import* decl* call?`
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut imports = Vec::new();
        while self.cursor.check(&Token::Import) {
            imports.push(self.parse_import()?);
        }

        let decls = self.parse_decls()?;
        let root = NamespaceDecl {
            name: QualifiedName {
                id: self.fresh_id(),
                parts: Vec::new(),
                line: 1,
            },
            public: true,
            decls,
        };

        let expr = if self.cursor.check(&Token::LParen) {
            Some(self.parse_call()?)
        } else {
            None
        };

        if !self.cursor.is_at_end() {
            return Err(self.cursor.error("a declaration or a call"));
        }

        Ok(Program {
            imports,
            root,
            expr,
        })
    }

    /// `'import' STRING | 'import' qualname+ 'from' STRING`
    fn parse_import(&mut self) -> Result<ImportStmt, ParseError> {
        let line = self.cursor.expect(&Token::Import, "`import`")?;

        let mut names = Vec::new();
        if !matches!(self.cursor.peek(), Some(Token::Str(_))) {
            loop {
                names.push(self.parse_qualname()?);
                if self.cursor.eat(&Token::From) {
                    break;
                }
            }
        }

        let filename = self.cursor.expect_string("a file name")?;
        Ok(ImportStmt {
            filename,
            names,
            line,
        })
    }

    fn at_decl_start(&self) -> bool {
        matches!(
            self.cursor.peek(),
            Some(Token::Public | Token::Namespace | Token::Type | Token::Let)
        )
    }

    fn parse_decls(&mut self) -> Result<Vec<Decl>, ParseError> {
        let mut decls = Vec::new();
        while self.at_decl_start() {
            decls.push(self.parse_decl()?);
        }
        Ok(decls)
    }

    /// `'public'? (namespace | type | binding)`
    fn parse_decl(&mut self) -> Result<Decl, ParseError> {
        let public = self.cursor.eat(&Token::Public);
        match self.cursor.peek() {
            Some(Token::Namespace) => self.parse_namespace(public).map(Decl::Namespace),
            Some(Token::Type) => self.parse_type(public).map(Decl::Type),
            Some(Token::Let) => self.parse_binding(public).map(Decl::Binding),
            _ => Err(self.cursor.error("`namespace`, `type` or `let`")),
        }
    }

    /// `'{' decl* '}'`
    fn parse_decl_body(&mut self) -> Result<Vec<Decl>, ParseError> {
        self.cursor.expect(&Token::LBrace, "`{`")?;
        let decls = self.parse_decls()?;
        self.cursor.expect(&Token::RBrace, "`}` or a declaration")?;
        Ok(decls)
    }

    /// `'namespace' qualname '{' decl* '}'`
    fn parse_namespace(&mut self, public: bool) -> Result<NamespaceDecl, ParseError> {
        self.cursor.expect(&Token::Namespace, "`namespace`")?;
        let name = self.parse_qualname()?;
        let decls = self.parse_decl_body()?;
        Ok(NamespaceDecl {
            name,
            public,
            decls,
        })
    }

    /// `'type' qualname '=' case ('|' case)* ('{' decl* '}')?`
    fn parse_type(&mut self, public: bool) -> Result<TypeDecl, ParseError> {
        self.cursor.expect(&Token::Type, "`type`")?;
        let name = self.parse_qualname()?;
        self.cursor.expect(&Token::Eq, "`=`")?;

        let mut cases = vec![self.parse_type_case()?];
        while self.cursor.eat(&Token::Pipe) {
            cases.push(self.parse_type_case()?);
        }

        let namespace = if self.cursor.check(&Token::LBrace) {
            Some(NamespaceDecl {
                name: name.clone(),
                public,
                decls: self.parse_decl_body()?,
            })
        } else {
            None
        };

        Ok(TypeDecl {
            name,
            public,
            cases,
            namespace,
        })
    }

    /// `IDENT IDENT*`
    fn parse_type_case(&mut self) -> Result<TypeCaseDecl, ParseError> {
        let (name, _) = self.cursor.expect_ident("a case name")?;
        let mut params = Vec::new();
        while let Some(Token::Ident(param)) = self.cursor.peek() {
            params.push(param.clone());
            self.cursor.advance();
        }
        Ok(TypeCaseDecl { name, params })
    }

    /// `'let' pattern '=' block`
    pub(super) fn parse_binding(&mut self, public: bool) -> Result<Binding, ParseError> {
        self.cursor.expect(&Token::Let, "`let`")?;
        let pattern = self.parse_pattern()?;
        self.cursor.expect(&Token::Eq, "`=`")?;
        let block = self.parse_block()?;
        Ok(Binding {
            pattern,
            block,
            public,
        })
    }
}
