//! Token definitions and the scanner.
//!
//! Operators are not special: `+`, `::` and `==` all lex as identifiers, which
//! is why the identifier class is "anything that is not whitespace or one of
//! the structural characters".

use std::fmt;

use logos::Logos;
use snek_ir::Line;

use crate::ParseError;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"([ \t\r\n\f]+|#[^\n]*)")]
pub enum Token {
    // Keywords
    #[token("import")]
    Import,
    #[token("from")]
    From,
    #[token("public")]
    Public,
    #[token("namespace")]
    Namespace,
    #[token("type")]
    Type,
    #[token("let")]
    Let,

    // Symbols. `=` and `->` are also valid identifier text, so they need
    // to outrank `Ident` on an exact match.
    #[token("=", priority = 10)]
    Eq,
    #[token("|")]
    Pipe,
    #[token(".")]
    Dot,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("()")]
    Unit,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[]")]
    EmptyList,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("->", priority = 10)]
    Arrow,

    // Literals
    #[regex(r"[0-9]+(\.[0-9]*)?", |lex| lex.slice().parse::<f64>().ok(), priority = 3)]
    Number(f64),

    #[regex(r#""[^"\n\r]*"|'[^'\n\r]*'"#, |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    Str(String),

    #[regex(r#"[^\s()\[\]{}.|"'#]+"#, |lex| lex.slice().to_string())]
    Ident(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Import => f.write_str("`import`"),
            Token::From => f.write_str("`from`"),
            Token::Public => f.write_str("`public`"),
            Token::Namespace => f.write_str("`namespace`"),
            Token::Type => f.write_str("`type`"),
            Token::Let => f.write_str("`let`"),
            Token::Eq => f.write_str("`=`"),
            Token::Pipe => f.write_str("`|`"),
            Token::Dot => f.write_str("`.`"),
            Token::LBrace => f.write_str("`{`"),
            Token::RBrace => f.write_str("`}`"),
            Token::Unit => f.write_str("`()`"),
            Token::LParen => f.write_str("`(`"),
            Token::RParen => f.write_str("`)`"),
            Token::EmptyList => f.write_str("`[]`"),
            Token::LBracket => f.write_str("`[`"),
            Token::RBracket => f.write_str("`]`"),
            Token::Arrow => f.write_str("`->`"),
            Token::Number(n) => write!(f, "number {n}"),
            Token::Str(s) => write!(f, "string \"{s}\""),
            Token::Ident(name) => write!(f, "identifier `{name}`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub line: Line,
}

/// Byte offsets of every line start, for offset → line conversion.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        LineIndex { starts }
    }

    fn line_of(&self, offset: usize) -> Line {
        let line = self.starts.partition_point(|&start| start <= offset);
        Line::try_from(line).unwrap_or(Line::MAX)
    }
}

/// Scan `source` into tokens, dropping whitespace and comments.
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, ParseError> {
    let lines = LineIndex::new(source);
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let line = lines.line_of(lexer.span().start);
        match result {
            Ok(token) => tokens.push(SpannedToken { token, line }),
            Err(()) => {
                return Err(ParseError::unexpected_character(lexer.slice(), line));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests;
