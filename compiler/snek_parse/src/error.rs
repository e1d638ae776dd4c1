//! Parse errors.

use snek_ir::Line;
use thiserror::Error;

use crate::lexer::Token;

/// A scan or parse failure with the line it occurred on.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message} at line {line}")]
pub struct ParseError {
    pub message: String,
    pub line: Line,
}

impl ParseError {
    #[cold]
    pub fn new(message: impl Into<String>, line: Line) -> Self {
        ParseError {
            message: message.into(),
            line,
        }
    }

    #[cold]
    pub fn unexpected_character(text: &str, line: Line) -> Self {
        Self::new(format!("unexpected character `{text}`"), line)
    }

    #[cold]
    pub fn unexpected(expected: &str, found: &Token, line: Line) -> Self {
        Self::new(format!("expected {expected}, found {found}"), line)
    }

    #[cold]
    pub fn unexpected_eof(expected: &str, line: Line) -> Self {
        Self::new(format!("expected {expected}, found end of input"), line)
    }
}
