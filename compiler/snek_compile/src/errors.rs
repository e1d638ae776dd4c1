//! Compile-time errors.
//!
//! Any of these aborts compilation of the whole unit; no partial code is
//! returned.

use snek_ir::Line;
use thiserror::Error;

use crate::Label;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompileError {
    /// `(. args)` somewhere other than the tail of a function body.
    #[error("Tail call not allowed here (line {line})")]
    IllegalTailCall { line: Line },

    /// `.` used as a value instead of as a callable.
    #[error("`.` can only be used as the callable of a tail call (line {line})")]
    SelfOutsideCall { line: Line },

    #[error("Incorrect number of args in match (line {line})")]
    MatchArgCount { line: Line },

    #[error("match requires a list as second argument (line {line})")]
    MatchCasesNotList { line: Line },

    #[error("every case in a match must be a lambda (line {line})")]
    MatchCaseNotLambda { line: Line },

    #[error("every case in a match must have exactly one parameter (line {line})")]
    MatchCaseArity { line: Line },

    #[error("label {label} attached twice (line {line})")]
    DuplicateLabel { label: Label, line: Line },

    #[error("label {label} was never attached (created at line {line})")]
    UnattachedLabel { label: Label, line: Line },

    /// A name pattern the resolver never saw. Indicates an AST built with
    /// reused node ids.
    #[error("no declaration for `{name}` (line {line})")]
    UnknownDeclaration { name: String, line: Line },
}

impl CompileError {
    pub fn line(&self) -> Line {
        match self {
            CompileError::IllegalTailCall { line }
            | CompileError::SelfOutsideCall { line }
            | CompileError::MatchArgCount { line }
            | CompileError::MatchCasesNotList { line }
            | CompileError::MatchCaseNotLambda { line }
            | CompileError::MatchCaseArity { line }
            | CompileError::DuplicateLabel { line, .. }
            | CompileError::UnattachedLabel { line, .. }
            | CompileError::UnknownDeclaration { line, .. } => *line,
        }
    }
}
