//! Pattern lowering.
//!
//! Two distinct translations of the same syntax:
//!
//! - [`CodeGen::save_pattern`] destructures the value on top of the stack
//!   into declarations, failing hard on a mismatch (bindings, parameters,
//!   and the body side of a `match` case);
//! - [`match_test`] builds the refutable [`MatchPattern`] a `JumpIfMatch`
//!   evaluates before anything is bound.

use std::sync::Arc;

use snek_ir::{ConstKind, ConstLiteral, Line, Pattern, LIST_CONS, LIST_EMPTY};

use super::CodeGen;
use crate::{CodeBuilder, CompileError, MatchPattern, OpCode};

impl CodeGen<'_> {
    /// Consume the top of the stack into `pattern`.
    ///
    /// With `publish`, every name leaf is also written to the namespace at
    /// that path.
    pub(super) fn save_pattern(
        &self,
        pattern: &Pattern,
        publish: Option<&[String]>,
        line: Line,
        code: &mut CodeBuilder,
    ) -> Result<(), CompileError> {
        snek_stack::ensure_sufficient_stack(|| match pattern {
            Pattern::Wildcard => {
                code.emit(line, OpCode::Pop);
                Ok(())
            }
            Pattern::Name(leaf) => {
                let decl = self.declaration(leaf)?;
                if let Some(path) = publish {
                    code.emit(leaf.line, OpCode::Duplicate);
                    code.emit(
                        leaf.line,
                        OpCode::SaveNamespace {
                            name: leaf.name.clone(),
                            path: path.to_vec(),
                        },
                    );
                }
                code.emit(leaf.line, OpCode::SaveLocal(decl));
                Ok(())
            }
            Pattern::Const(c) => {
                code.emit(c.line, OpCode::Match(const_test(c)));
                Ok(())
            }
            Pattern::List(inners) => {
                for inner in inners {
                    code.emit(
                        line,
                        OpCode::Decompose {
                            path: vec![LIST_CONS.to_string()],
                            arity: 2,
                        },
                    );
                    self.save_pattern(inner, publish, line, code)?;
                }
                code.emit(
                    line,
                    OpCode::Decompose {
                        path: vec![LIST_EMPTY.to_string()],
                        arity: 0,
                    },
                );
                Ok(())
            }
            Pattern::Type { name, params } => {
                code.emit(
                    name.line,
                    OpCode::Decompose {
                        path: name.parts.clone(),
                        arity: params.len(),
                    },
                );
                for param in params {
                    self.save_pattern(param, publish, name.line, code)?;
                }
                Ok(())
            }
        })
    }
}

fn const_test(c: &ConstLiteral) -> MatchPattern {
    match &c.kind {
        ConstKind::Number(n) => MatchPattern::Number(*n),
        ConstKind::String(s) => MatchPattern::String(Arc::from(s.as_str())),
        ConstKind::Unit => MatchPattern::Unit,
        ConstKind::EmptyList => MatchPattern::EmptyList,
    }
}

/// The refutable test for `pattern`. Lists become nested `::` tests ending in
/// `Empty`.
pub(super) fn match_test(pattern: &Pattern) -> MatchPattern {
    snek_stack::ensure_sufficient_stack(|| match pattern {
        Pattern::Wildcard | Pattern::Name(_) => MatchPattern::Always,
        Pattern::Const(c) => const_test(c),
        Pattern::List(inners) => {
            inners
                .iter()
                .rev()
                .fold(MatchPattern::EmptyList, |rest, inner| MatchPattern::Type {
                    path: vec![LIST_CONS.to_string()],
                    inners: vec![match_test(inner), rest],
                })
        }
        Pattern::Type { name, params } => MatchPattern::Type {
            path: name.parts.clone(),
            inners: params.iter().map(match_test).collect(),
        },
    })
}
