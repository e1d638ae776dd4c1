//! `match` lowering.
//!
//! ```text
//!     <scrutinee>
//!     Duplicate; JumpIfMatch p1 L1
//!     Duplicate; JumpIfMatch p2 L2
//!     Fail "no match"
//! L1: <save p1> <body1> Jump End
//! L2: <save p2> <body2> Jump End
//! End: NoOp
//! ```

use std::sync::Arc;

use snek_ir::{CallExpr, Expr, LambdaExpr, Pattern};

use super::patterns::match_test;
use super::CodeGen;
use crate::{CodeBuilder, CompileError, OpCode};

impl CodeGen<'_> {
    pub(super) fn match_expr(
        &self,
        call: &CallExpr,
        allow_tail: bool,
        code: &mut CodeBuilder,
    ) -> Result<(), CompileError> {
        let line = call.line;
        let [scrutinee, cases] = call.args.as_slice() else {
            return Err(CompileError::MatchArgCount { line });
        };
        let Expr::List(cases) = cases else {
            return Err(CompileError::MatchCasesNotList { line: cases.line() });
        };

        let mut arms: Vec<(&LambdaExpr, &Pattern)> = Vec::with_capacity(cases.elements.len());
        for case in &cases.elements {
            let Expr::Lambda(lambda) = &case.expr else {
                return Err(CompileError::MatchCaseNotLambda {
                    line: case.expr.line(),
                });
            };
            if !case.bindings.is_empty() {
                return Err(CompileError::MatchCaseNotLambda { line: lambda.line });
            }
            let [param] = lambda.params.as_slice() else {
                return Err(CompileError::MatchCaseArity { line: lambda.line });
            };
            arms.push((lambda, param));
        }

        self.expr(scrutinee, false, code)?;

        let end = code.fresh_label(line);
        let labels: Vec<_> = arms
            .iter()
            .map(|(lambda, _)| code.fresh_label(lambda.line))
            .collect();

        for ((lambda, param), label) in arms.iter().zip(&labels) {
            code.emit(lambda.line, OpCode::Duplicate);
            code.emit(lambda.line, OpCode::JumpIfMatch(match_test(param), *label));
        }
        code.emit(line, OpCode::Fail(Arc::from("no match")));

        for ((lambda, param), label) in arms.iter().zip(&labels) {
            code.attach(*label, lambda.line)?;
            self.save_pattern(param, None, lambda.line, code)?;
            self.block(&lambda.block, allow_tail, code)?;
            code.emit(lambda.line, OpCode::Jump(end));
        }

        code.attach(end, line)?;
        code.emit(line, OpCode::NoOp);
        Ok(())
    }
}
