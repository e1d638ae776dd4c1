//! Blocks and expressions.

use std::sync::Arc;

use snek_ir::{
    Block, CallExpr, ConstKind, ConstLiteral, Declaration, Expr, LambdaExpr, ListExpr, LIST_CONS,
    LIST_EMPTY, UNIT,
};

use super::CodeGen;
use crate::{CodeBuilder, CompileError, OpCode};

/// Evaluating the element can neither fail nor run user code, so its
/// position in the emitted sequence is unobservable. Name loads can fail
/// (unknown name, read before assignment) and are excluded.
fn is_pure(block: &Block) -> bool {
    block.bindings.is_empty()
        && match &block.expr {
            Expr::Const(_) | Expr::Lambda(_) => true,
            Expr::List(list) => list.elements.iter().all(is_pure),
            Expr::Name(_) | Expr::Call(_) | Expr::SelfRef { .. } => false,
        }
}

impl CodeGen<'_> {
    /// Local bindings in order, then the trailing expression. Only the
    /// trailing expression inherits `allow_tail`.
    pub(super) fn block(
        &self,
        block: &Block,
        allow_tail: bool,
        code: &mut CodeBuilder,
    ) -> Result<(), CompileError> {
        for binding in &block.bindings {
            self.block(&binding.block, false, code)?;
            self.save_pattern(&binding.pattern, None, binding.block.expr.line(), code)?;
        }
        self.expr(&block.expr, allow_tail, code)
    }

    pub(super) fn expr(
        &self,
        expr: &Expr,
        allow_tail: bool,
        code: &mut CodeBuilder,
    ) -> Result<(), CompileError> {
        snek_stack::ensure_sufficient_stack(|| match expr {
            Expr::Call(call) => self.call(call, allow_tail, code),
            Expr::Lambda(lambda) => self.lambda(lambda, code),
            Expr::List(list) => self.list(list, code),
            Expr::Const(c) => {
                Self::constant(c, code);
                Ok(())
            }
            Expr::Name(name) => {
                let op = match self.resolution.get(name.id) {
                    Some(decl) => OpCode::LoadLocal(decl.clone()),
                    None => OpCode::LoadName(name.parts.clone()),
                };
                code.emit(name.line, op);
                Ok(())
            }
            Expr::SelfRef { line } => Err(CompileError::SelfOutsideCall { line: *line }),
        })
    }

    fn constant(c: &ConstLiteral, code: &mut CodeBuilder) {
        let op = match &c.kind {
            ConstKind::Number(n) => OpCode::LoadNumber(*n),
            ConstKind::String(s) => OpCode::LoadString(Arc::from(s.as_str())),
            ConstKind::Unit => OpCode::LoadName(vec![UNIT.to_string()]),
            ConstKind::EmptyList => OpCode::LoadName(vec![LIST_EMPTY.to_string()]),
        };
        code.emit(c.line, op);
    }

    /// Arguments are pushed last-first so the callee pops them in order.
    pub(super) fn call(
        &self,
        call: &CallExpr,
        allow_tail: bool,
        code: &mut CodeBuilder,
    ) -> Result<(), CompileError> {
        if call.is_match() {
            return self.match_expr(call, allow_tail, code);
        }

        for arg in call.args.iter().rev() {
            self.expr(arg, false, code)?;
        }

        let argc = call.args.len();
        if let Expr::SelfRef { .. } = &*call.callable {
            if !allow_tail {
                return Err(CompileError::IllegalTailCall { line: call.line });
            }
            code.emit(call.line, OpCode::TailCall(argc));
        } else {
            self.expr(&call.callable, false, code)?;
            code.emit(call.line, OpCode::Call(argc));
        }
        Ok(())
    }

    /// Parameters are saved in order from the stack, then the body runs in
    /// tail context.
    fn lambda(&self, lambda: &LambdaExpr, code: &mut CodeBuilder) -> Result<(), CompileError> {
        let mut body = CodeBuilder::new();
        for param in &lambda.params {
            self.save_pattern(param, None, lambda.line, &mut body)?;
        }
        self.block(&lambda.block, true, &mut body)?;

        code.emit(
            lambda.line,
            OpCode::LoadFunction {
                code: Arc::new(body.finish()?),
                arity: lambda.params.len(),
            },
        );
        Ok(())
    }

    /// A right fold of `::` ending in `Empty`. Elements with side effects are
    /// first evaluated left to right into hidden slots so the output order
    /// matches the source order.
    fn list(&self, list: &ListExpr, code: &mut CodeBuilder) -> Result<(), CompileError> {
        let line = list.line;
        let cons = || OpCode::LoadName(vec![LIST_CONS.to_string()]);

        if list.elements.iter().all(is_pure) {
            code.emit(line, OpCode::LoadName(vec![LIST_EMPTY.to_string()]));
            for element in list.elements.iter().rev() {
                self.block(element, false, code)?;
                code.emit(line, cons());
                code.emit(line, OpCode::Call(2));
            }
            return Ok(());
        }

        let mut slots = Vec::with_capacity(list.elements.len());
        for element in &list.elements {
            self.block(element, false, code)?;
            let slot = Declaration::new("<item>", element.expr.line());
            code.emit(line, OpCode::SaveLocal(slot.clone()));
            slots.push(slot);
        }

        code.emit(line, OpCode::LoadName(vec![LIST_EMPTY.to_string()]));
        for slot in slots.into_iter().rev() {
            code.emit(line, OpCode::LoadLocal(slot));
            code.emit(line, cons());
            code.emit(line, OpCode::Call(2));
        }
        Ok(())
    }
}
