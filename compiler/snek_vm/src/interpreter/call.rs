//! Calling convention.
//!
//! Arguments are on the operand stack with the first argument on top.
//! A call with exactly the callee's arity invokes it; fewer wraps the
//! callee and the popped arguments in a partial application; more is an
//! error.

use std::cmp::Ordering;
use std::rc::Rc;

use super::{CallFrame, Interpreter};
use crate::scope::Scope;
use crate::value::{CaseObject, CompiledFunction, Fields, PartialFunction};
use crate::{RuntimeErrorKind, Value};

impl Interpreter {
    /// Pop the callee, then apply it to the top `argc` values.
    pub(super) fn call(&mut self, argc: usize) -> Result<(), RuntimeErrorKind> {
        let callee = self.pop()?;
        let arity = callee.arity().ok_or_else(|| RuntimeErrorKind::NotCallable {
            value: callee.to_string(),
        })?;

        match argc.cmp(&arity) {
            Ordering::Equal => self.invoke(callee),
            Ordering::Less => {
                let args = self.pop_n(argc)?;
                self.push(Value::Partial(Rc::new(PartialFunction {
                    function: callee,
                    args,
                })));
                Ok(())
            }
            Ordering::Greater => Err(RuntimeErrorKind::TooManyArguments {
                function: callee.to_string(),
            }),
        }
    }

    /// Run a saturated call. All arguments are already on the stack.
    fn invoke(&mut self, callee: Value) -> Result<(), RuntimeErrorKind> {
        match callee {
            Value::Function(function) => self.call_compiled(&function),
            Value::Partial(partial) => {
                // Stored arguments go on top so they are popped first.
                self.stack.extend(partial.args.iter().rev().cloned());
                self.invoke(partial.function.clone())
            }
            Value::Constructor(case) => {
                let fields: Fields = self.pop_n(case.arity)?.into_iter().collect();
                self.push(Value::Case(Rc::new(CaseObject { case, fields })));
                Ok(())
            }
            Value::Builtin(builtin) => {
                let args = self.pop_n(builtin.arity)?;
                let result = (builtin.func)(self, args)?;
                self.push(result);
                Ok(())
            }
            other => Err(RuntimeErrorKind::NotCallable {
                value: other.to_string(),
            }),
        }
    }

    /// Push a frame for `function` and run its body to completion. On
    /// error the frame stays so the backtrace can include it.
    fn call_compiled(&mut self, function: &Rc<CompiledFunction>) -> Result<(), RuntimeErrorKind> {
        if let Some(limit) = self.runtime.config().max_call_depth {
            if self.frames.len() >= limit {
                return Err(RuntimeErrorKind::CallDepthExceeded { limit });
            }
        }

        self.frames.push(CallFrame {
            function: Rc::clone(function),
            scope: Scope::child(&function.scope),
            line: function.line,
        });
        snek_stack::ensure_sufficient_stack(|| self.execute_code(&function.code))?;
        self.frames.pop();
        Ok(())
    }

    /// Rebind the current frame to a fresh scope for another run of the same
    /// function. The caller resets the instruction pointer.
    pub(super) fn tail_call(&mut self, argc: usize) -> Result<(), RuntimeErrorKind> {
        let frame = self.frame_mut()?;
        if frame.function.arity != argc {
            return Err(RuntimeErrorKind::PartialTailCall);
        }
        frame.scope = Scope::child(&frame.function.scope);
        Ok(())
    }
}
