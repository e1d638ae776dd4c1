//! The stack machine.
//!
//! One operand stack, one frame stack. A function's result is whatever it
//! leaves on the operand stack when its instructions run out; there is no
//! return instruction.
//!
//! Non-tail calls recurse natively through [`Interpreter::execute_code`]
//! (guarded by `ensure_sufficient_stack` and a frame limit). `TailCall`
//! restarts the running code in the same frame with a fresh scope, so
//! self-recursion in tail position runs in constant native stack.

mod builder;
mod call;
mod patterns;

use std::rc::Rc;
use std::sync::Arc;

use snek_compile::{CompiledCode, Label, OpCode};
use snek_ir::Line;

use crate::builtins::Builtins;
use crate::errors::stack_underflow;
use crate::io_handler::IoHandler;
use crate::namespace::{
    find_name, find_namespace, find_type, import_all, import_selected, make_namespace,
    SharedNamespace,
};
use crate::runtime::SharedRuntime;
use crate::scope::{self, Scope, SharedScope};
use crate::types::Type;
use crate::value::CompiledFunction;
use crate::{RuntimeError, RuntimeErrorKind, TraceFrame, Value};

pub use builder::InterpreterBuilder;

/// One activation.
#[derive(Clone)]
pub struct CallFrame {
    pub function: Rc<CompiledFunction>,
    /// Replaced on every tail call.
    pub scope: SharedScope,
    /// Last line executed.
    pub line: Line,
}

impl CallFrame {
    /// A frame for `function` with its own closure scope as the live scope.
    pub fn top_level(function: Rc<CompiledFunction>) -> Self {
        CallFrame {
            scope: function.scope.clone(),
            line: function.line,
            function,
        }
    }
}

pub struct Interpreter {
    runtime: SharedRuntime,
    module: Rc<str>,
    root: SharedNamespace,
    stack: Vec<Value>,
    frames: Vec<CallFrame>,
}

impl Interpreter {
    #[inline]
    pub fn builtins(&self) -> &Builtins {
        self.runtime.builtins()
    }

    #[inline]
    pub fn io(&self) -> &IoHandler {
        self.runtime.io()
    }

    /// This module's root namespace.
    pub fn root(&self) -> &SharedNamespace {
        &self.root
    }

    /// A zero-arity function with `code` as its body, closing over a fresh
    /// root scope and this module's namespace.
    pub fn main_function(&self, code: &Arc<CompiledCode>) -> Rc<CompiledFunction> {
        Rc::new(CompiledFunction {
            code: Arc::clone(code),
            scope: Scope::root(),
            namespace: self.root.clone(),
            arity: 0,
            module: Rc::clone(&self.module),
            line: 0,
        })
    }

    /// Run `code` as this module's body. Returns the value it leaves
    /// behind, if any.
    pub fn run_main(&mut self, code: &Arc<CompiledCode>) -> Result<Option<Value>, RuntimeError> {
        let frame = CallFrame::top_level(self.main_function(code));
        self.run_in(&frame, code)
    }

    /// [`Interpreter::run_main`], also writing any error report to the
    /// error stream.
    pub fn execute(&mut self, code: &Arc<CompiledCode>) -> Result<Option<Value>, RuntimeError> {
        self.run_main(code).inspect_err(|err| self.io().err(&err.report()))
    }

    /// Run `code` in `frame`. Both stacks start empty and are cleared again
    /// afterwards, whether or not the run succeeded; saves into the frame's
    /// scope and the namespace survive.
    pub fn run_in(
        &mut self,
        frame: &CallFrame,
        code: &CompiledCode,
    ) -> Result<Option<Value>, RuntimeError> {
        self.stack.clear();
        self.frames.clear();
        self.frames.push(frame.clone());

        let outcome = match self.execute_code(code) {
            Ok(()) => Ok(self.stack.pop()),
            Err(kind) => Err(RuntimeError::new(kind).with_backtrace(self.backtrace())),
        };

        self.stack.clear();
        self.frames.clear();
        outcome
    }

    /// The live frames, innermost first.
    fn backtrace(&self) -> Vec<TraceFrame> {
        self.frames
            .iter()
            .rev()
            .map(|frame| TraceFrame {
                name: frame.function.to_string(),
                line: frame.line,
            })
            .collect()
    }

    // Operand stack

    #[inline]
    fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    #[inline]
    fn pop(&mut self) -> Result<Value, RuntimeErrorKind> {
        self.stack.pop().ok_or_else(stack_underflow)
    }

    #[inline]
    fn peek(&self) -> Result<&Value, RuntimeErrorKind> {
        self.stack.last().ok_or_else(stack_underflow)
    }

    /// Pop `n` values pushed last-first, returning them in call order.
    fn pop_n(&mut self, n: usize) -> Result<Vec<Value>, RuntimeErrorKind> {
        let split = self.stack.len().checked_sub(n).ok_or_else(stack_underflow)?;
        let mut values = self.stack.split_off(split);
        values.reverse();
        Ok(values)
    }

    // Frames

    #[inline]
    fn frame(&self) -> Result<&CallFrame, RuntimeErrorKind> {
        self.frames.last().ok_or_else(stack_underflow)
    }

    #[inline]
    fn frame_mut(&mut self) -> Result<&mut CallFrame, RuntimeErrorKind> {
        self.frames.last_mut().ok_or_else(stack_underflow)
    }

    /// Namespace dynamic names resolve against: the executing function's.
    fn base_namespace(&self) -> Result<SharedNamespace, RuntimeErrorKind> {
        Ok(self.frame()?.function.namespace.clone())
    }

    fn lookup_type(&self, path: &[String]) -> Result<Type, RuntimeErrorKind> {
        find_type(&self.base_namespace()?, path)
    }

    // Dispatch

    fn jump_target(code: &CompiledCode, label: Label) -> Result<usize, RuntimeErrorKind> {
        code.target(label)
            .ok_or_else(|| RuntimeErrorKind::UnattachedLabel {
                label: label.to_string(),
            })
    }

    /// Run `code` in the current frame until it runs out.
    fn execute_code(&mut self, code: &CompiledCode) -> Result<(), RuntimeErrorKind> {
        let mut ip = 0;
        while let Some(instr) = code.get(ip) {
            self.frame_mut()?.line = instr.line;
            ip += 1;

            match &instr.op {
                OpCode::NoOp => {}
                OpCode::Fail(message) => {
                    return Err(RuntimeErrorKind::Fail {
                        message: message.to_string(),
                    })
                }
                OpCode::Pop => {
                    self.pop()?;
                }
                OpCode::Duplicate => {
                    let top = self.peek()?.clone();
                    self.push(top);
                }
                OpCode::Decompose { path, arity } => self.decompose(path, *arity)?,
                OpCode::Jump(label) => ip = Self::jump_target(code, *label)?,
                OpCode::Match(pattern) => {
                    let value = self.pop()?;
                    if !self.matches(pattern, &value)? {
                        return Err(RuntimeErrorKind::FailedMatch);
                    }
                }
                OpCode::JumpIfMatch(pattern, label) => {
                    let value = self.pop()?;
                    if self.matches(pattern, &value)? {
                        ip = Self::jump_target(code, *label)?;
                    }
                }
                OpCode::LoadLocal(decl) => {
                    let value = scope::lookup(&self.frame()?.scope, decl)?;
                    self.push(value);
                }
                OpCode::LoadName(path) => {
                    let value = find_name(&self.base_namespace()?, path)?;
                    self.push(value);
                }
                OpCode::LoadNumber(n) => self.push(Value::Number(*n)),
                OpCode::LoadString(s) => self.push(Value::string(s)),
                OpCode::LoadFunction { code, arity } => {
                    let frame = self.frame()?;
                    let function = CompiledFunction {
                        code: Arc::clone(code),
                        scope: frame.scope.clone(),
                        namespace: frame.function.namespace.clone(),
                        arity: *arity,
                        module: Rc::clone(&frame.function.module),
                        line: instr.line,
                    };
                    self.push(Value::Function(Rc::new(function)));
                }
                OpCode::SaveLocal(decl) => {
                    let value = self.pop()?;
                    self.frame()?.scope.borrow_mut().save(decl, value);
                }
                OpCode::SaveNamespace { name, path } => {
                    let value = self.pop()?;
                    let ns = find_namespace(&self.root, path)?;
                    ns.borrow_mut().bind(name.as_str(), value);
                }
                OpCode::Call(argc) => self.call(*argc)?,
                OpCode::TailCall(argc) => {
                    self.tail_call(*argc)?;
                    ip = 0;
                }
                OpCode::MakeNamespace { path, public } => {
                    make_namespace(&self.root, path, *public)?;
                }
                OpCode::MakeType { name, path, cases } => {
                    let ns = find_namespace(&self.root, path)?;
                    ns.borrow_mut().define_type(name, cases);
                    tracing::trace!(
                        module = %self.module,
                        ty = %name,
                        cases = cases.len(),
                        "type defined"
                    );
                }
                OpCode::ImportAll(filename) => {
                    let src = self.runtime.load(filename)?;
                    import_all(&src, &self.root);
                    tracing::debug!(module = %self.module, from = %filename, "imported all");
                }
                OpCode::ImportSelected { filename, path } => {
                    let src = self.runtime.load(filename)?;
                    import_selected(&src, &self.root, path)?;
                    tracing::debug!(
                        module = %self.module,
                        from = %filename,
                        name = %path.join("."),
                        "imported name"
                    );
                }
            }
        }
        Ok(())
    }
}
