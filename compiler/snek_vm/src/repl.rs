//! Line-at-a-time evaluation against one persistent top-level frame.
//!
//! Each line is compiled as its own program with root bindings published
//! into the root namespace, which is how later lines see earlier ones: the
//! resolver never sees across lines, so those names resolve dynamically.

use std::sync::Arc;

use snek_compile::{compile_with, CompileOptions, CompiledCode};

use crate::interpreter::CallFrame;
use crate::runtime::SharedRuntime;
use crate::{Interpreter, InterpreterBuilder, SnekError, Value};

pub struct ReplSession {
    interpreter: Interpreter,
    top: CallFrame,
}

impl ReplSession {
    pub fn new(runtime: SharedRuntime) -> Result<Self, SnekError> {
        let interpreter = InterpreterBuilder::new(runtime)
            .module_name("repl")
            .build()?;
        let empty = Arc::new(CompiledCode::default());
        let top = CallFrame::top_level(interpreter.main_function(&empty));
        Ok(ReplSession { interpreter, top })
    }

    /// Evaluate one line. Returns its value unless the line produced
    /// nothing or `Unit`.
    ///
    /// A runtime error is reported to the error stream before it is
    /// returned; the stacks are reset either way and the session stays
    /// usable with all bindings published so far.
    pub fn eval_line(&mut self, line: &str) -> Result<Option<Value>, SnekError> {
        let program = snek_parse::parse(line)?;
        let code = compile_with(
            &program,
            CompileOptions {
                publish_root_bindings: true,
            },
        )?;

        match self.interpreter.run_in(&self.top, &code) {
            Ok(value) => {
                Ok(value.filter(|v| !self.interpreter.builtins().is_unit(v)))
            }
            Err(err) => {
                self.interpreter.io().err(&err.report());
                tracing::debug!(error = %err, "repl reset after runtime error");
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io_handler::buffer_handler;
    use crate::{Runtime, RuntimeConfig};
    use pretty_assertions::assert_eq;

    fn session() -> (ReplSession, crate::SharedIoHandler) {
        let io = buffer_handler();
        let runtime = Runtime::new(RuntimeConfig::default().with_io(io.clone()));
        (ReplSession::new(runtime).unwrap(), io)
    }

    #[test]
    fn later_lines_see_earlier_bindings() {
        let (mut repl, _) = session();
        assert_eq!(repl.eval_line("let x = 20").unwrap(), None);
        let value = repl.eval_line("(+ x 22)").unwrap();
        assert_eq!(value, Some(Value::Number(42.0)));
    }

    #[test]
    fn unit_results_are_hidden() {
        let (mut repl, io) = session();
        assert_eq!(repl.eval_line("(println \"hi\")").unwrap(), None);
        assert_eq!(io.output(), "hi\n");
    }

    #[test]
    fn session_survives_runtime_error() {
        let (mut repl, io) = session();
        repl.eval_line("let f = { x -> (match x [ { 1 -> \"one\" } ]) }")
            .unwrap();

        let err = repl.eval_line("(f 2)").unwrap_err();
        assert!(matches!(err, SnekError::Runtime(_)));
        assert!(io.errors().starts_with("Fail: no match\n    in <function repl:1>"));

        let value = repl.eval_line("(f 1)").unwrap();
        assert_eq!(value, Some(Value::string("one")));
    }

    #[test]
    fn syntax_error_is_returned_not_reported() {
        let (mut repl, io) = session();
        let err = repl.eval_line("let = 1").unwrap_err();
        assert!(matches!(err, SnekError::Parse(_)));
        assert_eq!(io.errors(), "");
    }
}
