//! Snek VM - the runtime value model, namespaces, module system and the
//! stack-machine interpreter.
//!
//! ```text
//! CompiledCode ──Interpreter──▶ root Namespace
//!                    │
//!                    └─ ImportAll / ImportSelected ──Runtime::load──▶ (parse, compile, run)
//! ```
//!
//! A [`Runtime`] holds configuration, the built-in types and the module
//! cache. Each module runs in its own [`Interpreter`] built from it.

mod builtins;
mod errors;
mod interpreter;
mod io_handler;
mod namespace;
mod repl;
mod runtime;
mod scope;
mod types;
mod value;

use std::sync::Arc;

pub use builtins::{Builtins, NATIVES};
pub use errors::{RuntimeError, RuntimeErrorKind, SnekError, TraceFrame};
pub use interpreter::{CallFrame, Interpreter, InterpreterBuilder};
pub use io_handler::{
    buffer_handler, buffer_handler_with_input, silent_handler, stdio_handler, BufferHandler,
    IoHandler, SharedIoHandler, StdioHandler,
};
pub use namespace::{
    find_name, find_namespace, find_type, import_all, import_selected, make_namespace,
    Namespace, SharedNamespace,
};
pub use repl::ReplSession;
pub use runtime::{Runtime, RuntimeConfig, SharedRuntime, DEFAULT_MAX_CALL_DEPTH, PRELUDE};
pub use scope::{LocalScope, Scope, SharedScope};
pub use types::{ParentType, Type, TypeCase};
pub use value::{
    BuiltinFunction, CaseObject, CompiledFunction, Fields, NativeFn, PartialFunction, Value,
};

/// Parse, compile and execute `source` as module `name`.
///
/// Runtime errors are also reported to the runtime's error stream.
pub fn run_source(
    runtime: &SharedRuntime,
    name: &str,
    source: &str,
) -> Result<Option<Value>, SnekError> {
    let program = snek_parse::parse(source)?;
    let code = snek_compile::compile(&program)?;
    let mut interpreter = InterpreterBuilder::new(runtime.clone())
        .module_name(name)
        .build()
        .map_err(|kind| {
            let err = RuntimeError::new(kind);
            runtime.io().err(&err.report());
            err
        })?;
    Ok(interpreter.execute(&Arc::new(code))?)
}
