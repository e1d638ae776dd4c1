//! `InterpreterBuilder` for creating interpreters over a shared runtime.

use std::rc::Rc;

use super::Interpreter;
use crate::runtime::SharedRuntime;
use crate::RuntimeErrorKind;

/// Builder for [`Interpreter`] instances.
///
/// Every module of a program gets its own interpreter and root namespace,
/// all sharing one [`Runtime`](crate::Runtime).
pub struct InterpreterBuilder {
    runtime: SharedRuntime,
    module_name: String,
    load_prelude: Option<bool>,
}

impl InterpreterBuilder {
    pub fn new(runtime: SharedRuntime) -> Self {
        InterpreterBuilder {
            runtime,
            module_name: "main".to_string(),
            load_prelude: None,
        }
    }

    /// Name shown for this module's functions in backtraces.
    #[must_use]
    pub fn module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = name.into();
        self
    }

    /// Override the runtime's prelude setting for this interpreter.
    #[must_use]
    pub fn load_prelude(mut self, load: bool) -> Self {
        self.load_prelude = Some(load);
        self
    }

    /// Fails only if the prelude cannot be loaded.
    pub fn build(self) -> Result<Interpreter, RuntimeErrorKind> {
        let with_prelude = self
            .load_prelude
            .unwrap_or(self.runtime.config().load_prelude);
        let root = self.runtime.root_namespace(with_prelude)?;
        Ok(Interpreter {
            runtime: self.runtime,
            module: Rc::from(self.module_name),
            root,
            stack: Vec::new(),
            frames: Vec::new(),
        })
    }
}
