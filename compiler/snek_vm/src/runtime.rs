//! Configuration, built-ins and the module cache shared by every interpreter
//! of one program run.
//!
//! Each module runs in its own [`Interpreter`] and produces a root
//! [`Namespace`]. Results are cached by filename for the life of the
//! [`Runtime`], so a module imported twice runs once.

use std::cell::RefCell;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use snek_compile::compile;

use crate::builtins::Builtins;
use crate::errors::module_run;
use crate::io_handler::{stdio_handler, SharedIoHandler};
use crate::namespace::{import_all, Namespace, SharedNamespace};
use crate::{InterpreterBuilder, RuntimeErrorKind};

/// Module name under which the prelude is cached and importable.
pub const PRELUDE: &str = "prelude";

const PRELUDE_SOURCE: &str = include_str!("prelude.snek");

/// Default limit on live non-tail call frames.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 100_000;

#[derive(Clone)]
pub struct RuntimeConfig {
    /// Directory import paths are resolved against.
    pub app_root: PathBuf,
    /// Import the prelude into each new root namespace.
    pub load_prelude: bool,
    /// `None` for unlimited.
    pub max_call_depth: Option<usize>,
    pub io: SharedIoHandler,
}

impl RuntimeConfig {
    #[must_use]
    pub fn with_app_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.app_root = root.into();
        self
    }

    #[must_use]
    pub fn with_prelude(mut self, load: bool) -> Self {
        self.load_prelude = load;
        self
    }

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }

    #[must_use]
    pub fn with_io(mut self, io: SharedIoHandler) -> Self {
        self.io = io;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            app_root: PathBuf::from("."),
            load_prelude: true,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            io: stdio_handler(),
        }
    }
}

impl fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("app_root", &self.app_root)
            .field("load_prelude", &self.load_prelude)
            .field("max_call_depth", &self.max_call_depth)
            .finish_non_exhaustive()
    }
}

pub struct Runtime {
    config: RuntimeConfig,
    builtins: Builtins,
    modules: RefCell<FxHashMap<String, SharedNamespace>>,
}

pub type SharedRuntime = Rc<Runtime>;

impl Runtime {
    pub fn new(config: RuntimeConfig) -> SharedRuntime {
        Rc::new(Runtime {
            config,
            builtins: Builtins::new(),
            modules: RefCell::new(FxHashMap::default()),
        })
    }

    #[inline]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    #[inline]
    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    #[inline]
    pub fn io(&self) -> &SharedIoHandler {
        &self.config.io
    }

    /// A fresh root namespace: the built-ins, then the prelude if requested.
    pub fn root_namespace(
        self: &Rc<Self>,
        with_prelude: bool,
    ) -> Result<SharedNamespace, RuntimeErrorKind> {
        let ns = Namespace::new(true);
        self.builtins.seed(&ns);
        if with_prelude {
            let prelude = self.prelude()?;
            import_all(&prelude, &ns);
        }
        Ok(ns)
    }

    /// The prelude's namespace, compiled and run on first use.
    pub fn prelude(self: &Rc<Self>) -> Result<SharedNamespace, RuntimeErrorKind> {
        if let Some(ns) = self.cached(PRELUDE) {
            return Ok(ns);
        }
        let ns = self.run_module(PRELUDE, PRELUDE_SOURCE, false)?;
        self.modules.borrow_mut().insert(PRELUDE.to_string(), ns.clone());
        Ok(ns)
    }

    /// The namespace produced by running `filename`, relative to the
    /// configured application root.
    pub fn load(self: &Rc<Self>, filename: &str) -> Result<SharedNamespace, RuntimeErrorKind> {
        if filename == PRELUDE {
            return self.prelude();
        }
        if let Some(ns) = self.cached(filename) {
            tracing::trace!(module = filename, "module cache hit");
            return Ok(ns);
        }

        let path = self.config.app_root.join(filename);
        let source = std::fs::read_to_string(&path).map_err(|e| RuntimeErrorKind::ModuleRead {
            filename: filename.to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(module = filename, path = %path.display(), "loading module");

        let ns = self.run_module(filename, &source, self.config.load_prelude)?;
        self.modules.borrow_mut().insert(filename.to_string(), ns.clone());
        Ok(ns)
    }

    /// Run `source` as module `name` and cache it, replacing any previous
    /// entry. Lets embedders and tests provide modules without files.
    pub fn load_source(
        self: &Rc<Self>,
        name: &str,
        source: &str,
    ) -> Result<SharedNamespace, RuntimeErrorKind> {
        let ns = self.run_module(name, source, self.config.load_prelude)?;
        self.modules.borrow_mut().insert(name.to_string(), ns.clone());
        Ok(ns)
    }

    fn cached(&self, name: &str) -> Option<SharedNamespace> {
        self.modules.borrow().get(name).cloned()
    }

    fn run_module(
        self: &Rc<Self>,
        name: &str,
        source: &str,
        with_prelude: bool,
    ) -> Result<SharedNamespace, RuntimeErrorKind> {
        let program = snek_parse::parse(source).map_err(|err| RuntimeErrorKind::ModuleParse {
            filename: name.to_string(),
            source: err,
        })?;
        let code = compile(&program).map_err(|err| RuntimeErrorKind::ModuleCompile {
            filename: name.to_string(),
            source: err,
        })?;

        let mut interpreter = InterpreterBuilder::new(Rc::clone(self))
            .module_name(name)
            .load_prelude(with_prelude)
            .build()?;
        interpreter
            .run_main(&Arc::new(code))
            .map_err(|e| module_run(name, &e))?;
        tracing::debug!(module = name, "module ready");
        Ok(interpreter.root().clone())
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut modules: Vec<String> = self.modules.borrow().keys().cloned().collect();
        modules.sort();
        f.debug_struct("Runtime")
            .field("config", &self.config)
            .field("modules", &modules)
            .finish_non_exhaustive()
    }
}
