//! Runtime errors.
//!
//! Every runtime error is fatal to the current execution unit (one script
//! run or one REPL line). [`RuntimeErrorKind`] is the typed category; the
//! [`RuntimeError`] wrapper adds the frame list captured where it was raised.

use std::fmt::{self, Write};

use snek_compile::CompileError;
use snek_ir::Line;
use snek_parse::ParseError;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum RuntimeErrorKind {
    // Lookup
    #[error("Name '{name}' not found")]
    NameNotFound { name: String },

    #[error("Type '{name}' not found")]
    TypeNotFound { name: String },

    #[error("Namespace '{path}' not found")]
    NamespaceNotFound { path: String },

    #[error("Access of name '{name}' before assignment")]
    UseBeforeAssignment { name: String },

    // Namespaces
    #[error("Cannot add public namespace as child of private namespace ({path})")]
    PublicUnderPrivate { path: String },

    // Patterns
    #[error("Cannot decompose {type_name} into {parts} parts")]
    DecomposeArity { type_name: String, parts: usize },

    #[error("Expected a {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Failed match")]
    FailedMatch,

    #[error("Fail: {message}")]
    Fail { message: String },

    // Calls
    #[error("{value} is not a function")]
    NotCallable { value: String },

    #[error("Too many arguments given for function {function}")]
    TooManyArguments { function: String },

    #[error("Cannot create partial tail-call")]
    PartialTailCall,

    #[error("Maximum call depth of {limit} exceeded")]
    CallDepthExceeded { limit: usize },

    // Modules
    #[error("Cannot import private name '{name}'")]
    PrivateImport { name: String },

    #[error("Module has no public name '{name}'")]
    ImportNotFound { name: String },

    #[error("Cannot read module '{filename}': {message}")]
    ModuleRead { filename: String, message: String },

    #[error("Syntax error in module '{filename}': {source}")]
    ModuleParse {
        filename: String,
        source: ParseError,
    },

    #[error("Compile error in module '{filename}': {source}")]
    ModuleCompile {
        filename: String,
        source: CompileError,
    },

    #[error("Error while loading module '{filename}': {message}")]
    ModuleRun { filename: String, message: String },

    // Builtins
    #[error("{function} expects {expected}, got {got}")]
    BuiltinArgument {
        function: String,
        expected: String,
        got: String,
    },

    #[error("Cannot convert '{text}' to a number")]
    NumberConversion { text: String },

    #[error("{message}")]
    UserError { message: String },

    // Machine invariants
    #[error("Operand stack underflow")]
    StackUnderflow,

    #[error("Jump to unattached label {label}")]
    UnattachedLabel { label: String },
}

/// One line of a runtime backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceFrame {
    /// `<module NAME>` or `<function NAME:LINE>`.
    pub name: String,
    /// Last line executed in that frame.
    pub line: Line,
}

/// A runtime error plus the live frames, innermost first.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{kind}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub backtrace: Vec<TraceFrame>,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind) -> Self {
        RuntimeError {
            kind,
            backtrace: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: Vec<TraceFrame>) -> Self {
        self.backtrace = backtrace;
        self
    }

    /// The message, then one line per frame:
    ///
    /// ```text
    /// Failed match
    ///     in <function main:3> at line 3
    ///   from <module main> at line 5
    /// ```
    pub fn report(&self) -> String {
        let mut out = self.kind.to_string();
        for (i, frame) in self.backtrace.iter().enumerate() {
            let lead = if i == 0 { "  in" } else { "from" };
            // Writing to a String cannot fail.
            let _ = write!(out, "\n  {lead} {} at line {}", frame.name, frame.line);
        }
        out
    }
}

impl From<RuntimeErrorKind> for RuntimeError {
    fn from(kind: RuntimeErrorKind) -> Self {
        RuntimeError::new(kind)
    }
}

/// Anything that can stop a program or REPL line: it failed to parse,
/// failed to compile, or raised a runtime error.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SnekError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Compile(#[from] CompileError),

    #[error("{0}")]
    Runtime(#[from] RuntimeError),
}

impl From<RuntimeErrorKind> for SnekError {
    fn from(kind: RuntimeErrorKind) -> Self {
        SnekError::Runtime(RuntimeError::new(kind))
    }
}

impl fmt::Display for TraceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}", self.name, self.line)
    }
}

// Factories

#[cold]
pub fn stack_underflow() -> RuntimeErrorKind {
    RuntimeErrorKind::StackUnderflow
}

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> RuntimeErrorKind {
    RuntimeErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    }
}

#[cold]
pub fn decompose_arity(type_name: &str, parts: usize) -> RuntimeErrorKind {
    RuntimeErrorKind::DecomposeArity {
        type_name: type_name.to_string(),
        parts,
    }
}

#[cold]
pub fn builtin_argument(function: &str, expected: &str, got: &str) -> RuntimeErrorKind {
    RuntimeErrorKind::BuiltinArgument {
        function: function.to_string(),
        expected: expected.to_string(),
        got: got.to_string(),
    }
}

#[cold]
pub fn module_run(filename: &str, error: &RuntimeError) -> RuntimeErrorKind {
    RuntimeErrorKind::ModuleRun {
        filename: filename.to_string(),
        message: error.report(),
    }
}
