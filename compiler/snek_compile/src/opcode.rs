//! The instruction set.
//!
//! Paths (`Vec<String>`) are namespace-qualified names looked up at run time
//! from the root namespace of the module that owns the executing function.

use std::fmt;
use std::sync::Arc;

use snek_ir::Declaration;

use crate::CompiledCode;

/// Jump target. Indexes the label table of the [`CompiledCode`] that created
/// it; meaningless in any other unit.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Label(u32);

impl Label {
    #[inline]
    pub(crate) const fn new(raw: u32) -> Self {
        Label(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// A refutable test against a value, produced from a pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchPattern {
    /// Names and wildcards.
    Always,
    Number(f64),
    String(Arc<str>),
    /// The `Empty` case of the built-in list.
    EmptyList,
    /// The `Unit` case.
    Unit,
    /// The value belongs to the type at `path`; for a case, each field also
    /// satisfies the corresponding inner pattern.
    Type {
        path: Vec<String>,
        inners: Vec<MatchPattern>,
    },
}

impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPattern::Always => f.write_str("_"),
            MatchPattern::Number(n) => write!(f, "{n}"),
            MatchPattern::String(s) => write!(f, "{s:?}"),
            MatchPattern::EmptyList => f.write_str("[]"),
            MatchPattern::Unit => f.write_str("()"),
            MatchPattern::Type { path, inners } => {
                write!(f, "({}", path.join("."))?;
                for inner in inners {
                    write!(f, " {inner}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// One case of a `MakeType`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseSpec {
    pub name: String,
    pub arity: usize,
}

#[derive(Clone, Debug)]
pub enum OpCode {
    NoOp,
    /// Abort with the message.
    Fail(Arc<str>),
    Pop,
    Duplicate,
    /// Check the top value against the type at `path`. Atomic and parent
    /// types leave it in place (arity must be 1); a case pops it and pushes
    /// its fields last-first.
    Decompose { path: Vec<String>, arity: usize },
    Jump(Label),
    /// Pop and require a match.
    Match(MatchPattern),
    /// Pop; jump if the value matches.
    JumpIfMatch(MatchPattern, Label),
    LoadLocal(Declaration),
    LoadName(Vec<String>),
    LoadNumber(f64),
    LoadString(Arc<str>),
    /// Close over the current scope.
    LoadFunction { code: Arc<CompiledCode>, arity: usize },
    SaveLocal(Declaration),
    /// Pop into the binding `name` of the namespace at `path`.
    SaveNamespace { name: String, path: Vec<String> },
    Call(usize),
    /// Restart the running function with `argc` fresh arguments.
    TailCall(usize),
    MakeNamespace { path: Vec<String>, public: bool },
    MakeType {
        name: String,
        path: Vec<String>,
        cases: Vec<CaseSpec>,
    },
    ImportAll(String),
    ImportSelected { filename: String, path: Vec<String> },
}

fn path_str(path: &[String]) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.join(".")
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpCode::NoOp => f.write_str("NoOp"),
            OpCode::Fail(msg) => write!(f, "Fail {msg:?}"),
            OpCode::Pop => f.write_str("Pop"),
            OpCode::Duplicate => f.write_str("Duplicate"),
            OpCode::Decompose { path, arity } => write!(f, "Decompose {} {arity}", path.join(".")),
            OpCode::Jump(label) => write!(f, "Jump {label}"),
            OpCode::Match(pattern) => write!(f, "Match {pattern}"),
            OpCode::JumpIfMatch(pattern, label) => write!(f, "JumpIfMatch {pattern} {label}"),
            OpCode::LoadLocal(decl) => write!(f, "LoadLocal {decl}"),
            OpCode::LoadName(path) => write!(f, "LoadName {}", path.join(".")),
            OpCode::LoadNumber(n) => write!(f, "LoadNumber {n}"),
            OpCode::LoadString(s) => write!(f, "LoadString {s:?}"),
            OpCode::LoadFunction { arity, .. } => write!(f, "LoadFunction/{arity}"),
            OpCode::SaveLocal(decl) => write!(f, "SaveLocal {decl}"),
            OpCode::SaveNamespace { name, path } => {
                write!(f, "SaveNamespace {name} in {}", path_str(path))
            }
            OpCode::Call(argc) => write!(f, "Call {argc}"),
            OpCode::TailCall(argc) => write!(f, "TailCall {argc}"),
            OpCode::MakeNamespace { path, public } => {
                let vis = if *public { "public" } else { "private" };
                write!(f, "MakeNamespace {} {vis}", path_str(path))
            }
            OpCode::MakeType { name, path, cases } => {
                write!(f, "MakeType {name} in {} [", path_str(path))?;
                for (i, case) in cases.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{}/{}", case.name, case.arity)?;
                }
                f.write_str("]")
            }
            OpCode::ImportAll(filename) => write!(f, "ImportAll {filename:?}"),
            OpCode::ImportSelected { filename, path } => {
                write!(f, "ImportSelected {} from {filename:?}", path.join("."))
            }
        }
    }
}
