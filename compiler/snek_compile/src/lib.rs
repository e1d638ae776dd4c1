//! Snek compiler back end: name resolution and bytecode generation.
//!
//! ```text
//! Program ──Resolver──▶ Resolution ──CodeGen──▶ CompiledCode
//! ```
//!
//! The [`Resolver`] links name patterns and single-segment names to
//! [`snek_ir::Declaration`]s. [`compile`] lowers the program into a flat
//! instruction vector per function with label-based jumps.

mod code;
mod codegen;
mod errors;
mod opcode;
mod resolver;

pub use code::{CodeBuilder, CompiledCode, Instr};
pub use codegen::{compile, compile_with, CompileOptions};
pub use errors::CompileError;
pub use opcode::{CaseSpec, Label, MatchPattern, OpCode};
pub use resolver::{Resolution, Resolver};
