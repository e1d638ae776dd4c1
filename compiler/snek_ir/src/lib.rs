//! Snek IR - the syntax tree and declaration identities shared by every stage.
//!
//! The parser produces a [`Program`]; the resolver attaches [`Declaration`]s to
//! name patterns and single-segment names; the code generator embeds those
//! declarations in instructions and the VM keys its scopes by [`DeclId`].
//!
//! Nothing in this crate evaluates anything. It is the contract between the
//! front end (`snek_parse`) and the back end (`snek_compile`, `snek_vm`).

mod ast;
mod decl;
mod node_id;

pub use ast::{
    Binding, Block, CallExpr, ConstKind, ConstLiteral, Decl, Expr, ImportStmt, LambdaExpr, Line,
    ListExpr, NamePattern, NamespaceDecl, Pattern, Program, QualifiedName, TypeCaseDecl, TypeDecl,
};
pub use decl::{DeclId, Declaration};
pub use node_id::{NodeId, NodeIdGen};

/// Name of the cons case of the built-in list type.
pub const LIST_CONS: &str = "::";
/// Name of the empty case of the built-in list type.
pub const LIST_EMPTY: &str = "Empty";
/// Name of the single case of the built-in unit type.
pub const UNIT: &str = "Unit";
/// The callable name intercepted by the compiler for pattern matching.
pub const MATCH: &str = "match";
