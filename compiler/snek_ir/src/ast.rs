//! Abstract syntax tree.
//!
//! A program is a root namespace of declarations plus an optional top-level
//! call. Bindings pair a pattern with a block; a block is a run of local
//! bindings followed by one trailing expression.
//!
//! Name patterns and qualified names carry a [`NodeId`] so the resolver can
//! link individual occurrences to declarations.

use std::fmt;

use crate::NodeId;

/// 1-based source line.
pub type Line = u32;

/// A parsed compilation unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub imports: Vec<ImportStmt>,
    pub root: NamespaceDecl,
    pub expr: Option<CallExpr>,
}

/// `import "file"` (everything public) or `import a b.c from "file"`.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportStmt {
    /// File path relative to the application root, quotes removed.
    pub filename: String,
    /// Empty for a whole-module import.
    pub names: Vec<QualifiedName>,
    pub line: Line,
}

impl ImportStmt {
    #[inline]
    pub fn is_import_all(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Decl {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
    Binding(Binding),
}

/// A namespace block. The root namespace has an empty name.
#[derive(Clone, Debug, PartialEq)]
pub struct NamespaceDecl {
    pub name: QualifiedName,
    pub public: bool,
    pub decls: Vec<Decl>,
}

/// `type Name = Case a b | Other { decls }`.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDecl {
    pub name: QualifiedName,
    pub public: bool,
    pub cases: Vec<TypeCaseDecl>,
    /// Declarations attached to the type, lowered as a namespace named after it.
    pub namespace: Option<NamespaceDecl>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeCaseDecl {
    pub name: String,
    pub params: Vec<String>,
}

impl TypeCaseDecl {
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub pattern: Pattern,
    pub block: Block,
    pub public: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub bindings: Vec<Binding>,
    pub expr: Expr,
}

impl Block {
    /// A block with no local bindings.
    pub fn expr(expr: Expr) -> Self {
        Block {
            bindings: Vec::new(),
            expr,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    Wildcard,
    Name(NamePattern),
    Const(ConstLiteral),
    List(Vec<Pattern>),
    /// A constructor applied to sub-patterns, `(Some x)`.
    Type {
        name: QualifiedName,
        params: Vec<Pattern>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamePattern {
    pub id: NodeId,
    pub name: String,
    pub line: Line,
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Wildcard => f.write_str("_"),
            Pattern::Name(name) => f.write_str(&name.name),
            Pattern::Const(c) => write!(f, "{c}"),
            Pattern::List(inners) => {
                f.write_str("[")?;
                for (i, p) in inners.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{p}")?;
                }
                f.write_str("]")
            }
            Pattern::Type { name, params } => {
                write!(f, "({name}")?;
                for p in params {
                    write!(f, " {p}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Call(CallExpr),
    Lambda(LambdaExpr),
    List(ListExpr),
    Const(ConstLiteral),
    Name(QualifiedName),
    /// The `.` marker: recurse into the enclosing function. Only legal as the
    /// callable of a call in tail position.
    SelfRef { line: Line },
}

impl Expr {
    pub fn line(&self) -> Line {
        match self {
            Expr::Call(call) => call.line,
            Expr::Lambda(lambda) => lambda.line,
            Expr::List(list) => list.line,
            Expr::Const(c) => c.line,
            Expr::Name(name) => name.line,
            Expr::SelfRef { line } => *line,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CallExpr {
    pub callable: Box<Expr>,
    pub args: Vec<Expr>,
    pub line: Line,
}

impl CallExpr {
    /// True if the callable is the bare name `match`.
    pub fn is_match(&self) -> bool {
        matches!(&*self.callable, Expr::Name(q) if q.parts.len() == 1 && q.parts[0] == crate::MATCH)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LambdaExpr {
    pub params: Vec<Pattern>,
    pub block: Box<Block>,
    pub line: Line,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListExpr {
    pub elements: Vec<Block>,
    pub line: Line,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConstLiteral {
    pub kind: ConstKind,
    pub line: Line,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConstKind {
    Number(f64),
    String(String),
    /// `()`
    Unit,
    /// `[]`
    EmptyList,
}

impl fmt::Display for ConstLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConstKind::Number(n) => write!(f, "{n}"),
            ConstKind::String(s) => write!(f, "\"{s}\""),
            ConstKind::Unit => f.write_str("()"),
            ConstKind::EmptyList => f.write_str("[]"),
        }
    }
}

/// `a`, `Foo.bar`, `Outer.Inner.baz`.
#[derive(Clone, Debug, PartialEq)]
pub struct QualifiedName {
    pub id: NodeId,
    pub parts: Vec<String>,
    pub line: Line,
}

impl QualifiedName {
    /// The single segment, if this name has exactly one.
    pub fn as_single(&self) -> Option<&str> {
        match self.parts.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join("."))
    }
}
