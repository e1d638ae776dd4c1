//! Runtime values.
//!
//! A closed tagged union. Heap-allocated variants are reference counted and
//! immutable once built; the only mutable state reachable from a value is a
//! closure's captured [`SharedScope`].

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use smallvec::SmallVec;
use snek_compile::CompiledCode;
use snek_ir::Line;

use crate::namespace::SharedNamespace;
use crate::scope::SharedScope;
use crate::types::TypeCase;
use crate::{Interpreter, RuntimeErrorKind};

/// Field storage for case values. Most cases (`::` included) have at most two.
pub type Fields = SmallVec<[Value; 2]>;

#[derive(Clone)]
pub enum Value {
    Number(f64),
    String(Rc<str>),
    /// An instance of a case with one or more fields.
    Case(Rc<CaseObject>),
    /// The instance of a zero-field case.
    Singleton(Rc<TypeCase>),
    Function(Rc<CompiledFunction>),
    Partial(Rc<PartialFunction>),
    /// Builds a [`CaseObject`] of its case when saturated.
    Constructor(Rc<TypeCase>),
    Builtin(&'static BuiltinFunction),
}

pub struct CaseObject {
    pub case: Rc<TypeCase>,
    pub fields: Fields,
}

/// Long lists are cons chains; dropping the head must not recurse once per
/// cell.
impl Drop for CaseObject {
    fn drop(&mut self) {
        let mut pending: Vec<Value> = std::mem::take(&mut self.fields).into_iter().collect();
        while let Some(value) = pending.pop() {
            if let Value::Case(obj) = value {
                if let Ok(mut obj) = Rc::try_unwrap(obj) {
                    pending.extend(std::mem::take(&mut obj.fields));
                }
            }
        }
    }
}

/// A closure: code plus the scope it was created in.
pub struct CompiledFunction {
    pub code: Arc<CompiledCode>,
    /// Captured by reference; saves made after creation are visible.
    pub scope: SharedScope,
    /// Root namespace of the defining module, used for dynamic lookups.
    pub namespace: SharedNamespace,
    pub arity: usize,
    pub module: Rc<str>,
    /// Line of the lambda; 0 for a module body.
    pub line: Line,
}

impl CompiledFunction {
    pub fn is_module_body(&self) -> bool {
        self.line == 0
    }
}

impl fmt::Display for CompiledFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_module_body() {
            write!(f, "<module {}>", self.module)
        } else {
            write!(f, "<function {}:{}>", self.module, self.line)
        }
    }
}

/// A function with a prefix of its arguments already supplied.
pub struct PartialFunction {
    pub function: Value,
    /// In call order: `args[0]` is the first argument.
    pub args: Vec<Value>,
}

/// Signature of a native function. Arguments arrive in call order.
pub type NativeFn = fn(&mut Interpreter, Vec<Value>) -> Result<Value, RuntimeErrorKind>;

pub struct BuiltinFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: NativeFn,
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

impl Value {
    pub fn string(s: &str) -> Self {
        Value::String(Rc::from(s))
    }

    /// Number of arguments a call must supply, or `None` if not callable.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Value::Function(f) => Some(f.arity),
            Value::Partial(p) => p.function.arity().map(|a| a - p.args.len()),
            Value::Constructor(case) => Some(case.arity),
            Value::Builtin(b) => Some(b.arity),
            Value::Number(_) | Value::String(_) | Value::Case(_) | Value::Singleton(_) => None,
        }
    }

    #[inline]
    pub fn is_callable(&self) -> bool {
        self.arity().is_some()
    }

    /// The case of a case value or singleton.
    pub fn case(&self) -> Option<&Rc<TypeCase>> {
        match self {
            Value::Case(obj) => Some(&obj.case),
            Value::Singleton(case) => Some(case),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Case(obj) => &obj.case.name,
            Value::Singleton(case) => &case.name,
            Value::Function(_) | Value::Partial(_) | Value::Constructor(_) | Value::Builtin(_) => {
                "Function"
            }
        }
    }

    fn fmt_value(&self, f: &mut fmt::Formatter<'_>, nested: bool) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) if nested => write!(f, "{s:?}"),
            Value::String(s) => f.write_str(s),
            Value::Singleton(case) => f.write_str(&case.name),
            Value::Case(obj) => snek_stack::ensure_sufficient_stack(|| {
                write!(f, "({}", obj.case.name)?;
                for field in &obj.fields {
                    f.write_str(" ")?;
                    field.fmt_value(f, true)?;
                }
                f.write_str(")")
            }),
            Value::Function(func) => write!(f, "{func}"),
            Value::Partial(p) => {
                f.write_str("<partial ")?;
                p.function.fmt_value(f, true)?;
                f.write_str(">")
            }
            Value::Constructor(case) => write!(f, "<constructor {}>", case.name),
            Value::Builtin(b) => write!(f, "<builtin {}>", b.name),
        }
    }
}

/// Structural equality: numbers and strings by value, cases by case
/// identity and fields, functions by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Singleton(a), Value::Singleton(b)) => Rc::ptr_eq(a, b),
            (Value::Case(a), Value::Case(b)) => {
                Rc::ptr_eq(&a.case, &b.case)
                    && snek_stack::ensure_sufficient_stack(|| a.fields == b.fields)
            }
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Partial(a), Value::Partial(b)) => Rc::ptr_eq(a, b),
            (Value::Constructor(a), Value::Constructor(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

/// Display form: strings raw at top level and quoted inside cases.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_value(f, false)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_value(f, true)
    }
}
