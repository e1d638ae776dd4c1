//! Runtime type descriptors.
//!
//! `Number`, `String` and `Function` are atomic. A [`ParentType`] is an
//! algebraic data type owning a fixed list of [`TypeCase`]s. Cases are
//! compared by identity (`Rc::ptr_eq`), never by name: two modules declaring
//! `type Option = Some x | None` get unrelated cases.

use std::fmt;
use std::rc::Rc;

use crate::Value;

/// One variant of an algebraic type, with a fixed field count.
#[derive(Debug)]
pub struct TypeCase {
    pub name: String,
    pub arity: usize,
}

impl TypeCase {
    pub fn new(name: impl Into<String>, arity: usize) -> Rc<Self> {
        Rc::new(TypeCase {
            name: name.into(),
            arity,
        })
    }
}

#[derive(Debug)]
pub struct ParentType {
    pub name: String,
    pub cases: Vec<Rc<TypeCase>>,
}

impl ParentType {
    pub fn new(name: impl Into<String>, cases: Vec<Rc<TypeCase>>) -> Rc<Self> {
        Rc::new(ParentType {
            name: name.into(),
            cases,
        })
    }

    pub fn has_case(&self, case: &Rc<TypeCase>) -> bool {
        self.cases.iter().any(|c| Rc::ptr_eq(c, case))
    }
}

#[derive(Clone, Debug)]
pub enum Type {
    Number,
    String,
    Function,
    Parent(Rc<ParentType>),
    Case(Rc<TypeCase>),
}

impl Type {
    pub fn name(&self) -> &str {
        match self {
            Type::Number => "Number",
            Type::String => "String",
            Type::Function => "Function",
            Type::Parent(parent) => &parent.name,
            Type::Case(case) => &case.name,
        }
    }

    /// Whether `value` is an instance of this type.
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            Type::Number => matches!(value, Value::Number(_)),
            Type::String => matches!(value, Value::String(_)),
            Type::Function => value.is_callable(),
            Type::Parent(parent) => value.case().is_some_and(|c| parent.has_case(c)),
            Type::Case(case) => value.case().is_some_and(|c| Rc::ptr_eq(c, case)),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
