//! `Decompose` and refutable pattern tests.

use std::rc::Rc;

use snek_compile::MatchPattern;

use super::Interpreter;
use crate::errors::{decompose_arity, type_mismatch};
use crate::types::Type;
use crate::{RuntimeErrorKind, Value};

impl Interpreter {
    /// Check the top of the stack against the type at `path`.
    ///
    /// A case pops the value and pushes its fields last-first. An atomic or
    /// parent type only checks, leaving the value for the single inner
    /// pattern to consume.
    pub(super) fn decompose(
        &mut self,
        path: &[String],
        parts: usize,
    ) -> Result<(), RuntimeErrorKind> {
        let ty = self.lookup_type(path)?;
        match &ty {
            Type::Case(case) => {
                if parts != case.arity {
                    return Err(decompose_arity(&case.name, parts));
                }
                let value = self.pop()?;
                match &value {
                    Value::Case(obj) if Rc::ptr_eq(&obj.case, case) => {
                        self.stack.extend(obj.fields.iter().rev().cloned());
                    }
                    Value::Singleton(c) if Rc::ptr_eq(c, case) => {}
                    other => return Err(type_mismatch(&case.name, other.type_name())),
                }
            }
            Type::Number | Type::String | Type::Function | Type::Parent(_) => {
                if parts != 1 {
                    return Err(decompose_arity(ty.name(), parts));
                }
                let value = self.peek()?;
                if !ty.admits(value) {
                    return Err(type_mismatch(ty.name(), value.type_name()));
                }
            }
        }
        Ok(())
    }

    /// Whether `value` satisfies `pattern`. Only fails if a type named in
    /// the pattern cannot be found.
    pub(super) fn matches(
        &self,
        pattern: &MatchPattern,
        value: &Value,
    ) -> Result<bool, RuntimeErrorKind> {
        snek_stack::ensure_sufficient_stack(|| {
            Ok(match pattern {
                MatchPattern::Always => true,
                MatchPattern::Number(n) => matches!(value, Value::Number(v) if v == n),
                MatchPattern::String(s) => matches!(value, Value::String(v) if **v == **s),
                MatchPattern::EmptyList => {
                    matches!(value, Value::Singleton(c) if Rc::ptr_eq(c, &self.builtins().empty))
                }
                MatchPattern::Unit => self.builtins().is_unit(value),
                MatchPattern::Type { path, inners } => {
                    let ty = self.lookup_type(path)?;
                    match &ty {
                        Type::Case(case) => match value {
                            Value::Singleton(c) => Rc::ptr_eq(c, case),
                            Value::Case(obj) => {
                                if !Rc::ptr_eq(&obj.case, case)
                                    || inners.len() != obj.fields.len()
                                {
                                    return Ok(false);
                                }
                                for (inner, field) in inners.iter().zip(&obj.fields) {
                                    if !self.matches(inner, field)? {
                                        return Ok(false);
                                    }
                                }
                                true
                            }
                            _ => false,
                        },
                        Type::Number | Type::String | Type::Function | Type::Parent(_) => {
                            match inners.as_slice() {
                                [inner] => ty.admits(value) && self.matches(inner, value)?,
                                _ => false,
                            }
                        }
                    }
                }
            })
        })
    }
}
