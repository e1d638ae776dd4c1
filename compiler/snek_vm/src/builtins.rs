//! Built-in types and native functions seeded into every root namespace.
//!
//! The built-in type families are created once per [`Runtime`](crate::Runtime)
//! and shared by every module it loads, so a list built in one module is a
//! list in all of them.

use std::cmp::Ordering;
use std::rc::Rc;

use smallvec::smallvec;
use snek_ir::{LIST_CONS, LIST_EMPTY, UNIT};

use crate::errors::{builtin_argument, stack_underflow};
use crate::namespace::SharedNamespace;
use crate::types::{ParentType, Type, TypeCase};
use crate::value::{BuiltinFunction, CaseObject};
use crate::{Interpreter, RuntimeErrorKind, Value};

pub struct Builtins {
    pub unit: Rc<TypeCase>,
    pub unit_type: Rc<ParentType>,
    pub cons: Rc<TypeCase>,
    pub empty: Rc<TypeCase>,
    pub list: Rc<ParentType>,
    pub true_case: Rc<TypeCase>,
    pub false_case: Rc<TypeCase>,
    pub bool_type: Rc<ParentType>,
}

impl Builtins {
    pub fn new() -> Self {
        let unit = TypeCase::new(UNIT, 0);
        let cons = TypeCase::new(LIST_CONS, 2);
        let empty = TypeCase::new(LIST_EMPTY, 0);
        let true_case = TypeCase::new("True", 0);
        let false_case = TypeCase::new("False", 0);
        Builtins {
            unit_type: ParentType::new("UnitT", vec![Rc::clone(&unit)]),
            list: ParentType::new("List", vec![Rc::clone(&cons), Rc::clone(&empty)]),
            bool_type: ParentType::new("Bool", vec![Rc::clone(&true_case), Rc::clone(&false_case)]),
            unit,
            cons,
            empty,
            true_case,
            false_case,
        }
    }

    /// Register the built-in types and natives in `ns`.
    pub fn seed(&self, ns: &SharedNamespace) {
        let mut ns = ns.borrow_mut();
        ns.add_type("Number", Type::Number);
        ns.add_type("String", Type::String);
        ns.add_type("Function", Type::Function);
        ns.add_parent(&self.unit_type);
        ns.add_parent(&self.list);
        ns.add_parent(&self.bool_type);
        for native in NATIVES {
            ns.bind(native.name, Value::Builtin(native));
        }
    }

    pub fn unit(&self) -> Value {
        Value::Singleton(Rc::clone(&self.unit))
    }

    pub fn bool(&self, b: bool) -> Value {
        let case = if b { &self.true_case } else { &self.false_case };
        Value::Singleton(Rc::clone(case))
    }

    pub fn is_unit(&self, value: &Value) -> bool {
        matches!(value, Value::Singleton(case) if Rc::ptr_eq(case, &self.unit))
    }

    pub fn empty(&self) -> Value {
        Value::Singleton(Rc::clone(&self.empty))
    }

    /// `(:: head tail)`.
    pub fn cons(&self, head: Value, tail: Value) -> Value {
        Value::Case(Rc::new(CaseObject {
            case: Rc::clone(&self.cons),
            fields: smallvec![head, tail],
        }))
    }

    /// A list of `items` in order.
    pub fn list(&self, items: Vec<Value>) -> Value {
        items
            .into_iter()
            .rev()
            .fold(self.empty(), |tail, head| self.cons(head, tail))
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

pub static NATIVES: &[BuiltinFunction] = &[
    BuiltinFunction { name: "+", arity: 2, func: add },
    BuiltinFunction { name: "-", arity: 2, func: sub },
    BuiltinFunction { name: "*", arity: 2, func: mul },
    BuiltinFunction { name: "/", arity: 2, func: div },
    BuiltinFunction { name: "%", arity: 2, func: rem },
    BuiltinFunction { name: "++", arity: 2, func: concat },
    BuiltinFunction { name: "==", arity: 2, func: eq },
    BuiltinFunction { name: "!=", arity: 2, func: ne },
    BuiltinFunction { name: "<", arity: 2, func: lt },
    BuiltinFunction { name: "<=", arity: 2, func: le },
    BuiltinFunction { name: ">", arity: 2, func: gt },
    BuiltinFunction { name: ">=", arity: 2, func: ge },
    BuiltinFunction { name: "println", arity: 1, func: println },
    BuiltinFunction { name: "input", arity: 1, func: input },
    BuiltinFunction { name: "to_num", arity: 1, func: to_num },
    BuiltinFunction { name: "to_str", arity: 1, func: to_str },
    BuiltinFunction { name: "error", arity: 1, func: error },
];

type NativeResult = Result<Value, RuntimeErrorKind>;

fn take<const N: usize>(args: Vec<Value>) -> Result<[Value; N], RuntimeErrorKind> {
    <[Value; N]>::try_from(args).map_err(|_| stack_underflow())
}

fn number(function: &str, value: &Value) -> Result<f64, RuntimeErrorKind> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(builtin_argument(function, "a Number", other.type_name())),
    }
}

fn arith(function: &str, args: Vec<Value>, op: fn(f64, f64) -> f64) -> NativeResult {
    let [a, b] = take(args)?;
    Ok(Value::Number(op(number(function, &a)?, number(function, &b)?)))
}

// Arithmetic

fn add(_: &mut Interpreter, args: Vec<Value>) -> NativeResult {
    arith("+", args, |a, b| a + b)
}

fn sub(_: &mut Interpreter, args: Vec<Value>) -> NativeResult {
    arith("-", args, |a, b| a - b)
}

fn mul(_: &mut Interpreter, args: Vec<Value>) -> NativeResult {
    arith("*", args, |a, b| a * b)
}

fn div(_: &mut Interpreter, args: Vec<Value>) -> NativeResult {
    arith("/", args, |a, b| a / b)
}

fn rem(_: &mut Interpreter, args: Vec<Value>) -> NativeResult {
    arith("%", args, |a, b| a % b)
}

fn concat(_: &mut Interpreter, args: Vec<Value>) -> NativeResult {
    match take(args)? {
        [Value::String(a), Value::String(b)] => Ok(Value::String(Rc::from(format!("{a}{b}")))),
        [Value::String(_), other] | [other, _] => {
            Err(builtin_argument("++", "a String", other.type_name()))
        }
    }
}

// Comparison

fn eq(interp: &mut Interpreter, args: Vec<Value>) -> NativeResult {
    let [a, b] = take(args)?;
    Ok(interp.builtins().bool(a == b))
}

fn ne(interp: &mut Interpreter, args: Vec<Value>) -> NativeResult {
    let [a, b] = take(args)?;
    Ok(interp.builtins().bool(a != b))
}

fn compare(function: &str, args: Vec<Value>) -> Result<Ordering, RuntimeErrorKind> {
    match take(args)? {
        [Value::Number(a), Value::Number(b)] => a
            .partial_cmp(&b)
            .ok_or_else(|| builtin_argument(function, "comparable Numbers", "NaN")),
        [Value::String(a), Value::String(b)] => Ok(a.cmp(&b)),
        [a, b] => Err(builtin_argument(
            function,
            "two Numbers or two Strings",
            &format!("{} and {}", a.type_name(), b.type_name()),
        )),
    }
}

fn lt(interp: &mut Interpreter, args: Vec<Value>) -> NativeResult {
    let ord = compare("<", args)?;
    Ok(interp.builtins().bool(ord == Ordering::Less))
}

fn le(interp: &mut Interpreter, args: Vec<Value>) -> NativeResult {
    let ord = compare("<=", args)?;
    Ok(interp.builtins().bool(ord != Ordering::Greater))
}

fn gt(interp: &mut Interpreter, args: Vec<Value>) -> NativeResult {
    let ord = compare(">", args)?;
    Ok(interp.builtins().bool(ord == Ordering::Greater))
}

fn ge(interp: &mut Interpreter, args: Vec<Value>) -> NativeResult {
    let ord = compare(">=", args)?;
    Ok(interp.builtins().bool(ord != Ordering::Less))
}

// IO

fn println(interp: &mut Interpreter, args: Vec<Value>) -> NativeResult {
    let [value] = take(args)?;
    interp.io().out(&value.to_string());
    Ok(interp.builtins().unit())
}

/// Prints the prompt as its own line, then reads one line. EOF gives `Unit`.
fn input(interp: &mut Interpreter, args: Vec<Value>) -> NativeResult {
    let [prompt] = take(args)?;
    let io = interp.io();
    io.out(&prompt.to_string());
    Ok(match io.input() {
        Some(line) => Value::string(&line),
        None => interp.builtins().unit(),
    })
}

// Conversion

fn to_num(_: &mut Interpreter, args: Vec<Value>) -> NativeResult {
    match take(args)? {
        [Value::Number(n)] => Ok(Value::Number(n)),
        [Value::String(s)] => s
            .trim()
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| RuntimeErrorKind::NumberConversion {
                text: s.to_string(),
            }),
        [other] => Err(builtin_argument("to_num", "a String", other.type_name())),
    }
}

fn to_str(_: &mut Interpreter, args: Vec<Value>) -> NativeResult {
    let [value] = take(args)?;
    Ok(match value {
        Value::String(_) => value,
        other => Value::string(&other.to_string()),
    })
}

fn error(_: &mut Interpreter, args: Vec<Value>) -> NativeResult {
    let [message] = take(args)?;
    Err(RuntimeErrorKind::UserError {
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natives_have_unique_names() {
        let mut names: Vec<_> = NATIVES.iter().map(|n| n.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), NATIVES.len());
    }

    #[test]
    fn list_helper_builds_cons_chain() {
        let builtins = Builtins::new();
        let list = builtins.list(vec![Value::Number(1.0), Value::Number(2.0)]);
        assert_eq!(list.to_string(), "(:: 1 (:: 2 Empty))");
    }

    #[test]
    fn unit_and_bool_are_shared_singletons() {
        let builtins = Builtins::new();
        assert!(builtins.is_unit(&builtins.unit()));
        assert_eq!(builtins.bool(true), builtins.bool(true));
        assert_ne!(builtins.bool(true), builtins.bool(false));
        assert!(!builtins.is_unit(&builtins.empty()));
    }
}
