//! Lexical environments.
//!
//! A [`Scope`] maps declaration ids to values and links to its parent. Every
//! closure created while a scope is live holds a [`SharedScope`] to it, so a
//! save made after the closure was created is still visible to it.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use snek_ir::{DeclId, Declaration};

use crate::{RuntimeErrorKind, Value};

/// A single-threaded `Rc<RefCell<T>>`.
///
/// All scope and namespace allocations go through [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub type SharedScope = LocalScope<Scope>;

/// One activation's storage slots.
#[derive(Default)]
pub struct Scope {
    values: FxHashMap<DeclId, Value>,
    parent: Option<SharedScope>,
}

impl Scope {
    /// A scope with no parent.
    pub fn root() -> SharedScope {
        LocalScope::new(Scope::default())
    }

    /// A fresh scope whose lookups fall back to `parent`.
    pub fn child(parent: &SharedScope) -> SharedScope {
        LocalScope::new(Scope {
            values: FxHashMap::default(),
            parent: Some(parent.clone()),
        })
    }

    /// Fill the slot for `decl` in this scope.
    #[inline]
    pub fn save(&mut self, decl: &Declaration, value: Value) {
        self.values.insert(decl.id, value);
    }

    #[inline]
    pub fn get_local(&self, id: DeclId) -> Option<&Value> {
        self.values.get(&id)
    }

    pub fn parent(&self) -> Option<&SharedScope> {
        self.parent.as_ref()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("slots", &self.values.len())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// Walk outward from `scope` to the first slot saved for `decl`.
pub fn lookup(scope: &SharedScope, decl: &Declaration) -> Result<Value, RuntimeErrorKind> {
    let mut current = scope.clone();
    loop {
        let next = {
            let inner = current.borrow();
            if let Some(value) = inner.get_local(decl.id) {
                return Ok(value.clone());
            }
            inner.parent().cloned()
        };
        match next {
            Some(parent) => current = parent,
            None => {
                return Err(RuntimeErrorKind::UseBeforeAssignment {
                    name: decl.name.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_sees_parent_slots() {
        let root = Scope::root();
        let decl = Declaration::new("x", 1);
        root.borrow_mut().save(&decl, Value::Number(1.0));

        let child = Scope::child(&root);
        assert_eq!(lookup(&child, &decl).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn inner_save_does_not_leak_outward() {
        let root = Scope::root();
        let decl = Declaration::new("x", 1);
        let child = Scope::child(&root);
        child.borrow_mut().save(&decl, Value::Number(2.0));

        assert!(lookup(&root, &decl).is_err());
        assert_eq!(lookup(&child, &decl).unwrap(), Value::Number(2.0));
    }

    #[test]
    fn same_text_different_declaration() {
        let root = Scope::root();
        let outer = Declaration::new("a", 1);
        let inner = Declaration::new("a", 2);
        root.borrow_mut().save(&outer, Value::string("global"));

        let err = lookup(&root, &inner).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Access of name 'a' before assignment"
        );
    }

    #[test]
    fn later_saves_are_visible_through_shared_handle() {
        let root = Scope::root();
        let captured = root.clone();
        let decl = Declaration::new("late", 3);
        assert!(lookup(&captured, &decl).is_err());

        root.borrow_mut().save(&decl, Value::Number(7.0));
        assert_eq!(lookup(&captured, &decl).unwrap(), Value::Number(7.0));
    }
}
