//! Hierarchical symbol tables.
//!
//! Each module run produces one root [`Namespace`]. Names that are not
//! statically resolved, and every qualified name, are looked up here at run
//! time. Visibility only matters at module boundaries: importers see public
//! child namespaces and nothing under a private one.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use snek_compile::CaseSpec;

use crate::scope::LocalScope;
use crate::types::{ParentType, Type, TypeCase};
use crate::{RuntimeErrorKind, Value};

pub type SharedNamespace = LocalScope<Namespace>;

pub struct Namespace {
    public: bool,
    bindings: FxHashMap<String, Value>,
    types: FxHashMap<String, Type>,
    children: FxHashMap<String, SharedNamespace>,
}

impl Namespace {
    pub fn new(public: bool) -> SharedNamespace {
        LocalScope::new(Namespace {
            public,
            bindings: FxHashMap::default(),
            types: FxHashMap::default(),
            children: FxHashMap::default(),
        })
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn binding(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn add_type(&mut self, name: impl Into<String>, ty: Type) {
        self.types.insert(name.into(), ty);
    }

    pub fn get_type(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    pub fn child(&self, name: &str) -> Option<&SharedNamespace> {
        self.children.get(name)
    }

    /// The child `name`, created with `public` if missing. An existing
    /// child keeps its visibility.
    pub fn child_or_insert(&mut self, name: &str, public: bool) -> SharedNamespace {
        self.children
            .entry(name.to_string())
            .or_insert_with(|| Namespace::new(public))
            .clone()
    }

    /// Register an algebraic type: the parent, a type entry per case, and a
    /// singleton or constructor binding per case.
    pub fn define_type(&mut self, name: &str, cases: &[CaseSpec]) -> Rc<ParentType> {
        let cases: Vec<Rc<TypeCase>> = cases
            .iter()
            .map(|spec| TypeCase::new(spec.name.as_str(), spec.arity))
            .collect();
        let parent = ParentType::new(name, cases);
        self.add_parent(&parent);
        parent
    }

    /// Register an already-built type family under its own names.
    pub fn add_parent(&mut self, parent: &Rc<ParentType>) {
        self.add_type(parent.name.as_str(), Type::Parent(Rc::clone(parent)));
        for case in &parent.cases {
            self.add_type(case.name.as_str(), Type::Case(Rc::clone(case)));
            let value = if case.arity == 0 {
                Value::Singleton(Rc::clone(case))
            } else {
                Value::Constructor(Rc::clone(case))
            };
            self.bind(case.name.as_str(), value);
        }
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.bindings.iter()
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut children: Vec<_> = self.children.keys().collect();
        children.sort();
        f.debug_struct("Namespace")
            .field("public", &self.public)
            .field("bindings", &self.bindings.len())
            .field("types", &self.types.len())
            .field("children", &children)
            .finish()
    }
}

fn join(path: &[String]) -> String {
    path.join(".")
}

// Lookup

/// The namespace at `path` below `root`.
pub fn find_namespace(
    root: &SharedNamespace,
    path: &[String],
) -> Result<SharedNamespace, RuntimeErrorKind> {
    let mut ns = root.clone();
    for (depth, part) in path.iter().enumerate() {
        let next = ns.borrow().child(part).cloned();
        ns = next.ok_or_else(|| RuntimeErrorKind::NamespaceNotFound {
            path: join(&path[..=depth]),
        })?;
    }
    Ok(ns)
}

/// The binding at the qualified `path`.
pub fn find_name(root: &SharedNamespace, path: &[String]) -> Result<Value, RuntimeErrorKind> {
    let not_found = || RuntimeErrorKind::NameNotFound { name: join(path) };
    let (name, prefix) = path.split_last().ok_or_else(not_found)?;
    let ns = find_namespace(root, prefix).map_err(|_| not_found())?;
    let value = ns.borrow().binding(name).cloned();
    value.ok_or_else(not_found)
}

/// The type at the qualified `path`.
pub fn find_type(root: &SharedNamespace, path: &[String]) -> Result<Type, RuntimeErrorKind> {
    let not_found = || RuntimeErrorKind::TypeNotFound { name: join(path) };
    let (name, prefix) = path.split_last().ok_or_else(not_found)?;
    let ns = find_namespace(root, prefix).map_err(|_| not_found())?;
    let ty = ns.borrow().get_type(name).cloned();
    ty.ok_or_else(not_found)
}

// Mutation

/// Create every missing segment of `path` with visibility `public`.
pub fn make_namespace(
    root: &SharedNamespace,
    path: &[String],
    public: bool,
) -> Result<SharedNamespace, RuntimeErrorKind> {
    let mut ns = root.clone();
    for part in path {
        let next = {
            let mut parent = ns.borrow_mut();
            if public && !parent.is_public() {
                return Err(RuntimeErrorKind::PublicUnderPrivate { path: join(path) });
            }
            parent.child_or_insert(part, public)
        };
        ns = next;
    }
    tracing::trace!(path = %join(path), public, "namespace ready");
    Ok(ns)
}

// Import

/// Merge every binding and type of `src` into `target`, then recurse into
/// the public children of `src` only. Missing target children inherit the
/// visibility of their target parent.
pub fn import_all(src: &SharedNamespace, target: &SharedNamespace) {
    if src.ptr_eq(target) {
        return;
    }
    let children: Vec<(String, SharedNamespace)> = {
        let src = src.borrow();
        let mut target = target.borrow_mut();
        for (name, value) in &src.bindings {
            target.bindings.insert(name.clone(), value.clone());
        }
        for (name, ty) in &src.types {
            target.types.insert(name.clone(), ty.clone());
        }
        src.children
            .iter()
            .filter(|(_, child)| child.borrow().is_public())
            .map(|(name, child)| (name.clone(), child.clone()))
            .collect()
    };
    let public = target.borrow().is_public();
    for (name, child) in children {
        let dest = target.borrow_mut().child_or_insert(&name, public);
        import_all(&child, &dest);
    }
}

/// Merge the single entry addressed by `path` into `target` at the same
/// path. Every namespace segment walked, including a namespace addressed by
/// the final segment, must be public. Target namespaces created on the way
/// inherit the visibility of their parent.
pub fn import_selected(
    src: &SharedNamespace,
    target: &SharedNamespace,
    path: &[String],
) -> Result<(), RuntimeErrorKind> {
    let (name, prefix) = path
        .split_last()
        .ok_or_else(|| RuntimeErrorKind::ImportNotFound { name: join(path) })?;

    let mut from = src.clone();
    let mut into = target.clone();
    for (depth, part) in prefix.iter().enumerate() {
        let next = from.borrow().child(part).cloned();
        let next = next.ok_or_else(|| RuntimeErrorKind::ImportNotFound {
            name: join(&path[..=depth]),
        })?;
        if !next.borrow().is_public() {
            return Err(RuntimeErrorKind::PrivateImport {
                name: join(&path[..=depth]),
            });
        }
        from = next;
        let public = into.borrow().is_public();
        let dest = into.borrow_mut().child_or_insert(part, public);
        into = dest;
    }

    let (value, ty, child) = {
        let from = from.borrow();
        (
            from.binding(name).cloned(),
            from.get_type(name).cloned(),
            from.child(name).cloned(),
        )
    };
    if value.is_none() && ty.is_none() && child.is_none() {
        return Err(RuntimeErrorKind::ImportNotFound { name: join(path) });
    }

    if let Some(child) = &child {
        if !child.borrow().is_public() {
            return Err(RuntimeErrorKind::PrivateImport { name: join(path) });
        }
    }
    {
        let mut into = into.borrow_mut();
        if let Some(value) = value {
            into.bind(name.as_str(), value);
        }
        if let Some(ty) = ty {
            into.add_type(name.as_str(), ty);
        }
    }
    if let Some(child) = child {
        let public = into.borrow().is_public();
        let dest = into.borrow_mut().child_or_insert(name, public);
        import_all(&child, &dest);
    }
    Ok(())
}

#[cfg(test)]
mod tests;
