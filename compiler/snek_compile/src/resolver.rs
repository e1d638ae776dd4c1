//! Static name resolution.
//!
//! Walks the program mirroring its nesting. Each binding group (the bindings
//! directly inside one namespace, one block, or one lambda parameter list)
//! declares all of its name-pattern leaves before any body in the group is
//! resolved, so siblings can refer to each other in either order.
//!
//! Only single-segment names are linked. Anything not found on the scope
//! stack, and every multi-segment name, is left for run-time namespace lookup.

use rustc_hash::FxHashMap;
use snek_ir::{
    Binding, Block, CallExpr, Decl, Declaration, Expr, NamespaceDecl, NodeId, Pattern, Program,
};

/// Output of [`Resolver::resolve`]: the declaration behind every name
/// pattern, and behind every single-segment name that resolved statically.
#[derive(Debug, Default)]
pub struct Resolution {
    links: FxHashMap<NodeId, Declaration>,
}

impl Resolution {
    /// Declaration of a name-pattern leaf or a resolved usage.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Declaration> {
        self.links.get(&id)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// One binding group: name → declaration.
type Group = FxHashMap<String, Declaration>;

pub struct Resolver {
    scopes: Vec<Group>,
    resolution: Resolution,
}

impl Resolver {
    pub fn resolve(program: &Program) -> Resolution {
        let mut resolver = Resolver {
            scopes: Vec::new(),
            resolution: Resolution::default(),
        };
        resolver.namespace(&program.root, program.expr.as_ref());
        resolver.resolution
    }

    /// Declare every leaf of `patterns` as one group, run `body`, then pop.
    fn with_group<'a>(
        &mut self,
        patterns: impl IntoIterator<Item = &'a Pattern>,
        body: impl FnOnce(&mut Self),
    ) {
        let mut group = Group::default();
        for pattern in patterns {
            self.declare(pattern, &mut group);
        }
        self.scopes.push(group);
        body(self);
        self.scopes.pop();
    }

    /// Link each name leaf to the group's declaration for that name. The
    /// first leaf with a given name creates it; later ones share it.
    fn declare(&mut self, pattern: &Pattern, group: &mut Group) {
        match pattern {
            Pattern::Wildcard | Pattern::Const(_) => {}
            Pattern::Name(leaf) => {
                let decl = group
                    .entry(leaf.name.clone())
                    .or_insert_with(|| Declaration::new(&leaf.name, leaf.line))
                    .clone();
                self.resolution.links.insert(leaf.id, decl);
            }
            Pattern::List(inners) | Pattern::Type { params: inners, .. } => {
                for inner in inners {
                    self.declare(inner, group);
                }
            }
        }
    }

    /// `trailing` is the program's top-level call, which sees the root group.
    fn namespace(&mut self, ns: &NamespaceDecl, trailing: Option<&CallExpr>) {
        let patterns = ns.decls.iter().filter_map(|d| match d {
            Decl::Binding(b) => Some(&b.pattern),
            _ => None,
        });
        self.with_group(patterns, |r| {
            for decl in &ns.decls {
                match decl {
                    Decl::Namespace(inner) => r.namespace(inner, None),
                    Decl::Type(ty) => {
                        if let Some(inner) = &ty.namespace {
                            r.namespace(inner, None);
                        }
                    }
                    Decl::Binding(b) => r.block(&b.block),
                }
            }
            if let Some(call) = trailing {
                r.call(call);
            }
        });
    }

    fn block(&mut self, block: &Block) {
        snek_stack::ensure_sufficient_stack(|| {
            self.with_group(block.bindings.iter().map(|b: &Binding| &b.pattern), |r| {
                for binding in &block.bindings {
                    r.block(&binding.block);
                }
                r.expr(&block.expr);
            });
        });
    }

    fn expr(&mut self, expr: &Expr) {
        snek_stack::ensure_sufficient_stack(|| match expr {
            Expr::Call(call) => self.call(call),
            Expr::Lambda(lambda) => {
                self.with_group(&lambda.params, |r| r.block(&lambda.block));
            }
            Expr::List(list) => {
                for element in &list.elements {
                    self.block(element);
                }
            }
            Expr::Name(name) => {
                if let Some(single) = name.as_single() {
                    if let Some(decl) = self.lookup(single) {
                        self.resolution.links.insert(name.id, decl);
                    }
                }
            }
            Expr::Const(_) | Expr::SelfRef { .. } => {}
        });
    }

    fn call(&mut self, call: &CallExpr) {
        self.expr(&call.callable);
        for arg in &call.args {
            self.expr(arg);
        }
    }

    /// Innermost group first.
    fn lookup(&self, name: &str) -> Option<Declaration> {
        self.scopes
            .iter()
            .rev()
            .find_map(|group| group.get(name))
            .cloned()
    }
}

#[cfg(test)]
mod tests;
