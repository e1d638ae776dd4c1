//! Node identities for AST occurrences.
//!
//! Name patterns and qualified names are looked up by identity, not by text:
//! two occurrences of `x` are different nodes, and the resolver maps each node
//! to the declaration it refers to.

use std::fmt;

/// Identity of one name pattern or qualified-name occurrence within a parse.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        NodeId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Hands out sequential [`NodeId`]s.
///
/// One generator per parsed unit; ids from different generators must not be
/// mixed in a single [`crate::Program`].
#[derive(Debug, Default)]
pub struct NodeIdGen {
    next: u32,
}

impl NodeIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}
