//! Declaration identities.
//!
//! A [`Declaration`] is created once per name-pattern leaf of a binding group.
//! Every usage the resolver links to it shares the same storage slot at run
//! time, which is what makes shadowing a matter of identity rather than text.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::Line;

/// Process-wide counter. Separately compiled units (modules, REPL lines) must
/// never hand out the same id twice.
static NEXT_DECL_ID: AtomicU32 = AtomicU32::new(0);

/// Storage-slot key of one declared name.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(u32);

impl DeclId {
    /// Allocate an id no other declaration in this process has.
    pub fn fresh() -> Self {
        DeclId(NEXT_DECL_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId({})", self.0)
    }
}

/// One declared name: its slot id, its source text and where it was declared.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub id: DeclId,
    pub name: Arc<str>,
    pub line: Line,
}

impl Declaration {
    /// Declare `name` with a fresh slot.
    pub fn new(name: &str, line: Line) -> Self {
        Declaration {
            id: DeclId::fresh(),
            name: Arc::from(name),
            line,
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id.0)
    }
}
