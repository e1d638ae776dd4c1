//! Stack safety for the recursive parts of the Snek pipeline.
//!
//! Three places recurse on the host stack:
//!
//! - the parser and resolver, once per level of syntactic nesting;
//! - the code generator, once per nested expression or pattern;
//! - the VM, once per non-tail call (self tail calls reuse their frame and
//!   never recurse).
//!
//! Each of them wraps its recursive step in [`ensure_sufficient_stack`], which
//! grows the stack on demand instead of aborting the process. The VM still caps
//! the number of live frames (see `RuntimeConfig::max_call_depth`), so runaway
//! non-tail recursion surfaces as a runtime error rather than unbounded memory
//! growth.
//!
//! On `wasm32` the guard is a plain call.

/// Grow when less than this much stack is left.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_result() {
        let result: Result<u8, &str> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn nested_list_depth_does_not_overflow() {
        // Mirrors lowering a cons chain hundreds of thousands of cells long.
        fn depth(n: u32) -> u32 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
        }

        assert_eq!(depth(200_000), 200_000);
    }
}
