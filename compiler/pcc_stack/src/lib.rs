//! Stack growth for deep recursive descent.
//!
//! The expression and statement grammars recurse once per nesting level, and
//! the code generator recurses once per AST level. Pathological inputs such
//! as `((((((...))))))` or long `else if` chains can exhaust the native stack,
//! so every recursion entry point wraps its body in [`ensure_sufficient_stack`].
//!
//! On native targets the `stacker` crate allocates a fresh segment when the
//! remaining stack drops below the red zone. On WASM the call is a plain
//! passthrough.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated stack segment.
const GROWTH: usize = 1024 * 1024;

/// Run `f`, growing the stack first if the remaining space is below the red
/// zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nest(depth: u32) -> u32 {
        ensure_sufficient_stack(|| if depth == 0 { 0 } else { nest(depth - 1) + 1 })
    }

    #[test]
    fn test_passes_result_through() {
        let parsed: Result<u8, String> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(parsed, Ok(7));
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        assert_eq!(nest(200_000), 200_000);
    }
}
