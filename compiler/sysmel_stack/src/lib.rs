//! On-demand stack growth for recursive tree walking.
//!
//! The evaluator recurses once per syntax-tree level and imposes no depth
//! limit of its own. Every recursive entry point goes through
//! [`ensure_sufficient_stack`], which moves execution onto a freshly
//! allocated stack segment when the current one runs low.
//!
//! - **Native targets**: `stacker::maybe_grow`.
//! - **WASM targets**: direct call; the engine manages the stack.

/// Remaining stack below which a new segment is allocated (128KB).
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (1MB).
pub const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than [`RED_ZONE`] remains.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    ensure_stack_with(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` with explicit red-zone and segment sizes.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_stack_with<R>(red_zone: usize, segment_size: usize, f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(red_zone, segment_size, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_stack_with<R>(_red_zone: usize, _segment_size: usize, f: impl FnOnce() -> R) -> R {
    f()
}
