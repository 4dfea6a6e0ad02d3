//! Sysmel IR - data layer of the bootstrap evaluation core
//!
//! This crate contains the structures the evaluator is built on:
//! - Spans for source locations
//! - Grow-only typed arenas and handle types
//! - Interned symbols with cached content hashes
//! - Open-addressing hash containers (symbol-keyed and identity-keyed)
//! - Tokens handed over by the lexer
//! - Syntax trees handed over by the parser
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: strings become `Symbol` handles with O(1) equality
//! - **Handles, not pointers**: runtime objects live in arenas and are
//!   referenced by 32-bit indices
//! - **Observable probing**: hash containers are built from scratch because
//!   search order and growth thresholds are part of their contract

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
mod span;
mod symbol;
pub mod syntax;
mod table;
pub mod token;

pub use arena::{Arena, ArenaIndex};
pub use span::Span;
pub use symbol::{hash_bytes, Interner, Symbol, INTERNER_INITIAL_CAPACITY};
pub use syntax::{NodeKind, SwitchCase, Syntax, SyntaxBuilder, SyntaxNode};
pub use table::{HashTable, Identity, IdentityDictionary, IdentitySet, MIN_CAPACITY};
pub use token::{SourceId, SourcePosition, Token, TokenKind, TokenSpan};

mod size_asserts {
    use super::Symbol;
    crate::static_assert_size!(Symbol, 8);
}
