//! Open-addressing hash containers.
//!
//! All three flavors share one probing discipline ([`raw::RawTable`]):
//!
//! - slots live in a single array whose capacity doubles from
//!   [`MIN_CAPACITY`];
//! - probing is linear from `hash % capacity` to the end of the array, then
//!   wraps around to slot 0;
//! - there is no deletion, so an empty slot always means "never occupied";
//! - the table grows when an insertion would bring `size + 1` to 80% of the
//!   capacity, or when a search finds neither a match nor an empty slot.
//!
//! [`HashTable`] is keyed by interned [`Symbol`](crate::Symbol)s and uses
//! their cached content hash. [`IdentitySet`] and [`IdentityDictionary`]
//! are keyed by handle identity through the [`Identity`] trait.

mod hash_table;
mod identity;
pub(crate) mod raw;

pub use hash_table::HashTable;
pub use identity::{Identity, IdentityDictionary, IdentitySet};
pub use raw::MIN_CAPACITY;

#[cfg(test)]
mod tests;
