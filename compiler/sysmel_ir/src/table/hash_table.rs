//! Symbol-keyed binding table.

use std::fmt;

use super::raw::RawTable;
use crate::Symbol;

#[inline]
fn symbol_hash(symbol: &Symbol) -> u64 {
    u64::from(symbol.content_hash())
}

/// Open-addressing table from interned symbols to values.
///
/// Keys hash by the symbol's cached content hash and compare by handle, so a
/// lookup never touches the string bytes. Entries are never removed;
/// inserting an existing key overwrites its value in place.
#[derive(Clone)]
pub struct HashTable<V> {
    raw: RawTable<Symbol, V>,
}

impl<V> HashTable<V> {
    /// Create an empty table. No slots are allocated until the first insert.
    pub fn new() -> Self {
        HashTable {
            raw: RawTable::new(),
        }
    }

    /// Create a table with a preallocated slot array.
    pub fn with_capacity(capacity: usize) -> Self {
        HashTable {
            raw: RawTable::with_capacity(capacity),
        }
    }

    /// Insert or overwrite a binding. Returns the previous value, if any.
    pub fn insert(&mut self, key: Symbol, value: V) -> Option<V> {
        self.raw
            .insert_with(key, value, symbol_hash, |a, b| a == b)
    }

    /// Look up the value bound to `key`.
    pub fn lookup(&self, key: Symbol) -> Option<&V> {
        self.raw.find(symbol_hash(&key), |existing| *existing == key)
    }

    /// Whether `key` is bound in this table.
    pub fn contains(&self, key: Symbol) -> bool {
        self.lookup(key).is_some()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Current slot count.
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &V)> {
        self.raw.iter().map(|(key, value)| (*key, value))
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for HashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
