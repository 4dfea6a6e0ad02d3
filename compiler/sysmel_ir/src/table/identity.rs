//! Identity-keyed set and dictionary.

use std::fmt;

use super::raw::RawTable;

/// Multiplier used to scramble raw identities before probing.
const IDENTITY_SCRAMBLE: u64 = 0x9E37_79B9_7F4A_7C15;

/// A key compared by *which object it is*, not by its contents.
pub trait Identity {
    /// Stable identity of the object (a handle index or address).
    fn identity(&self) -> u64;
}

#[inline]
fn identity_hash<K: Identity>(key: &K) -> u64 {
    key.identity().wrapping_mul(IDENTITY_SCRAMBLE) >> 16
}

#[inline]
fn same_identity<K: Identity>(a: &K, b: &K) -> bool {
    a.identity() == b.identity()
}

/// Open-addressing set keyed by identity.
#[derive(Clone)]
pub struct IdentitySet<K> {
    raw: RawTable<K, ()>,
}

impl<K: Identity> IdentitySet<K> {
    /// Create an empty set.
    pub fn new() -> Self {
        IdentitySet {
            raw: RawTable::new(),
        }
    }

    /// Add `key`. Returns `true` if it was not already present.
    pub fn insert(&mut self, key: K) -> bool {
        self.raw
            .insert_with(key, (), identity_hash::<K>, same_identity::<K>)
            .is_none()
    }

    /// Whether the very same object is a member.
    pub fn contains(&self, key: &K) -> bool {
        self.raw
            .find(identity_hash(key), |existing| same_identity(existing, key))
            .is_some()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Current slot count.
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Members in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.raw.iter().map(|(key, ())| key)
    }
}

impl<K: Identity> Default for IdentitySet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Identity + fmt::Debug> fmt::Debug for IdentitySet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Open-addressing map keyed by identity.
#[derive(Clone)]
pub struct IdentityDictionary<K, V> {
    raw: RawTable<K, V>,
}

impl<K: Identity, V> IdentityDictionary<K, V> {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        IdentityDictionary {
            raw: RawTable::new(),
        }
    }

    /// Insert or overwrite. Returns the previous value, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw
            .insert_with(key, value, identity_hash::<K>, same_identity::<K>)
    }

    /// Value stored for the very same object.
    pub fn lookup(&self, key: &K) -> Option<&V> {
        self.raw
            .find(identity_hash(key), |existing| same_identity(existing, key))
    }

    /// Whether the very same object is a key.
    pub fn contains(&self, key: &K) -> bool {
        self.lookup(key).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Current slot count.
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.raw.iter()
    }
}

impl<K: Identity, V> Default for IdentityDictionary<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Identity + fmt::Debug, V: fmt::Debug> fmt::Debug for IdentityDictionary<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
