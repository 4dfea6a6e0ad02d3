//! Shared slot array and search loop for every open-addressing container.

/// Smallest non-zero capacity of any table.
pub const MIN_CAPACITY: usize = 32;

/// Outcome of scanning the slot ring for a key.
pub(crate) enum Search {
    /// Slot holding a matching key.
    Found(usize),
    /// First never-occupied slot on the search path.
    Vacant(usize),
    /// Every slot is occupied by a non-matching key.
    Saturated,
}

/// Slot array with linear probing and wraparound.
#[derive(Clone)]
pub(crate) struct RawTable<K, V> {
    slots: Vec<Option<(K, V)>>,
    size: usize,
}

impl<K, V> RawTable<K, V> {
    pub(crate) fn new() -> Self {
        RawTable {
            slots: Vec::new(),
            size: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        RawTable { slots, size: 0 }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Scan from the hash-derived start slot to the end, then from slot 0.
    pub(crate) fn search(&self, hash: u64, mut is_match: impl FnMut(&K) -> bool) -> Search {
        let capacity = self.slots.len();
        if capacity == 0 {
            return Search::Saturated;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "remainder is bounded by capacity, which is a usize"
        )]
        let start = (hash % capacity as u64) as usize;
        for index in (start..capacity).chain(0..start) {
            match &self.slots[index] {
                None => return Search::Vacant(index),
                Some((key, _)) if is_match(key) => return Search::Found(index),
                Some(_) => {}
            }
        }
        Search::Saturated
    }

    /// Whether adding one more entry would reach the 80% load factor.
    #[inline]
    pub(crate) fn insertion_needs_growth(&self) -> bool {
        (self.size + 1) * 5 >= self.slots.len() * 4
    }

    /// Double the capacity (minimum [`MIN_CAPACITY`]) and reinsert every entry.
    ///
    /// Reinsertion uses the same search rule; the new capacity always has room
    /// for the live entries, so it never grows recursively.
    pub(crate) fn grow(&mut self, hash_of: impl Fn(&K) -> u64) {
        let new_capacity = (self.slots.len() * 2).max(MIN_CAPACITY);
        tracing::debug!(
            from = self.slots.len(),
            to = new_capacity,
            entries = self.size,
            "growing table"
        );
        let old = std::mem::replace(self, RawTable::with_capacity(new_capacity));
        for (key, value) in old.slots.into_iter().flatten() {
            match self.search(hash_of(&key), |_| false) {
                Search::Vacant(index) => self.fill(index, key, value),
                Search::Found(_) | Search::Saturated => {
                    unreachable!("rehash target has room for every live entry")
                }
            }
        }
    }

    /// Store a new entry into a vacant slot.
    #[inline]
    pub(crate) fn fill(&mut self, index: usize, key: K, value: V) {
        debug_assert!(self.slots[index].is_none());
        self.slots[index] = Some((key, value));
        self.size += 1;
    }

    #[inline]
    pub(crate) fn entry(&self, index: usize) -> Option<&(K, V)> {
        self.slots[index].as_ref()
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, index: usize) -> Option<&mut V> {
        self.slots[index].as_mut().map(|(_, value)| value)
    }

    /// Live entries in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref().map(|(key, value)| (key, value)))
    }

    /// Insert or overwrite, growing as needed. Returns the previous value.
    pub(crate) fn insert_with(
        &mut self,
        key: K,
        value: V,
        hash_of: impl Fn(&K) -> u64,
        is_same: impl Fn(&K, &K) -> bool,
    ) -> Option<V> {
        loop {
            let hash = hash_of(&key);
            match self.search(hash, |existing| is_same(existing, &key)) {
                Search::Found(index) => {
                    return self
                        .value_mut(index)
                        .map(|slot| std::mem::replace(slot, value));
                }
                Search::Vacant(index) if !self.insertion_needs_growth() => {
                    self.fill(index, key, value);
                    return None;
                }
                Search::Vacant(_) | Search::Saturated => self.grow(&hash_of),
            }
        }
    }

    /// Find the value stored under a key.
    pub(crate) fn find(&self, hash: u64, is_match: impl FnMut(&K) -> bool) -> Option<&V> {
        match self.search(hash, is_match) {
            Search::Found(index) => self.entry(index).map(|(_, value)| value),
            Search::Vacant(_) | Search::Saturated => None,
        }
    }
}
