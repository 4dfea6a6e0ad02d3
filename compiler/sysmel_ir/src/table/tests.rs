#![allow(dead_code)]

use super::*;
use crate::arena::{Arena, ArenaIndex};
use crate::{Interner, Symbol};
use proptest::prelude::*;
use rustc_hash::FxHashMap;

crate::define_index! {
    struct ObjectId;
}

fn symbols(interner: &Interner, count: usize) -> Vec<Symbol> {
    (0..count)
        .map(|i| interner.intern(&format!("key{i}")))
        .collect()
}

#[test]
fn test_empty_table_has_no_slots() {
    let table: HashTable<i32> = HashTable::new();
    assert_eq!(table.capacity(), 0);
    assert!(table.is_empty());
}

#[test]
fn test_first_insert_allocates_minimum_capacity() {
    let interner = Interner::new();
    let mut table = HashTable::new();
    table.insert(interner.intern("x"), 1);
    assert_eq!(table.capacity(), MIN_CAPACITY);
    assert_eq!(table.lookup(interner.intern("x")), Some(&1));
}

#[test]
fn test_insert_overwrites_existing_key() {
    let interner = Interner::new();
    let x = interner.intern("x");
    let mut table = HashTable::new();

    assert_eq!(table.insert(x, 1), None);
    assert_eq!(table.insert(x, 2), Some(1));
    assert_eq!(table.lookup(x), Some(&2));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_missing_key() {
    let interner = Interner::new();
    let mut table = HashTable::new();
    table.insert(interner.intern("present"), ());
    assert!(!table.contains(interner.intern("absent")));
}

#[test]
fn test_growth_at_eighty_percent() {
    let interner = Interner::new();
    let keys = symbols(&interner, 26);
    let mut table = HashTable::new();

    // 25 entries stay below 0.8 * 32 = 25.6 after insertion.
    for key in &keys[..25] {
        table.insert(*key, ());
    }
    assert_eq!(table.capacity(), 32);

    // The 26th insertion would reach the threshold.
    table.insert(keys[25], ());
    assert_eq!(table.capacity(), 64);
    assert_eq!(table.len(), 26);
}

#[test]
fn test_thousand_symbols_survive_every_growth() {
    let interner = Interner::new();
    let keys = symbols(&interner, 1000);
    let mut table = HashTable::with_capacity(32);

    for (n, key) in keys.iter().enumerate() {
        table.insert(*key, n);
        for (m, earlier) in keys[..=n].iter().enumerate() {
            assert_eq!(table.lookup(*earlier), Some(&m));
        }
    }
    assert_eq!(table.len(), 1000);
    assert_eq!(table.capacity(), 2048);
}

#[test]
fn test_identity_set_membership() {
    let mut arena: Arena<ObjectId, &str> = Arena::new();
    let a = arena.alloc("same");
    let b = arena.alloc("same");

    let mut set = IdentitySet::new();
    assert!(set.insert(a));
    assert!(!set.insert(a));

    // Equal contents, different object.
    assert!(set.contains(&a));
    assert!(!set.contains(&b));
    assert_eq!(set.len(), 1);
}

#[test]
fn test_identity_dictionary_grows() {
    let mut arena: Arena<ObjectId, ()> = Arena::new();
    let ids: Vec<ObjectId> = (0..500).map(|_| arena.alloc(())).collect();

    let mut dictionary = IdentityDictionary::new();
    for (n, id) in ids.iter().enumerate() {
        dictionary.insert(*id, n);
    }

    assert_eq!(dictionary.len(), 500);
    for (n, id) in ids.iter().enumerate() {
        assert_eq!(dictionary.lookup(id), Some(&n));
    }
    assert!(!dictionary.contains(&ObjectId::from_raw(10_000)));
}

proptest! {
    #[test]
    fn table_matches_oracle(entries in proptest::collection::vec(("[a-z]{1,6}", any::<i32>()), 0..300)) {
        let interner = Interner::new();
        let mut table = HashTable::new();
        let mut oracle = FxHashMap::default();

        for (key, value) in &entries {
            let symbol = interner.intern(key);
            table.insert(symbol, *value);
            oracle.insert(symbol, *value);
        }

        prop_assert_eq!(table.len(), oracle.len());
        for (symbol, value) in &oracle {
            prop_assert_eq!(table.lookup(*symbol), Some(value));
        }
    }
}
