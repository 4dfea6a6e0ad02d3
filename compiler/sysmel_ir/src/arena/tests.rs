use super::*;
use crate::Identity;

crate::define_index! {
    /// Handle used only by these tests.
    struct NodeId;
}

#[test]
fn test_alloc_returns_sequential_handles() {
    let mut arena: Arena<NodeId, &str> = Arena::new();
    let a = arena.alloc("a");
    let b = arena.alloc("b");

    assert_eq!(a.raw(), 0);
    assert_eq!(b.raw(), 1);
    assert_eq!(*arena.get(a), "a");
    assert_eq!(*arena.get(b), "b");
    assert_eq!(arena.len(), 2);
}

#[test]
fn test_get_mut_updates_in_place() {
    let mut arena: Arena<NodeId, i32> = Arena::new();
    let id = arena.alloc(1);
    *arena.get_mut(id) += 41;
    assert_eq!(*arena.get(id), 42);
}

#[test]
fn test_handles_survive_growth() {
    let mut arena: Arena<NodeId, usize> = Arena::new();
    let ids: Vec<NodeId> = (0..10_000).map(|i| arena.alloc(i)).collect();
    for (expected, id) in ids.into_iter().enumerate() {
        assert_eq!(*arena.get(id), expected);
    }
}

#[test]
fn test_next_id_matches_alloc() {
    let mut arena: Arena<NodeId, ()> = Arena::new();
    assert!(arena.is_empty());
    let predicted = arena.next_id();
    assert_eq!(arena.alloc(()), predicted);
}

#[test]
fn test_index_identity_is_raw_value() {
    let mut arena: Arena<NodeId, ()> = Arena::new();
    arena.alloc(());
    let second = arena.alloc(());
    assert_eq!(second.identity(), 1);
    assert_eq!(format!("{second:?}"), "NodeId(1)");
}

#[test]
fn test_iter_in_allocation_order() {
    let mut arena: Arena<NodeId, char> = Arena::new();
    arena.alloc('x');
    arena.alloc('y');
    let collected: Vec<(u32, char)> = arena.iter().map(|(id, c)| (id.raw(), *c)).collect();
    assert_eq!(collected, vec![(0, 'x'), (1, 'y')]);
}

#[test]
fn test_successor_never_reissues_handles() {
    let mut first: Arena<NodeId, &str> = Arena::new();
    let old = first.alloc("old");
    first.alloc("older");

    let mut second = first.successor();
    assert!(second.is_empty());
    assert!(!second.contains(old));
    assert_eq!(second.try_get(old), None);

    let new = second.alloc("new");
    assert_eq!(new.raw(), 2);
    assert!(second.contains(new));
    assert_eq!(second.try_get(new), Some(&"new"));
    assert_eq!(*second.get(new), "new");
    let collected: Vec<u32> = second.iter().map(|(id, _)| id.raw()).collect();
    assert_eq!(collected, vec![2]);
}

#[test]
fn test_try_get_rejects_unissued_handles() {
    let mut arena: Arena<NodeId, i32> = Arena::new();
    arena.alloc(7);
    assert_eq!(arena.try_get(NodeId::from_raw(0)), Some(&7));
    assert_eq!(arena.try_get(NodeId::from_raw(1)), None);
}
