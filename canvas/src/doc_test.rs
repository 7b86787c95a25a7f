use super::*;
use crate::shape::{Point, ShapeKind, UserId};

fn state(x: f64) -> ShapeState {
    let shape = Shape::new(ShapeKind::Rectangle, vec![Point::new(x, 0.0), Point::new(x + 1.0, 1.0)], UserId::from("u"))
        .unwrap();
    ShapeState::new(shape, false, 1)
}

#[test]
fn new_store_is_empty() {
    let store = CanvasState::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.visible_count(), 0);
    assert!(store.get(&ShapeId::new()).is_none());
}

#[test]
fn apply_inserts_then_overwrites() {
    let mut store = CanvasState::new();
    let first = state(0.0);
    let id = first.id().clone();
    store.apply(id.clone(), first.clone());
    assert_eq!(store.get(&id), Some(&first));

    let mut moved = first.clone();
    moved.shape.translate(3.0, 0.0).unwrap();
    store.apply(id.clone(), moved.clone());
    assert_eq!(store.get(&id), Some(&moved));
    assert_eq!(store.len(), 1);
}

#[test]
fn deleted_shapes_stay_in_store_but_are_hidden() {
    let mut store = CanvasState::new();
    let a = state(0.0);
    let b = state(5.0);
    store.apply(a.id().clone(), a.clone());
    store.apply(b.id().clone(), b.clone());
    store.apply(a.id().clone(), a.deleted_copy(9));

    assert!(store.contains(a.id()));
    assert_eq!(store.len(), 2);
    assert_eq!(store.visible_count(), 1);
    assert_eq!(store.visible_shapes().next(), Some(&b.shape));
}

#[test]
fn iteration_follows_first_insertion() {
    let mut store = CanvasState::new();
    let states: Vec<_> = (0..5).map(|i| state(f64::from(i))).collect();
    for s in &states {
        store.apply(s.id().clone(), s.clone());
    }
    // Overwriting does not reorder.
    store.apply(states[0].id().clone(), states[0].deleted_copy(2));
    store.apply(states[0].id().clone(), states[0].clone());

    let ids: Vec<_> = store.states().map(|s| s.id().clone()).collect();
    let expected: Vec<_> = states.iter().map(|s| s.id().clone()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn replace_all_discards_previous_contents() {
    let mut store = CanvasState::new();
    let old = state(0.0);
    store.apply(old.id().clone(), old.clone());

    let fresh = vec![state(1.0), state(2.0)];
    store.replace_all(fresh.clone());

    assert!(!store.contains(old.id()));
    assert_eq!(store.states().cloned().collect::<Vec<_>>(), fresh);
}

#[test]
fn clone_does_not_alias() {
    let mut store = CanvasState::new();
    let s = state(0.0);
    store.apply(s.id().clone(), s.clone());
    let copy = store.clone();
    store.apply(s.id().clone(), s.deleted_copy(3));
    assert_eq!(copy.visible_count(), 1);
    assert_ne!(copy, store);
}
