use super::*;
use crate::shape::{Point, Shape, ShapeKind};

fn state(deleted: bool) -> ShapeState {
    let shape = Shape::new(ShapeKind::Line, vec![Point::new(0.0, 0.0), Point::new(4.0, 4.0)], UserId::from("u1")).unwrap();
    ShapeState::new(shape, deleted, 100)
}

fn user() -> UserId {
    UserId::from("u1")
}

// =============================================================
// Per-kind invariants
// =============================================================

#[test]
fn create_requires_no_prev_and_live_next() {
    let live = state(false);
    assert!(Action::new(ActionKind::Create, user(), None, live.clone()).is_ok());
    assert_eq!(
        Action::new(ActionKind::Create, user(), Some(live.clone()), live.clone()).unwrap_err(),
        ActionError::UnexpectedPrev(ActionKind::Create)
    );
    assert_eq!(
        Action::new(ActionKind::Create, user(), None, live.deleted_copy(1)).unwrap_err(),
        ActionError::NextDeleted { kind: ActionKind::Create, expected: false }
    );
}

#[test]
fn modify_requires_live_prev_and_live_next() {
    let live = state(false);
    assert!(Action::new(ActionKind::Modify, user(), Some(live.clone()), live.clone()).is_ok());
    assert_eq!(
        Action::new(ActionKind::Modify, user(), None, live.clone()).unwrap_err(),
        ActionError::MissingPrev(ActionKind::Modify)
    );
    assert_eq!(
        Action::new(ActionKind::Modify, user(), Some(live.deleted_copy(1)), live).unwrap_err(),
        ActionError::PrevDeleted { kind: ActionKind::Modify, expected: false }
    );
}

#[test]
fn delete_requires_live_prev_and_deleted_next() {
    let live = state(false);
    let dead = live.deleted_copy(200);
    assert!(Action::new(ActionKind::Delete, user(), Some(live.clone()), dead.clone()).is_ok());
    assert_eq!(
        Action::new(ActionKind::Delete, user(), Some(live.clone()), live).unwrap_err(),
        ActionError::NextDeleted { kind: ActionKind::Delete, expected: true }
    );
    assert_eq!(
        Action::new(ActionKind::Delete, user(), Some(dead.clone()), dead).unwrap_err(),
        ActionError::PrevDeleted { kind: ActionKind::Delete, expected: false }
    );
}

#[test]
fn resurrect_requires_deleted_prev_and_live_next() {
    let live = state(false);
    let dead = state(true);
    assert!(Action::new(ActionKind::Resurrect, user(), Some(dead.clone()), live.clone()).is_ok());
    assert_eq!(
        Action::new(ActionKind::Resurrect, user(), Some(live.clone()), live).unwrap_err(),
        ActionError::PrevDeleted { kind: ActionKind::Resurrect, expected: true }
    );
    assert_eq!(
        Action::new(ActionKind::Resurrect, user(), Some(dead.clone()), dead).unwrap_err(),
        ActionError::NextDeleted { kind: ActionKind::Resurrect, expected: false }
    );
}

#[test]
fn from_parts_rejects_states_of_another_shape() {
    let live = state(false);
    let other = ShapeId::from("someone-else");
    let err = Action::from_parts(ActionId::new(), ActionKind::Create, user(), 5, other.clone(), None, live.clone())
        .unwrap_err();
    assert_eq!(err, ActionError::ShapeMismatch { expected: other, found: live.id().clone() });
}

#[test]
fn from_parts_keeps_every_field() {
    let live = state(false);
    let action = Action::from_parts(
        ActionId::from("a-1"),
        ActionKind::Create,
        user(),
        1234,
        live.id().clone(),
        None,
        live.clone(),
    )
    .unwrap();
    assert_eq!(action.id().as_str(), "a-1");
    assert_eq!(action.kind(), ActionKind::Create);
    assert_eq!(action.user_id(), &user());
    assert_eq!(action.timestamp(), 1234);
    assert_eq!(action.shape_id(), live.id());
    assert!(action.prev().is_none());
    assert_eq!(action.next(), &live);
}

// =============================================================
// Identity
// =============================================================

#[test]
fn new_action_targets_next_shape_and_is_timestamped() {
    let live = state(false);
    let before = now_ms();
    let action = Action::new(ActionKind::Create, user(), None, live.clone()).unwrap();
    assert_eq!(action.shape_id(), live.id());
    assert!(action.timestamp() >= before);
}

#[test]
fn actions_compare_by_id_only() {
    let live = state(false);
    let a = Action::new(ActionKind::Create, user(), None, live.clone()).unwrap();
    let b = Action::new(ActionKind::Create, user(), None, live).unwrap();
    assert_ne!(a, b);
    assert_eq!(a, a.clone());
}

#[test]
fn kind_names_round_trip() {
    for kind in ActionKind::ALL {
        assert_eq!(kind.to_string().parse::<ActionKind>().unwrap(), kind);
    }
    assert_eq!("Undo".parse::<ActionKind>().unwrap_err(), ActionError::UnknownKind("Undo".into()));
}
