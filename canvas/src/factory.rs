//! Action factory: forward actions built from store reads, and inverses.
//!
//! Forward builders read the caller's view of the store to capture `prev`.
//! A precondition failure means that view is already stale, before anything
//! reaches the network, so it is returned to the caller rather than dropped.

#[cfg(test)]
#[path = "factory_test.rs"]
mod factory_test;

use crate::action::{Action, ActionError, ActionKind, now_ms};
use crate::doc::CanvasState;
use crate::shape::{Shape, ShapeId, ShapeState, UserId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FactoryError {
    #[error("cannot {op} nonexistent or deleted shape {shape_id}")]
    Precondition { op: &'static str, shape_id: ShapeId },
    #[error(transparent)]
    Action(#[from] ActionError),
}

/// Build a `Create` action for a brand-new shape. Reads nothing from the
/// store.
///
/// # Errors
///
/// Returns [`FactoryError::Action`] only if construction invariants fail,
/// which a live `next` state cannot trigger.
pub fn create_action(shape: Shape, user_id: UserId) -> Result<Action, FactoryError> {
    let next = ShapeState::new(shape, false, now_ms());
    Ok(Action::new(ActionKind::Create, user_id, None, next)?)
}

/// Build a `Modify` action replacing the live shape `shape_id` with
/// `modified`. The modified shape is stamped with `user_id` as its last
/// modifier.
///
/// # Errors
///
/// Returns [`FactoryError::Precondition`] if the shape is absent or deleted
/// in `store`, and [`FactoryError::Action`] if `modified` carries another id.
pub fn modify_action(
    store: &CanvasState,
    shape_id: &ShapeId,
    modified: Shape,
    user_id: UserId,
) -> Result<Action, FactoryError> {
    let prev = live_state(store, shape_id, "modify")?;
    let next = ShapeState::new(modified.with_last_modified_by(user_id.clone()), false, now_ms());
    Ok(Action::new(ActionKind::Modify, user_id, Some(prev), next)?)
}

/// Build a `Delete` action flagging the live shape `shape_id` deleted.
///
/// # Errors
///
/// Returns [`FactoryError::Precondition`] if the shape is absent or already
/// deleted in `store`.
pub fn delete_action(store: &CanvasState, shape_id: &ShapeId, user_id: UserId) -> Result<Action, FactoryError> {
    let prev = live_state(store, shape_id, "delete")?;
    let next = prev.deleted_copy(now_ms());
    Ok(Action::new(ActionKind::Delete, user_id, Some(prev), next)?)
}

/// Compute the action that reverses `action`, authored by `user_id`.
///
/// - Create → Delete of the created state
/// - Modify → Modify back to the previous state
/// - Delete → Resurrect of the previous state
/// - Resurrect → Delete back to the previous state
///
/// Restored states keep their original `last_modified`, so applying an action
/// and then its inverse leaves the store field-equal to where it started
/// (for Create, the shape stays in the store flagged deleted).
///
/// # Errors
///
/// Returns [`FactoryError::Action`] if `action` lacks the previous state its
/// kind requires.
pub fn inverse_action(action: &Action, user_id: UserId) -> Result<Action, FactoryError> {
    let next = action.next().clone();
    let inverse = match action.kind() {
        ActionKind::Create => {
            let deleted = next.deleted_copy(now_ms());
            Action::new(ActionKind::Delete, user_id, Some(next), deleted)?
        }
        ActionKind::Modify => Action::new(ActionKind::Modify, user_id, Some(next), required_prev(action)?)?,
        ActionKind::Delete => Action::new(ActionKind::Resurrect, user_id, Some(next), required_prev(action)?)?,
        ActionKind::Resurrect => Action::new(ActionKind::Delete, user_id, Some(next), required_prev(action)?)?,
    };
    Ok(inverse)
}

fn live_state(store: &CanvasState, shape_id: &ShapeId, op: &'static str) -> Result<ShapeState, FactoryError> {
    match store.get(shape_id) {
        Some(state) if !state.is_deleted => Ok(state.clone()),
        _ => Err(FactoryError::Precondition { op, shape_id: shape_id.clone() }),
    }
}

fn required_prev(action: &Action) -> Result<ShapeState, ActionError> {
    action.prev().cloned().ok_or(ActionError::MissingPrev(action.kind()))
}
