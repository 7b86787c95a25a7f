//! Actions: one state transition of one shape, as a command + memento pair.
//!
//! DESIGN
//! ======
//! An action carries both the state it was based on (`prev`) and the state it
//! produces (`next`). The host validates by comparing `prev` to its store, and
//! undo is computed by swapping mementos, so an action never needs the store
//! to be interpreted.
//!
//! The legal `is_deleted` combinations per kind are checked in one place,
//! [`Action::from_parts`], which both local construction and wire decoding go
//! through.
//!
//! | Kind | prev | next |
//! |------|------|------|
//! | Create | absent | live |
//! | Modify | live | live |
//! | Delete | live | deleted |
//! | Resurrect | deleted | live |

#[cfg(test)]
#[path = "action_test.rs"]
mod action_test;

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::shape::{ShapeId, ShapeState, UserId};

/// Current time as milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

// =============================================================================
// TYPES
// =============================================================================

/// Unique identity of an action. Actions compare equal iff their ids match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionId(String);

impl ActionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for ActionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ActionId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Create,
    Modify,
    Delete,
    Resurrect,
}

impl ActionKind {
    pub const ALL: [Self; 4] = [Self::Create, Self::Modify, Self::Delete, Self::Resurrect];

    /// Name used in the `ActionType` field on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Modify => "Modify",
            Self::Delete => "Delete",
            Self::Resurrect => "Resurrect",
        }
    }

    /// Required `is_deleted` of `prev` (`None` = prev must be absent) and of
    /// `next`.
    fn required_flags(self) -> (Option<bool>, bool) {
        match self {
            Self::Create => (None, false),
            Self::Modify => (Some(false), false),
            Self::Delete => (Some(false), true),
            Self::Resurrect => (Some(true), false),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ActionError::UnknownKind(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("{0} action must not carry a previous state")]
    UnexpectedPrev(ActionKind),
    #[error("{0} action requires a previous state")]
    MissingPrev(ActionKind),
    #[error("{kind} action requires previous state with is_deleted={expected}")]
    PrevDeleted { kind: ActionKind, expected: bool },
    #[error("{kind} action requires next state with is_deleted={expected}")]
    NextDeleted { kind: ActionKind, expected: bool },
    #[error("state describes shape {found}, action targets {expected}")]
    ShapeMismatch { expected: ShapeId, found: ShapeId },
    #[error("unknown action type: {0}")]
    UnknownKind(String),
}

// =============================================================================
// ACTION
// =============================================================================

#[derive(Debug, Clone)]
pub struct Action {
    id: ActionId,
    kind: ActionKind,
    user_id: UserId,
    timestamp: i64,
    shape_id: ShapeId,
    prev: Option<ShapeState>,
    next: ShapeState,
}

impl Action {
    /// Build a new action with a fresh id and the current time. The target
    /// shape is the one `next` describes.
    ///
    /// # Errors
    ///
    /// Returns an [`ActionError`] if the states violate the kind's invariant.
    pub fn new(kind: ActionKind, user_id: UserId, prev: Option<ShapeState>, next: ShapeState) -> Result<Self, ActionError> {
        let shape_id = next.id().clone();
        Self::from_parts(ActionId::new(), kind, user_id, now_ms(), shape_id, prev, next)
    }

    /// Reassemble an action from every field, as read off the wire.
    ///
    /// # Errors
    ///
    /// Returns an [`ActionError`] if the states violate the kind's invariant
    /// or describe a different shape than `shape_id`.
    pub fn from_parts(
        id: ActionId,
        kind: ActionKind,
        user_id: UserId,
        timestamp: i64,
        shape_id: ShapeId,
        prev: Option<ShapeState>,
        next: ShapeState,
    ) -> Result<Self, ActionError> {
        check_transition(kind, &shape_id, prev.as_ref(), &next)?;
        Ok(Self { id, kind, user_id, timestamp, shape_id, prev, next })
    }

    #[must_use]
    pub fn id(&self) -> &ActionId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    #[must_use]
    pub fn shape_id(&self) -> &ShapeId {
        &self.shape_id
    }

    #[must_use]
    pub fn prev(&self) -> Option<&ShapeState> {
        self.prev.as_ref()
    }

    #[must_use]
    pub fn next(&self) -> &ShapeState {
        &self.next
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Action {}

fn check_transition(
    kind: ActionKind,
    shape_id: &ShapeId,
    prev: Option<&ShapeState>,
    next: &ShapeState,
) -> Result<(), ActionError> {
    let (prev_flag, next_flag) = kind.required_flags();
    match (prev_flag, prev) {
        (None, Some(_)) => return Err(ActionError::UnexpectedPrev(kind)),
        (Some(_), None) => return Err(ActionError::MissingPrev(kind)),
        (Some(expected), Some(state)) if state.is_deleted != expected => {
            return Err(ActionError::PrevDeleted { kind, expected });
        }
        _ => {}
    }
    if next.is_deleted != next_flag {
        return Err(ActionError::NextDeleted { kind, expected: next_flag });
    }
    for state in prev.into_iter().chain(std::iter::once(next)) {
        if state.id() != shape_id {
            return Err(ActionError::ShapeMismatch { expected: shape_id.clone(), found: state.id().clone() });
        }
    }
    Ok(())
}
