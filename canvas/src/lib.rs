//! Document model for the shared drawing surface.
//!
//! This crate owns everything a peer needs to reason about the drawing
//! without touching the network: the shapes themselves, the actions that move
//! a shape from one state to another, the store that holds current truth, the
//! factory that builds forward and inverse actions, and the per-peer undo
//! history. It performs no I/O and holds no locks; the host and client
//! managers in `drawsync` decide when and under which lock these are used.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`shape`] | Ids, points, colors, [`shape::Shape`] and the [`shape::ShapeState`] memento |
//! | [`action`] | [`action::Action`] and its per-kind invariants |
//! | [`doc`] | [`doc::CanvasState`], the id → memento store |
//! | [`factory`] | Forward action builders and [`factory::inverse_action`] |
//! | [`history`] | [`history::UndoRedoHistory`] |
//! | [`consts`] | Shared defaults |

pub mod action;
pub mod consts;
pub mod doc;
pub mod factory;
pub mod history;
pub mod shape;

pub use action::{Action, ActionError, ActionId, ActionKind};
pub use doc::CanvasState;
pub use factory::FactoryError;
pub use history::UndoRedoHistory;
pub use shape::{Color, ColorError, Point, Shape, ShapeError, ShapeId, ShapeKind, ShapeState, UserId};
