//! Shared constants for the canvas crate.

// ── Shapes ──────────────────────────────────────────────────────

/// Stroke thickness given to shapes built without an explicit one.
pub const DEFAULT_THICKNESS: f64 = 2.0;

// ── History ─────────────────────────────────────────────────────

/// Number of self-authored actions an undo history keeps before dropping the
/// oldest.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;
