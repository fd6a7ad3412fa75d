//! Shared numeric constants for the swipe crate.

use std::time::Duration;

// ── Commit decision ─────────────────────────────────────────────

/// Horizontal drag distance (pixels) that must be exceeded to commit a swipe.
pub const COMMIT_THRESHOLD_PX: f64 = 100.0;

/// Horizontal offset (pixels) the card is driven to when it leaves the stack.
pub const EXIT_OFFSET_PX: f64 = 500.0;

/// Length of the exit animation before the swipe outcome is delivered.
pub const EXIT_ANIMATION: Duration = Duration::from_millis(300);

// ── Card geometry ───────────────────────────────────────────────

/// Rotation applied to the dragged card per pixel of horizontal offset, in degrees.
pub const ROTATION_DEG_PER_PX: f64 = 0.15;

/// Vertical lift per stack position, in pixels.
pub const STACK_LIFT_PX: f64 = 20.0;

/// Scale reduction per stack position.
pub const STACK_SCALE_STEP: f64 = 0.1;

/// Deepest stack position that is still rendered (active card is 0).
pub const VISIBLE_DEPTH: i64 = 2;

/// Stacking priority of the card under the pointer.
pub const DRAG_Z_INDEX: i64 = 10;

/// Base stacking priority; a resting card at position `p` gets `STACK_Z_BASE - p`.
pub const STACK_Z_BASE: i64 = 3;

/// CSS transition used by resting cards.
pub const STACK_TRANSITION_CSS: &str = "all 0.3s ease";
