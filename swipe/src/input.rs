//! Input model: pointer positions, swipe outcomes, drag state, and the gesture state machine.
//!
//! `Point` carries raw client coordinates from either input adapter.
//! `InputState` is the active gesture being tracked between gesture start and
//! gesture end, while `DragState` is the render-facing snapshot handed to the
//! style derivation.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

/// A point in client (viewport) coordinates, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin, used as the neutral drag offset.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Outcome of a committed swipe.
///
/// Every commit delivers exactly one of these to a single handler, so "no
/// handler" and "exactly one side fires" are visible in the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    /// Pass on the candidate.
    Left,
    /// Like the candidate.
    Right,
}

impl SwipeDirection {
    /// Direction implied by a horizontal offset: positive is right, anything else left.
    #[must_use]
    pub fn from_offset(dx: f64) -> Self {
        if dx > 0.0 { Self::Right } else { Self::Left }
    }

    /// Sign applied to the exit offset.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Identifies one exit animation so a late timer cannot complete a different one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationTicket(pub u64);

/// Render-facing snapshot of the drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    /// The active card is attached to the pointer or flying out.
    pub is_dragging: bool,
    /// Offset from the gesture anchor; `y` is always zero.
    pub offset: Point,
    /// Anchor captured at gesture start.
    pub start_pos: Point,
}

impl DragState {
    /// Neutral state: not dragging, zero offset.
    #[must_use]
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next gesture start.
    #[default]
    Idle,
    /// The active card follows the pointer.
    Dragging {
        /// Client position where the gesture started.
        anchor: Point,
    },
    /// The active card is leaving the stack; new gestures are rejected.
    Animating {
        /// Side the card leaves towards.
        direction: SwipeDirection,
        /// Ticket the host must hand back to complete the animation.
        ticket: AnimationTicket,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self, Self::Animating { .. })
    }
}
