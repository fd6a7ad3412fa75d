//! Card-style derivation for the stacked presentation.
//!
//! [`card_style`] is a pure function of a card's position relative to the
//! active cursor and the current [`DragState`]. Hosts either read the typed
//! [`CardStyle`] or render it to an inline CSS declaration with
//! [`CardStyle::to_css`].

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use serde::Serialize;

use crate::consts::{
    DRAG_Z_INDEX, ROTATION_DEG_PER_PX, STACK_LIFT_PX, STACK_SCALE_STEP, STACK_TRANSITION_CSS, STACK_Z_BASE,
    VISIBLE_DEPTH,
};
use crate::input::DragState;

/// Whether the card box is rendered at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    None,
    Flex,
}

/// Transition applied when the transform changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    /// Follow the pointer instantly.
    None,
    /// Ease between resting positions.
    Eased,
}

/// Card transform, always applied after centering the card horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transform {
    /// Hidden cards carry no transform.
    None,
    /// Resting card, lifted and shrunk by its depth in the stack.
    Stacked { lift_px: f64, scale: f64 },
    /// Active card attached to the pointer.
    Following { offset_x: f64, rotation_deg: f64 },
}

/// Style record for one card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardStyle {
    pub display: Display,
    pub z_index: i64,
    pub transform: Transform,
    pub opacity: f64,
    pub transition: Transition,
}

impl CardStyle {
    /// Style for cards outside the visible window.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            display: Display::None,
            z_index: 0,
            transform: Transform::None,
            opacity: 0.0,
            transition: Transition::None,
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.display == Display::None
    }

    /// Render as an inline CSS declaration block.
    #[must_use]
    pub fn to_css(&self) -> String {
        let display = match self.display {
            Display::None => "none",
            Display::Flex => "flex",
        };
        let transform = match self.transform {
            Transform::None => "none".to_owned(),
            Transform::Stacked { lift_px, scale } => {
                format!("translateX(-50%) translateY(-{lift_px}px) scale({scale})")
            }
            Transform::Following { offset_x, rotation_deg } => {
                format!("translateX(-50%) translateX({offset_x}px) rotate({rotation_deg}deg)")
            }
        };
        let transition = match self.transition {
            Transition::None => "none",
            Transition::Eased => STACK_TRANSITION_CSS,
        };
        format!(
            "display: {display}; z-index: {}; transform: {transform}; opacity: {}; transition: {transition}",
            self.z_index, self.opacity
        )
    }
}

/// Derive the style for the card `position` slots behind the active one.
///
/// Position 0 is the active card; negative positions are already swiped.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn card_style(position: i64, drag: &DragState) -> CardStyle {
    if !(0..=VISIBLE_DEPTH).contains(&position) {
        return CardStyle::hidden();
    }

    if position == 0 && drag.is_dragging {
        return CardStyle {
            display: Display::Flex,
            z_index: DRAG_Z_INDEX,
            transform: Transform::Following {
                offset_x: drag.offset.x,
                rotation_deg: drag.offset.x * ROTATION_DEG_PER_PX,
            },
            opacity: 1.0,
            transition: Transition::None,
        };
    }

    let depth = position as f64;
    CardStyle {
        display: Display::Flex,
        z_index: STACK_Z_BASE - position,
        transform: Transform::Stacked { lift_px: depth * STACK_LIFT_PX, scale: 1.0 - depth * STACK_SCALE_STEP },
        opacity: 1.0,
        transition: Transition::Eased,
    }
}

/// Style for the record at `index` when the cursor sits at `current_index`.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn card_style_at(index: usize, current_index: usize, drag: &DragState) -> CardStyle {
    card_style(index as i64 - current_index as i64, drag)
}
