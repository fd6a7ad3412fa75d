use std::sync::Arc;
use std::time::Duration;

use crate::consts::{COMMIT_THRESHOLD_PX, EXIT_ANIMATION, EXIT_OFFSET_PX};
use crate::input::{AnimationTicket, DragState, InputState, Point, SwipeDirection};
use crate::listeners::{ListenerGuard, ListenerRegistry};
use crate::style::{CardStyle, card_style};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Card styles changed; the host should re-derive them.
    RenderNeeded,
    /// The active card started leaving the stack. The host calls
    /// [`SwipeCore::finish_animation`] with `ticket` once `duration` has elapsed.
    AnimateOut { direction: SwipeDirection, ticket: AnimationTicket, duration: Duration },
    /// The exit animation finished; the swipe is final.
    Committed(SwipeDirection),
}

/// Core engine state: the gesture state machine without listeners or handlers.
///
/// Separated from `SwipeEngine` so it can be tested without a host.
#[derive(Debug, Clone, Default)]
pub struct SwipeCore {
    pub input: InputState,
    pub offset: Point,
    pub start_pos: Point,
    next_ticket: u64,
}

impl SwipeCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Gesture primitives ---

    /// Anchor a new drag at `at`. Rejected while a card is animating out.
    pub fn start_gesture(&mut self, at: Point) -> Vec<Action> {
        if self.input.is_animating() {
            return Vec::new();
        }
        self.input = InputState::Dragging { anchor: at };
        self.start_pos = at;
        self.offset = Point::zero();
        vec![Action::RenderNeeded]
    }

    /// Track the pointer. Only the horizontal component is kept.
    pub fn move_gesture(&mut self, at: Point) -> Vec<Action> {
        let InputState::Dragging { anchor } = self.input else {
            return Vec::new();
        };
        self.offset = Point::new(at.x - anchor.x, 0.0);
        vec![Action::RenderNeeded]
    }

    /// Release the drag: commit past the threshold, otherwise snap back.
    pub fn end_gesture(&mut self) -> Vec<Action> {
        if !self.input.is_dragging() {
            return Vec::new();
        }
        if self.offset.x.abs() > COMMIT_THRESHOLD_PX {
            self.animate_out(SwipeDirection::from_offset(self.offset.x))
        } else {
            self.reset();
            vec![Action::RenderNeeded]
        }
    }

    /// Commit without a drag (button press). Rejected while a card is animating out.
    pub fn swipe(&mut self, direction: SwipeDirection) -> Vec<Action> {
        if self.input.is_animating() {
            return Vec::new();
        }
        self.animate_out(direction)
    }

    /// Complete the exit animation identified by `ticket`.
    ///
    /// Stale tickets (from a cancelled or already finished animation) are ignored.
    pub fn finish_animation(&mut self, ticket: AnimationTicket) -> Vec<Action> {
        match self.input {
            InputState::Animating { direction, ticket: pending } if pending == ticket => {
                self.reset();
                vec![Action::Committed(direction), Action::RenderNeeded]
            }
            _ => Vec::new(),
        }
    }

    /// Drop any gesture or pending animation and return to neutral.
    pub fn cancel(&mut self) -> Vec<Action> {
        if self.input.is_idle() && self.offset == Point::zero() {
            return Vec::new();
        }
        self.reset();
        vec![Action::RenderNeeded]
    }

    fn animate_out(&mut self, direction: SwipeDirection) -> Vec<Action> {
        self.next_ticket += 1;
        let ticket = AnimationTicket(self.next_ticket);
        self.input = InputState::Animating { direction, ticket };
        self.offset = Point::new(direction.sign() * EXIT_OFFSET_PX, 0.0);
        vec![Action::RenderNeeded, Action::AnimateOut { direction, ticket, duration: EXIT_ANIMATION }]
    }

    fn reset(&mut self) {
        self.input = InputState::Idle;
        self.offset = Point::zero();
        self.start_pos = Point::zero();
    }

    // --- Touch adapter ---

    /// Touch start; only the first touch point is tracked.
    pub fn on_touch_start(&mut self, touches: &[Point]) -> Vec<Action> {
        match touches.first() {
            Some(&at) => self.start_gesture(at),
            None => Vec::new(),
        }
    }

    pub fn on_touch_move(&mut self, touches: &[Point]) -> Vec<Action> {
        match touches.first() {
            Some(&at) => self.move_gesture(at),
            None => Vec::new(),
        }
    }

    pub fn on_touch_end(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    // --- Mouse adapter ---

    pub fn on_mouse_down(&mut self, at: Point) -> Vec<Action> {
        self.start_gesture(at)
    }

    pub fn on_mouse_move(&mut self, at: Point) -> Vec<Action> {
        self.move_gesture(at)
    }

    pub fn on_mouse_up(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    // --- Queries ---

    /// Render-facing snapshot. A card flying out still counts as dragged so it
    /// keeps following its offset.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        DragState { is_dragging: !self.input.is_idle(), offset: self.offset, start_pos: self.start_pos }
    }

    /// Ticket of the pending exit animation, if any.
    #[must_use]
    pub fn pending_animation(&self) -> Option<AnimationTicket> {
        match self.input {
            InputState::Animating { ticket, .. } => Some(ticket),
            _ => None,
        }
    }
}

/// Callback receiving every committed swipe.
pub type SwipeHandler = Box<dyn FnMut(SwipeDirection) + Send>;

/// The full swipe engine. Wraps `SwipeCore` and owns the outcome handler and
/// the global mouse listeners.
pub struct SwipeEngine {
    pub core: SwipeCore,
    handler: Option<SwipeHandler>,
    listeners: Option<ListenerGuard>,
}

impl Default for SwipeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SwipeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeEngine")
            .field("core", &self.core)
            .field("has_handler", &self.handler.is_some())
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl SwipeEngine {
    /// Create an inactive engine with no outcome handler.
    #[must_use]
    pub fn new() -> Self {
        Self { core: SwipeCore::new(), handler: None, listeners: None }
    }

    /// Create an inactive engine delivering commits to `handler`.
    #[must_use]
    pub fn with_handler(handler: impl FnMut(SwipeDirection) + Send + 'static) -> Self {
        Self { core: SwipeCore::new(), handler: Some(Box::new(handler)), listeners: None }
    }

    pub fn set_handler(&mut self, handler: impl FnMut(SwipeDirection) + Send + 'static) {
        self.handler = Some(Box::new(handler));
    }

    pub fn clear_handler(&mut self) {
        self.handler = None;
    }

    // --- Lifetime ---

    /// Register the global mouse listeners on `registry`.
    ///
    /// Re-activating releases the previous registration first.
    pub fn activate(&mut self, registry: Arc<dyn ListenerRegistry>) {
        self.listeners = None;
        self.listeners = Some(ListenerGuard::acquire(registry));
    }

    /// Release the global listeners and drop any gesture in progress.
    pub fn deactivate(&mut self) -> Vec<Action> {
        self.listeners = None;
        self.core.cancel()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.listeners.is_some()
    }

    // --- Delegated input events ---

    pub fn on_touch_start(&mut self, touches: &[Point]) -> Vec<Action> {
        self.core.on_touch_start(touches)
    }

    pub fn on_touch_move(&mut self, touches: &[Point]) -> Vec<Action> {
        self.core.on_touch_move(touches)
    }

    pub fn on_touch_end(&mut self) -> Vec<Action> {
        self.core.on_touch_end()
    }

    pub fn on_mouse_down(&mut self, at: Point) -> Vec<Action> {
        self.core.on_mouse_down(at)
    }

    /// Global mouse-move; only delivered while the listeners are registered.
    pub fn on_mouse_move(&mut self, at: Point) -> Vec<Action> {
        if !self.is_active() {
            return Vec::new();
        }
        self.core.on_mouse_move(at)
    }

    /// Global mouse-up; only delivered while the listeners are registered.
    pub fn on_mouse_up(&mut self) -> Vec<Action> {
        if !self.is_active() {
            return Vec::new();
        }
        self.core.on_mouse_up()
    }

    pub fn swipe_left(&mut self) -> Vec<Action> {
        self.core.swipe(SwipeDirection::Left)
    }

    pub fn swipe_right(&mut self) -> Vec<Action> {
        self.core.swipe(SwipeDirection::Right)
    }

    /// Complete an exit animation and hand the outcome to the handler.
    pub fn finish_animation(&mut self, ticket: AnimationTicket) -> Vec<Action> {
        let actions = self.core.finish_animation(ticket);
        if let Some(handler) = self.handler.as_mut() {
            for action in &actions {
                if let Action::Committed(direction) = action {
                    handler(*direction);
                }
            }
        }
        actions
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.core.drag_state()
    }

    /// Style for the card `position` slots behind the active one.
    #[must_use]
    pub fn card_style(&self, position: i64) -> CardStyle {
        card_style(position, &self.core.drag_state())
    }
}
