//! Swipe-card interaction engine for the discovery feed.
//!
//! This crate owns the full lifecycle of a swipeable card stack: translating
//! raw mouse and touch events into a horizontal drag, deciding whether a
//! released drag commits to a left/right swipe, sequencing the exit
//! animation, and deriving per-card styles for the stacked presentation. The
//! host is responsible only for wiring input events to the engine, running the
//! exit-animation timer, and acting on the committed [`input::SwipeDirection`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::SwipeEngine`] and testable [`engine::SwipeCore`] |
//! | [`input`] | Input event types, drag state, and the gesture state machine |
//! | [`style`] | Pure card-style derivation for the stacked presentation |
//! | [`stack`] | Candidate stack with a forward-only cursor |
//! | [`listeners`] | Scoped registration of the global mouse listeners |
//! | [`consts`] | Shared numeric constants (thresholds, durations, stack geometry) |

pub mod consts;
pub mod engine;
pub mod input;
pub mod listeners;
pub mod stack;
pub mod style;
