//! Deck driver: one swipe engine bound to one discovery feed.
//!
//! SYSTEM CONTEXT
//! ==============
//! The engine owns no timer and performs no I/O. The deck is the host side:
//! it runs the exit animation on the async runtime's clock, hands the ticket
//! back to the engine, and applies every committed direction to the feed.

#[cfg(test)]
#[path = "deck_test.rs"]
mod deck_test;

use std::sync::{Arc, Mutex, PoisonError};

use swipe::engine::{Action, SwipeEngine};
use swipe::input::{Point, SwipeDirection};
use swipe::listeners::ListenerRegistry;
use swipe::style::CardStyle;

use super::discovery::{DiscoveryState, SwipeResult};
use crate::net::api::DiscoveryApi;
use crate::net::types::ProfileResponse;

#[derive(Debug)]
pub struct Deck {
    engine: SwipeEngine,
    discovery: DiscoveryState,
    outcomes: Arc<Mutex<Vec<SwipeDirection>>>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(DiscoveryState::new())
    }
}

impl Deck {
    #[must_use]
    pub fn new(discovery: DiscoveryState) -> Self {
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let sink = outcomes.clone();
        let engine = SwipeEngine::with_handler(move |direction| {
            sink.lock().unwrap_or_else(PoisonError::into_inner).push(direction);
        });
        Self { engine, discovery, outcomes }
    }

    // --- Lifetime ---

    /// Register the engine's global mouse listeners on `registry`.
    pub fn activate(&mut self, registry: Arc<dyn ListenerRegistry>) {
        self.engine.activate(registry);
    }

    /// Release the listeners and drop any gesture in progress.
    pub fn deactivate(&mut self) {
        self.engine.deactivate();
    }

    /// Fetch a fresh batch. The engine is reset first so no stale drag
    /// carries over onto the new front card.
    pub async fn load(&mut self, api: &dyn DiscoveryApi) -> bool {
        self.engine.core.cancel();
        self.discovery.load(api).await
    }

    // --- Input ---

    /// Programmatic swipe, as from a like/pass button.
    pub async fn swipe(&mut self, direction: SwipeDirection, api: &dyn DiscoveryApi) -> Vec<SwipeResult> {
        if !self.discovery.has_more() {
            return vec![SwipeResult::Exhausted];
        }
        let actions = match direction {
            SwipeDirection::Left => self.engine.swipe_left(),
            SwipeDirection::Right => self.engine.swipe_right(),
        };
        self.settle(actions, api).await
    }

    /// A full mouse drag of `dx` pixels from the card's origin.
    ///
    /// Move and release travel through the global listeners, so an inactive
    /// deck only registers the press.
    pub async fn drag(&mut self, dx: f64, api: &dyn DiscoveryApi) -> Vec<SwipeResult> {
        if !self.discovery.has_more() {
            return vec![SwipeResult::Exhausted];
        }
        let mut actions = self.engine.on_mouse_down(Point::zero());
        actions.extend(self.engine.on_mouse_move(Point::new(dx, 0.0)));
        actions.extend(self.engine.on_mouse_up());
        self.settle(actions, api).await
    }

    /// Run the host side of `actions`: wait out each exit animation, finish it
    /// by ticket, and apply the committed outcome to the feed.
    pub async fn settle(&mut self, actions: Vec<Action>, api: &dyn DiscoveryApi) -> Vec<SwipeResult> {
        let mut results = Vec::new();
        for action in actions {
            let Action::AnimateOut { ticket, duration, .. } = action else {
                continue;
            };
            tokio::time::sleep(duration).await;
            self.engine.finish_animation(ticket);

            let committed = std::mem::take(&mut *self.outcomes.lock().unwrap_or_else(PoisonError::into_inner));
            for direction in committed {
                results.push(self.discovery.apply_swipe(api, direction).await);
            }
        }
        results
    }

    // --- Queries ---

    /// Visible cards with their styles, front card first.
    #[must_use]
    pub fn card_styles(&self) -> Vec<(&ProfileResponse, CardStyle)> {
        let mut visible: Vec<_> = self
            .discovery
            .stack()
            .styled(self.engine.drag_state())
            .filter(|(_, style)| !style.is_hidden())
            .collect();
        visible.sort_by_key(|(_, style)| std::cmp::Reverse(style.z_index));
        visible
    }

    #[must_use]
    pub fn engine(&self) -> &SwipeEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SwipeEngine {
        &mut self.engine
    }

    #[must_use]
    pub fn discovery(&self) -> &DiscoveryState {
        &self.discovery
    }
}
