//! Discovery feed consumer around the candidate stack.
//!
//! SYSTEM CONTEXT
//! ==============
//! Holds the current batch of candidate profiles and turns committed swipes
//! into backend calls: a right swipe likes the active candidate, a left swipe
//! passes locally. Either way the cursor moves on.

#[cfg(test)]
#[path = "discovery_test.rs"]
mod discovery_test;

use swipe::input::SwipeDirection;
use swipe::stack::CandidateStack;

use crate::net::api::DiscoveryApi;
use crate::net::types::{MatchResponse, ProfileResponse};

pub const LOAD_FAILED_MESSAGE: &str = "Could not load profiles.";

/// What a committed swipe did to the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwipeResult {
    /// Liked the candidate. `response` is `None` when the like call failed.
    Liked { candidate_id: i64, response: Option<MatchResponse> },
    Passed { candidate_id: i64 },
    /// No active candidate was left to swipe.
    Exhausted,
}

#[derive(Debug, Default)]
pub struct DiscoveryState {
    stack: CandidateStack<ProfileResponse>,
    loading: bool,
    error: Option<String>,
}

impl DiscoveryState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a fresh batch, replacing the stack and rewinding the cursor.
    ///
    /// On failure the previous batch stays and [`LOAD_FAILED_MESSAGE`] is
    /// recorded. Returns whether a batch was loaded.
    pub async fn load(&mut self, api: &dyn DiscoveryApi) -> bool {
        self.loading = true;
        self.error = None;
        let loaded = match api.fetch_candidates().await {
            Ok(batch) => {
                tracing::info!(count = batch.len(), "loaded discovery batch");
                self.stack.replace_batch(batch);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load discovery batch");
                self.error = Some(LOAD_FAILED_MESSAGE.to_owned());
                false
            }
        };
        self.loading = false;
        loaded
    }

    #[must_use]
    pub fn current(&self) -> Option<&ProfileResponse> {
        self.stack.current()
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.stack.has_more()
    }

    /// Advance while cards remain.
    pub fn next_card(&mut self) -> bool {
        self.stack.advance()
    }

    /// Like `candidate_id`. Failures are logged and yield `None`.
    pub async fn handle_like(&self, api: &dyn DiscoveryApi, candidate_id: i64) -> Option<MatchResponse> {
        match api.like(candidate_id).await {
            Ok(response) => {
                if response.is_match {
                    tracing::info!(candidate_id, "it's a match");
                }
                Some(response)
            }
            Err(e) => {
                tracing::error!(candidate_id, error = %e, "failed to like candidate");
                None
            }
        }
    }

    /// Apply a committed swipe to the active candidate and advance.
    pub async fn apply_swipe(&mut self, api: &dyn DiscoveryApi, direction: SwipeDirection) -> SwipeResult {
        let Some(candidate_id) = self.current().map(|p| p.id) else {
            return SwipeResult::Exhausted;
        };
        let result = match direction {
            SwipeDirection::Right => {
                let response = self.handle_like(api, candidate_id).await;
                SwipeResult::Liked { candidate_id, response }
            }
            SwipeDirection::Left => SwipeResult::Passed { candidate_id },
        };
        self.next_card();
        result
    }

    #[must_use]
    pub fn stack(&self) -> &CandidateStack<ProfileResponse> {
        &self.stack
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
