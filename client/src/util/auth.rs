//! Shared auth gating helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every authenticated view applies the same rule: once auth has settled and
//! no user is present, go to the login route.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::auth::{AuthState, Session};
use crate::util::nav::LOGIN_ROUTE;

/// Redirect is due once auth is not loading and no user is present.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Apply the unauthenticated redirect to `session`.
///
/// Returns whether the view may proceed, i.e. a user is present.
pub fn enforce_login(session: &Session) -> bool {
    if should_redirect_unauth(&session.state()) {
        session.redirect_to(LOGIN_ROUTE);
        return false;
    }
    true
}
