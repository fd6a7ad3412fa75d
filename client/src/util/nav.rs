//! Navigation collaborator used by the login-redirect policy.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use std::sync::{Mutex, PoisonError};

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/app";

pub trait Navigator: Send + Sync {
    fn current_route(&self) -> String;
    fn redirect_to(&self, route: &str);
}

/// Redirect to `route` unless the navigator is already there.
///
/// Returns whether a redirect was issued.
pub fn redirect_if_elsewhere(navigator: &dyn Navigator, route: &str) -> bool {
    if navigator.current_route() == route {
        return false;
    }
    tracing::debug!(route, "redirecting");
    navigator.redirect_to(route);
    true
}

/// Navigator that only records where it was sent.
#[derive(Debug)]
pub struct MemoryNavigator {
    route: Mutex<String>,
    redirects: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    #[must_use]
    pub fn at(route: &str) -> Self {
        Self { route: Mutex::new(route.to_owned()), redirects: Mutex::new(Vec::new()) }
    }

    /// Every `redirect_to` call, oldest first.
    #[must_use]
    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Move without recording a redirect, as a user following a link would.
    pub fn visit(&self, route: &str) {
        *self.route.lock().unwrap_or_else(PoisonError::into_inner) = route.to_owned();
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::at(HOME_ROUTE)
    }
}

impl Navigator for MemoryNavigator {
    fn current_route(&self) -> String {
        self.route.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn redirect_to(&self, route: &str) {
        self.redirects.lock().unwrap_or_else(PoisonError::into_inner).push(route.to_owned());
        self.visit(route);
    }
}
