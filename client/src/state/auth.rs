//! Auth session for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`Session`] is built at process start and shared behind an `Arc` by the
//! request guard, the HTTP adapter's callers, and every view that needs the
//! current user. It owns the persisted token, the cached user, and the
//! login/register progress flags views render from.
//!
//! DESIGN
//! ======
//! - The cached user is only observable while a non-expired token is stored.
//! - Mutations happen in short critical sections; the lock is never held
//!   across an await.
//! - Every eviction or token change bumps an epoch. An async fetch records the
//!   epoch it started under and drops its result if the epoch moved, so a slow
//!   user fetch cannot repopulate a session that was logged out meanwhile.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::net::api::AuthApi;
use crate::net::types::{LoginCredentials, RegisterData, User};
use crate::util::nav::{LOGIN_ROUTE, Navigator, redirect_if_elsewhere};
use crate::util::storage::{Storage, TOKEN_KEY, USER_KEY, load_json, save_json};
use crate::util::token::is_expired;

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed. Please try again.";

/// Render-facing snapshot of the session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// A login or registration call is in flight.
    pub loading: bool,
    /// Last user-facing failure message.
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct Inner {
    user: Option<User>,
    loading: bool,
    error: Option<String>,
    epoch: u64,
    fetching: bool,
}

pub struct Session {
    storage: Arc<dyn Storage>,
    navigator: Arc<dyn Navigator>,
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("inner", &*self.lock()).finish_non_exhaustive()
    }
}

impl Session {
    /// Restore the session from `storage`.
    ///
    /// An expired stored token is evicted together with the cached user. A
    /// cached user is only restored alongside a valid token.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, navigator: Arc<dyn Navigator>) -> Self {
        let user = match storage.get(TOKEN_KEY) {
            Some(token) if is_expired(&token) => {
                tracing::info!("stored token expired; starting logged out");
                storage.remove(TOKEN_KEY);
                storage.remove(USER_KEY);
                None
            }
            Some(_) => load_json::<User>(storage.as_ref(), USER_KEY),
            None => {
                storage.remove(USER_KEY);
                None
            }
        };
        Self { storage, navigator, inner: Mutex::new(Inner { user, ..Inner::default() }) }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Queries ---

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    /// A token is stored and has not expired.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|t| !is_expired(&t))
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.is_authenticated()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        if !self.is_authenticated() {
            return None;
        }
        self.lock().user.clone()
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        let user = self.current_user();
        let inner = self.lock();
        AuthState { user, loading: inner.loading, error: inner.error.clone() }
    }

    // --- Eviction & navigation ---

    /// Drop the stored token and cached user.
    pub fn evict(&self) {
        let mut inner = self.lock();
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        inner.user = None;
        inner.fetching = false;
        inner.epoch += 1;
        tracing::warn!(epoch = inner.epoch, "session evicted");
    }

    /// Redirect to `route` unless already there. Returns whether it moved.
    pub fn redirect_to(&self, route: &str) -> bool {
        redirect_if_elsewhere(self.navigator.as_ref(), route)
    }

    #[must_use]
    pub fn current_route(&self) -> String {
        self.navigator.current_route()
    }

    fn store_token(&self, token: &str) {
        let mut inner = self.lock();
        self.storage.set(TOKEN_KEY, token);
        self.storage.remove(USER_KEY);
        inner.user = None;
        inner.fetching = false;
        inner.epoch += 1;
    }

    fn begin_request(&self) {
        let mut inner = self.lock();
        inner.loading = true;
        inner.error = None;
    }

    fn finish_request(&self, error: Option<&str>) {
        let mut inner = self.lock();
        inner.loading = false;
        if let Some(message) = error {
            inner.error = Some(message.to_owned());
        }
    }

    // --- Operations ---

    /// Log in and eagerly load the user. Failures land in [`AuthState::error`].
    pub async fn login(&self, api: &dyn AuthApi, credentials: &LoginCredentials) -> bool {
        self.begin_request();
        match api.login(credentials).await {
            Ok(response) => {
                if let Some(token) = response.token.as_deref() {
                    self.store_token(token);
                }
                self.load_current_user(api).await;
                tracing::info!(username = %credentials.username, "logged in");
                self.finish_request(None);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "login failed");
                self.finish_request(Some(LOGIN_FAILED_MESSAGE));
                false
            }
        }
    }

    /// Register a new account. Any existing session is cleared first, and a
    /// successful registration does not log in.
    pub async fn register(&self, api: &dyn AuthApi, data: &RegisterData) -> bool {
        self.begin_request();
        self.evict();
        match api.register(data).await {
            Ok(user) => {
                tracing::info!(username = %user.username, "registered");
                self.finish_request(None);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "registration failed");
                self.finish_request(Some(REGISTER_FAILED_MESSAGE));
                false
            }
        }
    }

    /// Clear the session and go to the login route.
    pub fn logout(&self) {
        self.evict();
        self.navigator.redirect_to(LOGIN_ROUTE);
    }

    /// Fetch the current user unless unauthenticated, already cached, or
    /// already being fetched. A failed fetch clears the cached user.
    pub async fn load_current_user(&self, api: &dyn AuthApi) {
        let epoch = {
            let mut inner = self.lock();
            if inner.user.is_some() || inner.fetching || !self.is_authenticated() {
                return;
            }
            inner.fetching = true;
            inner.epoch
        };

        let result = api.current_user().await;

        let mut inner = self.lock();
        if inner.epoch != epoch || !self.is_authenticated() {
            tracing::debug!(started = epoch, current = inner.epoch, "discarding stale user fetch");
            if inner.epoch == epoch {
                inner.fetching = false;
            }
            return;
        }
        inner.fetching = false;
        match result {
            Ok(user) => {
                save_json(self.storage.as_ref(), USER_KEY, &user);
                inner.user = Some(user);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load current user");
                self.storage.remove(USER_KEY);
                inner.user = None;
            }
        }
    }
}
