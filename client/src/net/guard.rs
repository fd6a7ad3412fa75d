//! Request/response interception enforcing the session contract.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every call the HTTP adapter makes passes through [`SessionGuard`]:
//! `attach_auth` before the request is sent and `on_response` /
//! `on_response_error` once it resolves.
//!
//! DESIGN
//! ======
//! - Paths containing `/auth/` are login and registration; they skip the
//!   expiry check and carry no bearer header.
//! - A missing or expired token evicts the session before anything is sent.
//!   The request is aborted with [`ApiError::TokenExpired`] and never reaches
//!   the network.
//! - A 403 from the server evicts the session the same way. The error is
//!   still returned to the caller.
//! - Redirects go to the login route and are skipped when already there.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;

use super::error::ApiError;
use crate::state::auth::Session;
use crate::util::nav::LOGIN_ROUTE;
use crate::util::token::is_expired;

pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// A request as seen by the guard, before it is handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), body: None, headers: Vec::new() }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_owned(), value.into()));
        self
    }

    /// First header named `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Login and registration live under `/auth/`.
#[must_use]
pub fn is_auth_endpoint(path: &str) -> bool {
    path.contains("/auth/")
}

#[derive(Debug, Clone)]
pub struct SessionGuard {
    session: Arc<Session>,
}

impl SessionGuard {
    #[must_use]
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Prepare `request` for sending.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::TokenExpired`] when the stored token is missing or
    /// has expired.
    /// The session is evicted and the caller redirected before returning.
    pub fn attach_auth(&self, request: ApiRequest) -> Result<ApiRequest, ApiError> {
        if is_auth_endpoint(&request.path) {
            return Ok(request);
        }
        match self.session.token() {
            Some(token) if !is_expired(&token) => {
                Ok(request.with_header(AUTHORIZATION_HEADER, format!("Bearer {token}")))
            }
            _ => {
                tracing::warn!(path = %request.path, "token missing or expired; aborting request");
                self.session.evict();
                self.session.redirect_to(LOGIN_ROUTE);
                Err(ApiError::TokenExpired)
            }
        }
    }

    /// Successful responses pass through untouched.
    pub fn on_response<T>(&self, response: T) -> T {
        response
    }

    /// Inspect a failed response. A 403 evicts the session and redirects to
    /// login; the error itself is always handed back.
    #[must_use]
    pub fn on_response_error(&self, error: ApiError) -> ApiError {
        if error.is_forbidden() {
            tracing::warn!("token expired or rejected; evicting session");
            self.session.evict();
            self.session.redirect_to(LOGIN_ROUTE);
        }
        error
    }
}
