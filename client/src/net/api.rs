//! REST API collaborators and their HTTP implementation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session and the discovery consumer talk to the backend only through
//! the [`AuthApi`] and [`DiscoveryApi`] traits, so tests swap in in-memory
//! fakes. [`HttpApi`] implements both over `reqwest` and routes every call
//! through the [`SessionGuard`].
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, non-2xx statuses, and undecodable bodies all surface
//! as [`ApiError`]. The adapter itself never retries and never logs; callers
//! decide what a failure means for their view.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::json;

use super::error::ApiError;
use super::guard::{ApiRequest, SessionGuard};
use super::types::{
    Like, LoginCredentials, LoginResponse, Match, MatchResponse, OnboardingStatus, ProfileResponse, RegisterData, User,
};
use crate::config::ClientConfig;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const CURRENT_USER_PATH: &str = "/api/users/me";
pub const DISCOVER_PATH: &str = "/api/profiles/discover";
pub const LIKES_PATH: &str = "/api/likes";
pub const LIKES_RECEIVED_PATH: &str = "/api/likes/received";
pub const MATCHES_PATH: &str = "/api/matches";
pub const MY_PROFILE_PATH: &str = "/api/profiles/me";
pub const ONBOARDING_STATUS_PATH: &str = "/api/profiles/onboarding/status";

/// Authentication endpoints used by the session.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, ApiError>;
    async fn register(&self, data: &RegisterData) -> Result<User, ApiError>;
    async fn current_user(&self) -> Result<User, ApiError>;
}

/// Candidate feed and likes used by the discovery consumer.
#[async_trait::async_trait]
pub trait DiscoveryApi: Send + Sync {
    async fn fetch_candidates(&self) -> Result<Vec<ProfileResponse>, ApiError>;
    async fn like(&self, candidate_id: i64) -> Result<MatchResponse, ApiError>;
}

fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn like_endpoint(candidate_id: i64) -> String {
    format!("{LIKES_PATH}/{candidate_id}")
}

fn register_body(data: &RegisterData) -> serde_json::Value {
    json!({
        "username": data.username,
        "password": data.password,
        "role": data.role_or_default(),
    })
}

/// Decode a success body. An empty body decodes as JSON `null`.
fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(Debug, Clone)]
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
    guard: SessionGuard,
}

impl HttpApi {
    /// Build an adapter for `config.api_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, guard: SessionGuard) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.api_url.clone(), guard })
    }

    #[must_use]
    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let request = self.guard.attach_auth(request)?;
        match self.execute(request).await {
            Ok(value) => Ok(self.guard.on_response(value)),
            Err(e) => Err(self.guard.on_response_error(e)),
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let url = endpoint_url(&self.base_url, &request.path);
        let mut builder = self.http.request(request.method, url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| ApiError::Request(e.to_string()))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), body: text });
        }
        parse_body(&text)
    }

    // --- Read-only views outside the swipe core ---

    /// Likes the current user has sent.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request.
    pub async fn likes_sent(&self) -> Result<Vec<Like>, ApiError> {
        self.send(ApiRequest::get(LIKES_PATH)).await
    }

    /// Likes other users have sent to the current user.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request.
    pub async fn likes_received(&self) -> Result<Vec<Like>, ApiError> {
        self.send(ApiRequest::get(LIKES_RECEIVED_PATH)).await
    }

    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request.
    pub async fn matches(&self) -> Result<Vec<Match>, ApiError> {
        self.send(ApiRequest::get(MATCHES_PATH)).await
    }

    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request.
    pub async fn my_profile(&self) -> Result<ProfileResponse, ApiError> {
        self.send(ApiRequest::get(MY_PROFILE_PATH)).await
    }

    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request.
    pub async fn onboarding_status(&self) -> Result<OnboardingStatus, ApiError> {
        self.send(ApiRequest::get(ONBOARDING_STATUS_PATH)).await
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, ApiError> {
        let body = serde_json::to_value(credentials).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(ApiRequest::post(LOGIN_PATH).with_json(body)).await
    }

    async fn register(&self, data: &RegisterData) -> Result<User, ApiError> {
        self.send(ApiRequest::post(REGISTER_PATH).with_json(register_body(data))).await
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.send(ApiRequest::get(CURRENT_USER_PATH)).await
    }
}

#[async_trait::async_trait]
impl DiscoveryApi for HttpApi {
    async fn fetch_candidates(&self) -> Result<Vec<ProfileResponse>, ApiError> {
        self.send(ApiRequest::get(DISCOVER_PATH)).await
    }

    async fn like(&self, candidate_id: i64) -> Result<MatchResponse, ApiError> {
        self.send(ApiRequest::post(like_endpoint(candidate_id))).await
    }
}
