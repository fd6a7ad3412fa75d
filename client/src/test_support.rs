//! In-memory collaborators shared by the unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use tokio::sync::Notify;

use crate::net::api::{AuthApi, DiscoveryApi};
use crate::net::error::ApiError;
use crate::net::types::{LoginCredentials, LoginResponse, MatchResponse, ProfileResponse, RegisterData, User};
use crate::state::auth::Session;
use crate::util::nav::{HOME_ROUTE, MemoryNavigator};
use crate::util::storage::MemoryStorage;

pub const FAR_FUTURE_EXP: u64 = 9_999_999_999;

/// Unsigned JWT-shaped token with the given `exp` claim.
pub fn make_token(exp: u64) -> String {
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"test","exp":{exp}}}"#));
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.c2lnbmF0dXJl")
}

pub fn valid_token() -> String {
    make_token(FAR_FUTURE_EXP)
}

pub fn expired_token() -> String {
    make_token(1)
}

pub fn user(id: i64, username: &str) -> User {
    User { id, username: username.to_owned(), profile: None }
}

pub fn profile(id: i64, vorname: &str) -> ProfileResponse {
    ProfileResponse { id, vorname: Some(vorname.to_owned()), ..ProfileResponse::default() }
}

pub struct Harness {
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<MemoryNavigator>,
    pub session: Arc<Session>,
}

/// Session over fresh in-memory collaborators, navigator at `/app`.
pub fn harness() -> Harness {
    harness_with(MemoryStorage::new())
}

pub fn harness_with(storage: MemoryStorage) -> Harness {
    let storage = Arc::new(storage);
    let navigator = Arc::new(MemoryNavigator::at(HOME_ROUTE));
    let session = Arc::new(Session::new(storage.clone(), navigator.clone()));
    Harness { storage, navigator, session }
}

// =============================================================================
// AUTH
// =============================================================================

#[derive(Default)]
pub struct FakeAuthApi {
    pub login_result: Mutex<Option<Result<LoginResponse, ApiError>>>,
    pub register_result: Mutex<Option<Result<User, ApiError>>>,
    pub user_result: Mutex<Option<Result<User, ApiError>>>,
    pub login_calls: AtomicUsize,
    pub register_calls: AtomicUsize,
    pub user_calls: AtomicUsize,
    /// When set, `current_user` signals `entered` and waits on `release`.
    pub gate: Option<Gate>,
}

pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

impl FakeAuthApi {
    pub fn logging_in_as(token: String, user: User) -> Self {
        let api = Self::default();
        *api.login_result.lock().unwrap() = Some(Ok(LoginResponse { token: Some(token) }));
        *api.user_result.lock().unwrap() = Some(Ok(user));
        api
    }

    pub fn returning_user(user: User) -> Self {
        let api = Self::default();
        *api.user_result.lock().unwrap() = Some(Ok(user));
        api
    }

    pub fn gated(mut self) -> Self {
        self.gate = Some(Gate { entered: Notify::new(), release: Notify::new() });
        self
    }

    pub fn user_calls(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst)
    }
}

fn take_or<T: Clone>(slot: &Mutex<Option<Result<T, ApiError>>>) -> Result<T, ApiError> {
    slot.lock()
        .unwrap()
        .clone()
        .unwrap_or_else(|| Err(ApiError::Status { status: 500, body: "unscripted".to_owned() }))
}

#[async_trait::async_trait]
impl AuthApi for FakeAuthApi {
    async fn login(&self, _credentials: &LoginCredentials) -> Result<LoginResponse, ApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        take_or(&self.login_result)
    }

    async fn register(&self, _data: &RegisterData) -> Result<User, ApiError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        take_or(&self.register_result)
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        take_or(&self.user_result)
    }
}

// =============================================================================
// DISCOVERY
// =============================================================================

#[derive(Default)]
pub struct FakeDiscoveryApi {
    /// Each fetch pops the next scripted batch; an empty script fails.
    pub batches: Mutex<VecDeque<Result<Vec<ProfileResponse>, ApiError>>>,
    pub like_result: Mutex<Option<Result<MatchResponse, ApiError>>>,
    pub likes: Mutex<Vec<i64>>,
    pub fetch_calls: AtomicUsize,
}

impl FakeDiscoveryApi {
    pub fn with_batch(batch: Vec<ProfileResponse>) -> Self {
        let api = Self::default();
        api.push_batch(Ok(batch));
        *api.like_result.lock().unwrap() = Some(Ok(MatchResponse::default()));
        api
    }

    pub fn push_batch(&self, batch: Result<Vec<ProfileResponse>, ApiError>) {
        self.batches.lock().unwrap().push_back(batch);
    }

    pub fn set_like_result(&self, result: Result<MatchResponse, ApiError>) {
        *self.like_result.lock().unwrap() = Some(result);
    }

    pub fn likes(&self) -> Vec<i64> {
        self.likes.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DiscoveryApi for FakeDiscoveryApi {
    async fn fetch_candidates(&self) -> Result<Vec<ProfileResponse>, ApiError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Request("connection refused".to_owned())))
    }

    async fn like(&self, candidate_id: i64) -> Result<MatchResponse, ApiError> {
        self.likes.lock().unwrap().push(candidate_id);
        take_or(&self.like_result)
    }
}
