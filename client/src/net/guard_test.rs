use super::*;
use crate::test_support::*;
use crate::util::storage::{Storage, TOKEN_KEY, USER_KEY};

fn guard_for(h: &Harness) -> SessionGuard {
    SessionGuard::new(h.session.clone())
}

fn forbidden() -> ApiError {
    ApiError::Status { status: 403, body: "Forbidden".to_owned() }
}

// =============================================================
// ApiRequest
// =============================================================

#[test]
fn request_builders_set_method_path_and_body() {
    let req = ApiRequest::post("/api/auth/login").with_json(serde_json::json!({ "username": "mia" }));
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/api/auth/login");
    assert_eq!(req.body.unwrap()["username"], "mia");
}

#[test]
fn header_lookup_is_case_insensitive() {
    let req = ApiRequest::get("/api/matches").with_header("X-Trace", "abc");
    assert_eq!(req.header("x-trace"), Some("abc"));
    assert_eq!(req.header("missing"), None);
}

#[test]
fn auth_endpoints_are_detected_by_path() {
    assert!(is_auth_endpoint("/api/auth/login"));
    assert!(is_auth_endpoint("/api/auth/register"));
    assert!(!is_auth_endpoint("/api/users/me"));
    assert!(!is_auth_endpoint("/api/authors"));
}

// =============================================================
// attach_auth
// =============================================================

#[test]
fn valid_token_is_attached_as_bearer() {
    let h = harness();
    let token = valid_token();
    h.storage.set(TOKEN_KEY, &token);

    let req = guard_for(&h).attach_auth(ApiRequest::get("/api/profiles/discover")).unwrap();

    let expected = format!("Bearer {token}");
    assert_eq!(req.header(AUTHORIZATION_HEADER), Some(expected.as_str()));
    assert!(h.navigator.redirects().is_empty());
}

#[test]
fn missing_token_aborts_and_redirects() {
    let h = harness();
    h.storage.set(USER_KEY, r#"{"id":1,"username":"mia"}"#);

    let err = guard_for(&h).attach_auth(ApiRequest::get("/api/profiles/discover")).unwrap_err();

    assert_eq!(err, ApiError::TokenExpired);
    assert!(h.storage.get(USER_KEY).is_none());
    assert_eq!(h.navigator.redirects(), vec![LOGIN_ROUTE.to_owned()]);
}

#[test]
fn missing_token_on_login_route_skips_redirect() {
    let h = harness();
    h.navigator.visit(LOGIN_ROUTE);

    let err = guard_for(&h).attach_auth(ApiRequest::get("/api/matches")).unwrap_err();

    assert_eq!(err, ApiError::TokenExpired);
    assert!(h.navigator.redirects().is_empty());
}

#[test]
fn expired_token_aborts_evicts_and_redirects() {
    let h = harness();
    h.storage.set(TOKEN_KEY, &expired_token());
    h.storage.set(USER_KEY, r#"{"id":1,"username":"mia"}"#);

    let err = guard_for(&h).attach_auth(ApiRequest::get("/api/likes")).unwrap_err();

    assert_eq!(err, ApiError::TokenExpired);
    assert!(h.storage.get(TOKEN_KEY).is_none());
    assert!(h.storage.get(USER_KEY).is_none());
    assert_eq!(h.navigator.redirects(), vec![LOGIN_ROUTE.to_owned()]);
}

#[test]
fn malformed_token_counts_as_expired() {
    let h = harness();
    h.storage.set(TOKEN_KEY, "a.b");
    let err = guard_for(&h).attach_auth(ApiRequest::get("/api/matches")).unwrap_err();
    assert_eq!(err, ApiError::TokenExpired);
}

#[test]
fn expired_token_on_login_route_skips_redirect() {
    let h = harness();
    h.navigator.visit(LOGIN_ROUTE);
    h.storage.set(TOKEN_KEY, &expired_token());

    assert!(guard_for(&h).attach_auth(ApiRequest::get("/api/users/me")).is_err());
    assert!(h.storage.get(TOKEN_KEY).is_none());
    assert!(h.navigator.redirects().is_empty());
}

#[test]
fn auth_endpoints_bypass_expiry_check() {
    let h = harness();
    let token = expired_token();
    h.storage.set(TOKEN_KEY, &token);

    let req = guard_for(&h).attach_auth(ApiRequest::post("/api/auth/login")).unwrap();

    assert_eq!(req.header(AUTHORIZATION_HEADER), None);
    assert_eq!(h.storage.get(TOKEN_KEY), Some(token));
    assert!(h.navigator.redirects().is_empty());
}

// =============================================================
// Responses
// =============================================================

#[test]
fn successful_response_passes_through() {
    let h = harness();
    let value = guard_for(&h).on_response(vec![1, 2, 3]);
    assert_eq!(value, vec![1, 2, 3]);
}

#[test]
fn forbidden_evicts_and_redirects_then_only_evicts_on_login() {
    let h = harness();
    let guard = guard_for(&h);
    h.storage.set(TOKEN_KEY, &valid_token());
    h.storage.set(USER_KEY, r#"{"id":1,"username":"mia"}"#);

    let err = guard.on_response_error(forbidden());
    assert_eq!(err.status(), Some(403));
    assert!(h.storage.get(TOKEN_KEY).is_none());
    assert!(h.storage.get(USER_KEY).is_none());
    assert_eq!(h.navigator.redirects(), vec![LOGIN_ROUTE.to_owned()]);

    h.storage.set(TOKEN_KEY, &valid_token());
    let _ = guard.on_response_error(forbidden());
    assert!(h.storage.get(TOKEN_KEY).is_none());
    assert_eq!(h.navigator.redirects().len(), 1);
}

#[test]
fn other_errors_pass_through_untouched() {
    let h = harness();
    h.storage.set(TOKEN_KEY, &valid_token());
    let guard = guard_for(&h);

    for err in [
        ApiError::Status { status: 401, body: String::new() },
        ApiError::Status { status: 500, body: "boom".to_owned() },
        ApiError::Request("timeout".to_owned()),
    ] {
        assert_eq!(guard.on_response_error(err.clone()), err);
    }
    assert!(h.storage.get(TOKEN_KEY).is_some());
    assert!(h.navigator.redirects().is_empty());
}
