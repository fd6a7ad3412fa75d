use super::*;

fn token_with_payload(payload: &str) -> String {
    format!("eyJhbGciOiJIUzI1NiJ9.{}.c2ln", URL_SAFE_NO_PAD.encode(payload))
}

const NOW_MS: u64 = 1_700_000_000_000;

// =============================================================
// Malformed tokens
// =============================================================

#[test]
fn empty_token_is_expired() {
    assert!(is_expired_at("", NOW_MS));
}

#[test]
fn two_segments_is_expired() {
    assert!(is_expired_at("a.b", NOW_MS));
}

#[test]
fn four_segments_is_expired() {
    let token = format!("{}.extra", token_with_payload(r#"{"exp":9999999999}"#));
    assert!(is_expired_at(&token, NOW_MS));
}

#[test]
fn non_base64_payload_is_expired() {
    assert!(is_expired_at("head.%%%not-base64%%%.sig", NOW_MS));
}

#[test]
fn non_json_payload_is_expired() {
    let token = format!("h.{}.s", URL_SAFE_NO_PAD.encode("not json"));
    assert!(is_expired_at(&token, NOW_MS));
}

#[test]
fn missing_exp_is_expired() {
    assert!(is_expired_at(&token_with_payload(r#"{"sub":"mia"}"#), NOW_MS));
}

#[test]
fn non_numeric_exp_is_expired() {
    assert!(is_expired_at(&token_with_payload(r#"{"exp":"tomorrow"}"#), NOW_MS));
}

#[test]
fn empty_payload_segment_is_expired() {
    assert!(is_expired_at("h..s", NOW_MS));
}

// =============================================================
// Expiry comparison
// =============================================================

#[test]
fn far_future_exp_is_valid() {
    assert!(!is_expired_at(&token_with_payload(r#"{"exp":9999999999}"#), NOW_MS));
}

#[test]
fn zero_exp_is_expired() {
    assert!(is_expired_at(&token_with_payload(r#"{"exp":0}"#), NOW_MS));
}

#[test]
fn past_exp_is_expired() {
    let exp = NOW_MS / 1000 - 1;
    assert!(is_expired_at(&token_with_payload(&format!(r#"{{"exp":{exp}}}"#)), NOW_MS));
}

#[test]
fn exact_expiry_instant_is_still_valid() {
    let exp = NOW_MS / 1000;
    let token = token_with_payload(&format!(r#"{{"exp":{exp}}}"#));
    assert!(!is_expired_at(&token, NOW_MS));
    assert!(is_expired_at(&token, NOW_MS + 1));
}

#[test]
fn expiry_is_reported_in_millis() {
    let token = token_with_payload(r#"{"exp":1700000000}"#);
    assert_eq!(expiry_millis(&token), Some(1_700_000_000_000.0));
}

// =============================================================
// Alphabets and padding
// =============================================================

#[test]
fn padded_standard_alphabet_is_accepted() {
    let payload = base64::engine::general_purpose::STANDARD.encode(r#"{"exp":9999999999,"n":"~~~"}"#);
    assert!(payload.contains('=') || payload.contains('+') || payload.contains('/'));
    assert!(!is_expired_at(&format!("h.{payload}.s"), NOW_MS));
}

#[test]
fn url_safe_alphabet_is_accepted() {
    let payload = URL_SAFE_NO_PAD.encode(r#"{"exp":9999999999,"n":"~~~?"}"#);
    assert!(!is_expired_at(&format!("h.{payload}.s"), NOW_MS));
}

#[test]
fn wall_clock_check_matches_explicit_clock() {
    assert!(!is_expired(&token_with_payload(r#"{"exp":9999999999}"#)));
    assert!(is_expired(&token_with_payload(r#"{"exp":0}"#)));
}
