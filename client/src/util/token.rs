//! Bearer token expiry detection.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session and the request guard both ask one question of a token: is it
//! still usable? Tokens are JWT-shaped (`header.payload.signature`); only the
//! payload's `exp` claim is read. Signatures are never verified here.
//!
//! Every decode failure answers "expired". A token this module cannot read is
//! a token the client should not send.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};

/// True when `token` is malformed, carries no numeric `exp`, or expired
/// before now.
#[must_use]
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, now_millis())
}

/// [`is_expired`] against an explicit clock, in Unix milliseconds.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn is_expired_at(token: &str, now_ms: u64) -> bool {
    match expiry_millis(token) {
        Some(expiry) => now_ms as f64 > expiry,
        None => true,
    }
}

/// Expiry instant of `token` in Unix milliseconds, if it can be decoded.
#[must_use]
pub fn expiry_millis(token: &str) -> Option<f64> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        return None;
    };
    let bytes = decode_segment(payload)?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?.as_f64()?;
    exp.is_finite().then_some(exp * 1000.0)
}

/// Current wall-clock time in Unix milliseconds.
#[must_use]
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

// Accepts both alphabets, with or without padding.
fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    let trimmed = segment.trim_end_matches('=');
    if trimmed.is_empty() {
        return None;
    }
    URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .ok()
}
