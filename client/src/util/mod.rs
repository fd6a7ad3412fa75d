//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate environment concerns (clock, storage, navigation)
//! from session and feed logic so both stay testable with in-memory stand-ins.

pub mod age;
pub mod auth;
pub mod nav;
pub mod storage;
pub mod token;
