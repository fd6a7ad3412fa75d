//! Long-lived client state.

pub mod auth;
pub mod deck;
pub mod discovery;
