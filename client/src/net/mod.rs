//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the collaborator traits and the `reqwest` adapter, `guard`
//! enforces the session contract on every call, and `types` defines the wire
//! schema.

pub mod api;
pub mod error;
pub mod guard;
pub mod types;
