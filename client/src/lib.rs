//! Client core for the CampusMatch discovery app.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything between the swipe engine and the backend lives here: the auth
//! session and its request guard, the REST collaborators and their HTTP
//! implementation, the discovery feed, and the deck driver that runs swipe
//! animations on the async runtime.
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Environment-driven client configuration |
//! | [`net`] | Wire types, API errors, the session guard, and the HTTP adapter |
//! | [`state`] | Auth session, discovery feed, and deck driver |
//! | [`util`] | Token expiry, storage, navigation, and display helpers |

pub mod config;
pub mod net;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;
