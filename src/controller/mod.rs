//! View-facing state machines.
//!
//! Each controller owns a [`tokio::sync::watch`] channel holding its current
//! state. Views subscribe to it; a view that went away simply stops
//! receiving, and publishing with nobody listening is fine.

pub mod detail;
pub mod search;

pub use detail::{DetailController, DetailState};
pub use search::{SearchController, SearchState};
