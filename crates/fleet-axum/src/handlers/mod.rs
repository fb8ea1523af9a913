//! HTTP request handlers for the Axum web server.
//!
//! Each submodule contains handlers for a specific API area. Handlers are
//! thin wrappers that delegate to the services on [`crate::state::AppState`].

pub mod cars;
pub mod metrics;
pub mod rentals;
