//! Axum web adapter for the fleet rental service.
//!
//! Translates HTTP requests into service calls and maps core errors onto
//! status codes. All wiring happens in [`bootstrap`]; handlers are thin.

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types for convenient access
pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, StoreConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
