//! Shared application state type.

use std::sync::Arc;

use crate::bootstrap::AxumContext;

/// Application state shared across all handlers: an Arc-wrapped
/// [`AxumContext`] holding the services.
pub type AppState = Arc<AxumContext>;
