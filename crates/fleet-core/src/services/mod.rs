//! Services orchestrating the rental lifecycle and derived metrics.

pub mod metrics;
pub mod rentals;

use thiserror::Error;

use crate::ports::StoreError;

pub use metrics::{
    MetricsService, MetricsSnapshot, RentalCounters, RequestCounters, RevenueFigures,
};
pub use rentals::RentalService;

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain. Adapters
/// map it to their own error types (HTTP status codes, exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Missing or malformed input, including invalid date ranges.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown car or rental id.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The car is not available for rental.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal error (unexpected condition). The detail is for operator
    /// logs only and must not leak to clients.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => Self::NotFound(msg),
            StoreError::CarUnavailable(msg) => Self::Conflict(msg),
            StoreError::Constraint(msg) | StoreError::Storage(msg) => Self::Internal(msg),
        }
    }
}
