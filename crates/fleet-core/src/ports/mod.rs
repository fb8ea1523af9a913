//! Port definitions (trait abstractions) for storage backends.
//!
//! The store owns both entity collections and is the single source of truth
//! for concurrent readers. Two interchangeable implementations exist — a
//! durable one over Postgres and a volatile in-memory one — and both must
//! satisfy this contract identically; business logic never branches on the
//! backend kind.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Traits work with domain types directly
//! - Id allocation and timestamp stamping happen inside the store

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{Car, NewRental, Rental, RentalChanges, RentalWithCar};

/// Errors surfaced by store operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx
/// errors) and provides a clean interface for services to handle storage
/// failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The car is already held by an ongoing rental.
    #[error("Car unavailable: {0}")]
    CarUnavailable(String),

    /// A constraint was violated (e.g., foreign key).
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Storage backend error (connection, query, etc.).
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Point-in-time aggregate figures over the rentals collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalTotals {
    /// All rentals regardless of status.
    pub total_rentals: i64,
    /// Rentals with status `ongoing`.
    pub active_rentals: i64,
    /// Sum of `total_cost` over `ongoing` and `returned` rentals; cancelled
    /// rentals are excluded.
    pub total_revenue: Decimal,
}

/// Storage operations over the car fleet and its rentals.
///
/// Ordering guarantees: [`list_cars`](Self::list_cars) is id-ascending,
/// [`list_rentals`](Self::list_rentals) is creation-time descending (id
/// descending as tie-break).
#[async_trait]
pub trait FleetStore: Send + Sync {
    /// List all cars, ordered by id ascending.
    async fn list_cars(&self) -> Result<Vec<Car>, StoreError>;

    /// Get a single car by ID.
    async fn get_car(&self, id: i64) -> Result<Car, StoreError>;

    /// List all rentals joined with their car's descriptive fields, most
    /// recent first.
    async fn list_rentals(&self) -> Result<Vec<RentalWithCar>, StoreError>;

    /// Get a single rental by ID.
    async fn get_rental(&self, id: i64) -> Result<Rental, StoreError>;

    /// Persist a new rental with status `ongoing`.
    ///
    /// Allocates the next id and stamps both timestamps. The availability
    /// check and the flip to unavailable are ATOMIC with respect to other
    /// concurrent creates for the same car: of two simultaneous requests, at
    /// most one succeeds, the other fails with
    /// [`StoreError::CarUnavailable`].
    async fn create_rental(&self, rental: NewRental) -> Result<Rental, StoreError>;

    /// Apply a partial update to a rental and stamp `updated_at`.
    async fn update_rental(&self, id: i64, changes: RentalChanges) -> Result<Rental, StoreError>;

    /// Remove a rental record. Never touches car availability.
    async fn delete_rental(&self, id: i64) -> Result<(), StoreError>;

    /// Set a car's availability flag.
    async fn set_car_availability(&self, id: i64, available: bool) -> Result<(), StoreError>;

    /// Aggregate counts and revenue over the rentals collection.
    async fn rental_totals(&self) -> Result<RentalTotals, StoreError>;
}
