//! Core domain types, port definitions and services for the fleet rental
//! service.
//!
//! This crate is infrastructure-free: no database or HTTP types appear in
//! any signature. Storage backends implement the [`ports::FleetStore`] trait
//! and adapters drive the [`services`] on top of it.

pub mod dates;
pub mod domain;
pub mod money;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    Car, CreateRental, NewRental, Rental, RentalChanges, RentalStatus, RentalWithCar, UpdateRental,
    validate_status,
};
pub use ports::{FleetStore, RentalTotals, StoreError};
pub use services::{
    CoreError, MetricsService, MetricsSnapshot, RentalCounters, RentalService, RequestCounters,
    RevenueFigures,
};
