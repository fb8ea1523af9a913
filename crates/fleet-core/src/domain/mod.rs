//! Domain types for the car fleet and its rental agreements.
//!
//! These types represent cars and rentals in the system, independent of any
//! infrastructure concerns (database, HTTP, etc.).

pub mod car;
pub mod rental;

pub use car::Car;
pub use rental::{
    CreateRental, NewRental, Rental, RentalChanges, RentalStatus, RentalWithCar, UpdateRental,
    validate_status,
};
