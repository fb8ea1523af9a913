//! Data Transfer Objects for the HTTP API contract.
//!
//! Responses whose shape is narrower than the domain types get an explicit
//! DTO; everything else serializes the domain type directly.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use fleet_core::domain::{Rental, RentalStatus};

/// Body of a successful rental update: just the fields the update touched.
#[derive(Debug, Serialize)]
pub struct RentalUpdated {
    pub id: i64,
    pub status: RentalStatus,
    pub end_date: NaiveDate,
    pub total_cost: Decimal,
}

impl From<Rental> for RentalUpdated {
    fn from(rental: Rental) -> Self {
        Self {
            id: rental.id,
            status: rental.status,
            end_date: rental.end_date,
            total_cost: rental.total_cost,
        }
    }
}

/// Body of a successful rental deletion.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub message: String,
}

/// Health probe response.
#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}
