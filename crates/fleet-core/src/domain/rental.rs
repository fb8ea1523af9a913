//! Rental domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::services::CoreError;

/// Lifecycle state of a rental.
///
/// The only transitions are `Ongoing -> Returned` and `Ongoing -> Cancelled`;
/// both target states are terminal. Reaching `Returned` releases the car,
/// reaching `Cancelled` does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    /// The rental is active and holds its car unavailable.
    Ongoing,
    /// The car came back; the rental is closed and the car released.
    Returned,
    /// The rental was called off. The car is NOT released.
    Cancelled,
}

impl RentalStatus {
    /// Parse a status from its wire representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ongoing" => Some(Self::Ongoing),
            "returned" => Some(Self::Returned),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Wire representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ongoing => "ongoing",
            Self::Returned => "returned",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Validate a status string.
pub fn validate_status(status: &str) -> Result<RentalStatus, CoreError> {
    RentalStatus::parse(status)
        .ok_or_else(|| CoreError::Validation(format!("Invalid rental status: {status}")))
}

/// A rental agreement that exists in the store with an assigned ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    /// Store-assigned ID.
    pub id: i64,
    /// The rented car.
    pub car_id: i64,
    /// Who rented it.
    pub renter_name: String,
    /// First rental day (inclusive).
    pub start_date: NaiveDate,
    /// Last rental day (inclusive, `>= start_date`).
    pub end_date: NaiveDate,
    /// `daily_rate(car) * inclusive_days(start, end)`, half-up rounded to
    /// the cent. Recomputed on every date change, never allowed to drift.
    pub total_cost: Decimal,
    /// Lifecycle state.
    pub status: RentalStatus,
    /// Set once when the rental is created.
    pub created_at: DateTime<Utc>,
    /// Stamped on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// A rental joined with the descriptive fields of its car, as returned by
/// listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalWithCar {
    #[serde(flatten)]
    pub rental: Rental,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub daily_rate: Decimal,
}

/// Fields for a rental to be persisted (no ID yet). The store assigns the
/// ID, stamps both timestamps and sets the status to [`RentalStatus::Ongoing`].
#[derive(Debug, Clone)]
pub struct NewRental {
    pub car_id: i64,
    pub renter_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: Decimal,
}

/// Partial update applied to a stored rental. `None` fields are left
/// untouched; `updated_at` is stamped regardless.
#[derive(Debug, Clone, Default)]
pub struct RentalChanges {
    pub status: Option<RentalStatus>,
    pub end_date: Option<NaiveDate>,
    pub total_cost: Option<Decimal>,
}

/// Create request as received from the boundary.
///
/// All fields are optional so that missing ones reach the service's presence
/// validation instead of being rejected by the deserializer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRental {
    pub car_id: Option<i64>,
    pub renter_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Update request as received from the boundary. Dates and status arrive as
/// raw strings and are validated by the service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRental {
    pub status: Option<String>,
    pub end_date: Option<String>,
}
