//! Car domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A car in the fleet.
///
/// Cars are created only when a store backend is initialized (seed data);
/// the public contract exposes no car creation. `available` is `false`
/// exactly while an ongoing rental references the car.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Store-assigned ID, monotonic per backend instance.
    pub id: i64,
    /// Manufacturer, e.g. "Toyota".
    pub make: String,
    /// Model name, e.g. "Corolla".
    pub model: String,
    /// Model year, if known.
    pub year: Option<i32>,
    /// Flat daily rental rate, non-negative, two decimal places.
    pub daily_rate: Decimal,
    /// Whether the car can currently be rented.
    pub available: bool,
    /// UTC timestamp of when the car entered the fleet.
    pub created_at: DateTime<Utc>,
}
