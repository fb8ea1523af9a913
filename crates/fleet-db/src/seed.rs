//! Initial car fleet shared by both backends.
//!
//! The volatile store must present exactly the same fleet as the durable
//! store's first-run seed, so the rows live in one place.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// `(make, model, year, daily_rate)` for the initial fleet.
pub(crate) fn initial_fleet() -> Vec<(&'static str, &'static str, i32, Decimal)> {
    vec![
        ("Toyota", "Corolla", 2022, dec!(35.00)),
        ("Honda", "Civic", 2023, dec!(37.50)),
        ("Ford", "Focus", 2021, dec!(30.00)),
    ]
}
