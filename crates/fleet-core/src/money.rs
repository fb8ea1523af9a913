//! Money helpers.
//!
//! All monetary amounts are [`Decimal`] end-to-end; rounding happens exactly
//! once per computation, half-up at the cent, so repeated recompute chains
//! (extend, then return, then list) cannot drift.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency tag attached to every revenue figure.
pub const CURRENCY: &str = "USD";

/// Round an amount half-up at the cent and force a two-decimal scale, so it
/// renders as e.g. `105.00` rather than `105`.
pub fn round_cents(amount: Decimal) -> Decimal {
    let mut cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    cents
}

/// Total cost of a rental: flat daily rate times the inclusive day count.
pub fn total_cost(daily_rate: Decimal, days: i64) -> Decimal {
    round_cents(daily_rate * Decimal::from(days))
}

/// Fixed two-decimal rendering of an amount.
pub fn format_amount(amount: Decimal) -> String {
    round_cents(amount).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn total_cost_is_rate_times_days() {
        assert_eq!(total_cost(dec!(35.00), 3).to_string(), "105.00");
        assert_eq!(total_cost(dec!(37.50), 5).to_string(), "187.50");
        assert_eq!(total_cost(dec!(30.00), 1).to_string(), "30.00");
    }

    #[test]
    fn cents_round_half_up() {
        assert_eq!(round_cents(dec!(10.005)).to_string(), "10.01");
        assert_eq!(round_cents(dec!(10.004)).to_string(), "10.00");
    }

    #[test]
    fn whole_amounts_keep_two_decimals() {
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(175)), "175.00");
    }
}
