//! Inclusive day counting over calendar-date ranges.
//!
//! All date handling in the service is date-only: values are `%Y-%m-%d`
//! strings parsed into [`NaiveDate`], so the arithmetic is plain calendar-day
//! subtraction with no time-of-day or timezone component. This keeps the
//! count identical across host environments.
//!
//! A result of `0` is the sentinel for "invalid range" (unparsable input or
//! `end < start`); callers treat it as a rejection condition rather than an
//! error value.

use chrono::NaiveDate;

/// Parse a calendar date from its `%Y-%m-%d` wire form.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

/// Count the days between two dates, counting both endpoints.
///
/// Same start and end yields `1`; a reversed range yields `0`.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        return 0;
    }
    (end - start).num_days() + 1
}

/// [`inclusive_days`] over raw strings; `0` if either fails to parse.
pub fn inclusive_days_str(start: &str, end: &str) -> i64 {
    match (parse_date(start), parse_date(end)) {
        (Some(start), Some(end)) => inclusive_days(start, end),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn same_day_counts_as_one() {
        let d = date("2025-06-15");
        assert_eq!(inclusive_days(d, d), 1);
    }

    #[test]
    fn both_endpoints_are_counted() {
        assert_eq!(inclusive_days_str("2025-12-09", "2025-12-11"), 3);
        assert_eq!(inclusive_days_str("2025-01-01", "2025-01-03"), 3);
        assert_eq!(inclusive_days_str("2025-01-01", "2025-01-05"), 5);
    }

    #[test]
    fn reversed_range_is_zero() {
        assert_eq!(inclusive_days_str("2025-12-11", "2025-12-09"), 0);
    }

    #[test]
    fn unparsable_input_is_zero() {
        assert_eq!(inclusive_days_str("not-a-date", "2025-12-11"), 0);
        assert_eq!(inclusive_days_str("2025-12-09", "2025-13-40"), 0);
        assert_eq!(inclusive_days_str("", ""), 0);
        assert_eq!(inclusive_days_str("2025/12/09", "2025/12/11"), 0);
    }

    #[test]
    fn spans_month_and_year_boundaries() {
        assert_eq!(inclusive_days_str("2025-12-30", "2026-01-02"), 4);
        // 2024 is a leap year
        assert_eq!(inclusive_days_str("2024-02-28", "2024-03-01"), 3);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert_eq!(inclusive_days_str(" 2025-12-09 ", "2025-12-11"), 3);
    }
}
