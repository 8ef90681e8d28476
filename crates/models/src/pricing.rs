//! Rental pricing.
//!
//! A rental is billed once per game for every day it is out, except that a
//! weekend collapses into the Friday: Friday to Monday costs one day.
//! Prices are expressed in units (one game for one day); converting units to
//! money is left to the caller.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Number of days to jump forward from `day` when walking a rental
fn step(day: Weekday) -> u64 {
    match day {
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu => 1,
        // Skip Saturday and Sunday, land on Monday
        Weekday::Fri => 3,
        Weekday::Sat => 2,
        Weekday::Sun => 1,
    }
}

/// Counts the billable days between `begin` (inclusive) and `end` (exclusive)
pub fn billable_days(begin: NaiveDate, end: NaiveDate) -> u32 {
    let mut days = 0;
    let mut current = begin;

    while current < end {
        days += 1;

        match current.checked_add_days(Days::new(step(current.weekday()))) {
            Some(next) => current = next,
            None => break,
        }
    }

    days
}

/// Price of a rental of `games` games from `begin` to `end`, in units.
///
/// Prices are stored as `i32`; anything larger saturates at `i32::MAX`.
pub fn compute_price(begin: NaiveDate, end: NaiveDate, games: u64) -> i32 {
    let units = u64::from(billable_days(begin, end)).saturating_mul(games);
    i32::try_from(units).unwrap_or(i32::MAX)
}
