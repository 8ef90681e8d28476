use crate::pricing;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Where a rental stands in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    /// Games are out and the expected end date has not passed
    Open,
    /// Games are out past the expected end date
    Late,
    /// Games were brought back
    Finished,
}

impl Display for RentalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Open => write!(f, "open"),
            Self::Late => write!(f, "late"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

/// The dates of a rental, with the rules that derive lateness and price from them.
///
/// `date_end` is set if and only if the rental is finished. Every computation
/// that depends on the current date takes it as `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalPeriod {
    pub date_begin: NaiveDateTime,
    pub expected_date_end: NaiveDate,
    pub date_end: Option<NaiveDate>,
}

impl RentalPeriod {
    pub fn new(
        date_begin: NaiveDateTime,
        expected_date_end: NaiveDate,
        date_end: Option<NaiveDate>,
    ) -> Self {
        Self {
            date_begin,
            expected_date_end,
            date_end,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.date_end.is_some()
    }

    /// Whether the rental is (or was, once finished) past its expected end date
    pub fn is_late(&self, today: NaiveDate) -> bool {
        match self.date_end {
            Some(date_end) => self.expected_date_end < date_end,
            None => today > self.expected_date_end,
        }
    }

    /// Days of lateness, 0 when on time
    pub fn delay(&self, today: NaiveDate) -> i64 {
        if !self.is_late(today) {
            return 0;
        }

        let end = self.date_end.unwrap_or(today);
        (end - self.expected_date_end).num_days()
    }

    /// The day billing stops: the return date, today for a late rental,
    /// or the expected end date otherwise
    pub fn billing_end(&self, today: NaiveDate) -> NaiveDate {
        match self.date_end {
            Some(date_end) => date_end,
            None if self.is_late(today) => today,
            None => self.expected_date_end,
        }
    }

    /// Price in units for `games` games. Hours are dropped from the start
    /// date so a 23h rental counts as a full day.
    pub fn compute_price(&self, games: u64, today: NaiveDate) -> i32 {
        pricing::compute_price(self.date_begin.date(), self.billing_end(today), games)
    }

    pub fn status(&self, today: NaiveDate) -> RentalStatus {
        if self.is_finished() {
            RentalStatus::Finished
        } else if self.is_late(today) {
            RentalStatus::Late
        } else {
            RentalStatus::Open
        }
    }
}
