//! Simulation clock
//!
//! Simulated time is a calendar date that moves forward by a fixed number of
//! whole years per tick. It has no relation to wall-clock time.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// First day of year 1, the default epoch
pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).expect("0001-01-01 is a valid date")
}

/// Calendar tracking the current simulated date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationClock {
    date: NaiveDate,
    step_years: u32,
}

impl SimulationClock {
    pub fn new(start: NaiveDate, step_years: u32) -> Self {
        Self {
            date: start,
            step_years,
        }
    }

    /// Move forward one step and return the new date.
    ///
    /// Feb 29 lands on Feb 28 in non-leap years. Running past the end of the
    /// representable calendar is an engine bug, so this panics.
    pub fn advance(&mut self) -> NaiveDate {
        let months = Months::new(self.step_years.saturating_mul(12));
        self.date = self
            .date
            .checked_add_months(months)
            .unwrap_or_else(|| panic!("simulated date overflow after {}", self.date));
        self.date
    }

    pub fn current_date(&self) -> NaiveDate {
        self.date
    }

    pub fn current_year(&self) -> i32 {
        self.date.year()
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(epoch(), 1)
    }
}
