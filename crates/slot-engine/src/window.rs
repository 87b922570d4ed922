//! Daily business-hour window in local wall-clock time.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// The clock-hour range during which meetings may be scheduled, applied to
/// every calendar day of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for BusinessWindow {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 22,
        }
    }
}

impl BusinessWindow {
    /// Build a window, rejecting empty or inverted ranges.
    ///
    /// `end_hour` may be 24, meaning midnight at the end of the day.
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self> {
        let window = Self {
            start_hour,
            end_hour,
        };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_hour < self.end_hour && self.end_hour <= 24 {
            Ok(())
        } else {
            Err(SlotError::InvalidBusinessWindow {
                start_hour: self.start_hour,
                end_hour: self.end_hour,
            })
        }
    }

    /// Length of the window in minutes.
    pub fn span_minutes(&self) -> i64 {
        i64::from(self.end_hour.saturating_sub(self.start_hour)) * 60
    }

    /// Opening time of the window on `day`.
    pub fn day_start(&self, day: NaiveDate) -> NaiveDateTime {
        at_hour(day, self.start_hour)
    }

    /// Closing time of the window on `day`.
    pub fn day_end(&self, day: NaiveDate) -> NaiveDateTime {
        at_hour(day, self.end_hour)
    }
}

// Offsetting from midnight lets hour 24 land on the next day's midnight.
fn at_hour(day: NaiveDate, hour: u32) -> NaiveDateTime {
    day.and_time(chrono::NaiveTime::MIN) + Duration::hours(i64::from(hour))
}
