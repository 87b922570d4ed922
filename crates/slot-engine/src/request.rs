//! Top-level request parameters, their defaults, and validation.
//!
//! This is the only place the engine raises errors: a request is validated in
//! full before any computation runs.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::event::parse_timestamp;
use crate::window::BusinessWindow;

/// Caller-facing search settings with service defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub duration_minutes: u32,
    pub search_days: u32,
    pub business_start_hour: u32,
    pub business_end_hour: u32,
    /// IANA timezone in which business hours and naive timestamps are read.
    pub timezone: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            duration_minutes: 60,
            search_days: 7,
            business_start_hour: 9,
            business_end_hour: 22,
            timezone: "UTC".to_string(),
        }
    }
}

impl SearchConfig {
    /// Parse the configured timezone.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTimezone` for an unknown IANA name.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| SlotError::InvalidTimezone(self.timezone.clone()))
    }

    /// Today's date in the configured timezone.
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.tz()?).date_naive())
    }

    /// Validate the settings and bind them to a search start.
    ///
    /// `start_date` falls back to `today` when absent. Passing `today` in
    /// explicitly keeps the engine itself independent of the wall clock.
    ///
    /// # Errors
    /// Any of `InvalidTimezone`, `InvalidDuration`, `InvalidBusinessWindow`,
    /// or `InvalidSearchStart`.
    pub fn into_request(&self, start_date: Option<&str>, today: NaiveDate) -> Result<MeetingRequest> {
        let tz = self.tz()?;
        let search_start = match start_date {
            Some(raw) => parse_search_start(raw, tz)?,
            None => today,
        };
        MeetingRequest::new(
            self.duration_minutes,
            search_start,
            self.search_days,
            BusinessWindow::new(self.business_start_hour, self.business_end_hour)?,
            tz,
        )
    }
}

/// A validated availability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeetingRequest {
    pub duration_minutes: u32,
    /// First day searched, inclusive.
    pub search_start: NaiveDate,
    pub search_days: u32,
    pub window: BusinessWindow,
    pub timezone: Tz,
}

impl MeetingRequest {
    /// Build a request, validating duration and business window.
    pub fn new(
        duration_minutes: u32,
        search_start: NaiveDate,
        search_days: u32,
        window: BusinessWindow,
        timezone: Tz,
    ) -> Result<Self> {
        if duration_minutes == 0 {
            return Err(SlotError::InvalidDuration(duration_minutes));
        }
        window.validate()?;
        Ok(Self {
            duration_minutes,
            search_start,
            search_days,
            window,
            timezone,
        })
    }

    /// Default settings (60 minutes, 7 days, 09-22 UTC) starting on `search_start`.
    pub fn starting(search_start: NaiveDate) -> Self {
        Self {
            duration_minutes: 60,
            search_start,
            search_days: 7,
            window: BusinessWindow::default(),
            timezone: Tz::UTC,
        }
    }

    /// The day after the last searched day (exclusive bound).
    pub fn search_end(&self) -> NaiveDate {
        self.search_start
            .checked_add_days(chrono::Days::new(u64::from(self.search_days)))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Parse a search start as `YYYY-MM-DD`, or any accepted timestamp truncated
/// to its date.
///
/// # Errors
/// Returns `SlotError::InvalidSearchStart` if nothing matches.
pub fn parse_search_start(raw: &str, tz: Tz) -> Result<NaiveDate> {
    parse_timestamp(raw, tz)
        .map(|dt| dt.date())
        .ok_or_else(|| SlotError::InvalidSearchStart(raw.to_string()))
}
