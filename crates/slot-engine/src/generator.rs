//! Enumerate every free slot of a given length inside business hours.
//!
//! Candidates are emitted on a 30-minute grid and overlap by design: if the
//! whole morning is free, both 09:00-10:00 and 09:30-10:30 are produced. When
//! a candidate collides with a busy interval the cursor jumps straight to that
//! interval's end, so the grid restarts from there.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::merge::MergedBusySet;
use crate::window::BusinessWindow;

/// Step between consecutive candidate start times.
pub const SLOT_STEP_MINUTES: i64 = 30;

/// A free time range of the requested duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl CandidateSlot {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Walk `search_days` days from `search_start`, collecting candidates.
///
/// Output is chronological and unbounded. A duration longer than the business
/// window, or zero days, yields an empty list.
pub fn find_candidate_slots(
    busy: &MergedBusySet,
    search_start: NaiveDate,
    search_days: u32,
    duration_minutes: u32,
    window: &BusinessWindow,
) -> Vec<CandidateSlot> {
    let duration = Duration::minutes(i64::from(duration_minutes));
    let step = Duration::minutes(SLOT_STEP_MINUTES);

    let mut slots = Vec::new();
    if duration_minutes == 0 || i64::from(duration_minutes) > window.span_minutes() {
        return slots;
    }

    for day in search_start.iter_days().take(search_days as usize) {
        let day_end = window.day_end(day);
        let mut cursor = window.day_start(day);

        while cursor + duration <= day_end {
            let end = cursor + duration;
            if let Some(conflict) = busy.first_conflict(cursor, end) {
                cursor = conflict.end;
                continue;
            }
            slots.push(CandidateSlot { start: cursor, end });
            cursor += step;
        }
    }

    slots
}
