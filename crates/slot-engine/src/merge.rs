//! Coalesce busy intervals into a sorted, non-overlapping set.
//!
//! Strictly overlapping intervals merge. Intervals that only touch
//! (`next.start == running.end`) stay separate entries; slot generation is
//! unaffected because a candidate still cannot straddle the shared boundary.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::event::BusyInterval;

/// Sorted busy intervals with no residual overlap.
///
/// Invariants: ascending by `start`, and `a.end <= b.start` for every adjacent
/// pair `(a, b)`. Built once per request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MergedBusySet {
    intervals: Vec<BusyInterval>,
}

impl MergedBusySet {
    pub fn intervals(&self) -> &[BusyInterval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The first busy interval intersecting `[start, end)`, if any.
    ///
    /// Because the set is disjoint and sorted, interval ends are sorted too,
    /// so the first interval ending after `start` is the only candidate that
    /// needs checking.
    pub fn first_conflict(&self, start: NaiveDateTime, end: NaiveDateTime) -> Option<&BusyInterval> {
        let idx = self.intervals.partition_point(|busy| busy.end <= start);
        self.intervals
            .get(idx)
            .filter(|busy| busy.overlaps(start, end))
    }

    /// Whether `[start, end)` is clear of every busy interval.
    pub fn is_free(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.first_conflict(start, end).is_none()
    }
}

/// Sort and merge busy intervals in one pass.
///
/// O(n log n) for the sort, O(n) for the scan. An empty input yields an empty
/// set.
pub fn merge_busy_intervals(mut intervals: Vec<BusyInterval>) -> MergedBusySet {
    // Sort by start time (then by end time for stability).
    intervals.sort_unstable_by_key(|busy| (busy.start, busy.end));

    let mut merged: Vec<BusyInterval> = Vec::with_capacity(intervals.len());
    for busy in intervals {
        if let Some(last) = merged.last_mut() {
            if busy.start < last.end {
                last.end = last.end.max(busy.end);
                continue;
            }
        }
        merged.push(busy);
    }

    MergedBusySet { intervals: merged }
}
