//! Pick a small, spread-out subset of candidate slots.
//!
//! First pass: for each day in date order, the day's first morning slot and
//! first afternoon slot. Second pass: if the cap is still not reached, the
//! earliest remaining candidates in chronological order.

use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveDate, Timelike};

use crate::generator::CandidateSlot;

/// Upper bound on the number of recommended slots.
pub const MAX_RECOMMENDATIONS: usize = 9;

/// Slots starting at or after this hour count as afternoon.
pub const AFTERNOON_START_HOUR: u32 = 14;

#[derive(Default)]
struct DayBuckets {
    morning: Option<CandidateSlot>,
    afternoon: Option<CandidateSlot>,
}

/// Select at most [`MAX_RECOMMENDATIONS`] slots from a chronological list.
///
/// The result never contains the same slot twice. An empty input yields an
/// empty output.
pub fn diversify_slots(candidates: &[CandidateSlot]) -> Vec<CandidateSlot> {
    let mut by_day: BTreeMap<NaiveDate, DayBuckets> = BTreeMap::new();
    for slot in candidates {
        let buckets = by_day.entry(slot.start.date()).or_default();
        let bucket = if slot.start.hour() < AFTERNOON_START_HOUR {
            &mut buckets.morning
        } else {
            &mut buckets.afternoon
        };
        bucket.get_or_insert(*slot);
    }

    let mut picked: Vec<CandidateSlot> = by_day
        .into_values()
        .flat_map(|day| [day.morning, day.afternoon])
        .flatten()
        .take(MAX_RECOMMENDATIONS)
        .collect();

    if picked.len() < MAX_RECOMMENDATIONS {
        let mut seen: HashSet<CandidateSlot> = picked.iter().copied().collect();
        for slot in candidates {
            if picked.len() >= MAX_RECOMMENDATIONS {
                break;
            }
            if seen.insert(*slot) {
                picked.push(*slot);
            }
        }
    }

    picked
}
