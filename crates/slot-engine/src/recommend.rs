//! The full pipeline: normalize, merge, generate, diversify.

use tracing::debug;

use crate::diversify::diversify_slots;
use crate::event::{normalize_events, EventBundle};
use crate::generator::{find_candidate_slots, CandidateSlot};
use crate::merge::{merge_busy_intervals, MergedBusySet};
use crate::request::MeetingRequest;

/// Busy time of everyone in `bundle`, merged.
pub fn busy_set(bundle: &EventBundle, request: &MeetingRequest) -> MergedBusySet {
    let intervals = normalize_events(bundle, &request.window, request.timezone);
    debug!(
        raw_events = bundle.len(),
        busy_intervals = intervals.len(),
        "normalized events"
    );
    merge_busy_intervals(intervals)
}

/// Recommend up to nine mutually free slots for the participants in `bundle`.
///
/// A pure function of its inputs: identical arguments give an identical
/// ordered result. An empty result means no common free slot exists.
pub fn recommend_meeting_times(bundle: &EventBundle, request: &MeetingRequest) -> Vec<CandidateSlot> {
    let busy = busy_set(bundle, request);
    let candidates = find_candidate_slots(
        &busy,
        request.search_start,
        request.search_days,
        request.duration_minutes,
        &request.window,
    );
    let picked = diversify_slots(&candidates);

    debug!(
        merged = busy.len(),
        candidates = candidates.len(),
        recommended = picked.len(),
        search_start = %request.search_start,
        search_end = %request.search_end(),
        "computed meeting recommendations"
    );
    picked
}
