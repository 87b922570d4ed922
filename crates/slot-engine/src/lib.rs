//! # slot-engine
//!
//! Deterministic meeting-availability engine for AI scheduling agents.
//!
//! Given the personal and group calendars of a set of participants, computes a
//! bounded, diversified set of mutually free slots of a requested duration.
//! The computation is pure and synchronous: no I/O, no clock reads, no shared
//! state.
//!
//! ## Pipeline
//!
//! - [`event`] — raw records → busy intervals (alias resolution, all-day expansion)
//! - [`merge`] — busy intervals → sorted, non-overlapping [`MergedBusySet`]
//! - [`generator`] — every free slot on a 30-minute grid inside business hours
//! - [`diversify`] — at most nine slots spread across days and morning/afternoon
//!
//! ## Supporting modules
//!
//! - [`window`] — daily business-hour window
//! - [`request`] — parameter defaults and validation
//! - [`recommend`] — the whole pipeline in one call
//! - [`report`] — JSON response envelope
//! - [`error`] — Error types
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use slot_engine::{recommend_meeting_times, EventBundle, MeetingRequest, RawEvent};
//!
//! let bundle = EventBundle::new(
//!     vec![RawEvent::timed("2025-03-10T09:00:00", "2025-03-10T12:00:00")],
//!     vec![],
//! );
//! let request = MeetingRequest::starting(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
//!
//! let slots = recommend_meeting_times(&bundle, &request);
//! assert_eq!(slots[0].start.to_string(), "2025-03-10 12:00:00");
//! ```

pub mod diversify;
pub mod error;
pub mod event;
pub mod generator;
pub mod merge;
pub mod recommend;
pub mod report;
pub mod request;
pub mod window;

pub use diversify::{diversify_slots, MAX_RECOMMENDATIONS};
pub use error::SlotError;
pub use event::{normalize_events, BusyInterval, EventBundle, RawEvent};
pub use generator::{find_candidate_slots, CandidateSlot};
pub use merge::{merge_busy_intervals, MergedBusySet};
pub use recommend::{busy_set, recommend_meeting_times};
pub use report::RecommendationReport;
pub use request::{MeetingRequest, SearchConfig};
pub use window::BusinessWindow;
