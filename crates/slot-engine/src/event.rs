//! Raw calendar records and their normalization into busy intervals.
//!
//! The upstream calendar API is loosely typed: lists and timestamp fields come
//! under more than one name, the payload may or may not be wrapped in a `data`
//! envelope, and individual records may be incomplete. Everything is resolved
//! here, at the boundary, so the rest of the engine only sees well-formed
//! [`BusyInterval`]s.
//!
//! # Alias precedence
//!
//! - `personalEvents` before `personal_events`, `groupEvents` before `group_events`
//! - `start` before `startDatetime`, `end` before `endDatetime`
//!
//! An empty list or empty string counts as absent, so the alias is consulted.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{Result, SlotError};
use crate::window::BusinessWindow;

/// A single event record as delivered by the calendar source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub start: Option<String>,
    #[serde(
        default,
        rename = "startDatetime",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_datetime: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub end: Option<String>,
    #[serde(
        default,
        rename = "endDatetime",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_datetime: Option<String>,
    #[serde(
        default,
        rename = "allDay",
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub all_day: Option<bool>,
}

impl RawEvent {
    /// A timed event using the primary field names.
    pub fn timed(start: &str, end: &str) -> Self {
        Self {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            ..Self::default()
        }
    }

    /// An all-day event using the primary field names.
    pub fn all_day(start: &str, end: &str) -> Self {
        Self {
            all_day: Some(true),
            ..Self::timed(start, end)
        }
    }

    /// The start timestamp, resolving `start` before `startDatetime`.
    pub fn start_field(&self) -> Option<&str> {
        first_present(&self.start, &self.start_datetime)
    }

    /// The end timestamp, resolving `end` before `endDatetime`.
    pub fn end_field(&self) -> Option<&str> {
        first_present(&self.end, &self.end_datetime)
    }

    pub fn is_all_day(&self) -> bool {
        self.all_day.unwrap_or(false)
    }
}

fn first_present<'a>(primary: &'a Option<String>, alias: &'a Option<String>) -> Option<&'a str> {
    primary
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| alias.as_deref().filter(|s| !s.trim().is_empty()))
}

/// The personal and group calendars of everyone taking part in a meeting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct EventBundle {
    #[serde(rename = "personalEvents")]
    pub personal: Vec<RawEvent>,
    #[serde(rename = "groupEvents")]
    pub group: Vec<RawEvent>,
}

/// Wire shape with every accepted list alias.
#[derive(Deserialize)]
struct BundleWire {
    #[serde(default, rename = "personalEvents", deserialize_with = "lenient_events")]
    personal_camel: Vec<RawEvent>,
    #[serde(default, rename = "personal_events", deserialize_with = "lenient_events")]
    personal_snake: Vec<RawEvent>,
    #[serde(default, rename = "groupEvents", deserialize_with = "lenient_events")]
    group_camel: Vec<RawEvent>,
    #[serde(default, rename = "group_events", deserialize_with = "lenient_events")]
    group_snake: Vec<RawEvent>,
}

impl EventBundle {
    pub fn new(personal: Vec<RawEvent>, group: Vec<RawEvent>) -> Self {
        Self { personal, group }
    }

    /// Decode a bundle from a JSON string.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidBundle` if the text is not JSON or the top
    /// level is not an object. Malformed individual events are not errors.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| SlotError::InvalidBundle(e.to_string()))?;
        Self::try_from(value)
    }

    /// Total number of raw records across both lists.
    pub fn len(&self) -> usize {
        self.personal.len() + self.group.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All records, personal first.
    pub fn events(&self) -> impl Iterator<Item = &RawEvent> {
        self.personal.iter().chain(self.group.iter())
    }
}

impl TryFrom<Value> for EventBundle {
    type Error = SlotError;

    fn try_from(value: Value) -> Result<Self> {
        // Unwrap an optional `{"data": {...}}` envelope.
        let inner = match value {
            Value::Object(mut map) => match map.remove("data") {
                Some(data @ Value::Object(_)) => data,
                Some(other) => {
                    map.insert("data".to_string(), other);
                    Value::Object(map)
                }
                None => Value::Object(map),
            },
            other => {
                return Err(SlotError::InvalidBundle(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let wire: BundleWire =
            serde_json::from_value(inner).map_err(|e| SlotError::InvalidBundle(e.to_string()))?;

        Ok(Self {
            personal: prefer_non_empty(wire.personal_camel, wire.personal_snake),
            group: prefer_non_empty(wire.group_camel, wire.group_snake),
        })
    }
}

fn prefer_non_empty(primary: Vec<RawEvent>, alias: Vec<RawEvent>) -> Vec<RawEvent> {
    if primary.is_empty() {
        alias
    } else {
        primary
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Lenient field decoding: a wrongly-typed field makes the field absent, and a
// non-object list entry is dropped, instead of failing the whole bundle.
// ---------------------------------------------------------------------------

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        _ => None,
    })
}

fn lenient_events<'de, D>(deserializer: D) -> std::result::Result<Vec<RawEvent>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawEvent>(item) {
            Ok(event) => Some(event),
            Err(e) => {
                debug!(error = %e, "dropping undecodable event record");
                None
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Busy intervals
// ---------------------------------------------------------------------------

/// A time range during which at least one participant is unavailable.
///
/// Invariant: `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl BusyInterval {
    /// Build an interval, returning `None` unless `start < end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Half-open overlap test. Touching intervals do not overlap.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end && end > self.start
    }
}

/// Parse a calendar timestamp into local wall-clock time.
///
/// Timestamps carrying an offset are converted into `tz`; naive timestamps are
/// taken as already local. A bare date means midnight. Returns `None` for
/// anything unrecognised.
pub fn parse_timestamp(raw: &str, tz: Tz) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&tz).naive_local());
    }
    parse_naive(raw)
}

/// The calendar date a timestamp is written on.
///
/// Unlike [`parse_timestamp`], an offset is not converted: an all-day event
/// starting `2025-03-10T00:00:00+09:00` belongs to March 10 in any zone.
pub fn parse_written_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local().date());
    }
    parse_naive(raw).map(|dt| dt.date())
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
}

/// Convert every usable record in `bundle` into a busy interval.
///
/// Records missing either timestamp, with an unparsable timestamp, or (for
/// timed events) with `end <= start` are skipped. An all-day record blocks
/// the business window of the day its start is written on, and nothing
/// outside it.
///
/// The result is in input order (personal, then group), not sorted.
pub fn normalize_events(bundle: &EventBundle, window: &BusinessWindow, tz: Tz) -> Vec<BusyInterval> {
    let mut intervals = Vec::with_capacity(bundle.len());

    for event in bundle.events() {
        let (Some(start_raw), Some(end_raw)) = (event.start_field(), event.end_field()) else {
            trace!(?event, "skipping event without start/end");
            continue;
        };
        let (Some(start), Some(end)) = (parse_timestamp(start_raw, tz), parse_timestamp(end_raw, tz))
        else {
            debug!(start = start_raw, end = end_raw, "skipping event with unparsable timestamp");
            continue;
        };

        let interval = if event.is_all_day() {
            let day = parse_written_date(start_raw).unwrap_or(start.date());
            BusyInterval::new(window.day_start(day), window.day_end(day))
        } else {
            BusyInterval::new(start, end)
        };

        match interval {
            Some(interval) => intervals.push(interval),
            None => debug!(%start, %end, "skipping event that ends before it starts"),
        }
    }

    intervals
}
