//! End-to-end tests for the recommendation pipeline, request validation, and
//! the response envelope.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use chrono_tz::Tz;
use serde_json::json;
use slot_engine::report::{ReportData, NO_AVAILABILITY_MESSAGE, TOOL_NAME};
use slot_engine::request::parse_search_start;
use slot_engine::{
    busy_set, recommend_meeting_times, BusinessWindow, CandidateSlot, EventBundle, MeetingRequest,
    RawEvent, RecommendationReport, SearchConfig, SlotError,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

fn at(d: u32, hour: u32, min: u32) -> NaiveDateTime {
    day(d).and_hms_opt(hour, min, 0).unwrap()
}

fn request(days: u32, duration: u32) -> MeetingRequest {
    MeetingRequest::new(duration, day(10), days, BusinessWindow::default(), Tz::UTC).unwrap()
}

// ── Pipeline scenarios ──────────────────────────────────────────────────────

#[test]
fn empty_calendar_three_days() {
    let slots = recommend_meeting_times(&EventBundle::default(), &request(3, 60));

    assert_eq!(slots.len(), 9);
    assert_eq!(
        slots[0],
        CandidateSlot {
            start: at(10, 9, 0),
            end: at(10, 10, 0),
        }
    );
    for d in 10..=12 {
        assert!(slots.iter().any(|s| s.start.date() == day(d) && s.start.hour() < 14));
        assert!(slots.iter().any(|s| s.start.date() == day(d) && s.start.hour() >= 14));
    }
}

#[test]
fn fully_booked_first_day() {
    let bundle = EventBundle::new(
        vec![RawEvent::timed("2025-03-10T09:00:00", "2025-03-10T22:00:00")],
        vec![],
    );
    let slots = recommend_meeting_times(&bundle, &request(2, 60));

    assert!(!slots.is_empty());
    assert!(slots.iter().all(|s| s.start.date() == day(11)));
}

#[test]
fn all_day_group_event_blocks_the_day() {
    let bundle = EventBundle::new(vec![], vec![RawEvent::all_day("2025-03-10", "2025-03-11")]);
    let slots = recommend_meeting_times(&bundle, &request(2, 60));
    assert!(slots.iter().all(|s| s.start.date() == day(11)));
}

#[test]
fn duration_exceeding_window_is_empty_not_error() {
    let slots = recommend_meeting_times(&EventBundle::default(), &request(7, 900));
    assert!(slots.is_empty());
}

#[test]
fn personal_and_group_calendars_combine() {
    let bundle = EventBundle::new(
        vec![RawEvent::timed("2025-03-10T09:00:00", "2025-03-10T11:00:00")],
        vec![RawEvent::timed("2025-03-10T10:30:00", "2025-03-10T14:30:00")],
    );
    let busy = busy_set(&bundle, &request(1, 60));
    assert_eq!(busy.len(), 1);

    let slots = recommend_meeting_times(&bundle, &request(1, 60));
    // First free hour after the merged 09:00-14:30 block; it is afternoon.
    assert_eq!(slots[0].start, at(10, 14, 30));
}

#[test]
fn malformed_events_do_not_abort() {
    let bundle = EventBundle::new(
        vec![
            RawEvent::timed("garbage", "2025-03-10T10:00:00"),
            RawEvent::default(),
        ],
        vec![RawEvent::timed("2025-03-10T09:00:00", "2025-03-10T10:00:00")],
    );
    let slots = recommend_meeting_times(&bundle, &request(1, 60));
    assert_eq!(slots[0].start, at(10, 10, 0));
}

#[test]
fn identical_inputs_give_identical_output() {
    let bundle = EventBundle::new(
        vec![
            RawEvent::timed("2025-03-11T13:00:00", "2025-03-11T15:00:00"),
            RawEvent::timed("2025-03-10T09:15:00", "2025-03-10T10:45:00"),
        ],
        vec![RawEvent::all_day("2025-03-12", "2025-03-13")],
    );
    let req = request(5, 45);
    assert_eq!(
        recommend_meeting_times(&bundle, &req),
        recommend_meeting_times(&bundle, &req)
    );
}

#[test]
fn offset_timestamps_respect_configured_timezone() {
    // 00:00Z-03:00Z is 09:00-12:00 in Seoul.
    let bundle = EventBundle::new(
        vec![RawEvent::timed("2025-03-10T00:00:00Z", "2025-03-10T03:00:00Z")],
        vec![],
    );
    let req = MeetingRequest::new(60, day(10), 1, BusinessWindow::default(), chrono_tz::Asia::Seoul)
        .unwrap();
    let slots = recommend_meeting_times(&bundle, &req);
    assert_eq!(slots[0].start, at(10, 12, 0));
}

// ── Request validation ──────────────────────────────────────────────────────

#[test]
fn search_config_defaults() {
    let config = SearchConfig::default();
    assert_eq!(config.duration_minutes, 60);
    assert_eq!(config.search_days, 7);
    assert_eq!(config.business_start_hour, 9);
    assert_eq!(config.business_end_hour, 22);
    assert_eq!(config.timezone, "UTC");
}

#[test]
fn search_config_deserializes_partial_json() {
    let config: SearchConfig =
        serde_json::from_value(json!({"duration_minutes": 30, "timezone": "Asia/Seoul"})).unwrap();
    assert_eq!(config.duration_minutes, 30);
    assert_eq!(config.search_days, 7);
    assert_eq!(config.tz().unwrap(), chrono_tz::Asia::Seoul);
}

#[test]
fn missing_start_date_uses_today() {
    let req = SearchConfig::default().into_request(None, day(20)).unwrap();
    assert_eq!(req.search_start, day(20));
    assert_eq!(req.search_end(), day(27));
}

#[test]
fn start_date_with_time_is_truncated() {
    let req = SearchConfig::default()
        .into_request(Some("2025-03-10T15:45:00"), day(1))
        .unwrap();
    assert_eq!(req.search_start, day(10));
}

#[test]
fn unparsable_start_date_is_rejected() {
    let err = SearchConfig::default()
        .into_request(Some("next monday"), day(1))
        .unwrap_err();
    assert_eq!(err, SlotError::InvalidSearchStart("next monday".to_string()));
    assert!(parse_search_start("2025/03/10", Tz::UTC).is_err());
}

#[test]
fn zero_duration_is_rejected() {
    let config = SearchConfig {
        duration_minutes: 0,
        ..SearchConfig::default()
    };
    assert_eq!(
        config.into_request(None, day(10)).unwrap_err(),
        SlotError::InvalidDuration(0)
    );
}

#[test]
fn inverted_business_window_is_rejected() {
    let config = SearchConfig {
        business_start_hour: 18,
        business_end_hour: 9,
        ..SearchConfig::default()
    };
    assert!(matches!(
        config.into_request(None, day(10)),
        Err(SlotError::InvalidBusinessWindow {
            start_hour: 18,
            end_hour: 9
        })
    ));
    assert!(BusinessWindow::new(9, 25).is_err());
    assert!(BusinessWindow::new(9, 9).is_err());
}

#[test]
fn unknown_timezone_is_rejected() {
    let config = SearchConfig {
        timezone: "Mars/Olympus_Mons".to_string(),
        ..SearchConfig::default()
    };
    assert_eq!(
        config.into_request(None, day(10)).unwrap_err(),
        SlotError::InvalidTimezone("Mars/Olympus_Mons".to_string())
    );
}

#[test]
fn zero_search_days_is_valid_and_empty() {
    let config = SearchConfig {
        search_days: 0,
        ..SearchConfig::default()
    };
    let req = config.into_request(Some("2025-03-10"), day(1)).unwrap();
    assert!(recommend_meeting_times(&EventBundle::default(), &req).is_empty());
}

// ── Response envelope ───────────────────────────────────────────────────────

#[test]
fn report_serializes_recommendations_with_group_id() {
    let slots = recommend_meeting_times(&EventBundle::default(), &request(1, 60));
    let report = RecommendationReport::new(slots[..1].to_vec(), Some(7));

    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(
        value,
        json!({
            "tool": TOOL_NAME,
            "data": {
                "recommendations": [
                    {"start": "2025-03-10T09:00:00", "end": "2025-03-10T10:00:00"}
                ],
                "group_id": 7
            }
        })
    );
}

#[test]
fn empty_report_carries_message() {
    let report = RecommendationReport::new(vec![], Some(7));
    assert!(report.slots().is_empty());
    assert_eq!(
        report.data,
        Some(ReportData::NoAvailability {
            message: NO_AVAILABILITY_MESSAGE.to_string()
        })
    );
    assert!(!report.is_error());

    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(value["data"]["message"], NO_AVAILABILITY_MESSAGE);
    assert!(value["data"].get("recommendations").is_none());
}

#[test]
fn error_report_carries_error_instead_of_data() {
    let err = SearchConfig {
        duration_minutes: 0,
        ..SearchConfig::default()
    }
    .into_request(None, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
    .unwrap_err();
    let report = RecommendationReport::error(&err);
    assert!(report.is_error());
    assert!(report.slots().is_empty());

    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(value, json!({"tool": TOOL_NAME, "error": err.to_string()}));
    assert!(value.get("data").is_none());
}

#[test]
fn success_report_omits_error_field() {
    let value: serde_json::Value =
        serde_json::from_str(&RecommendationReport::new(vec![], None).to_json().unwrap()).unwrap();
    assert!(value.get("error").is_none());
}

#[test]
fn report_roundtrips_through_json() {
    let slots = recommend_meeting_times(&EventBundle::default(), &request(2, 30));
    let report = RecommendationReport::new(slots, None);
    let back: RecommendationReport = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(back, report);
}
