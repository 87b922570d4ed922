//! WASM bindings for slot-engine.
//!
//! Exposes busy-interval merging and meeting-time recommendation to JavaScript
//! via `wasm-bindgen`. All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::Deserialize;
use slot_engine::{
    normalize_events, BusinessWindow, EventBundle, MeetingRequest, RecommendationReport,
    SearchConfig,
};
use wasm_bindgen::prelude::*;

/// Options object accepted from JavaScript.
///
/// Every field is optional; missing ones take the engine defaults.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct OptionsInput {
    duration_minutes: Option<u32>,
    start_date: Option<String>,
    search_days: Option<u32>,
    start_hour: Option<u32>,
    end_hour: Option<u32>,
    timezone: Option<String>,
    group_id: Option<i64>,
}

impl OptionsInput {
    fn parse(json: &str) -> Result<Self, JsValue> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("Invalid options JSON: {}", e)))
    }

    fn to_config(&self) -> SearchConfig {
        let defaults = SearchConfig::default();
        SearchConfig {
            duration_minutes: self.duration_minutes.unwrap_or(defaults.duration_minutes),
            search_days: self.search_days.unwrap_or(defaults.search_days),
            business_start_hour: self.start_hour.unwrap_or(defaults.business_start_hour),
            business_end_hour: self.end_hour.unwrap_or(defaults.business_end_hour),
            timezone: self.timezone.clone().unwrap_or(defaults.timezone),
        }
    }

    fn to_request(&self, today: NaiveDate) -> slot_engine::error::Result<MeetingRequest> {
        self.to_config().into_request(self.start_date.as_deref(), today)
    }
}

fn parse_bundle(json: &str) -> Result<EventBundle, JsValue> {
    EventBundle::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Recommend up to nine common free slots.
///
/// `bundle_json` is the calendar payload (`personalEvents`/`groupEvents`,
/// optionally under `data`). `options_json` may set `durationMinutes`,
/// `startDate`, `searchDays`, `startHour`, `endHour`, `timezone` and
/// `groupId`. `today` (`YYYY-MM-DD`) is used when `startDate` is absent.
///
/// Returns the `{tool, data}` report envelope as a JSON string. Invalid
/// parameters or an undecodable bundle yield `{tool, error}` instead; only a
/// malformed options object or `today` throws.
#[wasm_bindgen(js_name = "recommendMeetingTimes")]
pub fn recommend_meeting_times(
    bundle_json: &str,
    options_json: &str,
    today: &str,
) -> Result<String, JsValue> {
    let options = OptionsInput::parse(options_json)?;
    // `today` comes from the JS side since wasm32 has no clock.
    let today = NaiveDate::parse_from_str(today, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid today date '{}': {}", today, e)))?;

    let report = match options
        .to_request(today)
        .and_then(|request| Ok((request, EventBundle::from_json(bundle_json)?)))
    {
        Ok((request, bundle)) => RecommendationReport::new(
            slot_engine::recommend_meeting_times(&bundle, &request),
            options.group_id,
        ),
        Err(e) => RecommendationReport::error(e),
    };
    report
        .to_json()
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Merge every event in the bundle into sorted, non-overlapping busy intervals.
///
/// Only `startHour`, `endHour` and `timezone` from `options_json` apply here.
/// Returns a JSON array of `{start, end}` objects.
#[wasm_bindgen(js_name = "mergeBusyIntervals")]
pub fn merge_busy_intervals(bundle_json: &str, options_json: &str) -> Result<String, JsValue> {
    let config = OptionsInput::parse(options_json)?.to_config();
    let tz = config.tz().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let window = BusinessWindow::new(config.business_start_hour, config.business_end_hour)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let bundle = parse_bundle(bundle_json)?;

    let merged = slot_engine::merge_busy_intervals(normalize_events(&bundle, &window, tz));
    serde_json::to_string(&merged)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
