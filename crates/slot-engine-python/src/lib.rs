//! # slot-engine-python
//!
//! Python bindings for slot-engine, built with PyO3.
//!
//! Exposes the following functions to Python as the `meeting_slots` module:
//!
//! - `recommend_meeting_times(bundle_json, ...)` -- report envelope JSON string
//! - `merge_busy_intervals(bundle_json, ...)` -- merged busy intervals JSON string

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use slot_engine::{BusinessWindow, EventBundle, RecommendationReport, SearchConfig};

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Recommend up to nine meeting slots when everyone in the bundle is free.
///
/// Args:
///     bundle_json: Calendar payload with `personalEvents` and `groupEvents`
///         (snake_case aliases and a surrounding `data` object are accepted).
///     duration_minutes: Meeting length in minutes.
///     start_date: First day to search (YYYY-MM-DD). Defaults to `today`.
///     search_days: Number of days to search.
///     start_hour: Business hours start.
///     end_hour: Business hours end (up to 24).
///     timezone: IANA timezone for business hours and naive timestamps.
///     group_id: Group the recommendation is for, echoed in the output.
///     today: Override for the current date (YYYY-MM-DD). Defaults to the
///         current date in `timezone`.
///
/// Returns:
///     The `{"tool": ..., "data": ...}` report as a JSON string, or
///     `{"tool": ..., "error": ...}` if a parameter is invalid or the bundle
///     is not a JSON object.
///
/// Raises:
///     ValueError: If `today` is not a YYYY-MM-DD date.
#[pyfunction]
#[pyo3(signature = (
    bundle_json,
    duration_minutes=60,
    start_date=None,
    search_days=7,
    start_hour=9,
    end_hour=22,
    timezone="UTC",
    group_id=None,
    today=None,
))]
#[allow(clippy::too_many_arguments)]
fn recommend_meeting_times(
    bundle_json: &str,
    duration_minutes: u32,
    start_date: Option<&str>,
    search_days: u32,
    start_hour: u32,
    end_hour: u32,
    timezone: &str,
    group_id: Option<i64>,
    today: Option<&str>,
) -> PyResult<String> {
    let config = SearchConfig {
        duration_minutes,
        search_days,
        business_start_hour: start_hour,
        business_end_hour: end_hour,
        timezone: timezone.to_string(),
    };
    let today = match today {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(value_error)?,
        None => match config.today() {
            Ok(today) => today,
            Err(e) => return RecommendationReport::error(e).to_json().map_err(value_error),
        },
    };

    let report = match config
        .into_request(start_date, today)
        .and_then(|request| Ok((request, EventBundle::from_json(bundle_json)?)))
    {
        Ok((request, bundle)) => RecommendationReport::new(
            slot_engine::recommend_meeting_times(&bundle, &request),
            group_id,
        ),
        Err(e) => RecommendationReport::error(e),
    };
    report.to_json().map_err(value_error)
}

/// Merge every event in the bundle into sorted, non-overlapping busy intervals.
///
/// Args:
///     bundle_json: Calendar payload, as for `recommend_meeting_times`.
///     start_hour: Business hours start (bounds all-day events).
///     end_hour: Business hours end.
///     timezone: IANA timezone for naive timestamps.
///
/// Returns:
///     A JSON string containing an array of `{"start", "end"}` objects.
///
/// Raises:
///     ValueError: If the bundle or a parameter is invalid.
#[pyfunction]
#[pyo3(signature = (bundle_json, start_hour=9, end_hour=22, timezone="UTC"))]
fn merge_busy_intervals(
    bundle_json: &str,
    start_hour: u32,
    end_hour: u32,
    timezone: &str,
) -> PyResult<String> {
    let window = BusinessWindow::new(start_hour, end_hour).map_err(value_error)?;
    let tz = SearchConfig {
        timezone: timezone.to_string(),
        ..SearchConfig::default()
    }
    .tz()
    .map_err(value_error)?;
    let bundle = EventBundle::from_json(bundle_json).map_err(value_error)?;

    let merged =
        slot_engine::merge_busy_intervals(slot_engine::normalize_events(&bundle, &window, tz));
    serde_json::to_string(&merged).map_err(value_error)
}

/// The `meeting_slots` Python module, implemented in Rust via PyO3.
#[pymodule]
fn meeting_slots(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(recommend_meeting_times, m)?)?;
    m.add_function(wrap_pyfunction!(merge_busy_intervals, m)?)?;
    Ok(())
}
