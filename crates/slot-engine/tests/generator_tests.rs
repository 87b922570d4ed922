//! Tests for candidate slot generation.

use chrono::{NaiveDate, NaiveDateTime};
use slot_engine::event::BusyInterval;
use slot_engine::generator::{find_candidate_slots, CandidateSlot};
use slot_engine::merge::{merge_busy_intervals, MergedBusySet};
use slot_engine::BusinessWindow;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

fn at(d: u32, hour: u32, min: u32) -> NaiveDateTime {
    day(d).and_hms_opt(hour, min, 0).unwrap()
}

fn busy(d: u32, start: (u32, u32), end: (u32, u32)) -> BusyInterval {
    BusyInterval::new(at(d, start.0, start.1), at(d, end.0, end.1)).unwrap()
}

fn slot(d: u32, start: (u32, u32), end: (u32, u32)) -> CandidateSlot {
    CandidateSlot {
        start: at(d, start.0, start.1),
        end: at(d, end.0, end.1),
    }
}

fn window() -> BusinessWindow {
    BusinessWindow::default()
}

#[test]
fn free_day_yields_half_hour_grid() {
    let slots = find_candidate_slots(&MergedBusySet::default(), day(10), 1, 60, &window());

    // 09:00, 09:30, ..., 21:00 → 25 starts.
    assert_eq!(slots.len(), 25);
    assert_eq!(slots[0], slot(10, (9, 0), (10, 0)));
    assert_eq!(slots[1], slot(10, (9, 30), (10, 30)));
    assert_eq!(slots[24], slot(10, (21, 0), (22, 0)));
    assert!(slots.iter().all(|s| s.duration_minutes() == 60));
}

#[test]
fn busy_interval_skips_cursor_to_its_end() {
    let busy = merge_busy_intervals(vec![busy(10, (9, 0), (11, 0))]);
    let slots = find_candidate_slots(&busy, day(10), 1, 60, &window());
    assert_eq!(slots[0], slot(10, (11, 0), (12, 0)));
}

#[test]
fn off_grid_busy_end_shifts_subsequent_grid() {
    let busy = merge_busy_intervals(vec![busy(10, (9, 0), (10, 15))]);
    let slots = find_candidate_slots(&busy, day(10), 1, 60, &window());
    assert_eq!(slots[0], slot(10, (10, 15), (11, 15)));
    assert_eq!(slots[1], slot(10, (10, 45), (11, 45)));
}

#[test]
fn candidates_never_straddle_a_busy_start() {
    // Busy 12:00-13:00; a 60-minute slot at 11:30 would overlap.
    let busy = merge_busy_intervals(vec![busy(10, (12, 0), (13, 0))]);
    let slots = find_candidate_slots(&busy, day(10), 1, 60, &window());

    assert!(slots.contains(&slot(10, (11, 0), (12, 0))));
    assert!(!slots.contains(&slot(10, (11, 30), (12, 30))));
    assert!(slots.contains(&slot(10, (13, 0), (14, 0))));
}

#[test]
fn touching_busy_entries_are_both_skipped() {
    let busy = merge_busy_intervals(vec![
        busy(10, (9, 0), (10, 0)),
        busy(10, (10, 0), (11, 0)),
    ]);
    assert_eq!(busy.len(), 2);
    let slots = find_candidate_slots(&busy, day(10), 1, 60, &window());
    assert_eq!(slots[0], slot(10, (11, 0), (12, 0)));
}

#[test]
fn fully_booked_day_yields_candidates_only_on_next_day() {
    let busy = merge_busy_intervals(vec![busy(10, (9, 0), (22, 0))]);
    let slots = find_candidate_slots(&busy, day(10), 2, 60, &window());

    assert!(!slots.is_empty());
    assert!(slots.iter().all(|s| s.start.date() == day(11)));
    assert_eq!(slots[0], slot(11, (9, 0), (10, 0)));
}

#[test]
fn duration_longer_than_window_yields_nothing() {
    let slots = find_candidate_slots(&MergedBusySet::default(), day(10), 7, 900, &window());
    assert!(slots.is_empty());
}

#[test]
fn duration_equal_to_window_yields_one_per_day() {
    let slots = find_candidate_slots(&MergedBusySet::default(), day(10), 3, 780, &window());
    assert_eq!(
        slots,
        vec![
            slot(10, (9, 0), (22, 0)),
            slot(11, (9, 0), (22, 0)),
            slot(12, (9, 0), (22, 0)),
        ]
    );
}

#[test]
fn zero_search_days_yields_nothing() {
    let slots = find_candidate_slots(&MergedBusySet::default(), day(10), 0, 60, &window());
    assert!(slots.is_empty());
}

#[test]
fn overnight_event_blocks_both_days() {
    let busy = merge_busy_intervals(vec![BusyInterval::new(at(10, 20, 0), at(11, 10, 0)).unwrap()]);
    let slots = find_candidate_slots(&busy, day(10), 2, 60, &window());

    let last_day10 = slots.iter().filter(|s| s.start.date() == day(10)).last().unwrap();
    assert_eq!(*last_day10, slot(10, (19, 0), (20, 0)));
    let first_day11 = slots.iter().find(|s| s.start.date() == day(11)).unwrap();
    assert_eq!(*first_day11, slot(11, (10, 0), (11, 0)));
}

#[test]
fn busy_time_outside_window_is_ignored() {
    let busy = merge_busy_intervals(vec![
        busy(10, (6, 0), (8, 0)),
        busy(10, (22, 0), (23, 30)),
    ]);
    let slots = find_candidate_slots(&busy, day(10), 1, 60, &window());
    assert_eq!(slots.len(), 25);
}

#[test]
fn window_ending_at_midnight() {
    let window = BusinessWindow::new(20, 24).unwrap();
    let slots = find_candidate_slots(&MergedBusySet::default(), day(10), 1, 60, &window);
    assert_eq!(slots.len(), 7);
    assert_eq!(slots[6].end, at(11, 0, 0));
}

#[test]
fn output_is_chronological() {
    let busy = merge_busy_intervals(vec![
        busy(10, (10, 0), (11, 0)),
        busy(11, (15, 0), (18, 0)),
    ]);
    let slots = find_candidate_slots(&busy, day(10), 3, 45, &window());
    assert!(slots.windows(2).all(|w| w[0].start < w[1].start));
}
