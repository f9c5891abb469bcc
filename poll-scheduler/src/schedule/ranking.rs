use std::cmp::Ordering;

use super::aggregate::aggregate_slot;
use super::categorize::categorize_users;
use super::scoring::score_window;
use super::types::{PollGrid, Response, ScoringMode, SlotAggregate, WindowScore};
use super::windows::{enumerate_windows, CandidateWindow};

/// Maximum number of windows returned by `find_best_windows`
pub const TOP_K: usize = 3;

fn score_candidate(mode: &ScoringMode, window: &CandidateWindow, responses: &[Response]) -> WindowScore {
    let breakdown: Vec<SlotAggregate> = window
        .slots
        .iter()
        .map(|slot| aggregate_slot(window.date, slot, responses))
        .collect();
    let metrics = score_window(mode, &breakdown);
    let users = categorize_users(responses, window.date, window.slots);

    // enumerate_windows never yields an empty slot run
    let start_time = window.slots.first().map(|s| s.time.clone()).unwrap_or_default();
    let end_time = window.slots.last().map(|s| s.time.clone()).unwrap_or_default();

    WindowScore {
        date: window.date.to_string(),
        start_time,
        end_time,
        start_slot_index: window.start_index,
        min_available: metrics.min_available,
        avg_available: metrics.avg_available,
        avg_maybe: metrics.avg_maybe,
        composite_score: metrics.composite_score,
        per_slot_breakdown: breakdown,
        guaranteed_users: users.guaranteed,
        likely_users: users.likely,
        unlikely_users: users.unlikely,
    }
}

/// Scores every candidate window of the grid, in enumeration order
pub fn score_all_windows(grid: &PollGrid, responses: &[Response]) -> Vec<WindowScore> {
    let mode = ScoringMode::from_duration(grid.event_duration_minutes);
    enumerate_windows(&grid.date_options, &grid.time_slots, mode.slots_per_window())
        .iter()
        .map(|window| score_candidate(&mode, window, responses))
        .collect()
}

/// Ranks windows by composite score and keeps the best `TOP_K`
///
/// The sort is stable, so ties keep enumeration order (earliest date, then earliest
/// slot). The top `TOP_K` are taken first and windows nobody is available for are
/// dropped afterwards, which can leave fewer than `TOP_K` results even when lower
/// ranked windows would have qualified.
pub fn select_top_windows(mut windows: Vec<WindowScore>) -> Vec<WindowScore> {
    windows.sort_by(|a, b| {
        b.composite_score
            .partial_cmp(&a.composite_score)
            .unwrap_or(Ordering::Equal)
    });
    windows.truncate(TOP_K);
    windows.retain(|w| w.min_available > 0);
    windows
}

/// Best candidate meeting windows for a poll snapshot
///
/// Pure and deterministic: no responses or no feasible window both give an empty list.
pub fn find_best_windows(grid: &PollGrid, responses: &[Response]) -> Vec<WindowScore> {
    if responses.is_empty() {
        return Vec::new();
    }
    select_top_windows(score_all_windows(grid, responses))
}
