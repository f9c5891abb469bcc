use super::types::{Availability, Response};

/// Builds the lookup key for a (date, slot) cell, e.g. "2026-01-10T09:00"
///
/// Keys are only ever used for map lookup and are never parsed back.
pub fn cell_key(date: &str, time: &str) -> String {
    format!("{}T{}", date, time)
}

/// Returns the respondent's vote for a cell, `Unavailable` when they did not vote on it
pub fn status_of(response: &Response, date: &str, time: &str) -> Availability {
    response
        .availability
        .get(&cell_key(date, time))
        .copied()
        .unwrap_or(Availability::Unavailable)
}
