use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{PollError, Result};
use super::aggregate::aggregate_slot;
use super::cell::cell_key;
use super::slot_utils::{parse_time_to_minutes, SlotTime};
use super::types::{PollGrid, Response};

/// Expected gap between consecutive slots, in minutes
pub const SLOT_MINUTES: u32 = 60;

/// One cell of the availability heat grid
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub date: String,
    pub time: String,
    pub cell_key: String,
    pub available_count: usize,
    pub maybe_count: usize,
    pub unavailable_count: usize,
    /// available / respondents, 0.0 when nobody answered
    pub availability_ratio: f64,
}

/// Per-cell vote counts in grid order (date by date, slot by slot)
pub fn availability_grid(grid: &PollGrid, responses: &[Response]) -> Vec<GridCell> {
    let respondents = responses.len();
    let mut cells = Vec::with_capacity(grid.date_options.len() * grid.time_slots.len());

    for date in &grid.date_options {
        for slot in &grid.time_slots {
            let aggregate = aggregate_slot(date, slot, responses);
            let availability_ratio = if respondents == 0 {
                0.0
            } else {
                aggregate.available_count as f64 / respondents as f64
            };
            cells.push(GridCell {
                date: date.clone(),
                time: slot.time.clone(),
                cell_key: cell_key(date, &slot.time),
                available_count: aggregate.available_count,
                maybe_count: aggregate.maybe_count,
                unavailable_count: aggregate.unavailable_count,
                availability_ratio,
            });
        }
    }

    cells
}

// Cell keys embed the time verbatim, so "9:00" and "09:00" would be different cells
fn is_zero_padded(time: &str) -> bool {
    let bytes = time.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && bytes.iter().enumerate().all(|(i, b)| i == 2 || b.is_ascii_digit())
}

impl PollGrid {
    /// Checks the grid shape the engine relies on; reports the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.date_options.is_empty() {
            return Err(PollError::InvalidPoll("poll has no dates".to_string()));
        }
        if self.time_slots.is_empty() {
            return Err(PollError::InvalidPoll("poll has no time slots".to_string()));
        }

        let mut previous: Option<NaiveDate> = None;
        for date in &self.date_options {
            let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| PollError::InvalidPoll(format!("invalid date: {}", date)))?;
            if let Some(prev) = previous {
                if parsed <= prev {
                    return Err(PollError::InvalidPoll(format!(
                        "dates must be unique and ascending, {} follows {}",
                        date, prev
                    )));
                }
            }
            previous = Some(parsed);
        }

        let mut previous_minutes: Option<u32> = None;
        let mut ids = HashSet::new();
        for slot in &self.time_slots {
            if !ids.insert(slot.id.as_str()) {
                return Err(PollError::InvalidPoll(format!("duplicate slot id: {}", slot.id)));
            }
            let minutes = match SlotTime::parse(&slot.time) {
                Some(SlotTime::TwentyFourHour { .. }) if is_zero_padded(&slot.time) => {
                    parse_time_to_minutes(&slot.time)
                }
                _ => None,
            }
            .ok_or_else(|| PollError::InvalidPoll(format!("invalid slot time: {}", slot.time)))?;

            if let Some(prev) = previous_minutes {
                if minutes != prev + SLOT_MINUTES {
                    return Err(PollError::InvalidPoll(format!(
                        "slot {} is not one hour after the previous slot",
                        slot.time
                    )));
                }
            }
            previous_minutes = Some(minutes);
        }

        if let Some(duration) = self.event_duration_minutes {
            if duration <= 0 {
                return Err(PollError::InvalidPoll(format!(
                    "event duration must be positive, got {}",
                    duration
                )));
            }
        }

        Ok(())
    }

    /// True when `key` addresses a (date, slot) cell of this grid
    pub fn contains_cell(&self, key: &str) -> bool {
        self.date_options.iter().any(|date| {
            self.time_slots
                .iter()
                .any(|slot| cell_key(date, &slot.time) == key)
        })
    }

    pub fn cell_keys(&self) -> Vec<String> {
        self.date_options
            .iter()
            .flat_map(|date| self.time_slots.iter().map(move |slot| cell_key(date, &slot.time)))
            .collect()
    }
}
