use std::collections::HashMap;
use serde::{Serialize, Deserialize};

/// A single vote for one (date, slot) cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Maybe,
    Unavailable,
}

/// One hourly row of the poll grid, shared by every date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
    /// Slot start, "HH:MM" 24-hour
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl TimeSlot {
    pub fn new(id: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            time: time.into(),
            label: None,
        }
    }
}

/// Dates x hourly slots, plus the optional meeting length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollGrid {
    pub date_options: Vec<String>,
    pub time_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub event_duration_minutes: Option<i64>,
}

/// One respondent's votes, keyed by cell key (see `cell::cell_key`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub user_id: String,
    #[serde(default)]
    pub availability: HashMap<String, Availability>,
}

impl Response {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            availability: HashMap::new(),
        }
    }
}

/// Vote counts for one cell. The three counts always sum to the number of responses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAggregate {
    pub time: String,
    pub available_count: usize,
    pub maybe_count: usize,
    pub unavailable_count: usize,
}

/// A scored candidate window. Recomputed on every call, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowScore {
    pub date: String,
    pub start_time: String,
    /// Start time of the window's last slot
    pub end_time: String,
    pub start_slot_index: usize,
    pub min_available: usize,
    pub avg_available: f64,
    pub avg_maybe: f64,
    pub composite_score: f64,
    pub per_slot_breakdown: Vec<SlotAggregate>,
    pub guaranteed_users: Vec<String>,
    pub likely_users: Vec<String>,
    pub unlikely_users: Vec<String>,
}

/// Weights of the composite score in duration mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub avg: f64,
    pub min: f64,
    pub maybe: f64,
}

/// How windows are sized and scored
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoringMode {
    /// No usable duration: single-slot windows, `available + 0.5 * maybe`
    Fallback,
    /// Windows of `slots_per_window` slots scored with weighted averages
    Duration {
        minutes: i64,
        slots_per_window: usize,
        weights: Weights,
    },
}

/// Attendance confidence of one respondent for one window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Guaranteed,
    Likely,
    Unlikely,
}
