//! Availability-grid scheduling engine.
//!
//! One pure pipeline shared by every presentation surface:
//! enumerate windows, aggregate votes per slot, score, categorize respondents,
//! then keep the top few. Nothing here performs I/O or keeps state between calls.

pub mod types;
pub mod cell;
pub mod aggregate;
pub mod windows;
pub mod scoring;
pub mod categorize;
pub mod ranking;
pub mod slot_utils;
pub mod grid;

pub use types::{Availability, Category, PollGrid, Response, ScoringMode, SlotAggregate, TimeSlot, WindowScore};
pub use cell::{cell_key, status_of};
pub use aggregate::aggregate_slot;
pub use ranking::{find_best_windows, score_all_windows, select_top_windows, TOP_K};
pub use slot_utils::{slot_end_time, window_display};
pub use grid::{availability_grid, GridCell};
