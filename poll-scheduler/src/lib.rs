//! Group availability polls: collect hourly votes over a date range and rank the
//! best meeting windows.
//!
//! The ranking lives in [`schedule`] and is shared by the chat report
//! ([`display`]) and the poll page API ([`web`]) so both always agree.

pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod parser;
pub mod sample;
pub mod schedule;
pub mod web;

pub use error::{PollError, Result};
pub use schedule::{find_best_windows, PollGrid, Response, WindowScore};
