use std::fs::File;
use std::io::Write;

use crate::error::Result;
use crate::schedule::{find_best_windows, window_display, PollGrid, Response, WindowScore};

/// Shown instead of a ranking when no window qualifies
pub const NOT_ENOUGH_DATA: &str = "Not enough data yet - ask more people to vote!";

/// Joins user ids for display, "nobody" when the list is empty
pub fn format_user_list(users: &[String]) -> String {
    if users.is_empty() {
        "nobody".to_string()
    } else {
        users.join(", ")
    }
}

/// Composite score as a share of respondents, rounded and capped at 100
pub fn score_percentage(window: &WindowScore, respondents: usize) -> u32 {
    if respondents == 0 {
        return 0;
    }
    let pct = (window.composite_score / respondents as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u32
}

/// Renders ranked windows as a chat message
pub fn format_windows_message(windows: &[WindowScore], respondents: usize) -> String {
    let mut message = format!(
        "Best times ({} {} so far)\n",
        respondents,
        if respondents == 1 { "response" } else { "responses" }
    );

    if windows.is_empty() {
        message.push_str(NOT_ENOUGH_DATA);
        message.push('\n');
        return message;
    }

    for (rank, window) in windows.iter().enumerate() {
        message.push_str(&format!(
            "{}. {} ({}%)\n",
            rank + 1,
            window_display(window),
            score_percentage(window, respondents)
        ));
        message.push_str(&format!("   Guaranteed: {}\n", format_user_list(&window.guaranteed_users)));
        if !window.likely_users.is_empty() {
            message.push_str(&format!("   Likely: {}\n", format_user_list(&window.likely_users)));
        }
        if !window.unlikely_users.is_empty() {
            message.push_str(&format!("   Unlikely: {}\n", format_user_list(&window.unlikely_users)));
        }
    }

    message
}

/// Ranks the snapshot and renders the chat message for it
pub fn format_best_times_message(grid: &PollGrid, responses: &[Response]) -> String {
    let windows = find_best_windows(grid, responses);
    format_windows_message(&windows, responses.len())
}

/// Writes the best-times report to a file
pub fn write_best_windows_to_file(
    grid: &PollGrid,
    responses: &[Response],
    filename: &str,
) -> Result<()> {
    let mut file = File::create(filename)?;
    write!(file, "{}", format_best_times_message(grid, responses))?;
    Ok(())
}

/// Prints the best windows with their per-slot breakdown
pub fn print_best_windows(grid: &PollGrid, responses: &[Response]) {
    let windows = find_best_windows(grid, responses);

    println!("\n=== Best Meeting Times ===");
    println!("Dates: {}, slots per date: {}, responses: {}",
        grid.date_options.len(), grid.time_slots.len(), responses.len());
    match grid.event_duration_minutes {
        Some(minutes) if minutes > 0 => println!("Meeting length: {} minutes", minutes),
        _ => println!("Meeting length: not set (ranking single slots)"),
    }
    println!();
    print!("{}", format_windows_message(&windows, responses.len()));

    for (rank, window) in windows.iter().enumerate() {
        println!("\n#{} score {:.2} (min {}, avg {:.2}, maybe {:.2})",
            rank + 1, window.composite_score, window.min_available, window.avg_available, window.avg_maybe);
        for slot in &window.per_slot_breakdown {
            println!("  {} -> {} available, {} maybe, {} unavailable",
                slot.time, slot.available_count, slot.maybe_count, slot.unavailable_count);
        }
    }
}
