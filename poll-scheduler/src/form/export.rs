use std::fs::OpenOptions;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::Result;
use crate::form::submission::VoteSubmission;
use crate::parser::{status_to_str, VoteRecord};
use crate::schedule::{cell_key, Availability, PollGrid, Response};

fn ensure_parent_dir(csv_path: &Path) -> Result<()> {
    if let Some(parent) = csv_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Appends a vote submission to the poll's responses CSV
///
/// Writes one `user_id,date,time,status` row for every cell of the grid (cells the
/// user skipped as `unavailable`), in the format `parser::load_responses` reads back.
/// Because every cell is written, a resubmission fully replaces the earlier rows of
/// that user when the file is loaded again.
pub fn export_submission_to_csv(
    submission: &VoteSubmission,
    grid: &PollGrid,
    csv_path: &Path,
) -> Result<()> {
    let file_exists = csv_path.exists() && csv_path.metadata()?.len() > 0;
    ensure_parent_dir(csv_path)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;

    let mut wtr = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    for date in &grid.date_options {
        for slot in &grid.time_slots {
            let status = submission
                .availability
                .get(&cell_key(date, &slot.time))
                .copied()
                .unwrap_or(Availability::Unavailable);
            wtr.serialize(VoteRecord {
                user_id: submission.user_id.clone(),
                date: date.clone(),
                time: slot.time.clone(),
                status: status_to_str(status).to_string(),
            })?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Replaces the poll's responses CSV with `responses`, one row per recorded vote
///
/// Uploaded files may lack a trailing newline or order their columns differently,
/// so the log is always rewritten in the `user_id,date,time,status` layout that
/// `export_submission_to_csv` appends to.
pub fn write_responses_to_csv(responses: &[Response], csv_path: &Path) -> Result<()> {
    ensure_parent_dir(csv_path)?;

    let mut wtr = WriterBuilder::new().has_headers(true).from_path(csv_path)?;
    for response in responses {
        let mut keys: Vec<&String> = response.availability.keys().collect();
        keys.sort();
        for key in keys {
            // keys come from date and time columns; the date itself never contains a 'T'
            let Some((date, time)) = key.split_once('T') else {
                continue;
            };
            wtr.serialize(VoteRecord {
                user_id: response.user_id.clone(),
                date: date.to_string(),
                time: time.to_string(),
                status: status_to_str(response.availability[key]).to_string(),
            })?;
        }
    }

    wtr.flush()?;
    Ok(())
}
