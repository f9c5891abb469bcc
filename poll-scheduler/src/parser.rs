use csv::Reader;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::schedule::{cell_key, Availability, PollGrid, Response};

/// A poll grid together with the responses collected so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollSnapshot {
    pub poll: PollGrid,
    #[serde(default)]
    pub responses: Vec<Response>,
}

/// One row of the long-format responses CSV: `user_id,date,time,status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRecord {
    pub user_id: String,
    pub date: String,
    pub time: String,
    pub status: String,
}

/// Parses a vote status from the various spellings people type
///
/// Anything unrecognised counts as unavailable, same as a missing vote.
pub fn parse_status(value: &str) -> Availability {
    let lower = value.trim().to_lowercase();
    match lower.as_str() {
        "available" | "yes" | "y" | "1" => Availability::Available,
        "maybe" | "if needed" | "?" => Availability::Maybe,
        _ => Availability::Unavailable,
    }
}

pub fn status_to_str(status: Availability) -> &'static str {
    match status {
        Availability::Available => "available",
        Availability::Maybe => "maybe",
        Availability::Unavailable => "unavailable",
    }
}

/// Loads a poll grid from a JSON file
pub fn load_poll<P: AsRef<Path>>(path: P) -> Result<PollGrid> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Loads a `{ "poll": ..., "responses": [...] }` snapshot from a JSON file
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<PollSnapshot> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Loads responses from a long-format CSV file
///
/// Rows for the same user merge into one response; a later row for the same cell
/// replaces the earlier one, so resubmissions win. Responses keep the order in which
/// users first appear.
pub fn load_responses<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Response>> {
    let reader = Reader::from_path(csv_path)?;
    read_responses(reader)
}

/// Same as `load_responses`, from an in-memory CSV body (e.g. an upload)
pub fn parse_responses_csv(body: &[u8]) -> Result<Vec<Response>> {
    read_responses(Reader::from_reader(body))
}

fn read_responses<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Response>> {
    let mut responses: Vec<Response> = Vec::new();
    let mut index_by_user: HashMap<String, usize> = HashMap::new();

    for result in reader.deserialize() {
        let record: VoteRecord = result?;
        let user_id = record.user_id.trim().to_string();

        // Skip rows that cannot be attributed to anyone
        if user_id.is_empty() {
            continue;
        }

        let index = *index_by_user.entry(user_id.clone()).or_insert_with(|| {
            responses.push(Response::new(user_id.clone()));
            responses.len() - 1
        });
        responses[index].availability.insert(
            cell_key(record.date.trim(), record.time.trim()),
            parse_status(&record.status),
        );
    }

    Ok(responses)
}
