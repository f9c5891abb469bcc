use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{PollError, Result};
use crate::schedule::{Availability, PollGrid, Response};

/// An accepted vote submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteSubmission {
    pub timestamp: String,
    pub user_id: String,
    pub availability: HashMap<String, Availability>,
}

/// Vote submission request from the poll page
#[derive(Debug, Deserialize)]
pub struct VoteSubmissionRequest {
    pub user_id: String,
    #[serde(default)]
    pub availability: HashMap<String, Availability>,
}

impl VoteSubmission {
    pub fn from_request(req: VoteSubmissionRequest) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            user_id: req.user_id.trim().to_string(),
            availability: req.availability,
        }
    }

    pub fn to_response(&self) -> Response {
        Response {
            user_id: self.user_id.clone(),
            availability: self.availability.clone(),
        }
    }
}

/// Validates a vote submission against the poll it is for
pub fn validate_submission(req: &VoteSubmissionRequest, grid: &PollGrid) -> Result<()> {
    if req.user_id.trim().is_empty() {
        return Err(PollError::InvalidSubmission("User ID is required".to_string()));
    }

    // Every voted cell must exist in the grid
    let mut unknown: Vec<&str> = req
        .availability
        .keys()
        .filter(|key| !grid.contains_cell(key))
        .map(|key| key.as_str())
        .collect();
    if !unknown.is_empty() {
        unknown.sort();
        return Err(PollError::InvalidSubmission(format!(
            "Unknown time slot(s): {}",
            unknown.join(", ")
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::TimeSlot;

    fn poll() -> PollGrid {
        PollGrid {
            date_options: vec!["2026-01-10".to_string()],
            time_slots: vec![TimeSlot::new("1", "09:00"), TimeSlot::new("2", "10:00")],
            event_duration_minutes: None,
        }
    }

    fn request(user_id: &str, keys: &[&str]) -> VoteSubmissionRequest {
        VoteSubmissionRequest {
            user_id: user_id.to_string(),
            availability: keys.iter().map(|k| (k.to_string(), Availability::Available)).collect(),
        }
    }

    #[test]
    fn test_valid_submission() {
        assert!(validate_submission(&request("alice", &["2026-01-10T09:00"]), &poll()).is_ok());
        // voting on nothing is allowed: every cell counts as unavailable
        assert!(validate_submission(&request("alice", &[]), &poll()).is_ok());
    }

    #[test]
    fn test_missing_user_id() {
        let err = validate_submission(&request("  ", &[]), &poll()).unwrap_err();
        assert!(err.to_string().contains("User ID is required"));
    }

    #[test]
    fn test_unknown_cells_rejected() {
        let err = validate_submission(
            &request("alice", &["2026-01-10T11:00", "2026-01-09T09:00", "2026-01-10T09:00"]),
            &poll(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid submission: Unknown time slot(s): 2026-01-09T09:00, 2026-01-10T11:00"
        );
    }

    #[test]
    fn test_from_request_trims_user_id() {
        let submission = VoteSubmission::from_request(request(" alice ", &["2026-01-10T09:00"]));
        assert_eq!(submission.user_id, "alice");
        assert_eq!(submission.to_response().availability.len(), 1);
        assert!(!submission.timestamp.is_empty());
    }
}
