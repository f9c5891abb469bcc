pub mod submission;
pub mod export;

pub use submission::{VoteSubmission, VoteSubmissionRequest, validate_submission};
pub use export::{export_submission_to_csv, write_responses_to_csv};
