use thiserror::Error;

/// Errors raised around the ranking engine: loading, validating and storing polls
///
/// The engine itself never fails; these cover the I/O and input boundaries.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid poll: {0}")]
    InvalidPoll(String),

    #[error("invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("poll not found: {0}")]
    PollNotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, PollError>;
