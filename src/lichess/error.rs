use thiserror::Error;

use crate::chess::ReadError;

/// Errors from building or sending a games export request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid perf type '{value}'. Valid values: {valid}")]
    InvalidPerfType { value: String, valid: String },

    #[error("invalid date '{value}', expected YYYY-MM-DD ({reason})")]
    InvalidDate { value: String, reason: String },

    #[error("start date {start} is after end date {end}")]
    InvertedDateRange { start: String, end: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed API request: {url}. Code/Error: {status}/{reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    #[error(transparent)]
    Pgn(#[from] ReadError),
}
