//! Error types shared across the planner

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlannerError>;

/// Root error type for planner operations
///
/// Division guards (zero term, zero rate, non-positive capital base) are not
/// errors; they resolve to defined fallback values inside the calculators.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV processing failed: {0}")]
    Csv(#[from] csv::Error),
}

impl PlannerError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        PlannerError::InvalidInput(msg.into())
    }
}
