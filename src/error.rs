use crate::domain::form::ValidationErrors;
use thiserror::Error;

/// Failure reported by an order submission backend.
///
/// The simulated service never produces one; a real order-processing
/// integration returns these and the workflow routes them to the failure path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("order rejected ({code}): {message}")]
    Rejected { code: String, message: String },
    #[error("order service unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("Submission failed: {0}")]
    Submission(#[from] SubmissionError),
    #[error("Catalog error: {0}")]
    Catalog(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Missing CSV column: {0}")]
    MissingColumn(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ValidationErrors> for OrderError {
    fn from(errors: ValidationErrors) -> Self {
        OrderError::Validation(errors)
    }
}

pub type Result<T> = std::result::Result<T, OrderError>;
