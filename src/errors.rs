use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for document, configuration and submission failures.
#[derive(Debug, Error)]
pub enum EnrolmentError {
    #[error("Unknown section: {0}")]
    UnknownSection(String),
    #[error("Unknown field `{field}` in section `{section}`")]
    UnknownField { section: &'static str, field: String },
    #[error("Field `{field}` expects {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

pub type Result<T> = StdResult<T, EnrolmentError>;

/// Failures surfaced by the submission adapter. The display text is what the
/// wizard shows in its error banner.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Failed to store student enrollment data: {0}")]
    Transport(String),
    #[error("Server returned invalid JSON: {0}")]
    InvalidJson(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Failed to encode submission: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SubmissionError {
    /// HTTP status attached to the failure, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            SubmissionError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        SubmissionError::Transport(err.to_string())
    }
}
