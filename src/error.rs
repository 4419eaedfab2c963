use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExplainError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("nesting exceeds the maximum depth of {max}")]
    NestingTooDeep { max: usize },

    #[error("malformed explanation: {0}")]
    MalformedExplanation(String),

    #[error("unsupported conjunct: {0}")]
    UnsupportedConjunct(String),

    #[error("null value: {0}")]
    NullValue(String),
}

impl From<serde_json::Error> for ExplainError {
    fn from(err: serde_json::Error) -> Self {
        ExplainError::InvalidJson(err.to_string())
    }
}
