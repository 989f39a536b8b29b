//! Payload error model.

use thiserror::Error;

/// Result type used when decoding service payloads.
pub type PayloadResult<T> = Result<T, PayloadError>;

/// A service payload did not have the expected shape.
///
/// Only structural checks live here; score semantics are never validated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl PayloadError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }
}

impl From<serde_json::Error> for PayloadError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidPayload(err.to_string())
    }
}
