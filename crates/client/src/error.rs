//! Failures of one recommendation call.

use countryguide_core::PayloadError;
use thiserror::Error;

/// Why a submitted query ended in `Failure`.
///
/// The `Display` text is what the session shows to the user; it is never empty.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The service could not be reached or the body could not be read.
    #[error("could not reach the recommendation service: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status. The body is not inspected.
    #[error("recommendation service responded with status {0}")]
    Status(u16),

    /// The caller stopped waiting before the call resolved.
    #[error("recommendation request was abandoned before it completed")]
    Abandoned,

    /// The body did not match the expected response shape.
    #[error("could not decode the recommendation response: {0}")]
    InvalidPayload(String),
}

impl ServiceError {
    /// Whether resubmitting the same query can reasonably succeed.
    ///
    /// Retrying is always a user action; the session never retries.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ServiceError::InvalidPayload(_))
    }
}

impl From<PayloadError> for ServiceError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::InvalidPayload(msg) => ServiceError::InvalidPayload(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_never_empty() {
        let errors = [
            ServiceError::Transport(String::new()),
            ServiceError::Status(500),
            ServiceError::Abandoned,
            ServiceError::InvalidPayload(String::new()),
        ];
        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn only_decoding_failures_are_not_retryable() {
        assert!(ServiceError::Transport("refused".into()).is_retryable());
        assert!(ServiceError::Status(503).is_retryable());
        assert!(ServiceError::Abandoned.is_retryable());
        assert!(!ServiceError::from(PayloadError::invalid("bad")).is_retryable());
    }
}
