//! Error taxonomy
//!
//! Only query failures are user-visible. Translation and catalog failures
//! degrade silently inside their components, so no error type exists for
//! them; the speech layer has its own error for payload and backend
//! problems, surfaced to logs rather than to the user.

use thiserror::Error;

/// Default message when the backend rejects a query without a body message.
pub const GENERIC_REJECTION: &str = "Something went wrong";

/// A failed query. Terminal for the submission that issued it.
///
/// The two kinds are distinguished only by message text: `Display` yields
/// exactly the string shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Backend answered with a non-success status
    #[error("{0}")]
    ServerRejected(String),

    /// The request never completed
    #[error("Network error")]
    Unreachable,
}

impl QueryError {
    /// Build a rejection from an optional server-provided message
    pub fn server_rejected(message: Option<String>) -> Self {
        Self::ServerRejected(message.unwrap_or_else(|| GENERIC_REJECTION.to_string()))
    }
}

/// A speech-output failure. Logged, never shown to the user.
#[derive(Error, Debug, Clone)]
pub enum SpeechError {
    #[error("Audio payload error: {0}")]
    Payload(String),

    #[error("Output backend error: {0}")]
    Backend(String),

    #[error("Channel mismatch: {0}")]
    ChannelMismatch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_uses_body_message() {
        let err = QueryError::server_rejected(Some("overloaded".to_string()));
        assert_eq!(err.to_string(), "overloaded");
    }

    #[test]
    fn test_rejection_defaults_generic() {
        let err = QueryError::server_rejected(None);
        assert_eq!(err.to_string(), "Something went wrong");
    }

    #[test]
    fn test_unreachable_message_is_fixed() {
        assert_eq!(QueryError::Unreachable.to_string(), "Network error");
    }
}
