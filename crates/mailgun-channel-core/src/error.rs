/// Error types for the Mailgun channel provider
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailgunError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Dispatch cancelled")]
    Cancelled,
}

impl MailgunError {
    /// Determines if an error is retriable
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Validation(_) => false,
            Self::Config(_) => false,
            Self::Template(_) => false,
            Self::Serialization(_) => false,
            Self::Cancelled => false,
        }
    }
}

impl From<serde_json::Error> for MailgunError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// A non-success response from the Mailgun API.
///
/// Carried as data on a failed dispatch result rather than returned as an
/// error, so the host decides whether to retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (status {status_code})")]
pub struct DispatchFailure {
    pub message: String,
    pub status_code: u16,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retriable_errors() {
        assert!(MailgunError::Transport("timeout".to_string()).is_retriable());
        assert!(!MailgunError::Validation("test".to_string()).is_retriable());
        assert!(!MailgunError::Cancelled.is_retriable());
    }

    #[test]
    fn test_error_display() {
        let err = MailgunError::Validation("At least one recipient is required.".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: At least one recipient is required."
        );
    }

    #[test]
    fn test_dispatch_failure_display() {
        let failure = DispatchFailure {
            message: "Forbidden".to_string(),
            status_code: 401,
            body: "Forbidden".to_string(),
        };
        assert_eq!(failure.to_string(), "Forbidden (status 401)");
    }

    #[test]
    fn test_from_serde_error() {
        let err: MailgunError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, MailgunError::Serialization(_)));
    }
}
