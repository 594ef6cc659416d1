//! Typed errors for the agent layer and the orchestrator.

use std::time::Duration;
use thiserror::Error;

/// Failure of a call to the external reasoning service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("API key not set (expected environment variable {0})")]
    MissingApiKey(String),

    #[error("Cannot connect to reasoning service at {0}")]
    Connection(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Reasoning service error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Request failed: {0}")]
    Request(String),
}

/// Agent registry lookup failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),
}

/// Errors that abort a workflow before any agent runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error("Question is required")]
    MissingQuestion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ServiceError::Timeout(Duration::from_secs(30)).to_string(),
            "Request timed out after 30s"
        );
        assert_eq!(
            ServiceError::Timeout(Duration::from_millis(250)).to_string(),
            "Request timed out after 250ms"
        );
        assert_eq!(
            ServiceError::Api {
                status: 429,
                body: "rate limited".to_string()
            }
            .to_string(),
            "Reasoning service error 429: rate limited"
        );
        assert_eq!(
            RegistryError::UnknownAgent("orchestrator".to_string()).to_string(),
            "Unknown agent: orchestrator"
        );
        assert_eq!(WorkflowError::MissingQuestion.to_string(), "Question is required");
    }
}
