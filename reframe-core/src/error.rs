//! Errors surfaced by fact generation and the fact graph.

use thiserror::Error;

/// Errors from the fact service and fact graph.
///
/// None of these are retried by the core; the caller decides whether to ask again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactError {
    #[error("Missing required parameter: {0}")]
    InvalidArgument(String),

    #[error("Completion service failed: {0}")]
    UpstreamFailure(String),

    #[error("Generated content was too similar to recent responses")]
    DuplicateContent,

    #[error("No original fact to reframe")]
    NoOriginalFact,
}

impl From<crate::completion::CompletionError> for FactError {
    fn from(err: crate::completion::CompletionError) -> Self {
        FactError::UpstreamFailure(err.to_string())
    }
}
