//! The text-completion seam the fact service talks to.

use async_trait::async_trait;
use gemini::Gemini;
use thiserror::Error;

/// A failed completion call, carrying the upstream message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CompletionError {
    pub message: String,
}

impl CompletionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<gemini::Error> for CompletionError {
    fn from(err: gemini::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// A black-box service turning one prompt into generated text.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[async_trait]
impl CompletionService for Gemini {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        Ok(self.generate_text(prompt).await?)
    }
}

