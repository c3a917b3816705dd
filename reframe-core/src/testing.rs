//! Testing utilities.
//!
//! - `MockCompletion` for deterministic runs without API calls
//! - `TestHarness` for scripted fetch/reframe scenarios

use crate::canvas::FactCanvas;
use crate::completion::{CompletionError, CompletionService};
use crate::error::FactError;
use crate::geometry::Size;
use crate::layout::LayoutMode;
use crate::persist::MemoryStore;
use crate::sampler::FixedSampler;
use crate::service::{FactService, FactServiceConfig};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// A scripted completion result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    Text(String),
    Error(String),
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        MockReply::Text(text.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        MockReply::Error(message.into())
    }
}

/// A completion service that replays scripted replies in order.
///
/// Once the script runs out every call fails.
#[derive(Debug, Default)]
pub struct MockCompletion {
    replies: Mutex<VecDeque<MockReply>>,
    prompts: Mutex<Vec<String>>,
}

impl MockCompletion {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Append a reply to the end of the script.
    pub fn queue(&self, reply: MockReply) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
    }

    /// Every prompt received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl CompletionService for MockCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        let next = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match next {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Error(message)) => Err(CompletionError::new(message)),
            None => Err(CompletionError::new("no more scripted replies")),
        }
    }
}

/// A fact service and canvas wired to a [`MockCompletion`].
pub struct TestHarness {
    pub mock: Arc<MockCompletion>,
    pub service: FactService,
    pub sampler: FixedSampler,
    pub canvas: FactCanvas<MemoryStore>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_mode(LayoutMode::Radial)
    }

    pub fn with_mode(mode: LayoutMode) -> Self {
        let mock = Arc::new(MockCompletion::default());
        let config = FactServiceConfig::default().with_current_year(2025);
        Self {
            service: FactService::with_config(mock.clone(), config),
            mock,
            sampler: FixedSampler::new(["chemistry", "ecology"]),
            canvas: FactCanvas::open(MemoryStore::new(), Size::new(1200.0, 800.0), mode),
        }
    }

    pub fn queue_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.mock.queue(MockReply::text(text));
        self
    }

    pub fn queue_error(&mut self, message: impl Into<String>) -> &mut Self {
        self.mock.queue(MockReply::error(message));
        self
    }

    /// Fetch an initial fact and place it on the canvas.
    pub async fn fetch(&mut self) -> Result<String, FactError> {
        let fact = self.service.initial_fact(&mut self.sampler).await?;
        self.canvas.set_original(fact.text.clone());
        Ok(fact.text)
    }

    /// Reframe the current original through `lens` and append it.
    pub async fn reframe(&mut self, lens: &str) -> Result<String, FactError> {
        let original = self
            .canvas
            .graph()
            .original()
            .map(|n| n.text().to_string())
            .ok_or(FactError::NoOriginalFact)?;
        let text = self.service.reframe_fact(&original, lens).await?;
        self.canvas.append_reframed(text.clone(), lens)?;
        Ok(text)
    }

    pub fn reframed_count(&self) -> usize {
        self.canvas.graph().reframed().len()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_in_order_then_fails() {
        let mock = MockCompletion::new(vec![MockReply::text("one"), MockReply::error("two")]);
        assert_eq!(mock.complete("a").await.unwrap(), "one");
        assert_eq!(mock.complete("b").await.unwrap_err().message, "two");
        assert!(mock.complete("c").await.is_err());
        assert_eq!(mock.prompts(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_harness_flow() {
        let mut harness = TestHarness::new();
        harness
            .queue_text("Coral reefs lost 14% of their cover between 2009 and 2018.")
            .queue_text("Reefs as a fading fresco.");

        harness.fetch().await.unwrap();
        harness.reframe("Art").await.unwrap();
        assert_eq!(harness.reframed_count(), 1);
        assert_eq!(harness.mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_harness_reframe_without_fact() {
        let mut harness = TestHarness::new();
        let err = harness.reframe("Art").await.unwrap_err();
        assert_eq!(err, FactError::NoOriginalFact);
        assert_eq!(harness.mock.call_count(), 0);
    }
}
