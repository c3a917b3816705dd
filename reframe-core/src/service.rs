//! FactService - generates initial facts and reframes them through a lens.
//!
//! Wraps the prompt builders, one completion call per operation, and the
//! novelty filter. Only initial facts are checked against recent output;
//! reframed text is returned as-is.

use crate::completion::CompletionService;
use crate::error::FactError;
use crate::novelty::{NoveltyFilter, DEFAULT_CAPACITY};
use crate::prompt::{build_fact_prompt, build_reframe_prompt};
use crate::sampler::CategorySampler;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Science categories initial facts are drawn from.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "quantum physics",
    "marine biology",
    "neuroscience",
    "astronomy",
    "modern technology",
    "plant biology",
    "chemistry",
    "genetics",
    "climate science",
    "computer science",
    "materials science",
    "ecology",
    "renewable energy",
    "artificial intelligence",
    "biotechnology",
];

/// Prompt used to check that the completion service answers at all.
const PROBE_PROMPT: &str = "Say 'API is working!'";

/// Configuration for a [`FactService`].
#[derive(Debug, Clone)]
pub struct FactServiceConfig {
    /// Categories handed to the sampler.
    pub categories: Vec<String>,

    /// How many years back "recent" discoveries may go.
    pub recency_window_years: u32,

    /// How many accepted facts the novelty filter remembers.
    pub history_capacity: usize,

    /// Fixed year for prompts; `None` reads the system clock.
    pub current_year: Option<i32>,
}

impl Default for FactServiceConfig {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            recency_window_years: 5,
            history_capacity: DEFAULT_CAPACITY,
            current_year: None,
        }
    }
}

impl FactServiceConfig {
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_recency_window(mut self, years: u32) -> Self {
        self.recency_window_years = years;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = Some(year);
        self
    }
}

/// A freshly generated original fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialFact {
    pub text: String,
    pub request_id: String,
    pub categories: Vec<String>,
}

/// Generates and reframes facts through a completion service.
pub struct FactService {
    completion: Arc<dyn CompletionService>,
    config: FactServiceConfig,
    history: Mutex<NoveltyFilter>,
}

impl FactService {
    /// Create a service with the default configuration.
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self::with_config(completion, FactServiceConfig::default())
    }

    pub fn with_config(completion: Arc<dyn CompletionService>, config: FactServiceConfig) -> Self {
        let history = NoveltyFilter::new(config.history_capacity);
        Self {
            completion,
            config,
            history: Mutex::new(history),
        }
    }

    pub fn config(&self) -> &FactServiceConfig {
        &self.config
    }

    /// Number of facts currently remembered by the novelty filter.
    pub async fn history_len(&self) -> usize {
        self.history.lock().await.len()
    }

    /// Generate a new original fact.
    ///
    /// Makes exactly one completion call. A result too close to a recent fact
    /// fails with [`FactError::DuplicateContent`] instead of being retried.
    pub async fn initial_fact<S>(&self, sampler: &mut S) -> Result<InitialFact, FactError>
    where
        S: CategorySampler + ?Sized,
    {
        let request_id = Uuid::new_v4().to_string();
        let categories = sampler.pick(&self.config.categories);
        let prompt = build_fact_prompt(
            &categories,
            self.config.recency_window_years,
            self.current_year(),
        )?;

        tracing::info!(%request_id, ?categories, "generating initial fact");
        tracing::debug!(prompt = %preview(&prompt), "fact prompt");

        let generated = self.call(&prompt).await?;
        let text = generated.trim().to_string();

        {
            let mut history = self.history.lock().await;
            if history.is_too_similar(&text) {
                tracing::warn!(%request_id, "generated fact too similar to recent output");
                return Err(FactError::DuplicateContent);
            }
            history.record(text.clone());
        }

        tracing::info!(%request_id, fact = %text, "generated initial fact");
        Ok(InitialFact {
            text,
            request_id,
            categories,
        })
    }

    /// Re-express `text` through `lens`.
    pub async fn reframe_fact(&self, text: &str, lens: &str) -> Result<String, FactError> {
        let prompt = build_reframe_prompt(text, lens)?;
        tracing::info!(lens, "reframing fact");

        let reframed = self.call(&prompt).await?;
        Ok(reframed.trim().to_string())
    }

    /// Ask the completion service for a fixed reply to confirm it is reachable.
    pub async fn check_upstream(&self) -> Result<String, FactError> {
        let reply = self.call(PROBE_PROMPT).await?;
        Ok(reply.trim().to_string())
    }

    async fn call(&self, prompt: &str) -> Result<String, FactError> {
        match self.completion.complete(prompt).await {
            Ok(text) if text.trim().is_empty() => {
                tracing::error!("completion service returned no text");
                Err(FactError::UpstreamFailure(
                    "completion service returned no text".to_string(),
                ))
            }
            Ok(text) => Ok(text),
            Err(err) => {
                tracing::error!(error = %err, "completion call failed");
                Err(err.into())
            }
        }
    }

    fn current_year(&self) -> i32 {
        self.config
            .current_year
            .unwrap_or_else(|| chrono::Utc::now().year())
    }
}

/// First 100 characters of a prompt, for logs.
fn preview(prompt: &str) -> String {
    let mut out: String = prompt.chars().take(100).collect();
    if prompt.chars().count() > 100 {
        out.push_str("...");
    }
    out
}
