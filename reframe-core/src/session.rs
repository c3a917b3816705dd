//! ReframeSession - the state behind the control panel.
//!
//! Owns the canvas and drives the fact service: step 1 fetches an original
//! fact, step 2 reframes it through a lens. Work is queued with
//! [`ReframeSession::request`] and executed by [`ReframeSession::run_pending`],
//! so a front end can draw its loading state in between. While a request is
//! pending, further requests are ignored.

use crate::canvas::FactCanvas;
use crate::error::FactError;
use crate::persist::ViewportStore;
use crate::sampler::CategorySampler;
use crate::service::FactService;
use std::sync::Arc;

/// Lenses offered before the user adds any.
pub const DEFAULT_LENSES: &[&str] = &[
    "Chemistry",
    "Design",
    "Engineering",
    "Mathematics",
    "Geography",
    "Material Science",
    "Art",
];

/// Where the user is in the two-step flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    GetFact,
    PickLens,
}

impl Step {
    pub fn number(self) -> u8 {
        match self {
            Step::GetFact => 1,
            Step::PickLens => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::GetFact => "Add a fact",
            Step::PickLens => "Pick a lens",
        }
    }
}

/// The panel's status line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading(String),
    Error(String),
}

/// Work a front end can queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FetchFact,
    ApplyLens(String),
}

pub struct ReframeSession<S: ViewportStore> {
    service: Arc<FactService>,
    sampler: Box<dyn CategorySampler + Send>,
    canvas: FactCanvas<S>,
    lenses: Vec<String>,
    pending: Option<Action>,
    status: Status,
    api_status: Option<String>,
    collapsed: bool,
}

impl<S: ViewportStore> ReframeSession<S> {
    pub fn new(
        service: Arc<FactService>,
        sampler: Box<dyn CategorySampler + Send>,
        canvas: FactCanvas<S>,
    ) -> Self {
        Self {
            service,
            sampler,
            canvas,
            lenses: DEFAULT_LENSES.iter().map(|s| s.to_string()).collect(),
            pending: None,
            status: Status::Idle,
            api_status: None,
            collapsed: false,
        }
    }

    pub fn canvas(&self) -> &FactCanvas<S> {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut FactCanvas<S> {
        &mut self.canvas
    }

    pub fn lenses(&self) -> &[String] {
        &self.lenses
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Result of the last upstream check, if one ran.
    pub fn api_status(&self) -> Option<&str> {
        self.api_status.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn step(&self) -> Step {
        if self.canvas.graph().is_empty() {
            Step::GetFact
        } else {
            Step::PickLens
        }
    }

    /// Lens buttons only work once a fact exists.
    pub fn lenses_enabled(&self) -> bool {
        self.step() == Step::PickLens
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle_panel(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn clear_error(&mut self) {
        if matches!(self.status, Status::Error(_)) {
            self.status = Status::Idle;
        }
    }

    /// Add a custom lens. Blank names and names already listed are rejected.
    pub fn add_lens(&mut self, name: &str) -> Result<(), FactError> {
        let name = name.trim();
        if name.is_empty() || self.lenses.iter().any(|l| l == name) {
            return Err(FactError::InvalidArgument("lens".to_string()));
        }
        self.lenses.push(name.to_string());
        Ok(())
    }

    /// Queue `action`. Returns `false` if it was ignored.
    pub fn request(&mut self, action: Action) -> bool {
        if self.pending.is_some() {
            tracing::debug!(?action, "request ignored while another is in flight");
            return false;
        }
        if matches!(action, Action::ApplyLens(_)) && !self.lenses_enabled() {
            return false;
        }

        self.status = Status::Loading(match &action {
            Action::FetchFact => "Fetching a new fact...".to_string(),
            Action::ApplyLens(lens) => format!("Reframing through {lens}..."),
        });
        self.pending = Some(action);
        true
    }

    /// Execute the queued action, if any.
    pub async fn run_pending(&mut self) {
        let Some(action) = self.pending.clone() else {
            return;
        };
        let result = match action {
            Action::FetchFact => self.fetch_fact().await,
            Action::ApplyLens(lens) => self.apply_lens(&lens).await,
        };
        if let Err(err) = result {
            // already on the status line
            tracing::debug!(error = %err, "queued action failed");
        }
        self.pending = None;
    }

    /// Fetch a new original fact and put it on the canvas.
    pub async fn fetch_fact(&mut self) -> Result<(), FactError> {
        let result = self.service.initial_fact(self.sampler.as_mut()).await;
        match result {
            Ok(fact) => {
                self.canvas.set_original(fact.text);
                self.status = Status::Idle;
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Reframe the current original through `lens` and append the result.
    pub async fn apply_lens(&mut self, lens: &str) -> Result<(), FactError> {
        let Some(original) = self.canvas.graph().original() else {
            return Err(self.fail(FactError::NoOriginalFact));
        };
        let text = original.text().to_string();

        let reframed = match self.service.reframe_fact(&text, lens).await {
            Ok(reframed) => reframed,
            Err(err) => return Err(self.fail(err)),
        };
        match self.canvas.append_reframed(reframed, lens) {
            Ok(_) => {
                self.status = Status::Idle;
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Probe the completion service and remember the outcome.
    pub async fn check_api(&mut self) {
        let message = match self.service.check_upstream().await {
            Ok(_) => "Completion service is reachable".to_string(),
            Err(err) => format!("API connection failed: {err}"),
        };
        self.api_status = Some(message);
    }

    fn fail(&mut self, err: FactError) -> FactError {
        tracing::warn!(error = %err, "session request failed");
        self.status = Status::Error(err.to_string());
        err
    }
}
