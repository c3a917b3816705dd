//! Fact generation, reframing and the fact-graph canvas.
//!
//! This crate provides:
//! - Prompt templates and a novelty filter around one completion call
//! - `FactService` for fetching and reframing facts
//! - The fact graph, its radial and stacked layouts, and a pan/zoom viewport
//! - `FactCanvas`, a front-end independent view model with persistence
//!
//! # Quick Start
//!
//! ```ignore
//! use reframe_core::{FactCanvas, FactService, JsonFileStore, LayoutMode, RandomSampler, Size};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gemini = gemini::Gemini::from_env()?;
//!     let service = FactService::new(Arc::new(gemini));
//!     let mut sampler = RandomSampler::new(rand::thread_rng());
//!
//!     let fact = service.initial_fact(&mut sampler).await?;
//!     let reframed = service.reframe_fact(&fact.text, "Art").await?;
//!
//!     let store = JsonFileStore::in_dir(".");
//!     let mut canvas = FactCanvas::open(store, Size::new(1200.0, 800.0), LayoutMode::Radial);
//!     canvas.set_original(fact.text);
//!     canvas.append_reframed(reframed, "Art")?;
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod completion;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod novelty;
pub mod persist;
pub mod prompt;
pub mod sampler;
pub mod service;
pub mod session;
pub mod testing;
pub mod viewport;

pub use canvas::{
    wrap_text, CanvasInput, FactCanvas, MonospaceMeasure, PanDirection, Scene, SceneEdge,
    SceneNode, TextMeasure, TextStyle,
};
pub use completion::{CompletionError, CompletionService};
pub use error::FactError;
pub use geometry::{Point, Rect, Size};
pub use graph::{FactGraph, FactNode, NodeId, NodeKind};
pub use layout::{EdgeKind, Layout, LayoutMode, LayoutPolicy, RadialLayout, StackedLayout};
pub use novelty::NoveltyFilter;
pub use persist::{CanvasElement, JsonFileStore, MemoryStore, PersistError, ViewportStore};
pub use sampler::{CategorySampler, FixedSampler, RandomSampler};
pub use service::{FactService, FactServiceConfig, InitialFact, DEFAULT_CATEGORIES};
pub use session::{Action, ReframeSession, Status, Step, DEFAULT_LENSES};
pub use testing::{MockCompletion, MockReply, TestHarness};
pub use viewport::Viewport;
