//! The fact canvas view model.
//!
//! [`FactCanvas`] ties the graph, the viewport and a layout mode together,
//! interprets input, and produces a [`Scene`] in screen coordinates that a
//! front end can draw without knowing about world space.

use crate::error::FactError;
use crate::geometry::{Point, Rect, Size};
use crate::graph::{FactGraph, NodeId, NodeKind};
use crate::layout::{EdgeKind, Layout, LayoutMode};
use crate::persist::{self, CanvasElement, ViewportStore, ELEMENTS_KEY};
use crate::viewport::{Viewport, KEYBOARD_PAN_STEP, ZOOM_STEP};

/// Arrow-key pan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

impl PanDirection {
    /// Screen-space pan delta. Up moves content down, left moves it right.
    pub fn delta(self) -> (f64, f64) {
        match self {
            PanDirection::Up => (0.0, KEYBOARD_PAN_STEP),
            PanDirection::Down => (0.0, -KEYBOARD_PAN_STEP),
            PanDirection::Left => (KEYBOARD_PAN_STEP, 0.0),
            PanDirection::Right => (-KEYBOARD_PAN_STEP, 0.0),
        }
    }
}

/// Input the canvas understands, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasInput {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    /// Positive `delta` zooms in around `at`.
    Wheel { delta: f64, at: Point },
    ZoomIn,
    ZoomOut,
    ZoomReset,
    Pan(PanDirection),
    ToggleLayout,
}

/// Measures rendered text width in screen pixels.
pub trait TextMeasure {
    fn width(&self, text: &str) -> f64;
}

/// Every character has the same advance.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasure {
    pub advance: f64,
}

impl MonospaceMeasure {
    pub fn new(advance: f64) -> Self {
        Self { advance }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.advance
    }
}

/// Text box metrics, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub padding: f64,
    pub line_height: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            padding: 10.0,
            line_height: 18.0,
        }
    }
}

/// Greedy word wrap: each line takes as many words as fit in `max_width`.
///
/// A single word wider than `max_width` gets a line of its own. Explicit
/// newlines are kept.
pub fn wrap_text(text: &str, max_width: f64, measure: &dyn TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if measure.width(&candidate) > max_width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line.push_str(word);
            } else {
                line = candidate;
            }
        }
        lines.push(line);
    }
    lines
}

/// A node ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Screen-space bounds.
    pub rect: Rect,
    pub lines: Vec<String>,
    /// Cumulative lens badge, reframed nodes only.
    pub badge: Option<String>,
}

/// An edge ready to draw, in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEdge {
    pub kind: EdgeKind,
    pub points: Vec<Point>,
}

/// Everything visible on the surface for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub surface: Size,
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
    /// e.g. `"110%"`.
    pub zoom_label: String,
    pub mode: LayoutMode,
    pub style: TextStyle,
}

/// Graph + viewport + layout, persisted to a [`ViewportStore`].
pub struct FactCanvas<S: ViewportStore> {
    graph: FactGraph,
    viewport: Viewport,
    mode: LayoutMode,
    layout: Layout,
    surface: Size,
    style: TextStyle,
    store: S,
    drag_from: Option<Point>,
}

impl<S: ViewportStore> FactCanvas<S> {
    /// Restore the canvas from `store`.
    ///
    /// Missing or malformed entries fall back to an empty graph and the
    /// default viewport.
    pub fn open(store: S, surface: Size, mode: LayoutMode) -> Self {
        let viewport = Viewport::restore(&store);
        let graph = persist::load_json::<_, Vec<CanvasElement>>(&store, ELEMENTS_KEY)
            .map(|elements| {
                FactGraph::from_elements(&elements).unwrap_or_else(|| {
                    tracing::warn!("persisted canvas elements do not form a graph, starting empty");
                    FactGraph::new()
                })
            })
            .unwrap_or_default();

        let mut canvas = Self {
            graph,
            viewport,
            mode,
            layout: Layout::default(),
            surface,
            style: TextStyle::default(),
            store,
            drag_from: None,
        };
        canvas.relayout();
        canvas
    }

    pub fn graph(&self) -> &FactGraph {
        &self.graph
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn surface(&self) -> Size {
        self.surface
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Whether a pointer drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    pub fn set_surface(&mut self, surface: Size) {
        self.surface = surface;
    }

    /// Replace the original fact and centre the view on it.
    pub fn set_original(&mut self, text: impl Into<String>) -> NodeId {
        let id = self.graph.set_original(text);
        self.relayout();
        self.center_on_node(id);
        id
    }

    /// Append a reframing. In stacked mode the view follows the new node.
    pub fn append_reframed(
        &mut self,
        text: impl Into<String>,
        lens: impl Into<String>,
    ) -> Result<NodeId, FactError> {
        let id = self.graph.append_reframed(text, lens)?;
        self.relayout();
        if self.mode == LayoutMode::Stacked {
            self.center_on_node(id);
        }
        Ok(id)
    }

    /// Clear the graph. The viewport is left alone.
    pub fn reset(&mut self) {
        self.graph.reset();
        self.relayout();
    }

    pub fn set_mode(&mut self, mode: LayoutMode) {
        if self.mode == mode {
            return;
        }
        tracing::debug!(%mode, "switching layout");
        self.mode = mode;
        self.relayout();
    }

    /// Apply one input event. Returns `true` when the frame needs redrawing.
    pub fn handle(&mut self, input: CanvasInput) -> bool {
        let before = self.viewport;
        let center = self.surface.center();

        match input {
            CanvasInput::PointerDown(at) => {
                self.drag_from = Some(at);
                return false;
            }
            CanvasInput::PointerMove(at) => {
                let Some(from) = self.drag_from else {
                    return false;
                };
                let delta = at - from;
                self.viewport.pan_by(delta.x, delta.y);
                self.drag_from = Some(at);
            }
            CanvasInput::PointerUp => {
                self.drag_from = None;
                return false;
            }
            CanvasInput::Wheel { delta, at } => self.viewport.zoom_by(delta, at),
            CanvasInput::ZoomIn => self.viewport.zoom_step(ZOOM_STEP, center),
            CanvasInput::ZoomOut => self.viewport.zoom_step(-ZOOM_STEP, center),
            CanvasInput::ZoomReset => self.viewport.reset(),
            CanvasInput::Pan(direction) => {
                let (dx, dy) = direction.delta();
                self.viewport.pan_by(dx, dy);
            }
            CanvasInput::ToggleLayout => {
                self.set_mode(self.mode.toggle());
                return true;
            }
        }

        if self.viewport == before {
            return false;
        }
        self.viewport.persist(&mut self.store);
        true
    }

    /// World-space node under a screen point, topmost first.
    pub fn node_at(&self, screen: Point) -> Option<NodeId> {
        let world = self.viewport.screen_to_world(screen);
        self.layout
            .placements
            .iter()
            .rev()
            .find(|p| p.bounds().contains(world))
            .map(|p| p.node)
    }

    /// Build the drawable scene for the current state.
    pub fn scene(&self, measure: &dyn TextMeasure) -> Scene {
        let screen = Rect::new(Point::ORIGIN, self.surface);
        let zoom = self.viewport.zoom();

        let mut nodes = Vec::new();
        for node in self.graph.nodes() {
            let origin = self.viewport.world_to_screen(node.position());
            let size = node.size();
            let rect = Rect::new(origin, Size::new(size.width * zoom, size.height * zoom));
            if !rect.intersects(&screen) {
                continue;
            }

            let max_width = (rect.width - 2.0 * self.style.padding).max(0.0);
            let badge = self
                .graph
                .reframed()
                .iter()
                .position(|r| r.id() == node.id())
                .and_then(|index| self.graph.badge_text(index));

            nodes.push(SceneNode {
                id: node.id(),
                kind: node.kind(),
                rect,
                lines: wrap_text(node.text(), max_width, measure),
                badge,
            });
        }

        let edges = self
            .layout
            .edges
            .iter()
            .map(|edge| SceneEdge {
                kind: edge.kind,
                points: edge
                    .points
                    .iter()
                    .map(|p| self.viewport.world_to_screen(*p))
                    .collect(),
            })
            .collect();

        Scene {
            surface: self.surface,
            nodes,
            edges,
            zoom_label: format!("{}%", self.viewport.zoom_percent()),
            mode: self.mode,
            style: self.style,
        }
    }

    fn relayout(&mut self) {
        self.layout = self.mode.layout(&self.graph);
        self.layout.apply(&mut self.graph);
        persist::save_json(&mut self.store, ELEMENTS_KEY, &self.graph.to_elements());
    }

    fn center_on_node(&mut self, id: NodeId) {
        if let Some(placement) = self.layout.placement(id) {
            self.viewport.center_on(placement.center(), self.surface);
            self.viewport.persist(&mut self.store);
        }
    }
}
