//! Node placement policies.
//!
//! A policy maps the graph to world-space placements and edges. Policies are
//! pure: they never touch the viewport, and the graph only changes when the
//! caller applies the result.

use crate::geometry::{Point, Rect, Size};
use crate::graph::{FactGraph, NodeId};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

/// Default world-space centre of the original fact.
pub const DEFAULT_CENTER: Point = Point::new(600.0, 400.0);

/// Which policy the canvas uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Radial,
    Stacked,
}

impl LayoutMode {
    pub fn toggle(self) -> Self {
        match self {
            LayoutMode::Radial => LayoutMode::Stacked,
            LayoutMode::Stacked => LayoutMode::Radial,
        }
    }

    /// Lay out `graph` with this mode's default policy.
    pub fn layout(self, graph: &FactGraph) -> Layout {
        match self {
            LayoutMode::Radial => RadialLayout::default().layout(graph),
            LayoutMode::Stacked => StackedLayout::default().layout(graph),
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMode::Radial => write!(f, "radial"),
            LayoutMode::Stacked => write!(f, "stacked"),
        }
    }
}

impl FromStr for LayoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "radial" => Ok(LayoutMode::Radial),
            "stacked" => Ok(LayoutMode::Stacked),
            other => Err(format!("unknown layout '{other}', expected radial or stacked")),
        }
    }
}

/// Where one node goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub node: NodeId,
    /// Top-left corner in world space.
    pub position: Point,
    pub size: Size,
    /// Angle on the radial circle, for radially placed reframed nodes.
    pub angle: Option<f64>,
}

impl Placement {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Straight line from the original's centre.
    Spoke,
    /// Elbow from the previous node in the stack.
    Branch,
}

/// A connector drawn as a polyline through `points` (world space).
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub kind: EdgeKind,
    pub from: NodeId,
    pub to: NodeId,
    pub points: Vec<Point>,
}

/// Result of a layout pass. The original, when present, is always first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub placements: Vec<Placement>,
    pub edges: Vec<Edge>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn placement(&self, node: NodeId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.node == node)
    }

    /// Write the computed positions back into `graph`.
    pub fn apply(&self, graph: &mut FactGraph) {
        for node in graph.nodes_mut() {
            if let Some(placement) = self.placements.iter().find(|p| p.node == node.id()) {
                node.set_position(placement.position);
            }
        }
    }
}

/// A node placement policy.
pub trait LayoutPolicy {
    fn layout(&self, graph: &FactGraph) -> Layout;
}

/// Original in the middle, reframings around it.
#[derive(Debug, Clone, Copy)]
pub struct RadialLayout {
    pub center: Point,
    /// Vertical gap below the original when there is a single reframing.
    pub single_gap: f64,
    pub base_radius: f64,
    /// Extra radius per node beyond [`Self::crowd_threshold`].
    pub radius_growth: f64,
    pub crowd_threshold: usize,
}

impl Default for RadialLayout {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            single_gap: 80.0,
            base_radius: 400.0,
            radius_growth: 40.0,
            crowd_threshold: 6,
        }
    }
}

impl RadialLayout {
    pub fn radius_for(&self, count: usize) -> f64 {
        self.base_radius + count.saturating_sub(self.crowd_threshold) as f64 * self.radius_growth
    }
}

impl LayoutPolicy for RadialLayout {
    fn layout(&self, graph: &FactGraph) -> Layout {
        let Some(original) = graph.original() else {
            return Layout::default();
        };

        let original_size = original.size();
        let root = Placement {
            node: original.id(),
            position: Point::new(
                self.center.x - original_size.width / 2.0,
                self.center.y - original_size.height / 2.0,
            ),
            size: original_size,
            angle: None,
        };
        let mut layout = Layout {
            placements: vec![root],
            edges: Vec::new(),
        };

        let reframed = graph.reframed();
        let n = reframed.len();
        let radius = self.radius_for(n);
        let step = 2.0 * PI / n.max(1) as f64;

        for (i, node) in reframed.iter().enumerate() {
            let size = node.size();
            let (position, angle) = if n == 1 {
                (
                    Point::new(
                        self.center.x - size.width / 2.0,
                        self.center.y + original_size.height / 2.0 + self.single_gap,
                    ),
                    FRAC_PI_2,
                )
            } else {
                let angle = -FRAC_PI_2 + i as f64 * step;
                let cx = self.center.x + radius * angle.cos();
                let cy = self.center.y + radius * angle.sin();
                (
                    Point::new(cx - size.width / 2.0, cy - size.height / 2.0),
                    angle,
                )
            };

            let placement = Placement {
                node: node.id(),
                position,
                size,
                angle: Some(angle),
            };
            layout.edges.push(Edge {
                kind: EdgeKind::Spoke,
                from: original.id(),
                to: node.id(),
                points: vec![self.center, placement.center()],
            });
            layout.placements.push(placement);
        }

        layout
    }
}

/// Reframings stacked beneath the original, each indented from the last.
#[derive(Debug, Clone, Copy)]
pub struct StackedLayout {
    pub center: Point,
    pub gap: f64,
    pub indent: f64,
}

impl Default for StackedLayout {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            gap: 20.0,
            indent: 30.0,
        }
    }
}

impl LayoutPolicy for StackedLayout {
    fn layout(&self, graph: &FactGraph) -> Layout {
        let Some(original) = graph.original() else {
            return Layout::default();
        };

        let size = original.size();
        let mut previous = Placement {
            node: original.id(),
            position: Point::new(
                self.center.x - size.width / 2.0,
                self.center.y - size.height / 2.0,
            ),
            size,
            angle: None,
        };
        let mut layout = Layout {
            placements: vec![previous],
            edges: Vec::new(),
        };

        for node in graph.reframed() {
            let placement = Placement {
                node: node.id(),
                position: Point::new(
                    previous.position.x + self.indent,
                    previous.bounds().bottom() + self.gap,
                ),
                size: node.size(),
                angle: None,
            };

            // Drop from the predecessor's left edge, then run across.
            let trunk_x = previous.position.x + self.indent / 2.0;
            let mid_y = placement.center().y;
            layout.edges.push(Edge {
                kind: EdgeKind::Branch,
                from: previous.node,
                to: node.id(),
                points: vec![
                    Point::new(trunk_x, previous.bounds().bottom()),
                    Point::new(trunk_x, mid_y),
                    Point::new(placement.position.x, mid_y),
                ],
            });
            layout.placements.push(placement);
            previous = placement;
        }

        layout
    }
}
