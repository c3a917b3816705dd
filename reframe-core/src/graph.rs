//! The fact graph: one original fact and the reframings derived from it.

use crate::error::FactError;
use crate::geometry::{Point, Rect, Size};
use crate::persist::{CanvasElement, ElementType};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a node on the canvas.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a persisted id, minting a new one when it is not a UUID.
    pub fn from_string(s: impl AsRef<str>) -> Self {
        s.as_ref().parse().map(Self).unwrap_or_else(|_| Self::new())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a node is the root fact or a reframing of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Original,
    Reframed,
}

impl NodeKind {
    /// Fixed box size for nodes of this kind.
    pub fn size(self) -> Size {
        match self {
            NodeKind::Original => Size::new(320.0, 120.0),
            NodeKind::Reframed => Size::new(320.0, 120.0),
        }
    }
}

/// A fact placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct FactNode {
    id: NodeId,
    kind: NodeKind,
    text: String,
    lens: Option<String>,
    position: Point,
}

impl FactNode {
    fn original(text: String) -> Self {
        Self {
            id: NodeId::new(),
            kind: NodeKind::Original,
            text,
            lens: None,
            position: Point::ORIGIN,
        }
    }

    fn reframed(text: String, lens: String) -> Self {
        Self {
            id: NodeId::new(),
            kind: NodeKind::Reframed,
            text,
            lens: Some(lens),
            position: Point::ORIGIN,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The lens that produced this node; `None` for the original.
    pub fn lens(&self) -> Option<&str> {
        self.lens.as_deref()
    }

    /// World-space top-left corner.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.kind.size()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size())
    }

    // Only the layout engine moves nodes.
    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

/// One original fact plus its reframings in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactGraph {
    original: Option<FactNode>,
    reframed: Vec<FactNode>,
}

impl FactGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn original(&self) -> Option<&FactNode> {
        self.original.as_ref()
    }

    pub fn reframed(&self) -> &[FactNode] {
        &self.reframed
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_none()
    }

    /// Total node count, original included.
    pub fn len(&self) -> usize {
        self.original.iter().count() + self.reframed.len()
    }

    /// Lenses applied so far, in order.
    pub fn lenses(&self) -> impl Iterator<Item = &str> {
        self.reframed.iter().filter_map(|n| n.lens())
    }

    /// Replace the original fact, dropping every reframing of the previous one.
    pub fn set_original(&mut self, text: impl Into<String>) -> NodeId {
        let node = FactNode::original(text.into());
        let id = node.id;
        self.original = Some(node);
        self.reframed.clear();
        id
    }

    /// Append a reframing of the current original.
    pub fn append_reframed(
        &mut self,
        text: impl Into<String>,
        lens: impl Into<String>,
    ) -> Result<NodeId, FactError> {
        if self.original.is_none() {
            return Err(FactError::NoOriginalFact);
        }
        let node = FactNode::reframed(text.into(), lens.into());
        let id = node.id;
        self.reframed.push(node);
        Ok(id)
    }

    pub fn reset(&mut self) {
        self.original = None;
        self.reframed.clear();
    }

    /// Cumulative badge for the reframed node at `index`, e.g. `"Fact . chemistry. art"`.
    pub fn badge_text(&self, index: usize) -> Option<String> {
        if index >= self.reframed.len() {
            return None;
        }
        let chain: Vec<&str> = self.reframed[..=index]
            .iter()
            .filter_map(|n| n.lens())
            .collect();
        Some(format!("Fact . {}", chain.join(". ").to_lowercase()))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &FactNode> {
        self.original.iter().chain(self.reframed.iter())
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut FactNode> {
        self.original.iter_mut().chain(self.reframed.iter_mut())
    }

    /// Flatten into the persisted element list.
    pub fn to_elements(&self) -> Vec<CanvasElement> {
        self.nodes()
            .map(|node| {
                let size = node.size();
                CanvasElement {
                    id: node.id.to_string(),
                    x: node.position.x,
                    y: node.position.y,
                    width: size.width,
                    height: size.height,
                    text: node.text.clone(),
                    element_type: match node.kind {
                        NodeKind::Original => ElementType::OriginalFact,
                        NodeKind::Reframed => ElementType::ReframedFact,
                    },
                    lens: node.lens.clone(),
                    color: ElementType::color_for(node.kind).to_string(),
                }
            })
            .collect()
    }

    /// Rebuild a graph from persisted elements.
    ///
    /// Returns `None` when the list cannot describe a valid graph: reframed
    /// elements without an original, more than one original, or a reframed
    /// element missing its lens.
    pub fn from_elements(elements: &[CanvasElement]) -> Option<Self> {
        let mut graph = FactGraph::new();
        let mut originals = elements
            .iter()
            .filter(|e| e.element_type == ElementType::OriginalFact);

        let Some(original) = originals.next() else {
            return elements.is_empty().then(FactGraph::new);
        };
        if originals.next().is_some() {
            return None;
        }

        let mut root = FactNode::original(original.text.clone());
        root.id = NodeId::from_string(&original.id);
        root.position = Point::new(original.x, original.y);
        graph.original = Some(root);

        for element in elements
            .iter()
            .filter(|e| e.element_type == ElementType::ReframedFact)
        {
            let lens = element.lens.clone()?;
            let mut node = FactNode::reframed(element.text.clone(), lens);
            node.id = NodeId::from_string(&element.id);
            node.position = Point::new(element.x, element.y);
            graph.reframed.push(node);
        }

        Some(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_graph_is_empty() {
        let graph = FactGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert!(graph.reframed().is_empty());
    }

    #[test]
    fn test_set_original_clears_reframed() {
        let mut graph = FactGraph::new();
        let first = graph.set_original("Fact one.");
        for lens in ["Chemistry", "Art", "Design"] {
            graph.append_reframed(format!("{lens} take"), lens).unwrap();
        }
        assert_eq!(graph.reframed().len(), 3);

        let second = graph.set_original("Fact two.");
        assert_ne!(first, second);
        assert!(graph.reframed().is_empty());
        assert_eq!(graph.original().unwrap().text(), "Fact two.");
        assert_eq!(graph.original().unwrap().id(), second);
    }

    #[test]
    fn test_append_without_original_fails_and_leaves_state() {
        let mut graph = FactGraph::new();
        let before = graph.clone();
        let err = graph.append_reframed("text", "Art").unwrap_err();
        assert_eq!(err, FactError::NoOriginalFact);
        assert_eq!(graph, before);
    }

    #[test]
    fn test_append_preserves_order_and_lens() {
        let mut graph = FactGraph::new();
        graph.set_original("Base.");
        graph.append_reframed("a", "Chemistry").unwrap();
        graph.append_reframed("b", "Art").unwrap();

        let lenses: Vec<_> = graph.lenses().collect();
        assert_eq!(lenses, vec!["Chemistry", "Art"]);
        assert_eq!(graph.reframed()[1].kind(), NodeKind::Reframed);
        assert_eq!(graph.original().unwrap().lens(), None);
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_reset() {
        let mut graph = FactGraph::new();
        graph.set_original("Base.");
        graph.append_reframed("a", "Art").unwrap();
        graph.reset();
        assert!(graph.is_empty());
        assert!(graph.reframed().is_empty());
    }

    #[test]
    fn test_badge_text_is_cumulative() {
        let mut graph = FactGraph::new();
        graph.set_original("Base.");
        graph.append_reframed("a", "Chemistry").unwrap();
        graph.append_reframed("b", "Material Science").unwrap();

        assert_eq!(graph.badge_text(0).unwrap(), "Fact . chemistry");
        assert_eq!(graph.badge_text(1).unwrap(), "Fact . chemistry. material science");
        assert_eq!(graph.badge_text(2), None);
    }

    #[test]
    fn test_elements_round_trip_keeps_ids_and_lenses() {
        let mut graph = FactGraph::new();
        graph.set_original("Base.");
        graph.append_reframed("a", "Art").unwrap();

        let elements = graph.to_elements();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].element_type, ElementType::OriginalFact);

        let restored = FactGraph::from_elements(&elements).unwrap();
        assert_eq!(restored, graph);
    }

    #[test]
    fn test_from_elements_rejects_orphans() {
        let mut graph = FactGraph::new();
        graph.set_original("Base.");
        graph.append_reframed("a", "Art").unwrap();
        let orphans: Vec<_> = graph
            .to_elements()
            .into_iter()
            .filter(|e| e.element_type == ElementType::ReframedFact)
            .collect();

        assert!(FactGraph::from_elements(&orphans).is_none());
        assert_eq!(FactGraph::from_elements(&[]), Some(FactGraph::new()));
    }
}
