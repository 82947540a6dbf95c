//! The canonical document: ordered node and edge lists.
//!
//! All operations are total over in-memory lists — absent ids degrade to
//! silent no-ops (filter-based removal, `Option`-returning lookups), so
//! there is no error type. `Clone` produces a deep value snapshot, which
//! is exactly what the editor's history log stores.

use crate::id::ElementId;
use crate::model::{Edge, Node, ShapeKind, Vec2};

/// Point-in-time contents of the canvas. Node and edge order is document
/// order (z-order for nodes, paint order for edges).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node. The caller guarantees id uniqueness; generated ids
    /// (`ElementId::with_prefix`) satisfy it by construction.
    pub fn add_node(&mut self, node: Node) -> ElementId {
        let id = node.id;
        self.nodes.push(node);
        id
    }

    /// Create and append a node of the given shape at a canvas position.
    pub fn add_shape(&mut self, shape: ShapeKind, position: Vec2) -> ElementId {
        self.add_node(Node::new(ElementId::with_prefix("node"), shape, position))
    }

    pub fn node(&self, id: ElementId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn edge(&self, id: ElementId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_node(&self, id: ElementId) -> bool {
        self.node(id).is_some()
    }

    /// Remove a node and every edge that references it as source or
    /// target (referential integrity by cascade). Returns whether a node
    /// was actually removed; an absent id is an idempotent no-op.
    pub fn remove_node(&mut self, id: ElementId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return false;
        }
        let edges_before = self.edges.len();
        self.edges.retain(|e| !e.touches(id));
        log::debug!(
            "removed node {id} ({} incident edge(s))",
            edges_before - self.edges.len()
        );
        true
    }

    /// Remove a single edge. Nodes are untouched.
    pub fn remove_edge(&mut self, id: ElementId) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != id);
        self.edges.len() != before
    }

    /// Connect two live nodes with a new straight edge. Returns the new
    /// edge id, or `None` when an endpoint is missing or an identical
    /// `source → target` edge already exists.
    pub fn connect(&mut self, source: ElementId, target: ElementId) -> Option<ElementId> {
        if !self.contains_node(source) || !self.contains_node(target) {
            return None;
        }
        if self
            .edges
            .iter()
            .any(|e| e.source == source && e.target == target)
        {
            return None;
        }
        let id = ElementId::with_prefix("edge");
        self.edges.push(Edge::new(id, source, target));
        Some(id)
    }

    /// Edges incident to a node, in document order.
    pub fn edges_of(&self, node: ElementId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.touches(node))
    }
}
