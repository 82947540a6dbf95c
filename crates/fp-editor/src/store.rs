//! The document store: single source of truth for canvas contents.
//!
//! Mutations come in two flavors:
//!
//! - **Transient writes** (`set_nodes`, `set_edges`, `preview_node_size`)
//!   replace state without touching history. The rendering layer streams
//!   these during drags so every observer sees intermediate frames.
//! - **Atomic edits** — an [`EditOp`] applied via [`DocumentStore::apply`]
//!   mutates the document and commits exactly one history snapshot. Every
//!   durable edit (create, delete, connect, label, style, resize release,
//!   drag stop) is one op, so commits can be neither forgotten nor
//!   duplicated at call sites.

use crate::history::History;
use crate::tools::ToolKind;
use fp_core::{BorderStyle, Color, Document, ElementId, ShapeKind, Size, Vec2};
use smallvec::SmallVec;

/// Partial node update from the context-menu collaborator: only `Some`
/// fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub label: Option<String>,
    pub fill: Option<Color>,
    pub text_color: Option<Color>,
    pub border: Option<BorderStyle>,
    pub size: Option<Size>,
}

/// A durable edit: mutates the document and commits one history snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    /// Place a new shape at a canvas position (default size, generated id).
    AddNode { shape: ShapeKind, position: Vec2 },
    /// Remove a node and cascade-delete its incident edges. Commits even
    /// when the id is absent or no edge referenced the node.
    DeleteNode { id: ElementId },
    /// Remove a single edge.
    DeleteEdge { id: ElementId },
    /// Create an edge between two live nodes. Invalid endpoints are a
    /// silent no-op and skip the commit (nothing changed).
    Connect {
        source: ElementId,
        target: ElementId,
    },
    /// Write a node's label (text-edit commit path).
    SetLabel { id: ElementId, label: String },
    /// One background-swatch choice.
    SetFill { id: ElementId, color: Color },
    /// One text-color-swatch choice.
    SetTextColor { id: ElementId, color: Color },
    /// One border-style choice.
    SetBorder { id: ElementId, style: BorderStyle },
    /// Final size on resize release (circle aspect lock applied).
    SetSize { id: ElementId, size: Size },
    /// Partial update from the context menu.
    UpdateNode { id: ElementId, patch: NodePatch },
    /// A drag gesture ended; positions were already written transiently.
    CommitDrag,
}

/// Canonical editing state: document, history, active tool, the single
/// text-edit slot, and the transient selection set.
///
/// An explicit owned object — created with the editor surface, dropped
/// with it. Selection and `editing_node` are not part of history.
#[derive(Debug, Default)]
pub struct DocumentStore {
    doc: Document,
    history: History,
    tool: ToolKind,
    editing_node: Option<ElementId>,
    selected: SmallVec<[ElementId; 4]>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.tool != tool {
            log::debug!("tool: {:?} -> {:?}", self.tool, tool);
            self.tool = tool;
        }
    }

    pub fn editing_node(&self) -> Option<ElementId> {
        self.editing_node
    }

    /// Set or clear the single global text-edit slot. At most one node is
    /// in text-edit mode across the whole document.
    pub fn set_editing_node(&mut self, id: Option<ElementId>) {
        self.editing_node = id;
    }

    pub fn selected(&self) -> &[ElementId] {
        &self.selected
    }

    /// Replace the selection set wholesale (per selection-change event).
    pub fn set_selected(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.selected = ids.into_iter().collect();
    }

    // ─── Transient writes (no history) ───────────────────────────────────

    /// Wholesale node-list replacement from the rendering layer's
    /// change-lists. Never commits; the gesture's closing op does.
    pub fn set_nodes(&mut self, nodes: Vec<fp_core::Node>) {
        self.doc.nodes = nodes;
    }

    /// Wholesale edge-list replacement. Never commits.
    pub fn set_edges(&mut self, edges: Vec<fp_core::Edge>) {
        self.doc.edges = edges;
    }

    /// Per-frame resize write: immediately visible to observers, never
    /// committed. Circles have both axes unified before the write so the
    /// aspect lock holds continuously during the drag.
    pub fn preview_node_size(&mut self, id: ElementId, size: Size) {
        if let Some(node) = self.doc.node_mut(id) {
            node.size = Some(match node.shape {
                ShapeKind::Circle => size.squared(),
                _ => size,
            });
        }
    }

    // ─── Atomic edits ────────────────────────────────────────────────────

    /// Apply a durable edit and commit one history snapshot. Returns the
    /// created element's id for `AddNode` / `Connect`.
    pub fn apply(&mut self, op: EditOp) -> Option<ElementId> {
        match op {
            EditOp::AddNode { shape, position } => {
                let id = self.doc.add_shape(shape, position);
                self.save_history();
                Some(id)
            }
            EditOp::DeleteNode { id } => {
                if !self.doc.remove_node(id) {
                    log::debug!("delete of absent node {id}");
                }
                self.forget(id);
                // Always commits, even when nothing was removed.
                self.save_history();
                None
            }
            EditOp::DeleteEdge { id } => {
                self.doc.remove_edge(id);
                self.save_history();
                None
            }
            EditOp::Connect { source, target } => {
                let created = self.doc.connect(source, target);
                if created.is_some() {
                    self.save_history();
                }
                created
            }
            EditOp::SetLabel { id, label } => {
                self.with_node(id, |node| node.label = label);
                None
            }
            EditOp::SetFill { id, color } => {
                self.with_node(id, |node| node.style.fill = Some(color));
                None
            }
            EditOp::SetTextColor { id, color } => {
                self.with_node(id, |node| node.style.text_color = Some(color));
                None
            }
            EditOp::SetBorder { id, style } => {
                self.with_node(id, |node| node.style.border = Some(style));
                None
            }
            EditOp::SetSize { id, size } => {
                self.with_node(id, |node| {
                    node.size = Some(match node.shape {
                        ShapeKind::Circle => size.squared(),
                        _ => size,
                    });
                });
                None
            }
            EditOp::UpdateNode { id, patch } => {
                self.with_node(id, |node| {
                    if let Some(label) = patch.label {
                        node.label = label;
                    }
                    if let Some(fill) = patch.fill {
                        node.style.fill = Some(fill);
                    }
                    if let Some(text_color) = patch.text_color {
                        node.style.text_color = Some(text_color);
                    }
                    if let Some(border) = patch.border {
                        node.style.border = Some(border);
                    }
                    if let Some(size) = patch.size {
                        node.size = Some(match node.shape {
                            ShapeKind::Circle => size.squared(),
                            _ => size,
                        });
                    }
                });
                None
            }
            EditOp::CommitDrag => {
                self.save_history();
                None
            }
        }
    }

    /// Mutate one node and commit; an absent id mutates nothing and
    /// commits nothing.
    fn with_node(&mut self, id: ElementId, f: impl FnOnce(&mut fp_core::Node)) {
        if let Some(node) = self.doc.node_mut(id) {
            f(node);
            self.save_history();
        }
    }

    /// Drop a deleted id from the transient per-session fields.
    fn forget(&mut self, id: ElementId) {
        if self.editing_node == Some(id) {
            self.editing_node = None;
        }
        self.selected.retain(|s| *s != id);
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Snapshot the current document. The sole growth point of the log;
    /// called by atomic edits, never by the transient setters.
    pub fn save_history(&mut self) {
        self.history.save(&self.doc);
    }

    /// Restore the previous snapshot. No-op at the start of history.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.doc = snapshot.clone();
                self.prune_transient();
                log::debug!("undo -> cursor {:?}", self.history.cursor());
                true
            }
            None => false,
        }
    }

    /// Restore the next snapshot. No-op at the end of history.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.doc = snapshot.clone();
                self.prune_transient();
                log::debug!("redo -> cursor {:?}", self.history.cursor());
                true
            }
            None => false,
        }
    }

    /// Selection and the edit slot may reference ids absent from a
    /// restored snapshot; they are transient and never part of history.
    fn prune_transient(&mut self) {
        let doc = &self.doc;
        self.selected.retain(|id| doc.contains_node(*id));
        if let Some(id) = self.editing_node
            && !doc.contains_node(id)
        {
            self.editing_node = None;
        }
    }
}
