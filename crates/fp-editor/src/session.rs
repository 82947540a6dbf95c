//! Per-node editing session: label editing, style popover, corner resize.
//!
//! A session is an explicit little state machine with mutually exclusive
//! modes. Entering a mode captures whatever the gesture needs (the label
//! buffer, the resize start point); leaving it either commits one durable
//! edit or discards the transient state. Nothing is attached or detached
//! implicitly — the mode value *is* the gesture.

use crate::store::{DocumentStore, EditOp};
use fp_core::{BorderStyle, Color, ElementId, Size, Vec2};

/// Resize floor: nodes can't be dragged smaller than this.
pub const MIN_WIDTH: f32 = 50.0;
pub const MIN_HEIGHT: f32 = 30.0;

/// Which corner handle a resize drag grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Sign applied to the pointer delta per axis: dragging a top or left
    /// corner outward (negative delta) must grow the node.
    fn signs(self) -> (f32, f32) {
        match self {
            Corner::TopLeft => (-1.0, -1.0),
            Corner::TopRight => (1.0, -1.0),
            Corner::BottomLeft => (-1.0, 1.0),
            Corner::BottomRight => (1.0, 1.0),
        }
    }
}

/// State captured at resize pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeDrag {
    pub handle: Corner,
    pub start_pointer: Vec2,
    pub start_size: Size,
}

/// Nested picker state inside the style popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    /// Top-level popover menu (swatch rows + delete).
    Menu,
    /// A color row is expanded.
    ColorPicking(ColorTarget),
    /// The border-style row is expanded.
    BorderPicking,
}

/// Which color field an expanded color picker writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    Background,
    Text,
}

/// The session's mutually exclusive transient modes.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionMode {
    /// In-place label editing; keystrokes land in the local buffer, not
    /// the document, until commit.
    TextEditing { buffer: String },
    /// The style popover is open.
    Popover { picker: PickerState },
    /// A corner handle is being dragged.
    Resizing(ResizeDrag),
}

/// A transient editing session scoped to one node. Created on entering
/// label-edit, popover, or resize mode; dropped on commit or cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub node_id: ElementId,
    pub mode: SessionMode,
}

impl EditSession {
    /// Enter label editing on a node: the buffer seeds from the node's
    /// committed label (the UI selects it all), and the store's single
    /// edit slot points at this node. Returns `None` for an absent id.
    pub fn begin_text_edit(store: &mut DocumentStore, id: ElementId) -> Option<Self> {
        let buffer = store.document().node(id)?.label.clone();
        store.set_editing_node(Some(id));
        log::debug!("text edit begin on {id}");
        Some(Self {
            node_id: id,
            mode: SessionMode::TextEditing { buffer },
        })
    }

    /// Open the style popover on a node.
    pub fn open_popover(store: &DocumentStore, id: ElementId) -> Option<Self> {
        store.document().node(id)?;
        Some(Self {
            node_id: id,
            mode: SessionMode::Popover {
                picker: PickerState::Menu,
            },
        })
    }

    /// Grab a corner handle: captures the start pointer and the node's
    /// current size. Entering this state is the gesture start.
    pub fn begin_resize(
        store: &DocumentStore,
        id: ElementId,
        handle: Corner,
        pointer: Vec2,
    ) -> Option<Self> {
        let start_size = store.document().node(id)?.size_or_default();
        Some(Self {
            node_id: id,
            mode: SessionMode::Resizing(ResizeDrag {
                handle,
                start_pointer: pointer,
                start_size,
            }),
        })
    }

    pub fn is_text_editing(&self) -> bool {
        matches!(self.mode, SessionMode::TextEditing { .. })
    }

    // ─── Text editing ────────────────────────────────────────────────────

    /// Replace the local buffer. Not written to the document until commit.
    pub fn input_text(&mut self, text: &str) {
        if let SessionMode::TextEditing { buffer } = &mut self.mode {
            buffer.clear();
            buffer.push_str(text);
        }
    }

    /// Commit the buffer (Enter without Shift, or blur): writes the label
    /// in one atomic edit and frees the edit slot. Consumes the session.
    pub fn commit_text(self, store: &mut DocumentStore) {
        if let SessionMode::TextEditing { buffer } = self.mode {
            store.apply(EditOp::SetLabel {
                id: self.node_id,
                label: buffer,
            });
            store.set_editing_node(None);
        }
    }

    /// Cancel (Escape): the buffer is discarded, the node keeps its last
    /// committed label, no history entry.
    pub fn cancel_text(self, store: &mut DocumentStore) {
        if self.is_text_editing() {
            store.set_editing_node(None);
        }
    }

    // ─── Style popover ───────────────────────────────────────────────────

    /// Expand a nested picker row inside the popover.
    pub fn expand_picker(&mut self, picker: PickerState) {
        if let SessionMode::Popover { picker: current } = &mut self.mode {
            *current = picker;
        }
    }

    /// Pick a background swatch: one immediate atomic commit, then the
    /// popover closes (selection completes the session).
    pub fn pick_fill(self, store: &mut DocumentStore, color: Color) {
        if matches!(self.mode, SessionMode::Popover { .. }) {
            store.apply(EditOp::SetFill {
                id: self.node_id,
                color,
            });
        }
    }

    /// Pick a text-color swatch.
    pub fn pick_text_color(self, store: &mut DocumentStore, color: Color) {
        if matches!(self.mode, SessionMode::Popover { .. }) {
            store.apply(EditOp::SetTextColor {
                id: self.node_id,
                color,
            });
        }
    }

    /// Pick a border style.
    pub fn pick_border(self, store: &mut DocumentStore, style: BorderStyle) {
        if matches!(self.mode, SessionMode::Popover { .. }) {
            store.apply(EditOp::SetBorder {
                id: self.node_id,
                style,
            });
        }
    }

    /// The popover's delete action: cascade-removes the node and closes.
    pub fn delete_node(self, store: &mut DocumentStore) {
        store.apply(EditOp::DeleteNode { id: self.node_id });
    }

    // ─── Resize ──────────────────────────────────────────────────────────

    /// Pointer move during a resize drag: new size from the cumulative
    /// delta with per-corner signs, clamped to the floor, aspect-locked
    /// for circles (inside the store write). Visible immediately; never
    /// committed per frame.
    pub fn resize_move(&self, store: &mut DocumentStore, pointer: Vec2) {
        if let SessionMode::Resizing(drag) = &self.mode {
            let (sx, sy) = drag.handle.signs();
            let size = Size::new(
                drag.start_size.width + sx * (pointer.x - drag.start_pointer.x),
                drag.start_size.height + sy * (pointer.y - drag.start_pointer.y),
            )
            .clamped(MIN_WIDTH, MIN_HEIGHT);
            store.preview_node_size(self.node_id, size);
        }
    }

    /// Pointer up: one history commit for the whole gesture, not one per
    /// frame. Consumes the session (exiting the state ends the gesture).
    pub fn end_resize(self, store: &mut DocumentStore) {
        if matches!(self.mode, SessionMode::Resizing(_)) {
            if let Some(size) = store.document().node(self.node_id).and_then(|n| n.size) {
                store.apply(EditOp::SetSize {
                    id: self.node_id,
                    size,
                });
            }
        }
    }
}
