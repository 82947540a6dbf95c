//! The engine facade: one object a UI surface drives.
//!
//! `Editor` owns the [`DocumentStore`] and the (at most one) active
//! [`EditSession`], routes canvas events through the tool dispatcher, and
//! executes keyboard shortcuts. It is created with the editor surface and
//! dropped with it — there is no ambient global state.

use crate::input::{CanvasEvent, Modifiers};
use crate::session::{Corner, EditSession, PickerState, SessionMode};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::store::{DocumentStore, EditOp, NodePatch};
use crate::tools::{self, CanvasFlags, ToolKind};
use fp_core::{BorderStyle, Color, Document, ElementId, Vec2};

#[derive(Debug, Default)]
pub struct Editor {
    store: DocumentStore,
    session: Option<EditSession>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &Document {
        self.store.document()
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DocumentStore {
        &mut self.store
    }

    pub fn tool(&self) -> ToolKind {
        self.store.tool()
    }

    /// Switch the active tool (toolbar collaborator). Any open session
    /// closes first — a toolbar click is an outside click.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool != self.store.tool() {
            self.end_session(true);
        }
        self.store.set_tool(tool);
    }

    /// Interactivity switches for the rendering layer, derived from the
    /// active tool.
    pub fn flags(&self) -> CanvasFlags {
        self.store.tool().interactivity()
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn selected(&self) -> &[ElementId] {
        self.store.selected()
    }

    // ─── Canvas events ───────────────────────────────────────────────────

    /// Route one rendering-layer event. Tool dispatch produces the durable
    /// edits; this layer adds session starts, selection bookkeeping, and
    /// the one-shot tool reset.
    pub fn handle_canvas(&mut self, event: &CanvasEvent) {
        // Any click outside the session's node closes it. A text-edit
        // session treats that as blur (commit); the rest just close.
        self.close_session_if_outside(event);

        match event {
            CanvasEvent::DoubleClickNode { id } => {
                self.begin_text_edit(*id);
                return;
            }
            CanvasEvent::ClickNode { id } if self.tool() == ToolKind::Select => {
                // Clicks inside an active text edit belong to the text
                // input, not the popover toggle.
                let editing_here = self
                    .session
                    .as_ref()
                    .is_some_and(|s| s.is_text_editing() && s.node_id == *id);
                if !editing_here {
                    self.toggle_popover(*id);
                }
                return;
            }
            CanvasEvent::Connect { source, target } if self.tool() == ToolKind::Select => {
                self.store.apply(EditOp::Connect {
                    source: *source,
                    target: *target,
                });
                return;
            }
            CanvasEvent::DragStop => {
                self.store.apply(EditOp::CommitDrag);
                return;
            }
            CanvasEvent::SelectionChanged { ids } => {
                self.store.set_selected(ids.iter().copied());
                return;
            }
            _ => {}
        }

        let ops = tools::dispatch(self.tool(), event);
        let placed = ops
            .iter()
            .any(|op| matches!(op, EditOp::AddNode { .. }));
        for op in ops {
            self.store.apply(op);
        }
        // One-shot: placing a shape hands control back to select.
        if placed && self.tool().is_one_shot() {
            self.store.set_tool(ToolKind::Select);
        }
    }

    // ─── Sessions ────────────────────────────────────────────────────────

    /// Start label editing on a node. If another session holds an
    /// uncommitted buffer, it is force-committed first — a hand-off is a
    /// blur, never silent data loss.
    pub fn begin_text_edit(&mut self, id: ElementId) {
        self.end_session(true);
        self.session = EditSession::begin_text_edit(&mut self.store, id);
    }

    /// Toggle the style popover on a node (click while not text-editing).
    /// Clicking the node that already owns the popover closes it. Any
    /// other session (including one on the same node) closes through the
    /// normal exit path first, so an in-flight resize still commits.
    pub fn toggle_popover(&mut self, id: ElementId) {
        match self.session.take() {
            Some(session)
                if session.node_id == id
                    && matches!(session.mode, SessionMode::Popover { .. }) =>
            {
                // Toggled closed.
            }
            Some(session) => {
                Self::close(session, &mut self.store, true);
                self.session = EditSession::open_popover(&self.store, id);
            }
            None => {
                self.session = EditSession::open_popover(&self.store, id);
            }
        }
    }

    /// Expand a nested picker row inside the open popover; no-op without
    /// one.
    pub fn expand_picker(&mut self, picker: PickerState) {
        if let Some(session) = &mut self.session {
            session.expand_picker(picker);
        }
    }

    /// Background swatch chosen: one atomic commit, and the completed
    /// selection closes the popover.
    pub fn pick_fill(&mut self, color: Color) {
        if let Some(session) = self.take_popover() {
            session.pick_fill(&mut self.store, color);
        }
    }

    /// Text-color swatch chosen.
    pub fn pick_text_color(&mut self, color: Color) {
        if let Some(session) = self.take_popover() {
            session.pick_text_color(&mut self.store, color);
        }
    }

    /// Border style chosen.
    pub fn pick_border(&mut self, style: BorderStyle) {
        if let Some(session) = self.take_popover() {
            session.pick_border(&mut self.store, style);
        }
    }

    /// The popover's delete action: cascade-removes its node and closes.
    pub fn popover_delete(&mut self) {
        if let Some(session) = self.take_popover() {
            session.delete_node(&mut self.store);
        }
    }

    fn take_popover(&mut self) -> Option<EditSession> {
        self.session
            .take_if(|s| matches!(s.mode, SessionMode::Popover { .. }))
    }

    /// Start a corner-resize gesture on a node.
    pub fn begin_resize(&mut self, id: ElementId, handle: Corner, pointer: Vec2) {
        self.end_session(true);
        self.session = EditSession::begin_resize(&self.store, id, handle, pointer);
    }

    /// Pointer move while resizing; no-op outside a resize session.
    pub fn resize_move(&mut self, pointer: Vec2) {
        if let Some(session) = &self.session {
            session.resize_move(&mut self.store, pointer);
        }
    }

    /// Pointer up: commit the resize gesture and end the session.
    pub fn end_resize(&mut self) {
        if let Some(session) = self.session.take() {
            if matches!(session.mode, SessionMode::Resizing(_)) {
                session.end_resize(&mut self.store);
            } else {
                self.session = Some(session);
            }
        }
    }

    /// Keystrokes inside an active text session replace its buffer.
    pub fn input_text(&mut self, text: &str) {
        if let Some(session) = &mut self.session {
            session.input_text(text);
        }
    }

    /// Enter without Shift: commit the active text session.
    pub fn commit_text(&mut self) {
        if let Some(session) = self.session.take_if(|s| s.is_text_editing()) {
            session.commit_text(&mut self.store);
        }
    }

    /// End whatever session is active. `commit` decides whether a
    /// text-edit buffer is written (blur) or discarded (Escape).
    pub fn end_session(&mut self, commit: bool) {
        if let Some(session) = self.session.take() {
            Self::close(session, &mut self.store, commit);
        }
    }

    fn close(session: EditSession, store: &mut DocumentStore, commit: bool) {
        match session.mode {
            SessionMode::TextEditing { .. } if commit => session.commit_text(store),
            SessionMode::TextEditing { .. } => session.cancel_text(store),
            SessionMode::Resizing(_) => session.end_resize(store),
            // Popovers hold no uncommitted state; closing is enough.
            SessionMode::Popover { .. } => {}
        }
    }

    fn close_session_if_outside(&mut self, event: &CanvasEvent) {
        let Some(session) = &self.session else {
            return;
        };
        let outside = match event {
            CanvasEvent::ClickNode { id } | CanvasEvent::DoubleClickNode { id } => {
                *id != session.node_id
            }
            CanvasEvent::ClickCanvas { .. } | CanvasEvent::ClickEdge { .. } => true,
            _ => false,
        };
        if outside {
            // Outside click = blur: text buffers commit, popovers close.
            self.end_session(true);
        }
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Resolve and execute a keyboard shortcut. Returns the resolved
    /// action, if any. While a text session is active, only Escape is
    /// intercepted — everything else belongs to the text input.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        if self.session.as_ref().is_some_and(|s| s.is_text_editing()) {
            if key == "Escape" {
                self.end_session(false);
                return Some(ShortcutAction::Deselect);
            }
            if key == "Enter" && !modifiers.shift {
                self.commit_text();
                return None;
            }
            return None;
        }

        let action = ShortcutMap::resolve(key, modifiers)?;
        match action {
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::Redo => {
                self.redo();
            }
            ShortcutAction::DeleteSelection => self.delete_selection(),
            ShortcutAction::Deselect => {
                if self.session.is_some() {
                    self.end_session(false);
                } else {
                    self.store.set_selected(std::iter::empty());
                }
            }
            _ => {
                if let Some(tool) = action.tool() {
                    self.set_tool(tool);
                }
            }
        }
        Some(action)
    }

    // ─── Context-menu collaborator ───────────────────────────────────────

    /// Partial node update from the context menu; same mutation + commit
    /// path as the inline popover.
    pub fn update_node(&mut self, id: ElementId, patch: NodePatch) {
        self.store.apply(EditOp::UpdateNode { id, patch });
    }

    /// Delete request from the context menu.
    pub fn delete_node(&mut self, id: ElementId) {
        if self.session.as_ref().is_some_and(|s| s.node_id == id) {
            self.session = None;
        }
        self.store.apply(EditOp::DeleteNode { id });
    }

    /// Delete every selected node (cascading edges), one atomic edit per
    /// node.
    pub fn delete_selection(&mut self) {
        let ids: Vec<ElementId> = self.store.selected().to_vec();
        for id in ids {
            self.store.apply(EditOp::DeleteNode { id });
        }
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Undo. The active session is dropped first — its target node may
    /// not exist in the restored snapshot.
    pub fn undo(&mut self) -> bool {
        self.session = None;
        self.store.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session = None;
        self.store.redo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_core::ShapeKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn shape_tool_resets_after_placement() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Rect);

        editor.handle_canvas(&CanvasEvent::ClickCanvas {
            position: Vec2::new(50.0, 60.0),
        });

        assert_eq!(editor.tool(), ToolKind::Select);
        assert_eq!(editor.document().nodes.len(), 1);
        let node = &editor.document().nodes[0];
        assert_eq!(node.shape, ShapeKind::Rect);
        assert_eq!(node.position, Vec2::new(50.0, 60.0));
    }

    #[test]
    fn eraser_stays_active_across_clicks() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Rect);
        editor.handle_canvas(&CanvasEvent::ClickCanvas {
            position: Vec2::default(),
        });
        let id = editor.document().nodes[0].id;

        editor.set_tool(ToolKind::Eraser);
        editor.handle_canvas(&CanvasEvent::ClickNode { id });
        assert!(editor.document().nodes.is_empty());
        assert_eq!(editor.tool(), ToolKind::Eraser);
    }

    #[test]
    fn keyboard_undo_redo() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Circle);
        editor.handle_canvas(&CanvasEvent::ClickCanvas {
            position: Vec2::default(),
        });
        assert_eq!(editor.document().nodes.len(), 1);

        // A second edit so undo has somewhere to go.
        editor.set_tool(ToolKind::Label);
        editor.handle_canvas(&CanvasEvent::ClickCanvas {
            position: Vec2::new(10.0, 10.0),
        });
        assert_eq!(editor.document().nodes.len(), 2);

        let cmd = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        editor.handle_key("z", cmd);
        assert_eq!(editor.document().nodes.len(), 1);

        let cmd_shift = Modifiers {
            shift: true,
            ..cmd
        };
        editor.handle_key("z", cmd_shift);
        assert_eq!(editor.document().nodes.len(), 2);
    }

    #[test]
    fn escape_cancels_text_session_before_clearing_selection() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Rect);
        editor.handle_canvas(&CanvasEvent::ClickCanvas {
            position: Vec2::default(),
        });
        let id = editor.document().nodes[0].id;

        editor.begin_text_edit(id);
        editor.input_text("tentative");
        editor.handle_key("Escape", Modifiers::NONE);

        assert!(editor.session().is_none());
        assert_eq!(editor.document().node(id).unwrap().label, "");
    }
}
