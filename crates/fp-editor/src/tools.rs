//! Tool state machine: how clicks on the canvas are interpreted.
//!
//! The toolbar sets any tool directly. `Select` and `Eraser` persist;
//! the three shape tools are one-shot — placing a shape hands control
//! back to `Select`. While any non-select tool is active, the rendering
//! layer's native drag/connect/pan/zoom behaviors are switched off via
//! [`CanvasFlags`] so a stray drag can't fire mid-placement.

use crate::input::CanvasEvent;
use crate::store::EditOp;
use fp_core::ShapeKind;

/// The active interaction mode governing click semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Eraser,
    Rect,
    Circle,
    Label,
}

impl ToolKind {
    /// Shape tools reset to `Select` after one placement.
    pub fn is_one_shot(self) -> bool {
        self.shape().is_some()
    }

    /// The shape a placement tool creates, if it is one.
    pub fn shape(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Rect => Some(ShapeKind::Rect),
            ToolKind::Circle => Some(ShapeKind::Circle),
            ToolKind::Label => Some(ShapeKind::Label),
            ToolKind::Select | ToolKind::Eraser => None,
        }
    }

    /// Declarative interactivity for the rendering layer: drag, connect,
    /// select, pan, and zoom are native behaviors enabled only under the
    /// select tool.
    pub fn interactivity(self) -> CanvasFlags {
        CanvasFlags::all(self == ToolKind::Select)
    }
}

/// Rendering-layer interactivity switches derived from the active tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasFlags {
    pub nodes_draggable: bool,
    pub nodes_connectable: bool,
    pub elements_selectable: bool,
    pub pan_on_drag: bool,
    pub zoom_on_scroll: bool,
}

impl CanvasFlags {
    fn all(on: bool) -> Self {
        Self {
            nodes_draggable: on,
            nodes_connectable: on,
            elements_selectable: on,
            pan_on_drag: on,
            zoom_on_scroll: on,
        }
    }
}

/// Interpret a click-level event under the active tool, as zero or more
/// durable edits. Pure dispatch: selection bookkeeping, session starts,
/// and the one-shot tool reset stay with the caller.
pub fn dispatch(tool: ToolKind, event: &CanvasEvent) -> Vec<EditOp> {
    match event {
        // Eraser: click kills the element under the pointer.
        CanvasEvent::ClickNode { id } if tool == ToolKind::Eraser => {
            vec![EditOp::DeleteNode { id: *id }]
        }
        CanvasEvent::ClickEdge { id } if tool == ToolKind::Eraser => {
            vec![EditOp::DeleteEdge { id: *id }]
        }

        // Shape tools place on empty canvas. Under select, empty-canvas
        // clicks are reserved (marquee, someday).
        CanvasEvent::ClickCanvas { position } => match tool.shape() {
            Some(shape) => vec![EditOp::AddNode {
                shape,
                position: *position,
            }],
            None => Vec::new(),
        },

        // Node interactions under select ride the rendering layer's
        // native drag/connect behavior.
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_core::{ElementId, Vec2};

    #[test]
    fn one_shot_tools() {
        assert!(ToolKind::Rect.is_one_shot());
        assert!(ToolKind::Circle.is_one_shot());
        assert!(ToolKind::Label.is_one_shot());
        assert!(!ToolKind::Select.is_one_shot());
        assert!(!ToolKind::Eraser.is_one_shot());
    }

    #[test]
    fn interactivity_gated_on_select() {
        let on = ToolKind::Select.interactivity();
        assert!(on.nodes_draggable && on.nodes_connectable && on.elements_selectable);
        assert!(on.pan_on_drag && on.zoom_on_scroll);

        for tool in [
            ToolKind::Eraser,
            ToolKind::Rect,
            ToolKind::Circle,
            ToolKind::Label,
        ] {
            let off = tool.interactivity();
            assert!(!off.nodes_draggable && !off.nodes_connectable);
            assert!(!off.elements_selectable && !off.pan_on_drag && !off.zoom_on_scroll);
        }
    }

    #[test]
    fn eraser_dispatch() {
        let node = ElementId::intern("victim");
        let edge = ElementId::intern("wire");

        let ops = dispatch(ToolKind::Eraser, &CanvasEvent::ClickNode { id: node });
        assert_eq!(ops, vec![EditOp::DeleteNode { id: node }]);

        let ops = dispatch(ToolKind::Eraser, &CanvasEvent::ClickEdge { id: edge });
        assert_eq!(ops, vec![EditOp::DeleteEdge { id: edge }]);

        // Empty canvas: nothing to erase.
        let ops = dispatch(
            ToolKind::Eraser,
            &CanvasEvent::ClickCanvas {
                position: Vec2::new(1.0, 1.0),
            },
        );
        assert!(ops.is_empty());
    }

    #[test]
    fn shape_tool_places_on_empty_canvas_only() {
        let pos = Vec2::new(50.0, 60.0);
        let ops = dispatch(ToolKind::Circle, &CanvasEvent::ClickCanvas { position: pos });
        assert_eq!(
            ops,
            vec![EditOp::AddNode {
                shape: ShapeKind::Circle,
                position: pos,
            }]
        );

        let ops = dispatch(
            ToolKind::Circle,
            &CanvasEvent::ClickNode {
                id: ElementId::intern("existing"),
            },
        );
        assert!(ops.is_empty());
    }

    #[test]
    fn select_tool_is_passive() {
        let ops = dispatch(
            ToolKind::Select,
            &CanvasEvent::ClickCanvas {
                position: Vec2::default(),
            },
        );
        assert!(ops.is_empty());
    }
}
