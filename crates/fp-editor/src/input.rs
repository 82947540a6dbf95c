//! Normalized canvas events.
//!
//! The rendering layer (which owns hit testing, drag physics, and the
//! screen→canvas projection) reports user interactions as discrete
//! `CanvasEvent`s. Positions are always canvas coordinates — the
//! projection happened before the event reaches this crate.

use fp_core::{ElementId, Vec2};

/// A discrete interaction reported by the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// Click landed on a node.
    ClickNode { id: ElementId },

    /// Click landed on an edge.
    ClickEdge { id: ElementId },

    /// Click landed on empty canvas, at canvas coordinates.
    ClickCanvas { position: Vec2 },

    /// Double-click on a node (starts in-place label editing).
    DoubleClickNode { id: ElementId },

    /// The user drew a connection from one node to another.
    Connect {
        source: ElementId,
        target: ElementId,
    },

    /// A node drag gesture finished; positions were already streamed in
    /// via `DocumentStore::set_nodes`.
    DragStop,

    /// The selection changed; replaces the selection set wholesale.
    SelectionChanged { ids: Vec<ElementId> },
}

/// Keyboard modifier state accompanying key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// The platform command key: ⌘ on macOS, Ctrl elsewhere.
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}
