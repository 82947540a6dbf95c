//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s, resolved
//! platform-aware: ⌘ on macOS and Ctrl elsewhere both count as the
//! command key.

use crate::input::Modifiers;
use crate::tools::ToolKind;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Tool switching ──
    ToolSelect,
    ToolEraser,
    ToolRect,
    ToolCircle,
    ToolLabel,

    // ── Edit ──
    Undo,
    Redo,
    DeleteSelection,

    // ── UI ──
    /// Escape: cancel the active session, else clear the selection.
    Deselect,
}

impl ShortcutAction {
    /// The tool this action switches to, if it is a tool switch.
    pub fn tool(self) -> Option<ToolKind> {
        match self {
            ShortcutAction::ToolSelect => Some(ToolKind::Select),
            ShortcutAction::ToolEraser => Some(ToolKind::Eraser),
            ShortcutAction::ToolRect => Some(ToolKind::Rect),
            ShortcutAction::ToolCircle => Some(ToolKind::Circle),
            ShortcutAction::ToolLabel => Some(ToolKind::Label),
            _ => None,
        }
    }
}

/// Resolves key events into shortcut actions.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    /// Returns `None` for unbound combos.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let cmd = modifiers.command();

        if cmd && modifiers.shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        // ── Single keys (no modifiers) ──
        match key {
            "v" | "V" => Some(ShortcutAction::ToolSelect),
            "e" | "E" => Some(ShortcutAction::ToolEraser),
            "r" | "R" => Some(ShortcutAction::ToolRect),
            "o" | "O" => Some(ShortcutAction::ToolCircle),
            "t" | "T" => Some(ShortcutAction::ToolLabel),
            "Delete" | "Backspace" => Some(ShortcutAction::DeleteSelection),
            "Escape" => Some(ShortcutAction::Deselect),
            _ => None,
        }
    }
}
