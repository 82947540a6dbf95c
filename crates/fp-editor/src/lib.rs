//! Flowpad editing engine.
//!
//! This crate is the headless half of a diagram editor: it owns the
//! canonical document, decides how pointer and keyboard input mutate it,
//! and keeps a linear undo history. Rendering, drag physics, and viewport
//! pan/zoom live in an external rendering layer that feeds normalized
//! [`input::CanvasEvent`]s in and reads the document (plus
//! [`tools::CanvasFlags`]) back out after every change.

pub mod editor;
pub mod history;
pub mod input;
pub mod session;
pub mod shortcuts;
pub mod store;
pub mod tools;

pub use editor::Editor;
pub use history::History;
pub use input::{CanvasEvent, Modifiers};
pub use session::{ColorTarget, Corner, EditSession, PickerState, SessionMode};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use store::{DocumentStore, EditOp, NodePatch};
pub use tools::{CanvasFlags, ToolKind};
