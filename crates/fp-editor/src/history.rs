//! Linear undo/redo history over document snapshots.
//!
//! The log holds full `Document` clones with a cursor marking the current
//! state. Saving after one or more undos truncates the stale redo branch
//! first — standard editor semantics (Word/Photoshop-style undo, not a
//! branching tree). History is volatile: in-memory only, gone on teardown.

use fp_core::Document;

/// Append-only, truncating snapshot log with a cursor.
///
/// Invariant: `cursor` is `None` iff `entries` is empty; otherwise
/// `cursor < entries.len()`.
#[derive(Debug)]
pub struct History {
    entries: Vec<Document>,
    cursor: Option<usize>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

/// Undo depth kept before the oldest snapshots are dropped.
pub const DEFAULT_MAX_DEPTH: usize = 100;

impl History {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            max_depth: max_depth.max(1),
        }
    }

    /// Capture a snapshot as the new current state. Any entries after the
    /// cursor (an abandoned redo branch) are discarded; when the log
    /// exceeds `max_depth` the oldest entry is dropped.
    pub fn save(&mut self, doc: &Document) {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        self.entries.push(doc.clone());
        if self.entries.len() > self.max_depth {
            self.entries.remove(0);
        }
        self.cursor = Some(self.entries.len() - 1);
        log::trace!(
            "history save: {} entries, cursor {}",
            self.entries.len(),
            self.entries.len() - 1
        );
    }

    /// Step the cursor back and return the snapshot to restore, or `None`
    /// at the start of history (a defined no-op, not an error).
    pub fn undo(&mut self) -> Option<&Document> {
        let cursor = self.cursor?;
        if cursor == 0 {
            return None;
        }
        self.cursor = Some(cursor - 1);
        self.entries.get(cursor - 1)
    }

    /// Step the cursor forward and return the snapshot to restore, or
    /// `None` at the end of history.
    pub fn redo(&mut self) -> Option<&Document> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cursor + 1);
        self.entries.get(cursor + 1)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The cursor position, `None` when the log is empty.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The snapshot at the cursor, if any.
    pub fn current(&self) -> Option<&Document> {
        self.entries.get(self.cursor?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_core::{ElementId, Node, ShapeKind, Vec2};
    use pretty_assertions::assert_eq;

    /// A document with `n` rects under stable ids, so equal calls build
    /// value-equal snapshots.
    fn doc_with(n: usize) -> Document {
        let mut doc = Document::new();
        for i in 0..n {
            doc.add_node(Node::new(
                ElementId::intern(&format!("h{i}")),
                ShapeKind::Rect,
                Vec2::new(i as f32 * 10.0, 0.0),
            ));
        }
        doc
    }

    fn assert_cursor_invariant(h: &History) {
        match h.cursor() {
            None => assert!(h.is_empty()),
            Some(c) => assert!(c < h.len()),
        }
    }

    #[test]
    fn empty_history_noops() {
        let mut h = History::new();
        assert!(h.undo().is_none());
        assert!(h.redo().is_none());
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert_eq!(h.cursor(), None);
    }

    #[test]
    fn undo_then_redo_restores_exact_state() {
        let mut h = History::new();
        let s0 = doc_with(1);
        let s1 = doc_with(2);
        h.save(&s0);
        h.save(&s1);

        assert_eq!(h.undo(), Some(&s0));
        assert_eq!(h.redo(), Some(&s1));
        assert_cursor_invariant(&h);
    }

    #[test]
    fn save_after_undo_discards_redo_branch() {
        let mut h = History::new();
        let s0 = doc_with(0);
        let s1 = doc_with(1);
        let s2 = doc_with(2);
        h.save(&s0);
        h.save(&s1);
        h.save(&s2);
        assert_eq!(h.cursor(), Some(2));

        h.undo();
        assert_eq!(h.undo(), Some(&s0));
        assert_eq!(h.cursor(), Some(0));

        let s3 = doc_with(3);
        h.save(&s3);
        assert_eq!(h.len(), 2);
        assert_eq!(h.cursor(), Some(1));
        assert!(!h.can_redo());
        assert_eq!(h.current(), Some(&s3));
        // The discarded branch is unreachable: one undo lands on s0.
        assert_eq!(h.undo(), Some(&s0));
    }

    #[test]
    fn cursor_invariant_across_interleavings() {
        let mut h = History::new();
        for i in 0..5 {
            h.save(&doc_with(i));
            assert_cursor_invariant(&h);
        }
        for _ in 0..10 {
            h.undo();
            assert_cursor_invariant(&h);
        }
        for _ in 0..10 {
            h.redo();
            assert_cursor_invariant(&h);
        }
        h.save(&doc_with(9));
        assert_cursor_invariant(&h);
    }

    #[test]
    fn max_depth_drops_oldest() {
        let mut h = History::with_max_depth(3);
        for i in 0..5 {
            h.save(&doc_with(i));
        }
        assert_eq!(h.len(), 3);
        // Oldest surviving snapshot is doc_with(2)
        let mut undone = 0;
        while h.undo().is_some() {
            undone += 1;
        }
        assert_eq!(undone, 2);
        assert_eq!(h.current(), Some(&doc_with(2)));
    }
}
