//! Integration tests: snapshot history across the document store.
//!
//! Exercises the History + DocumentStore interaction: cursor invariants,
//! exact state restoration, and redo-branch truncation.

use fp_core::{ElementId, ShapeKind, Vec2};
use fp_editor::store::{DocumentStore, EditOp};
use pretty_assertions::assert_eq;

fn add_rect(store: &mut DocumentStore, x: f32, y: f32) -> ElementId {
    store
        .apply(EditOp::AddNode {
            shape: ShapeKind::Rect,
            position: Vec2::new(x, y),
        })
        .expect("AddNode returns the created id")
}

// ─── Exact restoration ──────────────────────────────────────────────────

#[test]
fn undo_then_redo_restores_exact_document() {
    let mut store = DocumentStore::new();
    let a = add_rect(&mut store, 0.0, 0.0);
    let b = add_rect(&mut store, 100.0, 0.0);
    store
        .apply(EditOp::Connect {
            source: a,
            target: b,
        })
        .unwrap();
    store.apply(EditOp::SetLabel {
        id: a,
        label: "start".into(),
    });

    let before = store.document().clone();
    store.apply(EditOp::DeleteNode { id: b });
    let after = store.document().clone();

    assert!(store.undo());
    assert_eq!(store.document(), &before);
    assert!(store.redo());
    assert_eq!(store.document(), &after);
}

#[test]
fn undo_at_start_and_redo_at_end_are_noops() {
    let mut store = DocumentStore::new();
    assert!(!store.undo());
    assert!(!store.redo());

    add_rect(&mut store, 0.0, 0.0);
    // Cursor sits at the only entry: no prior state to restore.
    assert!(!store.undo());
    assert!(!store.redo());
    assert_eq!(store.document().nodes.len(), 1);
}

// ─── Truncation ─────────────────────────────────────────────────────────

#[test]
fn new_edit_after_undos_discards_redo_branch() {
    let mut store = DocumentStore::new();
    // S0, S1, S2: one, two, three rects.
    add_rect(&mut store, 0.0, 0.0);
    add_rect(&mut store, 10.0, 0.0);
    add_rect(&mut store, 20.0, 0.0);
    assert_eq!(store.history().cursor(), Some(2));

    store.undo();
    store.undo();
    assert_eq!(store.history().cursor(), Some(0));
    assert_eq!(store.document().nodes.len(), 1);

    // New edit S3: S1 and S2 are gone for good.
    let c = add_rect(&mut store, 99.0, 99.0);
    assert_eq!(store.history().len(), 2);
    assert_eq!(store.history().cursor(), Some(1));
    assert!(!store.redo());
    assert_eq!(store.document().nodes.len(), 2);
    assert!(store.document().contains_node(c));
}

// ─── Gesture batching ───────────────────────────────────────────────────

#[test]
fn drag_gesture_is_one_history_entry() {
    let mut store = DocumentStore::new();
    let id = add_rect(&mut store, 0.0, 0.0);
    let entries = store.history().len();

    // The rendering layer streams intermediate positions frame by frame.
    for i in 1..=20 {
        let mut nodes = store.document().nodes.clone();
        if let Some(node) = nodes.iter_mut().find(|n| n.id == id) {
            node.position = Vec2::new(i as f32 * 4.0, i as f32 * 2.0);
        }
        store.set_nodes(nodes);
    }
    assert_eq!(store.history().len(), entries);

    store.apply(EditOp::CommitDrag);
    assert_eq!(store.history().len(), entries + 1);

    // One undo rewinds the whole gesture.
    store.undo();
    assert_eq!(
        store.document().node(id).unwrap().position,
        Vec2::new(0.0, 0.0)
    );
}
