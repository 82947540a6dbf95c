//! Element identity.
//!
//! Every node and edge carries an [`ElementId`]. Ids are interned strings:
//! the document, the selection set, the history snapshots and the editing
//! engine all pass 4-byte copies around and compare them in O(1), while
//! the external contract (events from the rendering layer, serialized
//! documents) stays plain strings.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

// Backs with_prefix. Never reset, so generated ids are unique for the
// life of the process even across documents.
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Interned identifier for a canvas element (node or edge).
///
/// Copy, Eq and Hash are index operations on the interner slot; the
/// string itself lives once, process-wide. Ids are immutable after
/// creation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    /// Intern a string id. Interning the same string twice yields equal
    /// ids, which is what lets deserialized documents compare against
    /// live ones.
    pub fn intern(s: &str) -> Self {
        ElementId(INTERNER.get_or_intern(s))
    }

    /// Mint a fresh `{prefix}_{n}` id from the process-global counter.
    /// `node_0`, `edge_3`, and so on.
    pub fn with_prefix(prefix: &str) -> Self {
        let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{prefix}_{n}"))
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

// On the wire an id is just its string.
impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ElementId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_strings_intern_to_equal_ids() {
        assert_eq!(ElementId::intern("node_7"), ElementId::intern("node_7"));
        assert_ne!(ElementId::intern("node_7"), ElementId::intern("edge_7"));
    }

    #[test]
    fn minted_ids_never_collide() {
        let a = ElementId::with_prefix("node");
        let b = ElementId::with_prefix("edge");
        let c = ElementId::with_prefix("node");
        assert_ne!(a, c);
        assert!(a.as_str().starts_with("node_"));
        assert!(b.as_str().starts_with("edge_"));
    }

    #[test]
    fn serializes_as_the_bare_string() {
        let id = ElementId::intern("gateway");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"gateway\"");
        let back: ElementId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
