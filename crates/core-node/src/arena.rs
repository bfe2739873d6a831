//! Frame arena: identity-keyed storage for widget descriptors.
//!
//! Caches and the dirty set are keyed on *identity*, never structure. The
//! arena is a generational slot store: a `NodeId` survives exactly as long
//! as its slot, and a removed slot's id never resolves again even after the
//! slot is reused. Applications keep the ids of retained subtrees across
//! frames — that identity reuse is what makes the measure/layout caches hit;
//! rebuilt subtrees get fresh ids and miss naturally.
//!
//! Invariants:
//! * `get` on a removed id returns `None` (no ABA: generations).
//! * Child lists reference ids in the same arena; the layout engine treats a
//!   dangling child id as an invalid-props failure, not a panic.

use ahash::AHashSet;
use slotmap::{SlotMap, new_key_type};

use crate::layout_props::LayoutProps;
use crate::props::Props;

new_key_type! {
    /// Identity of one widget descriptor. Copyable, hashable, generational.
    pub struct NodeId;
}

/// Immutable widget descriptor. Produced fresh by application code; the
/// pipeline only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct VNode {
    pub props: Props,
    pub layout: LayoutProps,
    pub children: Vec<NodeId>,
    /// Stable widget id for anchoring, focus and the id-rect index.
    pub id: Option<String>,
}

impl VNode {
    pub fn new(props: Props) -> Self {
        Self {
            props,
            layout: LayoutProps::default(),
            children: Vec::new(),
            id: None,
        }
    }

    pub fn with_layout(mut self, layout: LayoutProps) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_children(mut self, children: Vec<NodeId>) -> Self {
        self.children = children;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: SlotMap<NodeId, VNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, node: VNode) -> NodeId {
        self.nodes.insert(node)
    }

    /// Drop a descriptor; its id stops resolving immediately.
    pub fn remove(&mut self, id: NodeId) -> Option<VNode> {
        self.nodes.remove(id)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&VNode> {
        self.nodes.get(id)
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Set of identities whose subtree changed this frame. Cache reads skip
/// members; the reconciler rebuilds it every frame.
#[derive(Debug, Default)]
pub struct DirtySet {
    set: AHashSet<NodeId>,
}

impl DirtySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, id: NodeId) {
        self.set.insert(id);
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.set.contains(&id)
    }

    pub fn clear(&mut self) {
        self.set.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::{Props, TextProps};

    fn text(content: &str) -> VNode {
        VNode::new(Props::Text(TextProps {
            content: content.into(),
            ..TextProps::default()
        }))
    }

    #[test]
    fn alloc_get_remove() {
        let mut arena = NodeArena::new();
        let id = arena.alloc(text("hi"));
        assert!(arena.contains(id));
        assert!(arena.remove(id).is_some());
        assert!(arena.get(id).is_none());
    }

    #[test]
    fn removed_id_never_resolves_after_reuse() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(text("a"));
        arena.remove(a);
        let b = arena.alloc(text("b"));
        assert!(arena.get(a).is_none(), "stale id must not alias new slot");
        assert!(arena.contains(b));
    }

    #[test]
    fn dirty_set_membership() {
        let mut arena = NodeArena::new();
        let id = arena.alloc(text("x"));
        let mut dirty = DirtySet::new();
        assert!(!dirty.contains(id));
        dirty.mark(id);
        assert!(dirty.contains(id));
        dirty.clear();
        assert!(dirty.is_empty());
    }
}
