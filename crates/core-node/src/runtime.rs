//! Reconciler-facing types the renderer consumes.
//!
//! The reconciler itself is an external collaborator: it diffs descriptor
//! trees, maintains persistent instances, and hands the renderer this view.
//! Nothing here mutates during a frame walk.

use ahash::AHashMap;
use core_geometry::Rect;

use crate::arena::NodeId;

/// Persistent per-node identity across frames. Created on first mount,
/// destroyed when the reconciler removes the descriptor.
#[derive(Debug, Clone)]
pub struct RuntimeInstance {
    pub instance_id: u64,
    pub node: NodeId,
    pub children: Vec<RuntimeInstance>,
    /// Union of self + child damage contributions since the last paint.
    pub damage: Option<Rect>,
    /// Pressed-state for button-like leaves.
    pub pressed: bool,
}

impl RuntimeInstance {
    pub fn new(instance_id: u64, node: NodeId) -> Self {
        Self {
            instance_id,
            node,
            children: Vec::new(),
            damage: None,
            pressed: false,
        }
    }

    pub fn with_children(mut self, children: Vec<RuntimeInstance>) -> Self {
        self.children = children;
        self
    }

    /// Build an instance tree mirroring the descriptor tree, assigning
    /// sequential instance ids depth-first. Embedders with a real
    /// reconciler maintain instances incrementally; this is the cold-mount
    /// path (and the test harness).
    pub fn mirror_tree(arena: &crate::arena::NodeArena, root: NodeId) -> Option<RuntimeInstance> {
        fn build(
            arena: &crate::arena::NodeArena,
            id: NodeId,
            next: &mut u64,
        ) -> Option<RuntimeInstance> {
            let vnode = arena.get(id)?;
            let instance_id = *next;
            *next += 1;
            let children = vnode
                .children
                .iter()
                .filter_map(|&c| build(arena, c, next))
                .collect();
            Some(RuntimeInstance {
                instance_id,
                node: id,
                children,
                damage: None,
                pressed: false,
            })
        }
        let mut next = 1;
        build(arena, root, &mut next)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FocusState {
    pub focused_id: Option<String>,
}

impl FocusState {
    pub fn focused(id: impl Into<String>) -> Self {
        Self {
            focused_id: Some(id.into()),
        }
    }

    pub fn is_focused(&self, widget_id: Option<&str>) -> bool {
        match (&self.focused_id, widget_id) {
            (Some(f), Some(w)) => f == w,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    #[default]
    Block,
    Bar,
    Underline,
}

/// Cursor configuration plus per-instance grapheme offsets for input-like
/// leaves.
#[derive(Debug, Clone, Default)]
pub struct CursorInfo {
    pub shape: CursorShape,
    pub blink: bool,
    pub cursor_by_instance: AHashMap<u64, usize>,
}

impl CursorInfo {
    pub fn offset_for(&self, instance_id: u64) -> Option<usize> {
        self.cursor_by_instance.get(&instance_id).copied()
    }
}

/// Widget-id → rect index populated by a pre-walk over the layout tree.
/// Anchored overlays (dropdowns, tooltips) resolve their anchor here.
#[derive(Debug, Clone, Default)]
pub struct IdRectIndex {
    rects: AHashMap<String, Rect>,
}

impl IdRectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, rect: Rect) {
        self.rects.insert(id.into(), rect);
    }

    pub fn get(&self, id: &str) -> Option<Rect> {
        self.rects.get(id).copied()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_matching() {
        let f = FocusState::focused("search");
        assert!(f.is_focused(Some("search")));
        assert!(!f.is_focused(Some("other")));
        assert!(!f.is_focused(None));
        assert!(!FocusState::default().is_focused(Some("search")));
    }

    #[test]
    fn id_rect_round_trip() {
        let mut idx = IdRectIndex::new();
        idx.insert("anchor", Rect::new(1, 2, 3, 4));
        assert_eq!(idx.get("anchor"), Some(Rect::new(1, 2, 3, 4)));
        assert_eq!(idx.get("missing"), None);
    }

    #[test]
    fn cursor_offsets_by_instance() {
        let mut info = CursorInfo::default();
        info.cursor_by_instance.insert(7, 3);
        assert_eq!(info.offset_for(7), Some(3));
        assert_eq!(info.offset_for(8), None);
    }
}
