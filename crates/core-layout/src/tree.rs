//! Positioned layout tree.
//!
//! A `LayoutNode` pairs a descriptor identity with its absolute cell rect
//! and positioned children. Subtrees are shared through `Rc` so a cache hit
//! hands back the stored tree without cloning; consumers treat every node
//! as read-only.
//!
//! Invariants:
//! * `rect` sizes are non-negative (clamped at construction).
//! * For `overflow=visible` children may exceed the parent rect; `hidden`
//!   and `scroll` containers record the clip discipline in `meta` and the
//!   renderer clips accordingly. Scroll-container children are positioned
//!   in content space (as if unscrolled); the view transform is applied at
//!   paint time.

use std::rc::Rc;

use core_geometry::Rect;
use core_node::NodeId;

/// Side-data for overflow containers and per-widget tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutMeta {
    pub scroll_x: i32,
    pub scroll_y: i32,
    pub content_w: i32,
    pub content_h: i32,
    pub viewport_w: i32,
    pub viewport_h: i32,
    /// Active index token for navigation widgets (tabs, accordion).
    pub nav_index: Option<usize>,
}

impl LayoutMeta {
    /// True when the horizontal axis overflows its viewport.
    pub fn overflows_x(&self) -> bool {
        self.content_w > self.viewport_w
    }

    pub fn overflows_y(&self) -> bool {
        self.content_h > self.viewport_h
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub node: NodeId,
    pub rect: Rect,
    pub children: Vec<Rc<LayoutNode>>,
    pub meta: Option<LayoutMeta>,
}

pub type LayoutTree = Rc<LayoutNode>;

impl LayoutNode {
    pub fn leaf(node: NodeId, rect: Rect) -> Rc<Self> {
        Rc::new(Self {
            node,
            rect,
            children: Vec::new(),
            meta: None,
        })
    }

    pub fn branch(node: NodeId, rect: Rect, children: Vec<Rc<LayoutNode>>) -> Rc<Self> {
        Rc::new(Self {
            node,
            rect,
            children,
            meta: None,
        })
    }

    pub fn with_meta(
        node: NodeId,
        rect: Rect,
        children: Vec<Rc<LayoutNode>>,
        meta: LayoutMeta,
    ) -> Rc<Self> {
        Rc::new(Self {
            node,
            rect,
            children,
            meta: Some(meta),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_overflow_predicates() {
        let m = LayoutMeta {
            content_w: 100,
            content_h: 10,
            viewport_w: 80,
            viewport_h: 20,
            ..LayoutMeta::default()
        };
        assert!(m.overflows_x());
        assert!(!m.overflows_y());
    }
}
