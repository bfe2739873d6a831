//! Layout engine entry points, constraint resolution and family dispatch.
//!
//! `measure` returns a node's natural size under a constraint; `layout`
//! produces the positioned tree. Both are pure over the caches: the same
//! identity and constraint tuple always resolves to the same result, and a
//! warm cache changes cost, never output.
//!
//! Dispatch routes by kind family; the per-family implementations live in
//! sibling modules as further `impl LayoutEngine` blocks.
//!
//! Failure semantics: the first invalid node aborts the whole call with
//! `InvalidProps` carrying a `root.children[..]` locator. No cache entry is
//! written for a failing subtree. Numeric constraints must be non-negative
//! `i32`; wider intermediates clamp instead of wrapping.

use std::rc::Rc;

use core_geometry::{Axis, Size};
use core_node::{Dim, Family, NodeArena, NodeId, Position, VNode};

use crate::cache::{FrameCaches, LayoutKey, MeasureKey};
use crate::error::LayoutError;
use crate::flex::FlexPool;
use crate::tree::LayoutNode;

pub struct LayoutEngine {
    pub(crate) flex_pool: FlexPool,
    /// Pooled `(child index, id)` scratch lists for the stack path.
    flow_pool: Vec<Vec<(usize, NodeId)>>,
}

/// Per-call state threaded through the recursion: the descriptor arena, the
/// caller's cache bundle (shared by nested calls via the call stack), and
/// the child-index path used to build error locators.
pub(crate) struct Pass<'a> {
    pub arena: &'a NodeArena,
    pub caches: Option<&'a mut FrameCaches>,
    pub path: Vec<usize>,
}

impl<'a> Pass<'a> {
    fn new(arena: &'a NodeArena, caches: Option<&'a mut FrameCaches>) -> Self {
        Self {
            arena,
            caches,
            path: Vec::new(),
        }
    }

    pub(crate) fn invalid(&self, detail: impl Into<String>) -> LayoutError {
        LayoutError::invalid(&self.path, detail)
    }

    /// Cache-read gate: present, and not dirtied this frame.
    fn cache_live(&self, id: NodeId) -> bool {
        match &self.caches {
            Some(c) => !c.dirty.contains(id),
            None => false,
        }
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self {
            flex_pool: FlexPool::new(),
            flow_pool: Vec::new(),
        }
    }

    pub(crate) fn take_flow(&mut self) -> Vec<(usize, NodeId)> {
        let mut v = self.flow_pool.pop().unwrap_or_default();
        v.clear();
        v
    }

    pub(crate) fn put_flow(&mut self, v: Vec<(usize, NodeId)>) {
        self.flow_pool.push(v);
    }

    /// Natural size of `id` under `(max_w, max_h)` on `axis`.
    pub fn measure(
        &mut self,
        arena: &NodeArena,
        id: NodeId,
        max_w: i32,
        max_h: i32,
        axis: Axis,
    ) -> Result<Size, LayoutError> {
        self.measure_with_caches(arena, id, max_w, max_h, axis, None)
    }

    pub fn measure_with_caches(
        &mut self,
        arena: &NodeArena,
        id: NodeId,
        max_w: i32,
        max_h: i32,
        axis: Axis,
        caches: Option<&mut FrameCaches>,
    ) -> Result<Size, LayoutError> {
        let mut pass = Pass::new(arena, caches);
        validate_viewport(&pass, max_w, max_h)?;
        self.reject_legacy(&mut pass, id)?;
        self.measure_node(&mut pass, id, max_w, max_h, axis)
    }

    /// Positioned subtree for `id` at `(x, y)` under `(max_w, max_h)`.
    #[allow(clippy::too_many_arguments)]
    pub fn layout(
        &mut self,
        arena: &NodeArena,
        id: NodeId,
        x: i32,
        y: i32,
        max_w: i32,
        max_h: i32,
        axis: Axis,
        caches: Option<&mut FrameCaches>,
    ) -> Result<Rc<LayoutNode>, LayoutError> {
        let mut pass = Pass::new(arena, caches);
        validate_viewport(&pass, max_w, max_h)?;
        self.reject_legacy(&mut pass, id)?;
        self.layout_node(&mut pass, id, x, y, max_w, max_h, None, None, axis)
    }

    // -- internal recursion ------------------------------------------------

    pub(crate) fn measure_node(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        max_w: i32,
        max_h: i32,
        axis: Axis,
    ) -> Result<Size, LayoutError> {
        let max_w = max_w.max(0);
        let max_h = max_h.max(0);
        let key = MeasureKey {
            id,
            axis,
            max_w,
            max_h,
        };
        if pass.cache_live(id)
            && let Some(c) = pass.caches.as_deref()
            && let Some(size) = c.measure.get(&key)
        {
            return Ok(size);
        }

        let vnode = pass
            .arena
            .get(id)
            .ok_or_else(|| pass.invalid("dangling node id"))?;
        validate_constraints(pass, vnode)?;
        if !vnode.layout.display {
            return Ok(Size::ZERO);
        }

        let (fixed_w, fixed_h) = resolve_fixed_dims(vnode, max_w, max_h);
        let size = match (fixed_w, fixed_h) {
            (Some(w), Some(h)) => Size::new(w, h),
            _ => {
                let avail_w = fixed_w.unwrap_or(max_w);
                let avail_h = fixed_h.unwrap_or(max_h);
                let content = self.measure_content(pass, id, avail_w, avail_h, axis)?;
                Size::new(
                    fixed_w.unwrap_or(content.w),
                    fixed_h.unwrap_or(content.h),
                )
            }
        };
        let size = apply_aspect(vnode, size, fixed_w, fixed_h);
        let size = clamp_min_max(vnode, size).min_with(max_w, max_h);

        if let Some(c) = pass.caches.as_deref_mut() {
            c.measure.insert(key, size);
        }
        Ok(size)
    }

    fn measure_content(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        avail_w: i32,
        avail_h: i32,
        axis: Axis,
    ) -> Result<Size, LayoutError> {
        // Re-fetched per family call so recursion can borrow the pass.
        let vnode = pass.arena.get(id).expect("checked by caller");
        match vnode.props.kind().family() {
            Family::Leaf => self.measure_leaf(pass, id, avail_w, avail_h),
            Family::Stack => self.measure_stack(pass, id, avail_w, avail_h),
            Family::Boxed => self.measure_box(pass, id, avail_w, avail_h),
            Family::Grid => self.measure_grid(pass, id, avail_w, avail_h),
            Family::Collection => self.measure_collection(pass, id, avail_w, avail_h),
            Family::Overlay => self.measure_overlay(pass, id, avail_w, avail_h, axis),
            Family::SplitPane => self.measure_pane(pass, id, avail_w, avail_h, axis),
            Family::Wrapper => self.measure_wrapper(pass, id, avail_w, avail_h, axis),
            Family::Navigation => self.measure_nav(pass, id, avail_w, avail_h, axis),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn layout_node(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        x: i32,
        y: i32,
        max_w: i32,
        max_h: i32,
        forced_w: Option<i32>,
        forced_h: Option<i32>,
        axis: Axis,
    ) -> Result<Rc<LayoutNode>, LayoutError> {
        let max_w = max_w.max(0);
        let max_h = max_h.max(0);
        let key = LayoutKey {
            id,
            axis,
            max_w,
            max_h,
            forced_w,
            forced_h,
            x,
            y,
        };
        if pass.cache_live(id)
            && let Some(c) = pass.caches.as_deref()
            && let Some(tree) = c.layout.get(&key)
        {
            return Ok(tree);
        }

        let natural = self.measure_node(pass, id, max_w, max_h, axis)?;
        let w = forced_w.unwrap_or(natural.w).clamp(0, max_w);
        let h = forced_h.unwrap_or(natural.h).clamp(0, max_h);

        let vnode = pass.arena.get(id).expect("measured above");
        let tree = if !vnode.layout.display {
            LayoutNode::leaf(id, core_geometry::Rect::new(x, y, 0, 0))
        } else {
            match vnode.props.kind().family() {
                Family::Leaf | Family::Collection => self.layout_leafish(pass, id, x, y, w, h),
                Family::Stack => self.layout_stack(pass, id, x, y, w, h)?,
                Family::Boxed => self.layout_box(pass, id, x, y, w, h)?,
                Family::Grid => self.layout_grid(pass, id, x, y, w, h)?,
                Family::Overlay => self.layout_overlay(pass, id, x, y, w, h, max_w, max_h)?,
                Family::SplitPane => self.layout_pane(pass, id, x, y, w, h)?,
                Family::Wrapper => self.layout_wrapper(pass, id, x, y, w, h)?,
                Family::Navigation => self.layout_nav(pass, id, x, y, w, h)?,
            }
        };

        if let Some(c) = pass.caches.as_deref_mut() {
            c.layout.insert(key, Rc::clone(&tree));
        }
        Ok(tree)
    }

    /// Lay out the in-flow children of a container. `absolute` children are
    /// positioned against the content rect afterwards and appended in child
    /// order, so paint stacks them above static siblings.
    pub(crate) fn layout_absolute_children(
        &mut self,
        pass: &mut Pass<'_>,
        parent: NodeId,
        content: core_geometry::Rect,
        out: &mut Vec<Rc<LayoutNode>>,
    ) -> Result<(), LayoutError> {
        let children = pass.arena.get(parent).expect("parent exists").children.clone();
        for (idx, child_id) in children.into_iter().enumerate() {
            let Some(child) = pass.arena.get(child_id) else {
                continue;
            };
            if child.layout.position != Position::Absolute || !child.layout.display {
                continue;
            }
            let lp = child.layout.clone();
            pass.path.push(idx);
            let natural = self.measure_node(pass, child_id, content.w, content.h, Axis::Vertical)?;
            let w = match (lp.left, lp.right) {
                (Some(l), Some(r)) => (content.w - l - r).max(0),
                _ => natural.w,
            };
            let h = match (lp.top, lp.bottom) {
                (Some(t), Some(b)) => (content.h - t - b).max(0),
                _ => natural.h,
            };
            let cx = match (lp.left, lp.right) {
                (Some(l), _) => content.x + l,
                (None, Some(r)) => content.right() - r - w,
                (None, None) => content.x,
            };
            let cy = match (lp.top, lp.bottom) {
                (Some(t), _) => content.y + t,
                (None, Some(b)) => content.bottom() - b - h,
                (None, None) => content.y,
            };
            let node =
                self.layout_node(pass, child_id, cx, cy, w, h, Some(w), Some(h), Axis::Vertical)?;
            pass.path.pop();
            out.push(node);
        }
        Ok(())
    }

    // -- legacy constraint detection ---------------------------------------

    /// One pre-walk over the tree flagging legacy size encodings with a path
    /// locator. Runs on both public entry points.
    fn reject_legacy(&mut self, pass: &mut Pass<'_>, id: NodeId) -> Result<(), LayoutError> {
        let Some(vnode) = pass.arena.get(id) else {
            return Err(pass.invalid("dangling node id"));
        };
        if vnode.layout.has_legacy_dim() {
            let detail = match (&vnode.layout.width, &vnode.layout.height) {
                (Dim::Percent(p), _) | (_, Dim::Percent(p)) => {
                    format!("legacy percentage constraint {p}%")
                }
                _ => "legacy responsive-map constraint".to_string(),
            };
            return Err(pass.invalid(detail));
        }
        let children = vnode.children.clone();
        for (idx, child) in children.into_iter().enumerate() {
            pass.path.push(idx);
            self.reject_legacy(pass, child)?;
            pass.path.pop();
        }
        Ok(())
    }
}

// -- free helpers -----------------------------------------------------------

fn validate_viewport(pass: &Pass<'_>, max_w: i32, max_h: i32) -> Result<(), LayoutError> {
    if max_w < 0 || max_h < 0 {
        return Err(pass.invalid(format!("negative constraint ({max_w}, {max_h})")));
    }
    Ok(())
}

fn validate_constraints(pass: &Pass<'_>, vnode: &VNode) -> Result<(), LayoutError> {
    let lp = &vnode.layout;
    for (name, v) in [
        ("minWidth", lp.min_w),
        ("maxWidth", lp.max_w),
        ("minHeight", lp.min_h),
        ("maxHeight", lp.max_h),
        ("basis", lp.basis),
    ] {
        if let Some(v) = v
            && v < 0
        {
            return Err(pass.invalid(format!("negative {name} {v}")));
        }
    }
    for dim in [&lp.width, &lp.height] {
        match dim {
            Dim::Cells(n) if *n < 0 => {
                return Err(pass.invalid(format!("negative size constraint {n}")));
            }
            Dim::Percent(_) | Dim::Responsive(_) => {
                return Err(pass.invalid("legacy size constraint"));
            }
            _ => {}
        }
    }
    if let Some(ratio) = lp.aspect_ratio
        && (!ratio.is_finite() || ratio <= 0.0)
    {
        return Err(pass.invalid(format!("invalid aspect ratio {ratio}")));
    }
    Ok(())
}

fn resolve_fixed_dims(vnode: &VNode, max_w: i32, max_h: i32) -> (Option<i32>, Option<i32>) {
    let fix = |dim: &Dim, max: i32| match dim {
        Dim::Cells(n) => Some((*n).min(max)),
        Dim::Full => Some(max),
        _ => None,
    };
    (fix(&vnode.layout.width, max_w), fix(&vnode.layout.height, max_h))
}

/// Derive the free axis from the fixed one when an aspect ratio (w / h) is
/// set. Explicit sizes on both axes win over the ratio.
fn apply_aspect(vnode: &VNode, size: Size, fixed_w: Option<i32>, fixed_h: Option<i32>) -> Size {
    let Some(ratio) = vnode.layout.aspect_ratio else {
        return size;
    };
    match (fixed_w, fixed_h) {
        (Some(_), Some(_)) => size,
        (Some(w), None) => Size::new(w, (w as f32 / ratio).round() as i32),
        (None, Some(h)) => Size::new((h as f32 * ratio).round() as i32, h),
        (None, None) => Size::new(size.w, (size.w as f32 / ratio).round() as i32),
    }
}

fn clamp_min_max(vnode: &VNode, size: Size) -> Size {
    let lp = &vnode.layout;
    let clamp_axis = |v: i32, min: Option<i32>, max: Option<i32>| {
        let mut v = v;
        if let Some(min) = min {
            v = v.max(min);
        }
        if let Some(max) = max {
            v = v.min(max);
        }
        v
    };
    Size::new(
        clamp_axis(size.w, lp.min_w, lp.max_w),
        clamp_axis(size.h, lp.min_h, lp.max_h),
    )
}

/// Main-axis flex parameters for one stack child.
pub(crate) fn flex_bounds(vnode: &VNode, axis: Axis, natural_main: i32) -> (i32, i32, i32) {
    let lp = &vnode.layout;
    let (min, max) = match axis {
        Axis::Horizontal => (lp.min_w, lp.max_w),
        Axis::Vertical => (lp.min_h, lp.max_h),
    };
    let basis = lp.basis.unwrap_or(natural_main).max(0);
    (basis, min.unwrap_or(0), max.unwrap_or(i32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_node::{LayoutProps, Props, SpacerProps, TextProps, VNode};

    fn spacer(w: i32, h: i32) -> VNode {
        VNode::new(Props::Spacer(SpacerProps { w, h }))
    }

    #[test]
    fn negative_viewport_is_invalid_props() {
        let mut arena = NodeArena::new();
        let id = arena.alloc(spacer(1, 1));
        let mut engine = LayoutEngine::new();
        let err = engine
            .measure(&arena, id, -1, 10, Axis::Vertical)
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidProps { .. }));
    }

    #[test]
    fn legacy_dim_rejected_with_path() {
        let mut arena = NodeArena::new();
        let bad = arena.alloc(spacer(1, 1).with_layout(LayoutProps {
            width: Dim::Percent(50.0),
            ..LayoutProps::default()
        }));
        let root = arena.alloc(
            VNode::new(Props::Column(core_node::StackProps::default()))
                .with_children(vec![bad]),
        );
        let mut engine = LayoutEngine::new();
        let err = engine
            .measure(&arena, root, 80, 24, Axis::Vertical)
            .unwrap_err();
        let LayoutError::InvalidProps { path, detail } = err;
        assert_eq!(path, "root.children[0]");
        assert!(detail.contains("percentage"), "{detail}");
    }

    #[test]
    fn display_false_measures_zero() {
        let mut arena = NodeArena::new();
        let id = arena.alloc(spacer(5, 5).with_layout(LayoutProps {
            display: false,
            ..LayoutProps::default()
        }));
        let mut engine = LayoutEngine::new();
        let size = engine.measure(&arena, id, 80, 24, Axis::Vertical).unwrap();
        assert_eq!(size, Size::ZERO);
    }

    #[test]
    fn fixed_dims_win_over_content() {
        let mut arena = NodeArena::new();
        let id = arena.alloc(
            VNode::new(Props::Text(TextProps {
                content: "hello world".into(),
                ..TextProps::default()
            }))
            .with_layout(LayoutProps {
                width: Dim::Cells(4),
                height: Dim::Cells(2),
                ..LayoutProps::default()
            }),
        );
        let mut engine = LayoutEngine::new();
        let size = engine.measure(&arena, id, 80, 24, Axis::Vertical).unwrap();
        assert_eq!(size, Size::new(4, 2));
    }

    #[test]
    fn measure_clamps_to_viewport() {
        let mut arena = NodeArena::new();
        let id = arena.alloc(spacer(100, 50));
        let mut engine = LayoutEngine::new();
        let size = engine.measure(&arena, id, 80, 24, Axis::Vertical).unwrap();
        assert_eq!(size, Size::new(80, 24));
    }

    #[test]
    fn aspect_ratio_derives_height() {
        let mut arena = NodeArena::new();
        let id = arena.alloc(spacer(0, 0).with_layout(LayoutProps {
            width: Dim::Cells(10),
            aspect_ratio: Some(2.0),
            ..LayoutProps::default()
        }));
        let mut engine = LayoutEngine::new();
        let size = engine.measure(&arena, id, 80, 24, Axis::Vertical).unwrap();
        assert_eq!(size, Size::new(10, 5));
    }

    #[test]
    fn min_max_clamp_applies() {
        let mut arena = NodeArena::new();
        let id = arena.alloc(spacer(2, 1).with_layout(LayoutProps {
            min_w: Some(6),
            max_h: Some(0),
            ..LayoutProps::default()
        }));
        let mut engine = LayoutEngine::new();
        let size = engine.measure(&arena, id, 80, 24, Axis::Vertical).unwrap();
        assert_eq!(size, Size::new(6, 0));
    }

    #[test]
    fn measure_twice_identical() {
        let mut arena = NodeArena::new();
        let id = arena.alloc(spacer(3, 2));
        let mut engine = LayoutEngine::new();
        let a = engine.measure(&arena, id, 80, 24, Axis::Vertical).unwrap();
        let b = engine.measure(&arena, id, 80, 24, Axis::Vertical).unwrap();
        assert_eq!(a, b);
    }
}
