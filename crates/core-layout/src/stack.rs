//! Row/column stack containers: measurement and flex positioning.
//!
//! Positioning runs in phases per the distribution contract:
//! 1. measure natural main sizes (flex bases) for in-flow children;
//! 2. grow or shrink on the main axis against the available extent;
//! 3. justify leftover space into a leading offset and boundary gaps;
//! 4. place children, re-measuring the cross extent under the forced main
//!    size (wrapped text trades width for height);
//! 5. for `overflow=scroll`, solve scrollbar track reservation and clamp
//!    the scroll offsets against the measured content box.
//!
//! Children of a scroll container are positioned in content space (as if
//! unscrolled); the renderer applies the view transform. Absolute children
//! are laid out against the container rect after the flow pass and appended
//! in child order.

use std::rc::Rc;

use core_geometry::{Axis, Rect};
use core_node::{Align, NodeId, Overflow, Position, Props, StackProps};

use crate::engine::{LayoutEngine, Pass, flex_bounds};
use crate::error::LayoutError;
use crate::flex::{FlexItem, justify_offsets};
use crate::tree::{LayoutMeta, LayoutNode};

impl LayoutEngine {
    pub(crate) fn measure_stack(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        avail_w: i32,
        avail_h: i32,
    ) -> Result<core_geometry::Size, LayoutError> {
        let arena = pass.arena;
        let vnode = arena.get(id).expect("caller resolved id");
        let (axis, props) = stack_parts(&vnode.props);
        let gap = props.gap.max(0);

        let mut main = 0i64;
        let mut cross = 0i32;
        let mut flowing = 0usize;
        for (idx, &child_id) in vnode.children.iter().enumerate() {
            let Some(child) = arena.get(child_id) else {
                pass.path.push(idx);
                return Err(pass.invalid("dangling child id"));
            };
            if !child.layout.display || child.layout.position == Position::Absolute {
                continue;
            }
            pass.path.push(idx);
            let size = self.measure_node(pass, child_id, avail_w, avail_h, axis)?;
            pass.path.pop();
            main += size.main(axis) as i64;
            cross = cross.max(size.cross(axis));
            flowing += 1;
        }
        main += gap as i64 * flowing.saturating_sub(1) as i64;
        let (w, h) = axis.pack(core_geometry::clamp_cells(main), cross);
        Ok(core_geometry::Size::new(w, h))
    }

    pub(crate) fn layout_stack(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Result<Rc<LayoutNode>, LayoutError> {
        let arena = pass.arena;
        let vnode = arena.get(id).expect("caller resolved id");
        let (axis, props) = stack_parts(&vnode.props);
        let props = props.clone();
        let rect = Rect::new(x, y, w, h);

        let (mut children, viewport, content_w, content_h) =
            self.flow_with_reservation(pass, id, &props, axis, rect)?;

        self.layout_absolute_children(pass, id, rect, &mut children)?;

        if props.overflow == Overflow::Visible {
            return Ok(LayoutNode::branch(id, rect, children));
        }
        let meta = LayoutMeta {
            scroll_x: props.scroll_x.clamp(0, (content_w - viewport.w).max(0)),
            scroll_y: props.scroll_y.clamp(0, (content_h - viewport.h).max(0)),
            content_w,
            content_h,
            viewport_w: viewport.w,
            viewport_h: viewport.h,
            nav_index: None,
        };
        Ok(LayoutNode::with_meta(id, rect, children, meta))
    }

    /// Run the flow placement inside `rect`, solving scrollbar track
    /// reservation for `overflow=scroll`. The fixed point stabilizes in at
    /// most two iterations: the first pass measures content at the full
    /// extent, the second re-places at the reduced viewport when a track
    /// was reserved. Returns `(children, viewport, content_w, content_h)`.
    pub(crate) fn flow_with_reservation(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        props: &StackProps,
        axis: Axis,
        rect: Rect,
    ) -> Result<(Vec<Rc<LayoutNode>>, Rect, i32, i32), LayoutError> {
        let mut reserve_x = false; // horizontal scrollbar row
        let mut reserve_y = false; // vertical scrollbar column
        let mut children = Vec::new();
        let mut content_w = 0;
        let mut content_h = 0;
        let mut viewport = rect;

        for iteration in 0..2 {
            viewport = Rect::new(
                rect.x,
                rect.y,
                rect.w - reserve_y as i32,
                rect.h - reserve_x as i32,
            );
            children = self.place_flow(pass, id, props, axis, viewport)?;
            content_w = children
                .iter()
                .map(|c| c.rect.right() - viewport.x)
                .max()
                .unwrap_or(0)
                .max(0);
            content_h = children
                .iter()
                .map(|c| c.rect.bottom() - viewport.y)
                .max()
                .unwrap_or(0)
                .max(0);
            if props.overflow != Overflow::Scroll || iteration == 1 {
                break;
            }
            let needs_y = content_h > viewport.h;
            let needs_x = content_w > (rect.w - needs_y as i32);
            if (needs_x, needs_y) == (reserve_x, reserve_y) {
                break;
            }
            reserve_x = needs_x;
            reserve_y = needs_y;
        }
        Ok((children, viewport, content_w, content_h))
    }

    /// Flex-place the in-flow children inside `viewport`.
    fn place_flow(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        props: &StackProps,
        axis: Axis,
        viewport: Rect,
    ) -> Result<Vec<Rc<LayoutNode>>, LayoutError> {
        let arena = pass.arena;
        let child_ids = &arena.get(id).expect("caller resolved id").children;
        let gap = props.gap.max(0);
        let main_avail = viewport.size().main(axis);
        let cross_avail = viewport.size().cross(axis);

        let mut buf = self.flex_pool.take();
        let mut flow = self.take_flow();
        for (idx, &child_id) in child_ids.iter().enumerate() {
            let Some(child) = arena.get(child_id) else {
                continue; // surfaced during measurement
            };
            if !child.layout.display || child.layout.position == Position::Absolute {
                continue;
            }
            pass.path.push(idx);
            let natural = self.measure_node(pass, child_id, viewport.w, viewport.h, axis)?;
            pass.path.pop();
            let (basis, min, max) = flex_bounds(child, axis, natural.main(axis));
            buf.items.push(FlexItem::new(
                child.layout.grow,
                child.layout.shrink,
                basis,
                min,
                max,
            ));
            flow.push((idx, child_id));
        }

        let n = buf.items.len();
        let gaps_total = gap as i64 * n.saturating_sub(1) as i64;
        let base_total: i64 =
            buf.items.iter().map(|i| i.size as i64).sum::<i64>() + gaps_total;
        if (base_total as i32) < main_avail {
            buf.grow(main_avail - base_total as i32);
        } else if base_total > main_avail as i64 && props.overflow != Overflow::Scroll {
            // Scroll containers keep natural content size; the overflow is
            // what the scroll offset traverses.
            buf.shrink(core_geometry::clamp_cells(base_total - main_avail as i64));
        }

        let used: i64 = buf.items.iter().map(|i| i.size as i64).sum::<i64>() + gaps_total;
        let extra = (main_avail as i64 - used).max(0) as i32;
        let mut gaps = std::mem::take(&mut buf.gaps);
        let lead = justify_offsets(props.justify, extra, n, &mut gaps);

        let mut out = Vec::with_capacity(n);
        let mut main_pos = axis.main(viewport.x, viewport.y) + lead;
        for (slot, &(idx, child_id)) in flow.iter().enumerate() {
            let item = buf.items[slot];
            let child = arena.get(child_id).expect("measured above");
            let align = child.layout.align_self.unwrap_or(props.align);
            let stretch = align == Align::Stretch && cross_is_auto(child, axis);

            pass.path.push(idx);
            let (mw, mh) = axis.pack(item.size, cross_avail);
            let measured = self.measure_node(pass, child_id, mw, mh, axis)?;
            let child_cross = if stretch {
                cross_avail
            } else {
                measured.cross(axis)
            };
            let cross_offset = match align {
                Align::Start | Align::Stretch => 0,
                Align::Center => ((cross_avail - child_cross) / 2).max(0),
                Align::End => (cross_avail - child_cross).max(0),
            };
            let cross_pos = axis.cross().main(viewport.x, viewport.y) + cross_offset;
            let (cx, cy) = axis.pack(main_pos, cross_pos);
            let (fw, fh) = axis.pack(item.size, child_cross);
            let (forced_w, forced_h) = match axis {
                Axis::Horizontal => (Some(item.size), stretch.then_some(child_cross)),
                Axis::Vertical => (stretch.then_some(child_cross), Some(item.size)),
            };
            let node =
                self.layout_node(pass, child_id, cx, cy, fw, fh, forced_w, forced_h, axis)?;
            pass.path.pop();
            out.push(node);

            main_pos += item.size + gap;
            if let Some(bonus) = gaps.get(slot) {
                main_pos += bonus;
            }
        }

        buf.gaps = gaps;
        self.put_flow(flow);
        self.flex_pool.put(buf);
        Ok(out)
    }
}

fn stack_parts(props: &Props) -> (Axis, &StackProps) {
    match props {
        Props::Row(p) => (Axis::Horizontal, p),
        Props::Column(p) => (Axis::Vertical, p),
        _ => unreachable!("stack family routed a non-stack kind"),
    }
}

fn cross_is_auto(vnode: &core_node::VNode, axis: Axis) -> bool {
    let dim = match axis {
        Axis::Horizontal => &vnode.layout.height,
        Axis::Vertical => &vnode.layout.width,
    };
    matches!(dim, core_node::Dim::Auto)
}
