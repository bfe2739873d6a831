//! Overlay family: layers, modals, dropdowns, palettes, dialogs, toasts.
//!
//! Overlay nodes size to their surface, not to the viewport they composite
//! over: a modal's rect *is* its surface rect, centered inside the
//! constraint box it was laid into. Backdrops are a paint concern (they
//! fill the current clip, not the node rect). Dropdown anchor resolution
//! and viewport flipping happen at paint time against the id-rect index;
//! layout only fixes the natural surface size.

use std::rc::Rc;

use core_geometry::{Axis, Edges, Rect, Size};
use core_node::{NodeId, Props};
use core_text::{max_content_width, str_width, wrapped_height};

use crate::engine::{LayoutEngine, Pass};
use crate::error::LayoutError;
use crate::tree::LayoutNode;

pub(crate) const PALETTE_DEFAULT_VISIBLE: usize = 8;
const PALETTE_MIN_WIDTH: i32 = 40;

/// Inner width of a dropdown item column: label plus right-aligned
/// shortcut (two-cell gutter when present).
pub fn dropdown_item_width(item: &core_node::DropdownItem) -> i32 {
    let shortcut = item
        .shortcut
        .as_deref()
        .map(|s| 2 + str_width(s))
        .unwrap_or(0);
    str_width(&item.label) + shortcut
}

impl LayoutEngine {
    pub(crate) fn measure_overlay(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        avail_w: i32,
        avail_h: i32,
        axis: Axis,
    ) -> Result<Size, LayoutError> {
        let arena = pass.arena;
        let vnode = arena.get(id).expect("caller resolved id");
        let size = match &vnode.props {
            Props::Layers | Props::Layer => Size::new(avail_w, avail_h),
            Props::Modal(p) => {
                let chrome = Edges::uniform(1);
                let inner_w = p
                    .width
                    .map(|w| (w - chrome.horizontal()).max(0))
                    .unwrap_or((avail_w - chrome.horizontal()).max(0));
                let inner_h = (avail_h - chrome.vertical()).max(0);
                let content = self.measure_children_column(pass, id, inner_w, inner_h, axis)?;
                let title_w = p.title.as_deref().map(|t| str_width(t) + 4).unwrap_or(0);
                let w = p
                    .width
                    .unwrap_or((content.w + chrome.horizontal()).max(title_w));
                let h = p.height.unwrap_or(content.h + chrome.vertical());
                Size::new(w, h)
            }
            Props::Dropdown(p) => {
                let inner = p.items.iter().map(dropdown_item_width).max().unwrap_or(0);
                Size::new(inner + 4, p.items.len() as i32 + 2)
            }
            Props::CommandPalette(p) => {
                let visible = p
                    .items
                    .len()
                    .min(p.max_visible.unwrap_or(PALETTE_DEFAULT_VISIBLE));
                let widest = p
                    .items
                    .iter()
                    .map(|i| {
                        str_width(&i.label)
                            + i.shortcut.as_deref().map(|s| 2 + str_width(s)).unwrap_or(0)
                    })
                    .max()
                    .unwrap_or(0)
                    .max(str_width(&p.query) + 2);
                Size::new(
                    (widest + 4).max(PALETTE_MIN_WIDTH).min(avail_w),
                    visible as i32 + 4,
                )
            }
            Props::ToolApprovalDialog(p) => {
                let actions: i32 = p
                    .actions
                    .iter()
                    .map(|a| str_width(a) + 4)
                    .sum::<i32>()
                    + p.actions.len().saturating_sub(1) as i32;
                let inner_w = str_width(&p.title)
                    .max(max_content_width(&p.body))
                    .max(actions)
                    .min((avail_w - 4).max(0));
                let body_h = wrapped_height(&p.body, inner_w);
                Size::new(inner_w + 4, body_h + 4)
            }
            Props::ToastContainer(_) => Size::new(avail_w, avail_h),
            other => {
                return Err(pass.invalid(format!(
                    "kind {:?} routed to overlay measurement",
                    other.kind()
                )));
            }
        };
        Ok(size.min_with(avail_w, avail_h))
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn layout_overlay(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        max_w: i32,
        max_h: i32,
    ) -> Result<Rc<LayoutNode>, LayoutError> {
        let arena = pass.arena;
        let vnode = arena.get(id).expect("caller resolved id");
        match &vnode.props {
            Props::Layers | Props::Layer => {
                let rect = Rect::new(x, y, w, h);
                let child_ids = vnode.children.clone();
                let mut children = Vec::with_capacity(child_ids.len());
                for (idx, child_id) in child_ids.into_iter().enumerate() {
                    pass.path.push(idx);
                    let node = self.layout_node(
                        pass,
                        child_id,
                        x,
                        y,
                        w,
                        h,
                        None,
                        None,
                        Axis::Vertical,
                    )?;
                    pass.path.pop();
                    children.push(node);
                }
                Ok(LayoutNode::branch(id, rect, children))
            }
            Props::Modal(_) | Props::ToolApprovalDialog(_) => {
                // Center the surface inside the constraint box.
                let sx = x + ((max_w - w) / 2).max(0);
                let sy = y + ((max_h - h) / 2).max(0);
                let rect = Rect::new(sx, sy, w, h);
                let content = rect.inset(Edges::uniform(1));
                let children = self.layout_children_column(pass, id, content)?;
                Ok(LayoutNode::branch(id, rect, children))
            }
            Props::CommandPalette(_) => {
                // Horizontally centered, pinned near the top of the box.
                let sx = x + ((max_w - w) / 2).max(0);
                let sy = y + (max_h / 6).min((max_h - h).max(0));
                Ok(LayoutNode::leaf(id, Rect::new(sx, sy, w, h)))
            }
            Props::Dropdown(_) | Props::ToastContainer(_) => {
                Ok(LayoutNode::leaf(id, Rect::new(x, y, w, h)))
            }
            other => Err(pass.invalid(format!(
                "kind {:?} routed to overlay layout",
                other.kind()
            ))),
        }
    }

    /// Natural size of children stacked vertically with no gap.
    pub(crate) fn measure_children_column(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        avail_w: i32,
        avail_h: i32,
        axis: Axis,
    ) -> Result<Size, LayoutError> {
        let arena = pass.arena;
        let child_ids = arena.get(id).expect("caller resolved id").children.clone();
        let mut w = 0i32;
        let mut h = 0i64;
        for (idx, child_id) in child_ids.into_iter().enumerate() {
            let Some(child) = arena.get(child_id) else {
                pass.path.push(idx);
                return Err(pass.invalid("dangling child id"));
            };
            if !child.layout.display {
                continue;
            }
            pass.path.push(idx);
            let size = self.measure_node(pass, child_id, avail_w, avail_h, axis)?;
            pass.path.pop();
            w = w.max(size.w);
            h += size.h as i64;
        }
        Ok(Size::new(w, core_geometry::clamp_cells(h)))
    }

    /// Stack children vertically inside `content`, no gap, natural heights.
    pub(crate) fn layout_children_column(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        content: Rect,
    ) -> Result<Vec<Rc<LayoutNode>>, LayoutError> {
        let arena = pass.arena;
        let child_ids = arena.get(id).expect("caller resolved id").children.clone();
        let mut out = Vec::with_capacity(child_ids.len());
        let mut cy = content.y;
        for (idx, child_id) in child_ids.into_iter().enumerate() {
            let Some(child) = arena.get(child_id) else {
                continue;
            };
            if !child.layout.display {
                continue;
            }
            pass.path.push(idx);
            let remaining = (content.bottom() - cy).max(0);
            let node = self.layout_node(
                pass,
                child_id,
                content.x,
                cy,
                content.w,
                remaining,
                None,
                None,
                Axis::Vertical,
            )?;
            pass.path.pop();
            cy = node.rect.bottom();
            out.push(node);
        }
        Ok(out)
    }
}
