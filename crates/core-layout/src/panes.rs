//! Split panes, transparent wrappers and navigation widgets.
//!
//! Split containers divide their rect with a one-cell separator between
//! panels. Wrappers are layout-transparent: one child is identity, several
//! behave as a zero-gap column. Navigation widgets reserve their chrome
//! rows (tab bar, accordion titles) and lay out only the content that is
//! actually visible — the active tab panel, the expanded sections.

use std::rc::Rc;

use core_geometry::{Axis, Rect, Size};
use core_node::{NodeId, Props, SplitDir};
use core_text::str_width;

use crate::engine::{LayoutEngine, Pass};
use crate::error::LayoutError;
use crate::tree::{LayoutMeta, LayoutNode};

/// Rendered pagination line, shared with the painter so measurement and
/// paint agree exactly.
pub fn pagination_line(page: usize, page_count: usize) -> String {
    let count = page_count.max(1);
    let page = page.min(count.saturating_sub(1));
    let mut out = String::from("‹ ");
    if count <= 7 {
        for p in 0..count {
            push_page(&mut out, p, page);
        }
    } else {
        // First, a window around the current page, last; gaps elided.
        push_page(&mut out, 0, page);
        if page > 2 {
            out.push_str("… ");
        }
        for p in page.saturating_sub(1)..=(page + 1).min(count - 1) {
            if p == 0 || p == count - 1 {
                continue;
            }
            push_page(&mut out, p, page);
        }
        if page + 3 < count {
            out.push_str("… ");
        }
        push_page(&mut out, count - 1, page);
    }
    out.push('›');
    out
}

fn push_page(out: &mut String, p: usize, current: usize) {
    if p == current {
        out.push('[');
        out.push_str(&(p + 1).to_string());
        out.push_str("] ");
    } else {
        out.push_str(&(p + 1).to_string());
        out.push(' ');
    }
}

/// Tab bar labels joined with a single separator column; each label gets
/// one padding cell per side.
pub fn tab_bar_width(labels: &[String]) -> i32 {
    let labels_w: i32 = labels.iter().map(|l| str_width(l) + 2).sum();
    labels_w + labels.len().saturating_sub(1) as i32
}

impl LayoutEngine {
    // -- split panes -------------------------------------------------------

    pub(crate) fn measure_pane(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        avail_w: i32,
        avail_h: i32,
        axis: Axis,
    ) -> Result<Size, LayoutError> {
        let vnode = pass.arena.get(id).expect("caller resolved id");
        match &vnode.props {
            Props::SplitPane(p) => {
                if !p.ratio.is_finite() || !(0.0..=1.0).contains(&p.ratio) {
                    return Err(pass.invalid(format!("split ratio {} outside 0..=1", p.ratio)));
                }
                Ok(Size::new(avail_w, avail_h))
            }
            Props::PanelGroup(_) => Ok(Size::new(avail_w, avail_h)),
            Props::ResizablePanel(p) => {
                for (name, v) in [("size", p.size), ("min", p.min), ("max", p.max)] {
                    if let Some(v) = v
                        && v < 0
                    {
                        return Err(pass.invalid(format!("negative panel {name} {v}")));
                    }
                }
                self.measure_children_column(pass, id, avail_w, avail_h, axis)
            }
            other => Err(pass.invalid(format!(
                "kind {:?} routed to pane measurement",
                other.kind()
            ))),
        }
    }

    pub(crate) fn layout_pane(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Result<Rc<LayoutNode>, LayoutError> {
        let vnode = pass.arena.get(id).expect("caller resolved id");
        let rect = Rect::new(x, y, w, h);
        match &vnode.props {
            Props::SplitPane(p) => {
                let dir = p.dir;
                let ratio = p.ratio;
                let child_ids = vnode.children.clone();
                let main = main_extent(dir, w, h);
                let usable = (main - 1).max(0);
                let first = ((usable as f32 * ratio).floor() as i32).clamp(0, usable);
                let second = usable - first;
                let mut children = Vec::new();
                for (slot, child_id) in child_ids.into_iter().take(2).enumerate() {
                    let (cx, cy, cw, ch) = pane_rect(dir, rect, slot, first, second);
                    pass.path.push(slot);
                    let node = self.layout_node(
                        pass,
                        child_id,
                        cx,
                        cy,
                        cw,
                        ch,
                        Some(cw),
                        Some(ch),
                        Axis::Vertical,
                    )?;
                    pass.path.pop();
                    children.push(node);
                }
                Ok(LayoutNode::branch(id, rect, children))
            }
            Props::PanelGroup(p) => {
                let dir = p.dir;
                let child_ids = vnode.children.clone();
                let n = child_ids.len();
                let seps = n.saturating_sub(1) as i32;
                let mut sizes = vec![0i32; n];
                let mut flexible = Vec::new();
                let mut remaining = (main_extent(dir, w, h) - seps).max(0);
                for (i, &child_id) in child_ids.iter().enumerate() {
                    let explicit = pass.arena.get(child_id).and_then(|c| match &c.props {
                        Props::ResizablePanel(rp) => {
                            rp.size.map(|s| clamp_panel(s, rp.min, rp.max))
                        }
                        _ => None,
                    });
                    match explicit {
                        Some(s) => {
                            let s = s.min(remaining);
                            sizes[i] = s;
                            remaining -= s;
                        }
                        None => flexible.push(i),
                    }
                }
                if !flexible.is_empty() {
                    let share = remaining / flexible.len() as i32;
                    let extra = remaining % flexible.len() as i32;
                    for (rank, &i) in flexible.iter().enumerate() {
                        sizes[i] = share + ((rank as i32) < extra) as i32;
                    }
                }
                let mut children = Vec::with_capacity(n);
                let mut cursor = main_origin(dir, rect);
                for (i, child_id) in child_ids.into_iter().enumerate() {
                    let (cx, cy, cw, ch) = slot_rect(dir, rect, cursor, sizes[i]);
                    pass.path.push(i);
                    let node = self.layout_node(
                        pass,
                        child_id,
                        cx,
                        cy,
                        cw,
                        ch,
                        Some(cw),
                        Some(ch),
                        Axis::Vertical,
                    )?;
                    pass.path.pop();
                    children.push(node);
                    cursor += sizes[i] + 1;
                }
                Ok(LayoutNode::branch(id, rect, children))
            }
            Props::ResizablePanel(_) => {
                let children = self.layout_children_column(pass, id, rect)?;
                Ok(LayoutNode::branch(id, rect, children))
            }
            other => Err(pass.invalid(format!("kind {:?} routed to pane layout", other.kind()))),
        }
    }

    // -- transparent wrappers ----------------------------------------------

    pub(crate) fn measure_wrapper(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        avail_w: i32,
        avail_h: i32,
        axis: Axis,
    ) -> Result<Size, LayoutError> {
        let vnode = pass.arena.get(id).expect("caller resolved id");
        match &vnode.props {
            Props::Field(p) => {
                let label_w = str_width(&p.label);
                let note_w = p
                    .help
                    .as_deref()
                    .or(p.error.as_deref())
                    .map(str_width)
                    .unwrap_or(0);
                let note_h = (p.help.is_some() || p.error.is_some()) as i32;
                let content =
                    self.measure_children_column(pass, id, avail_w, (avail_h - 1 - note_h).max(0), axis)?;
                Ok(Size::new(
                    content.w.max(label_w).max(note_w),
                    1 + content.h + note_h,
                ))
            }
            _ => self.measure_children_column(pass, id, avail_w, avail_h, axis),
        }
    }

    pub(crate) fn layout_wrapper(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Result<Rc<LayoutNode>, LayoutError> {
        let vnode = pass.arena.get(id).expect("caller resolved id");
        let rect = Rect::new(x, y, w, h);
        match &vnode.props {
            Props::Field(p) => {
                let note_h = (p.help.is_some() || p.error.is_some()) as i32;
                let content = Rect::new(x, y + 1, w, (h - 1 - note_h).max(0));
                let children = self.layout_children_column(pass, id, content)?;
                Ok(LayoutNode::branch(id, rect, children))
            }
            _ => {
                // Identity for one child; synthetic zero-gap column otherwise.
                let children = self.layout_children_column(pass, id, rect)?;
                Ok(LayoutNode::branch(id, rect, children))
            }
        }
    }

    // -- navigation --------------------------------------------------------

    pub(crate) fn measure_nav(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        avail_w: i32,
        avail_h: i32,
        axis: Axis,
    ) -> Result<Size, LayoutError> {
        let arena = pass.arena;
        let vnode = arena.get(id).expect("caller resolved id");
        match &vnode.props {
            Props::Tabs(p) => {
                let bar_w = tab_bar_width(&p.labels);
                let active = p.active.min(p.labels.len().saturating_sub(1));
                let content = match vnode.children.get(active).copied() {
                    Some(child_id) => {
                        pass.path.push(active);
                        let s =
                            self.measure_node(pass, child_id, avail_w, (avail_h - 1).max(0), axis)?;
                        pass.path.pop();
                        s
                    }
                    None => Size::ZERO,
                };
                Ok(Size::new(bar_w.max(content.w), 1 + content.h))
            }
            Props::Accordion(p) => {
                let mut w = p
                    .titles
                    .iter()
                    .map(|t| str_width(t) + 2)
                    .max()
                    .unwrap_or(0);
                let mut h = 0i32;
                for (i, _title) in p.titles.iter().enumerate() {
                    h += 1;
                    if p.expanded.get(i).copied().unwrap_or(false)
                        && let Some(&child_id) = vnode.children.get(i)
                    {
                        pass.path.push(i);
                        let s = self.measure_node(pass, child_id, avail_w, avail_h, axis)?;
                        pass.path.pop();
                        w = w.max(s.w);
                        h += s.h;
                    }
                }
                Ok(Size::new(w, h))
            }
            Props::Breadcrumb(p) => {
                let segs: i32 = p.segments.iter().map(|s| str_width(s)).sum();
                let seps = p.segments.len().saturating_sub(1) as i32 * 3;
                Ok(Size::new(segs + seps, 1))
            }
            Props::Pagination(p) => {
                Ok(Size::new(str_width(&pagination_line(p.page, p.page_count)), 1))
            }
            other => Err(pass.invalid(format!(
                "kind {:?} routed to navigation measurement",
                other.kind()
            ))),
        }
    }

    pub(crate) fn layout_nav(
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
        let rect = Rect::new(x, y, w, h);
        match &vnode.props {
            Props::Tabs(p) => {
                let active = p.active.min(p.labels.len().saturating_sub(1));
                let mut children = Vec::new();
                if let Some(&child_id) = vnode.children.get(active) {
                    pass.path.push(active);
                    let node = self.layout_node(
                        pass,
                        child_id,
                        x,
                        y + 1,
                        w,
                        (h - 1).max(0),
                        None,
                        None,
                        Axis::Vertical,
                    )?;
                    pass.path.pop();
                    children.push(node);
                }
                let meta = LayoutMeta {
                    viewport_w: w,
                    viewport_h: h,
                    content_w: w,
                    content_h: h,
                    nav_index: Some(active),
                    ..LayoutMeta::default()
                };
                Ok(LayoutNode::with_meta(id, rect, children, meta))
            }
            Props::Accordion(p) => {
                let expanded = p.expanded.clone();
                let section_count = p.titles.len();
                let child_ids = vnode.children.clone();
                let mut children = Vec::new();
                let mut cy = y;
                for i in 0..section_count {
                    cy += 1; // title row
                    if expanded.get(i).copied().unwrap_or(false)
                        && let Some(&child_id) = child_ids.get(i)
                    {
                        pass.path.push(i);
                        let remaining = (rect.bottom() - cy).max(0);
                        let node = self.layout_node(
                            pass,
                            child_id,
                            x,
                            cy,
                            w,
                            remaining,
                            None,
                            None,
                            Axis::Vertical,
                        )?;
                        pass.path.pop();
                        cy = node.rect.bottom();
                        children.push(node);
                    }
                }
                Ok(LayoutNode::branch(id, rect, children))
            }
            Props::Breadcrumb(_) | Props::Pagination(_) => Ok(LayoutNode::leaf(id, rect)),
            other => Err(pass.invalid(format!(
                "kind {:?} routed to navigation layout",
                other.kind()
            ))),
        }
    }
}

fn main_extent(dir: SplitDir, w: i32, h: i32) -> i32 {
    match dir {
        SplitDir::Horizontal => w,
        SplitDir::Vertical => h,
    }
}

fn main_origin(dir: SplitDir, rect: Rect) -> i32 {
    match dir {
        SplitDir::Horizontal => rect.x,
        SplitDir::Vertical => rect.y,
    }
}

fn pane_rect(dir: SplitDir, rect: Rect, slot: usize, first: i32, second: i32) -> (i32, i32, i32, i32) {
    match (dir, slot) {
        (SplitDir::Horizontal, 0) => (rect.x, rect.y, first, rect.h),
        (SplitDir::Horizontal, _) => (rect.x + first + 1, rect.y, second, rect.h),
        (SplitDir::Vertical, 0) => (rect.x, rect.y, rect.w, first),
        (SplitDir::Vertical, _) => (rect.x, rect.y + first + 1, rect.w, second),
    }
}

fn slot_rect(dir: SplitDir, rect: Rect, cursor: i32, size: i32) -> (i32, i32, i32, i32) {
    match dir {
        SplitDir::Horizontal => (cursor, rect.y, size, rect.h),
        SplitDir::Vertical => (rect.x, cursor, rect.w, size),
    }
}

fn clamp_panel(size: i32, min: Option<i32>, max: Option<i32>) -> i32 {
    let mut s = size;
    if let Some(min) = min {
        s = s.max(min);
    }
    if let Some(max) = max {
        s = s.min(max);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_small_sets_render_all_pages() {
        assert_eq!(pagination_line(1, 3), "‹ 1 [2] 3 ›");
    }

    #[test]
    fn pagination_large_sets_elide() {
        let line = pagination_line(5, 20);
        assert!(line.contains("[6]"));
        assert!(line.contains('…'));
        assert!(line.ends_with("20 ›"));
    }

    #[test]
    fn tab_bar_width_includes_padding_and_separators() {
        let labels = vec!["one".to_string(), "two".to_string()];
        // (3+2) + (3+2) + 1 separator
        assert_eq!(tab_bar_width(&labels), 11);
    }
}
