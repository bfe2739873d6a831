//! Box containers: bordered/padded single-axis column of children.
//!
//! A box's chrome is its border (one cell per enabled side when the border
//! kind draws) plus uniform padding inside the border. Content flows as a
//! zero-justify column through the shared stack flow, so overflow/scroll
//! discipline matches row/column exactly — the scrollbar tracks are
//! reserved inside the content rect.

use std::rc::Rc;

use core_geometry::{Axis, Edges, Rect, Size, add_cells};
use core_node::{BoxProps, NodeId, Overflow, Props, StackProps};
use core_text::str_width;
use core_theme::BorderKind;

use crate::engine::{LayoutEngine, Pass};
use crate::error::LayoutError;
use crate::tree::{LayoutMeta, LayoutNode};

/// Chrome insets contributed by border and padding. Shared with the
/// renderer so paint and layout agree on the content rect.
pub fn box_chrome(props: &BoxProps) -> Edges {
    let pad = props.padding.max(0);
    let b = |on: bool| (props.border != BorderKind::None && on) as i32;
    Edges {
        top: b(props.sides.top) + pad,
        right: b(props.sides.right) + pad,
        bottom: b(props.sides.bottom) + pad,
        left: b(props.sides.left) + pad,
    }
}

fn column_props(props: &BoxProps) -> StackProps {
    StackProps {
        gap: props.gap,
        overflow: props.overflow,
        scroll_x: props.scroll_x,
        scroll_y: props.scroll_y,
        ..StackProps::default()
    }
}

impl LayoutEngine {
    pub(crate) fn measure_box(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        avail_w: i32,
        avail_h: i32,
    ) -> Result<Size, LayoutError> {
        let vnode = pass.arena.get(id).expect("caller resolved id");
        let Props::Box(props) = &vnode.props else {
            unreachable!("box family routed a non-box kind");
        };
        if props.padding < 0 {
            return Err(pass.invalid(format!("negative padding {}", props.padding)));
        }
        let chrome = box_chrome(props);
        let title_w = props
            .title
            .as_deref()
            .map(|t| str_width(t) + 4)
            .unwrap_or(0);

        let inner_w = (avail_w - chrome.horizontal()).max(0);
        let inner_h = (avail_h - chrome.vertical()).max(0);
        let content = self.measure_column_content(pass, id, inner_w, inner_h)?;
        Ok(Size::new(
            add_cells(content.w, chrome.horizontal()).max(title_w),
            add_cells(content.h, chrome.vertical()),
        ))
    }

    fn measure_column_content(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        avail_w: i32,
        avail_h: i32,
    ) -> Result<Size, LayoutError> {
        let arena = pass.arena;
        let vnode = arena.get(id).expect("caller resolved id");
        let gap = match &vnode.props {
            Props::Box(p) => p.gap.max(0),
            _ => 0,
        };
        let mut h = 0i64;
        let mut w = 0i32;
        let mut flowing = 0usize;
        for (idx, &child_id) in vnode.children.iter().enumerate() {
            let Some(child) = arena.get(child_id) else {
                pass.path.push(idx);
                return Err(pass.invalid("dangling child id"));
            };
            if !child.layout.display
                || child.layout.position == core_node::Position::Absolute
            {
                continue;
            }
            pass.path.push(idx);
            let size = self.measure_node(pass, child_id, avail_w, avail_h, Axis::Vertical)?;
            pass.path.pop();
            h += size.h as i64;
            w = w.max(size.w);
            flowing += 1;
        }
        h += gap as i64 * flowing.saturating_sub(1) as i64;
        Ok(Size::new(w, core_geometry::clamp_cells(h)))
    }

    pub(crate) fn layout_box(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Result<Rc<LayoutNode>, LayoutError> {
        let vnode = pass.arena.get(id).expect("caller resolved id");
        let Props::Box(props) = &vnode.props else {
            unreachable!("box family routed a non-box kind");
        };
        let props = props.clone();
        let rect = Rect::new(x, y, w, h);
        let content_rect = rect.inset(box_chrome(&props));
        let flow_props = column_props(&props);

        let (mut children, viewport, content_w, content_h) =
            self.flow_with_reservation(pass, id, &flow_props, Axis::Vertical, content_rect)?;
        self.layout_absolute_children(pass, id, content_rect, &mut children)?;

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
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_node::BorderSides;

    #[test]
    fn chrome_counts_enabled_sides_and_padding() {
        let props = BoxProps {
            border: BorderKind::Single,
            padding: 1,
            ..BoxProps::default()
        };
        let e = box_chrome(&props);
        assert_eq!(e, Edges::uniform(2));
    }

    #[test]
    fn chrome_skips_disabled_sides() {
        let props = BoxProps {
            border: BorderKind::Double,
            sides: BorderSides {
                left: false,
                ..BorderSides::default()
            },
            ..BoxProps::default()
        };
        let e = box_chrome(&props);
        assert_eq!(e.left, 0);
        assert_eq!(e.right, 1);
    }

    #[test]
    fn borderless_box_has_padding_only() {
        let props = BoxProps {
            border: BorderKind::None,
            padding: 2,
            ..BoxProps::default()
        };
        assert_eq!(box_chrome(&props), Edges::uniform(2));
    }
}
