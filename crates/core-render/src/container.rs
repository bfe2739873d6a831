//! Container painters: stacks, boxes, grids and split panes.
//!
//! Containers own the clip discipline for their subtree: `hidden` clips at
//! the content box, `scroll` clips at the interior viewport (minus reserved
//! scrollbar tracks) and applies the scroll offset to every enqueued child.
//! Stack children are sorted along the stack axis, so damage pruning binary-
//! walks to the first intersecting child and stops past the damage end;
//! grid/box children are tested individually.

use core_geometry::{Axis, Rect};
use core_layout::{LayoutMeta, LayoutNode, box_chrome};
use core_node::{NodeKind, Overflow, Props, RuntimeInstance, VNode};
use core_text::glyph_run;
use core_theme::TextStyle;

use crate::chrome::{
    draw_border, draw_hscrollbar, draw_scroll_corner, draw_shadow, draw_title, draw_vscrollbar,
};
use crate::walk::{PaintCtx, StackEntry, runtime_child};

pub(crate) fn paint_container<'a>(
    ctx: &mut PaintCtx<'_, 'a>,
    inst: &'a RuntimeInstance,
    layout: &'a LayoutNode,
    vnode: &VNode,
    rect: Rect,
    style: TextStyle,
    offset: (i32, i32),
) {
    let theme = ctx.params.theme;
    let kind = vnode.props.kind();

    let (bg, overflow) = match &vnode.props {
        Props::Row(p) | Props::Column(p) => (p.bg, p.overflow),
        Props::Box(p) => (p.bg, p.overflow),
        Props::Grid(_) => (None, Overflow::Visible),
        _ => (None, Overflow::Visible),
    };

    // Own background only when the style overrides the inherited one.
    if let Some(bg) = bg
        && bg.bg.is_some()
    {
        ctx.builder.fill_rect(rect, bg.merged_over(style));
    }

    let content = if kind == NodeKind::Box {
        let Props::Box(p) = &vnode.props else {
            unreachable!()
        };
        if let Some(shadow) = p.shadow {
            draw_shadow(
                ctx.builder,
                rect,
                shadow,
                TextStyle::fg(theme.colors.muted),
            );
        }
        let border_style = TextStyle::fg(theme.colors.border).merged_over(style);
        draw_border(ctx.builder, rect, p.border, p.sides, border_style);
        if let Some(title) = &p.title {
            draw_title(
                ctx.builder,
                rect,
                title,
                p.title_align,
                TextStyle::fg(theme.colors.fg).merged_over(style),
            );
        }
        rect.inset(box_chrome(p))
    } else {
        rect
    };

    let child_style = bg.map(|b| b.merged_over(style)).unwrap_or(style);
    let mut child_offset = offset;
    let mut child_clip = None;
    match overflow {
        Overflow::Visible => {}
        Overflow::Hidden => child_clip = Some(content),
        Overflow::Scroll => {
            let meta = layout.meta.unwrap_or(LayoutMeta {
                viewport_w: content.w,
                viewport_h: content.h,
                content_w: content.w,
                content_h: content.h,
                ..LayoutMeta::default()
            });
            let viewport = Rect::new(content.x, content.y, meta.viewport_w, meta.viewport_h);
            let track_style = TextStyle::fg(theme.colors.border).merged_over(style);
            if meta.overflows_y() {
                draw_vscrollbar(
                    ctx.builder,
                    viewport.right(),
                    viewport.y,
                    viewport.h,
                    meta.content_h,
                    meta.viewport_h,
                    meta.scroll_y,
                    track_style,
                );
            }
            if meta.overflows_x() {
                draw_hscrollbar(
                    ctx.builder,
                    viewport.x,
                    viewport.bottom(),
                    viewport.w,
                    meta.content_w,
                    meta.viewport_w,
                    meta.scroll_x,
                    track_style,
                );
            }
            if meta.overflows_x() && meta.overflows_y() {
                draw_scroll_corner(ctx.builder, viewport.right(), viewport.bottom(), track_style);
            }
            child_offset = (offset.0 - meta.scroll_x, offset.1 - meta.scroll_y);
            child_clip = Some(viewport);
        }
    }

    if let Some(clip) = child_clip {
        ctx.builder.push_clip(clip);
        ctx.stack.push(StackEntry::PopClip);
    }

    match kind {
        NodeKind::Row => push_stack_children(
            ctx,
            inst,
            layout,
            Axis::Horizontal,
            child_style,
            child_offset,
        ),
        NodeKind::Column => push_stack_children(
            ctx,
            inst,
            layout,
            Axis::Vertical,
            child_style,
            child_offset,
        ),
        _ => push_tested_children(ctx, inst, layout, child_style, child_offset),
    }
}

/// Stack children are monotonic along the stack axis: binary-walk to the
/// first child intersecting damage and stop at the first one past its end.
fn push_stack_children<'a>(
    ctx: &mut PaintCtx<'_, 'a>,
    inst: &'a RuntimeInstance,
    layout: &'a LayoutNode,
    axis: Axis,
    style: TextStyle,
    offset: (i32, i32),
) {
    let children = &layout.children;
    let (start, end) = match ctx.params.damage {
        None => (0, children.len()),
        Some(damage) => {
            // Translate damage into the children's (unscrolled) space.
            let local = damage.translate(-offset.0, -offset.1);
            let (dmg_start, dmg_end) = match axis {
                Axis::Horizontal => (local.x, local.right()),
                Axis::Vertical => (local.y, local.bottom()),
            };
            let main_end = |r: Rect| match axis {
                Axis::Horizontal => r.right(),
                Axis::Vertical => r.bottom(),
            };
            let main_start = |r: Rect| match axis {
                Axis::Horizontal => r.x,
                Axis::Vertical => r.y,
            };
            let first = children.partition_point(|c| main_end(c.rect) <= dmg_start);
            let mut last = first;
            while last < children.len() && main_start(children[last].rect) < dmg_end {
                last += 1;
            }
            (first, last)
        }
    };
    for (i, child) in children[start..end].iter().enumerate().rev() {
        if let Some(damage) = ctx.params.damage
            && !child.rect.translate(offset.0, offset.1).intersects(damage)
        {
            continue; // cross-axis miss
        }
        let Some(child_inst) = runtime_child(inst, child.node, Some(start + i)) else {
            continue;
        };
        ctx.stack.push(StackEntry::Node {
            inst: child_inst,
            layout: child,
            style,
            offset,
        });
    }
}

/// Non-monotonic containers: every child rect is tested against damage.
pub(crate) fn push_tested_children<'a>(
    ctx: &mut PaintCtx<'_, 'a>,
    inst: &'a RuntimeInstance,
    layout: &'a LayoutNode,
    style: TextStyle,
    offset: (i32, i32),
) {
    for (i, child) in layout.children.iter().enumerate().rev() {
        if let Some(damage) = ctx.params.damage
            && !child.rect.translate(offset.0, offset.1).intersects(damage)
        {
            continue;
        }
        let Some(child_inst) = runtime_child(inst, child.node, Some(i)) else {
            continue;
        };
        ctx.stack.push(StackEntry::Node {
            inst: child_inst,
            layout: child,
            style,
            offset,
        });
    }
}

pub(crate) fn paint_split<'a>(
    ctx: &mut PaintCtx<'_, 'a>,
    inst: &'a RuntimeInstance,
    layout: &'a LayoutNode,
    vnode: &VNode,
    rect: Rect,
    style: TextStyle,
    offset: (i32, i32),
) {
    let sep_style = TextStyle::fg(ctx.params.theme.colors.border).merged_over(style);
    match &vnode.props {
        Props::SplitPane(p) => {
            if let Some(first) = layout.children.first() {
                draw_separator_after(ctx, first.rect.translate(offset.0, offset.1), rect, p.dir, sep_style);
            }
        }
        Props::PanelGroup(p) => {
            for child in layout.children.iter().take(layout.children.len().saturating_sub(1)) {
                draw_separator_after(ctx, child.rect.translate(offset.0, offset.1), rect, p.dir, sep_style);
            }
        }
        _ => {}
    }
    push_tested_children(ctx, inst, layout, style, offset);
}

fn draw_separator_after(
    ctx: &mut PaintCtx<'_, '_>,
    pane: Rect,
    container: Rect,
    dir: core_node::SplitDir,
    style: TextStyle,
) {
    match dir {
        core_node::SplitDir::Horizontal => {
            let x = pane.right();
            for y in container.y..container.bottom() {
                ctx.builder.draw_text(x, y, "│", style);
            }
        }
        core_node::SplitDir::Vertical => {
            let y = pane.bottom();
            ctx.builder
                .draw_text(container.x, y, &glyph_run('─', container.w), style);
        }
    }
}
