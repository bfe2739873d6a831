//! Overlay painters: modals, dropdowns, palette, approval dialog, toasts.
//!
//! Backdrops paint the *current clip*, not the overlay rect — an `opaque`
//! backdrop fills with the theme background, `dim` lays the pattern glyph
//! in border color. The overlay surface then renders on top and children
//! are clipped to its interior.
//!
//! Dropdowns anchor against a widget id resolved through the per-frame
//! id-rect index and flip vertically/horizontally when the natural rect
//! would overflow the viewport. A missing anchor logs one dev warning per
//! `(dropdown, anchor)` pair and falls back to the laid-out position.

use core_geometry::Rect;
use core_layout::LayoutNode;
use core_node::{
    Backdrop, BorderSides, DropdownItem, DropdownPlacement, Props, RuntimeInstance, TitleAlign,
    ToastPosition, VNode,
};
use core_text::{glyph_run, str_width, truncate_to_width};
use core_theme::{BorderKind, StyleAttrs, TextStyle, Tone};
use tracing::warn;

use crate::chrome::{draw_border, draw_title};
use crate::container::push_tested_children;
use crate::walk::{PaintCtx, StackEntry};

const BACKDROP_GLYPH: char = '░';
const PALETTE_LOOKAHEAD: usize = 2;

fn paint_backdrop(ctx: &mut PaintCtx<'_, '_>, backdrop: Backdrop) {
    let clip = ctx
        .builder
        .current_clip()
        .unwrap_or(ctx.params.viewport);
    match backdrop {
        Backdrop::None => {}
        Backdrop::Opaque => {
            ctx.builder
                .fill_rect(clip, TextStyle::bg(ctx.params.theme.colors.bg));
        }
        Backdrop::Dim => {
            let dim = TextStyle::fg(ctx.params.theme.colors.border);
            let run = glyph_run(BACKDROP_GLYPH, clip.w);
            for y in clip.y..clip.bottom() {
                ctx.builder.draw_text(clip.x, y, &run, dim);
            }
        }
    }
}

pub(crate) fn paint_overlay<'a>(
    ctx: &mut PaintCtx<'_, 'a>,
    inst: &'a RuntimeInstance,
    layout: &'a LayoutNode,
    vnode: &VNode,
    rect: Rect,
    style: TextStyle,
    offset: (i32, i32),
) {
    match &vnode.props {
        Props::Modal(p) => {
            paint_backdrop(ctx, p.backdrop);
            paint_surface(ctx, rect, p.title.as_deref(), style);
            let interior = rect.inset(core_geometry::Edges::uniform(1));
            ctx.builder.push_clip(interior);
            ctx.stack.push(StackEntry::PopClip);
            push_tested_children(ctx, inst, layout, style, offset);
        }
        Props::Dropdown(p) => {
            let final_rect = dropdown_rect(ctx, vnode, p, rect);
            paint_dropdown(ctx, p, final_rect, style);
        }
        Props::CommandPalette(p) => {
            paint_palette(ctx, vnode, inst, p, rect, style);
        }
        Props::ToolApprovalDialog(p) => {
            paint_backdrop(ctx, Backdrop::Dim);
            paint_surface(ctx, rect, Some(&p.title), style);
            let theme = ctx.params.theme;
            let inner = rect.inset(core_geometry::Edges::uniform(1));
            for (row, line) in core_text::wrap(&p.body, inner.w).into_iter().enumerate() {
                let y = inner.y + row as i32;
                if y >= inner.bottom() - 1 {
                    break;
                }
                ctx.builder.draw_text(inner.x, y, &line, style);
            }
            // Action row pinned to the interior bottom.
            let mut x = inner.x;
            let y = inner.bottom() - 1;
            for (i, action) in p.actions.iter().enumerate() {
                let selected = i == p.selected;
                let mut action_style = TextStyle::fg(theme.colors.fg).merged_over(style);
                if selected {
                    action_style = action_style.with_attrs(StyleAttrs::INVERSE | StyleAttrs::BOLD);
                }
                let text = format!("[ {action} ]");
                ctx.builder.draw_text(x, y, &text, action_style);
                x += str_width(&text) + 1;
            }
        }
        Props::ToastContainer(p) => {
            paint_toasts(ctx, p, rect, style);
        }
        _ => {}
    }
}

/// Overlay surface: filled background, border, optional title.
fn paint_surface(ctx: &mut PaintCtx<'_, '_>, rect: Rect, title: Option<&str>, style: TextStyle) {
    let theme = ctx.params.theme;
    ctx.builder
        .fill_rect(rect, TextStyle::bg(theme.colors.overlay_bg));
    draw_border(
        ctx.builder,
        rect,
        BorderKind::Single,
        BorderSides::default(),
        TextStyle::fg(theme.colors.border).merged_over(style),
    );
    if let Some(title) = title {
        draw_title(
            ctx.builder,
            rect,
            title,
            TitleAlign::Left,
            TextStyle::fg(theme.colors.fg)
                .with_attrs(StyleAttrs::BOLD)
                .merged_over(style),
        );
    }
}

/// Resolve the dropdown's final rect: place against the anchor, flip when
/// the viewport would be overflowed, clamp as a last resort.
fn dropdown_rect(
    ctx: &mut PaintCtx<'_, '_>,
    vnode: &VNode,
    props: &core_node::DropdownProps,
    natural: Rect,
) -> Rect {
    let viewport = ctx.params.viewport;
    let Some(anchor) = ctx.params.id_rects.get(&props.anchor_id) else {
        let dropdown_id = vnode.id.clone().unwrap_or_default();
        let key = (dropdown_id, props.anchor_id.clone());
        if ctx.warned_anchors.insert(key) {
            warn!(
                anchor = %props.anchor_id,
                "dropdown anchor not present in id-rect index"
            );
        }
        return natural;
    };
    let (w, h) = (natural.w, natural.h);
    let (mut below, mut start) = match props.placement {
        DropdownPlacement::BelowStart => (true, true),
        DropdownPlacement::BelowEnd => (true, false),
        DropdownPlacement::AboveStart => (false, true),
        DropdownPlacement::AboveEnd => (false, false),
    };
    // Vertical flip when the preferred side overflows.
    if below && anchor.bottom() + h > viewport.bottom() {
        below = false;
    } else if !below && anchor.y - h < viewport.y {
        below = true;
    }
    // Horizontal flip between start (left-aligned) and end (right-aligned).
    if start && anchor.x + w > viewport.right() {
        start = false;
    } else if !start && anchor.right() - w < viewport.x {
        start = true;
    }
    let x = if start { anchor.x } else { anchor.right() - w };
    let y = if below { anchor.bottom() } else { anchor.y - h };
    let x = x.clamp(viewport.x, (viewport.right() - w).max(viewport.x));
    let y = y.clamp(viewport.y, (viewport.bottom() - h).max(viewport.y));
    Rect::new(x, y, w, h)
}

fn paint_dropdown(
    ctx: &mut PaintCtx<'_, '_>,
    props: &core_node::DropdownProps,
    rect: Rect,
    style: TextStyle,
) {
    paint_surface(ctx, rect, None, style);
    let inner = rect.inset(core_geometry::Edges::uniform(1));
    ctx.builder.push_clip(inner);
    for (i, item) in props.items.iter().enumerate() {
        let y = inner.y + i as i32;
        if y >= inner.bottom() {
            break;
        }
        paint_dropdown_item(ctx, item, i, props.selected, inner, y, style);
    }
    ctx.builder.pop_clip();
}

fn paint_dropdown_item(
    ctx: &mut PaintCtx<'_, '_>,
    item: &DropdownItem,
    index: usize,
    selected: Option<usize>,
    inner: Rect,
    y: i32,
    style: TextStyle,
) {
    let theme = ctx.params.theme;
    let is_selected = selected == Some(index);
    let mut item_style = TextStyle::fg(theme.colors.fg).merged_over(style);
    if item.disabled {
        item_style = TextStyle::fg(theme.colors.muted)
            .with_attrs(StyleAttrs::DIM)
            .merged_over(style);
    } else if is_selected {
        ctx.builder.fill_rect(
            Rect::new(inner.x, y, inner.w, 1),
            TextStyle::bg(theme.colors.selection_bg),
        );
        item_style = item_style.with_attrs(StyleAttrs::BOLD).with_bg(theme.colors.selection_bg);
    }
    // Shortcut is right-aligned; the label yields first when space runs out.
    let shortcut_w = item.shortcut.as_deref().map(str_width).unwrap_or(0);
    let label_budget = if shortcut_w > 0 {
        (inner.w - shortcut_w - 2).max(0)
    } else {
        inner.w
    };
    ctx.builder.draw_text(
        inner.x + 1,
        y,
        &truncate_to_width(&item.label, (label_budget - 1).max(0)),
        item_style,
    );
    if let Some(shortcut) = &item.shortcut {
        let visible = truncate_to_width(shortcut, (inner.w - 2).max(0));
        ctx.builder.draw_text(
            inner.right() - str_width(&visible),
            y,
            &visible,
            TextStyle::fg(theme.colors.muted).merged_over(item_style),
        );
    }
}

/// Window start keeping the selection visible with a small look-ahead.
pub fn palette_window(selected: usize, total: usize, visible: usize) -> usize {
    if total <= visible || visible == 0 {
        return 0;
    }
    let max_start = total - visible;
    let keep_from = (selected + PALETTE_LOOKAHEAD + 1).saturating_sub(visible);
    keep_from.min(max_start)
}

fn paint_palette(
    ctx: &mut PaintCtx<'_, '_>,
    vnode: &VNode,
    _inst: &RuntimeInstance,
    props: &core_node::CommandPaletteProps,
    rect: Rect,
    style: TextStyle,
) {
    let theme = ctx.params.theme;
    paint_surface(ctx, rect, None, style);
    let inner = rect.inset(core_geometry::Edges::uniform(1));
    if inner.h < 2 {
        return;
    }
    // Search row.
    let query_line = format!("> {}", props.query);
    ctx.builder.draw_text(
        inner.x,
        inner.y,
        &truncate_to_width(&query_line, inner.w),
        TextStyle::fg(theme.colors.fg).merged_over(style),
    );
    if ctx.params.focus.is_focused(vnode.id.as_deref()) || vnode.id.is_none() {
        ctx.claim_cursor(inner.x + str_width(&query_line).min(inner.w - 1), inner.y);
    }
    // Separator.
    ctx.builder.draw_text(
        inner.x,
        inner.y + 1,
        &glyph_run('─', inner.w),
        TextStyle::fg(theme.colors.border).merged_over(style),
    );

    let visible = (inner.h - 2).max(0) as usize;
    let start = palette_window(props.selected, props.items.len(), visible);
    for (row, item) in props.items.iter().skip(start).take(visible).enumerate() {
        let y = inner.y + 2 + row as i32;
        let index = start + row;
        let is_selected = index == props.selected;
        let mut item_style = TextStyle::fg(theme.colors.fg).merged_over(style);
        if is_selected {
            ctx.builder.fill_rect(
                Rect::new(inner.x, y, inner.w, 1),
                TextStyle::bg(theme.colors.selection_bg),
            );
            item_style = item_style
                .with_attrs(StyleAttrs::BOLD)
                .with_bg(theme.colors.selection_bg);
        }
        let shortcut_w = item.shortcut.as_deref().map(str_width).unwrap_or(0);
        let label_budget = if shortcut_w > 0 {
            (inner.w - shortcut_w - 2).max(0)
        } else {
            inner.w
        };
        ctx.builder.draw_text(
            inner.x,
            y,
            &truncate_to_width(&item.label, label_budget),
            item_style,
        );
        if let Some(shortcut) = &item.shortcut {
            ctx.builder.draw_text(
                inner.right() - shortcut_w,
                y,
                shortcut,
                TextStyle::fg(theme.colors.muted).merged_over(item_style),
            );
        }
    }
}

fn toast_icon(tone: Tone) -> &'static str {
    match tone {
        Tone::Success => "✓",
        Tone::Warning => "⚠",
        Tone::Danger => "✗",
        Tone::Info | Tone::Primary | Tone::Neutral => "ℹ",
    }
}

fn paint_toasts(
    ctx: &mut PaintCtx<'_, '_>,
    props: &core_node::ToastContainerProps,
    rect: Rect,
    style: TextStyle,
) {
    let theme = ctx.params.theme;
    let top_down = matches!(
        props.position,
        ToastPosition::TopLeft | ToastPosition::TopRight
    );
    let right = matches!(
        props.position,
        ToastPosition::TopRight | ToastPosition::BottomRight
    );
    let toast_h = 3;
    let mut y = if top_down {
        rect.y
    } else {
        rect.bottom() - toast_h
    };

    for toast in &props.toasts {
        if y < rect.y || y + toast_h > rect.bottom() {
            break;
        }
        let accent = toast.tone.color(theme);
        let action_w = toast
            .action
            .as_deref()
            .map(|a| str_width(a) + 3)
            .unwrap_or(0);
        let w = (4 + str_width(toast_icon(toast.tone)) + 1 + str_width(&toast.message) + action_w)
            .min(rect.w)
            .max(8);
        let x = if right { rect.right() - w } else { rect.x };
        let toast_rect = Rect::new(x, y, w, toast_h);
        ctx.builder
            .fill_rect(toast_rect, TextStyle::bg(theme.colors.overlay_bg));
        draw_border(
            ctx.builder,
            toast_rect,
            BorderKind::Rounded,
            BorderSides::default(),
            TextStyle::fg(accent).merged_over(style),
        );
        let content_y = y + 1;
        ctx.builder.draw_text(
            x + 2,
            content_y,
            toast_icon(toast.tone),
            TextStyle::fg(accent).merged_over(style),
        );
        let msg_budget = (w - 4 - 2 - action_w).max(0);
        ctx.builder.draw_text(
            x + 4,
            content_y,
            &truncate_to_width(&toast.message, msg_budget),
            style,
        );
        if let Some(action) = &toast.action {
            ctx.builder.draw_text(
                toast_rect.right() - str_width(action) - 2,
                content_y,
                action,
                TextStyle::fg(theme.colors.primary)
                    .with_attrs(StyleAttrs::BOLD)
                    .merged_over(style),
            );
        }
        if top_down {
            y += toast_h;
        } else {
            y -= toast_h;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_window_keeps_selection_and_lookahead() {
        // 20 items, 8 visible: early selections pin to the top.
        assert_eq!(palette_window(0, 20, 8), 0);
        assert_eq!(palette_window(4, 20, 8), 0);
        // Deeper selections scroll so two items of look-ahead stay visible.
        assert_eq!(palette_window(6, 20, 8), 1);
        assert_eq!(palette_window(10, 20, 8), 5);
        // Tail clamps to the last full window.
        assert_eq!(palette_window(19, 20, 8), 12);
    }

    #[test]
    fn palette_window_small_lists_never_scroll() {
        assert_eq!(palette_window(3, 5, 8), 0);
    }
}
