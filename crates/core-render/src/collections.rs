//! Collection and navigation painters: tables, trees, pickers, tabs,
//! accordions, breadcrumbs and pagination.

use core_geometry::Rect;
use core_layout::{LayoutNode, pagination_line};
use core_node::{Props, RuntimeInstance, TreeRow, VNode};
use core_text::{str_width, truncate_to_width};
use core_theme::{StyleAttrs, TextStyle, UnderlineStyle};

use crate::chrome::draw_vscrollbar;
use crate::container::push_tested_children;
use crate::walk::PaintCtx;

pub(crate) fn paint_collection<'a>(
    ctx: &mut PaintCtx<'_, 'a>,
    inst: &'a RuntimeInstance,
    layout: &'a LayoutNode,
    vnode: &VNode,
    rect: Rect,
    style: TextStyle,
    offset: (i32, i32),
) {
    match &vnode.props {
        Props::Table(p) => paint_table(ctx, p, rect, style),
        Props::Tree(p) => paint_tree_rows(ctx, &p.rows, p.selected, rect, style),
        Props::FileTreeExplorer(p) => paint_tree_rows(ctx, &p.rows, p.selected, rect, style),
        Props::VirtualList(_) => {
            // Rows are driven by the embedder; the core contributes the
            // scroll viewport and its scrollbar.
            if let Some(meta) = layout.meta
                && meta.overflows_y()
            {
                draw_vscrollbar(
                    ctx.builder,
                    rect.right() - 1,
                    rect.y,
                    rect.h,
                    meta.content_h,
                    meta.viewport_h,
                    meta.scroll_y,
                    TextStyle::fg(ctx.params.theme.colors.border).merged_over(style),
                );
            }
        }
        Props::FilePicker(p) => {
            let theme = ctx.params.theme;
            ctx.builder.draw_text(
                rect.x,
                rect.y,
                &truncate_to_width(&p.path, rect.w),
                TextStyle::fg(theme.colors.muted).merged_over(style),
            );
            for (i, entry) in p.entries.iter().enumerate() {
                let y = rect.y + 1 + i as i32;
                if y >= rect.bottom() {
                    break;
                }
                if p.selected == Some(i) {
                    ctx.builder.fill_rect(
                        Rect::new(rect.x, y, rect.w, 1),
                        TextStyle::bg(theme.colors.selection_bg),
                    );
                }
                let icon = if entry.is_dir { "▸" } else { "·" };
                ctx.builder
                    .draw_text(rect.x, y, icon, TextStyle::fg(theme.colors.secondary).merged_over(style));
                ctx.builder.draw_text(
                    rect.x + 2,
                    y,
                    &truncate_to_width(&entry.name, (rect.w - 2).max(0)),
                    style,
                );
            }
        }
        Props::Tabs(p) => {
            paint_tab_bar(ctx, p, rect, style);
            push_tested_children(ctx, inst, layout, style, offset);
        }
        Props::Accordion(p) => {
            paint_accordion_titles(ctx, p, layout, rect, style);
            push_tested_children(ctx, inst, layout, style, offset);
        }
        Props::Breadcrumb(p) => {
            let theme = ctx.params.theme;
            let mut x = rect.x;
            let last = p.segments.len().saturating_sub(1);
            for (i, segment) in p.segments.iter().enumerate() {
                let seg_style = if i == last {
                    TextStyle::fg(theme.colors.fg)
                        .with_attrs(StyleAttrs::BOLD)
                        .merged_over(style)
                } else {
                    TextStyle::fg(theme.colors.muted).merged_over(style)
                };
                ctx.builder.draw_text(x, rect.y, segment, seg_style);
                x += str_width(segment);
                if i != last {
                    ctx.builder.draw_text(
                        x,
                        rect.y,
                        " › ",
                        TextStyle::fg(theme.colors.muted).merged_over(style),
                    );
                    x += 3;
                }
            }
        }
        Props::Pagination(p) => {
            ctx.builder.draw_text(
                rect.x,
                rect.y,
                &truncate_to_width(&pagination_line(p.page, p.page_count), rect.w),
                style,
            );
        }
        _ => {}
    }
}

fn paint_table(
    ctx: &mut PaintCtx<'_, '_>,
    p: &core_node::TableProps,
    rect: Rect,
    style: TextStyle,
) {
    let theme = ctx.params.theme;
    // Column widths mirror measurement: explicit, else max of title/cells.
    let widths: Vec<i32> = p
        .columns
        .iter()
        .enumerate()
        .map(|(ci, col)| {
            col.width.unwrap_or_else(|| {
                p.rows
                    .iter()
                    .map(|r| r.get(ci).map(|c| str_width(c)).unwrap_or(0))
                    .max()
                    .unwrap_or(0)
                    .max(str_width(&col.title))
            })
        })
        .collect();

    ctx.builder.push_clip(rect);
    let header_style = TextStyle::fg(theme.colors.fg)
        .with_attrs(StyleAttrs::BOLD)
        .with_underline(UnderlineStyle::Straight, None)
        .merged_over(style);
    let mut x = rect.x;
    for (ci, col) in p.columns.iter().enumerate() {
        ctx.builder
            .draw_text(x, rect.y, &truncate_to_width(&col.title, widths[ci]), header_style);
        x += widths[ci] + 1;
    }
    for (ri, row) in p.rows.iter().enumerate() {
        let y = rect.y + 1 + ri as i32;
        if y >= rect.bottom() {
            break;
        }
        let selected = p.selected == Some(ri);
        if selected {
            ctx.builder.fill_rect(
                Rect::new(rect.x, y, rect.w, 1),
                TextStyle::bg(theme.colors.selection_bg),
            );
        }
        let mut x = rect.x;
        for (ci, cell) in row.iter().enumerate() {
            let Some(&cw) = widths.get(ci) else { break };
            let mut cell_style = style;
            if selected {
                cell_style = cell_style.with_bg(theme.colors.selection_bg);
            }
            ctx.builder
                .draw_text(x, y, &truncate_to_width(cell, cw), cell_style);
            x += cw + 1;
        }
    }
    ctx.builder.pop_clip();
}

fn paint_tree_rows(
    ctx: &mut PaintCtx<'_, '_>,
    rows: &[TreeRow],
    selected: Option<usize>,
    rect: Rect,
    style: TextStyle,
) {
    let theme = ctx.params.theme;
    ctx.builder.push_clip(rect);
    for (i, row) in rows.iter().enumerate() {
        let y = rect.y + i as i32;
        if y >= rect.bottom() {
            break;
        }
        if selected == Some(i) {
            ctx.builder.fill_rect(
                Rect::new(rect.x, y, rect.w, 1),
                TextStyle::bg(theme.colors.selection_bg),
            );
        }
        let indent = row.depth.max(0) * 2;
        let marker = match row.expanded {
            Some(true) => "▾",
            Some(false) => "▸",
            None => " ",
        };
        ctx.builder.draw_text(
            rect.x + indent,
            y,
            marker,
            TextStyle::fg(theme.colors.secondary).merged_over(style),
        );
        ctx.builder.draw_text(
            rect.x + indent + 2,
            y,
            &truncate_to_width(&row.label, (rect.w - indent - 2).max(0)),
            style,
        );
    }
    ctx.builder.pop_clip();
}

fn paint_tab_bar(
    ctx: &mut PaintCtx<'_, '_>,
    p: &core_node::TabsProps,
    rect: Rect,
    style: TextStyle,
) {
    let theme = ctx.params.theme;
    let mut x = rect.x;
    let last = p.labels.len().saturating_sub(1);
    for (i, label) in p.labels.iter().enumerate() {
        let text = format!(" {label} ");
        let tab_style = if i == p.active {
            TextStyle::fg(theme.colors.primary)
                .with_attrs(StyleAttrs::BOLD)
                .with_underline(UnderlineStyle::Straight, Some(theme.colors.primary))
                .merged_over(style)
        } else {
            TextStyle::fg(theme.colors.muted).merged_over(style)
        };
        ctx.builder.draw_text(x, rect.y, &text, tab_style);
        x += str_width(&text);
        if i != last {
            ctx.builder.draw_text(
                x,
                rect.y,
                "│",
                TextStyle::fg(theme.colors.border).merged_over(style),
            );
            x += 1;
        }
    }
}

fn paint_accordion_titles(
    ctx: &mut PaintCtx<'_, '_>,
    p: &core_node::AccordionProps,
    layout: &LayoutNode,
    rect: Rect,
    style: TextStyle,
) {
    let theme = ctx.params.theme;
    let mut y = rect.y;
    let mut expanded_children = layout.children.iter();
    for (i, title) in p.titles.iter().enumerate() {
        if y >= rect.bottom() {
            break;
        }
        let open = p.expanded.get(i).copied().unwrap_or(false);
        let marker = if open { "▾" } else { "▸" };
        ctx.builder.draw_text(
            rect.x,
            y,
            marker,
            TextStyle::fg(theme.colors.secondary).merged_over(style),
        );
        ctx.builder.draw_text(
            rect.x + 2,
            y,
            &truncate_to_width(title, (rect.w - 2).max(0)),
            TextStyle::fg(theme.colors.fg)
                .with_attrs(StyleAttrs::BOLD)
                .merged_over(style),
        );
        y += 1;
        if open && let Some(child) = expanded_children.next() {
            y += child.rect.h;
        }
    }
}
