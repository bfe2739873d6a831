//! Diff viewer painter: unified and side-by-side modes.
//!
//! Hunks flatten into display rows (one header per hunk, then its lines;
//! collapsed hunks contribute a single summary row). Add/delete rows get a
//! tinted line background; intra-line highlight ranges get a stronger
//! second tint on top. A focused hunk overrides its header style.

use core_geometry::Rect;
use core_layout::LayoutNode;
use core_node::{DiffHunk, DiffLine, DiffLineKind, DiffMode, Props, VNode};
use core_text::truncate_to_width;
use core_theme::{Color, StyleAttrs, TextStyle, Theme};

use crate::walk::PaintCtx;

/// Blend `c` toward `base`; `t` in 0..=1 is the share of `c`.
fn mix(base: Color, c: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let ch = |b: u8, v: u8| (b as f32 + (v as f32 - b as f32) * t).round() as u8;
    Color::rgb(ch(base.r, c.r), ch(base.g, c.g), ch(base.b, c.b))
}

fn line_bg(theme: &Theme, kind: DiffLineKind) -> Option<Color> {
    match kind {
        DiffLineKind::Context => None,
        DiffLineKind::Add => Some(mix(theme.colors.bg, theme.colors.success, 0.25)),
        DiffLineKind::Delete => Some(mix(theme.colors.bg, theme.colors.danger, 0.25)),
    }
}

fn intra_bg(theme: &Theme, kind: DiffLineKind) -> Color {
    match kind {
        DiffLineKind::Add => mix(theme.colors.bg, theme.colors.success, 0.5),
        DiffLineKind::Delete => mix(theme.colors.bg, theme.colors.danger, 0.5),
        DiffLineKind::Context => theme.colors.selection_bg,
    }
}

fn hunk_header(h: &DiffHunk) -> String {
    format!(
        "@@ -{},{} +{},{} @@ {}",
        h.old_start, h.old_count, h.new_start, h.new_count, h.header
    )
}

enum Row<'a> {
    Header { hunk_idx: usize, hunk: &'a DiffHunk },
    Line(&'a DiffLine),
    Collapsed { hunk_idx: usize, hunk: &'a DiffHunk },
}

fn flatten(hunks: &[DiffHunk]) -> Vec<Row<'_>> {
    let mut rows = Vec::new();
    for (hunk_idx, hunk) in hunks.iter().enumerate() {
        if hunk.collapsed {
            rows.push(Row::Collapsed { hunk_idx, hunk });
            continue;
        }
        rows.push(Row::Header { hunk_idx, hunk });
        rows.extend(hunk.lines.iter().map(Row::Line));
    }
    rows
}

pub(crate) fn paint_diff(
    ctx: &mut PaintCtx<'_, '_>,
    layout: &LayoutNode,
    vnode: &VNode,
    rect: Rect,
    style: TextStyle,
) {
    let Props::DiffViewer(p) = &vnode.props else {
        return;
    };
    let theme = ctx.params.theme;
    let rows = flatten(&p.hunks);
    let scroll = layout.meta.map(|m| m.scroll_y).unwrap_or(0).max(0) as usize;

    ctx.builder.push_clip(rect);
    for (screen_row, row) in rows.iter().skip(scroll).take(rect.h.max(0) as usize).enumerate() {
        let y = rect.y + screen_row as i32;
        match row {
            Row::Header { hunk_idx, hunk } | Row::Collapsed { hunk_idx, hunk } => {
                let focused = p.focused_hunk == Some(*hunk_idx);
                let mut header_style = TextStyle::fg(theme.colors.info).merged_over(style);
                if focused {
                    header_style = header_style.with_attrs(StyleAttrs::BOLD | StyleAttrs::INVERSE);
                }
                let mut text = hunk_header(hunk);
                if matches!(row, Row::Collapsed { .. }) {
                    text.push_str(&format!(" ({} lines hidden)", hunk.lines.len()));
                }
                ctx.builder
                    .draw_text(rect.x, y, &truncate_to_width(&text, rect.w), header_style);
            }
            Row::Line(line) => match p.mode {
                DiffMode::Unified => paint_unified_line(ctx, line, rect, y, style),
                DiffMode::SideBySide => paint_side_line(ctx, line, rect, y, style),
            },
        }
    }
    ctx.builder.pop_clip();
}

fn paint_unified_line(
    ctx: &mut PaintCtx<'_, '_>,
    line: &DiffLine,
    rect: Rect,
    y: i32,
    style: TextStyle,
) {
    let theme = ctx.params.theme;
    if let Some(bg) = line_bg(theme, line.kind) {
        ctx.builder
            .fill_rect(Rect::new(rect.x, y, rect.w, 1), TextStyle::bg(bg));
    }
    for &(from, to) in &line.highlights {
        let w = (to - from).max(0);
        ctx.builder.fill_rect(
            Rect::new(rect.x + 2 + from, y, w, 1),
            TextStyle::bg(intra_bg(theme, line.kind)),
        );
    }
    let (marker, fg) = match line.kind {
        DiffLineKind::Add => ("+ ", theme.colors.success),
        DiffLineKind::Delete => ("- ", theme.colors.danger),
        DiffLineKind::Context => ("  ", theme.colors.fg),
    };
    ctx.builder
        .draw_text(rect.x, y, marker, TextStyle::fg(fg).merged_over(style));
    ctx.builder.draw_text(
        rect.x + 2,
        y,
        &truncate_to_width(&line.content, (rect.w - 2).max(0)),
        TextStyle::fg(fg).merged_over(style),
    );
}

/// Side-by-side: deletes render in the left pane, adds in the right,
/// context in both; a border column splits the panes.
fn paint_side_line(
    ctx: &mut PaintCtx<'_, '_>,
    line: &DiffLine,
    rect: Rect,
    y: i32,
    style: TextStyle,
) {
    let theme = ctx.params.theme;
    let half = (rect.w - 1).max(0) / 2;
    let right_x = rect.x + half + 1;
    ctx.builder.draw_text(
        rect.x + half,
        y,
        "│",
        TextStyle::fg(theme.colors.border).merged_over(style),
    );
    let panes: &[(i32, bool)] = match line.kind {
        DiffLineKind::Delete => &[(0, true)],
        DiffLineKind::Add => &[(1, true)],
        DiffLineKind::Context => &[(0, false), (1, false)],
    };
    for &(pane, tinted) in panes {
        let x = if pane == 0 { rect.x } else { right_x };
        if tinted && let Some(bg) = line_bg(theme, line.kind) {
            ctx.builder
                .fill_rect(Rect::new(x, y, half, 1), TextStyle::bg(bg));
        }
        let fg = match line.kind {
            DiffLineKind::Add => theme.colors.success,
            DiffLineKind::Delete => theme.colors.danger,
            DiffLineKind::Context => theme.colors.fg,
        };
        ctx.builder.draw_text(
            x,
            y,
            &truncate_to_width(&line.content, half),
            TextStyle::fg(fg).merged_over(style),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_format_matches_unified_convention() {
        let h = DiffHunk {
            old_start: 3,
            old_count: 5,
            new_start: 3,
            new_count: 7,
            header: "fn main".into(),
            ..DiffHunk::default()
        };
        assert_eq!(hunk_header(&h), "@@ -3,5 +3,7 @@ fn main");
    }

    #[test]
    fn mix_is_bounded() {
        let bg = Color::rgb(0, 0, 0);
        let c = Color::rgb(200, 100, 40);
        assert_eq!(mix(bg, c, 0.0), bg);
        assert_eq!(mix(bg, c, 1.0), c);
        let half = mix(bg, c, 0.5);
        assert_eq!(half, Color::rgb(100, 50, 20));
    }

    #[test]
    fn flatten_counts_collapsed_as_one_row() {
        let hunks = vec![
            DiffHunk {
                lines: vec![DiffLine::default(); 3],
                ..DiffHunk::default()
            },
            DiffHunk {
                lines: vec![DiffLine::default(); 10],
                collapsed: true,
                ..DiffHunk::default()
            },
        ];
        assert_eq!(flatten(&hunks).len(), 1 + 3 + 1);
    }
}
