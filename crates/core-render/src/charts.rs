//! Cell-resolution chart painters.
//!
//! All charts degrade gracefully on empty data (nothing drawn) and scale
//! values into their rect. Vertical resolution uses eighth-block glyphs
//! where a single row must carry magnitude (sparklines, mini charts).

use core_geometry::Rect;
use core_node::{Props, VNode};
use core_text::{glyph_run, str_width, truncate_to_width};
use core_theme::{StyleAttrs, TextStyle};

use crate::walk::PaintCtx;

const EIGHTHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

fn level(value: f64, min: f64, max: f64, steps: usize) -> usize {
    if !value.is_finite() || max <= min {
        return 0;
    }
    let t = ((value - min) / (max - min)).clamp(0.0, 1.0);
    ((t * (steps - 1) as f64).round()) as usize
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    (min <= max).then_some((min, max))
}

pub(crate) fn paint_chart(ctx: &mut PaintCtx<'_, '_>, vnode: &VNode, rect: Rect, style: TextStyle) {
    let theme = ctx.params.theme;
    let accent = TextStyle::fg(theme.colors.primary).merged_over(style);
    let track = TextStyle::fg(theme.colors.border).merged_over(style);
    match &vnode.props {
        Props::Sparkline(p) => {
            let Some((min, max)) = bounds(p.values.iter().copied()) else {
                return;
            };
            let mut line = String::new();
            for &v in p.values.iter().take(rect.w.max(0) as usize) {
                line.push(EIGHTHS[level(v, min, max, 8)]);
            }
            ctx.builder.draw_text(rect.x, rect.y, &line, accent);
        }
        Props::BarChart(p) => {
            let scale_max = p
                .max
                .filter(|m| m.is_finite() && *m > 0.0)
                .or_else(|| bounds(p.values.iter().copied()).map(|(_, max)| max))
                .unwrap_or(1.0);
            let label_w = p.labels.iter().map(|l| str_width(l)).max().unwrap_or(0);
            let bar_budget = (rect.w - label_w - 1).max(1);
            for (row, &v) in p.values.iter().enumerate() {
                let y = rect.y + row as i32;
                if y >= rect.bottom() {
                    break;
                }
                if let Some(label) = p.labels.get(row) {
                    ctx.builder.draw_text(
                        rect.x + (label_w - str_width(label)).max(0),
                        y,
                        label,
                        TextStyle::fg(theme.colors.muted).merged_over(style),
                    );
                }
                let filled = if scale_max > 0.0 && v.is_finite() {
                    ((v / scale_max).clamp(0.0, 1.0) * bar_budget as f64).round() as i32
                } else {
                    0
                };
                ctx.builder
                    .draw_text(rect.x + label_w + 1, y, &glyph_run('█', filled), accent);
            }
        }
        Props::MiniChart(p) => {
            let Some((min, max)) = bounds(p.values.iter().copied()) else {
                return;
            };
            // Two rows of eighth blocks: top row carries the upper half.
            for (col, &v) in p.values.iter().take(rect.w.max(0) as usize).enumerate() {
                let lv = level(v, min, max, 16);
                let x = rect.x + col as i32;
                if lv >= 8 {
                    ctx.builder
                        .draw_text(x, rect.y, &EIGHTHS[lv - 8].to_string(), accent);
                    ctx.builder
                        .draw_text(x, rect.y + 1, &EIGHTHS[7].to_string(), accent);
                } else {
                    ctx.builder
                        .draw_text(x, rect.y + 1, &EIGHTHS[lv].to_string(), accent);
                }
            }
        }
        Props::LineChart(p) => {
            let Some((min, max)) = bounds(p.series.iter().flatten().copied()) else {
                return;
            };
            for (si, series) in p.series.iter().enumerate() {
                let color = if si == 0 {
                    theme.colors.primary
                } else {
                    theme.colors.secondary
                };
                let series_style = TextStyle::fg(color).merged_over(style);
                for (col, &v) in series.iter().take(rect.w.max(0) as usize).enumerate() {
                    let lv = level(v, min, max, rect.h.max(1) as usize);
                    let y = rect.bottom() - 1 - lv as i32;
                    ctx.builder
                        .draw_text(rect.x + col as i32, y, "•", series_style);
                }
            }
        }
        Props::Scatter(p) => {
            let Some((min_x, max_x)) = bounds(p.points.iter().map(|(x, _)| *x)) else {
                return;
            };
            let Some((min_y, max_y)) = bounds(p.points.iter().map(|(_, y)| *y)) else {
                return;
            };
            for &(px, py) in &p.points {
                let col = level(px, min_x, max_x, rect.w.max(1) as usize) as i32;
                let row = level(py, min_y, max_y, rect.h.max(1) as usize) as i32;
                ctx.builder
                    .draw_text(rect.x + col, rect.bottom() - 1 - row, "∙", accent);
            }
        }
        Props::Heatmap(p) => {
            let Some((min, max)) = bounds(p.rows.iter().flatten().copied()) else {
                return;
            };
            for (row, values) in p.rows.iter().enumerate() {
                let y = rect.y + row as i32;
                if y >= rect.bottom() {
                    break;
                }
                let mut line = String::new();
                for &v in values.iter().take(rect.w.max(0) as usize) {
                    line.push(SHADES[level(v, min, max, SHADES.len())]);
                }
                ctx.builder.draw_text(rect.x, y, &line, accent);
            }
        }
        Props::Progress(p) => {
            let suffix_w = if p.show_percent { 5 } else { 0 };
            let track_w = (rect.w - suffix_w).max(0);
            let ratio = (p.value / p.max).clamp(0.0, 1.0);
            let filled = (ratio * track_w as f64).round() as i32;
            ctx.builder
                .draw_text(rect.x, rect.y, &glyph_run('█', filled), accent);
            ctx.builder.draw_text(
                rect.x + filled,
                rect.y,
                &glyph_run('─', track_w - filled),
                track,
            );
            if p.show_percent {
                let label = format!("{:>4}%", (ratio * 100.0).round() as i32);
                ctx.builder.draw_text(
                    rect.x + track_w,
                    rect.y,
                    &label,
                    TextStyle::fg(theme.colors.muted).merged_over(style),
                );
            }
        }
        Props::Gauge(p) => {
            let mut x = rect.x;
            if let Some(label) = &p.label {
                let label = truncate_to_width(label, (rect.w - 3).max(0));
                ctx.builder.draw_text(
                    x,
                    rect.y,
                    &label,
                    TextStyle::fg(theme.colors.muted)
                        .with_attrs(StyleAttrs::DIM)
                        .merged_over(style),
                );
                x += str_width(&label) + 1;
            }
            let track_w = (rect.right() - x - 2).max(0);
            let ratio = (p.value / p.max).clamp(0.0, 1.0);
            let filled = (ratio * track_w as f64).round() as i32;
            ctx.builder.draw_text(x, rect.y, "[", track);
            ctx.builder
                .draw_text(x + 1, rect.y, &glyph_run('█', filled), accent);
            ctx.builder.draw_text(
                x + 1 + filled,
                rect.y,
                &glyph_run('─', track_w - filled),
                track,
            );
            ctx.builder.draw_text(x + 1 + track_w, rect.y, "]", track);
        }
        _ => {}
    }
}
