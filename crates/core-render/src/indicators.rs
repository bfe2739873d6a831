//! Static leaf painters: text, status chrome, icons and cell art.

use core_geometry::Rect;
use core_node::{Props, RuntimeInstance, SpinnerStyle, VNode};
use core_text::{glyph_run, icon_glyph_or_fallback, str_width, truncate_to_width, wrap};
use core_theme::{StyleAttrs, TextStyle, Tone, UnderlineStyle};

use crate::walk::PaintCtx;

const BRAILLE_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const LINE_FRAMES: &[&str] = &["-", "\\", "|", "/"];
const DOT_FRAMES: &[&str] = &["∙∙∙", "●∙∙", "∙●∙", "∙∙●"];

fn tone_color(ctx: &PaintCtx<'_, '_>, tone: Tone) -> core_theme::Color {
    tone.color(ctx.params.theme)
}

pub(crate) fn paint_indicator(
    ctx: &mut PaintCtx<'_, '_>,
    _inst: &RuntimeInstance,
    vnode: &VNode,
    rect: Rect,
    style: TextStyle,
) {
    let theme = ctx.params.theme;
    match &vnode.props {
        Props::Text(p) => {
            let merged = p.style.merged_over(style);
            if p.wrap {
                for (row, line) in wrap(&p.content, rect.w).into_iter().enumerate() {
                    if row as i32 >= rect.h {
                        break;
                    }
                    ctx.builder
                        .draw_text(rect.x, rect.y + row as i32, &line, merged);
                }
            } else {
                for (row, line) in p.content.lines().enumerate() {
                    if row as i32 >= rect.h {
                        break;
                    }
                    ctx.builder
                        .draw_text(rect.x, rect.y + row as i32, line, merged);
                }
            }
        }
        Props::RichText(p) => {
            let mut x = rect.x;
            for (span, span_style) in &p.spans {
                ctx.builder
                    .draw_text(x, rect.y, span, span_style.merged_over(style));
                x += str_width(span);
                if x >= rect.right() {
                    break;
                }
            }
        }
        Props::Divider(p) => {
            let divider_style = TextStyle::fg(theme.colors.border).merged_over(style);
            if p.vertical {
                for y in rect.y..rect.bottom() {
                    ctx.builder
                        .draw_text(rect.x, y, &p.glyph.to_string(), divider_style);
                }
            } else {
                ctx.builder
                    .draw_text(rect.x, rect.y, &glyph_run(p.glyph, rect.w), divider_style);
            }
        }
        Props::Icon(p) => {
            ctx.builder
                .draw_text(rect.x, rect.y, icon_glyph_or_fallback(&p.name), style);
        }
        Props::Spinner(p) => {
            let frames = match p.style {
                SpinnerStyle::Braille => BRAILLE_FRAMES,
                SpinnerStyle::Line => LINE_FRAMES,
                SpinnerStyle::Dots => DOT_FRAMES,
            };
            let frame = frames[p.frame % frames.len()];
            let spinner_style = TextStyle::fg(theme.colors.primary).merged_over(style);
            ctx.builder.draw_text(rect.x, rect.y, frame, spinner_style);
            if let Some(label) = &p.label {
                ctx.builder.draw_text(
                    rect.x + str_width(frame) + 1,
                    rect.y,
                    label,
                    TextStyle::fg(theme.colors.muted).merged_over(style),
                );
            }
        }
        Props::Skeleton(_) => {
            let shimmer = TextStyle::fg(theme.colors.muted)
                .with_attrs(StyleAttrs::DIM)
                .merged_over(style);
            for y in rect.y..rect.bottom() {
                ctx.builder
                    .draw_text(rect.x, y, &glyph_run('▒', rect.w), shimmer);
            }
        }
        Props::Badge(p) => {
            let accent = tone_color(ctx, p.tone);
            let text = format!(" {} ", truncate_to_width(&p.label, (rect.w - 2).max(0)));
            ctx.builder.draw_text(
                rect.x,
                rect.y,
                &text,
                TextStyle::fg(theme.colors.bg).with_bg(accent).merged_over(style),
            );
        }
        Props::Status(p) => {
            let accent = tone_color(ctx, p.tone);
            ctx.builder
                .draw_text(rect.x, rect.y, "●", TextStyle::fg(accent).merged_over(style));
            ctx.builder.draw_text(
                rect.x + 2,
                rect.y,
                &truncate_to_width(&p.label, (rect.w - 2).max(0)),
                style,
            );
        }
        Props::Tag(p) => {
            let text = format!("⟨{}⟩", truncate_to_width(&p.label, (rect.w - 2).max(0)));
            ctx.builder.draw_text(
                rect.x,
                rect.y,
                &text,
                TextStyle::fg(theme.colors.secondary).merged_over(style),
            );
        }
        Props::Empty(p) => {
            let muted = TextStyle::fg(theme.colors.muted).merged_over(style);
            let title_x = rect.x + ((rect.w - str_width(&p.title)) / 2).max(0);
            ctx.builder.draw_text(title_x, rect.y, &p.title, muted);
            if let Some(message) = &p.message {
                let msg_x = rect.x + ((rect.w - str_width(message)) / 2).max(0);
                ctx.builder.draw_text(
                    msg_x,
                    rect.y + 1,
                    message,
                    muted.with_attrs(StyleAttrs::DIM),
                );
            }
        }
        Props::ErrorDisplay(p) => {
            let danger = TextStyle::fg(theme.colors.danger).merged_over(style);
            crate::chrome::draw_border(
                ctx.builder,
                rect,
                core_theme::BorderKind::Single,
                core_node::BorderSides::default(),
                danger,
            );
            let inner_w = (rect.w - 4).max(0);
            ctx.builder.draw_text(
                rect.x + 2,
                rect.y + 1,
                &truncate_to_width(&p.title, inner_w),
                danger.with_attrs(StyleAttrs::BOLD),
            );
            ctx.builder.draw_text(
                rect.x + 2,
                rect.y + 2,
                &truncate_to_width(&p.message, inner_w),
                style,
            );
            if let Some(details) = &p.details {
                for (row, line) in details.lines().enumerate() {
                    let y = rect.y + 3 + row as i32;
                    if y >= rect.bottom() - 1 {
                        break;
                    }
                    ctx.builder.draw_text(
                        rect.x + 2,
                        y,
                        &truncate_to_width(line, inner_w),
                        TextStyle::fg(theme.colors.muted)
                            .with_attrs(StyleAttrs::DIM)
                            .merged_over(style),
                    );
                }
            }
        }
        Props::Callout(p) => {
            let accent = tone_color(ctx, p.tone);
            let accent_style = TextStyle::fg(accent).merged_over(style);
            crate::chrome::draw_border(
                ctx.builder,
                rect,
                core_theme::BorderKind::Rounded,
                core_node::BorderSides::default(),
                accent_style,
            );
            let inner_w = (rect.w - 4).max(0);
            ctx.builder.draw_text(
                rect.x + 2,
                rect.y + 1,
                &truncate_to_width(&p.title, inner_w),
                accent_style.with_attrs(StyleAttrs::BOLD),
            );
            for (row, line) in wrap(&p.body, inner_w).into_iter().enumerate() {
                let y = rect.y + 2 + row as i32;
                if y >= rect.bottom() - 1 {
                    break;
                }
                ctx.builder.draw_text(rect.x + 2, y, &line, style);
            }
        }
        Props::Kbd(p) => {
            let text = format!("⌈{}⌉", p.keys.join("+"));
            ctx.builder.draw_text(
                rect.x,
                rect.y,
                &truncate_to_width(&text, rect.w),
                TextStyle::fg(theme.colors.secondary)
                    .with_attrs(StyleAttrs::BOLD)
                    .merged_over(style),
            );
        }
        Props::Image(p) => {
            if p.rows.is_empty() {
                ctx.builder.draw_text(
                    rect.x,
                    rect.y,
                    &truncate_to_width(&p.alt, rect.w),
                    TextStyle::fg(theme.colors.muted).merged_over(style),
                );
            }
            for (row, line) in p.rows.iter().enumerate() {
                if row as i32 >= rect.h {
                    break;
                }
                ctx.builder.draw_text(rect.x, rect.y + row as i32, line, style);
            }
        }
        Props::Canvas(p) => {
            for (row, (line, line_style)) in p.rows.iter().enumerate() {
                if row as i32 >= rect.h {
                    break;
                }
                ctx.builder.draw_text(
                    rect.x,
                    rect.y + row as i32,
                    line,
                    line_style.merged_over(style),
                );
            }
        }
        Props::Link(p) => {
            ctx.builder.draw_text(
                rect.x,
                rect.y,
                &truncate_to_width(&p.label, rect.w),
                TextStyle::fg(theme.colors.primary)
                    .with_underline(UnderlineStyle::Straight, None)
                    .merged_over(style),
            );
        }
        Props::Spacer(_) | Props::FocusAnnouncer(_) => {}
        _ => {
            // Remaining kinds are routed to dedicated painters; reaching
            // here means a dispatch hole, which must stay visible in dev.
            tracing::warn!(kind = ?vnode.props.kind(), "no painter for kind");
        }
    }
}
