//! Form control painters: recipe-driven chrome for interactive leaves.
//!
//! Every control resolves a design-system recipe for its `(variant, tone,
//! size, state)` tuple; the recipe decides fill, label and indicator
//! styles. Input-like controls claim the frame cursor when focused — the
//! last claim written to the builder wins.

use core_geometry::Rect;
use core_layout::LayoutNode;
use core_node::{Props, RuntimeInstance, VNode};
use core_text::{glyph_run, str_width, truncate_to_width};
use core_theme::{ControlSize, ControlState, Recipe, StyleAttrs, TextStyle, Tone, Variant, resolve};

use crate::container::push_tested_children;
use crate::walk::PaintCtx;

fn control_state(
    disabled: bool,
    pressed: bool,
    focused: bool,
    selected: bool,
    readonly: bool,
) -> ControlState {
    if disabled {
        ControlState::Disabled
    } else if pressed {
        ControlState::Pressed
    } else if focused {
        ControlState::Focus
    } else if selected {
        ControlState::Selected
    } else if readonly {
        ControlState::Readonly
    } else {
        ControlState::Default
    }
}

fn recipe_for(
    ctx: &PaintCtx<'_, '_>,
    variant: Variant,
    tone: Tone,
    size: ControlSize,
    state: ControlState,
) -> Recipe {
    resolve(ctx.params.theme, variant, tone, size, state)
}

pub(crate) fn paint_form(
    ctx: &mut PaintCtx<'_, '_>,
    inst: &RuntimeInstance,
    vnode: &VNode,
    rect: Rect,
    style: TextStyle,
) {
    let focused = ctx.params.focus.is_focused(vnode.id.as_deref());
    match &vnode.props {
        Props::Button(p) => {
            let state = control_state(p.disabled, inst.pressed, focused, false, false);
            let recipe = recipe_for(ctx, p.variant, p.tone, p.size, state);
            if let Some(fill) = recipe.fill {
                ctx.builder.fill_rect(rect, TextStyle::bg(fill));
            }
            let label = truncate_to_width(&p.label, (rect.w - 2 * recipe.padding_x).max(0));
            let x = rect.x + ((rect.w - str_width(&label)) / 2).max(0);
            ctx.builder
                .draw_text(x, rect.y, &label, recipe.label.merged_over(style));
        }
        Props::Input(p) => {
            let state = control_state(false, false, focused, false, p.readonly);
            let recipe = recipe_for(ctx, Variant::Ghost, Tone::Neutral, ControlSize::Md, state);
            let masked;
            let (text, text_style) = if p.value.is_empty() {
                (
                    p.placeholder.as_str(),
                    TextStyle::fg(ctx.params.theme.colors.muted)
                        .with_attrs(StyleAttrs::DIM)
                        .merged_over(style),
                )
            } else if p.masked {
                masked = glyph_run('•', str_width(&p.value)).to_string();
                (masked.as_str(), recipe.label.merged_over(style))
            } else {
                (p.value.as_str(), recipe.label.merged_over(style))
            };
            ctx.builder
                .draw_text(rect.x, rect.y, &truncate_to_width(text, rect.w), text_style);
            if focused && !p.readonly {
                let offset = ctx
                    .params
                    .cursor_info
                    .offset_for(inst.instance_id)
                    .unwrap_or_else(|| p.value.chars().count());
                let prefix = core_text::prefix_graphemes(&p.value, offset);
                let cx = rect.x + str_width(prefix).min((rect.w - 1).max(0));
                ctx.claim_cursor(cx, rect.y);
            }
        }
        Props::Select(p) => {
            let state = control_state(p.disabled, false, focused, false, false);
            let recipe = recipe_for(ctx, Variant::Outline, Tone::Neutral, ControlSize::Md, state);
            let current = p
                .selected
                .and_then(|i| p.options.get(i))
                .map(|s| s.as_str())
                .unwrap_or(p.placeholder.as_str());
            let text = truncate_to_width(current, (rect.w - 2).max(0));
            ctx.builder
                .draw_text(rect.x, rect.y, &text, recipe.label.merged_over(style));
            ctx.builder.draw_text(
                rect.right() - 1,
                rect.y,
                "▾",
                recipe.indicator.merged_over(style),
            );
        }
        Props::Checkbox(p) => {
            let state = control_state(p.disabled, false, focused, p.checked, false);
            let recipe = recipe_for(ctx, Variant::Ghost, Tone::Primary, ControlSize::Md, state);
            let mark = if p.checked { "[x] " } else { "[ ] " };
            ctx.builder
                .draw_text(rect.x, rect.y, mark, recipe.indicator.merged_over(style));
            let label = truncate_to_width(&p.label, (rect.w - 4).max(0));
            ctx.builder
                .draw_text(rect.x + 4, rect.y, &label, recipe.label.merged_over(style));
        }
        Props::RadioGroup(p) => {
            let state = control_state(p.disabled, false, focused, false, false);
            let recipe = recipe_for(ctx, Variant::Ghost, Tone::Primary, ControlSize::Md, state);
            let mut x = rect.x;
            let mut y = rect.y;
            for (i, option) in p.options.iter().enumerate() {
                let mark = if p.selected == Some(i) { "(•) " } else { "( ) " };
                ctx.builder
                    .draw_text(x, y, mark, recipe.indicator.merged_over(style));
                ctx.builder.draw_text(
                    x + 4,
                    y,
                    option,
                    recipe.label.merged_over(style),
                );
                if p.vertical {
                    y += 1;
                } else {
                    x += 4 + str_width(option) + 2;
                }
            }
        }
        Props::Slider(p) => {
            let state = control_state(p.disabled, inst.pressed, focused, false, false);
            let recipe = recipe_for(ctx, Variant::Ghost, Tone::Primary, ControlSize::Md, state);
            let span = (p.max - p.min).max(f64::EPSILON);
            let ratio = ((p.value - p.min) / span).clamp(0.0, 1.0);
            let thumb = (ratio * (rect.w - 1).max(0) as f64).round() as i32;
            ctx.builder.draw_text(
                rect.x,
                rect.y,
                &glyph_run('─', rect.w),
                recipe.track.merged_over(style),
            );
            ctx.builder.draw_text(
                rect.x + thumb,
                rect.y,
                "●",
                recipe.indicator.merged_over(style),
            );
        }
        _ => {}
    }
}

pub(crate) fn paint_field<'a>(
    ctx: &mut PaintCtx<'_, 'a>,
    inst: &'a RuntimeInstance,
    layout: &'a LayoutNode,
    vnode: &VNode,
    rect: Rect,
    style: TextStyle,
    offset: (i32, i32),
) {
    let Props::Field(p) = &vnode.props else {
        return;
    };
    let theme = ctx.params.theme;
    ctx.builder.draw_text(
        rect.x,
        rect.y,
        &truncate_to_width(&p.label, rect.w),
        TextStyle::fg(theme.colors.fg)
            .with_attrs(StyleAttrs::BOLD)
            .merged_over(style),
    );
    // Error outranks help on the note row.
    let note = p
        .error
        .as_deref()
        .map(|e| (e, theme.colors.danger))
        .or_else(|| p.help.as_deref().map(|h| (h, theme.colors.muted)));
    if let Some((text, color)) = note {
        ctx.builder.draw_text(
            rect.x,
            rect.bottom() - 1,
            &truncate_to_width(text, rect.w),
            TextStyle::fg(color).merged_over(style),
        );
    }
    push_tested_children(ctx, inst, layout, style, offset);
}
