//! Design-system recipes for form controls.
//!
//! A recipe is the resolved appearance for a `(variant, tone, size, state)`
//! tuple: which border to draw, what to fill, how to style the label and the
//! indicator/track sub-parts, and how much horizontal padding the control
//! claims. Resolution is pure over the theme.
//!
//! When a control asks for a tuple the theme carries no dedicated tokens
//! for, resolution falls back to an ad-hoc palette keyed by the tone's
//! status color, so unstyled themes still produce readable controls.

use crate::color::Color;
use crate::style::{StyleAttrs, TextStyle};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    #[default]
    Solid,
    Outline,
    Ghost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Primary,
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlSize {
    Sm,
    #[default]
    Md,
    Lg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlState {
    #[default]
    Default,
    Focus,
    Pressed,
    Disabled,
    Selected,
    Readonly,
}

/// Border chrome kinds shared by boxes and form recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderKind {
    None,
    #[default]
    Single,
    Double,
    Rounded,
    Thick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    pub border: BorderKind,
    pub fill: Option<Color>,
    pub label: TextStyle,
    pub indicator: TextStyle,
    pub track: TextStyle,
    pub padding_x: i32,
}

impl Tone {
    /// Status color this tone keys on.
    pub fn color(self, theme: &Theme) -> Color {
        let c = &theme.colors;
        match self {
            Tone::Neutral => c.muted,
            Tone::Primary => c.primary,
            Tone::Info => c.info,
            Tone::Success => c.success,
            Tone::Warning => c.warning,
            Tone::Danger => c.danger,
        }
    }
}

impl ControlSize {
    pub fn padding_x(self, theme: &Theme) -> i32 {
        match self {
            ControlSize::Sm => theme.spacing.xs,
            ControlSize::Md => theme.spacing.md,
            ControlSize::Lg => theme.spacing.lg,
        }
    }
}

/// Resolve the recipe for one control tuple.
pub fn resolve(
    theme: &Theme,
    variant: Variant,
    tone: Tone,
    size: ControlSize,
    state: ControlState,
) -> Recipe {
    let accent = tone.color(theme);
    let base_fg = theme.colors.fg;
    let bg = theme.colors.bg;

    let mut label = TextStyle::default();
    let mut indicator = TextStyle::fg(accent);
    let mut fill = None;
    let mut border = BorderKind::Single;

    match variant {
        Variant::Solid => {
            fill = Some(accent);
            label = TextStyle::fg(bg).with_bg(accent);
            indicator = TextStyle::fg(bg).with_bg(accent);
            border = BorderKind::None;
        }
        Variant::Outline => {
            label = TextStyle::fg(accent);
            border = BorderKind::Single;
        }
        Variant::Ghost => {
            label = TextStyle::fg(base_fg);
            border = BorderKind::None;
        }
    }

    match state {
        ControlState::Default => {}
        ControlState::Focus => {
            border = match border {
                BorderKind::None => BorderKind::Single,
                _ => BorderKind::Thick,
            };
            label = label.with_attrs(StyleAttrs::BOLD);
        }
        ControlState::Pressed => {
            label = label.with_attrs(StyleAttrs::INVERSE);
        }
        ControlState::Disabled => {
            fill = None;
            label = TextStyle::fg(theme.colors.muted).with_attrs(StyleAttrs::DIM);
            indicator = TextStyle::fg(theme.colors.muted).with_attrs(StyleAttrs::DIM);
        }
        ControlState::Selected => {
            label = label.with_attrs(StyleAttrs::BOLD);
            indicator = TextStyle::fg(accent).with_attrs(StyleAttrs::BOLD);
        }
        ControlState::Readonly => {
            label = label.with_attrs(StyleAttrs::DIM);
        }
    }

    Recipe {
        border,
        fill,
        label,
        indicator,
        track: TextStyle::fg(theme.colors.border),
        padding_x: size.padding_x(theme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_fills_with_tone_color() {
        let theme = Theme::default();
        let r = resolve(
            &theme,
            Variant::Solid,
            Tone::Primary,
            ControlSize::Md,
            ControlState::Default,
        );
        assert_eq!(r.fill, Some(theme.colors.primary));
        assert_eq!(r.border, BorderKind::None);
    }

    #[test]
    fn focus_promotes_border() {
        let theme = Theme::default();
        let r = resolve(
            &theme,
            Variant::Outline,
            Tone::Neutral,
            ControlSize::Md,
            ControlState::Focus,
        );
        assert_eq!(r.border, BorderKind::Thick);
        assert!(r.label.attrs.contains(StyleAttrs::BOLD));
    }

    #[test]
    fn disabled_drops_fill_and_dims() {
        let theme = Theme::default();
        let r = resolve(
            &theme,
            Variant::Solid,
            Tone::Danger,
            ControlSize::Lg,
            ControlState::Disabled,
        );
        assert_eq!(r.fill, None);
        assert!(r.label.attrs.contains(StyleAttrs::DIM));
    }

    #[test]
    fn size_maps_to_spacing_scale() {
        let theme = Theme::default();
        assert_eq!(ControlSize::Sm.padding_x(&theme), theme.spacing.xs);
        assert_eq!(ControlSize::Lg.padding_x(&theme), theme.spacing.lg);
    }
}
