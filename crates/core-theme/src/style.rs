//! Text style model carried down the render walk.
//!
//! A `TextStyle` is a partial specification: unset fields inherit from the
//! parent style on the walk's style stack. Attribute flags are additive on
//! merge; explicit colors override inherited ones.
//!
//! Invariants:
//! * `TextStyle::default()` specifies nothing; merging it over any parent
//!   yields the parent.
//! * Merge is associative over the fields it touches, so pushing partial
//!   styles level by level equals merging once.

use bitflags::bitflags;

use crate::color::Color;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleAttrs: u8 {
        const BOLD    = 0b0000_0001;
        const ITALIC  = 0b0000_0010;
        const UNDERLINE = 0b0000_0100;
        const INVERSE = 0b0000_1000;
        const DIM     = 0b0001_0000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnderlineStyle {
    Straight,
    Curly,
    Dotted,
    Dashed,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextStyle {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attrs: StyleAttrs,
    pub underline_style: Option<UnderlineStyle>,
    pub underline_color: Option<Color>,
}

impl TextStyle {
    pub fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            ..Self::default()
        }
    }

    pub fn bg(color: Color) -> Self {
        Self {
            bg: Some(color),
            ..Self::default()
        }
    }

    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn with_attrs(mut self, attrs: StyleAttrs) -> Self {
        self.attrs |= attrs;
        self
    }

    pub fn with_underline(mut self, style: UnderlineStyle, color: Option<Color>) -> Self {
        self.attrs |= StyleAttrs::UNDERLINE;
        self.underline_style = Some(style);
        self.underline_color = color;
        self
    }

    /// Resolve `self` against an inherited `parent`: set fields win, unset
    /// fields fall through, attribute flags accumulate.
    pub fn merged_over(self, parent: TextStyle) -> TextStyle {
        TextStyle {
            fg: self.fg.or(parent.fg),
            bg: self.bg.or(parent.bg),
            attrs: self.attrs | parent.attrs,
            underline_style: self.underline_style.or(parent.underline_style),
            underline_color: self.underline_color.or(parent.underline_color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn default_merge_is_identity() {
        let parent = TextStyle::fg(RED).with_attrs(StyleAttrs::BOLD);
        assert_eq!(TextStyle::default().merged_over(parent), parent);
    }

    #[test]
    fn child_colors_override() {
        let parent = TextStyle::fg(RED).with_bg(BLUE);
        let child = TextStyle::fg(BLUE).merged_over(parent);
        assert_eq!(child.fg, Some(BLUE));
        assert_eq!(child.bg, Some(BLUE));
    }

    #[test]
    fn attrs_accumulate() {
        let parent = TextStyle::default().with_attrs(StyleAttrs::DIM);
        let child = TextStyle::default()
            .with_attrs(StyleAttrs::BOLD)
            .merged_over(parent);
        assert!(child.attrs.contains(StyleAttrs::BOLD | StyleAttrs::DIM));
    }

    #[test]
    fn merge_level_by_level_equals_once() {
        let a = TextStyle::fg(RED);
        let b = TextStyle::bg(BLUE);
        let c = TextStyle::default().with_attrs(StyleAttrs::ITALIC);
        let stepwise = c.merged_over(b.merged_over(a));
        let once = c.merged_over(TextStyle {
            fg: Some(RED),
            bg: Some(BLUE),
            ..TextStyle::default()
        });
        assert_eq!(stepwise, once);
    }
}
