//! Design-system surface consumed by the renderer: colors, text styles,
//! spacing tokens and form-control recipes, with TOML theme loading.

pub mod color;
pub mod recipe;
pub mod style;
pub mod theme;

pub use color::Color;
pub use recipe::{BorderKind, ControlSize, ControlState, Recipe, Tone, Variant, resolve};
pub use style::{StyleAttrs, TextStyle, UnderlineStyle};
pub use theme::{Spacing, SyntaxColors, Theme, ThemeColors};
