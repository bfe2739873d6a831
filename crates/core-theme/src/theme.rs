//! Theme surface: semantic color table and spacing scale.
//!
//! Widgets never hold raw colors; they name semantic keys (`primary`,
//! `danger`, `syntax.keyword`, …) that resolve here. Theme files are TOML
//! with every field optional; anything missing falls back to the built-in
//! default palette, so a theme can override a single color.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SyntaxColors {
    pub plain: Color,
    pub keyword: Color,
    pub ty: Color,
    pub string: Color,
    pub number: Color,
    pub comment: Color,
    pub operator: Color,
    pub punctuation: Color,
    pub function: Color,
    pub variable: Color,
}

impl Default for SyntaxColors {
    fn default() -> Self {
        Self {
            plain: Color::rgb(0xd4, 0xd4, 0xd4),
            keyword: Color::rgb(0xc5, 0x86, 0xc0),
            ty: Color::rgb(0x4e, 0xc9, 0xb0),
            string: Color::rgb(0xce, 0x91, 0x78),
            number: Color::rgb(0xb5, 0xce, 0xa8),
            comment: Color::rgb(0x6a, 0x99, 0x55),
            operator: Color::rgb(0xd4, 0xd4, 0xd4),
            punctuation: Color::rgb(0x80, 0x80, 0x80),
            function: Color::rgb(0xdc, 0xdc, 0xaa),
            variable: Color::rgb(0x9c, 0xdc, 0xfe),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,
    pub secondary: Color,
    pub info: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub border: Color,
    pub muted: Color,
    pub selection_bg: Color,
    pub overlay_bg: Color,
    pub syntax: SyntaxColors,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: Color::rgb(0x1e, 0x1e, 0x1e),
            fg: Color::rgb(0xd4, 0xd4, 0xd4),
            primary: Color::rgb(0x56, 0x9c, 0xd6),
            secondary: Color::rgb(0x9c, 0xdc, 0xfe),
            info: Color::rgb(0x56, 0x9c, 0xd6),
            success: Color::rgb(0x6a, 0x99, 0x55),
            warning: Color::rgb(0xd7, 0xba, 0x7d),
            danger: Color::rgb(0xf4, 0x47, 0x47),
            border: Color::rgb(0x45, 0x45, 0x45),
            muted: Color::rgb(0x80, 0x80, 0x80),
            selection_bg: Color::rgb(0x26, 0x4f, 0x78),
            overlay_bg: Color::rgb(0x25, 0x25, 0x26),
            syntax: SyntaxColors::default(),
        }
    }
}

/// Spacing scale tokens, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Spacing {
    pub xs: i32,
    pub sm: i32,
    pub md: i32,
    pub lg: i32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            xs: 1,
            sm: 1,
            md: 2,
            lg: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct Theme {
    pub colors: ThemeColors,
    pub spacing: Spacing,
}

impl Theme {
    /// Load a theme TOML file; missing fields keep their defaults. Unknown
    /// fields are ignored so theme files can carry forward-looking keys.
    pub fn load_from_path(path: &Path) -> Result<Theme> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading theme file {}", path.display()))?;
        let theme: Theme = toml::from_str(&raw)
            .with_context(|| format!("parsing theme file {}", path.display()))?;
        info!(path = %path.display(), "theme loaded");
        Ok(theme)
    }
}
