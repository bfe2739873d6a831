//! RGB cell colors.
//!
//! Colors cross the drawlist boundary as plain `{r, g, b}` triples; named
//! theme keys are resolved before emission. Theme files spell colors as
//! `"#rrggbb"` strings, so deserialization accepts that form only.

use std::fmt;

use serde::Deserialize;
use serde::de::{self, Deserializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn parse_hex(s: &str) -> Option<Color> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color { r, g, b })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::parse_hex(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid color {s:?}, expected #rrggbb")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(Color::parse_hex("#ff8000"), Some(Color::rgb(255, 128, 0)));
        assert_eq!(Color::parse_hex("0080ff"), Some(Color::rgb(0, 128, 255)));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Color::parse_hex("#fff"), None);
        assert_eq!(Color::parse_hex("#zzzzzz"), None);
        assert_eq!(Color::parse_hex(""), None);
    }

    #[test]
    fn display_round_trips() {
        let c = Color::rgb(18, 52, 86);
        assert_eq!(Color::parse_hex(&c.to_string()), Some(c));
    }
}
