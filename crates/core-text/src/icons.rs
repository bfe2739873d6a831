//! Icon glyph table, consumed as data by measurement and paint.
//!
//! Names are looked up in a sorted static table; a missing name degrades to
//! the fallback glyph (width 1) rather than failing the node.

use crate::width::cluster_width;

pub const FALLBACK_GLYPH: &str = "·";

/// Sorted by name for binary search.
const ICONS: &[(&str, &str)] = &[
    ("arrow-down", "↓"),
    ("arrow-left", "←"),
    ("arrow-right", "→"),
    ("arrow-up", "↑"),
    ("check", "✓"),
    ("chevron-down", "▾"),
    ("chevron-right", "▸"),
    ("circle", "●"),
    ("cross", "✗"),
    ("dot", "•"),
    ("ellipsis", "…"),
    ("file", "🗎"),
    ("folder", "🗀"),
    ("folder-open", "🗁"),
    ("gear", "⚙"),
    ("info", "ℹ"),
    ("lock", "🔒"),
    ("pencil", "✎"),
    ("search", "🔍"),
    ("star", "★"),
    ("warning", "⚠"),
];

/// Look up a named icon glyph.
pub fn icon_glyph(name: &str) -> Option<&'static str> {
    ICONS
        .binary_search_by(|(n, _)| (*n).cmp(name))
        .ok()
        .map(|i| ICONS[i].1)
}

/// Glyph for `name`, substituting the fallback for unknown names.
pub fn icon_glyph_or_fallback(name: &str) -> &'static str {
    icon_glyph(name).unwrap_or(FALLBACK_GLYPH)
}

/// Cell width of the named icon (fallback width for unknown names).
pub fn icon_width(name: &str) -> i32 {
    cluster_width(icon_glyph_or_fallback(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted() {
        for pair in ICONS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "icon table out of order");
        }
    }

    #[test]
    fn known_icon_resolves() {
        assert_eq!(icon_glyph("check"), Some("✓"));
        assert_eq!(icon_width("check"), 1);
    }

    #[test]
    fn unknown_icon_falls_back() {
        assert_eq!(icon_glyph("no-such-icon"), None);
        assert_eq!(icon_glyph_or_fallback("no-such-icon"), FALLBACK_GLYPH);
        assert_eq!(icon_width("no-such-icon"), 1);
    }
}
