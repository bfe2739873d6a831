//! Grapheme-cluster display width engine.
//!
//! A single authoritative function `cluster_width` returns the terminal
//! column count for one grapheme cluster (EGC). Every width decision in the
//! pipeline flows through here; no other crate consults `unicode_width`
//! directly.
//!
//! Width precedence:
//! 1. Static override table (sequences the baseline crate mis-measures:
//!    ZWJ emoji, flags, keycaps, tone modifiers).
//! 2. Single-codepoint fast path (`unicode_width` + pictographic widening).
//! 3. Multi-codepoint classification.
//! 4. Conservative widen fallback: a pictographic or regional-indicator
//!    signal forces width 2.
//!
//! Invariants:
//! * Callers segment first; input is one EGC slice (empty input is width 0).
//! * The classifier over-estimates rather than under-estimates; a spare
//!   blank cell is harmless, an under-count drifts every following column.
//! * `OVERRIDES` stays sorted and unique (binary searched, checked in tests).

const ZWJ: char = '\u{200D}';
const KEYCAP_COMBINING: char = '\u{20E3}';

/// Sequences whose width must stay forced regardless of classification.
/// The misc-symbols entries are glyphs common terminals render narrow even
/// though they sit in the widened dingbat range. Sorted by sequence for
/// binary search.
const OVERRIDES: &[(&str, i32)] = &[
    ("1\u{FE0F}\u{20E3}", 2),
    ("\u{2605}", 1),         // ★
    ("\u{2699}", 1),         // ⚙
    ("\u{2699}\u{FE0F}", 1), // ⚙ + VS16
    ("\u{26A0}", 1),         // ⚠
    ("\u{270E}", 1),         // ✎
    ("\u{2713}", 1),         // ✓
    ("\u{2717}", 1),         // ✗
    ("\u{1F1FA}\u{1F1F8}", 2),
    ("\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}\u{200D}\u{1F466}", 2),
];

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

// Primary emoji blocks plus the misc-symbols / dingbats ranges where legacy
// emoji live.
fn is_extended_pictographic(c: char) -> bool {
    ('\u{1F300}'..='\u{1FAFF}').contains(&c) || ('\u{2600}'..='\u{27BF}').contains(&c)
}

// Combining mark ranges commonly encountered (subset).
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
        || ('\u{1AB0}'..='\u{1AFF}').contains(&c)
        || ('\u{1DC0}'..='\u{1DFF}').contains(&c)
        || ('\u{20D0}'..='\u{20FF}').contains(&c)
        || ('\u{FE20}'..='\u{FE2F}').contains(&c)
}

fn override_width(egc: &str) -> Option<i32> {
    OVERRIDES
        .binary_search_by(|(seq, _)| seq.cmp(&egc))
        .ok()
        .map(|i| OVERRIDES[i].1)
}

/// Display column width of a single grapheme cluster.
#[inline]
pub fn cluster_width(egc: &str) -> i32 {
    if egc.is_empty() {
        return 0;
    }
    if let Some(w) = override_width(egc) {
        return w;
    }

    let mut chars = egc.chars();
    let first = chars.next().expect("non-empty cluster");
    if chars.next().is_none() {
        // Single codepoint.
        if first.is_ascii() {
            return 1;
        }
        if is_extended_pictographic(first) {
            return 2;
        }
        return unicode_width::UnicodeWidthChar::width(first).unwrap_or(1) as i32;
    }

    multi_codepoint_width(egc)
}

fn multi_codepoint_width(egc: &str) -> i32 {
    let mut has_signal = false;
    let mut any_wide = false;
    let mut base_width: Option<i32> = None;
    let mut all_marks_after_base = true;
    let mut ends_with_keycap = false;
    let mut has_zwj = false;

    for c in egc.chars() {
        if is_extended_pictographic(c) || is_regional_indicator(c) {
            has_signal = true;
        }
        if c == ZWJ {
            has_zwj = true;
        }
        if c == KEYCAP_COMBINING {
            ends_with_keycap = true;
        }
        if unicode_width::UnicodeWidthChar::width(c).unwrap_or(1) == 2 {
            any_wide = true;
        }
        match base_width {
            None => {
                if !is_combining_mark(c) {
                    base_width = Some(if first_is_wide(c) { 2 } else { 1 });
                }
            }
            Some(_) => {
                if !is_combining_mark(c) && c != '\u{FE0F}' {
                    all_marks_after_base = false;
                }
            }
        }
    }

    if ends_with_keycap || has_zwj || any_wide || has_signal {
        return 2;
    }
    // Base + combining marks: the base's width carries the cluster.
    if all_marks_after_base {
        return base_width.unwrap_or(1);
    }
    1
}

#[inline]
fn first_is_wide(c: char) -> bool {
    is_extended_pictographic(c)
        || unicode_width::UnicodeWidthChar::width(c).unwrap_or(1) == 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_one() {
        assert_eq!(cluster_width("a"), 1);
    }

    #[test]
    fn cjk_is_two() {
        assert_eq!(cluster_width("界"), 2);
    }

    #[test]
    fn emoji_is_two() {
        assert_eq!(cluster_width("😀"), 2);
    }

    #[test]
    fn combining_keeps_base_width() {
        assert_eq!(cluster_width("e\u{0301}"), 1);
        assert_eq!(cluster_width("界\u{0301}"), 2);
    }

    #[test]
    fn zwj_family_is_two() {
        assert_eq!(cluster_width("👨‍👩‍👧‍👦"), 2);
    }

    #[test]
    fn flag_pair_is_two() {
        assert_eq!(cluster_width("🇺🇸"), 2);
    }

    #[test]
    fn keycap_is_two() {
        assert_eq!(cluster_width("1️⃣"), 2);
        assert_eq!(cluster_width("2\u{20E3}"), 2);
    }

    #[test]
    fn skin_tone_is_two() {
        assert_eq!(cluster_width("👍🏻"), 2);
    }

    #[test]
    fn gear_override_is_narrow() {
        assert_eq!(cluster_width("⚙"), 1);
        assert_eq!(cluster_width("⚙️"), 1);
    }

    #[test]
    fn lone_regional_indicator_widens() {
        assert_eq!(cluster_width("🇺"), 2);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(cluster_width(""), 0);
    }

    #[test]
    fn override_table_sorted_and_consistent() {
        for pair in OVERRIDES.windows(2) {
            assert!(pair[0].0 < pair[1].0, "override table out of order");
        }
        for (seq, w) in OVERRIDES {
            assert_eq!(cluster_width(seq), *w, "override mismatch for {seq}");
        }
    }
}
