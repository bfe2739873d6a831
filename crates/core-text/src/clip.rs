//! Column-range slicing used by drawlist clipping and truncation.
//!
//! Invariants:
//! * Slicing operates on cluster boundaries; a wide cluster that straddles
//!   either edge of the requested column window is dropped whole (its cells
//!   are out of clip, partial glyphs are never emitted).
//! * `truncate_to_width` reserves one column for the ellipsis when it cuts.

use unicode_segmentation::UnicodeSegmentation;

use crate::width::cluster_width;

pub const ELLIPSIS: &str = "…";

/// Result of slicing a string to a column window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSlice {
    pub text: String,
    /// First column (relative to the original string start) actually covered.
    pub start_col: i32,
    /// Display width of `text`.
    pub width: i32,
}

/// Extract the part of `s` covering columns `[start_col, start_col + max_cols)`.
///
/// Clusters partially inside the window are dropped. `start_col` of the
/// result may exceed the requested start when a wide cluster straddled the
/// left edge.
pub fn slice_columns(s: &str, start_col: i32, max_cols: i32) -> ColumnSlice {
    let mut text = String::new();
    let mut col = 0i32;
    let mut out_start = None;
    let mut width = 0i32;
    if max_cols > 0 {
        let end = start_col.saturating_add(max_cols);
        for cluster in s.graphemes(true) {
            let cw = cluster_width(cluster);
            let cluster_end = col + cw;
            if col >= start_col && cluster_end <= end {
                if out_start.is_none() {
                    out_start = Some(col);
                }
                text.push_str(cluster);
                width += cw;
            } else if col >= end {
                break;
            }
            col = cluster_end;
        }
    }
    ColumnSlice {
        text,
        start_col: out_start.unwrap_or(start_col),
        width,
    }
}

/// Truncate to `max_w` columns, appending an ellipsis when content was cut.
pub fn truncate_to_width(s: &str, max_w: i32) -> String {
    if max_w <= 0 {
        return String::new();
    }
    let full = crate::wrap::str_width(s);
    if full <= max_w {
        return s.to_string();
    }
    if max_w == 1 {
        return ELLIPSIS.to_string();
    }
    let mut out = slice_columns(s, 0, max_w - 1).text;
    out.push_str(ELLIPSIS);
    out
}

/// Prefix of `s` covering the first `count` grapheme clusters.
pub fn prefix_graphemes(s: &str, count: usize) -> &str {
    let mut end = 0;
    for (taken, (idx, g)) in s.grapheme_indices(true).enumerate() {
        if taken >= count {
            return &s[..idx];
        }
        end = idx + g.len();
    }
    &s[..end]
}

/// Pad or truncate to exactly `w` columns (no ellipsis; blunt clip).
pub fn fit_to_width(s: &str, w: i32) -> String {
    if w <= 0 {
        return String::new();
    }
    let slice = slice_columns(s, 0, w);
    let mut out = slice.text;
    for _ in 0..(w - slice.width) {
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_plain_window() {
        let s = slice_columns("abcdef", 2, 3);
        assert_eq!(s.text, "cde");
        assert_eq!(s.start_col, 2);
        assert_eq!(s.width, 3);
    }

    #[test]
    fn slice_drops_straddling_wide_cluster() {
        // "界" spans columns 0..2; a window starting at 1 excludes it whole.
        let s = slice_columns("界a", 1, 3);
        assert_eq!(s.text, "a");
        assert_eq!(s.start_col, 2);
    }

    #[test]
    fn slice_drops_wide_cluster_at_right_edge() {
        let s = slice_columns("a界", 0, 2);
        assert_eq!(s.text, "a");
        assert_eq!(s.width, 1);
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 7), "hello …");
        assert_eq!(truncate_to_width("hi", 7), "hi");
        assert_eq!(truncate_to_width("hello", 1), "…");
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn fit_pads_to_exact_width() {
        assert_eq!(fit_to_width("ab", 4), "ab  ");
        assert_eq!(fit_to_width("abcdef", 4), "abcd");
    }

    #[test]
    fn prefix_counts_clusters_not_bytes() {
        assert_eq!(prefix_graphemes("abc", 2), "ab");
        assert_eq!(prefix_graphemes("e\u{0301}x", 1), "e\u{0301}");
        assert_eq!(prefix_graphemes("ab", 10), "ab");
        assert_eq!(prefix_graphemes("", 3), "");
    }
}
