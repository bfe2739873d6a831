//! Shared widget chrome: borders, titles, shadows and scrollbar tracks.
//!
//! Glyph runs come from the interned run cache; repeated border/track
//! strings are never rebuilt per frame.

use core_geometry::Rect;
use core_node::{BorderSides, Shadow, TitleAlign};
use core_text::{glyph_run, str_width, truncate_to_width};
use core_theme::{BorderKind, TextStyle};

use crate::drawlist::DrawlistBuilder;

/// Corner and edge glyphs for one border kind:
/// `(tl, tr, bl, br, horizontal, vertical)`.
pub fn border_glyphs(kind: BorderKind) -> Option<(char, char, char, char, char, char)> {
    match kind {
        BorderKind::None => None,
        BorderKind::Single => Some(('┌', '┐', '└', '┘', '─', '│')),
        BorderKind::Double => Some(('╔', '╗', '╚', '╝', '═', '║')),
        BorderKind::Rounded => Some(('╭', '╮', '╰', '╯', '─', '│')),
        BorderKind::Thick => Some(('┏', '┓', '┗', '┛', '━', '┃')),
    }
}

/// Draw a border along the enabled sides of `rect`. Corners draw only when
/// both adjacent sides are enabled.
pub fn draw_border(
    builder: &mut DrawlistBuilder,
    rect: Rect,
    kind: BorderKind,
    sides: BorderSides,
    style: TextStyle,
) {
    let Some((tl, tr, bl, br, horiz, vert)) = border_glyphs(kind) else {
        return;
    };
    if rect.w < 1 || rect.h < 1 {
        return;
    }
    let inner_w = (rect.w - 2).max(0);
    if sides.top {
        let mut row = String::new();
        row.push(if sides.left { tl } else { horiz });
        row.push_str(&glyph_run(horiz, inner_w));
        if rect.w > 1 {
            row.push(if sides.right { tr } else { horiz });
        }
        builder.draw_text(rect.x, rect.y, &row, style);
    }
    if sides.bottom && rect.h > 1 {
        let mut row = String::new();
        row.push(if sides.left { bl } else { horiz });
        row.push_str(&glyph_run(horiz, inner_w));
        if rect.w > 1 {
            row.push(if sides.right { br } else { horiz });
        }
        builder.draw_text(rect.x, rect.bottom() - 1, &row, style);
    }
    let y0 = rect.y + sides.top as i32;
    let y1 = rect.bottom() - sides.bottom as i32;
    for y in y0..y1 {
        if sides.left {
            builder.draw_text(rect.x, y, &vert.to_string(), style);
        }
        if sides.right && rect.w > 1 {
            builder.draw_text(rect.right() - 1, y, &vert.to_string(), style);
        }
    }
}

/// Overlay a title onto the top border row.
pub fn draw_title(
    builder: &mut DrawlistBuilder,
    rect: Rect,
    title: &str,
    align: TitleAlign,
    style: TextStyle,
) {
    let budget = (rect.w - 4).max(0);
    if budget == 0 {
        return;
    }
    let text = format!(" {} ", truncate_to_width(title, budget));
    let text_w = str_width(&text);
    let x = match align {
        TitleAlign::Left => rect.x + 1,
        TitleAlign::Center => rect.x + ((rect.w - text_w) / 2).max(1),
        TitleAlign::Right => rect.x + (rect.w - 1 - text_w).max(1),
    };
    builder.draw_text(x, rect.y, &text, style);
}

/// Drop shadow: a glyph band offset from the right and bottom edges.
pub fn draw_shadow(builder: &mut DrawlistBuilder, rect: Rect, shadow: Shadow, style: TextStyle) {
    let dx = shadow.dx.max(0);
    let dy = shadow.dy.max(0);
    if dx == 0 && dy == 0 {
        return;
    }
    // Right band.
    for y in (rect.y + dy)..rect.bottom() {
        builder.draw_text(rect.right(), y, &glyph_run(shadow.glyph, dx), style);
    }
    // Bottom band.
    let run = glyph_run(shadow.glyph, rect.w);
    for row in 0..dy {
        builder.draw_text(rect.x + dx, rect.bottom() + row, &run, style);
    }
}

const TRACK_GLYPH: char = '░';
const THUMB_GLYPH: char = '█';

/// Proportional thumb geometry: `(offset, size)` within a track of
/// `track` cells.
pub fn thumb_geometry(track: i32, content: i32, viewport: i32, scroll: i32) -> (i32, i32) {
    if track <= 0 || content <= viewport || content <= 0 {
        return (0, track.max(0));
    }
    let size = ((track as i64 * viewport as i64) / content as i64).max(1) as i32;
    let size = size.min(track);
    let range = (content - viewport) as i64;
    let offset = ((track - size) as i64 * scroll as i64 / range.max(1)) as i32;
    (offset.clamp(0, track - size), size)
}

/// Vertical scrollbar occupying the single-cell column at `x`.
pub fn draw_vscrollbar(
    builder: &mut DrawlistBuilder,
    x: i32,
    y: i32,
    track: i32,
    content: i32,
    viewport: i32,
    scroll: i32,
    style: TextStyle,
) {
    if track < 1 {
        return; // not enough cells; viewport clipping still applies
    }
    let (offset, size) = thumb_geometry(track, content, viewport, scroll);
    for row in 0..track {
        let glyph = if row >= offset && row < offset + size {
            THUMB_GLYPH
        } else {
            TRACK_GLYPH
        };
        builder.draw_text(x, y + row, &glyph.to_string(), style);
    }
}

/// Horizontal scrollbar occupying the single-cell row at `y`.
pub fn draw_hscrollbar(
    builder: &mut DrawlistBuilder,
    x: i32,
    y: i32,
    track: i32,
    content: i32,
    viewport: i32,
    scroll: i32,
    style: TextStyle,
) {
    if track < 1 {
        return;
    }
    let (offset, size) = thumb_geometry(track, content, viewport, scroll);
    builder.draw_text(x, y, &glyph_run(TRACK_GLYPH, offset), style);
    builder.draw_text(x + offset, y, &glyph_run(THUMB_GLYPH, size), style);
    let rest = track - offset - size;
    builder.draw_text(x + offset + size, y, &glyph_run(TRACK_GLYPH, rest), style);
}

/// Corner cell drawn when both scrollbars are active.
pub fn draw_scroll_corner(builder: &mut DrawlistBuilder, x: i32, y: i32, style: TextStyle) {
    builder.draw_text(x, y, &TRACK_GLYPH.to_string(), style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawlist::DrawOp;

    #[test]
    fn border_emits_four_sides() {
        let mut b = DrawlistBuilder::new();
        draw_border(
            &mut b,
            Rect::new(0, 0, 4, 3),
            BorderKind::Single,
            BorderSides::default(),
            TextStyle::default(),
        );
        let texts: Vec<&str> = b
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"┌──┐"));
        assert!(texts.contains(&"└──┘"));
        assert_eq!(texts.iter().filter(|t| **t == "│").count(), 2);
    }

    #[test]
    fn disabled_side_skipped() {
        let mut b = DrawlistBuilder::new();
        draw_border(
            &mut b,
            Rect::new(0, 0, 4, 3),
            BorderKind::Single,
            BorderSides {
                bottom: false,
                ..BorderSides::default()
            },
            TextStyle::default(),
        );
        for op in b.ops() {
            if let DrawOp::Text { y, .. } = op {
                assert_ne!(*y, 2, "bottom border row must not be drawn");
            }
        }
    }

    #[test]
    fn thumb_proportional_and_clamped() {
        // viewport 20 of content 100 on a 20-cell track: thumb 4 cells.
        assert_eq!(thumb_geometry(20, 100, 20, 0), (0, 4));
        assert_eq!(thumb_geometry(20, 100, 20, 80), (16, 4));
        // No overflow: thumb fills the track.
        assert_eq!(thumb_geometry(10, 5, 20, 0), (0, 10));
    }

    #[test]
    fn tiny_track_omits_scrollbar() {
        let mut b = DrawlistBuilder::new();
        draw_vscrollbar(&mut b, 0, 0, 0, 100, 10, 0, TextStyle::default());
        assert_eq!(b.op_count(), 0);
    }
}
