//! Drawlist builder: the primitive surface the renderer emits into.
//!
//! Four operations only: `Text`, `FillRect`, `PushClip`, `PopClip`. The
//! builder owns the clip stack and enforces it at emission time — painters
//! draw freely and out-of-clip cells are discarded here. A wide cluster
//! that straddles a clip edge is dropped whole; partial glyphs never reach
//! the drawlist.
//!
//! Invariants:
//! * `PushClip` records the *effective* clip (intersected with the stack
//!   top), so a consumer can replay ops without tracking nesting.
//! * Drawlist equality is operation-sequence equality; two frames with the
//!   same inputs produce identical op vectors.
//! * Commands preserve ordering; nothing is reordered or merged here.

use core_geometry::Rect;
use core_node::CursorShape;
use core_text::slice_columns;
use core_theme::TextStyle;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: i32,
        y: i32,
        text: String,
        style: TextStyle,
    },
    FillRect {
        rect: Rect,
        style: TextStyle,
    },
    PushClip(Rect),
    PopClip,
}

/// Cursor position resolved during the walk; at most one survives a frame
/// (the last claim written to the builder wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCursor {
    pub x: i32,
    pub y: i32,
    pub shape: CursorShape,
    pub blink: bool,
}

#[derive(Debug, Default)]
pub struct DrawlistBuilder {
    ops: Vec<DrawOp>,
    clips: Vec<Rect>,
}

impl DrawlistBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current effective clip; `None` before the first push (unclipped).
    #[inline]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clips.last().copied()
    }

    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.current_clip() {
            Some(top) => top.intersect(rect),
            None => rect,
        };
        self.clips.push(effective);
        self.ops.push(DrawOp::PushClip(effective));
    }

    pub fn pop_clip(&mut self) {
        if self.clips.pop().is_some() {
            self.ops.push(DrawOp::PopClip);
        }
    }

    /// Write `text` starting at `(x, y)`; wide clusters consume two cells.
    /// Cells outside the clip are discarded (straddling clusters whole).
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        match self.current_clip() {
            None => self.ops.push(DrawOp::Text {
                x,
                y,
                text: text.to_string(),
                style,
            }),
            Some(clip) => {
                if clip.is_empty() || y < clip.y || y >= clip.bottom() || x >= clip.right() {
                    return;
                }
                let skip = (clip.x - x).max(0);
                let take = clip.right() - x.max(clip.x);
                let slice = slice_columns(text, skip, take);
                if slice.text.is_empty() {
                    return;
                }
                self.ops.push(DrawOp::Text {
                    x: x + slice.start_col,
                    y,
                    text: slice.text,
                    style,
                });
            }
        }
    }

    /// Fill a rectangular region; clipped to the current clip.
    pub fn fill_rect(&mut self, rect: Rect, style: TextStyle) {
        let effective = match self.current_clip() {
            Some(clip) => clip.intersect(rect),
            None => rect,
        };
        if effective.is_empty() {
            return;
        }
        self.ops.push(DrawOp::FillRect {
            rect: effective,
            style,
        });
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    pub fn op_count(&self) -> usize {
        self.ops.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> TextStyle {
        TextStyle::default()
    }

    #[test]
    fn unclipped_text_passes_through() {
        let mut b = DrawlistBuilder::new();
        b.draw_text(2, 1, "hi", style());
        assert_eq!(
            b.ops(),
            &[DrawOp::Text {
                x: 2,
                y: 1,
                text: "hi".into(),
                style: style()
            }]
        );
    }

    #[test]
    fn text_clipped_horizontally() {
        let mut b = DrawlistBuilder::new();
        b.push_clip(Rect::new(0, 0, 4, 2));
        b.draw_text(2, 0, "abcdef", style());
        let DrawOp::Text { x, text, .. } = &b.ops()[1] else {
            panic!("expected text op");
        };
        assert_eq!(*x, 2);
        assert_eq!(text, "ab");
    }

    #[test]
    fn text_outside_clip_rows_discarded() {
        let mut b = DrawlistBuilder::new();
        b.push_clip(Rect::new(0, 0, 10, 2));
        b.draw_text(0, 5, "below", style());
        assert_eq!(b.op_count(), 1); // only the PushClip
    }

    #[test]
    fn wide_cluster_straddling_clip_is_dropped_whole() {
        let mut b = DrawlistBuilder::new();
        b.push_clip(Rect::new(1, 0, 4, 1));
        // "界" occupies columns 0..2 and straddles the left clip edge.
        b.draw_text(0, 0, "界ab", style());
        let DrawOp::Text { x, text, .. } = &b.ops()[1] else {
            panic!("expected text op");
        };
        assert_eq!(*x, 2);
        assert_eq!(text, "ab");
    }

    #[test]
    fn nested_clips_intersect() {
        let mut b = DrawlistBuilder::new();
        b.push_clip(Rect::new(0, 0, 10, 10));
        b.push_clip(Rect::new(5, 5, 10, 10));
        assert_eq!(b.current_clip(), Some(Rect::new(5, 5, 5, 5)));
        b.pop_clip();
        assert_eq!(b.current_clip(), Some(Rect::new(0, 0, 10, 10)));
    }

    #[test]
    fn fill_rect_clipped_and_empty_dropped() {
        let mut b = DrawlistBuilder::new();
        b.push_clip(Rect::new(0, 0, 4, 4));
        b.fill_rect(Rect::new(2, 2, 10, 10), style());
        assert_eq!(
            b.ops()[1],
            DrawOp::FillRect {
                rect: Rect::new(2, 2, 2, 2),
                style: style()
            }
        );
        b.fill_rect(Rect::new(20, 20, 3, 3), style());
        assert_eq!(b.op_count(), 2);
    }

    #[test]
    fn pop_on_empty_stack_is_ignored() {
        let mut b = DrawlistBuilder::new();
        b.pop_clip();
        assert_eq!(b.op_count(), 0);
    }
}
