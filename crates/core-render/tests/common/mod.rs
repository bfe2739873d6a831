//! Shared scaffolding: lay out a descriptor tree, mirror a runtime tree,
//! render one frame, hand back the op list.

use core_geometry::{Axis, Rect};
use core_layout::LayoutEngine;
use core_node::{CursorInfo, FocusState, NodeArena, NodeId, RuntimeInstance};
use core_render::{DrawOp, DrawlistBuilder, RenderOutcome, RenderParams, build_id_rect_index,
    render_to_drawlist};
use core_theme::Theme;

pub fn render(
    arena: &NodeArena,
    root: NodeId,
    viewport: Rect,
    damage: Option<Rect>,
) -> (Vec<DrawOp>, RenderOutcome) {
    render_with(
        arena,
        root,
        viewport,
        damage,
        &FocusState::default(),
        &CursorInfo::default(),
    )
}

pub fn render_with(
    arena: &NodeArena,
    root: NodeId,
    viewport: Rect,
    damage: Option<Rect>,
    focus: &FocusState,
    cursor_info: &CursorInfo,
) -> (Vec<DrawOp>, RenderOutcome) {
    let mut engine = LayoutEngine::new();
    let layout = engine
        .layout(
            arena,
            root,
            viewport.x,
            viewport.y,
            viewport.w,
            viewport.h,
            Axis::Vertical,
            None,
        )
        .expect("layout");
    let runtime = RuntimeInstance::mirror_tree(arena, root).expect("runtime mirror");
    let theme = Theme::default();
    let id_rects = build_id_rect_index(arena, &layout);
    let params = RenderParams {
        arena,
        theme: &theme,
        focus,
        cursor_info,
        id_rects: &id_rects,
        viewport,
        damage,
        tokenizer: None,
    };
    let mut builder = DrawlistBuilder::new();
    let outcome = render_to_drawlist(&mut builder, &runtime, &layout, &params);
    (builder.into_ops(), outcome)
}

/// Text ops only, as `(x, y, content)` triples.
pub fn text_ops(ops: &[DrawOp]) -> Vec<(i32, i32, String)> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Text { x, y, text, .. } => Some((*x, *y, text.clone())),
            _ => None,
        })
        .collect()
}

/// Fill rects only.
pub fn fill_rects(ops: &[DrawOp]) -> Vec<Rect> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::FillRect { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect()
}
