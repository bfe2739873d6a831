//! Frame-level pipeline behavior: overlay compositing, wrapper
//! transparency and drawlist idempotence.

mod common;

use common::{fill_rects, render, text_ops};
use core_geometry::Rect;
use core_node::{
    Backdrop, Dim, LayoutProps, ModalProps, NodeArena, NodeId, Props, StackProps, TextProps, VNode,
};
use core_render::DrawOp;

fn text(arena: &mut NodeArena, content: &str) -> NodeId {
    arena.alloc(VNode::new(Props::Text(TextProps {
        content: content.into(),
        ..TextProps::default()
    })))
}

fn column(arena: &mut NodeArena, children: Vec<NodeId>) -> NodeId {
    arena.alloc(VNode::new(Props::Column(StackProps::default())).with_children(children))
}

#[test]
fn modal_backdrop_surface_then_clipped_children() {
    let mut arena = NodeArena::new();
    let base = text(&mut arena, "base content");
    let body = text(&mut arena, "dialog body");
    let modal = arena.alloc(
        VNode::new(Props::Modal(ModalProps {
            title: Some("Confirm".into()),
            backdrop: Backdrop::Dim,
            width: Some(40),
            height: Some(10),
        }))
        .with_children(vec![body]),
    );
    let base_col = column(&mut arena, vec![base]);
    let root = arena.alloc(VNode::new(Props::Layers).with_children(vec![base_col, modal]));

    let viewport = Rect::new(0, 0, 80, 24);
    let (ops, _) = render(&arena, root, viewport, None);

    // Dim backdrop covers every viewport row with the pattern glyph.
    let texts = text_ops(&ops);
    let backdrop_rows = texts
        .iter()
        .filter(|(x, _, t)| *x == 0 && t.chars().all(|c| c == '░') && t.chars().count() == 80)
        .count();
    assert_eq!(backdrop_rows, 24);

    // Surface is centered and filled before the children are drawn.
    let surface = Rect::new(20, 7, 40, 10);
    assert!(fill_rects(&ops).contains(&surface));
    let interior = Rect::new(21, 8, 38, 8);
    assert!(
        ops.iter()
            .any(|op| matches!(op, DrawOp::PushClip(r) if *r == interior)),
        "children must be clipped to the modal interior"
    );
    // Body text lands inside the interior.
    assert!(
        texts
            .iter()
            .any(|(x, y, t)| t == "dialog body" && *x == 21 && *y == 8)
    );
}

#[test]
fn backdrop_ordering_backdrop_before_surface() {
    let mut arena = NodeArena::new();
    let modal = arena.alloc(VNode::new(Props::Modal(ModalProps {
        backdrop: Backdrop::Opaque,
        width: Some(10),
        height: Some(4),
        ..ModalProps::default()
    })));
    let root = arena.alloc(VNode::new(Props::Layers).with_children(vec![modal]));
    let viewport = Rect::new(0, 0, 40, 12);
    let (ops, _) = render(&arena, root, viewport, None);
    let rects = fill_rects(&ops);
    let backdrop_at = rects.iter().position(|r| *r == viewport).expect("backdrop");
    let surface_at = rects
        .iter()
        .position(|r| *r == Rect::new(15, 4, 10, 4))
        .expect("surface");
    assert!(backdrop_at < surface_at);
}

#[test]
fn transparent_wrapper_adds_no_ops() {
    let mut bare_arena = NodeArena::new();
    let bare = {
        let t = text(&mut bare_arena, "hello");
        column(&mut bare_arena, vec![t])
    };
    let mut wrapped_arena = NodeArena::new();
    let wrapped = {
        let t = text(&mut wrapped_arena, "hello");
        let zone = wrapped_arena.alloc(VNode::new(Props::FocusZone).with_children(vec![t]));
        column(&mut wrapped_arena, vec![zone])
    };
    let viewport = Rect::new(0, 0, 20, 5);
    let (bare_ops, _) = render(&bare_arena, bare, viewport, None);
    let (wrapped_ops, _) = render(&wrapped_arena, wrapped, viewport, None);
    assert_eq!(bare_ops, wrapped_ops);
}

#[test]
fn repeated_frames_emit_identical_drawlists() {
    let mut arena = NodeArena::new();
    let a = text(&mut arena, "one");
    let b = text(&mut arena, "two");
    let root = column(&mut arena, vec![a, b]);
    let viewport = Rect::new(0, 0, 30, 10);
    let (first, _) = render(&arena, root, viewport, None);
    let (second, _) = render(&arena, root, viewport, None);
    assert_eq!(first, second);
}

#[test]
fn display_false_subtree_emits_nothing() {
    let mut arena = NodeArena::new();
    let hidden = arena.alloc(
        VNode::new(Props::Text(TextProps {
            content: "ghost".into(),
            ..TextProps::default()
        }))
        .with_layout(LayoutProps {
            display: false,
            ..LayoutProps::default()
        }),
    );
    let shown = text(&mut arena, "visible");
    let root = column(&mut arena, vec![hidden, shown]);
    let (ops, _) = render(&arena, root, Rect::new(0, 0, 20, 5), None);
    let texts = text_ops(&ops);
    assert!(texts.iter().any(|(_, _, t)| t == "visible"));
    assert!(!texts.iter().any(|(_, _, t)| t == "ghost"));
}

#[test]
fn fixed_width_text_clips_at_cell_budget() {
    let mut arena = NodeArena::new();
    let t = arena.alloc(
        VNode::new(Props::Text(TextProps {
            content: "abcdefgh".into(),
            ..TextProps::default()
        }))
        .with_layout(LayoutProps {
            width: Dim::Cells(4),
            ..LayoutProps::default()
        }),
    );
    let root = column(&mut arena, vec![t]);
    let (ops, _) = render(&arena, root, Rect::new(0, 0, 4, 2), None);
    for (_, _, text) in text_ops(&ops) {
        assert!(text.len() <= 4, "text {text:?} exceeded the clip");
    }
}
