//! Damage-driven pruning: subtrees disjoint from the damage rect emit
//! nothing and are never enqueued.

mod common;

use common::{render, text_ops};
use core_geometry::Rect;
use core_node::{NodeArena, NodeId, Props, StackProps, TextProps, VNode};
use core_render::DrawOp;

fn text(arena: &mut NodeArena, content: &str) -> NodeId {
    arena.alloc(VNode::new(Props::Text(TextProps {
        content: content.into(),
        ..TextProps::default()
    })))
}

#[test]
fn thousand_child_column_repaints_one_row() {
    let mut arena = NodeArena::new();
    let children: Vec<_> = (0..1000).map(|i| text(&mut arena, &format!("row {i}"))).collect();
    let root = arena.alloc(VNode::new(Props::Column(StackProps::default())).with_children(children));

    let viewport = Rect::new(0, 0, 20, 1000);
    let damage = Rect::new(0, 742, 20, 1);
    let (ops, _) = render(&arena, root, viewport, Some(damage));

    let texts = text_ops(&ops);
    assert_eq!(texts.len(), 1, "exactly one uniform row intersects damage");
    assert_eq!(texts[0], (0, 742, "row 742".to_string()));
}

#[test]
fn damage_spanning_rows_repaints_the_span() {
    let mut arena = NodeArena::new();
    let children: Vec<_> = (0..100).map(|i| text(&mut arena, &format!("row {i}"))).collect();
    let root = arena.alloc(VNode::new(Props::Column(StackProps::default())).with_children(children));

    let (ops, _) = render(
        &arena,
        root,
        Rect::new(0, 0, 20, 100),
        Some(Rect::new(0, 10, 20, 3)),
    );
    let texts = text_ops(&ops);
    assert_eq!(texts.len(), 3);
    assert_eq!(texts[0].2, "row 10");
    assert_eq!(texts[2].2, "row 12");
}

#[test]
fn disjoint_damage_emits_no_primitives() {
    let mut arena = NodeArena::new();
    let child = text(&mut arena, "content");
    let root = arena.alloc(
        VNode::new(Props::Column(StackProps::default())).with_children(vec![child]),
    );
    let (ops, _) = render(
        &arena,
        root,
        Rect::new(0, 0, 20, 5),
        Some(Rect::new(0, 100, 20, 5)),
    );
    // Only the frame clip bracket remains.
    assert!(
        ops.iter()
            .all(|op| matches!(op, DrawOp::PushClip(_) | DrawOp::PopClip)),
        "damage-disjoint tree must not draw: {ops:?}"
    );
}

#[test]
fn no_damage_paints_everything() {
    let mut arena = NodeArena::new();
    let children: Vec<_> = (0..10).map(|i| text(&mut arena, &format!("row {i}"))).collect();
    let root = arena.alloc(VNode::new(Props::Column(StackProps::default())).with_children(children));
    let (ops, _) = render(&arena, root, Rect::new(0, 0, 20, 10), None);
    assert_eq!(text_ops(&ops).len(), 10);
}
