//! End-to-end flex distribution scenarios through the public layout API.

use core_geometry::Axis;
use core_layout::LayoutEngine;
use core_node::{Dim, LayoutProps, NodeArena, NodeId, Props, SpacerProps, StackProps, VNode};

fn spacer(arena: &mut NodeArena, w: i32, h: i32, layout: LayoutProps) -> NodeId {
    arena.alloc(VNode::new(Props::Spacer(SpacerProps { w, h })).with_layout(layout))
}

fn flex_child(arena: &mut NodeArena, grow: u32) -> NodeId {
    spacer(
        arena,
        0,
        1,
        LayoutProps {
            grow,
            ..LayoutProps::default()
        },
    )
}

fn row(arena: &mut NodeArena, children: Vec<NodeId>) -> NodeId {
    arena.alloc(VNode::new(Props::Row(StackProps::default())).with_children(children))
}

fn child_widths(tree: &core_layout::LayoutNode) -> Vec<i32> {
    tree.children.iter().map(|c| c.rect.w).collect()
}

#[test]
fn grow_three_children_ten_cells() {
    let mut arena = NodeArena::new();
    let a = flex_child(&mut arena, 1);
    let b = flex_child(&mut arena, 2);
    let c = flex_child(&mut arena, 1);
    let root = row(&mut arena, vec![a, b, c]);
    let mut engine = LayoutEngine::new();
    let tree = engine
        .layout(&arena, root, 0, 0, 10, 5, Axis::Horizontal, None)
        .unwrap();
    // Ideal shares 2.5/5/2.5; the leftover cell goes to the lowest index
    // among the tied fractions.
    assert_eq!(child_widths(&tree), vec![3, 5, 2]);
    assert_eq!(child_widths(&tree).iter().sum::<i32>(), 10);
}

#[test]
fn grow_respects_max_and_redistributes() {
    let mut arena = NodeArena::new();
    let a = spacer(
        &mut arena,
        0,
        1,
        LayoutProps {
            grow: 1,
            max_w: Some(3),
            ..LayoutProps::default()
        },
    );
    let b = flex_child(&mut arena, 1);
    let root = row(&mut arena, vec![a, b]);
    let mut engine = LayoutEngine::new();
    let tree = engine
        .layout(&arena, root, 0, 0, 10, 5, Axis::Horizontal, None)
        .unwrap();
    assert_eq!(child_widths(&tree), vec![3, 7]);
}

#[test]
fn shrink_scaled_by_basis() {
    // Row width 20 with bases 15 and 10, shrink factors 1 and 2:
    // scaled shrinks 15/20, reductions 2/3, final 13/7.
    let mut arena = NodeArena::new();
    let a = spacer(
        &mut arena,
        15,
        1,
        LayoutProps {
            shrink: 1,
            ..LayoutProps::default()
        },
    );
    let b = spacer(
        &mut arena,
        10,
        1,
        LayoutProps {
            shrink: 2,
            ..LayoutProps::default()
        },
    );
    let root = row(&mut arena, vec![a, b]);
    let mut engine = LayoutEngine::new();
    let tree = engine
        .layout(&arena, root, 0, 0, 20, 5, Axis::Horizontal, None)
        .unwrap();
    assert_eq!(child_widths(&tree), vec![13, 7]);
}

#[test]
fn shrink_zero_children_untouched() {
    let mut arena = NodeArena::new();
    let a = spacer(
        &mut arena,
        15,
        1,
        LayoutProps {
            shrink: 0,
            ..LayoutProps::default()
        },
    );
    let b = spacer(&mut arena, 15, 1, LayoutProps::default());
    let root = row(&mut arena, vec![a, b]);
    let mut engine = LayoutEngine::new();
    let tree = engine
        .layout(&arena, root, 0, 0, 20, 5, Axis::Horizontal, None)
        .unwrap();
    assert_eq!(child_widths(&tree), vec![15, 5]);
}

#[test]
fn fixed_children_keep_their_cells() {
    let mut arena = NodeArena::new();
    let fixed = spacer(
        &mut arena,
        0,
        1,
        LayoutProps {
            width: Dim::Cells(4),
            ..LayoutProps::default()
        },
    );
    let flex = flex_child(&mut arena, 1);
    let root = row(&mut arena, vec![fixed, flex]);
    let mut engine = LayoutEngine::new();
    let tree = engine
        .layout(&arena, root, 0, 0, 12, 5, Axis::Horizontal, None)
        .unwrap();
    assert_eq!(child_widths(&tree), vec![4, 8]);
}

#[test]
fn children_positioned_consecutively_with_gap() {
    let mut arena = NodeArena::new();
    let a = spacer(&mut arena, 3, 1, LayoutProps::default());
    let b = spacer(&mut arena, 4, 1, LayoutProps::default());
    let root = arena.alloc(
        VNode::new(Props::Row(StackProps {
            gap: 2,
            ..StackProps::default()
        }))
        .with_children(vec![a, b]),
    );
    let mut engine = LayoutEngine::new();
    let tree = engine
        .layout(&arena, root, 1, 1, 20, 5, Axis::Horizontal, None)
        .unwrap();
    assert_eq!(tree.children[0].rect.x, 1);
    assert_eq!(tree.children[1].rect.x, 1 + 3 + 2);
}
