//! Containment, determinism, cache faithfulness and boundary behaviors.

use core_geometry::{Axis, Rect};
use core_layout::{FrameCaches, LayoutEngine, LayoutNode};
use core_node::{
    BoxProps, GridProps, GridTracks, LayoutProps, NodeArena, NodeId, Overflow, Props, SpacerProps,
    StackProps, TextProps, VNode,
};
use core_theme::BorderKind;
use std::rc::Rc;

fn text(arena: &mut NodeArena, content: &str) -> NodeId {
    arena.alloc(VNode::new(Props::Text(TextProps {
        content: content.into(),
        ..TextProps::default()
    })))
}

fn spacer(arena: &mut NodeArena, w: i32, h: i32) -> NodeId {
    arena.alloc(VNode::new(Props::Spacer(SpacerProps { w, h })))
}

fn column(arena: &mut NodeArena, props: StackProps, children: Vec<NodeId>) -> NodeId {
    arena.alloc(VNode::new(Props::Column(props)).with_children(children))
}

fn assert_contained(node: &Rc<LayoutNode>, bounds: Rect) {
    assert_eq!(
        node.rect.intersect(bounds),
        node.rect,
        "rect {:?} escapes {:?}",
        node.rect,
        bounds
    );
}

#[test]
fn root_rect_contained_in_constraint_box() {
    let mut arena = NodeArena::new();
    let a = text(&mut arena, "hello");
    let b = text(&mut arena, "world");
    let root = column(&mut arena, StackProps::default(), vec![a, b]);
    let mut engine = LayoutEngine::new();
    let tree = engine
        .layout(&arena, root, 2, 3, 40, 10, Axis::Vertical, None)
        .unwrap();
    assert_contained(&tree, Rect::new(2, 3, 40, 10));
    for child in &tree.children {
        assert_contained(child, tree.rect);
    }
}

#[test]
fn layout_is_deterministic() {
    let mut arena = NodeArena::new();
    let children: Vec<_> = (0..5).map(|i| text(&mut arena, &format!("row {i}"))).collect();
    let root = column(&mut arena, StackProps::default(), children);
    let mut engine = LayoutEngine::new();
    let a = engine
        .layout(&arena, root, 0, 0, 30, 10, Axis::Vertical, None)
        .unwrap();
    let b = engine
        .layout(&arena, root, 0, 0, 30, 10, Axis::Vertical, None)
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn warm_cache_equals_cold_result() {
    let mut arena = NodeArena::new();
    let children: Vec<_> = (0..4).map(|i| text(&mut arena, &format!("item {i}"))).collect();
    let root = column(&mut arena, StackProps::default(), children);

    let mut cold_engine = LayoutEngine::new();
    let cold = cold_engine
        .layout(&arena, root, 0, 0, 30, 10, Axis::Vertical, None)
        .unwrap();

    let mut caches = FrameCaches::new();
    let mut engine = LayoutEngine::new();
    let first = engine
        .layout(&arena, root, 0, 0, 30, 10, Axis::Vertical, Some(&mut caches))
        .unwrap();
    let warm = engine
        .layout(&arena, root, 0, 0, 30, 10, Axis::Vertical, Some(&mut caches))
        .unwrap();
    assert_eq!(*cold, *warm);
    // The warm read hands back the stored subtree, not a rebuild.
    assert!(Rc::ptr_eq(&first, &warm));
}

#[test]
fn dirty_node_bypasses_cache_read() {
    let mut arena = NodeArena::new();
    let child = text(&mut arena, "x");
    let root = column(&mut arena, StackProps::default(), vec![child]);
    let mut caches = FrameCaches::new();
    let mut engine = LayoutEngine::new();
    let first = engine
        .layout(&arena, root, 0, 0, 30, 10, Axis::Vertical, Some(&mut caches))
        .unwrap();
    caches.dirty.mark(root);
    let second = engine
        .layout(&arena, root, 0, 0, 30, 10, Axis::Vertical, Some(&mut caches))
        .unwrap();
    assert!(!Rc::ptr_eq(&first, &second), "dirty root must re-layout");
    assert_eq!(*first, *second);
}

#[test]
fn zero_viewport_collapses_rects() {
    let mut arena = NodeArena::new();
    let a = text(&mut arena, "hello");
    let root = column(&mut arena, StackProps::default(), vec![a]);
    let mut engine = LayoutEngine::new();
    let tree = engine
        .layout(&arena, root, 0, 0, 0, 10, Axis::Vertical, None)
        .unwrap();
    assert_eq!(tree.rect.w, 0);
    for child in &tree.children {
        assert_eq!(child.rect.w, 0);
    }
}

#[test]
fn box_natural_size_border_around_text() {
    let mut arena = NodeArena::new();
    let content = text(&mut arena, "hi");
    let root = arena.alloc(
        VNode::new(Props::Box(BoxProps {
            border: BorderKind::Single,
            ..BoxProps::default()
        }))
        .with_children(vec![content]),
    );
    let mut engine = LayoutEngine::new();
    let size = engine.measure(&arena, root, 80, 24, Axis::Vertical).unwrap();
    assert_eq!((size.w, size.h), (4, 3));
}

#[test]
fn grid_track_spec_infers_rows() {
    // Three named tracks, seven 4×1 children: 3 columns of width 4,
    // ⌈7/3⌉ = 3 rows.
    let mut arena = NodeArena::new();
    let children: Vec<_> = (0..7).map(|_| spacer(&mut arena, 4, 1)).collect();
    let root = arena.alloc(
        VNode::new(Props::Grid(GridProps {
            columns: GridTracks::Spec("a b c".into()),
            ..GridProps::default()
        }))
        .with_children(children),
    );
    let mut engine = LayoutEngine::new();
    let size = engine.measure(&arena, root, 80, 24, Axis::Vertical).unwrap();
    assert_eq!((size.w, size.h), (12, 3));
}

#[test]
fn grid_explicit_capacity_drops_overflowing_children() {
    let mut arena = NodeArena::new();
    let children: Vec<_> = (0..8).map(|_| spacer(&mut arena, 2, 1)).collect();
    let root = arena.alloc(
        VNode::new(Props::Grid(GridProps {
            columns: GridTracks::Count(3),
            rows: Some(2),
            ..GridProps::default()
        }))
        .with_children(children),
    );
    let mut engine = LayoutEngine::new();
    let tree = engine
        .layout(&arena, root, 0, 0, 80, 24, Axis::Vertical, None)
        .unwrap();
    assert_eq!(tree.children.len(), 6);
    // Row-major order: fourth child starts the second row.
    assert_eq!(tree.children[3].rect.y, 1);
    assert_eq!(tree.children[3].rect.x, 0);
}

#[test]
fn grid_gaps_default_to_gap_and_split_by_axis() {
    let mut arena = NodeArena::new();
    let children: Vec<_> = (0..4).map(|_| spacer(&mut arena, 2, 1)).collect();
    let root = arena.alloc(
        VNode::new(Props::Grid(GridProps {
            columns: GridTracks::Count(2),
            gap: 1,
            column_gap: Some(3),
            ..GridProps::default()
        }))
        .with_children(children),
    );
    let mut engine = LayoutEngine::new();
    let size = engine.measure(&arena, root, 80, 24, Axis::Vertical).unwrap();
    // Columns: 2 + 3 + 2; rows: 1 + 1 + 1.
    assert_eq!((size.w, size.h), (7, 3));
}

#[test]
fn scroll_offsets_clamp_to_content() {
    let mut arena = NodeArena::new();
    let children: Vec<_> = (0..100).map(|_| spacer(&mut arena, 5, 1)).collect();
    let root = column(
        &mut arena,
        StackProps {
            overflow: Overflow::Scroll,
            scroll_y: 9999,
            ..StackProps::default()
        },
        children,
    );
    let mut engine = LayoutEngine::new();
    let tree = engine
        .layout(&arena, root, 0, 0, 40, 20, Axis::Vertical, None)
        .unwrap();
    let meta = tree.meta.expect("scroll container publishes meta");
    assert_eq!(meta.content_h, 100);
    assert_eq!(meta.viewport_h, 20);
    assert_eq!(meta.scroll_y, 80);
}

#[test]
fn scrollbar_track_reserved_on_overflow() {
    let mut arena = NodeArena::new();
    let children: Vec<_> = (0..50).map(|_| spacer(&mut arena, 10, 1)).collect();
    let root = arena.alloc(
        VNode::new(Props::Column(StackProps {
            overflow: Overflow::Scroll,
            ..StackProps::default()
        }))
        .with_layout(LayoutProps {
            width: core_node::Dim::Full,
            height: core_node::Dim::Full,
            ..LayoutProps::default()
        })
        .with_children(children),
    );
    let mut engine = LayoutEngine::new();
    let tree = engine
        .layout(&arena, root, 0, 0, 40, 20, Axis::Vertical, None)
        .unwrap();
    let meta = tree.meta.unwrap();
    assert_eq!(meta.viewport_w, 39, "one column reserved for the scrollbar");
    assert_eq!(meta.viewport_h, 20);
}

#[test]
fn measure_bounded_by_constraints() {
    let mut arena = NodeArena::new();
    let root = text(&mut arena, "a rather long line of text that overflows");
    let mut engine = LayoutEngine::new();
    for (w, h) in [(0, 0), (1, 1), (7, 3), (80, 24)] {
        let size = engine.measure(&arena, root, w, h, Axis::Vertical).unwrap();
        assert!(size.w <= w && size.h <= h, "measure exceeded ({w},{h})");
    }
}
