//! Code editor rendering and frame cursor resolution.

mod common;

use common::{render, render_with, text_ops};
use core_geometry::Rect;
use core_node::{
    CodeEditorProps, CursorInfo, FocusState, InputProps, NodeArena, Props, StackProps, VNode,
};

#[test]
fn editor_cursor_lands_past_the_gutter() {
    let mut arena = NodeArena::new();
    let editor = arena.alloc(VNode::new(Props::CodeEditor(CodeEditorProps {
        lines: vec!["abc".into(), "defg".into()],
        cursor: Some((1, 2)),
        show_line_numbers: true,
        highlight_cursor_cell: true,
        ..CodeEditorProps::default()
    })));
    let root = arena.alloc(
        VNode::new(Props::Column(StackProps::default())).with_children(vec![editor]),
    );
    let (_, outcome) = render(&arena, root, Rect::new(0, 0, 40, 10), None);
    let cursor = outcome.cursor.expect("editor resolves a cursor");
    // Gutter for 2 lines is one digit plus a separator column.
    assert_eq!((cursor.x, cursor.y), (2 + 2, 1));
}

#[test]
fn editor_scroll_shifts_cursor_row() {
    let mut arena = NodeArena::new();
    let editor = arena.alloc(VNode::new(Props::CodeEditor(CodeEditorProps {
        lines: (0..50).map(|i| format!("line {i}")).collect(),
        cursor: Some((30, 0)),
        scroll_top: 30,
        show_line_numbers: false,
        ..CodeEditorProps::default()
    })));
    let root = arena.alloc(
        VNode::new(Props::Column(StackProps::default())).with_children(vec![editor]),
    );
    let (ops, outcome) = render(&arena, root, Rect::new(0, 0, 40, 10), None);
    let cursor = outcome.cursor.expect("cursor visible after scroll");
    assert_eq!((cursor.x, cursor.y), (0, 0));
    // The first visible row is the scrolled-to line.
    assert!(text_ops(&ops).iter().any(|(_, y, t)| *y == 0 && t.contains("line 30")));
    assert!(!text_ops(&ops).iter().any(|(_, _, t)| t.contains("line 29")));
}

#[test]
fn gutter_numbers_are_one_based() {
    let mut arena = NodeArena::new();
    let editor = arena.alloc(VNode::new(Props::CodeEditor(CodeEditorProps {
        lines: vec!["a".into(), "b".into()],
        show_line_numbers: true,
        ..CodeEditorProps::default()
    })));
    let root = arena.alloc(
        VNode::new(Props::Column(StackProps::default())).with_children(vec![editor]),
    );
    let (ops, _) = render(&arena, root, Rect::new(0, 0, 20, 5), None);
    let texts = text_ops(&ops);
    assert!(texts.iter().any(|(x, y, t)| (*x, *y) == (0, 0) && t == "1 "));
    assert!(texts.iter().any(|(x, y, t)| (*x, *y) == (0, 1) && t == "2 "));
}

#[test]
fn focused_input_claims_cursor_at_grapheme_offset() {
    let mut arena = NodeArena::new();
    let input = arena.alloc(
        VNode::new(Props::Input(InputProps {
            value: "hello".into(),
            ..InputProps::default()
        }))
        .with_id("name"),
    );
    let root = arena.alloc(
        VNode::new(Props::Column(StackProps::default())).with_children(vec![input]),
    );
    let focus = FocusState::focused("name");
    let mut cursor_info = CursorInfo::default();
    // mirror_tree assigns instance id 1 to the root, 2 to the input.
    cursor_info.cursor_by_instance.insert(2, 2);
    let (_, outcome) = render_with(
        &arena,
        root,
        Rect::new(0, 0, 30, 3),
        None,
        &focus,
        &cursor_info,
    );
    let cursor = outcome.cursor.expect("focused input claims the cursor");
    assert_eq!((cursor.x, cursor.y), (2, 0));
}

#[test]
fn unfocused_input_claims_nothing() {
    let mut arena = NodeArena::new();
    let input = arena.alloc(
        VNode::new(Props::Input(InputProps {
            value: "hello".into(),
            ..InputProps::default()
        }))
        .with_id("name"),
    );
    let root = arena.alloc(
        VNode::new(Props::Column(StackProps::default())).with_children(vec![input]),
    );
    let (_, outcome) = render(&arena, root, Rect::new(0, 0, 30, 3), None);
    assert!(outcome.cursor.is_none());
}

#[test]
fn last_written_claim_wins() {
    let mut arena = NodeArena::new();
    let editor = arena.alloc(VNode::new(Props::CodeEditor(CodeEditorProps {
        lines: vec!["code".into()],
        cursor: Some((0, 1)),
        show_line_numbers: false,
        ..CodeEditorProps::default()
    })));
    let input = arena.alloc(
        VNode::new(Props::Input(InputProps {
            value: "query".into(),
            ..InputProps::default()
        }))
        .with_id("search"),
    );
    let root = arena.alloc(
        VNode::new(Props::Column(StackProps::default())).with_children(vec![editor, input]),
    );
    let focus = FocusState::focused("search");
    let (_, outcome) = render_with(
        &arena,
        root,
        Rect::new(0, 0, 30, 5),
        None,
        &focus,
        &CursorInfo::default(),
    );
    let cursor = outcome.cursor.expect("cursor resolved");
    // The input renders after the editor, so its claim stands.
    assert_eq!(cursor.y, 1);
}
