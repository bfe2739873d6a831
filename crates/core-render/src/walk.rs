//! Render walk: explicit stacks, pop-clip sentinel, family dispatch.
//!
//! The walk runs the RuntimeInstance and LayoutTree in parallel, matching
//! children by descriptor identity. Recursion is replaced by an explicit
//! stack whose `PopClip` sentinel closes builder clips exactly when a
//! container's subtree finishes — the pattern keeps clip/style state
//! explicit and immune to recursion depth.
//!
//! Damage pruning happens at dispatch: a node whose translated rect misses
//! the damage rect contributes nothing, and containers additionally prune
//! at enqueue time (binary walk for monotonic stacks, per-child tests
//! elsewhere) so skipped children are never even pushed.

use ahash::AHashSet;
use core_geometry::Rect;
use core_layout::LayoutNode;
use core_node::{
    CursorInfo, FocusState, IdRectIndex, NodeArena, NodeId, NodeKind, Props, RuntimeInstance,
};
use core_theme::{TextStyle, Theme};

use crate::drawlist::{DrawlistBuilder, ResolvedCursor};
use crate::editors::Tokenizer;

pub struct RenderParams<'a> {
    pub arena: &'a NodeArena,
    pub theme: &'a Theme,
    pub focus: &'a FocusState,
    pub cursor_info: &'a CursorInfo,
    pub id_rects: &'a IdRectIndex,
    pub viewport: Rect,
    pub damage: Option<Rect>,
    /// Syntax tokenizer for code editors; the built-in heuristic runs when
    /// absent.
    pub tokenizer: Option<&'a dyn Tokenizer>,
}

#[derive(Debug, Default)]
pub struct RenderOutcome {
    pub cursor: Option<ResolvedCursor>,
}

pub(crate) enum StackEntry<'a> {
    /// Sentinel: close the builder clip opened by the matching container.
    PopClip,
    Node {
        inst: &'a RuntimeInstance,
        layout: &'a LayoutNode,
        style: TextStyle,
        /// Accumulated view-transform offset (scroll, dropdown reposition).
        offset: (i32, i32),
    },
}

pub(crate) struct PaintCtx<'w, 'a> {
    pub builder: &'w mut DrawlistBuilder,
    pub params: &'w RenderParams<'a>,
    pub stack: &'w mut Vec<StackEntry<'a>>,
    pub cursor: &'w mut Option<ResolvedCursor>,
    /// Dedup set for missing-anchor warnings, per `(dropdown, anchor)`.
    pub warned_anchors: &'w mut AHashSet<(String, String)>,
}

impl PaintCtx<'_, '_> {
    /// Claim the frame cursor; the last claim written wins, and claims
    /// outside the current clip are dropped.
    pub fn claim_cursor(&mut self, x: i32, y: i32) {
        if let Some(clip) = self.builder.current_clip()
            && !clip.contains(x, y)
        {
            return;
        }
        *self.cursor = Some(ResolvedCursor {
            x,
            y,
            shape: self.params.cursor_info.shape,
            blink: self.params.cursor_info.blink,
        });
    }
}

/// Walk the trees and emit primitives into `builder`. The builder is the
/// side-effect surface; the returned outcome only carries the resolved
/// cursor.
pub fn render_to_drawlist(
    builder: &mut DrawlistBuilder,
    runtime_root: &RuntimeInstance,
    layout_root: &LayoutNode,
    params: &RenderParams<'_>,
) -> RenderOutcome {
    let mut cursor = None;
    let mut warned_anchors = AHashSet::new();
    let mut stack: Vec<StackEntry<'_>> = Vec::with_capacity(64);

    builder.push_clip(params.viewport);
    stack.push(StackEntry::Node {
        inst: runtime_root,
        layout: layout_root,
        style: TextStyle::fg(params.theme.colors.fg),
        offset: (0, 0),
    });

    while let Some(entry) = stack.pop() {
        let (inst, layout, style, offset) = match entry {
            StackEntry::PopClip => {
                builder.pop_clip();
                continue;
            }
            StackEntry::Node {
                inst,
                layout,
                style,
                offset,
            } => (inst, layout, style, offset),
        };
        let rect = layout.rect.translate(offset.0, offset.1);
        if rect.is_empty() {
            continue;
        }
        if let Some(damage) = params.damage
            && !rect.intersects(damage)
        {
            continue;
        }
        let mut ctx = PaintCtx {
            builder: &mut *builder,
            params,
            stack: &mut stack,
            cursor: &mut cursor,
            warned_anchors: &mut warned_anchors,
        };
        dispatch(&mut ctx, inst, layout, rect, style, offset);
    }
    builder.pop_clip();

    RenderOutcome { cursor }
}

fn dispatch<'a>(
    ctx: &mut PaintCtx<'_, 'a>,
    inst: &'a RuntimeInstance,
    layout: &'a LayoutNode,
    rect: Rect,
    style: TextStyle,
    offset: (i32, i32),
) {
    let Some(vnode) = ctx.params.arena.get(layout.node) else {
        return;
    };
    match vnode.props.kind() {
        // Transparent wrappers pass style and clip through untouched.
        NodeKind::FocusZone | NodeKind::FocusTrap | NodeKind::Layers | NodeKind::Layer => {
            push_children_transparent(ctx, inst, layout, style, offset);
        }
        NodeKind::Themed => {
            let merged = match &vnode.props {
                Props::Themed(p) => p.style.merged_over(style),
                _ => style,
            };
            push_children_transparent(ctx, inst, layout, merged, offset);
        }
        NodeKind::Row | NodeKind::Column | NodeKind::Grid | NodeKind::Box => {
            crate::container::paint_container(ctx, inst, layout, vnode, rect, style, offset);
        }
        NodeKind::SplitPane | NodeKind::PanelGroup | NodeKind::ResizablePanel => {
            crate::container::paint_split(ctx, inst, layout, vnode, rect, style, offset);
        }
        NodeKind::Button
        | NodeKind::Input
        | NodeKind::Select
        | NodeKind::Checkbox
        | NodeKind::RadioGroup
        | NodeKind::Slider => {
            crate::forms::paint_form(ctx, inst, vnode, rect, style);
        }
        NodeKind::Field => {
            crate::forms::paint_field(ctx, inst, layout, vnode, rect, style, offset);
        }
        NodeKind::Sparkline
        | NodeKind::BarChart
        | NodeKind::MiniChart
        | NodeKind::LineChart
        | NodeKind::Scatter
        | NodeKind::Heatmap
        | NodeKind::Gauge
        | NodeKind::Progress => {
            crate::charts::paint_chart(ctx, vnode, rect, style);
        }
        NodeKind::CodeEditor => {
            crate::editors::paint_code_editor(ctx, inst, layout, vnode, rect, style);
        }
        NodeKind::DiffViewer => {
            crate::diff::paint_diff(ctx, layout, vnode, rect, style);
        }
        NodeKind::LogsConsole => {
            crate::logs::paint_logs(ctx, vnode, rect, style);
        }
        NodeKind::Modal
        | NodeKind::Dropdown
        | NodeKind::CommandPalette
        | NodeKind::ToolApprovalDialog
        | NodeKind::ToastContainer => {
            crate::overlay::paint_overlay(ctx, inst, layout, vnode, rect, style, offset);
        }
        NodeKind::Table
        | NodeKind::Tree
        | NodeKind::VirtualList
        | NodeKind::FilePicker
        | NodeKind::FileTreeExplorer
        | NodeKind::Tabs
        | NodeKind::Accordion
        | NodeKind::Breadcrumb
        | NodeKind::Pagination => {
            crate::collections::paint_collection(ctx, inst, layout, vnode, rect, style, offset);
        }
        _ => {
            crate::indicators::paint_indicator(ctx, inst, vnode, rect, style);
        }
    }
}

/// Push all children with no clip change and no own paint.
pub(crate) fn push_children_transparent<'a>(
    ctx: &mut PaintCtx<'_, 'a>,
    inst: &'a RuntimeInstance,
    layout: &'a LayoutNode,
    style: TextStyle,
    offset: (i32, i32),
) {
    for child in layout.children.iter().rev() {
        let Some(child_inst) = runtime_child(inst, child.node, None) else {
            continue;
        };
        ctx.stack.push(StackEntry::Node {
            inst: child_inst,
            layout: child,
            style,
            offset,
        });
    }
}

/// Pair a layout child with its runtime instance by descriptor identity.
/// `hint` is the likely position (avoids the scan in the common case).
pub(crate) fn runtime_child<'a>(
    inst: &'a RuntimeInstance,
    node: NodeId,
    hint: Option<usize>,
) -> Option<&'a RuntimeInstance> {
    if let Some(h) = hint
        && let Some(c) = inst.children.get(h)
        && c.node == node
    {
        return Some(c);
    }
    inst.children.iter().find(|c| c.node == node)
}

/// Pre-walk populating the widget-id → rect index anchored overlays read.
pub fn build_id_rect_index(arena: &NodeArena, layout_root: &LayoutNode) -> IdRectIndex {
    let mut index = IdRectIndex::new();
    let mut stack = vec![layout_root];
    while let Some(node) = stack.pop() {
        if let Some(vnode) = arena.get(node.node)
            && let Some(id) = &vnode.id
        {
            index.insert(id.clone(), node.rect);
        }
        stack.extend(node.children.iter().map(|c| c.as_ref()));
    }
    index
}
