//! Leaf and collection measurement: intrinsic sizes from content.
//!
//! Leaves never recurse; their natural size is a pure function of props and
//! the available extent (wrapping text and callout bodies consult
//! `avail_w`). Collections are leaf-like for layout purposes — their data
//! lives in props, not in child descriptors — but scrollable ones publish
//! viewport metadata from `layout_leafish`.

use std::rc::Rc;

use core_geometry::{Rect, Size};
use core_node::{NodeId, Props};
use core_text::{icon_width, max_content_width, str_width, wrapped_height};

use crate::engine::{LayoutEngine, Pass};
use crate::error::LayoutError;
use crate::tree::{LayoutMeta, LayoutNode};

/// Horizontal label padding per control size (cells per side).
pub(crate) fn control_padding_x(size: core_theme::ControlSize) -> i32 {
    match size {
        core_theme::ControlSize::Sm => 1,
        core_theme::ControlSize::Md => 2,
        core_theme::ControlSize::Lg => 4,
    }
}

const DEFAULT_BAR_WIDTH: i32 = 20;

impl LayoutEngine {
    pub(crate) fn measure_leaf(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        avail_w: i32,
        avail_h: i32,
    ) -> Result<Size, LayoutError> {
        let vnode = pass.arena.get(id).expect("caller resolved id");
        let size = match &vnode.props {
            Props::Text(p) => {
                if p.wrap {
                    let w = max_content_width(&p.content).min(avail_w);
                    Size::new(w, wrapped_height(&p.content, w))
                } else {
                    Size::new(
                        max_content_width(&p.content),
                        p.content.lines().count().max(1) as i32,
                    )
                }
            }
            Props::Button(p) => Size::new(
                str_width(&p.label) + 2 * control_padding_x(p.size),
                1,
            ),
            Props::Input(p) => {
                // Value width or placeholder width, plus the cursor cell.
                let content = str_width(&p.value).max(str_width(&p.placeholder));
                Size::new(content + 1, 1)
            }
            Props::Spacer(p) => {
                if p.w < 0 || p.h < 0 {
                    return Err(pass.invalid("negative spacer size"));
                }
                Size::new(p.w, p.h)
            }
            Props::Divider(p) => {
                if p.vertical {
                    Size::new(1, avail_h)
                } else {
                    Size::new(avail_w, 1)
                }
            }
            Props::Icon(p) => Size::new(icon_width(&p.name), 1),
            Props::Spinner(p) => {
                let label_w = p
                    .label
                    .as_deref()
                    .map(|l| 1 + str_width(l))
                    .unwrap_or(0);
                Size::new(1 + label_w, 1)
            }
            Props::Progress(p) => {
                validate_fraction(pass, p.value, p.max)?;
                let track = p.width.unwrap_or(DEFAULT_BAR_WIDTH);
                let suffix = if p.show_percent { 5 } else { 0 };
                Size::new(track + suffix, 1)
            }
            Props::Skeleton(p) => Size::new(p.w, p.h),
            Props::Badge(p) => Size::new(str_width(&p.label) + 2, 1),
            Props::Status(p) => Size::new(2 + str_width(&p.label), 1),
            Props::Tag(p) => Size::new(str_width(&p.label) + 2, 1),
            Props::Gauge(p) => {
                validate_fraction(pass, p.value, p.max)?;
                let label_w = p
                    .label
                    .as_deref()
                    .map(|l| str_width(l) + 1)
                    .unwrap_or(0);
                Size::new(label_w + p.width.unwrap_or(DEFAULT_BAR_WIDTH) + 2, 1)
            }
            Props::Empty(p) => {
                let msg_w = p.message.as_deref().map(str_width).unwrap_or(0);
                Size::new(
                    str_width(&p.title).max(msg_w),
                    1 + p.message.is_some() as i32,
                )
            }
            Props::ErrorDisplay(p) => {
                let inner = str_width(&p.title)
                    .max(str_width(&p.message))
                    .max(p.details.as_deref().map(max_content_width).unwrap_or(0));
                let detail_lines = p
                    .details
                    .as_deref()
                    .map(|d| d.lines().count() as i32)
                    .unwrap_or(0);
                Size::new(inner + 4, 2 + 2 + detail_lines)
            }
            Props::Callout(p) => {
                let inner_w = str_width(&p.title)
                    .max(max_content_width(&p.body))
                    .min((avail_w - 4).max(0));
                Size::new(inner_w + 4, 2 + 1 + wrapped_height(&p.body, inner_w))
            }
            Props::Sparkline(p) => Size::new(p.values.len() as i32, 1),
            Props::BarChart(p) => {
                let label_w = p.labels.iter().map(|l| str_width(l)).max().unwrap_or(0);
                let bar = DEFAULT_BAR_WIDTH.min((avail_w - label_w - 1).max(1));
                Size::new(label_w + 1 + bar, p.values.len() as i32)
            }
            Props::MiniChart(p) => {
                Size::new(p.width.unwrap_or(p.values.len() as i32), 2)
            }
            Props::Kbd(p) => {
                let keys: i32 = p.keys.iter().map(|k| str_width(k)).sum();
                let seps = p.keys.len().saturating_sub(1) as i32;
                Size::new(keys + seps + 2, 1)
            }
            Props::RichText(p) => {
                let combined: String =
                    p.spans.iter().map(|(s, _)| s.as_str()).collect();
                if p.wrap {
                    let w = max_content_width(&combined).min(avail_w);
                    Size::new(w, wrapped_height(&combined, w))
                } else {
                    Size::new(str_width(&combined), 1)
                }
            }
            Props::Image(p) => Size::new(
                p.rows.iter().map(|r| str_width(r)).max().unwrap_or(0),
                p.rows.len() as i32,
            ),
            Props::Canvas(p) => Size::new(
                p.rows.iter().map(|(r, _)| str_width(r)).max().unwrap_or(0),
                p.rows.len() as i32,
            ),
            Props::Link(p) => Size::new(str_width(&p.label), 1),
            Props::LineChart(p) => {
                let w = p.series.iter().map(|s| s.len()).max().unwrap_or(0) as i32;
                Size::new(w, p.height.unwrap_or(8))
            }
            Props::Scatter(p) => Size::new(
                p.width.unwrap_or(DEFAULT_BAR_WIDTH),
                p.height.unwrap_or(10),
            ),
            Props::Heatmap(p) => Size::new(
                p.rows.iter().map(|r| r.len()).max().unwrap_or(0) as i32,
                p.rows.len() as i32,
            ),
            Props::Select(p) => {
                let widest = p
                    .options
                    .iter()
                    .map(|o| str_width(o))
                    .max()
                    .unwrap_or(0)
                    .max(str_width(&p.placeholder));
                Size::new(widest + 4, 1)
            }
            Props::Checkbox(p) => Size::new(4 + str_width(&p.label), 1),
            Props::RadioGroup(p) => {
                let widest = p.options.iter().map(|o| str_width(o)).max().unwrap_or(0);
                if p.vertical {
                    Size::new(4 + widest, p.options.len() as i32)
                } else {
                    let total: i32 =
                        p.options.iter().map(|o| 4 + str_width(o)).sum();
                    let gaps = p.options.len().saturating_sub(1) as i32 * 2;
                    Size::new(total + gaps, 1)
                }
            }
            Props::Slider(p) => {
                if !p.min.is_finite() || !p.max.is_finite() || p.max < p.min {
                    return Err(pass.invalid("invalid slider range"));
                }
                Size::new(p.width.unwrap_or(DEFAULT_BAR_WIDTH), 1)
            }
            Props::FocusAnnouncer(_) => Size::ZERO,
            other => {
                return Err(pass.invalid(format!(
                    "kind {:?} routed to leaf measurement",
                    other.kind()
                )));
            }
        };
        Ok(size)
    }

    /// Collections measure from their prop data.
    pub(crate) fn measure_collection(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        avail_w: i32,
        avail_h: i32,
    ) -> Result<Size, LayoutError> {
        let vnode = pass.arena.get(id).expect("caller resolved id");
        let size = match &vnode.props {
            Props::Table(p) => {
                let mut w = 0;
                for (ci, col) in p.columns.iter().enumerate() {
                    let cell_max = p
                        .rows
                        .iter()
                        .map(|r| r.get(ci).map(|c| str_width(c)).unwrap_or(0))
                        .max()
                        .unwrap_or(0);
                    w += col.width.unwrap_or(str_width(&col.title).max(cell_max));
                }
                w += p.columns.len().saturating_sub(1) as i32; // column separators
                Size::new(w, 1 + p.rows.len() as i32)
            }
            Props::Tree(p) => Size::new(tree_rows_width(&p.rows), p.rows.len() as i32),
            Props::VirtualList(p) => {
                if p.item_height <= 0 {
                    return Err(pass.invalid("virtual list item height must be positive"));
                }
                Size::new(
                    avail_w,
                    core_geometry::clamp_cells(p.item_count as i64 * p.item_height as i64),
                )
            }
            Props::FilePicker(p) => {
                let widest = p
                    .entries
                    .iter()
                    .map(|e| 2 + str_width(&e.name))
                    .max()
                    .unwrap_or(0)
                    .max(str_width(&p.path));
                Size::new(widest, 1 + p.entries.len() as i32)
            }
            Props::FileTreeExplorer(p) => {
                Size::new(tree_rows_width(&p.rows), p.rows.len() as i32)
            }
            Props::CodeEditor(p) => {
                let gutter = if p.show_line_numbers {
                    gutter_width(p.lines.len())
                } else {
                    0
                };
                let widest = p.lines.iter().map(|l| str_width(l)).max().unwrap_or(0);
                Size::new(gutter + widest, p.lines.len() as i32)
            }
            Props::DiffViewer(p) => {
                let h: i32 = p
                    .hunks
                    .iter()
                    .map(|hk| if hk.collapsed { 1 } else { 1 + hk.lines.len() as i32 })
                    .sum();
                let widest = p
                    .hunks
                    .iter()
                    .flat_map(|hk| hk.lines.iter())
                    .map(|l| 2 + str_width(&l.content))
                    .max()
                    .unwrap_or(0);
                match p.mode {
                    core_node::DiffMode::Unified => Size::new(widest, h),
                    core_node::DiffMode::SideBySide => Size::new(widest * 2 + 1, h),
                }
            }
            Props::LogsConsole(p) => Size::new(avail_w, p.entries.len() as i32),
            other => {
                return Err(pass.invalid(format!(
                    "kind {:?} routed to collection measurement",
                    other.kind()
                )));
            }
        };
        Ok(size.min_with(avail_w, avail_h.max(size.h)))
    }

    /// Position a leaf or collection: no child descriptors, but scrollable
    /// collections publish clamped viewport metadata.
    pub(crate) fn layout_leafish(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Rc<LayoutNode> {
        let rect = Rect::new(x, y, w, h);
        let vnode = pass.arena.get(id).expect("caller resolved id");
        let meta = match &vnode.props {
            Props::CodeEditor(p) => {
                let gutter = if p.show_line_numbers {
                    gutter_width(p.lines.len())
                } else {
                    0
                };
                let content_w =
                    gutter + p.lines.iter().map(|l| str_width(l)).max().unwrap_or(0);
                Some(scroll_meta(
                    p.scroll_left,
                    p.scroll_top as i32,
                    content_w,
                    p.lines.len() as i32,
                    w,
                    h,
                ))
            }
            Props::VirtualList(p) => Some(scroll_meta(
                0,
                p.scroll_top,
                w,
                core_geometry::clamp_cells(p.item_count as i64 * p.item_height.max(1) as i64),
                w,
                h,
            )),
            Props::LogsConsole(p) => Some(scroll_meta(
                0,
                p.scroll_top,
                w,
                p.entries.len() as i32,
                w,
                h,
            )),
            Props::DiffViewer(p) => {
                let content_h: i32 = p
                    .hunks
                    .iter()
                    .map(|hk| if hk.collapsed { 1 } else { 1 + hk.lines.len() as i32 })
                    .sum();
                Some(scroll_meta(0, p.scroll_top, w, content_h, w, h))
            }
            _ => None,
        };
        match meta {
            Some(meta) => LayoutNode::with_meta(id, rect, Vec::new(), meta),
            None => LayoutNode::leaf(id, rect),
        }
    }
}

/// Line-number gutter width: digits of the largest line number plus one
/// separator column.
pub fn gutter_width(line_count: usize) -> i32 {
    let mut digits = 1;
    let mut n = line_count.max(1);
    while n >= 10 {
        digits += 1;
        n /= 10;
    }
    digits + 1
}

fn tree_rows_width(rows: &[core_node::TreeRow]) -> i32 {
    rows.iter()
        .map(|r| r.depth.max(0) * 2 + 2 + str_width(&r.label))
        .max()
        .unwrap_or(0)
}

fn scroll_meta(
    scroll_x: i32,
    scroll_y: i32,
    content_w: i32,
    content_h: i32,
    viewport_w: i32,
    viewport_h: i32,
) -> LayoutMeta {
    LayoutMeta {
        scroll_x: scroll_x.clamp(0, (content_w - viewport_w).max(0)),
        scroll_y: scroll_y.clamp(0, (content_h - viewport_h).max(0)),
        content_w,
        content_h,
        viewport_w,
        viewport_h,
        nav_index: None,
    }
}

fn validate_fraction(pass: &Pass<'_>, value: f64, max: f64) -> Result<(), LayoutError> {
    if !value.is_finite() || !max.is_finite() || max <= 0.0 {
        return Err(pass.invalid("invalid progress range"));
    }
    Ok(())
}
