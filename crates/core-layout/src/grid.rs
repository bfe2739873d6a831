//! Grid containers: track derivation and row-major placement.
//!
//! Column count comes from the `columns` prop — an explicit count or a
//! track spec whose token count is used (token contents are not
//! interpreted). Column widths are the max of child natural widths placed
//! in that column; row heights likewise. With explicit `rows`, capacity is
//! `columns · rows` and children beyond capacity are dropped from layout
//! (dev warning); otherwise the row count is inferred from the placed
//! child count.

use std::rc::Rc;

use core_geometry::{Axis, Rect, Size, clamp_cells};
use core_node::{GridProps, GridTracks, NodeId, Position, Props};
use tracing::warn;

use crate::engine::{LayoutEngine, Pass};
use crate::error::LayoutError;
use crate::tree::LayoutNode;

pub(crate) struct ResolvedGrid {
    pub col_widths: Vec<i32>,
    pub row_heights: Vec<i32>,
    pub col_gap: i32,
    pub row_gap: i32,
    /// `(child index, id, col, row)` for each placed child.
    pub placed: Vec<(usize, NodeId, usize, usize)>,
}

impl ResolvedGrid {
    fn total_size(&self) -> Size {
        let w: i64 = self.col_widths.iter().map(|&w| w as i64).sum::<i64>()
            + self.col_gap as i64 * self.col_widths.len().saturating_sub(1) as i64;
        let h: i64 = self.row_heights.iter().map(|&h| h as i64).sum::<i64>()
            + self.row_gap as i64 * self.row_heights.len().saturating_sub(1) as i64;
        Size::new(clamp_cells(w), clamp_cells(h))
    }
}

/// Number of columns a track prop denotes.
pub fn column_count(tracks: &GridTracks) -> Result<usize, String> {
    match tracks {
        GridTracks::Count(n) if *n >= 1 => Ok(*n as usize),
        GridTracks::Count(n) => Err(format!("grid column count must be >= 1, got {n}")),
        GridTracks::Spec(spec) => {
            let count = spec
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty())
                .count();
            if count == 0 {
                Err("empty grid track spec".to_string())
            } else {
                Ok(count)
            }
        }
    }
}

impl LayoutEngine {
    pub(crate) fn measure_grid(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        avail_w: i32,
        avail_h: i32,
    ) -> Result<Size, LayoutError> {
        let grid = self.resolve_grid(pass, id, avail_w, avail_h)?;
        Ok(grid.total_size())
    }

    pub(crate) fn layout_grid(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Result<Rc<LayoutNode>, LayoutError> {
        let rect = Rect::new(x, y, w, h);
        let grid = self.resolve_grid(pass, id, w, h)?;

        // Track origins, cumulative with gaps.
        let mut col_x = Vec::with_capacity(grid.col_widths.len());
        let mut cx = x;
        for &cw in &grid.col_widths {
            col_x.push(cx);
            cx = cx + cw + grid.col_gap;
        }
        let mut row_y = Vec::with_capacity(grid.row_heights.len());
        let mut cy = y;
        for &rh in &grid.row_heights {
            row_y.push(cy);
            cy = cy + rh + grid.row_gap;
        }

        let mut children = Vec::with_capacity(grid.placed.len());
        for &(idx, child_id, col, row) in &grid.placed {
            let span = pass
                .arena
                .get(child_id)
                .map(|c| c.layout.col_span.max(1) as usize)
                .unwrap_or(1);
            let last = (col + span - 1).min(grid.col_widths.len() - 1);
            let cell_w: i32 = grid.col_widths[col..=last].iter().sum::<i32>()
                + grid.col_gap * (last - col) as i32;
            let cell_h = grid.row_heights[row];
            pass.path.push(idx);
            let node = self.layout_node(
                pass,
                child_id,
                col_x[col],
                row_y[row],
                cell_w,
                cell_h,
                None,
                None,
                Axis::Vertical,
            )?;
            pass.path.pop();
            children.push(node);
        }
        self.layout_absolute_children(pass, id, rect, &mut children)?;
        Ok(LayoutNode::branch(id, rect, children))
    }

    fn resolve_grid(
        &mut self,
        pass: &mut Pass<'_>,
        id: NodeId,
        avail_w: i32,
        avail_h: i32,
    ) -> Result<ResolvedGrid, LayoutError> {
        let arena = pass.arena;
        let vnode = arena.get(id).expect("caller resolved id");
        let Props::Grid(props) = &vnode.props else {
            unreachable!("grid family routed a non-grid kind");
        };
        let cols = column_count(&props.columns).map_err(|detail| pass.invalid(detail))?;
        validate_grid_props(pass, props)?;
        let col_gap = props.column_gap.unwrap_or(props.gap).max(0);
        let row_gap = props.row_gap.unwrap_or(props.gap).max(0);
        let capacity = props.rows.map(|r| cols * r.max(0) as usize);

        let mut placed = Vec::new();
        let mut dropped = 0usize;
        let mut cursor = 0usize;
        for (idx, &child_id) in vnode.children.iter().enumerate() {
            let Some(child) = arena.get(child_id) else {
                pass.path.push(idx);
                return Err(pass.invalid("dangling child id"));
            };
            if !child.layout.display || child.layout.position == Position::Absolute {
                continue;
            }
            let slot = match (child.layout.grid_col, child.layout.grid_row) {
                (Some(c), Some(r)) if c >= 0 && r >= 0 => {
                    Some((c as usize).min(cols - 1) + (r as usize) * cols)
                }
                _ => {
                    let s = cursor;
                    cursor += 1;
                    Some(s)
                }
            };
            let Some(slot) = slot else { continue };
            if let Some(cap) = capacity
                && slot >= cap
            {
                dropped += 1;
                continue;
            }
            placed.push((idx, child_id, slot % cols, slot / cols));
        }
        if dropped > 0 {
            warn!(dropped, "grid children beyond explicit capacity dropped");
        }

        let row_count = match props.rows {
            Some(r) => r.max(0) as usize,
            None => placed
                .iter()
                .map(|&(_, _, _, r)| r + 1)
                .max()
                .unwrap_or(0),
        };

        let mut col_widths = vec![0i32; cols];
        let mut row_heights = vec![0i32; row_count];
        for &(idx, child_id, col, row) in &placed {
            pass.path.push(idx);
            let size = self.measure_node(pass, child_id, avail_w, avail_h, Axis::Vertical)?;
            pass.path.pop();
            col_widths[col] = col_widths[col].max(size.w);
            if row < row_heights.len() {
                row_heights[row] = row_heights[row].max(size.h);
            }
        }

        Ok(ResolvedGrid {
            col_widths,
            row_heights,
            col_gap,
            row_gap,
            placed,
        })
    }
}

fn validate_grid_props(pass: &Pass<'_>, props: &GridProps) -> Result<(), LayoutError> {
    if let Some(rows) = props.rows
        && rows < 0
    {
        return Err(pass.invalid(format!("negative grid rows {rows}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_tracks() {
        assert_eq!(column_count(&GridTracks::Count(3)), Ok(3));
        assert!(column_count(&GridTracks::Count(0)).is_err());
    }

    #[test]
    fn spec_tracks_count_tokens_only() {
        assert_eq!(column_count(&GridTracks::Spec("a b c".into())), Ok(3));
        assert_eq!(column_count(&GridTracks::Spec("1fr, 2fr".into())), Ok(2));
        assert_eq!(column_count(&GridTracks::Spec("  x   y ".into())), Ok(2));
        assert!(column_count(&GridTracks::Spec("   ".into())).is_err());
    }
}
