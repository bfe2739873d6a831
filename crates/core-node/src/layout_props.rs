//! Per-node layout constraints interpreted by the layout engine.
//!
//! `Dim` carries two legacy variants (`Percent`, `Responsive`) that the
//! engine's public entry points reject with a path locator. They exist so
//! descriptor builders migrating from the old constraint encodings fail
//! loudly at layout time instead of being silently coerced.
//!
//! Invariants:
//! * `LayoutProps::default()` is the fully-automatic node: auto size, no
//!   grow, shrink 1, static position, displayed.
//! * `grow`/`shrink` are non-negative by construction (unsigned).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Sm,
    Md,
    Lg,
    Xl,
}

/// A size constraint along one axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Dim {
    /// Natural content size.
    #[default]
    Auto,
    /// Fill the available extent.
    Full,
    /// Fixed cell count.
    Cells(i32),
    /// Legacy percentage encoding; rejected by the engine.
    Percent(f32),
    /// Legacy responsive-map encoding; rejected by the engine.
    Responsive(Vec<(Breakpoint, i32)>),
}

impl Dim {
    /// True for the legacy encodings the engine refuses.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Dim::Percent(_) | Dim::Responsive(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Position {
    #[default]
    Static,
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Justify {
    #[default]
    Start,
    End,
    Center,
    Between,
    Evenly,
    Around,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutProps {
    pub width: Dim,
    pub height: Dim,
    pub min_w: Option<i32>,
    pub max_w: Option<i32>,
    pub min_h: Option<i32>,
    pub max_h: Option<i32>,
    /// Flex grow factor.
    pub grow: u32,
    /// Flex shrink factor.
    pub shrink: u32,
    /// Main-axis basis override, in cells.
    pub basis: Option<i32>,
    /// Width / height ratio.
    pub aspect_ratio: Option<f32>,
    pub align_self: Option<Align>,
    pub position: Position,
    pub top: Option<i32>,
    pub right: Option<i32>,
    pub bottom: Option<i32>,
    pub left: Option<i32>,
    /// Explicit grid placement (0-based), row-major auto-placement otherwise.
    pub grid_col: Option<i32>,
    pub grid_row: Option<i32>,
    pub col_span: u32,
    pub row_span: u32,
    /// `false` measures the node as zero-size and skips paint.
    pub display: bool,
}

impl Default for LayoutProps {
    fn default() -> Self {
        Self {
            width: Dim::Auto,
            height: Dim::Auto,
            min_w: None,
            max_w: None,
            min_h: None,
            max_h: None,
            grow: 0,
            shrink: 1,
            basis: None,
            aspect_ratio: None,
            align_self: None,
            position: Position::Static,
            top: None,
            right: None,
            bottom: None,
            left: None,
            grid_col: None,
            grid_row: None,
            col_span: 1,
            row_span: 1,
            display: true,
        }
    }
}

impl LayoutProps {
    /// Either axis uses a legacy encoding.
    pub fn has_legacy_dim(&self) -> bool {
        self.width.is_legacy() || self.height.is_legacy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_fully_automatic() {
        let p = LayoutProps::default();
        assert_eq!(p.width, Dim::Auto);
        assert_eq!(p.grow, 0);
        assert_eq!(p.shrink, 1);
        assert!(p.display);
        assert!(!p.has_legacy_dim());
    }

    #[test]
    fn legacy_detection() {
        assert!(Dim::Percent(50.0).is_legacy());
        assert!(Dim::Responsive(vec![(Breakpoint::Sm, 10)]).is_legacy());
        assert!(!Dim::Cells(10).is_legacy());
        let p = LayoutProps {
            height: Dim::Percent(100.0),
            ..LayoutProps::default()
        };
        assert!(p.has_legacy_dim());
    }
}
