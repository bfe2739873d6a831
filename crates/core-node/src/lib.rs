//! Widget descriptor model: the closed kind set, per-kind prop records,
//! layout constraints, the identity arena, and the reconciler-facing
//! runtime types (instances, focus, cursor, id-rect index).

pub mod arena;
pub mod kind;
pub mod layout_props;
pub mod props;
pub mod runtime;

pub use arena::{DirtySet, NodeArena, NodeId, VNode};
pub use kind::{Family, NodeKind};
pub use layout_props::{Align, Breakpoint, Dim, Justify, LayoutProps, Overflow, Position};
pub use props::*;
pub use runtime::{CursorInfo, CursorShape, FocusState, IdRectIndex, RuntimeInstance};
