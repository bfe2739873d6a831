//! Layout engine: constraint resolution, intrinsic measurement, flex
//! distribution, grid tracks, overflow/scroll metadata, and the identity-
//! keyed measure/layout caches.
//!
//! Entry points are `LayoutEngine::measure` and `LayoutEngine::layout`;
//! both are pure over the caller-owned `FrameCaches` and fail fast with
//! `LayoutError::InvalidProps` carrying a node-path locator.

pub mod boxed;
pub mod cache;
pub mod engine;
pub mod error;
pub mod flex;
pub mod grid;
pub mod leaf;
pub mod overlay;
pub mod panes;
pub mod stack;
pub mod tree;

pub use boxed::box_chrome;
pub use cache::{FrameCaches, LayoutCache, LayoutKey, MeasureCache, MeasureKey};
pub use engine::LayoutEngine;
pub use error::LayoutError;
pub use flex::{FlexItem, justify_offsets};
pub use grid::column_count;
pub use leaf::gutter_width;
pub use overlay::dropdown_item_width;
pub use panes::{pagination_line, tab_bar_width};
pub use tree::{LayoutMeta, LayoutNode, LayoutTree};
