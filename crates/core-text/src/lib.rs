//! Text measurement primitives: cluster widths, wrapping, column slicing
//! and glyph-run interning.
//!
//! This crate is the single source of truth for "how many terminal cells
//! does this string occupy". Layout measures through it, the drawlist
//! builder clips through it, and widget painters build their repeated-glyph
//! chrome through it.

pub mod clip;
pub mod icons;
pub mod runs;
pub mod width;
pub mod wrap;

pub use clip::{
    ColumnSlice, ELLIPSIS, fit_to_width, prefix_graphemes, slice_columns, truncate_to_width,
};
pub use icons::{FALLBACK_GLYPH, icon_glyph, icon_glyph_or_fallback, icon_width};
pub use runs::{glyph_run, spaces};
pub use width::cluster_width;
pub use wrap::{max_content_width, min_content_width, str_width, wrap, wrapped_height};
