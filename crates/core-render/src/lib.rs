//! Drawlist renderer: walks the runtime and layout trees in parallel and
//! emits clipped, styled cell primitives.
//!
//! The public surface is `render_to_drawlist` plus the builder types; the
//! per-family painters are internal. Rendering never fails — primitives
//! are best-effort and out-of-clip cells are dropped silently at the
//! builder.

pub mod charts;
pub mod chrome;
pub mod collections;
pub mod container;
pub mod diff;
pub mod drawlist;
pub mod editors;
pub mod forms;
pub mod indicators;
pub mod logs;
pub mod overlay;
pub mod walk;

pub use chrome::{border_glyphs, thumb_geometry};
pub use drawlist::{DrawOp, DrawlistBuilder, ResolvedCursor};
pub use editors::{
    HeuristicTokenizer, PlainTokenizer, Token, TokenKind, TokenizeContext, Tokenizer, token_color,
};
pub use logs::filter_entries;
pub use overlay::palette_window;
pub use walk::{RenderOutcome, RenderParams, build_id_rect_index, render_to_drawlist};
