//! delve-tui: terminal rendering for generated maps
//!
//! Implements the core's draw-target seam over a ratatui buffer and
//! wraps it in a widget.

pub mod widgets;

pub use widgets::map::{MapWidget, TileGlyph, default_tileset};
