//! Terminal rendering for the polygon grid.
//!
//! Renders into a simple framebuffer that can be flushed to a terminal
//! backend, without a widget toolkit in between.
//!
//! - `fb`: glyphs, styles and the framebuffer itself
//! - `grid_view`: top-down view of the active frame plus the side panel
//! - `renderer`: diffing crossterm output

pub mod fb;
pub mod grid_view;
pub mod renderer;

pub use polygrid_core as core;
pub use polygrid_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use grid_view::{GridView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
