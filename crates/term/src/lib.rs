//! Terminal simulation of the LED cross.
//!
//! A small, game-oriented rendering layer: quantized frames from the engine are
//! drawn into a framebuffer of styled character cells, which is then flushed to the
//! terminal with diff-based updates.
//!
//! - [`cross_view`]: frame -> framebuffer, one LED glyph per cross pixel
//! - [`fb`]: the framebuffer itself
//! - [`renderer`]: terminal setup/teardown and flushing

pub mod cross_view;
pub mod fb;
pub mod renderer;

pub use cross_tetris_core as core;
pub use cross_tetris_types as types;

pub use cross_view::{CrossView, ShadeMode, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
