//! Falling-block puzzle for the LED pharmacy cross (workspace facade crate).
//!
//! This package exposes `cross_tetris::{core,adapter,term,input,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use cross_tetris_adapter as adapter;
pub use cross_tetris_core as core;
pub use cross_tetris_input as input;
pub use cross_tetris_term as term;
pub use cross_tetris_types as types;
