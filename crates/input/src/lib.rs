//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key events
//! into [`crate::types::TickInput`]: which movement keys are held, and which one-shot
//! keys were pressed since the last tick. Terminals without key-release events are
//! handled with a release timeout.

pub mod handler;
pub mod map;

pub use cross_tetris_types as types;

pub use handler::InputHandler;
pub use map::{map_key, should_quit, HeldKey, KeyRole};
