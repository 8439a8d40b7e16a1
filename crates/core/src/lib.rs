//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and rendering to
//! brightness frames. It has **no dependencies** on the terminal, the keyboard or the
//! network, making it:
//!
//! - **Deterministic**: Same seed and same tick times produce identical games
//! - **Testable**: Time is passed in by the caller, never read from a clock
//! - **Portable**: The same engine drives the terminal simulation and the real cross
//!
//! # Module Structure
//!
//! - [`board`]: 8x24 grid of locked cells with collision checks and row clearing
//! - [`pieces`]: Tetromino shapes, the rotation operator and rotation kicks
//! - [`rng`]: Seeded uniform piece generation
//! - [`scoring`]: Points per lock and gravity speed-up
//! - [`engine`]: The per-tick state machine (input, gravity, locking, game over)
//! - [`view`]: Maps the engine into a 48x48 brightness frame
//! - [`frame`]: Brightness frames and their 3-bit quantization
//! - [`font`]: Bitmap font for the HUD and the game-over caption
//! - [`config`]: Engine tuning
//!
//! # Game Rules
//!
//! - **Uniform Randomizer**: Every piece kind and starting rotation is equally likely
//! - **Simple Rotation**: Quarter turn, trying in place, one column right, one column left
//! - **No Lock Delay**: A piece locks on the first gravity step it cannot take
//! - **Landing Preview**: Blinks where the current piece would land
//! - **Scoring**: 1, 4, 9 or 16 points for 1 to 4 rows; each row speeds gravity up by 6%
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use cross_tetris_core::{Engine, EngineConfig};
//! use cross_tetris_types::TickInput;
//!
//! let mut engine = Engine::new(EngineConfig::default(), 12345);
//! let frame = engine.step(&TickInput::new(), Instant::now());
//!
//! assert_eq!(frame.width(), 48);
//! assert!(!engine.is_game_over());
//! ```
//!
//! # Timing
//!
//! The host calls [`Engine::step`](engine::Engine::step) once per frame with the
//! current `Instant`:
//! - **Gravity**: 500ms at start, multiplied by 0.94 per cleared row
//! - **Sideways moves**: at most one per direction every 100ms while held
//! - **Soft drop**: one row per tick while held
//! - **Preview blink**: toggles every 200ms

pub mod board;
pub mod config;
pub mod engine;
pub mod font;
pub mod frame;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod view;

pub use cross_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::EngineConfig;
pub use engine::{Engine, Phase, StepOutcome};
pub use font::{Font, Glyph};
pub use frame::{quantize_level, BrightnessFrame, QuantizedFrame};
pub use pieces::{rotate, try_rotate, Piece, Shape};
pub use rng::PieceGenerator;
pub use scoring::{points_for_rows, speed_after_clear};
pub use view::FrameView;
