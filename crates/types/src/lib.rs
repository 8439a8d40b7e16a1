//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no I/O, making them usable from the
//! engine, the terminal simulation, the input layer and the UDP link alike.
//!
//! # Display Geometry
//!
//! The target display is a plus-shaped LED cross made of five 16x16 panels laid out
//! on a 3x3 grid of panel slots:
//!
//! - **Panel size**: 16 pixels
//! - **Screen size**: 48x48 pixels (only the cross-shaped area is lit)
//! - **Scale**: each board cell is drawn as a 2x2 pixel block
//! - **Board**: 8 columns x 24 rows, drawn in the vertical bar of the cross
//!
//! # Tuning Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `KEY_COOLDOWN_SECS` | 0.1 | Debounce between accepted sideways moves |
//! | `START_SPEED_SECS` | 0.5 | Gravity interval at game start |
//! | `SPEEDUP_FACTOR` | 0.94 | Gravity interval multiplier per cleared row |
//! | `LANDING_BLINK_SECS` | 0.2 | Blink period of the landing preview |
//! | `FULL_BRIGHT` | 1.0 | Brightness of pieces and text |
//! | `LIGHT_BRIGHT` | 0.25 | Brightness of borders and the landing preview |

use arrayvec::ArrayVec;

/// Width and height of a single panel of the cross, in pixels.
pub const PANEL_SIZE: usize = 16;
/// Width and height of the whole cross canvas, in pixels.
pub const SCREEN_SIZE: usize = 3 * PANEL_SIZE;
/// Size in pixels of one board cell.
pub const SCALE: usize = 2;

/// Board dimensions
pub const BOARD_WIDTH: u8 = (PANEL_SIZE / SCALE) as u8;
pub const BOARD_HEIGHT: u8 = (SCREEN_SIZE / SCALE) as u8;
/// Largest board side. Board coordinates are `i8`, so every row and column index
/// must fit in one.
pub const MAX_BOARD_SIDE: u8 = i8::MAX as u8;

/// Game timing constants (in seconds)
pub const KEY_COOLDOWN_SECS: f64 = 0.1;
pub const START_SPEED_SECS: f64 = 0.5;
pub const SPEEDUP_FACTOR: f64 = 0.94;
pub const LANDING_BLINK_SECS: f64 = 0.2;

/// Brightness levels
pub const FULL_BRIGHT: f32 = 1.0;
pub const LIGHT_BRIGHT: f32 = 2.0 / 8.0;

/// Points earned by clearing 1, 2, 3 and 4 rows with a single lock.
pub const LINE_POINTS: [u32; 4] = [1, 4, 9, 16];

/// Frame rates of the host loop, depending on the display mode.
pub const FPS_EIGHT_SHADE: u32 = 20;
pub const FPS_TWO_SHADE: u32 = 60;

/// Number of distinct brightness levels sent to the cross (3 bits per pixel).
pub const SHADE_LEVELS: u8 = 8;

/// Whether pixel `(y, x)` of the screen belongs to the cross, i.e. lies in the
/// middle row or the middle column of panels. Pixels outside are never lit.
pub const fn is_on_cross(y: usize, x: usize) -> bool {
    y < SCREEN_SIZE && x < SCREEN_SIZE && (y / PANEL_SIZE == 1 || x / PANEL_SIZE == 1)
}

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    S,
    Z,
    L,
    J,
    T,
}

impl PieceKind {
    /// All kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::T => "t",
        }
    }
}

/// Top-left anchor of a piece matrix on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Placement {
    pub row: i8,
    pub col: i8,
}

impl Placement {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Same placement moved by `(drow, dcol)`.
    pub const fn offset(self, drow: i8, dcol: i8) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }
}

/// Level-triggered input: keys currently held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub down: bool,
}

/// Edge-triggered input: fires once per physical key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdge {
    Rotate,
    Restart,
    /// Only honoured when the engine runs in debug mode.
    ForceGameOver,
}

impl InputEdge {
    /// Parse edge from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rotate" => Some(InputEdge::Rotate),
            "restart" => Some(InputEdge::Restart),
            "forcegameover" => Some(InputEdge::ForceGameOver),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputEdge::Rotate => "rotate",
            InputEdge::Restart => "restart",
            InputEdge::ForceGameOver => "forceGameOver",
        }
    }
}

/// Maximum number of edge events buffered for a single tick.
pub const MAX_EDGES_PER_TICK: usize = 16;

/// Everything the engine consumes for one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub held: HeldKeys,
    pub edges: ArrayVec<InputEdge, MAX_EDGES_PER_TICK>,
}

impl TickInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_held(held: HeldKeys) -> Self {
        Self {
            held,
            edges: ArrayVec::new(),
        }
    }

    /// Queue an edge event. Events past the per-tick capacity are dropped.
    pub fn push_edge(&mut self, edge: InputEdge) -> bool {
        self.edges.try_push(edge).is_ok()
    }

    pub fn is_idle(&self) -> bool {
        self.held == HeldKeys::default() && self.edges.is_empty()
    }
}
