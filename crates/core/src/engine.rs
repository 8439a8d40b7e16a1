//! Engine module - the game state machine
//!
//! Ties together the board, the piece generator and scoring. The host calls
//! [`Engine::step`] once per frame with the current input and the wall-clock time;
//! the engine moves the falling piece, applies gravity, locks and clears rows, and
//! returns the frame to display.
//!
//! A game is either `Falling` (a piece is in play) or `GameOver`. Spawning happens
//! inside construction and locking: when the queued piece does not fit at the spawn
//! placement the game is over. Only a restart leaves `GameOver`, and a restart rebuilds
//! the whole engine from scratch.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::board::Board;
use crate::config::EngineConfig;
use crate::font::Font;
use crate::frame::BrightnessFrame;
use crate::pieces::{try_rotate, Piece};
use crate::rng::PieceGenerator;
use crate::scoring::{points_for_rows, speed_after_clear};
use crate::types::{HeldKeys, InputEdge, Placement, TickInput, SCREEN_SIZE};
use crate::view::FrameView;

/// Phase of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Falling,
    GameOver,
}

/// Result of one gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The piece moved down one row.
    Moved,
    /// The piece locked; `topped_out` is set when the next piece could not spawn.
    Locked {
        rows_cleared: usize,
        points: u32,
        topped_out: bool,
    },
    /// Nothing happens once the game is over.
    Ignored,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    view: FrameView,
    generator: PieceGenerator,
    board: Board,
    current: Piece,
    placement: Placement,
    next: Piece,
    phase: Phase,
    score: u32,
    /// Seconds between two automatic gravity steps.
    speed: f64,
    lines: u32,
    pieces_locked: u32,
    /// Monotonic game counter (increments on restart).
    game_id: u32,
    last_left: Option<Instant>,
    last_right: Option<Instant>,
    last_gravity: Option<Instant>,
    last_blink: Option<Instant>,
    landing_visible: bool,
    game_over_scroll: i32,
}

impl Engine {
    /// Create a new game with the given seed and the built-in font.
    pub fn new(config: EngineConfig, seed: u64) -> Self {
        Self::with_font(config, seed, Arc::new(Font::builtin()))
    }

    /// Create a new game drawing text with `font`.
    pub fn with_font(config: EngineConfig, seed: u64, font: Arc<Font>) -> Self {
        Self::fresh(config, font, seed, Board::default())
    }

    /// Start from a prepared board with a chosen falling piece and queued piece.
    ///
    /// The falling piece is spawned as usual, so a board that blocks the spawn
    /// placement yields an engine that is already over.
    pub fn from_parts(
        config: EngineConfig,
        seed: u64,
        board: Board,
        current: Piece,
        next: Piece,
    ) -> Self {
        Self::assemble(
            config,
            Arc::new(Font::builtin()),
            PieceGenerator::new(seed),
            board,
            current,
            next,
        )
    }

    fn fresh(config: EngineConfig, font: Arc<Font>, seed: u64, board: Board) -> Self {
        let mut generator = PieceGenerator::new(seed);
        let first = generator.random_piece();
        let upcoming = generator.random_piece();
        Self::assemble(config, font, generator, board, first, upcoming)
    }

    fn assemble(
        config: EngineConfig,
        font: Arc<Font>,
        generator: PieceGenerator,
        board: Board,
        first: Piece,
        upcoming: Piece,
    ) -> Self {
        let speed = config.start_speed;
        let mut engine = Self {
            config,
            view: FrameView::new(font),
            generator,
            board,
            current: first,
            placement: Placement::default(),
            next: first,
            phase: Phase::Falling,
            score: 0,
            speed,
            lines: 0,
            pieces_locked: 0,
            game_id: 0,
            last_left: None,
            last_right: None,
            last_gravity: None,
            last_blink: None,
            landing_visible: true,
            game_over_scroll: 0,
        };
        engine.spawn(upcoming);
        engine
    }

    /// Discard everything and start a new game on an empty board of the same size.
    ///
    /// The new seed is drawn from the current generator, so a whole session replays
    /// from its first seed.
    pub fn restart(&mut self) {
        let seed = self.generator.next_seed();
        let game_id = self.game_id.wrapping_add(1);
        let board = Board::new(self.board.width(), self.board.height());
        *self = Self::fresh(
            self.config.clone(),
            Arc::clone(self.view.font()),
            seed,
            board,
        );
        self.game_id = game_id;
        info!(game_id, seed, "game restarted");
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current gravity interval in seconds.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Rows cleared since the game started.
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn view(&self) -> &FrameView {
        &self.view
    }

    /// Whether the blinking landing preview is in its visible half-period.
    pub fn show_landing_preview(&self) -> bool {
        self.config.show_landing_preview && self.landing_visible
    }

    pub fn game_over_scroll(&self) -> i32 {
        self.game_over_scroll
    }

    /// Placement every new piece starts from: top row, horizontally centered.
    pub fn spawn_placement(&self) -> Placement {
        Placement::new(0, (self.board.width() as i8 - 1) / 2)
    }

    /// Where the falling piece would lock if it dropped straight down now.
    pub fn landing_placement(&self) -> Placement {
        Placement::new(
            self.board.drop_row(self.placement, &self.current.shape),
            self.placement.col,
        )
    }

    /// Text scrolled across the cross once the game is over.
    pub fn game_over_caption(&self) -> String {
        format!("GAME OVER      SCORE: {}      ", self.score)
    }

    /// Promote the queued piece to the falling piece at the spawn placement, queueing
    /// `upcoming` behind it. Returns false (and ends the game) when it does not fit.
    fn spawn(&mut self, upcoming: Piece) -> bool {
        let placement = self.spawn_placement();
        if !self.board.is_valid(placement, &self.next.shape) {
            self.enter_game_over();
            return false;
        }

        self.current = self.next;
        self.placement = placement;
        self.next = upcoming;
        true
    }

    fn enter_game_over(&mut self) {
        if self.phase == Phase::GameOver {
            return;
        }
        self.phase = Phase::GameOver;
        self.game_over_scroll = 0;
        info!(
            score = self.score,
            lines = self.lines,
            pieces = self.pieces_locked,
            "game over"
        );
    }

    /// Advance one tick and render the resulting frame.
    pub fn step(&mut self, input: &TickInput, now: Instant) -> BrightnessFrame {
        self.handle_edges(&input.edges);
        match self.phase {
            Phase::GameOver => {
                // The caption is drawn at the current offset, then scrolled.
                let frame = self.render();
                self.advance_caption();
                frame
            }
            Phase::Falling => {
                self.advance_play(input.held, now);
                // Drawn before the blink flips; a top-out tick still shows the board.
                let mut frame = BrightnessFrame::screen();
                self.view.render_playing_into(self, &mut frame);
                self.update_blink(now);
                frame
            }
        }
    }

    /// Advance one tick without rendering.
    pub fn update(&mut self, input: &TickInput, now: Instant) {
        self.handle_edges(&input.edges);
        match self.phase {
            Phase::GameOver => self.advance_caption(),
            Phase::Falling => {
                self.advance_play(input.held, now);
                self.update_blink(now);
            }
        }
    }

    fn handle_edges(&mut self, edges: &[InputEdge]) {
        for edge in edges {
            match edge {
                InputEdge::Rotate => {
                    if self.phase == Phase::Falling {
                        self.try_rotate();
                    }
                }
                InputEdge::Restart => {
                    if self.phase == Phase::GameOver || self.config.debug {
                        self.restart();
                    }
                }
                InputEdge::ForceGameOver => {
                    if self.config.debug {
                        self.enter_game_over();
                    }
                }
            }
        }
    }

    fn advance_play(&mut self, held: HeldKeys, now: Instant) {
        let forced = self.handle_held(held, now);
        self.apply_gravity(now, forced);
    }

    /// Apply held movement keys. Left wins over right, and right over down, but a
    /// direction still cooling down lets the next one through.
    ///
    /// Returns true when a soft drop was requested.
    fn handle_held(&mut self, held: HeldKeys, now: Instant) -> bool {
        if held.left && self.cooled_down(self.last_left, now) {
            self.last_left = Some(now);
            self.try_shift(-1);
            false
        } else if held.right && self.cooled_down(self.last_right, now) {
            self.last_right = Some(now);
            self.try_shift(1);
            false
        } else {
            held.down
        }
    }

    fn cooled_down(&self, last: Option<Instant>, now: Instant) -> bool {
        last.map_or(true, |t| {
            now.saturating_duration_since(t) > self.config.key_cooldown
        })
    }

    fn apply_gravity(&mut self, now: Instant, forced: bool) -> StepOutcome {
        let due = self.last_gravity.map_or(true, |t| {
            now.saturating_duration_since(t).as_secs_f64() >= self.speed
        });
        if !forced && !due {
            return StepOutcome::Ignored;
        }
        self.last_gravity = Some(now);
        self.gravity_step()
    }

    fn update_blink(&mut self, now: Instant) {
        match self.last_blink {
            None => self.last_blink = Some(now),
            Some(t) if now.saturating_duration_since(t) > self.config.landing_blink => {
                self.landing_visible = !self.landing_visible;
                self.last_blink = Some(now);
            }
            Some(_) => {}
        }
    }

    fn advance_caption(&mut self) {
        let width = self.view.caption_width(&self.game_over_caption()) as i32;
        let start = SCREEN_SIZE as i32 - self.game_over_scroll;
        self.game_over_scroll += 1;
        if start + width < 0 {
            self.game_over_scroll = 0;
        }
    }

    /// Try to move the falling piece `dcol` columns. Rejected moves change nothing.
    pub fn try_shift(&mut self, dcol: i8) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let target = self.placement.offset(0, dcol);
        if self.board.is_valid(target, &self.current.shape) {
            self.placement = target;
            return true;
        }
        false
    }

    /// Rotate the falling piece a quarter turn, shifting it one column right or left
    /// when it does not fit in place.
    pub fn try_rotate(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let board = &self.board;
        let result = try_rotate(
            &self.current,
            self.placement.row,
            self.placement.col,
            |shape, row, col| board.is_valid(Placement::new(row, col), shape),
        );

        if let Some((rotated, col)) = result {
            self.current = rotated;
            self.placement.col = col;
            return true;
        }
        false
    }

    /// Move the falling piece down one row, locking it when it cannot move.
    pub fn gravity_step(&mut self) -> StepOutcome {
        if self.phase != Phase::Falling {
            return StepOutcome::Ignored;
        }
        let below = self.placement.offset(1, 0);
        if self.board.is_valid(below, &self.current.shape) {
            self.placement = below;
            return StepOutcome::Moved;
        }
        self.lock()
    }

    /// Drop the falling piece until it locks.
    pub fn drop_to_lock(&mut self) -> StepOutcome {
        loop {
            match self.gravity_step() {
                StepOutcome::Moved => continue,
                outcome => return outcome,
            }
        }
    }

    fn lock(&mut self) -> StepOutcome {
        self.board.deposit(self.placement, &self.current.shape);

        let rows_cleared = self.board.clear_completed_rows();
        let points = points_for_rows(rows_cleared);
        self.score = self.score.saturating_add(points);
        self.speed = speed_after_clear(self.speed, self.config.speedup_factor, rows_cleared);
        self.lines += rows_cleared as u32;
        self.pieces_locked += 1;

        debug!(
            kind = self.current.kind.as_str(),
            row = self.placement.row,
            col = self.placement.col,
            rows_cleared,
            score = self.score,
            speed = self.speed,
            "piece locked"
        );

        let upcoming = self.generator.random_piece();
        let spawned = self.spawn(upcoming);
        StepOutcome::Locked {
            rows_cleared,
            points,
            topped_out: !spawned,
        }
    }

    /// Render the current state into a new frame.
    pub fn render(&self) -> BrightnessFrame {
        let mut fb = BrightnessFrame::screen();
        self.render_into(&mut fb);
        fb
    }

    /// Render into an existing frame, reusing its allocation.
    pub fn render_into(&self, fb: &mut BrightnessFrame) {
        self.view.render_into(self, fb);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default(), 1)
    }
}
