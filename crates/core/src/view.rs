//! FrameView: maps an [`Engine`] into a 48x48 brightness frame.
//!
//! This module is pure (no I/O, no clocks). Layout of a playing frame:
//!
//! | Element | Position | Brightness |
//! |---------|----------|------------|
//! | Board side borders | columns 15 and 32, rows 16..32 | light |
//! | Board cells | 2x2 blocks from (0, 16) | full / off |
//! | Landing preview | board coordinates, blinking | light |
//! | Falling piece | board coordinates | full |
//! | `NXT` label + next piece | right arm | full |
//! | `PTS` label + score | left arm | full |
//!
//! Once the game is over the frame only holds the scrolling caption.

use std::sync::Arc;

use tracing::trace;

use crate::engine::{Engine, Phase};
use crate::font::Font;
use crate::frame::BrightnessFrame;
use crate::pieces::Shape;
use crate::types::{Placement, FULL_BRIGHT, LIGHT_BRIGHT, PANEL_SIZE, SCALE, SCREEN_SIZE};

/// Offset inside the right arm of the next-piece preview, by shape size, so that
/// every piece looks centered under the label.
pub const NEXT_PIECE_OFFSETS: [(usize, (i32, i32)); 3] = [(4, (7, 5)), (3, (8, 6)), (2, (9, 7))];

/// Scale of the game-over caption glyphs.
pub const CAPTION_SCALE: usize = 2;
/// Top row of the game-over caption.
pub const CAPTION_ROW: i32 = PANEL_SIZE as i32 + 3;

const PANEL: i32 = PANEL_SIZE as i32;

pub fn next_piece_offset(size: usize) -> Option<(i32, i32)> {
    NEXT_PIECE_OFFSETS
        .iter()
        .find(|(s, _)| *s == size)
        .map(|&(_, offset)| offset)
}

/// Horizontal span `[left, right)` text may be drawn in.
#[derive(Debug, Clone, Copy)]
struct Clip {
    left: i32,
    right: i32,
}

impl Clip {
    const SCREEN: Clip = Clip {
        left: 0,
        right: SCREEN_SIZE as i32,
    };
    /// Left arm of the cross, up to the board border.
    const LEFT_ARM: Clip = Clip {
        left: 0,
        right: PANEL - 1,
    };

    fn contains(&self, x: i32) -> bool {
        x >= self.left && x < self.right
    }
}

/// Renderer from game state to brightness frames.
#[derive(Debug, Clone)]
pub struct FrameView {
    font: Arc<Font>,
}

impl Default for FrameView {
    fn default() -> Self {
        Self::new(Arc::new(Font::builtin()))
    }
}

impl FrameView {
    pub fn new(font: Arc<Font>) -> Self {
        Self { font }
    }

    pub fn font(&self) -> &Arc<Font> {
        &self.font
    }

    /// Pixel width of the game-over caption.
    pub fn caption_width(&self, caption: &str) -> usize {
        self.font.text_width(caption, CAPTION_SCALE)
    }

    pub fn render(&self, engine: &Engine) -> BrightnessFrame {
        let mut fb = BrightnessFrame::screen();
        self.render_into(engine, &mut fb);
        fb
    }

    /// Render into an existing frame. The frame is cleared first.
    pub fn render_into(&self, engine: &Engine, fb: &mut BrightnessFrame) {
        fb.clear();
        match engine.phase() {
            Phase::Falling => self.render_playing(engine, fb),
            Phase::GameOver => self.render_game_over(engine, fb),
        }
    }

    /// Render the playing layout whatever the phase. The engine uses this for the
    /// tick on which a game tops out, which still shows the final board.
    pub fn render_playing_into(&self, engine: &Engine, fb: &mut BrightnessFrame) {
        fb.clear();
        self.render_playing(engine, fb);
    }

    fn render_playing(&self, engine: &Engine, fb: &mut BrightnessFrame) {
        // Sides of the central panel.
        for y in PANEL..2 * PANEL {
            draw_pixel(fb, y, PANEL - 1, LIGHT_BRIGHT);
            draw_pixel(fb, y, 2 * PANEL, LIGHT_BRIGHT);
        }

        let board = engine.board();
        let scale = SCALE as i32;
        for row in 0..board.height() as i32 {
            for col in 0..board.width() as i32 {
                let value = match board.get(row as i8, col as i8) {
                    Some(true) => FULL_BRIGHT,
                    _ => 0.0,
                };
                for dy in 0..scale {
                    for dx in 0..scale {
                        draw_pixel(fb, scale * row + dy, PANEL + scale * col + dx, value);
                    }
                }
            }
        }

        let shape = &engine.current().shape;
        if engine.show_landing_preview() {
            draw_shape_on_board(fb, shape, engine.landing_placement(), LIGHT_BRIGHT);
        }
        draw_shape_on_board(fb, shape, engine.placement(), FULL_BRIGHT);

        self.draw_text(fb, "NXT", PANEL + 1, 2 * PANEL + 3, 1, Clip::SCREEN);
        let next = &engine.next_piece().shape;
        if let Some((dy, dx)) = next_piece_offset(next.size()) {
            draw_shape(fb, next, PANEL + dy, 2 * PANEL + dx, SCALE, FULL_BRIGHT);
        }

        self.draw_text(fb, "PTS", PANEL + 1, 2, 1, Clip::LEFT_ARM);
        let score = engine.score().to_string();
        self.draw_text(fb, &score, PANEL + 9, 2, 1, Clip::LEFT_ARM);
    }

    fn render_game_over(&self, engine: &Engine, fb: &mut BrightnessFrame) {
        let x = SCREEN_SIZE as i32 - engine.game_over_scroll();
        self.draw_text(
            fb,
            &engine.game_over_caption(),
            CAPTION_ROW,
            x,
            CAPTION_SCALE,
            Clip::SCREEN,
        );
    }

    /// Draw `text` with its top-left corner at `(y, x)`. Every glyph paints its whole
    /// rectangle, unlit bits included. Characters missing from the font are skipped.
    ///
    /// Returns the x coordinate just past the last glyph.
    fn draw_text(
        &self,
        fb: &mut BrightnessFrame,
        text: &str,
        y: i32,
        mut x: i32,
        scale: usize,
        clip: Clip,
    ) -> i32 {
        let s = scale as i32;
        for ch in text.chars() {
            let Some(glyph) = self.font.glyph(ch) else {
                trace!(?ch, "no glyph");
                continue;
            };
            for gy in 0..glyph.height() {
                for gx in 0..glyph.width() {
                    let value = if glyph.is_lit(gy, gx) { FULL_BRIGHT } else { 0.0 };
                    for ddy in 0..s {
                        for ddx in 0..s {
                            let px = x + s * gx as i32 + ddx;
                            if clip.contains(px) {
                                draw_pixel(fb, y + s * gy as i32 + ddy, px, value);
                            }
                        }
                    }
                }
            }
            x += self.font.advance(ch, scale) as i32;
        }
        x
    }
}

fn draw_pixel(fb: &mut BrightnessFrame, y: i32, x: i32, brightness: f32) {
    if !fb.set(y, x, brightness) {
        trace!(y, x, "pixel out of bounds");
    }
}

/// Draw the occupied cells of `shape` as `scale`x`scale` blocks from pixel `(y, x)`.
fn draw_shape(
    fb: &mut BrightnessFrame,
    shape: &Shape,
    y: i32,
    x: i32,
    scale: usize,
    brightness: f32,
) {
    let s = scale as i32;
    for (dy, dx) in shape.cells() {
        for ddy in 0..s {
            for ddx in 0..s {
                draw_pixel(
                    fb,
                    y + s * dy as i32 + ddy,
                    x + s * dx as i32 + ddx,
                    brightness,
                );
            }
        }
    }
}

fn draw_shape_on_board(fb: &mut BrightnessFrame, shape: &Shape, at: Placement, brightness: f32) {
    let scale = SCALE as i32;
    draw_shape(
        fb,
        shape,
        scale * at.row as i32,
        PANEL + scale * at.col as i32,
        SCALE,
        brightness,
    );
}
