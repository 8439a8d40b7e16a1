//! CrossView: maps a quantized frame onto a terminal framebuffer as LEDs.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Every screen pixel is one terminal row tall and two columns wide (a LED glyph and
//! a gap), which roughly compensates for the aspect ratio of terminal cells. Pixels
//! outside the cross are left blank, the way the physical display has no LEDs there.

use crate::core::QuantizedFrame;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{is_on_cross, FPS_EIGHT_SHADE, FPS_TWO_SHADE, SHADE_LEVELS};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// How many brightness steps the simulated LEDs show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadeMode {
    /// All eight quantized levels.
    #[default]
    Eight,
    /// On/off only: levels 4 and above are on.
    Two,
}

impl ShadeMode {
    /// Host loop frame rate for this mode.
    pub fn fps(self) -> u32 {
        match self {
            ShadeMode::Eight => FPS_EIGHT_SHADE,
            ShadeMode::Two => FPS_TWO_SHADE,
        }
    }

    /// Displayed intensity in [0, 1] of a shade level.
    pub fn intensity(self, level: u8) -> f32 {
        let level = level.min(SHADE_LEVELS - 1);
        match self {
            ShadeMode::Eight => level as f32 / (SHADE_LEVELS - 1) as f32,
            ShadeMode::Two => (level / (SHADE_LEVELS / 2)) as f32,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShadeMode::Eight => "8-shade",
            ShadeMode::Two => "2-shade",
        }
    }
}

const LED: char = '●';
const LED_OFF: Rgb = Rgb::new(30, 30, 30);
const LED_ON: Rgb = Rgb::new(30, 210, 30);

/// Terminal renderer for the LED cross.
#[derive(Debug, Clone)]
pub struct CrossView {
    mode: ShadeMode,
    /// Terminal columns per screen pixel.
    cell_w: u16,
}

impl Default for CrossView {
    fn default() -> Self {
        Self::new(ShadeMode::default())
    }
}

impl CrossView {
    pub fn new(mode: ShadeMode) -> Self {
        Self { mode, cell_w: 2 }
    }

    pub fn mode(&self) -> ShadeMode {
        self.mode
    }

    /// Color of a LED showing `level`.
    pub fn led_color(&self, level: u8) -> Rgb {
        LED_OFF.lerp(LED_ON, self.mode.intensity(level))
    }

    /// Render a frame plus a one-line status text below it.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        frame: &QuantizedFrame,
        status: &str,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let px_w = frame.width() as u16 * self.cell_w;
        let start_x = viewport.width.saturating_sub(px_w) / 2;

        for (y, row) in frame.rows().enumerate() {
            let ty = y as u16;
            if ty >= viewport.height {
                break;
            }
            for (x, &level) in row.iter().enumerate() {
                if !is_on_cross(y, x) {
                    continue;
                }
                let tx = start_x + x as u16 * self.cell_w;
                fb.put_char(tx, ty, LED, CellStyle::fg(self.led_color(level)));
            }
        }

        let status_y = (frame.height() as u16).min(viewport.height.saturating_sub(1));
        fb.put_str(start_x, status_y, status, CellStyle::default());
    }

    pub fn render(&self, frame: &QuantizedFrame, status: &str, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, status, viewport, &mut fb);
        fb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BrightnessFrame;

    #[test]
    fn test_intensity_per_mode() {
        assert_eq!(ShadeMode::Eight.intensity(0), 0.0);
        assert_eq!(ShadeMode::Eight.intensity(7), 1.0);
        assert_eq!(ShadeMode::Two.intensity(3), 0.0);
        assert_eq!(ShadeMode::Two.intensity(4), 1.0);
        assert_eq!(ShadeMode::Two.intensity(7), 1.0);
    }

    #[test]
    fn test_fps_per_mode() {
        assert_eq!(ShadeMode::Eight.fps(), 20);
        assert_eq!(ShadeMode::Two.fps(), 60);
    }

    #[test]
    fn test_only_cross_pixels_are_drawn() {
        let mut frame = BrightnessFrame::screen();
        frame.set(0, 0, 1.0);
        frame.set(0, 16, 1.0);
        let view = CrossView::default();
        let fb = view.render(&frame.quantize(), "", Viewport::new(96, 49));

        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some(' '));
        let lit = fb.get(32, 0).expect("cell in viewport");
        assert_eq!(lit.ch, LED);
        assert_eq!(lit.style.fg, LED_ON);
        let dark = fb.get(34, 0).expect("cell in viewport");
        assert_eq!(dark.style.fg, LED_OFF);
    }

    #[test]
    fn test_status_line_below_cross() {
        let view = CrossView::default();
        let frame = BrightnessFrame::screen().quantize();
        let fb = view.render(&frame, "PTS 3", Viewport::new(96, 49));
        assert_eq!(fb.get(0, 48).map(|c| c.ch), Some('P'));
    }
}
