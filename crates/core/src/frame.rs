//! Brightness frame - the matrix handed to the display.

use crate::types::{SCREEN_SIZE, SHADE_LEVELS};

/// Row-major matrix of brightness values in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct BrightnessFrame {
    width: usize,
    height: usize,
    pixels: Vec<f32>,
}

impl BrightnessFrame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0.0; width * height],
        }
    }

    /// Blank frame the size of the whole cross.
    pub fn screen() -> Self {
        Self::new(SCREEN_SIZE, SCREEN_SIZE)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    #[inline(always)]
    fn idx(&self, y: i32, x: i32) -> Option<usize> {
        if y < 0 || x < 0 || y as usize >= self.height || x as usize >= self.width {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn get(&self, y: i32, x: i32) -> Option<f32> {
        self.idx(y, x).map(|i| self.pixels[i])
    }

    /// Write one pixel, clamping to [0, 1]. Returns false when (y, x) is outside.
    pub fn set(&mut self, y: i32, x: i32, brightness: f32) -> bool {
        match self.idx(y, x) {
            Some(i) => {
                self.pixels[i] = brightness.clamp(0.0, 1.0);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0.0);
    }

    pub fn row(&self, y: usize) -> &[f32] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Quantize to 3-bit shade levels: `round(v * 255) / 32`, giving 0..=7.
    pub fn quantize(&self) -> QuantizedFrame {
        QuantizedFrame {
            width: self.width,
            height: self.height,
            levels: self.pixels.iter().map(|&v| quantize_level(v)).collect(),
        }
    }
}

impl Default for BrightnessFrame {
    fn default() -> Self {
        Self::screen()
    }
}

/// Shade level (0-7) of a single brightness value.
pub fn quantize_level(brightness: f32) -> u8 {
    let byte = (brightness.clamp(0.0, 1.0) * 255.0).round() as u32;
    (byte / (256 / SHADE_LEVELS as u32)) as u8
}

/// Frame after quantization to shade levels, as sent to the cross.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedFrame {
    width: usize,
    height: usize,
    levels: Vec<u8>,
}

impl QuantizedFrame {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    pub fn get(&self, y: usize, x: usize) -> Option<u8> {
        if y >= self.height || x >= self.width {
            return None;
        }
        Some(self.levels[y * self.width + x])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.levels.chunks(self.width.max(1))
    }
}
