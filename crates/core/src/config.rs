//! Engine tuning.

use std::time::Duration;

use crate::types::{KEY_COOLDOWN_SECS, LANDING_BLINK_SECS, SPEEDUP_FACTOR, START_SPEED_SECS};

/// Tunable parameters of a game. `Default` gives the stock cross settings.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Minimum time between two accepted moves in the same sideways direction.
    pub key_cooldown: Duration,
    /// Gravity interval at game start, in seconds.
    pub start_speed: f64,
    /// Gravity interval multiplier applied once per cleared row. Must be in (0, 1).
    pub speedup_factor: f64,
    /// Draw the blinking preview of where the falling piece will land.
    pub show_landing_preview: bool,
    /// Blink period of the landing preview.
    pub landing_blink: Duration,
    /// Allow restarting mid-game and forcing a game over from the keyboard.
    pub debug: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            key_cooldown: Duration::from_secs_f64(KEY_COOLDOWN_SECS),
            start_speed: START_SPEED_SECS,
            speedup_factor: SPEEDUP_FACTOR,
            show_landing_preview: true,
            landing_blink: Duration::from_secs_f64(LANDING_BLINK_SECS),
            debug: false,
        }
    }
}

impl EngineConfig {
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_landing_preview(mut self, show: bool) -> Self {
        self.show_landing_preview = show;
        self
    }
}
