//! Held-key tracking for terminal environments.
//!
//! The engine wants level-triggered state for movement keys and one edge per press
//! for everything else. Terminals only report presses (and auto-repeats) unless the
//! keyboard enhancement protocol is on, so a held key is also released when no press
//! or repeat refreshed it for a short timeout.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{map_key, HeldKey, KeyRole};
use crate::types::{HeldKeys, TickInput};

// Longer than the usual terminal auto-repeat interval, so a held key stays down
// between repeats, and short enough that a tap reads as a single move.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Collects key events between two ticks.
#[derive(Debug, Clone)]
pub struct InputHandler {
    left: Option<Instant>,
    right: Option<Instant>,
    down: Option<Instant>,
    pending: TickInput,
    key_release_timeout: Duration,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            left: None,
            right: None,
            down: None,
            pending: TickInput::new(),
            key_release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout = Duration::from_millis(timeout_ms);
        self
    }

    pub fn key_release_timeout(&self) -> Duration {
        self.key_release_timeout
    }

    fn slot(&mut self, key: HeldKey) -> &mut Option<Instant> {
        match key {
            HeldKey::Left => &mut self.left,
            HeldKey::Right => &mut self.right,
            HeldKey::Down => &mut self.down,
        }
    }

    /// Record one key event. Returns true if the key means anything to the game.
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> bool {
        let Some(role) = map_key(key.code) else {
            return false;
        };
        match (role, key.kind) {
            (KeyRole::Held(k), KeyEventKind::Press | KeyEventKind::Repeat) => {
                *self.slot(k) = Some(now);
            }
            (KeyRole::Held(k), KeyEventKind::Release) => {
                *self.slot(k) = None;
            }
            (KeyRole::Edge(edge), KeyEventKind::Press) => {
                // A full queue means the player is mashing faster than we tick.
                let _ = self.pending.push_edge(edge);
            }
            (KeyRole::Edge(_), _) => {}
        }
        true
    }

    fn is_held(&self, pressed: Option<Instant>, now: Instant) -> bool {
        pressed.is_some_and(|t| now.saturating_duration_since(t) <= self.key_release_timeout)
    }

    /// Keys currently considered held, after applying the release timeout.
    pub fn held(&self, now: Instant) -> HeldKeys {
        HeldKeys {
            left: self.is_held(self.left, now),
            right: self.is_held(self.right, now),
            down: self.is_held(self.down, now),
        }
    }

    /// Input for the next engine tick. Edge events are consumed; held state is kept.
    pub fn take_tick_input(&mut self, now: Instant) -> TickInput {
        let held = self.held(now);
        for (key, is_held) in [
            (HeldKey::Left, held.left),
            (HeldKey::Right, held.right),
            (HeldKey::Down, held.down),
        ] {
            if !is_held {
                *self.slot(key) = None;
            }
        }

        let mut input = std::mem::take(&mut self.pending);
        input.held = held;
        input
    }

    pub fn reset(&mut self) {
        self.left = None;
        self.right = None;
        self.down = None;
        self.pending = TickInput::new();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
