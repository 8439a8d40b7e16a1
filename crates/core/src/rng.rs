//! RNG module - seeded random piece generation
//!
//! Each piece is drawn uniformly from the seven kinds and receives a uniformly random
//! number of quarter turns. The generator owns its PRNG, so the same seed always
//! replays the same sequence of pieces.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pieces::Piece;
use crate::types::PieceKind;

/// Seeded source of random pieces.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: StdRng,
    seed: u64,
}

impl PieceGenerator {
    /// Create a new generator with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Draw the next piece.
    pub fn random_piece(&mut self) -> Piece {
        let kind = PieceKind::ALL[self.rng.random_range(0..PieceKind::ALL.len())];
        let rotation = self.rng.random_range(0..4u8);
        Piece::new(kind, rotation)
    }

    /// Derive a fresh seed from this generator (used when restarting a game).
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }

    /// Seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
