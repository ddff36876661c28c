//! Uniform random opponent.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{Player, PlayerError};
use crate::game::{Move, PlayerView};

/// Picks uniformly among the legal moves, ignoring everything else in the view.
pub struct RandomPlayer {
    name: String,
    rng: SmallRng,
}

impl RandomPlayer {
    /// Creates a player seeded from entropy.
    pub fn new(name: impl Into<String>) -> Self {
        RandomPlayer {
            name: name.into(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates a reproducible player.
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        RandomPlayer {
            name: name.into(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&mut self, view: &PlayerView) -> Result<Move, PlayerError> {
        view.legal_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| PlayerError::NoLegalMove(self.name.clone()))
    }
}
