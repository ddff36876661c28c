//! Move sources.
//!
//! A `Player` picks one move per round from the view it is given. The engine
//! never sees an illegal move: each source filters Grab at zero blocks itself.

pub mod interactive;
pub mod random;

use std::io;
use std::str::FromStr;

use crate::game::{Move, PlayerView};

pub use interactive::Interactive;
pub use random::RandomPlayer;

/// Errors a move source can hit while choosing.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("input closed before {0} chose a move")]
    InputClosed(String),

    #[error("{0} has no legal move")]
    NoLegalMove(String),

    #[error("i/o error while reading a move: {0}")]
    Io(#[from] io::Error),
}

/// A strategy that chooses a move each round.
pub trait Player {
    fn name(&self) -> &str;

    /// Returns a move that is legal for `view.own`.
    fn choose(&mut self, view: &PlayerView) -> Result<Move, PlayerError>;
}

/// Which kind of move source occupies a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Random,
}

impl FromStr for PlayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(PlayerKind::Human),
            "random" => Ok(PlayerKind::Random),
            other => Err(format!("unknown player kind '{}'", other)),
        }
    }
}
