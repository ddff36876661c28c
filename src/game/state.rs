//! Per-player state and the view handed to move sources.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::moves::{legal_moves, Move};

/// Block count each player starts a game with unless configured otherwise.
pub const DEFAULT_BLOCKS: u8 = 3;

/// Which seat a player occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    One,
    Two,
}

impl Side {
    /// Both sides in turn order.
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    /// Array index for per-side storage.
    pub const fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    /// The player number shown to users and used as a result code.
    pub const fn number(self) -> u8 {
        match self {
            Side::One => 1,
            Side::Two => 2,
        }
    }

    pub const fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Mutable state of one player within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerState {
    /// Remaining blocks. Never negative; spending a block at zero is a no-op.
    pub blocks: u8,
    /// True while the attack recorded last round is still live.
    pub has_attack: bool,
}

impl PlayerState {
    /// Creates a fresh state with `blocks` blocks and no pending attack.
    pub const fn new(blocks: u8) -> Self {
        Self { blocks, has_attack: false }
    }

    pub const fn can_grab(&self) -> bool {
        Move::Grab.is_legal_with(self.blocks)
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCKS)
    }
}

/// Everything a move source may look at before choosing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerView {
    pub own: PlayerState,
    pub opponent: PlayerState,
    /// The opponent's move from the previous round of this match, if any.
    pub opponent_previous: Option<Move>,
    /// Rounds left after this one when a round limit is configured.
    pub rounds_left: Option<u32>,
}

impl PlayerView {
    /// Moves this player may select right now.
    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self.own.blocks)
    }
}
