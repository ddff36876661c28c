//! The move catalog.
//!
//! Four fixed moves, each carrying a distinct power-of-two value. Round
//! resolution switches on the difference of the two values, so the values
//! must stay exactly {1, 2, 4, 8}.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of moves in the catalog.
pub const MOVE_COUNT: usize = 4;

/// All moves in ascending value order.
pub const ALL_MOVES: [Move; MOVE_COUNT] = [Move::Attack, Move::Block, Move::Grab, Move::DragonPunch];

/// One of the four actions a player can take in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    Attack,
    Block,
    Grab,
    DragonPunch,
}

impl Move {
    /// Returns the integer value used for difference-based dispatch.
    pub const fn value(self) -> i32 {
        match self {
            Move::Attack => 1,
            Move::Block => 2,
            Move::Grab => 4,
            Move::DragonPunch => 8,
        }
    }

    /// Returns the display name.
    pub const fn name(self) -> &'static str {
        match self {
            Move::Attack => "Attack",
            Move::Block => "Block",
            Move::Grab => "Grab",
            Move::DragonPunch => "Dragon Punch",
        }
    }

    /// Returns the input token a player types to select this move.
    pub const fn token(self) -> &'static str {
        match self {
            Move::Attack => "a",
            Move::Block => "b",
            Move::Grab => "g",
            Move::DragonPunch => "dp",
        }
    }

    /// Looks up a move by its exact input token.
    pub fn from_token(token: &str) -> Option<Move> {
        ALL_MOVES.iter().copied().find(|m| m.token() == token)
    }

    /// Whether a player holding `blocks` blocks may select this move.
    /// Grab needs at least one block.
    pub const fn is_legal_with(self, blocks: u8) -> bool {
        !matches!(self, Move::Grab) || blocks > 0
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the moves a player holding `blocks` blocks may select.
pub fn legal_moves(blocks: u8) -> Vec<Move> {
    ALL_MOVES
        .iter()
        .copied()
        .filter(|m| m.is_legal_with(blocks))
        .collect()
}
