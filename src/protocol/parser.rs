//! Move token parser.
//!
//! Turns one line of player input into a `Move`. Legality against the
//! player's current state is checked by the caller, not here.

use crate::game::Move;

/// Errors that can occur while parsing a move token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveTokenError {
    #[error("empty move token")]
    Empty,

    #[error("unknown move token: '{0}' (expected a, b, g or dp)")]
    Unknown(String),
}

/// Parses a single line of input into a `Move`.
///
/// Surrounding whitespace is ignored and tokens are matched case-insensitively.
pub fn parse_move_token(line: &str) -> Result<Move, MoveTokenError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(MoveTokenError::Empty);
    }

    let token = trimmed.to_ascii_lowercase();
    Move::from_token(&token).ok_or_else(|| MoveTokenError::Unknown(trimmed.to_string()))
}
