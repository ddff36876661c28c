//! Game vocabulary.
//!
//! The fixed move catalog, per-player state, and the view a move source
//! sees before picking its move.

pub mod moves;
pub mod state;

pub use moves::{legal_moves, Move, ALL_MOVES, MOVE_COUNT};
pub use state::{PlayerState, PlayerView, Side, DEFAULT_BLOCKS};
