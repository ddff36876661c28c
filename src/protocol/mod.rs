//! Player-facing text protocol.
//!
//! Parsing of move tokens typed by a player, and rendering of the narration
//! and status lines the engine prints after every round.

pub mod parser;
pub mod status;

pub use parser::{parse_move_token, MoveTokenError};
pub use status::{format_choices, format_status, format_view_lines, narrate};
