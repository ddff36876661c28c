//! Footsies library.
//!
//! Exposes the move catalog, round resolver, move sources, and match engine
//! for use by the binaries and integration tests.

pub mod engine;
pub mod game;
pub mod options;
pub mod player;
pub mod protocol;
pub mod resolve;
pub mod selfplay;
