//! Round resolution.
//!
//! Turns a pair of simultaneous moves into an effect and applies it to both
//! players' state.

pub mod round;

pub use round::{effect_for, Effect, RoundOutcome, RoundResolver};
