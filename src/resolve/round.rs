//! Round resolution.
//!
//! Each round both players reveal a move at once. The outcome depends only on
//! `move1.value - move2.value` plus one round of look-back: whether either
//! player holds a live attack from the round before.

use tracing::debug;

use crate::game::{Move, PlayerState, Side};

/// The outcome bucket of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Equal moves; nothing happens.
    Cancel,
    /// The blocker absorbs the hit and spends one block.
    Chip { blocker: Side },
    /// A grab beats a block; the thrown player loses.
    Throw { thrown: Side },
    /// The striker is recorded as holding a live attack. If the opponent
    /// already held one from the previous round, the striker loses.
    Strike { striker: Side },
    /// A block answers a dragon punch; the puncher loses.
    Counter { puncher: Side },
    /// Any other pairing: the smaller move value loses.
    DragonPunch { loser: Side },
}

impl Effect {
    /// The side this effect defeats regardless of prior state.
    pub const fn immediate_loser(self) -> Option<Side> {
        match self {
            Effect::Throw { thrown } => Some(thrown),
            Effect::Counter { puncher } => Some(puncher),
            Effect::DragonPunch { loser } => Some(loser),
            Effect::Cancel | Effect::Chip { .. } | Effect::Strike { .. } => None,
        }
    }
}

/// Maps an ordered pair of moves to its effect. Total over the catalog.
pub fn effect_for(move1: Move, move2: Move) -> Effect {
    let diff = move1.value() - move2.value();
    match diff {
        0 => Effect::Cancel,
        1 => Effect::Chip { blocker: Side::One },
        -1 => Effect::Chip { blocker: Side::Two },
        2 => Effect::Throw { thrown: Side::Two },
        -2 => Effect::Throw { thrown: Side::One },
        3 => Effect::Strike { striker: Side::One },
        -3 => Effect::Strike { striker: Side::Two },
        6 => Effect::Counter { puncher: Side::One },
        -6 => Effect::Counter { puncher: Side::Two },
        // Remaining magnitudes (4 and 7): larger value wins.
        d if d > 0 => Effect::DragonPunch { loser: Side::Two },
        _ => Effect::DragonPunch { loser: Side::One },
    }
}

/// The full result of one resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    pub move1: Move,
    pub move2: Move,
    pub effect: Effect,
    /// The side that lost this round, if any. Player 1 takes precedence.
    pub loser: Option<Side>,
}

impl RoundOutcome {
    pub fn winner(&self) -> Option<Side> {
        self.loser.map(Side::opponent)
    }
}

/// Owns both players' state for one match and applies rounds to it.
///
/// Attack status has exactly one round of memory: after every round each
/// player's `has_attack` is rewritten from that round's effect alone.
#[derive(Debug, Clone)]
pub struct RoundResolver {
    starting_blocks: u8,
    players: [PlayerState; 2],
}

impl RoundResolver {
    /// Creates a resolver with both players at `starting_blocks` blocks.
    pub fn new(starting_blocks: u8) -> Self {
        RoundResolver {
            starting_blocks,
            players: [PlayerState::new(starting_blocks); 2],
        }
    }

    pub fn player(&self, side: Side) -> &PlayerState {
        &self.players[side.index()]
    }

    /// Restores both players to the starting state for a new match.
    pub fn reset(&mut self) {
        self.players = [PlayerState::new(self.starting_blocks); 2];
    }

    /// Applies one round and returns its outcome.
    pub fn resolve(&mut self, move1: Move, move2: Move) -> RoundOutcome {
        let effect = effect_for(move1, move2);
        let mut lost = [false; 2];
        let mut live_attack = [false; 2];

        match effect {
            Effect::Cancel => {}
            Effect::Chip { blocker } => {
                let state = &mut self.players[blocker.index()];
                if state.blocks == 0 {
                    debug!(%blocker, "block spent with none left; clamped at zero");
                }
                state.blocks = state.blocks.saturating_sub(1);
            }
            Effect::Strike { striker } => {
                live_attack[striker.index()] = true;
                if self.players[striker.opponent().index()].has_attack {
                    lost[striker.index()] = true;
                }
            }
            Effect::Throw { .. } | Effect::Counter { .. } | Effect::DragonPunch { .. } => {
                if let Some(side) = effect.immediate_loser() {
                    lost[side.index()] = true;
                }
            }
        }

        for side in Side::BOTH {
            self.players[side.index()].has_attack = live_attack[side.index()];
        }

        let loser = if lost[Side::One.index()] {
            Some(Side::One)
        } else if lost[Side::Two.index()] {
            Some(Side::Two)
        } else {
            None
        };

        debug!(
            move1 = move1.name(),
            move2 = move2.name(),
            ?effect,
            ?loser,
            "round resolved"
        );

        RoundOutcome { move1, move2, effect, loser }
    }
}
