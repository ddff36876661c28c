//! Game and match loop.
//!
//! Drives two move sources through the round resolver. A match plays a fixed
//! number of games and compares victories. Player state and the round budget
//! belong to the match: blocks and pending attacks carry from one game into
//! the next, and once the round limit is spent every remaining game is drawn.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::game::{Move, PlayerView, Side, DEFAULT_BLOCKS};
use crate::player::{Player, PlayerError};
use crate::protocol::{format_choices, format_status, narrate};
use crate::resolve::RoundResolver;

/// Default number of games in a match.
pub const DEFAULT_GAMES: u32 = 3;

/// Match settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Games played per match. Every game is played; there is no early stop.
    pub games: u32,
    /// Blocks each player starts the match with.
    pub blocks: u8,
    /// Maximum rounds across the whole match. The game in progress when it
    /// runs out, and every game after it, is drawn.
    pub round_limit: Option<u32>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            games: DEFAULT_GAMES,
            blocks: DEFAULT_BLOCKS,
            round_limit: None,
        }
    }
}

/// Errors that end a match early.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Player(#[from] PlayerError),

    #[error("failed to write game output: {0}")]
    Output(#[from] io::Error),
}

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Winner(Side),
    Draw,
}

impl MatchResult {
    /// 1 or 2 for the winning player, 0 for a draw.
    pub const fn code(self) -> u8 {
        match self {
            MatchResult::Winner(side) => side.number(),
            MatchResult::Draw => 0,
        }
    }
}

/// How a single game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// None when the round limit ran out.
    pub winner: Option<Side>,
    pub rounds: u32,
}

/// How a match ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub result: MatchResult,
    /// Victories indexed by `Side::index()`.
    pub victories: [u32; 2],
    pub games: Vec<GameSummary>,
}

/// Runs games between two players.
pub struct Engine {
    config: MatchConfig,
    players: [Box<dyn Player>; 2],
    resolver: RoundResolver,
    previous: [Option<Move>; 2],
    rounds_played: u32,
}

impl Engine {
    pub fn new(config: MatchConfig, player1: Box<dyn Player>, player2: Box<dyn Player>) -> Self {
        Engine {
            config,
            players: [player1, player2],
            resolver: RoundResolver::new(config.blocks),
            previous: [None; 2],
            rounds_played: 0,
        }
    }

    pub fn resolver(&self) -> &RoundResolver {
        &self.resolver
    }

    /// Builds what `side` sees before choosing in the current round.
    fn view_for(&self, side: Side, rounds_left: Option<u32>) -> PlayerView {
        PlayerView {
            own: *self.resolver.player(side),
            opponent: *self.resolver.player(side.opponent()),
            opponent_previous: self.previous[side.opponent().index()],
            rounds_left,
        }
    }

    /// Plays one game from the current player state, writing the transcript
    /// to `out`.
    pub fn play_game<W: Write>(&mut self, out: &mut W) -> Result<GameSummary, EngineError> {
        let mut round = 0u32;

        loop {
            if let Some(limit) = self.config.round_limit {
                if self.rounds_played >= limit {
                    writeln!(out, "Out of rounds. The game is a draw.")?;
                    info!(rounds = round, "game drawn on round limit");
                    return Ok(GameSummary { winner: None, rounds: round });
                }
            }
            round += 1;
            self.rounds_played += 1;

            let rounds_left = match self.config.round_limit {
                Some(limit) => {
                    writeln!(out, "Round {}/{}", self.rounds_played, limit)?;
                    Some(limit - self.rounds_played)
                }
                None => None,
            };

            let move1 = self.players[0].choose(&self.view_for(Side::One, rounds_left))?;
            let move2 = self.players[1].choose(&self.view_for(Side::Two, rounds_left))?;
            self.previous = [Some(move1), Some(move2)];

            writeln!(
                out,
                "{}",
                format_choices(self.players[0].name(), move1, self.players[1].name(), move2)
            )?;

            let outcome = self.resolver.resolve(move1, move2);
            writeln!(out, "{}", narrate(outcome.effect))?;
            writeln!(
                out,
                "{}",
                format_status(self.resolver.player(Side::One), self.resolver.player(Side::Two))
            )?;

            if let Some(winner) = outcome.winner() {
                writeln!(out, "{} wins the game.", winner)?;
                info!(%winner, rounds = round, "game over");
                return Ok(GameSummary { winner: Some(winner), rounds: round });
            }
        }
    }

    /// Plays every game of the match and reports the overall result.
    pub fn play_match<W: Write>(&mut self, out: &mut W) -> Result<MatchSummary, EngineError> {
        let mut victories = [0u32; 2];
        let mut games = Vec::with_capacity(self.config.games as usize);
        self.resolver.reset();
        self.previous = [None; 2];
        self.rounds_played = 0;

        for game in 1..=self.config.games {
            if self.config.games > 1 {
                writeln!(out, "Game {}/{}", game, self.config.games)?;
            }
            let summary = self.play_game(out)?;
            if let Some(winner) = summary.winner {
                victories[winner.index()] += 1;
            }
            debug!(game, ?victories, "victory tally");
            games.push(summary);
        }

        let result = if victories[0] > victories[1] {
            MatchResult::Winner(Side::One)
        } else if victories[1] > victories[0] {
            MatchResult::Winner(Side::Two)
        } else {
            MatchResult::Draw
        };

        match result {
            MatchResult::Winner(side) => writeln!(out, "{} wins the match.", side)?,
            MatchResult::Draw => writeln!(out, "The match is a draw.")?,
        }
        out.flush()?;
        info!(?result, ?victories, "match over");

        Ok(MatchSummary { result, victories, games })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Plays a fixed script and records every view it was shown.
    struct Scripted {
        name: &'static str,
        moves: VecDeque<Move>,
        views: std::rc::Rc<std::cell::RefCell<Vec<PlayerView>>>,
    }

    impl Scripted {
        fn new(name: &'static str, moves: &[Move]) -> Self {
            Scripted {
                name,
                moves: moves.iter().copied().collect(),
                views: Default::default(),
            }
        }
    }

    impl Player for Scripted {
        fn name(&self) -> &str {
            self.name
        }

        fn choose(&mut self, view: &PlayerView) -> Result<Move, PlayerError> {
            self.views.borrow_mut().push(*view);
            self.moves
                .pop_front()
                .ok_or_else(|| PlayerError::InputClosed(self.name.to_string()))
        }
    }

    fn engine(config: MatchConfig, p1: &[Move], p2: &[Move]) -> Engine {
        Engine::new(
            config,
            Box::new(Scripted::new("Ann", p1)),
            Box::new(Scripted::new("Bob", p2)),
        )
    }

    fn single_game() -> MatchConfig {
        MatchConfig { games: 1, ..MatchConfig::default() }
    }

    #[test]
    fn default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.games, 3);
        assert_eq!(config.blocks, 3);
        assert_eq!(config.round_limit, None);
    }

    #[test]
    fn game_ends_on_first_loss() {
        use Move::*;
        let mut engine = engine(single_game(), &[Attack, Block], &[Block, Grab]);
        let mut out = Vec::new();
        let summary = engine.play_match(&mut out).unwrap();

        assert_eq!(summary.result, MatchResult::Winner(Side::Two));
        assert_eq!(summary.result.code(), 2);
        assert_eq!(summary.games, vec![GameSummary { winner: Some(Side::Two), rounds: 2 }]);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Ann chose Attack. Bob chose Block."));
        assert!(text.contains("Player 2 blocks a hit!"));
        assert!(text.contains("Player 1: 3 blocks | Player 2: 2 blocks"));
        assert!(text.contains("Player 1 gets thrown!"));
        assert!(text.contains("Player 2 wins the game."));
        assert!(text.ends_with("Player 2 wins the match.\n"));
    }

    #[test]
    fn round_limit_draws_the_game() {
        use Move::*;
        let config = MatchConfig { games: 1, round_limit: Some(2), ..MatchConfig::default() };
        let mut engine = engine(config, &[Attack, Block], &[Attack, Block]);
        let mut out = Vec::new();
        let summary = engine.play_match(&mut out).unwrap();

        assert_eq!(summary.result, MatchResult::Draw);
        assert_eq!(summary.games[0], GameSummary { winner: None, rounds: 2 });
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Round 1/2"));
        assert!(text.contains("Round 2/2"));
        assert!(text.contains("The match is a draw."));
    }

    #[test]
    fn round_limit_spans_the_match() {
        use Move::*;
        // Game 1 is won in round 1, game 2 uses the last two rounds and runs
        // out, game 3 never starts a round. Scripts hold no further moves.
        let config = MatchConfig { games: 3, round_limit: Some(3), ..MatchConfig::default() };
        let mut engine = engine(config, &[DragonPunch, Attack, Block], &[Attack, Attack, Block]);
        let mut out = Vec::new();
        let summary = engine.play_match(&mut out).unwrap();

        assert_eq!(
            summary.games,
            vec![
                GameSummary { winner: Some(Side::One), rounds: 1 },
                GameSummary { winner: None, rounds: 2 },
                GameSummary { winner: None, rounds: 0 },
            ]
        );
        assert_eq!(summary.result, MatchResult::Winner(Side::One));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Round 3/3"));
        assert!(!text.contains("Round 4/3"));
        assert_eq!(text.matches("Out of rounds. The game is a draw.").count(), 2);
    }

    #[test]
    fn every_game_is_played_and_state_carries_over() {
        use Move::*;
        // Game 1: p1 chips twice then wins with a dragon punch.
        // Games 2 and 3: p2 wins by throw, then p1 wins by dragon punch.
        let p1 = Scripted::new("Ann", &[Block, Block, DragonPunch, Block, DragonPunch]);
        let views = p1.views.clone();
        let p2 = Scripted::new("Bob", &[Attack, Attack, Grab, Grab, Attack]);
        let mut engine = Engine::new(MatchConfig::default(), Box::new(p1), Box::new(p2));
        let mut out = Vec::new();
        let summary = engine.play_match(&mut out).unwrap();

        assert_eq!(summary.games.len(), 3);
        assert_eq!(summary.victories, [2, 1]);
        assert_eq!(summary.result, MatchResult::Winner(Side::One));
        // Blocks spent in game 1 are still spent in games 2 and 3.
        let views = views.borrow();
        assert_eq!(views[3].own.blocks, 1);
        assert_eq!(views[4].own.blocks, 1);
        assert_eq!(engine.resolver().player(Side::One).blocks, 1);
    }

    #[test]
    fn pending_attack_carries_into_next_game() {
        use Move::*;
        // Game 1 ends with p2 striking into p1's pending attack, which
        // leaves p2's flag set going into game 2.
        let config = MatchConfig { games: 2, ..MatchConfig::default() };
        let p1 = Scripted::new("Ann", &[Grab, Attack, Grab]);
        let views = p1.views.clone();
        let p2 = Scripted::new("Bob", &[Attack, Grab, Attack]);
        let mut engine = Engine::new(config, Box::new(p1), Box::new(p2));
        let summary = engine.play_match(&mut Vec::new()).unwrap();

        assert_eq!(summary.games[0], GameSummary { winner: Some(Side::One), rounds: 2 });
        assert!(views.borrow()[2].opponent.has_attack);
        // Game 2: p1 strikes while p2's attack is still live, so p1 loses.
        assert_eq!(summary.games[1], GameSummary { winner: Some(Side::Two), rounds: 1 });
        assert_eq!(summary.result, MatchResult::Draw);
    }

    #[test]
    fn new_match_starts_fresh() {
        use Move::*;
        let config = MatchConfig { games: 1, ..MatchConfig::default() };
        let mut engine = engine(config, &[Block, DragonPunch, DragonPunch], &[Attack, Attack, Attack]);
        engine.play_match(&mut Vec::new()).unwrap();
        assert_eq!(engine.resolver().player(Side::One).blocks, 2);
        engine.play_match(&mut Vec::new()).unwrap();
        assert_eq!(engine.resolver().player(Side::One).blocks, 3);
    }

    #[test]
    fn views_carry_previous_move_and_rounds_left() {
        use Move::*;
        let config = MatchConfig { games: 1, round_limit: Some(3), ..MatchConfig::default() };
        let p1 = Scripted::new("Ann", &[Grab, Attack]);
        let views = p1.views.clone();
        let p2 = Scripted::new("Bob", &[Attack, Grab]);
        let mut engine = Engine::new(config, Box::new(p1), Box::new(p2));
        engine.play_match(&mut Vec::new()).unwrap();

        let views = views.borrow();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].opponent_previous, None);
        assert_eq!(views[0].rounds_left, Some(2));
        assert_eq!(views[1].opponent_previous, Some(Attack));
        assert_eq!(views[1].rounds_left, Some(1));
        assert!(views[1].own.has_attack);
    }

    #[test]
    fn player_error_propagates() {
        let mut engine = engine(single_game(), &[], &[]);
        let err = engine.play_match(&mut Vec::new()).unwrap_err();
        assert!(matches!(err, EngineError::Player(PlayerError::InputClosed(_))));
    }
}
