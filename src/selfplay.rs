//! Batch self-play between random players.
//!
//! Plays many independent matches, optionally across a rayon thread pool,
//! and records each one as a JSON line. Every match gets its own seed so any
//! single record can be replayed.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{Engine, EngineError, GameSummary, MatchConfig, MatchResult};
use crate::game::Side;
use crate::player::RandomPlayer;

/// Round limit applied when self-play is not given one, so batches always finish.
pub const DEFAULT_SELFPLAY_ROUND_LIMIT: u32 = 50;

/// Configuration for a self-play batch.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of matches to play.
    pub num_matches: usize,
    /// Settings shared by every match.
    pub match_config: MatchConfig,
    /// Number of parallel threads for concurrent matches.
    pub threads: usize,
    /// Base random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-match progress events.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_matches: 100,
            match_config: MatchConfig {
                round_limit: Some(DEFAULT_SELFPLAY_ROUND_LIMIT),
                ..MatchConfig::default()
            },
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// Errors that stop a self-play batch.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("self-play worker thread panicked")]
    WorkerPanicked,

    #[error("match {match_id} failed: {source}")]
    Match {
        match_id: usize,
        #[source]
        source: EngineError,
    },
}

/// One finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: usize,
    pub seed: u64,
    pub config: MatchConfig,
    pub result: MatchResult,
    pub victories: [u32; 2],
    pub games: Vec<GameSummary>,
}

/// Plays a single random-vs-random match from `seed`.
pub fn play_match(
    config: &MatchConfig,
    match_id: usize,
    seed: u64,
) -> Result<MatchRecord, SelfPlayError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let player1 = RandomPlayer::with_seed("Random 1", rng.gen());
    let player2 = RandomPlayer::with_seed("Random 2", rng.gen());
    let mut engine = Engine::new(*config, Box::new(player1), Box::new(player2));

    let summary = engine
        .play_match(&mut io::sink())
        .map_err(|source| SelfPlayError::Match { match_id, source })?;

    Ok(MatchRecord {
        match_id,
        seed,
        config: *config,
        result: summary.result,
        victories: summary.victories,
        games: summary.games,
    })
}

/// Seed for match `i`: derived from the base seed, or fresh entropy.
fn match_seed(base: u64, i: usize) -> u64 {
    if base != 0 {
        base.wrapping_add(i as u64)
    } else {
        rand::random()
    }
}

fn log_progress(record: &MatchRecord, done: usize, total: usize) {
    info!(
        match_id = record.match_id,
        result = ?record.result,
        victories = ?record.victories,
        "match {}/{} complete",
        done,
        total
    );
}

/// Runs a self-play batch and returns records in completion order.
///
/// When `config.threads > 1`, matches are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<MatchRecord>, SelfPlayError> {
    let mut records = Vec::with_capacity(config.num_matches);
    run_self_play_with_callback(config, |record| records.push(record))?;
    Ok(records)
}

/// Runs a self-play batch, calling `on_match` with each completed record.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_match: F) -> Result<(), SelfPlayError>
where
    F: FnMut(MatchRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_match)
    } else {
        run_self_play_sequential(config, on_match)
    }
}

fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_match: F) -> Result<(), SelfPlayError>
where
    F: FnMut(MatchRecord),
{
    for i in 0..config.num_matches {
        let record = play_match(&config.match_config, i, match_seed(config.seed, i))?;
        if !config.quiet {
            log_progress(&record, i + 1, config.num_matches);
        }
        on_match(record);
    }
    Ok(())
}

/// Plays matches on a rayon pool; finished records come back over a channel
/// and reach the callback on the calling thread.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_match: F) -> Result<(), SelfPlayError>
where
    F: FnMut(MatchRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let (tx, rx) = mpsc::channel::<Result<MatchRecord, SelfPlayError>>();
    let config_clone = config.clone();

    let handle = std::thread::spawn(move || {
        let completed = AtomicUsize::new(0);
        pool.install(|| {
            (0..config_clone.num_matches)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let seed = match_seed(config_clone.seed, i);
                    let result = play_match(&config_clone.match_config, i, seed);
                    if let Ok(record) = &result {
                        if !config_clone.quiet {
                            let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                            log_progress(record, n, config_clone.num_matches);
                        }
                    }
                    let _ = tx.send(result);
                });
        });
    });

    let mut first_error = None;
    for result in rx {
        match result {
            Ok(record) => on_match(record),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    handle.join().map_err(|_| SelfPlayError::WorkerPanicked)?;
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Writes records as JSONL (one JSON object per match, one per line).
pub fn write_jsonl<W: Write>(records: &[MatchRecord], out: &mut W) -> io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate statistics over a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub matches: usize,
    /// Match wins indexed by `Side::index()`.
    pub wins: [usize; 2],
    pub draws: usize,
    pub games: usize,
    /// Games that hit the round limit.
    pub drawn_games: usize,
    pub total_rounds: u64,
}

impl Summary {
    pub fn from_records(records: &[MatchRecord]) -> Self {
        let mut summary = Summary { matches: records.len(), ..Summary::default() };
        for record in records {
            match record.result {
                MatchResult::Winner(side) => summary.wins[side.index()] += 1,
                MatchResult::Draw => summary.draws += 1,
            }
            for game in &record.games {
                summary.games += 1;
                summary.total_rounds += u64::from(game.rounds);
                if game.winner.is_none() {
                    summary.drawn_games += 1;
                }
            }
        }
        summary
    }

    pub fn avg_rounds_per_game(&self) -> f64 {
        self.total_rounds as f64 / self.games.max(1) as f64
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.matches.max(1) as f64;
        writeln!(f, "=== Self-Play Summary ===")?;
        writeln!(f, "Matches: {}", self.matches)?;
        writeln!(f, "Games: {} ({} drawn on round limit)", self.games, self.drawn_games)?;
        writeln!(f, "Avg rounds/game: {:.2}", self.avg_rounds_per_game())?;
        for side in Side::BOTH {
            let wins = self.wins[side.index()];
            writeln!(f, "  {}: {} ({:.1}%)", side, wins, 100.0 * wins as f64 / total)?;
        }
        write!(f, "  Draws: {} ({:.1}%)", self.draws, 100.0 * self.draws as f64 / total)
    }
}
