//! Self-play batch CLI.
//!
//! Plays random-vs-random footsies matches and outputs one JSON record per
//! match as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --matches N       Number of matches to play (default: 100)
//!   --games N         Games per match (default: 3)
//!   --blocks N        Blocks per player per match (default: 3)
//!   --round-limit N   Rounds per match before a draw, 0 for none (default: 50)
//!   --threads N       Number of parallel threads (default: 4)
//!   --seed N          Base random seed, 0 for entropy (default: 0)
//!   --output FILE     Output file path (default: stdout)
//!   --quiet           Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::time::Instant;

use tracing::info;
use tracing_subscriber::EnvFilter;

use footsies::options::{apply_match_flag, next_value, parse_value, OptionsError};
use footsies::selfplay::{self, SelfPlayConfig, Summary};

struct Args {
    config: SelfPlayConfig,
    output_path: Option<String>,
}

fn parse<'a, I>(args: I) -> Result<Args, OptionsError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut config = SelfPlayConfig::default();
    let mut output_path = None;
    let mut args = args.into_iter();

    while let Some(flag) = args.next() {
        if apply_match_flag(&mut config.match_config, flag, &mut args)? {
            continue;
        }
        match flag {
            "--matches" => config.num_matches = parse_value(flag, next_value(flag, &mut args)?)?,
            "--threads" => config.threads = parse_value(flag, next_value(flag, &mut args)?)?,
            "--seed" => config.seed = parse_value(flag, next_value(flag, &mut args)?)?,
            "--output" => output_path = Some(next_value(flag, &mut args)?.to_string()),
            "--quiet" => config.quiet = true,
            "--help" | "-h" => return Err(OptionsError::Help),
            other => return Err(OptionsError::UnknownArgument(other.to_string())),
        }
    }

    Ok(Args { config, output_path })
}

fn main() -> ExitCode {
    let raw: Vec<String> = env::args().skip(1).collect();
    let args = match parse(raw.iter().map(String::as_str)) {
        Ok(args) => args,
        Err(OptionsError::Help) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            return ExitCode::from(2);
        }
    };
    let config = args.config;

    let default_level = if config.quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!(
        matches = config.num_matches,
        games = config.match_config.games,
        blocks = config.match_config.blocks,
        round_limit = ?config.match_config.round_limit,
        threads = config.threads,
        "starting self-play"
    );

    let start = Instant::now();
    let records = match selfplay::run_self_play(&config) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("self-play failed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let elapsed = start.elapsed();
    info!(
        matches = records.len(),
        elapsed_secs = elapsed.as_secs_f64(),
        "self-play complete"
    );

    let written = match &args.output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&records, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&records, &mut writer)
        }
    };
    if let Err(e) = written {
        eprintln!("failed to write output: {}", e);
        return ExitCode::FAILURE;
    }
    if let Some(path) = &args.output_path {
        info!(path = %path, "wrote {} matches", records.len());
    }

    if !config.quiet {
        eprintln!("{}", Summary::from_records(&records));
    }
    ExitCode::SUCCESS
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --matches N        Number of matches to play (default: 100)");
    eprintln!("  --games N          Games per match (default: 3)");
    eprintln!("  --blocks N         Blocks per player per match (default: 3)");
    eprintln!("  --round-limit N    Rounds per match before a draw, 0 for none (default: 50)");
    eprintln!("  --threads N        Number of parallel threads (default: 4)");
    eprintln!("  --seed N           Base random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE      Output file path (default: stdout)");
    eprintln!("  --quiet            Suppress progress and summary output");
    eprintln!("  --help             Show this help");
}
