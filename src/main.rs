//! Footsies -- an interactive two-player footsies duel.
//!
//! Seat one is a human typing move tokens on stdin; seat two is a random
//! opponent or a second human sharing the same terminal. Game text goes to
//! stdout, diagnostics go to stderr through `tracing`.

use std::cell::RefCell;
use std::env;
use std::io::{self, StdinLock};
use std::process::ExitCode;
use std::rc::Rc;

use tracing::error;
use tracing_subscriber::EnvFilter;

use footsies::engine::Engine;
use footsies::options::{parse_args, Options, OptionsError};
use footsies::player::{Interactive, Player, PlayerKind, RandomPlayer};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Stdin locked once for the whole process; every human seat reads through it.
type SharedStdin = Rc<RefCell<StdinLock<'static>>>;

fn human(name: &str, input: &SharedStdin) -> Box<dyn Player> {
    Box::new(Interactive::shared(name, Rc::clone(input), io::stdout()))
}

fn opponent(options: &Options, input: &SharedStdin) -> Box<dyn Player> {
    let name = options.p2_name();
    match options.versus {
        PlayerKind::Human => human(name, input),
        PlayerKind::Random if options.seed != 0 => {
            Box::new(RandomPlayer::with_seed(name, options.seed))
        }
        PlayerKind::Random => Box::new(RandomPlayer::new(name)),
    }
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(args.iter().map(String::as_str)) {
        Ok(options) => options,
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

    let input: SharedStdin = Rc::new(RefCell::new(io::stdin().lock()));
    let mut engine = Engine::new(
        options.config,
        human(&options.p1_name, &input),
        opponent(&options, &input),
    );
    let stdout = io::stdout();
    match engine.play_match(&mut stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "match aborted");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!("Usage: footsies [OPTIONS]");
    eprintln!();
    eprintln!("Moves: a = Attack, b = Block, g = Grab, dp = Dragon Punch");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N          Games per match (default: 3)");
    eprintln!("  --blocks N         Blocks per player per match (default: 3)");
    eprintln!("  --round-limit N    Rounds per match before a draw, 0 for none (default: 0)");
    eprintln!("  --versus KIND      Seat two: random or human (default: random)");
    eprintln!("  --seed N           Random opponent seed, 0 for entropy (default: 0)");
    eprintln!("  --p1-name NAME     Name of seat one (default: Player 1)");
    eprintln!("  --p2-name NAME     Name of seat two");
    eprintln!("  --help             Show this help");
}
