//! Command-line options.
//!
//! Flags are parsed by hand into a `MatchConfig` plus seat settings. The
//! match flags are shared with the self-play binary through `apply_match_flag`.

use crate::engine::MatchConfig;
use crate::player::PlayerKind;

/// Errors produced while parsing command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("help requested")]
    Help,

    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("invalid value for {flag}: '{value}'")]
    InvalidValue { flag: String, value: String },

    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

/// Options for the interactive `footsies` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub config: MatchConfig,
    /// Who sits in seat two. Seat one is always a human.
    pub versus: PlayerKind,
    /// Seed for the random opponent (0 = entropy).
    pub seed: u64,
    pub p1_name: String,
    pub p2_name: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            config: MatchConfig::default(),
            versus: PlayerKind::Random,
            seed: 0,
            p1_name: "Player 1".to_string(),
            p2_name: None,
        }
    }
}

impl Options {
    /// Seat two's display name, defaulting by kind.
    pub fn p2_name(&self) -> &str {
        match (&self.p2_name, self.versus) {
            (Some(name), _) => name,
            (None, PlayerKind::Human) => "Player 2",
            (None, PlayerKind::Random) => "Random",
        }
    }
}

/// Parses `value` for `flag`, mapping failures to `InvalidValue`.
pub fn parse_value<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, OptionsError> {
    value.parse().map_err(|_| OptionsError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

/// Returns the value following `flag`, or `MissingValue`.
pub fn next_value<'a, I>(flag: &str, args: &mut I) -> Result<&'a str, OptionsError>
where
    I: Iterator<Item = &'a str>,
{
    args.next().ok_or_else(|| OptionsError::MissingValue(flag.to_string()))
}

/// Applies one of the shared match flags. Returns `Ok(false)` if `flag` is
/// not a match flag, leaving `args` untouched.
pub fn apply_match_flag<'a, I>(
    config: &mut MatchConfig,
    flag: &str,
    args: &mut I,
) -> Result<bool, OptionsError>
where
    I: Iterator<Item = &'a str>,
{
    match flag {
        "--games" => {
            let value = next_value(flag, args)?;
            let games: u32 = parse_value(flag, value)?;
            if games == 0 {
                return Err(OptionsError::InvalidValue {
                    flag: flag.to_string(),
                    value: value.to_string(),
                });
            }
            config.games = games;
        }
        "--blocks" => {
            config.blocks = parse_value(flag, next_value(flag, args)?)?;
        }
        "--round-limit" => {
            let limit: u32 = parse_value(flag, next_value(flag, args)?)?;
            config.round_limit = if limit == 0 { None } else { Some(limit) };
        }
        _ => return Ok(false),
    }
    Ok(true)
}

/// Parses the interactive binary's arguments (without the program name).
pub fn parse_args<'a, I>(args: I) -> Result<Options, OptionsError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(flag) = args.next() {
        if apply_match_flag(&mut options.config, flag, &mut args)? {
            continue;
        }
        match flag {
            "--versus" => {
                options.versus = parse_value(flag, next_value(flag, &mut args)?)?;
            }
            "--seed" => {
                options.seed = parse_value(flag, next_value(flag, &mut args)?)?;
            }
            "--p1-name" => {
                options.p1_name = next_value(flag, &mut args)?.to_string();
            }
            "--p2-name" => {
                options.p2_name = Some(next_value(flag, &mut args)?.to_string());
            }
            "--help" | "-h" => return Err(OptionsError::Help),
            other => return Err(OptionsError::UnknownArgument(other.to_string())),
        }
    }

    Ok(options)
}
