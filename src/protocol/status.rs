//! Text rendering for round narration and status lines.
//!
//! The engine writes these lines to its output; nothing here does I/O.

use crate::game::{Move, PlayerState, Side};
use crate::resolve::Effect;

/// Describes what happened in a round.
pub fn narrate(effect: Effect) -> String {
    match effect {
        Effect::Cancel => "Same option chosen!".to_string(),
        Effect::Chip { blocker } => format!("{} blocks a hit!", blocker),
        Effect::Throw { thrown } => format!("{} gets thrown!", thrown),
        Effect::Strike { striker } => format!("{} lands a hit!", striker),
        Effect::Counter { puncher } => format!(
            "{} blocks the Dragon Punch and counters!",
            puncher.opponent()
        ),
        Effect::DragonPunch { loser } => {
            format!("{} lands a Dragon Punch!", loser.opponent())
        }
    }
}

/// Formats the move line: `<name1> chose <move1>. <name2> chose <move2>.`
pub fn format_choices(name1: &str, move1: Move, name2: &str, move2: Move) -> String {
    format!("{} chose {}. {} chose {}.", name1, move1, name2, move2)
}

fn format_player(side: Side, state: &PlayerState) -> String {
    let blocks = if state.blocks == 1 { "block" } else { "blocks" };
    let attack = if state.has_attack { ", attack landed" } else { "" };
    format!("{}: {} {}{}", side, state.blocks, blocks, attack)
}

/// Formats the after-round status line from both players' state.
pub fn format_status(p1: &PlayerState, p2: &PlayerState) -> String {
    format!(
        "{} | {}",
        format_player(Side::One, p1),
        format_player(Side::Two, p2)
    )
}

/// Formats the prompt header shown to a human before they choose.
pub fn format_view_lines(
    name: &str,
    own: &PlayerState,
    opponent: &PlayerState,
    rounds_left: Option<u32>,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(3);
    match rounds_left {
        Some(n) => lines.push(format!("Your turn, {}! {} rounds left.", name, n)),
        None => lines.push(format!("Your turn, {}!", name)),
    }
    lines.push(format!(
        "You have {} blocks left{}.",
        own.blocks,
        if own.has_attack { " and have landed an attack" } else { "" }
    ));
    lines.push(format!(
        "Your opponent has {} blocks left{}.",
        opponent.blocks,
        if opponent.has_attack { " and has landed an attack" } else { "" }
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrate_names_the_acting_side() {
        assert_eq!(narrate(Effect::Cancel), "Same option chosen!");
        assert_eq!(
            narrate(Effect::Chip { blocker: Side::Two }),
            "Player 2 blocks a hit!"
        );
        assert_eq!(
            narrate(Effect::Counter { puncher: Side::One }),
            "Player 2 blocks the Dragon Punch and counters!"
        );
        assert_eq!(
            narrate(Effect::DragonPunch { loser: Side::Two }),
            "Player 1 lands a Dragon Punch!"
        );
    }

    #[test]
    fn status_line_reports_blocks_and_attacks() {
        let p1 = PlayerState { blocks: 1, has_attack: true };
        let p2 = PlayerState { blocks: 3, has_attack: false };
        assert_eq!(
            format_status(&p1, &p2),
            "Player 1: 1 block, attack landed | Player 2: 3 blocks"
        );
    }

    #[test]
    fn choices_line() {
        assert_eq!(
            format_choices("Ann", Move::Grab, "Random", Move::DragonPunch),
            "Ann chose Grab. Random chose Dragon Punch."
        );
    }

    #[test]
    fn view_lines_include_round_limit() {
        let own = PlayerState::new(2);
        let opp = PlayerState { blocks: 0, has_attack: true };
        let lines = format_view_lines("Ann", &own, &opp, Some(4));
        assert_eq!(lines[0], "Your turn, Ann! 4 rounds left.");
        assert_eq!(lines[1], "You have 2 blocks left.");
        assert_eq!(lines[2], "Your opponent has 0 blocks left and has landed an attack.");

        let lines = format_view_lines("Ann", &own, &opp, None);
        assert_eq!(lines[0], "Your turn, Ann!");
    }
}
