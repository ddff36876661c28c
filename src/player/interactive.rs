//! A human player reading move tokens from a line-oriented input.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use tracing::debug;

use super::{Player, PlayerError};
use crate::game::{Move, PlayerView};
use crate::protocol::{format_view_lines, parse_move_token};

const PROMPT: &str = "Choose your move: ";

/// Prompts on `output` and reads moves from `input` until a legal one arrives.
///
/// Unknown tokens and a Grab at zero blocks are dropped without comment and
/// the prompt is repeated. The input sits behind `Rc<RefCell<_>>` so two
/// seats at one terminal can read from the same buffered reader.
pub struct Interactive<R, W> {
    name: String,
    input: Rc<RefCell<R>>,
    output: W,
}

impl<R: BufRead, W: Write> Interactive<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self::shared(name, Rc::new(RefCell::new(input)), output)
    }

    /// Creates a player reading from an input other seats may also hold.
    pub fn shared(name: impl Into<String>, input: Rc<RefCell<R>>, output: W) -> Self {
        Interactive {
            name: name.into(),
            input,
            output,
        }
    }

    /// Consumes the player, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn write_view(&mut self, view: &PlayerView) -> Result<(), PlayerError> {
        for line in format_view_lines(&self.name, &view.own, &view.opponent, view.rounds_left) {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Player for Interactive<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&mut self, view: &PlayerView) -> Result<Move, PlayerError> {
        self.write_view(view)?;

        let mut line = String::new();
        loop {
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            line.clear();
            let read = self.input.borrow_mut().read_line(&mut line)?;
            if read == 0 {
                return Err(PlayerError::InputClosed(self.name.clone()));
            }

            match parse_move_token(&line) {
                Ok(mv) if mv.is_legal_with(view.own.blocks) => return Ok(mv),
                Ok(mv) => {
                    debug!(player = %self.name, %mv, blocks = view.own.blocks, "illegal move rejected");
                }
                Err(e) => {
                    debug!(player = %self.name, error = %e, "move token rejected");
                }
            }
        }
    }
}
