//! The interactive game loop.
//!
//! Generic over its input and output so that whole games can be scripted.

use std::io::{self, BufRead, Write};

use chess_core::Color;
use chess_engine::{Game, GameResult, Searcher};

use crate::config::PlayConfig;

/// One game between a human and the engine.
pub struct Session {
    game: Game,
    searcher: Searcher,
    human: Color,
    depth: u32,
    unicode: bool,
}

impl Session {
    pub fn new(game: Game, config: &PlayConfig) -> Self {
        Session {
            game,
            searcher: Searcher::new(),
            human: config.human.into(),
            depth: config.depth,
            unicode: config.unicode,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Plays until the game ends or `input` runs dry.
    ///
    /// Returns the result, or `None` if the human stopped early.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> io::Result<Option<GameResult>> {
        loop {
            self.print_board(&mut output)?;

            if let Some(result) = self.game.result() {
                writeln!(output, "{}", result)?;
                return Ok(Some(result));
            }

            if self.game.position().side_to_move == self.human {
                if !self.human_turn(&mut input, &mut output)? {
                    return Ok(None);
                }
            } else if !self.engine_turn(&mut output)? {
                return Ok(None);
            }
        }
    }

    fn print_board<W: Write>(&self, output: &mut W) -> io::Result<()> {
        if self.unicode {
            writeln!(output, "{:#}", self.game.position())
        } else {
            writeln!(output, "{}", self.game.position())
        }
    }

    /// Prompts until a legal move is entered. Returns false on end of input.
    fn human_turn<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> io::Result<bool> {
        loop {
            write!(output, "{} to move: ", self.human)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            let text = line.trim();
            if text.is_empty() {
                continue;
            }

            match self.game.make_move_uci(text) {
                Ok(()) => return Ok(true),
                Err(e) => {
                    tracing::debug!(input = text, error = %e, "move rejected");
                    writeln!(output, "{}", e)?;
                }
            }
        }
    }

    /// Plays the engine's reply. Returns false if it has none to offer.
    fn engine_turn<W: Write>(&mut self, output: &mut W) -> io::Result<bool> {
        let Some(m) = self.game.best_move(&mut self.searcher, self.depth) else {
            tracing::warn!(fen = %self.game.to_fen(), "engine found no move");
            return Ok(false);
        };
        tracing::info!(mv = %m, depth = self.depth, "engine move");
        writeln!(output, "Engine plays {}", m)?;
        if let Err(e) = self.game.make_move(m) {
            tracing::error!(mv = %m, error = %e, "engine produced an unplayable move");
            return Ok(false);
        }
        Ok(true)
    }
}
