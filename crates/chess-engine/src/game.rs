//! A live game: the current position plus the moves that led to it.
//!
//! Unlike [`Position`], which applies whatever it is given, [`Game`] checks
//! every move against the legal move list, hands the turn over after each
//! move and tracks the result once the game ends.

use crate::movegen::legal_moves;
use crate::rules::{game_result, is_in_check, GameResult};
use crate::search::Searcher;
use crate::{MoveList, Position};
use chess_core::{FenError, Move, MoveParseError};
use thiserror::Error;

/// A recorded move in game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameMove {
    /// The move played.
    pub mov: Move,
    /// Reduced key of the position before the move.
    pub hash_before: u64,
}

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The move is well formed but not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// The move text could not be parsed.
    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveParseError),
    /// The game has already ended.
    #[error("game has already ended")]
    GameAlreadyOver,
}

/// A chess game with history tracking.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    moves: Vec<GameMove>,
    result: Option<GameResult>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Creates a game from a custom starting position.
    pub fn from_position(position: Position) -> Self {
        let result = game_result(&position);
        Game {
            position,
            moves: Vec::new(),
            result,
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    /// Returns a reference to the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns all legal moves in the current position.
    pub fn legal_moves(&self) -> MoveList {
        legal_moves(&self.position)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        is_in_check(&self.position)
    }

    /// Returns the game result if the game is over.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Returns the move history.
    pub fn move_history(&self) -> &[GameMove] {
        &self.moves
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Returns the FEN of the current position.
    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    /// Plays a move after checking it against the legal moves.
    pub fn make_move(&mut self, m: Move) -> Result<(), GameError> {
        if self.result.is_some() {
            return Err(GameError::GameAlreadyOver);
        }
        if !self.legal_moves().contains(m) {
            return Err(GameError::IllegalMove(m.to_uci()));
        }

        self.moves.push(GameMove {
            mov: m,
            hash_before: self.position.reduced_key(),
        });
        self.position.apply_move(m);
        self.position.toggle_side();
        self.result = game_result(&self.position);

        tracing::debug!(mv = %m, fen = %self.position.to_fen(), "move played");
        if let Some(result) = self.result {
            tracing::info!(?result, plies = self.moves.len(), "game over");
        }
        Ok(())
    }

    /// Parses move text such as `e2e4` or `e7e8q` and plays it.
    pub fn make_move_uci(&mut self, text: &str) -> Result<(), GameError> {
        if self.result.is_some() {
            return Err(GameError::GameAlreadyOver);
        }
        let m = Move::from_uci(text)?;
        self.make_move(m)
    }

    /// Asks `searcher` for the side to move's best move, or `None` once the
    /// game is over.
    ///
    /// When every line scores the losing bound the search keeps no move; the
    /// first legal move is played instead.
    pub fn best_move(&self, searcher: &mut Searcher, depth: u32) -> Option<Move> {
        if self.result.is_some() {
            return None;
        }
        searcher
            .search(&self.position, depth)
            .best_move
            .or_else(|| self.legal_moves().as_slice().first().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::DrawReason;
    use chess_core::Color;

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.position().side_to_move, Color::White);
        assert_eq!(game.legal_moves().len(), 20);
        assert!(!game.is_check());
        assert!(!game.is_game_over());
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn make_move_toggles_side() {
        let mut game = Game::new();
        game.make_move_uci("e2e4").unwrap();
        assert_eq!(game.position().side_to_move, Color::Black);
        assert_eq!(
            game.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert_eq!(game.ply_count(), 1);
        assert_eq!(
            game.move_history()[0].hash_before,
            Position::startpos().reduced_key()
        );
    }

    #[test]
    fn illegal_move_rejected() {
        let mut game = Game::new();
        assert_eq!(
            game.make_move_uci("e2e5"),
            Err(GameError::IllegalMove("e2e5".to_string()))
        );
        assert!(matches!(
            game.make_move_uci("e2"),
            Err(GameError::InvalidMove(_))
        ));
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn moves_after_mate_rejected() {
        let mut game = Game::new();
        for m in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.make_move_uci(m).unwrap();
        }
        assert!(game.is_check());
        assert_eq!(game.result(), Some(GameResult::BlackWins));
        assert_eq!(game.make_move_uci("a2a3"), Err(GameError::GameAlreadyOver));
        assert_eq!(game.best_move(&mut Searcher::new(), 1), None);
    }

    #[test]
    fn drawn_start_position_is_over() {
        let game = Game::from_fen("k7/P7/1K6/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(game.result(), Some(GameResult::Draw(DrawReason::Stalemate)));
    }

    #[test]
    fn best_move_is_legal() {
        let game = Game::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
        let m = game.best_move(&mut Searcher::new(), 2).unwrap();
        assert!(game.legal_moves().contains(m));
    }

    #[test]
    fn best_move_when_every_line_loses() {
        // Ka2 is the only move, and Ra8 mates.
        let game = Game::from_fen("7r/8/8/8/8/8/2k5/K7 w - - 0 1").unwrap();
        assert!(!game.is_game_over());
        assert_eq!(game.legal_moves().len(), 1);

        let mut searcher = Searcher::new();
        assert_eq!(searcher.search(game.position(), 3).best_move, None);

        let m = game.best_move(&mut searcher, 3).unwrap();
        assert!(game.legal_moves().contains(m));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            GameError::IllegalMove("e2e5".into()).to_string(),
            "illegal move: e2e5"
        );
        assert_eq!(
            GameError::GameAlreadyOver.to_string(),
            "game has already ended"
        );
    }
}
