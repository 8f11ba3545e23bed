//! Terminal conditions: check, checkmate and the draw rules.

use std::fmt;

use crate::movegen::{is_attacked, legal_moves};
use crate::Position;
use chess_core::Color;

/// Halfmove clock value at which the game is drawn. Only the exact value
/// counts; a clock decoded past it is not a draw.
pub const FIFTY_MOVE_LIMIT: u32 = 50;

/// A position seen more than this many times is drawn by repetition.
pub const REPETITION_LIMIT: u32 = 2;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// White wins by checkmate.
    WhiteWins,
    /// Black wins by checkmate.
    BlackWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// No legal moves but not in check.
    Stalemate,
    /// Fifty moves without a capture or pawn move.
    FiftyMoveRule,
    /// The same position occurred three times.
    ThreefoldRepetition,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::WhiteWins => write!(f, "White won!"),
            GameResult::BlackWins => write!(f, "Black won!"),
            GameResult::Draw(_) => write!(f, "It's a tie!"),
        }
    }
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::ThreefoldRepetition => "threefold repetition",
        };
        f.write_str(reason)
    }
}

/// Returns true if the side to move is in check.
pub fn is_in_check(position: &Position) -> bool {
    is_attacked(position, position.side_to_move)
}

/// Returns true if the side to move has no legal moves and is in check.
pub fn is_checkmate(position: &Position) -> bool {
    legal_moves(position).is_empty() && is_in_check(position)
}

/// Returns true if the side to move has no legal moves and is not in check.
pub fn is_stalemate(position: &Position) -> bool {
    legal_moves(position).is_empty() && !is_in_check(position)
}

/// Returns true if the position is drawn.
pub fn is_draw(position: &Position) -> bool {
    draw_reason(position).is_some()
}

/// Returns why the position is drawn, if it is. Stalemate is checked first.
pub fn draw_reason(position: &Position) -> Option<DrawReason> {
    draw_reason_given(position, is_stalemate(position))
}

fn draw_reason_given(position: &Position, stalemate: bool) -> Option<DrawReason> {
    if stalemate {
        Some(DrawReason::Stalemate)
    } else if position.halfmove_clock == FIFTY_MOVE_LIMIT {
        Some(DrawReason::FiftyMoveRule)
    } else if position.repetitions.max_count() > REPETITION_LIMIT {
        Some(DrawReason::ThreefoldRepetition)
    } else {
        None
    }
}

/// Returns the result if the game is over. A draw outranks a checkmate.
pub fn game_result(position: &Position) -> Option<GameResult> {
    let no_moves = legal_moves(position).is_empty();
    let in_check = is_in_check(position);

    if let Some(reason) = draw_reason_given(position, no_moves && !in_check) {
        return Some(GameResult::Draw(reason));
    }
    if no_moves && in_check {
        return Some(match position.side_to_move {
            Color::White => GameResult::BlackWins,
            Color::Black => GameResult::WhiteWins,
        });
    }
    None
}
