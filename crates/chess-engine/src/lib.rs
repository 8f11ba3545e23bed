//! Chess rules engine with minimax search.
//!
//! This crate provides:
//! - [`Position`] - Full game state: board, castling rights, en passant,
//!   clocks and repetition history
//! - Move generation by square scan, with legality checked by simulation
//! - Check, checkmate and draw detection ([`rules`])
//! - Material evaluation with an owned memo table ([`EvalCache`])
//! - Alpha-beta search ([`Searcher`])
//! - [`Game`] - A live game that validates moves and tracks the result
//!
//! # Example
//!
//! ```
//! use chess_engine::{legal_moves, Game, Position, Searcher};
//!
//! let position = Position::startpos();
//! println!("Legal moves from starting position: {}", legal_moves(&position).len());
//!
//! let mut game = Game::new();
//! game.make_move_uci("e2e4").unwrap();
//! let reply = game.best_move(&mut Searcher::new(), 2);
//! assert!(reply.is_some());
//! ```

pub mod eval;
mod game;
pub mod movegen;
mod position;
pub mod rules;
pub mod search;
mod zobrist;

pub use eval::{evaluate, CacheStats, EvalCache, MATE_SCORE};
pub use game::{Game, GameError, GameMove};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{generate_pseudo_legal, is_attacked, is_legal, legal_moves, MoveList};
pub use position::{CacheKey, CastlingRights, Position, RepetitionHistory};
pub use rules::{
    draw_reason, game_result, is_checkmate, is_draw, is_in_check, is_stalemate, DrawReason,
    GameResult,
};
pub use search::{SearchResult, Searcher, INFINITY};
