//! Core types for chess.
//!
//! This crate provides the fundamental value types shared by the rules engine
//! and its front ends:
//! - [`Piece`], [`Promotion`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for move representation and its four/five character text form
//! - Position record (FEN) tokenizing

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::{Move, MoveParseError};
pub use piece::{Piece, Promotion};
pub use square::{File, Rank, Square};
