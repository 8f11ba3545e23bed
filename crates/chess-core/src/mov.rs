//! Move representation.

use crate::{Promotion, Square};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing move text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("invalid move length: expected 4 or 5 characters, got {0}")]
    InvalidLength(usize),

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid promotion piece: '{0}'")]
    InvalidPromotion(char),
}

/// A chess move: source square, destination square and an optional promotion.
///
/// Castling is written as the king's two-square move (e.g. `e1g1`) and en
/// passant as the capturing pawn's diagonal move; the position supplies the
/// rest of the context when the move is applied.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<Promotion>,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, promotion: Option<Promotion>) -> Self {
        Move {
            from,
            to,
            promotion,
        }
    }

    /// Creates a move without promotion.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, None)
    }

    /// Creates a pawn move that promotes on arrival.
    #[inline]
    pub const fn promoting(from: Square, to: Square, promotion: Promotion) -> Self {
        Self::new(from, to, Some(promotion))
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the promotion choice, if this is a promotion.
    #[inline]
    pub const fn promotion(self) -> Option<Promotion> {
        self.promotion
    }

    /// Returns the move text (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion {
            Some(promo) => format!("{}{}{}", self.from, self.to, promo.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses move text: two squares optionally followed by a promotion letter.
    pub fn from_uci(s: &str) -> Result<Self, MoveParseError> {
        let len = s.chars().count();
        if !(4..=5).contains(&len) || !s.is_ascii() {
            return Err(MoveParseError::InvalidLength(len));
        }
        let from = Square::from_algebraic(&s[0..2])
            .ok_or_else(|| MoveParseError::InvalidSquare(s[0..2].to_string()))?;
        let to = Square::from_algebraic(&s[2..4])
            .ok_or_else(|| MoveParseError::InvalidSquare(s[2..4].to_string()))?;
        let promotion = match s[4..].chars().next() {
            Some(c) => Some(Promotion::from_char(c).ok_or(MoveParseError::InvalidPromotion(c))?),
            None => None,
        };
        Ok(Move::new(from, to, promotion))
    }

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move::normal(Square::A1, Square::A1);
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_uci(s)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
