//! Zobrist hashing for position identification.
//!
//! A position's reduced key XORs random numbers associated with:
//! - Each piece on each square (12 pieces × 64 squares = 768 values)
//! - Side to move
//! - Castling rights (4 values)
//! - En passant file (8 values)
//!
//! The clocks are not part of the key; repetition counting ignores them.

use chess_core::{Color, Piece, Square};

/// Zobrist hash keys.
///
/// Generated using a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Keys for pieces: [piece][color][square]
    pieces: [[[u64; 64]; 2]; 6],
    /// Key for black to move (XOR when black to move).
    black_to_move: u64,
    /// Keys for castling rights, in `CastlingRights` bit order.
    castling: [u64; 4],
    /// Keys for en passant file.
    en_passant: [u64; 8],
}

impl ZobristKeys {
    /// Initializes Zobrist keys using a simple PRNG.
    pub const fn new() -> Self {
        // xorshift64, usable in const context
        const fn next_random(state: u64) -> u64 {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        }

        let mut state = 0x9E3779B97F4A7C15u64;
        let mut pieces = [[[0u64; 64]; 2]; 6];
        let mut castling = [0u64; 4];
        let mut en_passant = [0u64; 8];

        let mut piece = 0;
        while piece < 6 {
            let mut color = 0;
            while color < 2 {
                let mut square = 0;
                while square < 64 {
                    state = next_random(state);
                    pieces[piece][color][square] = state;
                    square += 1;
                }
                color += 1;
            }
            piece += 1;
        }

        state = next_random(state);
        let black_to_move = state;

        let mut i = 0;
        while i < 4 {
            state = next_random(state);
            castling[i] = state;
            i += 1;
        }

        let mut i = 0;
        while i < 8 {
            state = next_random(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    /// Returns the key for a piece on a square.
    #[inline]
    pub const fn piece_key(&self, piece: Piece, color: Color, square: Square) -> u64 {
        self.pieces[piece.index()][color.index()][square.index() as usize]
    }

    /// Returns the key XORed in when `color` is to move.
    #[inline]
    pub const fn side_key(&self, color: Color) -> u64 {
        match color {
            Color::White => 0,
            Color::Black => self.black_to_move,
        }
    }

    /// Returns the key for a castling right (bit 0-3).
    #[inline]
    pub const fn castling_key(&self, right: usize) -> u64 {
        self.castling[right]
    }

    /// Returns the key for an en passant target square.
    #[inline]
    pub const fn en_passant_key(&self, square: Square) -> u64 {
        self.en_passant[square.file_index() as usize]
    }
}

/// Global Zobrist keys (initialized at compile time).
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zobrist_keys_are_nonzero() {
        assert_ne!(ZOBRIST.side_key(Color::Black), 0);
        assert_eq!(ZOBRIST.side_key(Color::White), 0);
        assert_ne!(ZOBRIST.piece_key(Piece::Pawn, Color::White, Square::A1), 0);
        assert_ne!(ZOBRIST.castling_key(0), 0);
    }

    #[test]
    fn zobrist_keys_are_unique() {
        let key1 = ZOBRIST.piece_key(Piece::Pawn, Color::White, Square::A1);
        let key2 = ZOBRIST.piece_key(Piece::Pawn, Color::White, Square::B1);
        let key3 = ZOBRIST.piece_key(Piece::Pawn, Color::Black, Square::A1);
        let key4 = ZOBRIST.piece_key(Piece::Knight, Color::White, Square::A1);

        assert_ne!(key1, key2);
        assert_ne!(key1, key3);
        assert_ne!(key1, key4);
    }

    #[test]
    fn en_passant_keyed_by_file() {
        let e3 = Square::from_algebraic("e3").unwrap();
        let e6 = Square::from_algebraic("e6").unwrap();
        let d6 = Square::from_algebraic("d6").unwrap();
        assert_eq!(ZOBRIST.en_passant_key(e3), ZOBRIST.en_passant_key(e6));
        assert_ne!(ZOBRIST.en_passant_key(e6), ZOBRIST.en_passant_key(d6));
    }
}
