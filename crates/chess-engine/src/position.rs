//! Chess position representation.

use std::collections::HashMap;
use std::fmt;

use chess_core::{Color, FenError, FenParser, Move, MoveParseError, Piece, Square};

use crate::zobrist::ZOBRIST;

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Parses the castling field of a position record ("KQkq", "Kq", "-").
    pub fn from_fen(field: &str) -> Self {
        let flags = field.chars().fold(0u8, |flags, c| {
            flags
                | match c {
                    'K' => Self::WHITE_KINGSIDE,
                    'Q' => Self::WHITE_QUEENSIDE,
                    'k' => Self::BLACK_KINGSIDE,
                    'q' => Self::BLACK_QUEENSIDE,
                    _ => 0,
                }
        });
        CastlingRights::new(flags)
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        let mask = match color {
            Color::White => !(Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE),
            Color::Black => !(Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE),
        };
        self.0 &= mask;
    }

    /// Removes the right tied to the rook that starts on `sq`, if any.
    ///
    /// Called both when a rook leaves its home square and when something is
    /// captured there.
    #[inline]
    pub fn remove_rook_square(&mut self, sq: Square) {
        let flag = match sq {
            Square::H1 => Self::WHITE_KINGSIDE,
            Square::A1 => Self::WHITE_QUEENSIDE,
            Square::H8 => Self::BLACK_KINGSIDE,
            Square::A8 => Self::BLACK_QUEENSIDE,
            _ => return,
        };
        self.0 &= !flag;
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Renders the castling field of a position record.
    pub fn to_fen(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ]
        .iter()
        .filter(|(flag, _)| self.0 & flag != 0)
        .map(|&(_, c)| c)
        .collect()
    }
}

/// Occurrence counts of reduced position keys, for threefold repetition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepetitionHistory {
    counts: HashMap<u64, u32>,
}

impl RepetitionHistory {
    /// Records one more occurrence of `key` and returns the new count.
    pub fn record(&mut self, key: u64) -> u32 {
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }

    /// Number of times `key` has been recorded.
    pub fn count(&self, key: u64) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Highest occurrence count of any key (0 when empty).
    pub fn max_count(&self) -> u32 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Number of distinct positions recorded.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Key for memoized evaluations: the reduced key plus both clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub hash: u64,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// Complete chess position state.
///
/// Cloning produces an independent copy: search branches and legality probes
/// each own theirs, and nothing is shared between copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Occupant of each square, indexed by [`Square::index`]. `None` is empty.
    squares: [Option<(Piece, Color)>; 64],

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// En passant target square (if any).
    pub en_passant: Option<Square>,

    /// Moves since the last capture or pawn move.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,

    /// How often each reduced position has occurred.
    pub repetitions: RepetitionHistory,
}

impl Position {
    /// Creates an empty position.
    pub fn empty() -> Self {
        Position {
            squares: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            repetitions: RepetitionHistory::default(),
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(FenParser::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a position from a FEN string.
    ///
    /// The repetition history starts with this position counted once.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let mut position = Position::empty();

        for (sq, piece, color) in parsed.placement {
            position.put(sq, piece, color);
        }
        position.side_to_move = parsed.active_color;
        position.castling = CastlingRights::from_fen(&parsed.castling);
        position.en_passant = parsed.en_passant;
        position.halfmove_clock = parsed.halfmove_clock;
        position.fullmove_number = parsed.fullmove_number;

        let key = position.reduced_key();
        position.repetitions.record(key);

        Ok(position)
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                let occupant = Square::from_coords(file, rank).and_then(|sq| self.occupant_at(sq));
                match occupant {
                    Some((piece, color)) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char(color));
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic());

        format!(
            "{} {} {} {} {} {}",
            fen,
            self.side_to_move.fen_char(),
            self.castling.to_fen(),
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn occupant_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.squares[sq.index() as usize]
    }

    /// Places a piece, replacing whatever was on the square.
    #[inline]
    pub fn put(&mut self, sq: Square, piece: Piece, color: Color) {
        self.squares[sq.index() as usize] = Some((piece, color));
    }

    /// Empties a square, returning its previous occupant.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<(Piece, Color)> {
        self.squares[sq.index() as usize].take()
    }

    /// Returns true if nothing stands on the square.
    #[inline]
    pub fn is_empty_square(&self, sq: Square) -> bool {
        self.occupant_at(sq).is_none()
    }

    /// Returns the square of the given color's king.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| self.occupant_at(sq) == Some((Piece::King, color)))
    }

    /// Number of pieces of the given kind and color on the board.
    pub fn count(&self, piece: Piece, color: Color) -> usize {
        self.squares
            .iter()
            .filter(|&&occupant| occupant == Some((piece, color)))
            .count()
    }

    /// Zobrist key over board, side to move, castling rights and en passant.
    pub fn reduced_key(&self) -> u64 {
        self.key_for_side(self.side_to_move)
    }

    /// Key used to memoize evaluations (reduced key plus both clocks).
    pub fn cache_key(&self) -> CacheKey {
        CacheKey {
            hash: self.reduced_key(),
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    fn key_for_side(&self, side: Color) -> u64 {
        let mut hash = ZOBRIST.side_key(side);

        for sq in Square::all() {
            if let Some((piece, color)) = self.occupant_at(sq) {
                hash ^= ZOBRIST.piece_key(piece, color, sq);
            }
        }
        for bit in 0..4 {
            if self.castling.raw() & (1 << bit) != 0 {
                hash ^= ZOBRIST.castling_key(bit);
            }
        }
        if let Some(sq) = self.en_passant {
            hash ^= ZOBRIST.en_passant_key(sq);
        }

        hash
    }

    /// Applies a move in place without changing the side to move.
    ///
    /// Updates the board, castling rights, en passant target and clocks, then
    /// counts the resulting position in the repetition history under the key
    /// it will have once the caller hands the turn to the opponent (see
    /// [`toggle_side`](Self::toggle_side)).
    ///
    /// The move is not validated; it must come from
    /// [`legal_moves`](crate::legal_moves) for this position.
    ///
    /// # Panics
    ///
    /// Panics if the source square is empty.
    pub fn apply_move(&mut self, m: Move) {
        let mover = self.play(m);
        let key = self.key_for_side(mover.opposite());
        self.repetitions.record(key);
    }

    /// Parses move text and applies it with [`apply_move`](Self::apply_move).
    pub fn apply_uci(&mut self, text: &str) -> Result<(), MoveParseError> {
        let m = Move::from_uci(text)?;
        self.apply_move(m);
        Ok(())
    }

    /// Hands the turn to the other side.
    #[inline]
    pub fn toggle_side(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
    }

    /// Returns the successor position: a copy with the move applied and the
    /// turn handed over.
    pub fn make_move(&self, m: Move) -> Position {
        let mut next = self.clone();
        next.apply_move(m);
        next.toggle_side();
        next
    }

    /// Copy of everything but the repetition history, for throwaway probes.
    pub(crate) fn detached(&self) -> Position {
        Position {
            squares: self.squares,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            repetitions: RepetitionHistory::default(),
        }
    }

    /// Board, rights and clock update shared by every move application.
    /// Returns the color of the piece that moved.
    pub(crate) fn play(&mut self, m: Move) -> Color {
        let from = m.from();
        let to = m.to();
        let (piece, color) = self.take(from).expect("no piece on source square");
        let en_passant = self.en_passant.take();

        let captured = self.take(to);
        let mut is_capture = captured.is_some();

        if piece == Piece::Pawn && captured.is_none() && Some(to) == en_passant {
            if let Some(victim) = to.offset(0, -color.pawn_direction()) {
                is_capture |= self.take(victim).is_some();
            }
        }

        let placed = m.promotion().map_or(piece, |promo| promo.piece());
        self.put(to, placed, color);

        if piece == Piece::King && from.file_index().abs_diff(to.file_index()) == 2 {
            let (rook_file, rook_dest_file) = if to.file_index() > from.file_index() {
                (7, 5)
            } else {
                (0, 3)
            };
            let rank = from.rank_index();
            if let (Some(rook_from), Some(rook_to)) = (
                Square::from_coords(rook_file, rank),
                Square::from_coords(rook_dest_file, rank),
            ) {
                if let Some((rook, rook_color)) = self.take(rook_from) {
                    self.put(rook_to, rook, rook_color);
                }
            }
        }

        if piece == Piece::King {
            self.castling.remove_color(color);
        }
        if piece == Piece::Rook {
            self.castling.remove_rook_square(from);
        }
        self.castling.remove_rook_square(to);

        if piece == Piece::Pawn && from.rank_index().abs_diff(to.rank_index()) == 2 {
            self.en_passant = from.offset(0, color.pawn_direction());
        }

        if piece == Piece::Pawn || is_capture {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if color == Color::Black {
            self.fullmove_number += 1;
        }

        color
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

/// Board diagram, rank 8 at the top. The alternate form (`{:#}`) uses
/// Unicode piece glyphs instead of letters.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " {} ", "-".repeat(8))?;
        for rank in (0..8).rev() {
            write!(f, "|")?;
            for file in 0..8 {
                let occupant = Square::from_coords(file, rank).and_then(|sq| self.occupant_at(sq));
                let c = match occupant {
                    Some((piece, color)) if f.alternate() => piece.to_unicode(color),
                    Some((piece, color)) => piece.to_fen_char(color),
                    None => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f, "|")?;
        }
        write!(f, " {} ", "-".repeat(8))
    }
}
