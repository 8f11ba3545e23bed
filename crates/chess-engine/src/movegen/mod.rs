//! Move generation.
//!
//! Pseudo-legal moves are produced by scanning the board square by square in
//! ascending order; [`legal_moves`] then filters them by simulating each one.
//! The emission order is fixed for a given position, and search relies on it
//! to break ties between equally scored moves.

mod legality;
pub mod perft;

use crate::Position;
use chess_core::{Color, Move, Piece, Promotion, Square};

pub use legality::{is_attacked, is_legal, legal_moves};

/// Knight jumps as (file, rank) offsets.
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (2, -1),
    (-2, 1),
    (2, 1),
    (-1, -2),
    (1, -2),
    (-1, 2),
    (1, 2),
];

/// King steps as (file, rank) offsets.
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns true if the list holds `m`.
    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }

    /// Retains only moves for which the predicate returns true, keeping order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the pseudo-legal moves of the side to move, castling included.
///
/// Moves may leave the mover's own king attacked; see [`legal_moves`].
pub fn generate_pseudo_legal(position: &Position) -> MoveList {
    generate_for(position, position.side_to_move, true)
}

/// Generates pseudo-legal moves for `side`, whoever is on turn.
///
/// Attack detection passes `with_castling = false`: castling never lands on
/// an occupied square, and its own safety test would recurse.
pub(crate) fn generate_for(position: &Position, side: Color, with_castling: bool) -> MoveList {
    let mut moves = MoveList::new();

    for from in Square::all() {
        let piece = match position.occupant_at(from) {
            Some((piece, color)) if color == side => piece,
            _ => continue,
        };

        match piece {
            Piece::Pawn => generate_pawn_moves(position, from, side, &mut moves),
            Piece::Knight => generate_steps(position, from, side, &KNIGHT_OFFSETS, &mut moves),
            Piece::Bishop => generate_rays(position, from, side, &DIAGONALS, &mut moves),
            Piece::Rook => generate_rays(position, from, side, &ORTHOGONALS, &mut moves),
            Piece::Queen => {
                generate_rays(position, from, side, &DIAGONALS, &mut moves);
                generate_rays(position, from, side, &ORTHOGONALS, &mut moves);
            }
            Piece::King => {
                generate_steps(position, from, side, &KING_OFFSETS, &mut moves);
                if with_castling {
                    generate_castling_moves(position, from, side, &mut moves);
                }
            }
        }
    }

    moves
}

/// Pushes `from -> to`, expanded into every promotion when `to` is on the
/// last rank.
fn push_pawn_move(from: Square, to: Square, us: Color, moves: &mut MoveList) {
    if to.rank_index() == us.promotion_rank() {
        for promo in Promotion::ALL {
            moves.push(Move::promoting(from, to, promo));
        }
    } else {
        moves.push(Move::normal(from, to));
    }
}

/// Generates pseudo-legal moves for the pawn on `from`.
fn generate_pawn_moves(position: &Position, from: Square, us: Color, moves: &mut MoveList) {
    let dir = us.pawn_direction();

    let single = from
        .offset(0, dir)
        .filter(|&to| position.is_empty_square(to));

    if let Some(one) = single {
        if from.rank_index() == us.pawn_rank() {
            if let Some(two) = one.offset(0, dir).filter(|&to| position.is_empty_square(to)) {
                moves.push(Move::normal(from, two));
            }
        }
        push_pawn_move(from, one, us, moves);
    }

    // Higher file first, then lower.
    for df in [1, -1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        match position.occupant_at(to) {
            Some((_, color)) if color != us => push_pawn_move(from, to, us, moves),
            None if position.en_passant == Some(to) => moves.push(Move::normal(from, to)),
            _ => {}
        }
    }
}

/// Generates single-step moves (knights and kings) from an offset table.
fn generate_steps(
    position: &Position,
    from: Square,
    us: Color,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in offsets {
        let Some(to) = from.offset(df, dr) else {
            continue;
        };
        match position.occupant_at(to) {
            Some((_, color)) if color == us => {}
            _ => moves.push(Move::normal(from, to)),
        }
    }
}

/// Generates sliding moves along each direction until blocked.
fn generate_rays(
    position: &Position,
    from: Square,
    us: Color,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match position.occupant_at(to) {
                None => moves.push(Move::normal(from, to)),
                Some((_, color)) => {
                    if color != us {
                        moves.push(Move::normal(from, to));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

/// Generates castling moves, kingside first.
///
/// The king must stand on its home square next to its own rook, the squares
/// between them must be empty, the king must not be attacked, and both the
/// one-step and the two-step king move must be legal.
fn generate_castling_moves(position: &Position, from: Square, us: Color, moves: &mut MoveList) {
    let home = match us {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    };
    if from != home || is_attacked(position, us) {
        return;
    }

    // (allowed, rook file, step direction)
    let wings = [
        (position.castling.can_castle_kingside(us), 7, 1),
        (position.castling.can_castle_queenside(us), 0, -1),
    ];

    for (allowed, rook_file, dir) in wings {
        if !allowed {
            continue;
        }
        let rank = us.back_rank();
        let rook_home = Square::from_coords(rook_file, rank);
        if rook_home.and_then(|sq| position.occupant_at(sq)) != Some((Piece::Rook, us)) {
            continue;
        }

        let (lo, hi) = if dir > 0 {
            (from.file_index() + 1, rook_file)
        } else {
            (rook_file + 1, from.file_index())
        };
        let path_clear = (lo..hi)
            .filter_map(|file| Square::from_coords(file, rank))
            .all(|sq| position.is_empty_square(sq));
        if !path_clear {
            continue;
        }

        let (Some(step), Some(target)) = (from.offset(dir, 0), from.offset(2 * dir, 0)) else {
            continue;
        };
        if is_legal(position, Move::normal(from, step)) && is_legal(position, Move::normal(from, target))
        {
            moves.push(Move::normal(from, target));
        }
    }
}
