//! Leaf counts of the legal move tree, checked against published reference
//! values to validate move generation.

use super::legal_moves;
use crate::Position;

/// Number of leaf nodes `depth` plies below `position`.
pub fn perft(position: &Position, depth: u32) -> u64 {
    match depth {
        0 => 1,
        1 => legal_moves(position).len() as u64,
        _ => legal_moves(position)
            .as_slice()
            .iter()
            .map(|&m| perft(&position.make_move(m), depth - 1))
            .sum(),
    }
}

/// Leaf count below each root move, sorted by move text.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let below = depth.saturating_sub(1);
    let mut split: Vec<(String, u64)> = legal_moves(position)
        .as_slice()
        .iter()
        .map(|&m| (m.to_uci(), perft(&position.make_move(m), below)))
        .collect();
    split.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    split
}
