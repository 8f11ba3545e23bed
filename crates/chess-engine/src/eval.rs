//! Static evaluation with an owned memo table.
//!
//! Scores are from White's point of view: positive favors White.

use std::collections::HashMap;

use crate::position::CacheKey;
use crate::rules::{game_result, GameResult};
use crate::Position;
use chess_core::{Color, Piece};

/// Magnitude of a checkmate score.
pub const MATE_SCORE: i32 = 1000;

/// Hit and miss counters of an [`EvalCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Memoized evaluations keyed by [`Position::cache_key`].
///
/// Entries are never evicted; call [`clear`](Self::clear) between unrelated
/// searches if memory matters.
#[derive(Debug, Clone, Default)]
pub struct EvalCache {
    scores: HashMap<CacheKey, i32>,
    stats: CacheStats,
}

impl EvalCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached positions.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&mut self) {
        self.scores.clear();
        self.stats = CacheStats::default();
    }
}

/// Material balance using [`Piece::value`]. Kings count for nothing.
pub fn material(position: &Position) -> i32 {
    Piece::ALL
        .iter()
        .map(|&piece| {
            let white = position.count(piece, Color::White) as i32;
            let black = position.count(piece, Color::Black) as i32;
            piece.value() * (white - black)
        })
        .sum()
}

/// Evaluates a position, consulting and filling `cache`.
///
/// A mated side to move gets the losing [`MATE_SCORE`]; any drawn position
/// scores 0, even one that is also checkmate.
pub fn evaluate(position: &Position, cache: &mut EvalCache) -> i32 {
    let key = position.cache_key();
    if let Some(&score) = cache.scores.get(&key) {
        cache.stats.hits += 1;
        return score;
    }
    cache.stats.misses += 1;

    let score = match game_result(position) {
        Some(GameResult::WhiteWins) => MATE_SCORE,
        Some(GameResult::BlackWins) => -MATE_SCORE,
        Some(GameResult::Draw(_)) => 0,
        None => material(position),
    };

    cache.scores.insert(key, score);
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Move;

    #[test]
    fn startpos_is_balanced() {
        let mut cache = EvalCache::new();
        assert_eq!(material(&Position::startpos()), 0);
        assert_eq!(evaluate(&Position::startpos(), &mut cache), 0);
    }

    #[test]
    fn material_counts_from_white() {
        // White is up a rook, Black has an extra knight.
        let position = Position::from_fen("4k3/8/2n5/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert_eq!(material(&position), 2);

        let queens = Position::from_fen("3qk3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(material(&queens), -9);
    }

    #[test]
    fn mate_scores_against_side_to_move() {
        let mut cache = EvalCache::new();
        let position = ["f2f3", "e7e5", "g2g4", "d8h4"]
            .iter()
            .fold(Position::startpos(), |pos, text| {
                pos.make_move(Move::from_uci(text).unwrap())
            });
        assert_eq!(evaluate(&position, &mut cache), -MATE_SCORE);

        let white_mates = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1").unwrap();
        assert_eq!(evaluate(&white_mates, &mut cache), MATE_SCORE);
    }

    #[test]
    fn draws_score_zero() {
        let mut cache = EvalCache::new();
        let stalemate = Position::from_fen("k7/P7/1K6/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(material(&stalemate), 1);
        assert_eq!(evaluate(&stalemate, &mut cache), 0);

        let fifty = Position::from_fen("4k3/8/8/8/8/8/8/QQ2K3 b - - 50 90").unwrap();
        assert_eq!(evaluate(&fifty, &mut cache), 0);
    }

    #[test]
    fn cache_hits_on_repeat() {
        let mut cache = EvalCache::new();
        let position = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();

        let first = evaluate(&position, &mut cache);
        let second = evaluate(&position, &mut cache);
        assert_eq!(first, 5);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn clocks_separate_cache_entries() {
        let mut cache = EvalCache::new();
        let early = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let late = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 50 1").unwrap();
        assert_eq!(evaluate(&early, &mut cache), 5);
        assert_eq!(evaluate(&late, &mut cache), 0);
        assert_eq!(cache.len(), 2);
    }
}
