//! Minimax search with alpha-beta pruning.
//!
//! White maximizes and Black minimizes the White-relative evaluation. Among
//! equally scored moves the first one generated wins, so results are
//! deterministic for a given position and depth.

use crate::eval::{evaluate, EvalCache};
use crate::movegen::legal_moves;
use crate::Position;
use chess_core::{Color, Move};

/// Score bound strictly larger than any evaluation.
pub const INFINITY: i32 = 1_000_000;

/// Outcome of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, `None` when the position has no legal move or the
    /// depth was 0.
    pub best_move: Option<Move>,
    /// Score of the best line from White's point of view.
    ///
    /// When the side to move has no legal move this is the starting bound:
    /// `-INFINITY` for White, `INFINITY` for Black.
    pub score: i32,
}

/// Search state: the evaluation cache and a node counter.
#[derive(Debug, Default)]
pub struct Searcher {
    cache: EvalCache,
    nodes: u64,
}

impl Searcher {
    /// Creates a searcher with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a searcher that reuses an existing cache.
    pub fn with_cache(cache: EvalCache) -> Self {
        Searcher { cache, nodes: 0 }
    }

    pub fn cache(&self) -> &EvalCache {
        &self.cache
    }

    /// Nodes visited by the most recent [`search`](Self::search) or
    /// [`minimax`](Self::minimax).
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Searches `depth` plies with a full window.
    pub fn search(&mut self, position: &Position, depth: u32) -> SearchResult {
        self.nodes = 0;
        let result = self.alpha_beta(position, depth, -INFINITY, INFINITY);
        self.log_completion("alpha-beta", depth, result);
        result
    }

    /// Alpha-beta search of `depth` plies within the `(alpha, beta)` window.
    ///
    /// The best move changes only on a strict improvement, and the remaining
    /// siblings are skipped once `beta <= alpha`.
    pub fn alpha_beta(
        &mut self,
        position: &Position,
        depth: u32,
        alpha: i32,
        beta: i32,
    ) -> SearchResult {
        self.alpha_beta_node(position, depth, alpha, beta, 0)
    }

    fn alpha_beta_node(
        &mut self,
        position: &Position,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        ply: u32,
    ) -> SearchResult {
        self.nodes += 1;

        if depth == 0 {
            return self.leaf(position);
        }

        let maximizing = position.side_to_move == Color::White;
        let mut best = SearchResult {
            best_move: None,
            score: if maximizing { -INFINITY } else { INFINITY },
        };

        for &m in &legal_moves(position) {
            let child = position.make_move(m);
            let score = self
                .alpha_beta_node(&child, depth - 1, alpha, beta, ply + 1)
                .score;

            if maximizing {
                if score > best.score {
                    best = SearchResult { best_move: Some(m), score };
                    alpha = alpha.max(score);
                }
            } else if score < best.score {
                best = SearchResult { best_move: Some(m), score };
                beta = beta.min(score);
            }

            if ply == 0 {
                tracing::trace!(mv = %m, score, "root move scored");
            }

            if beta <= alpha {
                break;
            }
        }

        best
    }

    /// Exhaustive minimax without pruning. Same tie-break as
    /// [`alpha_beta`](Self::alpha_beta), so the scores always agree.
    pub fn minimax(&mut self, position: &Position, depth: u32) -> SearchResult {
        self.nodes = 0;
        let result = self.minimax_node(position, depth, 0);
        self.log_completion("minimax", depth, result);
        result
    }

    fn minimax_node(&mut self, position: &Position, depth: u32, ply: u32) -> SearchResult {
        self.nodes += 1;

        if depth == 0 {
            return self.leaf(position);
        }

        let maximizing = position.side_to_move == Color::White;
        let mut best = SearchResult {
            best_move: None,
            score: if maximizing { -INFINITY } else { INFINITY },
        };

        for &m in &legal_moves(position) {
            let score = self
                .minimax_node(&position.make_move(m), depth - 1, ply + 1)
                .score;
            if ply == 0 {
                tracing::trace!(mv = %m, score, "root move scored");
            }
            let improves = if maximizing {
                score > best.score
            } else {
                score < best.score
            };
            if improves {
                best = SearchResult { best_move: Some(m), score };
            }
        }

        best
    }

    fn leaf(&mut self, position: &Position) -> SearchResult {
        SearchResult {
            best_move: None,
            score: evaluate(position, &mut self.cache),
        }
    }

    fn log_completion(&self, kind: &str, depth: u32, result: SearchResult) {
        let stats = self.cache.stats();
        tracing::debug!(
            kind,
            depth,
            best_move = ?result.best_move,
            score = result.score,
            nodes = self.nodes,
            cache_hits = stats.hits,
            cache_misses = stats.misses,
            "search complete"
        );
    }
}
