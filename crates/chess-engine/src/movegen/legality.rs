//! Check detection and legal move filtering by simulation.

use super::{generate_for, generate_pseudo_legal, MoveList};
use crate::Position;
use chess_core::{Color, Move};

/// Returns true if `color`'s king is attacked.
///
/// The opponent's pseudo-legal moves (castling excluded) are generated as if
/// it were on turn, and the king is attacked when any of them lands on its
/// square. A position without a king of that color reports `false`.
pub fn is_attacked(position: &Position, color: Color) -> bool {
    let Some(king) = position.king_square(color) else {
        return false;
    };
    generate_for(position, color.opposite(), false)
        .as_slice()
        .iter()
        .any(|m| m.to() == king)
}

/// Returns true if playing `m` does not leave the mover's king attacked.
///
/// The move is simulated on a throwaway copy that carries no repetition
/// history.
pub fn is_legal(position: &Position, m: Move) -> bool {
    let mut probe = position.detached();
    let mover = probe.play(m);
    !is_attacked(&probe, mover)
}

/// Generates all legal moves for the side to move, in generation order.
pub fn legal_moves(position: &Position) -> MoveList {
    let mut moves = generate_pseudo_legal(position);
    moves.retain(|&m| is_legal(position, m));
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legal_uci(fen: &str) -> Vec<String> {
        let position = Position::from_fen(fen).unwrap();
        legal_moves(&position)
            .as_slice()
            .iter()
            .map(|m| m.to_uci())
            .collect()
    }

    #[test]
    fn startpos_has_twenty_moves() {
        assert_eq!(legal_moves(&Position::startpos()).len(), 20);
    }

    #[test]
    fn startpos_nobody_in_check() {
        let position = Position::startpos();
        assert!(!is_attacked(&position, Color::White));
        assert!(!is_attacked(&position, Color::Black));
    }

    #[test]
    fn attack_by_each_piece_kind() {
        let cases = [
            "4k3/8/8/8/8/8/3p4/4K3 w - - 0 1",
            "4k3/8/8/8/8/3n4/8/4K3 w - - 0 1",
            "4k3/8/8/8/1b6/8/8/4K3 w - - 0 1",
            "4k3/4r3/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/q3K3 w - - 0 1",
        ];
        for fen in cases {
            let position = Position::from_fen(fen).unwrap();
            assert!(is_attacked(&position, Color::White), "{fen}");
            assert!(!is_attacked(&position, Color::Black), "{fen}");
        }
    }

    #[test]
    fn pawn_advance_is_not_an_attack() {
        let position = Position::from_fen("4k3/8/8/8/8/4p3/8/4K3 w - - 0 1").unwrap();
        assert!(!is_attacked(&position, Color::White));
    }

    #[test]
    fn blocked_slider_does_not_attack() {
        let position = Position::from_fen("4k3/4r3/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(!is_attacked(&position, Color::White));
    }

    #[test]
    fn missing_king_is_not_attacked() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/q7 w - - 0 1").unwrap();
        assert!(!is_attacked(&position, Color::White));
    }

    #[test]
    fn pinned_piece_cannot_move() {
        let moves = legal_uci("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(!moves.iter().any(|m| m.starts_with("e2")));
    }

    #[test]
    fn must_answer_check() {
        let moves = legal_uci("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
        assert_eq!(moves, vec!["e1d2", "e1e2", "e1f2"]);
    }

    #[test]
    fn en_passant_exposing_king_is_illegal() {
        let moves = legal_uci("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
        assert!(!moves.contains(&"e5d6".to_string()));
        assert!(moves.contains(&"e5e6".to_string()));
    }

    #[test]
    fn is_legal_leaves_position_untouched() {
        let position = Position::startpos();
        let before = position.clone();
        assert!(is_legal(&position, Move::from_uci("e2e4").unwrap()));
        assert_eq!(position, before);
    }
}
