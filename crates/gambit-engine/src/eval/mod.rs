//! Static evaluation: material plus tapered piece-square bonuses.

pub mod material;
pub mod phase;
pub mod score;
pub mod tables;

use gambit_core::{Color, PieceKind, Position};

use material::{PIECE_VALUE, material};
use phase::game_phase;
use score::Score;

/// Scores a position for the side to move. Positive favors the side to move.
///
/// Implementations must be pure: the same position always gets the same score.
pub trait Evaluator<P: Position + ?Sized> {
    fn evaluate(&self, position: &P) -> i32;
}

/// Material plus PeSTO-style tapered piece-square evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PestoEvaluator;

impl<P: Position + ?Sized> Evaluator<P> for PestoEvaluator {
    #[inline]
    fn evaluate(&self, position: &P) -> i32 {
        evaluate(position)
    }
}

/// Evaluate `position` from the side to move's perspective.
pub fn evaluate<P: Position + ?Sized>(position: &P) -> i32 {
    let tables = tables::tables();
    let mut positional = Score::ZERO;

    for color in Color::ALL {
        for kind in PieceKind::ALL {
            for sq in position.pieces(kind, color) {
                let term = PIECE_VALUE[kind.index()] + tables.square_score(kind, color, sq);
                match color {
                    Color::White => positional += term,
                    Color::Black => positional -= term,
                }
            }
        }
    }

    let white_relative = material(position) + positional.taper(game_phase(position));
    white_relative * position.side_to_move().sign()
}

#[cfg(test)]
mod tests {
    use gambit_core::Board;

    use super::evaluate;

    fn after(moves: &[&str]) -> Board {
        let mut board = Board::starting_position();
        for text in moves {
            let mv = board.parse_move(text).unwrap();
            board.make_move(mv);
        }
        board
    }

    #[test]
    fn starting_position_is_zero() {
        assert_eq!(evaluate(&Board::starting_position()), 0);
    }

    #[test]
    fn score_is_relative_to_side_to_move() {
        // Full phase, so only the middlegame term counts: e2 -15 -> e4 +18.
        assert_eq!(evaluate(&after(&["e2e4"])), -33);
        assert_eq!(evaluate(&after(&["g1f3"])), -37);
        assert_eq!(evaluate(&after(&["e2e4", "e7e5"])), 0);
    }

    #[test]
    fn mirrored_positions_agree() {
        let white: Board = "4k3/8/8/8/3P4/8/8/4K3 w - - 0 1".parse().unwrap();
        let black: Board = "4k3/8/8/3p4/8/8/8/4K3 b - - 0 1".parse().unwrap();
        assert_eq!(evaluate(&white), evaluate(&black));
        assert!(evaluate(&white) > 0);
    }

    #[test]
    fn extra_queen_dominates() {
        let board: Board = "4k3/8/8/8/8/8/8/3QK3 b - - 0 1".parse().unwrap();
        assert!(evaluate(&board) < -900);
    }
}
