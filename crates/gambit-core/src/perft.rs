//! Perft (performance test) for move generation correctness verification.

use crate::board::Board;

/// Count the leaf nodes of the legal move tree at `depth`.
///
/// Depth 0 returns 1. Depth 1 bulk-counts the legal moves without making them.
pub fn perft(board: &mut Board, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves(false);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for &mv in moves.iter() {
        board.make_move(mv);
        nodes += perft(board, depth - 1);
        board.undo_move(mv);
    }
    nodes
}

/// Per-move perft breakdown as `(move, node_count)` pairs sorted by move text.
pub fn divide(board: &mut Board, depth: usize) -> Vec<(String, u64)> {
    let moves = board.legal_moves(false);
    let mut results: Vec<(String, u64)> = moves
        .iter()
        .map(|&mv| {
            board.make_move(mv);
            let count = perft(board, depth.saturating_sub(1));
            board.undo_move(mv);
            (mv.to_string(), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::{divide, perft};
    use crate::board::Board;

    #[test]
    fn startpos_shallow() {
        let mut board = Board::starting_position();
        assert_eq!(perft(&mut board, 1), 20);
        assert_eq!(perft(&mut board, 2), 400);
        assert_eq!(perft(&mut board, 3), 8_902);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut board = Board::starting_position();
        let breakdown = divide(&mut board, 2);
        assert_eq!(breakdown.len(), 20);
        assert_eq!(breakdown.iter().map(|(_, n)| n).sum::<u64>(), 400);
        assert_eq!(breakdown[0], ("a2a3".to_string(), 20));
    }
}
