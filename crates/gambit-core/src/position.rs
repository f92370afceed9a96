//! The board interface a search engine consumes.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::chess_move::{Move, MoveList};
use crate::color::Color;
use crate::piece::PieceKind;

/// Mutable game state borrowed by a search.
///
/// Moves are made and undone in strict LIFO order; after any make/undo
/// sequence every query must answer exactly as it did before.
pub trait Position {
    /// Legal moves for the side to move. With `captures_only`, captures
    /// (and quiet queen promotions) only.
    fn legal_moves(&mut self, captures_only: bool) -> MoveList;

    fn make_move(&mut self, mv: Move);

    /// Take back `mv`, which must be the most recently made move.
    fn undo_move(&mut self, mv: Move);

    fn is_in_check(&self) -> bool;

    fn is_checkmate(&mut self) -> bool;

    fn is_draw(&mut self) -> bool;

    /// Whether the current position has occurred before in the game.
    fn is_repeated_position(&self) -> bool;

    fn pieces(&self, kind: PieceKind, color: Color) -> Bitboard;

    /// 64-bit position hash, equal for equal positions.
    fn hash(&self) -> u64;

    /// Half-moves played since the start of the game.
    fn ply_count(&self) -> u32;

    fn side_to_move(&self) -> Color;
}

impl Position for Board {
    fn legal_moves(&mut self, captures_only: bool) -> MoveList {
        Board::legal_moves(self, captures_only)
    }

    fn make_move(&mut self, mv: Move) {
        Board::make_move(self, mv);
    }

    fn undo_move(&mut self, mv: Move) {
        Board::undo_move(self, mv);
    }

    fn is_in_check(&self) -> bool {
        self.in_check()
    }

    fn is_checkmate(&mut self) -> bool {
        Board::is_checkmate(self)
    }

    fn is_draw(&mut self) -> bool {
        Board::is_draw(self)
    }

    fn is_repeated_position(&self) -> bool {
        Board::is_repeated_position(self)
    }

    fn pieces(&self, kind: PieceKind, color: Color) -> Bitboard {
        Board::pieces(self, kind, color)
    }

    fn hash(&self) -> u64 {
        Board::hash(self)
    }

    fn ply_count(&self) -> u32 {
        Board::ply_count(self)
    }

    fn side_to_move(&self) -> Color {
        Board::side_to_move(self)
    }
}
