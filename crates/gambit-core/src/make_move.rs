//! In-place make/undo and attack detection.

use crate::board::{Board, Undo};
use crate::chess_move::{Move, MoveFlag};
use crate::color::Color;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Rook origin and destination for a castling king move.
fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    let rank = king_to.rank();
    if king_to.file() == 6 {
        (Square::new(7, rank), Square::new(5, rank))
    } else {
        (Square::new(0, rank), Square::new(3, rank))
    }
}

impl Board {
    /// Whether any piece of `by` attacks `sq`.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let is = |target: Option<Square>, kind: PieceKind| {
            target.and_then(|t| self.piece_on(t)) == Some(Piece::new(by, kind))
        };

        // A pawn of `by` attacks `sq` from one rank behind it.
        let behind = -by.forward();
        if is(sq.offset(-1, behind), PieceKind::Pawn) || is(sq.offset(1, behind), PieceKind::Pawn) {
            return true;
        }
        if KNIGHT_OFFSETS
            .iter()
            .any(|&(df, dr)| is(sq.offset(df, dr), PieceKind::Knight))
        {
            return true;
        }
        if KING_OFFSETS
            .iter()
            .any(|&(df, dr)| is(sq.offset(df, dr), PieceKind::King))
        {
            return true;
        }

        self.ray_hits(sq, &DIAGONALS, by, PieceKind::Bishop)
            || self.ray_hits(sq, &ORTHOGONALS, by, PieceKind::Rook)
    }

    /// Whether the first piece along any of `directions` is a `by` slider of
    /// `kind` or a `by` queen.
    fn ray_hits(&self, sq: Square, directions: &[(i8, i8)], by: Color, kind: PieceKind) -> bool {
        directions.iter().any(|&(df, dr)| {
            let mut cursor = sq.offset(df, dr);
            while let Some(t) = cursor {
                if let Some(piece) = self.piece_on(t) {
                    return piece.color == by
                        && (piece.kind == kind || piece.kind == PieceKind::Queen);
                }
                cursor = t.offset(df, dr);
            }
            false
        })
    }

    /// Whether the side to move is in check.
    pub fn in_check(&self) -> bool {
        let us = self.side_to_move();
        self.king_square(us)
            .is_some_and(|king| self.is_square_attacked(king, !us))
    }

    /// Play `mv`, which must be legal in this position.
    pub fn make_move(&mut self, mv: Move) {
        let us = self.side_to_move();
        let (from, to) = (mv.from(), mv.to());

        let hash = self.hash();
        let en_passant_pawn = match mv.flag() {
            MoveFlag::EnPassant => self.remove_piece(Square::new(to.file(), from.rank())).is_some(),
            _ => {
                if mv.is_capture() {
                    self.remove_piece(to);
                }
                false
            }
        };
        self.history.push(Undo {
            mv,
            castling: self.castling(),
            en_passant: self.en_passant(),
            halfmove_clock: self.halfmove_clock(),
            fullmove_number: self.fullmove_number(),
            hash,
            en_passant_pawn,
        });
        self.hash_history.push(hash);

        self.remove_piece(from);
        let placed = mv.promotion().unwrap_or(mv.piece());
        self.put_piece(to, Piece::new(us, placed));

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(to);
            if let Some(rook) = self.remove_piece(rook_from) {
                self.put_piece(rook_to, rook);
            }
        }

        self.set_castling(self.castling().after_move(from, to));
        let en_passant = match mv.flag() {
            MoveFlag::DoublePush => Some(Square::new(from.file(), (from.rank() + to.rank()) / 2)),
            _ => None,
        };
        self.set_en_passant(en_passant);

        if mv.piece() == PieceKind::Pawn || mv.is_capture() {
            self.set_halfmove_clock(0);
        } else {
            self.set_halfmove_clock(self.halfmove_clock().saturating_add(1));
        }
        if us == Color::Black {
            self.set_fullmove_number(self.fullmove_number().saturating_add(1));
        }
        self.flip_side();
    }

    /// Take back the most recent move. `mv` must be that move.
    pub fn undo_move(&mut self, mv: Move) {
        let Some(undo) = self.history.pop() else {
            debug_assert!(false, "undo_move with empty history");
            return;
        };
        debug_assert_eq!(undo.mv, mv, "moves must be undone in reverse order");
        self.hash_history.pop();

        let mv = undo.mv;
        let (from, to) = (mv.from(), mv.to());
        self.flip_side();
        let us = self.side_to_move();

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(to);
            if let Some(rook) = self.remove_piece(rook_to) {
                self.put_piece(rook_from, rook);
            }
        }

        self.remove_piece(to);
        self.put_piece(from, Piece::new(us, mv.piece()));
        match (mv.flag(), mv.captured()) {
            (MoveFlag::EnPassant, _) if undo.en_passant_pawn => {
                self.put_piece(Square::new(to.file(), from.rank()), Piece::new(!us, PieceKind::Pawn));
            }
            (_, Some(kind)) => self.put_piece(to, Piece::new(!us, kind)),
            (_, None) => {}
        }

        self.set_castling(undo.castling);
        self.set_en_passant(undo.en_passant);
        self.set_halfmove_clock(undo.halfmove_clock);
        self.set_fullmove_number(undo.fullmove_number);
        self.restore_hash(undo.hash);
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::castle_rights::CastleRights;
    use crate::chess_move::MoveFlag;
    use crate::color::Color;
    use crate::piece::{Piece, PieceKind};
    use crate::square::Square;

    fn board(fen: &str) -> Board {
        fen.parse().unwrap()
    }

    #[test]
    fn incremental_hash_matches_scratch() {
        let mut b = Board::starting_position();
        for text in ["e2e4", "d7d5", "e4d5", "g8f6", "f1b5", "c7c6", "g1f3", "c6b5", "e1g1"] {
            let mv = b.parse_move(text).unwrap();
            b.make_move(mv);
            assert_eq!(b.hash(), b.compute_hash(), "after {text}");
        }
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let mut b = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let mv = b.parse_move("e5d6").unwrap();
        b.make_move(mv);
        assert_eq!(b.piece_on(Square::D5), None);
        assert_eq!(b.piece_on(Square::D6), Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert_eq!(b.hash(), b.compute_hash());
        b.undo_move(mv);
        assert_eq!(b, board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1"));
    }

    #[test]
    fn en_passant_without_a_passed_pawn_leaves_board_intact() {
        let mut b = Board::empty();
        b.put_piece(Square::E8, Piece::new(Color::Black, PieceKind::King));
        b.put_piece(Square::E1, Piece::new(Color::White, PieceKind::King));
        b.put_piece(Square::D5, Piece::new(Color::White, PieceKind::Pawn));
        b.set_state(Color::White, CastleRights::NONE, Some(Square::E6), 0, 1);
        let before = b.clone();

        let moves = b.legal_moves(false);
        assert_eq!(b, before);
        let Some(&mv) = moves.iter().find(|mv| mv.flag() == MoveFlag::EnPassant) else {
            panic!("expected the en passant move to be generated");
        };
        b.make_move(mv);
        b.undo_move(mv);
        assert_eq!(b, before);
        assert_eq!(b.piece_on(Square::E5), None);
    }

    #[test]
    fn fullmove_number_saturates_and_restores() {
        let fen = "4k3/8/8/8/8/8/8/4K3 b - - 0 65535";
        let mut b = board(fen);
        let mv = b.parse_move("e8d8").unwrap();
        b.make_move(mv);
        assert_eq!(b.fullmove_number(), u16::MAX);
        b.undo_move(mv);
        assert_eq!(b, board(fen));
    }

    #[test]
    fn castling_moves_the_rook() {
        let mut b = board("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 3 20");
        let mv = b.parse_move("e8c8").unwrap();
        b.make_move(mv);
        assert_eq!(b.piece_on(Square::D8), Some(Piece::new(Color::Black, PieceKind::Rook)));
        assert_eq!(b.piece_on(Square::A8), None);
        assert_eq!(b.castling().to_string(), "KQ");
        assert_eq!(b.fullmove_number(), 21);
        assert_eq!(b.halfmove_clock(), 4);
    }

    #[test]
    fn promotion_with_capture_roundtrip() {
        let fen = "1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1";
        let mut b = board(fen);
        let mv = b.parse_move("a7b8n").unwrap();
        b.make_move(mv);
        assert_eq!(b.piece_on(Square::B8), Some(Piece::new(Color::White, PieceKind::Knight)));
        assert_eq!(b.pieces(PieceKind::Pawn, Color::White).count(), 0);
        b.undo_move(mv);
        assert_eq!(b, board(fen));
    }

    #[test]
    fn attacks_are_blocked() {
        let b = board("4k3/8/8/8/1b6/2P5/8/4K3 w - - 0 1");
        assert!(!b.is_square_attacked(Square::E1, Color::Black));
        assert!(b.is_square_attacked(Square::C3, Color::Black));
        assert!(b.is_square_attacked(Square::D4, Color::White));
        assert!(!b.in_check());
    }
}
