//! Legal move generation: pseudo-legal moves filtered by a make/undo king-safety test.

use crate::board::Board;
use crate::castle_rights::CastleSide;
use crate::chess_move::{Move, MoveList};
use crate::color::Color;
use crate::make_move::{DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS};
use crate::piece::PieceKind;
use crate::square::Square;

impl Board {
    /// Legal moves for the side to move.
    ///
    /// With `captures_only`, yields every capture (en passant and capturing
    /// promotions included) plus quiet queen promotions.
    pub fn legal_moves(&mut self, captures_only: bool) -> MoveList {
        let us = self.side_to_move();
        let mut moves = self.pseudo_legal_moves(captures_only);
        moves.retain(|mv| {
            self.make_move(mv);
            let safe = self
                .king_square(us)
                .is_none_or(|king| !self.is_square_attacked(king, !us));
            self.undo_move(mv);
            safe
        });
        moves
    }

    fn pseudo_legal_moves(&self, captures_only: bool) -> MoveList {
        let us = self.side_to_move();
        let mut moves = MoveList::new();

        for from in self.pieces(PieceKind::Pawn, us) {
            self.pawn_moves(from, captures_only, &mut moves);
        }
        for from in self.pieces(PieceKind::Knight, us) {
            self.step_moves(from, PieceKind::Knight, &KNIGHT_OFFSETS, captures_only, &mut moves);
        }
        for from in self.pieces(PieceKind::Bishop, us) {
            self.slide_moves(from, PieceKind::Bishop, &DIAGONALS, captures_only, &mut moves);
        }
        for from in self.pieces(PieceKind::Rook, us) {
            self.slide_moves(from, PieceKind::Rook, &ORTHOGONALS, captures_only, &mut moves);
        }
        for from in self.pieces(PieceKind::Queen, us) {
            self.slide_moves(from, PieceKind::Queen, &DIAGONALS, captures_only, &mut moves);
            self.slide_moves(from, PieceKind::Queen, &ORTHOGONALS, captures_only, &mut moves);
        }
        for from in self.pieces(PieceKind::King, us) {
            self.step_moves(from, PieceKind::King, &KING_OFFSETS, captures_only, &mut moves);
            if !captures_only {
                self.castling_moves(from, &mut moves);
            }
        }
        moves
    }

    /// Enemy piece kind on `sq`, if any.
    fn enemy_on(&self, sq: Square) -> Option<PieceKind> {
        self.piece_on(sq)
            .filter(|p| p.color != self.side_to_move())
            .map(|p| p.kind)
    }

    fn pawn_moves(&self, from: Square, captures_only: bool, moves: &mut MoveList) {
        let us = self.side_to_move();
        let forward = us.forward();
        let (start_rank, promo_rank) = match us {
            Color::White => (1, 7),
            Color::Black => (6, 0),
        };

        if let Some(to) = from.offset(0, forward) {
            if self.is_empty_square(to) {
                if to.rank() == promo_rank {
                    if captures_only {
                        moves.push(Move::promote(from, to, PieceKind::Queen, None));
                    } else {
                        for kind in PieceKind::PROMOTIONS {
                            moves.push(Move::promote(from, to, kind, None));
                        }
                    }
                } else if !captures_only {
                    moves.push(Move::new(from, to, PieceKind::Pawn));
                    if from.rank() == start_rank {
                        if let Some(two) = to.offset(0, forward).filter(|&sq| self.is_empty_square(sq)) {
                            moves.push(Move::double_push(from, two));
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            let Some(to) = from.offset(df, forward) else {
                continue;
            };
            if let Some(captured) = self.enemy_on(to) {
                if to.rank() == promo_rank {
                    for kind in PieceKind::PROMOTIONS {
                        moves.push(Move::promote(from, to, kind, Some(captured)));
                    }
                } else {
                    moves.push(Move::capture(from, to, PieceKind::Pawn, captured));
                }
            } else if self.en_passant() == Some(to) {
                moves.push(Move::en_passant(from, to));
            }
        }
    }

    fn step_moves(
        &self,
        from: Square,
        piece: PieceKind,
        offsets: &[(i8, i8)],
        captures_only: bool,
        moves: &mut MoveList,
    ) {
        for &(df, dr) in offsets {
            if let Some(to) = from.offset(df, dr) {
                self.push_target(from, to, piece, captures_only, moves);
            }
        }
    }

    fn slide_moves(
        &self,
        from: Square,
        piece: PieceKind,
        directions: &[(i8, i8)],
        captures_only: bool,
        moves: &mut MoveList,
    ) {
        for &(df, dr) in directions {
            let mut cursor = from.offset(df, dr);
            while let Some(to) = cursor {
                self.push_target(from, to, piece, captures_only, moves);
                if !self.is_empty_square(to) {
                    break;
                }
                cursor = to.offset(df, dr);
            }
        }
    }

    /// Push a move to `to` unless it is blocked by a friendly piece.
    fn push_target(
        &self,
        from: Square,
        to: Square,
        piece: PieceKind,
        captures_only: bool,
        moves: &mut MoveList,
    ) {
        match self.piece_on(to) {
            None if !captures_only => moves.push(Move::new(from, to, piece)),
            None => {}
            Some(target) if target.color != self.side_to_move() => {
                moves.push(Move::capture(from, to, piece, target.kind));
            }
            Some(_) => {}
        }
    }

    fn castling_moves(&self, king: Square, moves: &mut MoveList) {
        let us = self.side_to_move();
        let home_rank = match us {
            Color::White => 0,
            Color::Black => 7,
        };
        if king != Square::new(4, home_rank) || self.in_check() {
            return;
        }
        let rank_square = |file: u8| Square::new(file, home_rank);

        for (side, rook_file, empty, passed) in [
            (CastleSide::KingSide, 7, &[5u8, 6][..], &[5u8, 6][..]),
            (CastleSide::QueenSide, 0, &[1, 2, 3][..], &[3, 2][..]),
        ] {
            if !self.castling().has(us, side) {
                continue;
            }
            let rook = self.piece_on(rank_square(rook_file));
            if rook.is_none_or(|p| p.color != us || p.kind != PieceKind::Rook) {
                continue;
            }
            if empty.iter().any(|&f| !self.is_empty_square(rank_square(f))) {
                continue;
            }
            if passed.iter().any(|&f| self.is_square_attacked(rank_square(f), !us)) {
                continue;
            }
            let to = rank_square(if side == CastleSide::KingSide { 6 } else { 2 });
            moves.push(Move::castle(king, to));
        }
    }
}
