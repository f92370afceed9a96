//! The chess board: piece placement, side to move, castling, en passant, move
//! counters and the history needed to undo moves and detect repetitions.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::color::Color;
use crate::error::{BoardError, MoveParseError};
use crate::piece::{Piece, PieceKind};
use crate::square::Square;
use crate::zobrist;

/// State that cannot be recomputed when a move is taken back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Undo {
    pub(crate) mv: Move,
    pub(crate) castling: CastleRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
    pub(crate) hash: u64,
    /// Whether an en passant capture actually removed a pawn.
    pub(crate) en_passant_pawn: bool,
}

/// Complete, mutable chess position.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; Square::COUNT],
    /// Indexed by `[Color::index()][PieceKind::index()]`.
    pieces: [[Bitboard; PieceKind::COUNT]; Color::COUNT],
    side_to_move: Color,
    castling: CastleRights,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
    hash: u64,
    pub(crate) history: Vec<Undo>,
    /// Hash of every position before each move in `history`.
    pub(crate) hash_history: Vec<u64>,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// A board with no pieces, White to move, no rights.
    pub(crate) fn empty() -> Board {
        Board {
            squares: [None; Square::COUNT],
            pieces: [[Bitboard::EMPTY; PieceKind::COUNT]; Color::COUNT],
            side_to_move: Color::White,
            castling: CastleRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            history: Vec::new(),
            hash_history: Vec::new(),
        }
    }

    /// The standard starting position.
    pub fn starting_position() -> Board {
        let mut board = Board::empty();
        for (file, kind) in (0u8..).zip(BACK_RANK) {
            board.put_piece(Square::new(file, 0), Piece::new(Color::White, kind));
            board.put_piece(Square::new(file, 1), Piece::new(Color::White, PieceKind::Pawn));
            board.put_piece(Square::new(file, 6), Piece::new(Color::Black, PieceKind::Pawn));
            board.put_piece(Square::new(file, 7), Piece::new(Color::Black, kind));
        }
        board.set_state(Color::White, CastleRights::ALL, None, 0, 1);
        board
    }

    /// Install the non-placement fields and recompute the hash from scratch.
    pub(crate) fn set_state(
        &mut self,
        side_to_move: Color,
        castling: CastleRights,
        en_passant: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) {
        self.side_to_move = side_to_move;
        self.castling = castling;
        self.en_passant = en_passant;
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
        self.hash = self.compute_hash();
    }

    /// Zobrist hash recomputed from every field.
    pub fn compute_hash(&self) -> u64 {
        let mut hash = zobrist::castling(self.castling.bits());
        for sq in Square::all() {
            if let Some(piece) = self.squares[sq.index()] {
                hash ^= zobrist::piece_square(piece.index(), sq.index());
            }
        }
        if let Some(ep) = self.en_passant {
            hash ^= zobrist::en_passant_file(ep.file());
        }
        if self.side_to_move == Color::Black {
            hash ^= zobrist::side_to_move();
        }
        hash
    }

    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn pieces(&self, kind: PieceKind, color: Color) -> Bitboard {
        self.pieces[color.index()][kind.index()]
    }

    /// Every square occupied by `color`.
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.pieces[color.index()]
            .iter()
            .fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    #[inline]
    pub fn is_empty_square(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(PieceKind::King, color).first()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Half-moves played since the start of the game, derived from the move counters.
    pub fn ply_count(&self) -> u32 {
        let black = u32::from(self.side_to_move == Color::Black);
        u32::from(self.fullmove_number.saturating_sub(1)) * 2 + black
    }

    pub(crate) fn put_piece(&mut self, sq: Square, piece: Piece) {
        debug_assert!(self.squares[sq.index()].is_none(), "square {sq} occupied");
        self.squares[sq.index()] = Some(piece);
        self.pieces[piece.color.index()][piece.kind.index()] ^= sq.bitboard();
        self.hash ^= zobrist::piece_square(piece.index(), sq.index());
    }

    pub(crate) fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.squares[sq.index()].take()?;
        self.pieces[piece.color.index()][piece.kind.index()] ^= sq.bitboard();
        self.hash ^= zobrist::piece_square(piece.index(), sq.index());
        Some(piece)
    }

    pub(crate) fn set_castling(&mut self, rights: CastleRights) {
        self.hash ^= zobrist::castling(self.castling.bits()) ^ zobrist::castling(rights.bits());
        self.castling = rights;
    }

    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        if let Some(old) = self.en_passant {
            self.hash ^= zobrist::en_passant_file(old.file());
        }
        if let Some(new) = sq {
            self.hash ^= zobrist::en_passant_file(new.file());
        }
        self.en_passant = sq;
    }

    pub(crate) fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock = clock;
    }

    pub(crate) fn set_fullmove_number(&mut self, number: u16) {
        self.fullmove_number = number;
    }

    pub(crate) fn flip_side(&mut self) {
        self.side_to_move = !self.side_to_move;
        self.hash ^= zobrist::side_to_move();
    }

    /// Overwrite the hash with a saved value when taking a move back.
    pub(crate) fn restore_hash(&mut self, hash: u64) {
        self.hash = hash;
    }

    /// Structural checks applied after FEN parsing.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let count = self.pieces(PieceKind::King, color).count();
            if count != 1 {
                return Err(BoardError::InvalidKingCount { color, count });
            }
        }
        let back_ranks = Bitboard::new(0xFF00_0000_0000_00FF);
        let pawns = self.pieces(PieceKind::Pawn, Color::White) | self.pieces(PieceKind::Pawn, Color::Black);
        if !(pawns & back_ranks).is_empty() {
            return Err(BoardError::PawnsOnBackRank);
        }
        let waiting = !self.side_to_move;
        if let Some(king) = self.king_square(waiting) {
            if self.is_square_attacked(king, self.side_to_move) {
                return Err(BoardError::OpponentInCheck);
            }
        }
        Ok(())
    }

    /// Whether the current position occurred earlier with the same side to
    /// move, looking back no further than the last pawn move or capture.
    pub fn is_repeated_position(&self) -> bool {
        self.earlier_occurrences().next().is_some()
    }

    fn earlier_occurrences(&self) -> impl Iterator<Item = &u64> + '_ {
        let hash = self.hash;
        self.hash_history
            .iter()
            .rev()
            .take(usize::from(self.halfmove_clock))
            .skip(1)
            .step_by(2)
            .filter(move |&&h| h == hash)
    }

    fn is_threefold_repetition(&self) -> bool {
        self.earlier_occurrences().count() >= 2
    }

    /// Neither side can possibly deliver mate: bare kings, or one minor piece.
    pub fn is_insufficient_material(&self) -> bool {
        let heavy = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen];
        let has_heavy = Color::ALL
            .iter()
            .any(|&c| heavy.iter().any(|&k| !self.pieces(k, c).is_empty()));
        if has_heavy {
            return false;
        }
        let minors: u32 = Color::ALL
            .iter()
            .map(|&c| (self.pieces(PieceKind::Knight, c) | self.pieces(PieceKind::Bishop, c)).count())
            .sum();
        minors <= 1
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Whether the side to move is checkmated.
    pub fn is_checkmate(&mut self) -> bool {
        self.in_check() && self.legal_moves(false).is_empty()
    }

    /// Stalemate, fifty-move rule, threefold repetition or insufficient material.
    pub fn is_draw(&mut self) -> bool {
        self.is_fifty_move_draw()
            || self.is_insufficient_material()
            || self.is_threefold_repetition()
            || (!self.in_check() && self.legal_moves(false).is_empty())
    }

    /// Resolve coordinate notation (`e2e4`, `e7e8q`) against the legal moves.
    pub fn parse_move(&mut self, text: &str) -> Result<Move, MoveParseError> {
        let malformed = || MoveParseError::Malformed(text.to_string());
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(malformed());
        }
        let from = Square::from_algebraic(&text[0..2]).ok_or_else(malformed)?;
        let to = Square::from_algebraic(&text[2..4]).ok_or_else(malformed)?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_fen_char(c) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) && c.is_ascii_lowercase() => Some(kind),
                _ => return Err(malformed()),
            },
        };
        self.legal_moves(false)
            .iter()
            .copied()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion)
            .ok_or_else(|| MoveParseError::Illegal(text.to_string()))
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::starting_position()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{self}\")")
    }
}
