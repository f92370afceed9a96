//! Chess moves and fixed-capacity move lists.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::piece::PieceKind;
use crate::square::Square;

/// Special handling a move needs when it is made on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    Normal,
    /// Pawn advance of two ranks; sets the en passant square.
    DoublePush,
    /// Pawn capture onto the en passant square.
    EnPassant,
    /// King move of two files; the rook moves too.
    Castle,
}

/// A move, carrying enough context to be scored without consulting the board.
///
/// Equality and hashing look only at the origin, destination and promotion,
/// so a move read back from a table compares equal to the freshly generated
/// one.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    from: Square,
    to: Square,
    piece: PieceKind,
    captured: Option<PieceKind>,
    promotion: Option<PieceKind>,
    flag: MoveFlag,
}

impl Move {
    /// The null move: origin equals destination.
    pub const NULL: Move = Move::new(Square::A1, Square::A1, PieceKind::Pawn);

    /// A quiet move of `piece`.
    #[inline]
    pub const fn new(from: Square, to: Square, piece: PieceKind) -> Move {
        Move {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
            flag: MoveFlag::Normal,
        }
    }

    /// A move of `piece` capturing `captured` on the destination square.
    #[inline]
    pub const fn capture(from: Square, to: Square, piece: PieceKind, captured: PieceKind) -> Move {
        Move {
            captured: Some(captured),
            ..Move::new(from, to, piece)
        }
    }

    /// A pawn promotion, optionally capturing.
    #[inline]
    pub const fn promote(
        from: Square,
        to: Square,
        promotion: PieceKind,
        captured: Option<PieceKind>,
    ) -> Move {
        Move {
            captured,
            promotion: Some(promotion),
            ..Move::new(from, to, PieceKind::Pawn)
        }
    }

    #[inline]
    pub const fn double_push(from: Square, to: Square) -> Move {
        Move {
            flag: MoveFlag::DoublePush,
            ..Move::new(from, to, PieceKind::Pawn)
        }
    }

    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Move {
        Move {
            captured: Some(PieceKind::Pawn),
            flag: MoveFlag::EnPassant,
            ..Move::new(from, to, PieceKind::Pawn)
        }
    }

    /// Castling, expressed as the king's two-file move.
    #[inline]
    pub const fn castle(from: Square, to: Square) -> Move {
        Move {
            flag: MoveFlag::Castle,
            ..Move::new(from, to, PieceKind::King)
        }
    }

    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// The kind of the moving piece.
    #[inline]
    pub const fn piece(self) -> PieceKind {
        self.piece
    }

    #[inline]
    pub const fn captured(self) -> Option<PieceKind> {
        self.captured
    }

    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        self.promotion
    }

    #[inline]
    pub const fn flag(self) -> MoveFlag {
        self.flag
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    /// Neither a capture nor a promotion.
    #[inline]
    pub const fn is_quiet(self) -> bool {
        !self.is_capture() && !self.is_promotion()
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.flag, MoveFlag::Castle)
    }

    #[inline]
    pub fn is_null(self) -> bool {
        self.from == self.to
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.promotion.hash(state);
    }
}

impl Default for Move {
    fn default() -> Move {
        Move::NULL
    }
}

/// Coordinate notation: `e2e4`, `e7e8q`, `0000` for the null move.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("0000");
        }
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.fen_char())?;
        }
        Ok(())
    }
}

/// Upper bound on legal moves in any reachable position.
pub const MAX_MOVES: usize = 256;

/// A stack-allocated list of moves.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[inline]
    pub const fn new() -> MoveList {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }

    /// Append a move. Moves past capacity are dropped in release builds.
    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES, "move list overflow");
        if self.len < MAX_MOVES {
            self.moves[self.len] = mv;
            self.len += 1;
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Keep only the moves for which `keep` returns `true`, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(Move) -> bool) {
        let mut write = 0;
        for read in 0..self.len {
            let mv = self.moves[read];
            if keep(mv) {
                self.moves[write] = mv;
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> MoveList {
        MoveList::new()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> MoveList {
        let mut list = MoveList::new();
        for mv in iter {
            list.push(mv);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::{Move, MoveList};
    use crate::piece::PieceKind;
    use crate::square::Square;

    #[test]
    fn display_coordinate_notation() {
        assert_eq!(Move::new(Square::G1, Square::F3, PieceKind::Knight).to_string(), "g1f3");
        let promo = Move::promote(Square::E7, Square::E8, PieceKind::Queen, None);
        assert_eq!(promo.to_string(), "e7e8q");
        assert_eq!(Move::NULL.to_string(), "0000");
    }

    #[test]
    fn equality_ignores_context() {
        let quiet = Move::new(Square::D1, Square::D8, PieceKind::Queen);
        let capture = Move::capture(Square::D1, Square::D8, PieceKind::Queen, PieceKind::Rook);
        assert_eq!(quiet, capture);

        let queen = Move::promote(Square::A7, Square::A8, PieceKind::Queen, None);
        let knight = Move::promote(Square::A7, Square::A8, PieceKind::Knight, None);
        assert_ne!(queen, knight);
    }

    #[test]
    fn quiet_classification() {
        assert!(Move::new(Square::E2, Square::E3, PieceKind::Pawn).is_quiet());
        assert!(!Move::en_passant(Square::E5, Square::D6).is_quiet());
        assert!(!Move::promote(Square::B7, Square::B8, PieceKind::Rook, None).is_quiet());
        assert!(Move::castle(Square::E1, Square::G1).is_quiet());
    }

    #[test]
    fn retain_preserves_order() {
        let mut list: MoveList = (0u8..8)
            .map(|i| {
                let from = Square::new(i, 1);
                Move::new(from, Square::new(i, 2), PieceKind::Pawn)
            })
            .collect();
        list.retain(|mv| mv.from().file() % 2 == 0);
        let files: Vec<u8> = list.iter().map(|mv| mv.from().file()).collect();
        assert_eq!(files, vec![0, 2, 4, 6]);
    }
}
