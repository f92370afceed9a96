//! Material values and balance.

use gambit_core::{Color, PieceKind, Position};

use crate::eval::score::{S, Score};

/// Raw material values indexed by [`PieceKind::index()`].
pub const MATERIAL_VALUE: [i32; PieceKind::COUNT] = [100, 300, 300, 500, 900, 10_000];

/// Tapered piece values added on top of the square bonus for every piece.
///
/// | Piece  | mg   | eg  |
/// |--------|------|-----|
/// | Pawn   | 82   | 94  |
/// | Knight | 337  | 281 |
/// | Bishop | 365  | 297 |
/// | Rook   | 477  | 512 |
/// | Queen  | 1025 | 936 |
/// | King   | 0    | 0   |
pub const PIECE_VALUE: [Score; PieceKind::COUNT] = [
    S(82, 94),
    S(337, 281),
    S(365, 297),
    S(477, 512),
    S(1025, 936),
    S(0, 0),
];

/// Material balance from White's perspective.
pub fn material<P: Position + ?Sized>(position: &P) -> i32 {
    PieceKind::ALL
        .iter()
        .map(|&kind| {
            let white = position.pieces(kind, Color::White).count() as i32;
            let black = position.pieces(kind, Color::Black).count() as i32;
            (white - black) * MATERIAL_VALUE[kind.index()]
        })
        .sum()
}
