//! Game phase calculation based on remaining non-pawn material.

use gambit_core::{Color, PieceKind, Position};

/// Maximum game phase value, corresponding to a full starting-position complement
/// of non-pawn material.
///
/// Starting totals: 4×1 + 4×1 + 4×2 + 2×4 = 24.
pub const MAX_PHASE: i32 = 24;

/// Phase weight per piece kind, indexed by [`PieceKind::index()`].
pub const PHASE_INCREMENT: [i32; PieceKind::COUNT] = [0, 1, 1, 2, 4, 0];

/// Calculate the game phase from non-pawn, non-king material on the board.
///
/// Returns a value in `0..=MAX_PHASE`; promoted pieces cannot push it higher.
pub fn game_phase<P: Position + ?Sized>(position: &P) -> i32 {
    let mut phase = 0;
    for color in Color::ALL {
        for kind in PieceKind::ALL {
            phase += PHASE_INCREMENT[kind.index()] * position.pieces(kind, color).count() as i32;
        }
    }
    phase.min(MAX_PHASE)
}
