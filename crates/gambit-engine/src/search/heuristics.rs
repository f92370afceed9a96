//! Killer move table and history heuristic for quiet move ordering.

use gambit_core::{Color, Move, PieceKind};

use crate::search::negamax::MAX_PLY;

/// Two killer moves per ply: quiet moves that caused beta cutoffs.
pub struct KillerTable {
    slots: [[Move; 2]; MAX_PLY],
}

impl KillerTable {
    pub fn new() -> Self {
        Self {
            slots: [[Move::NULL; 2]; MAX_PLY],
        }
    }

    /// Store a killer move at the given ply.
    ///
    /// Shifts slot 0 to slot 1 if the new move differs from slot 0.
    pub fn store(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }
        if self.slots[ply][0] != mv {
            self.slots[ply][1] = self.slots[ply][0];
            self.slots[ply][0] = mv;
        }
    }

    /// Both killers at `ply`, newest first. Null beyond [`MAX_PLY`].
    pub fn at(&self, ply: usize) -> [Move; 2] {
        self.slots.get(ply).copied().unwrap_or([Move::NULL; 2])
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Ceiling for history scores. Keeps quiet moves below the killer band.
pub const HISTORY_MAX: i32 = 1 << 18;

/// History heuristic table indexed by `[side_to_move][piece_kind][to_square]`.
pub struct HistoryTable {
    table: [[[i32; 64]; PieceKind::COUNT]; Color::COUNT],
}

impl HistoryTable {
    pub fn new() -> Self {
        Self {
            table: [[[0; 64]; PieceKind::COUNT]; Color::COUNT],
        }
    }

    /// Reward a quiet move that caused a beta cutoff at `depth`.
    pub fn update(&mut self, side: Color, mv: Move, depth: i32) {
        let bonus = depth.max(1).saturating_mul(depth.max(1));
        let entry = &mut self.table[side.index()][mv.piece().index()][mv.to().index()];
        *entry = entry.saturating_add(bonus).min(HISTORY_MAX);
    }

    pub fn score(&self, side: Color, mv: Move) -> i32 {
        self.table[side.index()][mv.piece().index()][mv.to().index()]
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use gambit_core::{Color, Move, PieceKind, Square};

    use super::{HISTORY_MAX, HistoryTable, KillerTable};

    fn pawn(from: Square, to: Square) -> Move {
        Move::new(from, to, PieceKind::Pawn)
    }

    #[test]
    fn killer_store_and_check() {
        let mut kt = KillerTable::new();
        let mv1 = pawn(Square::E2, Square::E4);
        let mv2 = pawn(Square::D2, Square::D4);

        kt.store(5, mv1);
        assert!(kt.at(5).contains(&mv1));
        assert!(!kt.at(5).contains(&mv2));

        kt.store(5, mv2);
        assert_eq!(kt.at(5), [mv2, mv1]);
    }

    #[test]
    fn killer_same_move_no_shift() {
        let mut kt = KillerTable::new();
        let mv1 = pawn(Square::E2, Square::E4);
        let mv2 = pawn(Square::D2, Square::D4);

        kt.store(0, mv1);
        kt.store(0, mv2);
        kt.store(0, mv2);
        assert_eq!(kt.at(0), [mv2, mv1]);
    }

    #[test]
    fn killer_plies_independent_and_bounded() {
        let mut kt = KillerTable::new();
        let mv = pawn(Square::E2, Square::E4);
        kt.store(3, mv);
        assert!(kt.at(3).contains(&mv));
        assert!(!kt.at(4).contains(&mv));

        kt.store(10_000, mv);
        assert!(!kt.at(10_000).contains(&mv));
        assert_eq!(kt.at(10_000), [Move::NULL; 2]);
    }

    #[test]
    fn history_adds_depth_squared_per_side() {
        let mut ht = HistoryTable::new();
        let mv = Move::new(Square::G1, Square::F3, PieceKind::Knight);
        ht.update(Color::White, mv, 4);
        ht.update(Color::White, mv, 3);
        assert_eq!(ht.score(Color::White, mv), 25);
        assert_eq!(ht.score(Color::Black, mv), 0);
    }

    #[test]
    fn history_clamped() {
        let mut ht = HistoryTable::new();
        let mv = pawn(Square::A2, Square::A3);
        for _ in 0..10_000 {
            ht.update(Color::Black, mv, 40);
        }
        assert_eq!(ht.score(Color::Black, mv), HISTORY_MAX);
    }
}
