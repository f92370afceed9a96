//! Move ordering: TT move, MVV-LVA captures, promotions, killers, history.

use std::cmp::Reverse;
use std::sync::OnceLock;

use gambit_core::{Color, Move, MoveList, PieceKind};

use crate::search::heuristics::HistoryTable;

/// Score bands, highest searched first. History scores stay below `KILLER`.
const TT_MOVE: i32 = 10_000_000;
const CAPTURE: i32 = 1_000_000;
const PROMOTION: i32 = 900_000;
const KILLER: i32 = 800_000;

/// Ordinal used by MVV-LVA: pawn 1 through king 6.
#[inline]
fn ordinal(kind: PieceKind) -> i32 {
    kind.index() as i32 + 1
}

/// Everything a node knows that influences its ordering.
pub struct OrderingHints<'a> {
    pub tt_move: Move,
    pub killers: [Move; 2],
    pub history: &'a HistoryTable,
    pub side: Color,
}

/// Score a move for ordering purposes.
///
/// - TT move: 10,000,000
/// - Captures: 1,000,000 + 10 × victim − attacker
/// - Quiet promotions: 900,000 + promoted kind
/// - Killer moves: 800,000
/// - Other quiet moves: history score
pub fn score_move(mv: Move, hints: &OrderingHints<'_>) -> i32 {
    if !hints.tt_move.is_null() && mv == hints.tt_move {
        return TT_MOVE;
    }
    if let Some(victim) = mv.captured() {
        return CAPTURE + 10 * ordinal(victim) - ordinal(mv.piece());
    }
    if let Some(promotion) = mv.promotion() {
        return PROMOTION + promotion.index() as i32;
    }
    if hints.killers.contains(&mv) {
        return KILLER;
    }
    hints.history.score(hints.side, mv)
}

/// Sort `moves` by descending score. Equal scores keep generation order.
pub fn order_moves(moves: &mut MoveList, hints: &OrderingHints<'_>) {
    moves
        .as_mut_slice()
        .sort_by_cached_key(|&mv| Reverse(score_move(mv, hints)));
}

// ── LMR Table ─────────────────────────────────────────────────────────────────

/// LMR reduction table in 1024ths of a ply, indexed by `[move_index][depth]`.
static LMR_TABLE: OnceLock<[[i32; 64]; 64]> = OnceLock::new();

fn lmr_table() -> &'static [[i32; 64]; 64] {
    LMR_TABLE.get_or_init(|| {
        let mut t = [[0i32; 64]; 64];
        for (i, row) in t.iter_mut().enumerate().skip(1) {
            for (d, cell) in row.iter_mut().enumerate().skip(1) {
                *cell = ((0.76 + (i as f64).ln() * (d as f64).ln() / 2.32) * 1024.0) as i32;
            }
        }
        t
    })
}

/// Whole-ply reduction for the `move_index`-th move at `depth`.
///
/// At least one ply, and never so much that the reduced search drops below depth 1.
pub fn lmr_reduction(move_index: usize, depth: i32) -> i32 {
    let raw = lmr_table()[move_index.min(63)][depth.clamp(0, 63) as usize] / 1024;
    raw.clamp(1, (depth - 2).max(1))
}
