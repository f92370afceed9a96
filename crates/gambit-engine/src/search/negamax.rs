//! Negamax alpha-beta search with quiescence.

use gambit_core::{Move, Position};

use crate::eval::Evaluator;
use crate::search::control::SearchControl;
use crate::search::heuristics::{HistoryTable, KillerTable};
use crate::search::ordering::{OrderingHints, lmr_reduction, order_moves};
use crate::search::tt::{Bound, TranspositionTable};

/// Base score for checkmate (adjusted by ply for mate distance).
pub const MATE_SCORE: i32 = 10_000_000;

/// Scores beyond this magnitude indicate a forced mate.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1000;

/// Strictly outside every reachable score.
pub const INF: i32 = MATE_SCORE + 1;

/// Maximum search depth (in plies) for array sizing and recursion limits.
pub const MAX_PLY: usize = 128;

/// The deadline fired somewhere below this node; its result is meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchAborted;

/// Mutable state for one move-selection call.
///
/// Killers and history start empty for every call; the transposition table
/// is borrowed from the engine, which decides whether it survives.
pub(crate) struct SearchContext<'a, E> {
    pub tt: &'a mut TranspositionTable,
    pub evaluator: &'a E,
    pub killers: KillerTable,
    pub history: HistoryTable,
    pub control: SearchControl<'a>,
    pub nodes: u64,
    /// Best root move of the iteration in progress.
    pub root_best: Move,
    pub max_extensions: u32,
    pub late_move_reductions: bool,
}

impl<'a, E> SearchContext<'a, E> {
    /// Negamax alpha-beta search.
    ///
    /// Returns the fail-soft score for the side to move, or [`SearchAborted`]
    /// if the deadline fired. The position is restored either way.
    pub fn negamax<P>(
        &mut self,
        pos: &mut P,
        depth: i32,
        ply: usize,
        mut alpha: i32,
        beta: i32,
        extensions: u32,
    ) -> Result<i32, SearchAborted>
    where
        P: Position + ?Sized,
        E: Evaluator<P>,
    {
        if ply > 0 && pos.is_repeated_position() {
            return Ok(0);
        }

        // Leaf node: drop into quiescence search
        if depth <= 0 {
            return self.qsearch(pos, ply, alpha, beta);
        }

        self.nodes += 1;
        if self.control.should_stop(self.nodes) {
            return Err(SearchAborted);
        }

        if ply >= MAX_PLY {
            return Ok(self.evaluator.evaluate(pos));
        }

        let mut moves = pos.legal_moves(false);
        let in_check = pos.is_in_check();

        // No legal moves: checkmate or stalemate
        if moves.is_empty() {
            return Ok(if in_check { ply as i32 - MATE_SCORE } else { 0 });
        }

        let hash = pos.hash();
        if let Some(score) = self
            .tt
            .probe(hash)
            .and_then(|entry| entry.usable_score(hash, depth, ply, alpha, beta))
        {
            return Ok(score);
        }
        let tt_move = self.tt.best_move(hash);

        let side = pos.side_to_move();
        order_moves(
            &mut moves,
            &OrderingHints {
                tt_move,
                killers: self.killers.at(ply),
                history: &self.history,
                side,
            },
        );

        let original_alpha = alpha;
        let mut best_score = -INF;
        let mut best_move = Move::NULL;

        for (index, &mv) in moves.iter().enumerate() {
            pos.make_move(mv);
            let result = self.search_move(pos, mv, index, depth, ply, alpha, beta, extensions, in_check);
            pos.undo_move(mv);
            let score = result?;

            if score > best_score {
                best_score = score;
                best_move = mv;
                if ply == 0 {
                    self.root_best = mv;
                }
            }
            alpha = alpha.max(score);

            if alpha >= beta {
                if mv.is_quiet() {
                    self.killers.store(ply, mv);
                    self.history.update(side, mv, depth);
                }
                break;
            }
        }

        self.tt.store(
            hash,
            best_move,
            depth,
            best_score,
            Bound::classify(best_score, original_alpha, beta),
            ply,
        );

        Ok(best_score)
    }

    /// Search the child reached by `mv`, already made on `pos`.
    ///
    /// The first move gets the full window. Later moves are probed with a
    /// null window (reduced for late quiet moves) and re-searched only when
    /// the probe says they might raise alpha.
    #[allow(clippy::too_many_arguments)]
    fn search_move<P>(
        &mut self,
        pos: &mut P,
        mv: Move,
        index: usize,
        depth: i32,
        ply: usize,
        alpha: i32,
        beta: i32,
        extensions: u32,
        in_check: bool,
    ) -> Result<i32, SearchAborted>
    where
        P: Position + ?Sized,
        E: Evaluator<P>,
    {
        let gives_check = pos.is_in_check();
        let extension = u32::from(gives_check && extensions < self.max_extensions);
        let new_depth = depth - 1 + extension as i32;
        let child_extensions = extensions + extension;
        let next_ply = ply + 1;

        if index == 0 {
            return Ok(-self.negamax(pos, new_depth, next_ply, -beta, -alpha, child_extensions)?);
        }

        let reduction = if self.late_move_reductions
            && index >= 3
            && depth >= 3
            && mv.is_quiet()
            && !gives_check
            && !in_check
        {
            lmr_reduction(index, depth)
        } else {
            0
        };

        let mut score = -self.negamax(
            pos,
            new_depth - reduction,
            next_ply,
            -alpha - 1,
            -alpha,
            child_extensions,
        )?;

        if score > alpha && (reduction > 0 || score < beta) {
            score = -self.negamax(pos, new_depth, next_ply, -beta, -alpha, child_extensions)?;
        }

        Ok(score)
    }

    /// Quiescence search: resolve captures before trusting the static score.
    ///
    /// Stand-pat is a lower bound; only capture-class moves are searched and
    /// depth never decreases. No transposition table, no mate detection.
    fn qsearch<P>(&mut self, pos: &mut P, ply: usize, mut alpha: i32, beta: i32) -> Result<i32, SearchAborted>
    where
        P: Position + ?Sized,
        E: Evaluator<P>,
    {
        self.nodes += 1;
        if self.control.should_stop(self.nodes) {
            return Err(SearchAborted);
        }

        let stand_pat = self.evaluator.evaluate(pos);
        if stand_pat >= beta || ply >= MAX_PLY {
            return Ok(stand_pat);
        }
        alpha = alpha.max(stand_pat);

        let mut moves = pos.legal_moves(true);
        order_moves(
            &mut moves,
            &OrderingHints {
                tt_move: Move::NULL,
                killers: [Move::NULL; 2],
                history: &self.history,
                side: pos.side_to_move(),
            },
        );

        let mut best_score = stand_pat;
        for &mv in moves.iter() {
            pos.make_move(mv);
            let result = self.qsearch(pos, ply + 1, -beta, -alpha);
            pos.undo_move(mv);
            let score = -result?;

            best_score = best_score.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        Ok(best_score)
    }
}
