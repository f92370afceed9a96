//! Search algorithms and move ordering.

pub mod control;
pub mod heuristics;
pub mod negamax;
pub mod ordering;
pub mod tt;

use gambit_core::{Move, Position};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, EngineConfig};
use crate::eval::{Evaluator, PestoEvaluator};
use crate::time::Clock;
use control::SearchControl;
use heuristics::{HistoryTable, KillerTable};
use negamax::{INF, MATE_SCORE, SearchContext};
use tt::TranspositionTable;

/// Result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found at the highest completed depth.
    pub best_move: Move,
    /// Score in centipawns from the side to move's perspective.
    pub score: i32,
    /// Depth reached. Zero if no iteration completed.
    pub depth: u8,
    /// Total nodes visited during the search.
    pub nodes: u64,
}

/// Iterative-deepening searcher.
///
/// Owns the transposition table; whether it survives between calls is
/// governed by [`EngineConfig::persistent_tt`].
pub struct Engine<E = PestoEvaluator> {
    config: EngineConfig,
    tt: TranspositionTable,
    evaluator: E,
}

impl Engine<PestoEvaluator> {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_evaluator(config, PestoEvaluator)
    }
}

impl Default for Engine<PestoEvaluator> {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            tt: TranspositionTable::new(config.tt_entries),
            config,
            evaluator: PestoEvaluator,
        }
    }
}

impl<E> Engine<E> {
    /// Build an engine that scores leaves with `evaluator`.
    pub fn with_evaluator(config: EngineConfig, evaluator: E) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tt: TranspositionTable::new(config.tt_entries),
            config,
            evaluator,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn transposition_table(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Clear the transposition table (preserving the allocation).
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Pick a move for the side to move within the clock's budget.
    pub fn select_move<P>(&mut self, position: &mut P, clock: &dyn Clock) -> Move
    where
        P: Position + ?Sized,
        E: Evaluator<P>,
    {
        self.search(position, clock, |_| {}).best_move
    }

    /// Run iterative deepening from depth 1 up to the configured maximum.
    ///
    /// Calls `on_iteration` after each completed depth. An iteration cut
    /// short by the deadline is discarded and the previous one stands; if
    /// none completed, the first legal move is returned at depth 0.
    pub fn search<P, F>(&mut self, position: &mut P, clock: &dyn Clock, mut on_iteration: F) -> SearchResult
    where
        P: Position + ?Sized,
        E: Evaluator<P>,
        F: FnMut(&SearchResult),
    {
        let root_moves = position.legal_moves(false);
        let Some(&fallback) = root_moves.as_slice().first() else {
            let in_check = position.is_in_check();
            warn!(in_check, "no legal moves at the root");
            return SearchResult {
                best_move: Move::NULL,
                score: if in_check { -MATE_SCORE } else { 0 },
                depth: 0,
                nodes: 0,
            };
        };

        if !self.config.persistent_tt {
            self.tt.clear();
        }

        let mut ctx = SearchContext {
            tt: &mut self.tt,
            evaluator: &self.evaluator,
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            control: SearchControl::new(clock, self.config.time_divisor, self.config.poll_interval),
            nodes: 0,
            root_best: Move::NULL,
            max_extensions: self.config.max_extensions,
            late_move_reductions: self.config.late_move_reductions,
        };

        let mut completed = SearchResult {
            best_move: Move::NULL,
            score: 0,
            depth: 0,
            nodes: 0,
        };

        for depth in 1..=self.config.max_depth {
            ctx.root_best = Move::NULL;

            let Ok(score) = ctx.negamax(position, i32::from(depth), 0, -INF, INF, 0) else {
                debug!(depth, nodes = ctx.nodes, "iteration aborted, keeping previous depth");
                break;
            };

            completed = SearchResult {
                best_move: ctx.root_best,
                score,
                depth,
                nodes: ctx.nodes,
            };
            debug!(
                depth,
                score,
                nodes = ctx.nodes,
                best_move = %completed.best_move,
                elapsed_ms = clock.elapsed_ms(),
                "iteration complete"
            );
            on_iteration(&completed);

            if ctx.control.budget_exhausted() {
                break;
            }
        }

        completed.nodes = ctx.nodes;
        if completed.best_move.is_null() {
            completed.best_move = fallback;
        }

        info!(
            best_move = %completed.best_move,
            score = completed.score,
            depth = completed.depth,
            nodes = completed.nodes,
            "search finished"
        );
        completed
    }
}

#[cfg(test)]
mod tests {
    use gambit_core::{Board, Position};

    use super::{Engine, SearchResult};
    use crate::config::EngineConfig;
    use crate::search::negamax::{MATE_SCORE, MATE_THRESHOLD};
    use crate::time::{FixedClock, ShrinkingClock};

    fn engine(max_depth: u8) -> Engine {
        Engine::new(EngineConfig {
            tt_entries: 1 << 16,
            max_depth,
            ..EngineConfig::default()
        })
        .unwrap()
    }

    fn search(fen: &str, max_depth: u8) -> SearchResult {
        let mut board: Board = fen.parse().unwrap();
        engine(max_depth).search(&mut board, &FixedClock::unlimited(), |_| {})
    }

    #[test]
    fn depth_one_from_start_prefers_knight_development() {
        let mut board = Board::starting_position();
        let result = engine(1).search(&mut board, &FixedClock::unlimited(), |_| {});
        assert_eq!(result.best_move.to_string(), "g1f3");
        assert_eq!(result.score, 37);
        assert_eq!(result.depth, 1);
        // Root, one quiescence node per reply, and a full-window re-search
        // for each reply that raised alpha after the first.
        assert_eq!(result.nodes, 24);
    }

    #[test]
    fn finds_mate_in_one() {
        let result = search(
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
            3,
        );
        assert_eq!(result.best_move.to_string(), "h5f7");
        assert_eq!(result.score, MATE_SCORE - 1);
    }

    #[test]
    fn finds_back_rank_mate() {
        let result = search("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 3);
        assert_eq!(result.best_move.to_string(), "a1a8");
        assert_eq!(result.score, MATE_SCORE - 1);
    }

    #[test]
    fn stalemate_scores_zero() {
        let result = search("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1", 4);
        assert!(result.best_move.is_null());
        assert_eq!(result.score, 0);
        assert_eq!(result.depth, 0);
    }

    #[test]
    fn checkmated_root_scores_mate() {
        let result = search("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1", 4);
        assert!(result.best_move.is_null());
        assert!(result.score <= -MATE_THRESHOLD);
    }

    #[test]
    fn reports_every_completed_depth() {
        let mut board = Board::starting_position();
        let mut depths = Vec::new();
        let result = engine(4).search(&mut board, &FixedClock::unlimited(), |r| depths.push(r.depth));
        assert_eq!(depths, vec![1, 2, 3, 4]);
        assert_eq!(result.depth, 4);
    }

    #[test]
    fn repetition_scores_zero_despite_material() {
        let mut board: Board = "7k/8/8/8/8/8/r7/6NK w - - 0 1".parse().unwrap();
        for text in ["g1f3", "h8g8", "f3g1", "g8h8"] {
            let mv = board.parse_move(text).unwrap();
            board.make_move(mv);
        }
        let result = engine(2).search(&mut board, &FixedClock::unlimited(), |_| {});
        assert_eq!(result.score, 0);
        assert_eq!(result.best_move.to_string(), "g1f3");
    }

    #[test]
    fn expired_clock_falls_back_to_first_legal_move() {
        let mut board = Board::starting_position();
        let first = board.legal_moves(false).as_slice()[0];
        let mut engine = Engine::new(EngineConfig {
            poll_interval: 1,
            ..EngineConfig::default()
        })
        .unwrap();
        let result = engine.search(&mut board, &FixedClock::expired(), |_| {});
        assert_eq!(result.best_move, first);
        assert_eq!(result.depth, 0);
        assert_eq!(board, Board::starting_position());
    }

    #[test]
    fn expired_clock_still_completes_depth_one_between_polls() {
        let mut board = Board::starting_position();
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        let result = engine.search(&mut board, &FixedClock::expired(), |_| {});
        assert_eq!(result.depth, 1);
        assert_eq!(result.best_move.to_string(), "g1f3");
    }

    #[test]
    fn draining_clock_returns_legal_move_promptly() {
        let mut board: Board = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();
        let before = board.clone();
        let clock = ShrinkingClock::new(1_000, 1);
        let mut engine = Engine::new(EngineConfig {
            poll_interval: 64,
            ..EngineConfig::default()
        })
        .unwrap();
        let mv = engine.select_move(&mut board, &clock);
        assert!(board.legal_moves(false).iter().any(|&legal| legal == mv));
        assert!(clock.polls() < 200, "{} polls", clock.polls());
        assert_eq!(board, before);
    }

    #[test]
    fn table_lifetime_follows_config() {
        let mut board = Board::starting_position();
        let mut fresh = engine(3);
        fresh.search(&mut board, &FixedClock::unlimited(), |_| {});
        assert!(fresh.transposition_table().occupied() > 0);

        let mut persistent = Engine::new(EngineConfig {
            tt_entries: 1 << 16,
            max_depth: 3,
            persistent_tt: true,
            ..EngineConfig::default()
        })
        .unwrap();
        let cold = persistent.search(&mut board, &FixedClock::unlimited(), |_| {});
        let warm = persistent.search(&mut board, &FixedClock::unlimited(), |_| {});
        assert!(warm.nodes < cold.nodes);

        let again = fresh.search(&mut board, &FixedClock::unlimited(), |_| {});
        assert_eq!(again.nodes, cold.nodes);
    }

    #[test]
    fn rejects_invalid_config() {
        assert!(Engine::new(EngineConfig { max_depth: 0, ..EngineConfig::default() }).is_err());
    }

    #[test]
    fn works_through_trait_object() {
        let mut board = Board::starting_position();
        let position: &mut dyn Position = &mut board;
        let mv = engine(2).select_move(position, &FixedClock::unlimited());
        assert!(!mv.is_null());
    }
}
