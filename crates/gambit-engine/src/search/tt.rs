//! Direct-mapped transposition table.
//!
//! One entry per slot at `hash % len`, always overwritten by the latest
//! store. A probe hands back whatever occupies the slot; callers must check
//! the stored hash before trusting it ([`TtEntry::usable_score`] does).

use gambit_core::Move;

use crate::search::negamax::MATE_THRESHOLD;

/// How the stored score relates to the true value of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The stored score is exact (PV node).
    Exact,
    /// The stored score is a lower bound (failed high / beta cutoff).
    LowerBound,
    /// The stored score is an upper bound (failed low / all-node).
    UpperBound,
}

impl Bound {
    /// Classify a node's result against the window it was searched with.
    pub fn classify(best: i32, original_alpha: i32, beta: i32) -> Bound {
        if best <= original_alpha {
            Bound::UpperBound
        } else if best >= beta {
            Bound::LowerBound
        } else {
            Bound::Exact
        }
    }
}

/// Convert a search score to TT-storable form.
///
/// Mate scores are path-dependent: `MATE_SCORE - ply` changes with the
/// search path. Store them as distance-from-node instead of distance-from-root.
pub fn score_to_tt(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score > MATE_THRESHOLD {
        score + ply
    } else if score < -MATE_THRESHOLD {
        score - ply
    } else {
        score
    }
}

/// Reverse [`score_to_tt`].
pub fn score_from_tt(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score > MATE_THRESHOLD {
        score - ply
    } else if score < -MATE_THRESHOLD {
        score + ply
    } else {
        score
    }
}

/// One slot's worth of search knowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    pub hash: u64,
    /// Best move found at this node; seeds ordering on the next visit.
    pub best_move: Move,
    pub depth: i32,
    /// Node-relative score (see [`score_to_tt`]).
    pub score: i32,
    pub bound: Bound,
}

impl TtEntry {
    /// The stored score, if this entry can replace searching the node.
    ///
    /// Requires a matching hash, sufficient depth, a non-root node, and a
    /// bound that is conclusive against the current window.
    pub fn usable_score(&self, hash: u64, depth: i32, ply: usize, alpha: i32, beta: i32) -> Option<i32> {
        if self.hash != hash || self.depth < depth || ply == 0 {
            return None;
        }
        let score = score_from_tt(self.score, ply);
        let conclusive = match self.bound {
            Bound::Exact => true,
            Bound::LowerBound => score >= beta,
            Bound::UpperBound => score <= alpha,
        };
        conclusive.then_some(score)
    }
}

/// Fixed-size table of [`TtEntry`] slots.
pub struct TranspositionTable {
    entries: Box<[Option<TtEntry>]>,
}

impl TranspositionTable {
    /// Allocate `len` empty slots (at least one).
    pub fn new(len: usize) -> Self {
        Self {
            entries: vec![None; len.max(1)].into_boxed_slice(),
        }
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash % self.entries.len() as u64) as usize
    }

    /// The entry in `hash`'s slot, which may belong to another position.
    #[inline]
    pub fn probe(&self, hash: u64) -> Option<&TtEntry> {
        self.entries[self.index(hash)].as_ref()
    }

    /// Best move stored for exactly this position, or [`Move::NULL`].
    pub fn best_move(&self, hash: u64) -> Move {
        self.probe(hash)
            .filter(|entry| entry.hash == hash)
            .map_or(Move::NULL, |entry| entry.best_move)
    }

    /// Overwrite `hash`'s slot.
    pub fn store(&mut self, hash: u64, best_move: Move, depth: i32, score: i32, bound: Bound, ply: usize) {
        let idx = self.index(hash);
        self.entries[idx] = Some(TtEntry {
            hash,
            best_move,
            depth,
            score: score_to_tt(score, ply),
            bound,
        });
    }

    /// Empty every slot, keeping the allocation.
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.entries.iter().filter(|slot| slot.is_some()).count()
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("len", &self.len())
            .finish()
    }
}
