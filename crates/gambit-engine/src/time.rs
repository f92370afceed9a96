//! Clock collaborator: how long this move has taken and how much game time is left.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Wall-clock view the search polls to decide when to stop.
pub trait Clock {
    /// Milliseconds spent in the current move-selection call.
    fn elapsed_ms(&self) -> u64;

    /// Milliseconds left on the side to move's clock for the rest of the game.
    fn remaining_ms(&self) -> u64;
}

/// Real clock: elapsed time measured from [`GameClock::start`].
#[derive(Debug, Clone, Copy)]
pub struct GameClock {
    started: Instant,
    remaining: Duration,
}

impl GameClock {
    /// Start timing now with `remaining` time left in the game.
    pub fn start(remaining: Duration) -> Self {
        Self {
            started: Instant::now(),
            remaining,
        }
    }
}

impl Clock for GameClock {
    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn remaining_ms(&self) -> u64 {
        self.remaining.as_millis() as u64
    }
}

/// Frozen clock for deterministic searches.
///
/// `FixedClock::unlimited()` never runs out, so the depth cap alone ends the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    pub elapsed_ms: u64,
    pub remaining_ms: u64,
}

impl FixedClock {
    pub fn new(elapsed_ms: u64, remaining_ms: u64) -> Self {
        Self {
            elapsed_ms,
            remaining_ms,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(0, u64::MAX)
    }

    /// No time at all: the first poll aborts.
    pub fn expired() -> Self {
        Self::new(0, 0)
    }
}

impl Clock for FixedClock {
    fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }
}

/// Simulated clock that advances `step_ms` on every elapsed-time query.
///
/// Models a game clock draining while the search runs, without sleeping.
#[derive(Debug)]
pub struct ShrinkingClock {
    elapsed: Cell<u64>,
    step_ms: u64,
    remaining_ms: u64,
}

impl ShrinkingClock {
    pub fn new(remaining_ms: u64, step_ms: u64) -> Self {
        Self {
            elapsed: Cell::new(0),
            step_ms,
            remaining_ms,
        }
    }

    /// Number of elapsed-time queries made so far.
    pub fn polls(&self) -> u64 {
        self.elapsed.get().checked_div(self.step_ms).unwrap_or(0)
    }
}

impl Clock for ShrinkingClock {
    fn elapsed_ms(&self) -> u64 {
        let now = self.elapsed.get().saturating_add(self.step_ms);
        self.elapsed.set(now);
        now
    }

    fn remaining_ms(&self) -> u64 {
        self.remaining_ms.saturating_sub(self.elapsed.get())
    }
}
