//! Search control: polled deadline derived from the clock.

use crate::time::Clock;

/// Decides when a search must stop.
///
/// The per-move budget is `remaining / divisor`, both read from the clock.
/// Inside the tree the clock is consulted only every `poll_interval` nodes,
/// so an aborted search may run slightly past the deadline.
pub struct SearchControl<'a> {
    clock: &'a dyn Clock,
    divisor: u64,
    poll_mask: u64,
    stopped: bool,
}

impl<'a> SearchControl<'a> {
    /// `poll_interval` must be a power of two (see [`EngineConfig::validate`](crate::EngineConfig::validate)).
    pub fn new(clock: &'a dyn Clock, divisor: u64, poll_interval: u64) -> Self {
        Self {
            clock,
            divisor: divisor.max(1),
            poll_mask: poll_interval.max(1) - 1,
            stopped: false,
        }
    }

    /// Whether the per-move budget is used up. Called between iterations.
    pub fn budget_exhausted(&self) -> bool {
        self.clock.elapsed_ms() >= self.clock.remaining_ms() / self.divisor
    }

    /// Check whether the search should abort immediately.
    ///
    /// Once the deadline fires the stop is latched, so every frame on the
    /// way back up sees it without touching the clock again.
    pub fn should_stop(&mut self, nodes: u64) -> bool {
        if self.stopped {
            return true;
        }
        if nodes & self.poll_mask != 0 {
            return false;
        }
        if self.budget_exhausted() {
            self.stopped = true;
        }
        self.stopped
    }
}

#[cfg(test)]
mod tests {
    use super::SearchControl;
    use crate::time::{FixedClock, ShrinkingClock};

    #[test]
    fn budget_is_fraction_of_remaining() {
        let inside = FixedClock::new(99, 3000);
        assert!(!SearchControl::new(&inside, 30, 1024).budget_exhausted());
        let at_limit = FixedClock::new(100, 3000);
        assert!(SearchControl::new(&at_limit, 30, 1024).budget_exhausted());
    }

    #[test]
    fn polls_only_on_interval() {
        let clock = FixedClock::expired();
        let mut control = SearchControl::new(&clock, 30, 4);
        assert!(!control.should_stop(1));
        assert!(!control.should_stop(3));
        assert!(control.should_stop(4));
        assert!(control.should_stop(5));
    }

    #[test]
    fn unlimited_clock_never_stops() {
        let clock = FixedClock::unlimited();
        let mut control = SearchControl::new(&clock, 30, 1);
        assert!((1..10_000).all(|n| !control.should_stop(n)));
    }

    #[test]
    fn draining_clock_eventually_stops() {
        let clock = ShrinkingClock::new(3000, 10);
        let mut control = SearchControl::new(&clock, 30, 1);
        let first_stop = (1..1000).find(|&n| control.should_stop(n));
        assert_eq!(first_stop, Some(10));
    }
}
