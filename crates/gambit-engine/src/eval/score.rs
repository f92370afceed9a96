//! Middlegame/endgame score pair used by the tapered evaluation.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::eval::phase::MAX_PHASE;

/// A middlegame and an endgame value, accumulated side by side and blended
/// by game phase at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Score {
    pub mg: i32,
    pub eg: i32,
}

impl Score {
    pub const ZERO: Score = Score { mg: 0, eg: 0 };

    /// Blend by `phase` (0 = pure endgame, [`MAX_PHASE`] = pure middlegame).
    ///
    /// Integer division truncates toward zero.
    #[inline]
    pub fn taper(self, phase: i32) -> i32 {
        let phase = phase.clamp(0, MAX_PHASE);
        (self.mg * phase + self.eg * (MAX_PHASE - phase)) / MAX_PHASE
    }
}

/// Shorthand constructor: `S(mg, eg)`.
#[allow(non_snake_case)]
#[inline]
pub const fn S(mg: i32, eg: i32) -> Score {
    Score { mg, eg }
}

impl Add for Score {
    type Output = Score;

    #[inline]
    fn add(self, rhs: Score) -> Score {
        S(self.mg + rhs.mg, self.eg + rhs.eg)
    }
}

impl AddAssign for Score {
    #[inline]
    fn add_assign(&mut self, rhs: Score) {
        *self = *self + rhs;
    }
}

impl Sub for Score {
    type Output = Score;

    #[inline]
    fn sub(self, rhs: Score) -> Score {
        S(self.mg - rhs.mg, self.eg - rhs.eg)
    }
}

impl SubAssign for Score {
    #[inline]
    fn sub_assign(&mut self, rhs: Score) {
        *self = *self - rhs;
    }
}

impl Neg for Score {
    type Output = Score;

    #[inline]
    fn neg(self) -> Score {
        S(-self.mg, -self.eg)
    }
}

#[cfg(test)]
mod tests {
    use super::{S, Score};

    #[test]
    fn taper_endpoints() {
        let s = S(120, -40);
        assert_eq!(s.taper(24), 120);
        assert_eq!(s.taper(0), -40);
        assert_eq!(s.taper(12), 40);
    }

    #[test]
    fn taper_truncates_toward_zero() {
        // (-7 * 1 + 0 * 23) / 24 = -0.29 -> 0
        assert_eq!(S(-7, 0).taper(1), 0);
        // (25 * 1) / 24 = 1.04 -> 1
        assert_eq!(S(25, 0).taper(1), 1);
    }

    #[test]
    fn arithmetic() {
        let mut s = Score::ZERO;
        s += S(10, 20);
        s -= S(3, 30);
        assert_eq!(s, S(7, -10));
        assert_eq!(-s, S(-7, 10));
    }
}
