//! Cyclic (wrap-around) intervals over fixed-width numerals.
//!
//! An interval is given by a pair `lo, hi`:
//!
//! - `lo == hi`: unconstrained, every value is a member;
//! - `lo < hi`: the half-open interval `[lo, hi)`;
//! - `lo > hi`: the wrapped interval `[lo, MAX] ∪ [0, hi)`.

use std::fmt;

use crate::numeral::Numeral;

/// A half-open interval on the `2^w` ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModInterval<N> {
    /// Inclusive lower end.
    pub lo: N,
    /// Exclusive upper end.
    pub hi: N,
}

impl<N: Numeral> ModInterval<N> {
    /// Create an interval from its ends.
    pub fn new(lo: N, hi: N) -> Self {
        Self { lo, hi }
    }

    /// The unconstrained interval.
    pub fn free() -> Self {
        Self::new(N::zero(), N::zero())
    }

    /// Check if the interval places no constraint on its members.
    pub fn is_free(&self) -> bool {
        self.lo == self.hi
    }

    /// Check if the interval wraps past `MAX`.
    pub fn is_wrapped(&self) -> bool {
        self.lo > self.hi
    }

    /// Membership test.
    pub fn contains(&self, val: N) -> bool {
        contains(val, self.lo, self.hi)
    }

    /// Number of members modulo `2^w`; zero for the free interval.
    pub fn size(&self) -> N {
        self.hi - self.lo
    }

    /// Value a non-member should move to: `lo` if it is cyclically closer
    /// going up, otherwise the last member `hi - 1`.
    pub fn repair_target(&self, val: N) -> N {
        if self.lo - val < val - self.hi {
            self.lo
        } else {
            self.hi - N::one()
        }
    }

    /// Cyclic distance from `val` to the nearest member; zero for members.
    pub fn distance(&self, val: N) -> N {
        if self.contains(val) {
            return N::zero();
        }
        let up = self.lo - val;
        let down = val - (self.hi - N::one());
        up.min(down)
    }
}

/// Membership of `val` in the cyclic interval `[lo, hi)`.
pub fn contains<N: Numeral>(val: N, lo: N, hi: N) -> bool {
    if lo == hi {
        return true;
    }
    if lo < hi {
        return lo <= val && val < hi;
    }
    val < hi || lo <= val
}

impl<N: Numeral> fmt::Display for ModInterval<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_free() {
            write!(f, "*")
        } else {
            write!(f, "[{}, {})", self.lo, self.hi)
        }
    }
}
