//! Pivot selection, pivoting, and the row-level infeasibility test.
//!
//! A candidate `y` in the row of an out-of-bounds base variable `x` can take
//! over as base only if its coefficient `b` has no more trailing zeros than
//! the base coefficient of the row *and* than any coefficient of `y`'s
//! column. The first condition keeps the new base coefficient minimal in its
//! row; the second makes every elimination step of the pivot exact.
//!
//! Among admissible candidates the selector prefers one whose new value stays
//! within its bounds. In-bounds candidates are ranked by the number of
//! bounded variables they touch, out-of-bounds ones by their distance to the
//! bounds; a shorter column decides next. Remaining ties are broken uniformly
//! at random. Under Bland's rule the lowest-indexed admissible candidate wins.

use std::cmp::Ordering;

use fixplex_math::{Numeral, RowEntry, RowId, VarId};
use rand::Rng;
use smallvec::SmallVec;
use tracing::trace;

use crate::error::{FixplexError, Result};
use crate::tableau::Fixplex;

/// Pivot candidate under evaluation.
#[derive(Debug, Clone, Copy)]
struct Candidate<N> {
    var: VarId,
    coeff: N,
    /// The hypothetical new value lies within the candidate's bounds.
    in_bounds: bool,
    /// Distance of the hypothetical new value to the bounds.
    residual: N,
    /// Bounded variables affected by pivoting on the candidate.
    num_deps: usize,
    col_size: usize,
}

impl<N: Numeral> Candidate<N> {
    /// `Less` means `self` is the better pivot.
    fn compare(&self, other: &Self) -> Ordering {
        match (self.in_bounds, other.in_bounds) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (true, true) => self
                .num_deps
                .cmp(&other.num_deps)
                .then(self.col_size.cmp(&other.col_size)),
            (false, false) => self
                .residual
                .cmp(&other.residual)
                .then(self.col_size.cmp(&other.col_size)),
        }
    }
}

impl<N: Numeral> Fixplex<N> {
    /// Choose a non-base variable of `x`'s row to pivot with, such that `x`
    /// can be assigned `new_value`. Returns the variable and its coefficient.
    pub(crate) fn select_pivot(&mut self, x: VarId, new_value: N) -> Option<(VarId, N)> {
        let rx = self.vars[x].base_row?;
        if self.bland {
            return self.select_pivot_blands(x, rx, new_value);
        }

        let base_coeff = self.rows[rx.id()].base_coeff;
        let entries: SmallVec<[RowEntry<N>; 16]> =
            SmallVec::from_slice(self.matrix.row_entries(rx));
        let mut best: Option<Candidate<N>> = None;
        let mut ties: u32 = 0;

        for entry in entries {
            let y = entry.var;
            let b = entry.coeff;
            if y == x || !self.has_minimal_trailing_zeros(y, b, base_coeff) {
                continue;
            }
            let Some(new_y) = self.pivot_value(rx, y, b, new_value) else {
                continue;
            };
            let bounds = self.vars[y].bounds;
            let in_bounds = bounds.contains(new_y);
            let cap = match best {
                Some(c) if c.in_bounds => c.num_deps,
                _ => usize::MAX,
            };
            let candidate = Candidate {
                var: y,
                coeff: b,
                in_bounds,
                residual: bounds.distance(new_y),
                num_deps: if in_bounds {
                    self.num_non_free_dep_vars(y, cap)
                } else {
                    0
                },
                col_size: self.matrix.column_size(y),
            };

            match best.map(|c| candidate.compare(&c)) {
                None | Some(Ordering::Less) => {
                    best = Some(candidate);
                    ties = 1;
                }
                Some(Ordering::Equal) => {
                    ties += 1;
                    if self.rng.random_range(0..ties) == 0 {
                        best = Some(candidate);
                    }
                }
                Some(Ordering::Greater) => {}
            }
        }

        best.map(|c| (c.var, c.coeff))
    }

    /// Lowest-indexed admissible candidate.
    fn select_pivot_blands(&self, x: VarId, rx: RowId, new_value: N) -> Option<(VarId, N)> {
        let base_coeff = self.rows[rx.id()].base_coeff;
        self.matrix
            .row_entries(rx)
            .iter()
            .filter(|e| e.var != x)
            .find(|e| {
                self.has_minimal_trailing_zeros(e.var, e.coeff, base_coeff)
                    && self.pivot_value(rx, e.var, e.coeff, new_value).is_some()
            })
            .map(|e| (e.var, e.coeff))
    }

    /// Divisibility gate: `b` has no more trailing zeros than the base
    /// coefficient of its row nor than any coefficient in `y`'s column.
    pub(crate) fn has_minimal_trailing_zeros(&self, y: VarId, b: N, base_coeff: N) -> bool {
        let tz = b.trailing_zeros();
        if tz > base_coeff.trailing_zeros() {
            return false;
        }
        if tz == 0 {
            return true;
        }
        self.matrix
            .col_entries(y)
            .all(|e| e.coeff.trailing_zeros() >= tz)
    }

    /// Number of bounded variables whose value moves when `y` changes: `y`
    /// itself plus the bounded bases of rows containing `y`. Counting stops
    /// once the result exceeds `cap`.
    pub(crate) fn num_non_free_dep_vars(&self, y: VarId, cap: usize) -> usize {
        let mut result = usize::from(!self.vars[y].bounds.is_free());
        for entry in self.matrix.col_entries(y) {
            let base = self.rows[entry.row.id()].base;
            result += usize::from(!self.vars[base].bounds.is_free());
            if result > cap {
                break;
            }
        }
        result
    }

    /// Value `y` would take if it became base of `rx` while the current base
    /// is assigned `new_value`.
    ///
    /// With `a` the base coefficient and `R` the row value, the row with `y`
    /// removed and `x := new_value` must satisfy `b·y' + (R - b·y + a·new_value) = 0`.
    pub(crate) fn pivot_value(&self, rx: RowId, y: VarId, b: N, new_value: N) -> Option<N> {
        let info = &self.rows[rx.id()];
        let rest = info.value - b * self.vars[y].value + info.base_coeff * new_value;
        (-rest).div_exact(b)
    }

    /// Exchange base variable `x` with `y` (coefficient `b` in `x`'s row)
    /// and assign `x := new_value`.
    pub(crate) fn pivot(&mut self, x: VarId, y: VarId, b: N, new_value: N) -> Result<()> {
        let Some(rx) = self.vars[x].base_row else {
            return Err(FixplexError::InvariantViolation(format!(
                "pivot on non-basic v{x}"
            )));
        };
        if let Some(row) = self.vars[y].base_row {
            return Err(FixplexError::BaseVariable { var: y, row });
        }
        self.stats.pivots += 1;
        trace!(x, y, %b, %new_value, row = %rx, "pivot");

        let old_y = self.vars[y].value;
        let info = &mut self.rows[rx.id()];
        let a = info.base_coeff;
        info.value = info.value - b * old_y + a * new_value;
        info.base = y;
        info.base_coeff = b;

        self.vars[x].base_row = None;
        self.vars[x].value = new_value;
        self.to_patch.remove(x);
        self.vars[y].base_row = Some(rx);
        self.vars[y].value = self.solve_base(rx)?;
        self.add_patch(y);

        self.eliminate_column(y, rx, old_y)
    }

    /// Check whether the row of base variable `x` has no solution within the
    /// bounds of its variables.
    ///
    /// Writing every term as `c·(lo + k)` with `0 <= k < size`, the row sum
    /// ranges over `L + [neg, pos]` where `L = Σ c·lo` and `neg`/`pos`
    /// collect the negative/positive signed products `c·(size - 1)`. If that
    /// range excludes zero without wrapping, the row is infeasible. Free
    /// variables, signed overflow and wrapped sums make the test inconclusive.
    pub(crate) fn is_infeasible_row(&self, x: VarId) -> bool {
        let Some(rx) = self.vars[x].base_row else {
            return false;
        };
        let mut lo_sum = N::zero();
        let mut pos = N::zero();
        let mut neg = N::zero();
        let half = N::one() + N::max_value().shift_right(1);

        for entry in self.matrix.row_entries(rx) {
            let bounds = self.vars[entry.var].bounds;
            if bounds.is_free() {
                return false;
            }
            lo_sum += entry.coeff * bounds.lo;
            let span = bounds.size() - N::one();
            if span >= half {
                return false;
            }
            let Some(term) = entry.coeff.signed_mul(span) else {
                return false;
            };
            let acc = if term.to_signed() < 0 { &mut neg } else { &mut pos };
            let Some(sum) = acc.signed_add(term) else {
                return false;
            };
            *acc = sum;
        }

        let neg_abs = -neg;
        let hi_sum = lo_sum + pos;
        !lo_sum.is_zero() && lo_sum > neg_abs && lo_sum <= hi_sum
    }
}
