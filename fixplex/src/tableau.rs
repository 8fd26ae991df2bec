//! Tableau state: variable and row registries, value propagation and row
//! insertion.
//!
//! The tableau keeps every row in *solved form*: each row has one base
//! variable `x` with coefficient `a`, the cached `value` of the row is the sum
//! of its non-base terms at the current assignment, and
//!
//! ```text
//! a * value(x) + value(row) == 0   (mod 2^w)
//! ```
//!
//! Base variables occur only in their own row, and the base coefficient has
//! the fewest trailing zeros of its row. The latter makes `-value(row) / a`
//! an exact modular division at every reachable state.

use std::collections::BTreeMap;
use std::fmt;

use fixplex_math::{ColEntry, ModInterval, Numeral, RowEntry, RowId, SparseMatrix, VarId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

use crate::config::FixplexConfig;
use crate::error::{FixplexError, Result};
use crate::patch_queue::PatchQueue;
use crate::resource::{CancelHandle, ResourceLimits, ResourceManager};
use crate::stats::FixplexStats;

/// Per-variable state.
#[derive(Debug, Clone)]
pub(crate) struct VarInfo<N> {
    pub(crate) value: N,
    pub(crate) bounds: ModInterval<N>,
    /// Row in which the variable is basic.
    pub(crate) base_row: Option<RowId>,
}

impl<N: Numeral> VarInfo<N> {
    fn new() -> Self {
        Self {
            value: N::zero(),
            bounds: ModInterval::free(),
            base_row: None,
        }
    }
}

/// Per-row state; the terms live in the sparse matrix.
#[derive(Debug, Clone)]
pub(crate) struct RowInfo<N> {
    pub(crate) base: VarId,
    pub(crate) base_coeff: N,
    /// Sum of the non-base terms at the current assignment.
    pub(crate) value: N,
}

/// Fixed-width simplex tableau.
pub struct Fixplex<N: Numeral> {
    pub(crate) matrix: SparseMatrix<N>,
    pub(crate) vars: Vec<VarInfo<N>>,
    pub(crate) rows: Vec<RowInfo<N>>,
    pub(crate) to_patch: PatchQueue,
    /// Variables selected for repair during the current check.
    pub(crate) left_basis: FxHashSet<VarId>,
    pub(crate) bland: bool,
    pub(crate) infeasible_var: Option<VarId>,
    pub(crate) rng: StdRng,
    pub(crate) resources: ResourceManager,
    pub(crate) config: FixplexConfig,
    pub(crate) stats: FixplexStats,
}

impl<N: Numeral> Default for Fixplex<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Numeral> Fixplex<N> {
    /// Create an empty tableau with the default configuration.
    pub fn new() -> Self {
        Self::with_config(FixplexConfig::default())
    }

    /// Create an empty tableau.
    pub fn with_config(config: FixplexConfig) -> Self {
        Self {
            matrix: SparseMatrix::new(),
            vars: Vec::new(),
            rows: Vec::new(),
            to_patch: PatchQueue::new(),
            left_basis: FxHashSet::default(),
            bland: false,
            infeasible_var: None,
            rng: StdRng::seed_from_u64(config.random_seed),
            resources: ResourceManager::new(config.limits.clone()),
            config,
            stats: FixplexStats::default(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &FixplexConfig {
        &self.config
    }

    /// Statistics since creation or the last reset.
    pub fn stats(&self) -> &FixplexStats {
        &self.stats
    }

    /// Clear all variables, rows and statistics, and re-seed the random
    /// source from the configuration.
    pub fn reset(&mut self) {
        self.matrix.reset();
        self.vars.clear();
        self.rows.clear();
        self.to_patch.reset();
        self.left_basis.clear();
        self.bland = false;
        self.infeasible_var = None;
        self.rng = StdRng::seed_from_u64(self.config.random_seed);
        self.stats.reset();
    }

    /// Re-seed the tie-breaking random source.
    pub fn set_seed(&mut self, seed: u64) {
        self.config.random_seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Replace the resource limits used by subsequent checks.
    pub fn set_limits(&mut self, limits: ResourceLimits) {
        self.config.limits = limits.clone();
        self.resources.set_limits(limits);
    }

    /// Handle for cancelling a running check from another thread.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.resources.cancel_handle()
    }

    /// Make sure variables `0..=var` exist.
    pub fn ensure_var(&mut self, var: VarId) {
        if var >= self.vars.len() {
            self.matrix.ensure_var(var);
            self.vars.resize_with(var + 1, VarInfo::new);
        }
        if self.to_patch.bound() <= var {
            self.to_patch.set_bound(2 * var + 1);
        }
    }

    /// Number of variables.
    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Current value of a variable.
    pub fn value(&self, var: VarId) -> N {
        self.vars[var].value
    }

    /// Lower bound of a variable.
    pub fn lo(&self, var: VarId) -> N {
        self.vars[var].bounds.lo
    }

    /// Upper bound (exclusive) of a variable.
    pub fn hi(&self, var: VarId) -> N {
        self.vars[var].bounds.hi
    }

    /// Bounds of a variable.
    pub fn bounds(&self, var: VarId) -> ModInterval<N> {
        self.vars[var].bounds
    }

    /// Check if a variable is basic.
    pub fn is_base(&self, var: VarId) -> bool {
        self.vars[var].base_row.is_some()
    }

    /// Row in which a variable is basic.
    pub fn base_row(&self, var: VarId) -> Option<RowId> {
        self.vars[var].base_row
    }

    /// Base variable of a row.
    pub fn row_base(&self, row: RowId) -> VarId {
        self.rows[row.id()].base
    }

    /// Base coefficient of a row.
    pub fn row_base_coeff(&self, row: RowId) -> N {
        self.rows[row.id()].base_coeff
    }

    /// Cached sum of the non-base terms of a row.
    pub fn row_value(&self, row: RowId) -> N {
        self.rows[row.id()].value
    }

    /// Terms of a row, sorted by variable.
    pub fn row_terms(&self, row: RowId) -> &[RowEntry<N>] {
        self.matrix.row_entries(row)
    }

    /// Check if a variable's value lies within its bounds.
    pub fn in_bounds(&self, var: VarId) -> bool {
        let info = &self.vars[var];
        info.bounds.contains(info.value)
    }

    /// Bound a variable to the cyclic interval `[lo, hi)`.
    ///
    /// A non-base variable outside the new bounds is moved to the nearer
    /// end of the interval (see [`ModInterval::repair_target`]); a base
    /// variable outside them is queued for repair.
    pub fn set_bounds(&mut self, var: VarId, lo: N, hi: N) -> Result<()> {
        self.ensure_var(var);
        let bounds = ModInterval::new(lo, hi);
        self.vars[var].bounds = bounds;
        if self.in_bounds(var) {
            return Ok(());
        }
        if self.is_base(var) {
            self.add_patch(var);
            Ok(())
        } else {
            let value = self.vars[var].value;
            self.update_value(var, bounds.repair_target(value) - value)
        }
    }

    /// Assign a non-base variable.
    pub fn set_value(&mut self, var: VarId, value: N) -> Result<()> {
        self.ensure_var(var);
        let delta = value - self.vars[var].value;
        self.update_value(var, delta)
    }

    /// Increment a non-base variable by `delta` and propagate the change to
    /// every row that contains it.
    pub fn update_value(&mut self, var: VarId, delta: N) -> Result<()> {
        self.ensure_var(var);
        if let Some(row) = self.vars[var].base_row {
            return Err(FixplexError::BaseVariable { var, row });
        }
        if delta.is_zero() {
            return Ok(());
        }
        self.vars[var].value += delta;

        // s*a + R = 0 where R contains c*var:
        // R += delta*c, s = -R / a
        let column: SmallVec<[ColEntry<N>; 8]> = self.matrix.col_entries(var).collect();
        for ColEntry { row, coeff } in column {
            let info = &mut self.rows[row.id()];
            info.value += delta * coeff;
            let base = info.base;
            self.vars[base].value = self.solve_base(row)?;
            self.add_patch(base);
        }
        Ok(())
    }

    /// Add the equation `Σ coeff·var = 0` with `base` as its base variable.
    ///
    /// Terms on variables that are basic in other rows are substituted by
    /// their definitions first, and `base` is then eliminated from every
    /// other row, so the tableau stays in solved form. A rejected row leaves
    /// the tableau unchanged.
    pub fn add_row(&mut self, base: VarId, terms: &[(VarId, N)]) -> Result<RowId> {
        self.ensure_var(base);
        for &(var, _) in terms {
            self.ensure_var(var);
        }
        if let Some(row) = self.vars[base].base_row {
            return Err(FixplexError::AlreadyBase { var: base, row });
        }

        let mut scratch: BTreeMap<VarId, N> = BTreeMap::new();
        for &(var, coeff) in terms {
            *scratch.entry(var).or_insert_with(N::zero) += coeff;
        }
        scratch.retain(|_, coeff| !coeff.is_zero());
        if !scratch.contains_key(&base) {
            return Err(FixplexError::ZeroBaseCoefficient { var: base });
        }

        let reductions = self.reduce_row(base, &mut scratch)?;

        let Some(&base_coeff) = scratch.get(&base) else {
            return Err(FixplexError::ZeroBaseCoefficient { var: base });
        };
        let tz = base_coeff.trailing_zeros();
        if scratch.values().any(|c| c.trailing_zeros() < tz)
            || self
                .matrix
                .col_entries(base)
                .any(|e| e.coeff.trailing_zeros() < tz)
        {
            return Err(FixplexError::NonMinimalBaseCoefficient { var: base });
        }

        let row = self.matrix.mk_row();
        let mut value = N::zero();
        for (&var, &coeff) in &scratch {
            self.matrix.add_var(row, coeff, var);
            if var != base {
                value += coeff * self.vars[var].value;
            }
        }
        debug_assert_eq!(row.id(), self.rows.len());
        self.rows.push(RowInfo {
            base,
            base_coeff,
            value,
        });

        let old_value = self.vars[base].value;
        self.vars[base].base_row = Some(row);
        self.vars[base].value = self.solve_base(row)?;
        self.stats.rows_added += 1;
        self.stats.reductions += reductions;
        self.add_patch(base);
        trace!(%row, base, reductions, "added row");

        self.eliminate_column(base, row, old_value)?;
        Ok(row)
    }

    /// Substitute every basic variable (other than `base`) out of `scratch`,
    /// lowest variable first. Returns the number of substitutions.
    fn reduce_row(&self, base: VarId, scratch: &mut BTreeMap<VarId, N>) -> Result<u64> {
        let mut reductions = 0;
        loop {
            let dependency = scratch
                .keys()
                .filter(|&&var| var != base)
                .find_map(|&var| self.vars[var].base_row.map(|row| (var, row)));
            let Some((dep, dep_row)) = dependency else {
                return Ok(reductions);
            };

            // (d >> td)·scratch - (e >> td)·dep_row cancels dep; the first
            // factor is odd, so the equation is unchanged.
            let d = self.rows[dep_row.id()].base_coeff;
            let e = scratch[&dep];
            let td = d.trailing_zeros();
            if e.trailing_zeros() < td {
                return Err(FixplexError::NonExactReduction { var: dep });
            }
            let scale = d.shift_right(td);
            let factor = e.shift_right(td);
            for coeff in scratch.values_mut() {
                *coeff *= scale;
            }
            for entry in self.matrix.row_entries(dep_row) {
                *scratch.entry(entry.var).or_insert_with(N::zero) -= factor * entry.coeff;
            }
            scratch.retain(|_, coeff| !coeff.is_zero());
            debug_assert!(!scratch.contains_key(&dep));
            reductions += 1;
        }
    }

    /// Value of the base variable of `row` implied by its balance equation.
    pub(crate) fn solve_base(&self, row: RowId) -> Result<N> {
        let info = &self.rows[row.id()];
        (-info.value)
            .div_exact(info.base_coeff)
            .ok_or(FixplexError::NonExactDivision { row })
    }

    /// Rewrite every row other than `rx` that contains `y`, the new base
    /// variable of `rx`, so that `y` disappears from it.
    ///
    /// For a row `rz` with coefficient `c` of `y` and `b` the base coefficient
    /// of `rx` (`t1 = tz(b) <= tz(c)`):
    ///
    /// ```text
    /// rz         := (b >> t1)·rz - (c >> t1)·rx
    /// value(rz)  := (b >> t1)·(value(rz) - c·old_y) - (c >> t1)·value(rx)
    /// base_coeff := (b >> t1)·base_coeff
    /// ```
    pub(crate) fn eliminate_column(&mut self, y: VarId, rx: RowId, old_y: N) -> Result<()> {
        let b = self.rows[rx.id()].base_coeff;
        let rx_value = self.rows[rx.id()].value;
        let t1 = b.trailing_zeros();
        let b1 = b.shift_right(t1);

        let column: SmallVec<[ColEntry<N>; 8]> = self
            .matrix
            .col_entries(y)
            .filter(|entry| entry.row != rx)
            .collect();
        for ColEntry { row: rz, coeff: c } in column {
            if c.trailing_zeros() < t1 {
                return Err(FixplexError::InvariantViolation(format!(
                    "coefficient {c} of v{y} in {rz} has fewer trailing zeros than {b}"
                )));
            }
            let c1 = c.shift_right(t1);
            self.matrix.mul(rz, b1);
            self.matrix.add(rz, -c1, rx);
            debug_assert!(self.matrix.coeff(rz, y).is_none());

            let info = &mut self.rows[rz.id()];
            info.value = b1 * (info.value - c * old_y) - c1 * rx_value;
            info.base_coeff *= b1;
            let z = info.base;
            self.vars[z].value = self.solve_base(rz)?;
            self.add_patch(z);
            self.stats.eliminations += 1;
        }
        Ok(())
    }

    pub(crate) fn add_patch(&mut self, var: VarId) {
        debug_assert!(self.is_base(var));
        self.to_patch.insert(var);
    }
}

impl<N: Numeral> fmt::Display for Fixplex<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, info) in self.rows.iter().enumerate() {
            let row = RowId::new(i);
            write!(f, "{row}:")?;
            for (k, entry) in self.matrix.row_entries(row).iter().enumerate() {
                let sep = if k == 0 { " " } else { " + " };
                write!(f, "{sep}{}*v{}", entry.coeff, entry.var)?;
            }
            writeln!(
                f,
                " = 0    base v{} coeff {} value {}",
                info.base, info.base_coeff, info.value
            )?;
        }
        for (var, info) in self.vars.iter().enumerate() {
            write!(f, "v{var} := {} {}", info.value, info.bounds)?;
            if let Some(row) = info.base_row {
                write!(f, " base {row}")?;
            }
            if self.to_patch.contains(var) {
                write!(f, " (to patch)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
