//! The feasibility loop: repair out-of-bounds base variables by pivoting.

use fixplex_math::{Numeral, RowEntry, VarId};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::config::PivotStrategy;
use crate::error::Result;
use crate::resource::LimitStatus;
use crate::tableau::Fixplex;

/// Outcome of a feasibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    /// Every variable lies within its bounds.
    Satisfiable,
    /// The row of the given base variable admits no in-bounds solution.
    Infeasible(VarId),
    /// The check gave up: iteration or resource limit, or no admissible pivot.
    Unknown,
}

impl Feasibility {
    /// Check if the outcome is [`Feasibility::Satisfiable`].
    pub fn is_sat(&self) -> bool {
        matches!(self, Self::Satisfiable)
    }

    /// Check if the outcome is [`Feasibility::Infeasible`].
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Self::Infeasible(_))
    }
}

/// Outcome of repairing a single variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Repair {
    Repaired,
    Infeasible,
    NoPivot,
}

impl<N: Numeral> Fixplex<N> {
    /// Search for an assignment satisfying every row and every bound.
    ///
    /// On [`Feasibility::Satisfiable`] the current values form a model. On
    /// [`Feasibility::Infeasible`] the witness row is available through
    /// [`infeasible_row_terms`](Self::infeasible_row_terms). Errors are only
    /// returned for broken internal invariants.
    pub fn make_feasible(&mut self) -> Result<Feasibility> {
        self.stats.checks += 1;
        self.left_basis.clear();
        self.infeasible_var = None;
        self.bland = false;
        self.resources.start();
        if self.config.check_invariants {
            self.check_well_formed()?;
        }
        self.fix_non_base_values()?;

        let mut iterations = 0usize;
        let mut num_repeated = 0usize;
        let result = loop {
            let Some(var) = self.select_var_to_fix() else {
                break Feasibility::Satisfiable;
            };
            let status = self.resources.check_limits();
            if status != LimitStatus::Ok || iterations > self.config.max_iterations {
                debug!(?status, iterations, "feasibility check gave up");
                self.add_patch(var);
                break Feasibility::Unknown;
            }
            self.check_blands_rule(var, &mut num_repeated);

            match self.make_var_feasible(var)? {
                Repair::Repaired => {
                    iterations += 1;
                    self.stats.iterations += 1;
                }
                Repair::Infeasible => {
                    self.add_patch(var);
                    self.infeasible_var = Some(var);
                    self.stats.infeasible += 1;
                    break Feasibility::Infeasible(var);
                }
                Repair::NoPivot => {
                    self.add_patch(var);
                    break Feasibility::Unknown;
                }
            }
        };

        debug!(?result, iterations, pivots = self.stats.pivots, "feasibility check");
        if self.config.check_invariants {
            self.check_well_formed()?;
        }
        Ok(result)
    }

    /// Move non-base variables that are outside their bounds onto the
    /// nearer bound. Only reachable through direct value assignments.
    fn fix_non_base_values(&mut self) -> Result<()> {
        let stray: SmallVec<[VarId; 8]> = (0..self.vars.len())
            .filter(|&v| !self.is_base(v) && !self.in_bounds(v))
            .collect();
        for var in stray {
            let info = &self.vars[var];
            let delta = info.bounds.repair_target(info.value) - info.value;
            self.update_value(var, delta)?;
        }
        Ok(())
    }

    /// Pop the next variable to repair according to the active strategy.
    pub(crate) fn select_var_to_fix(&mut self) -> Option<VarId> {
        let strategy = if self.bland {
            PivotStrategy::Smallest
        } else {
            self.config.pivot_strategy
        };
        match strategy {
            PivotStrategy::Smallest => self.to_patch.pop_min(),
            PivotStrategy::GreatestError => self.select_error_var(false),
            PivotStrategy::LeastError => self.select_error_var(true),
        }
    }

    /// Pop the queued variable with the largest (or, if `least`, smallest)
    /// distance to its bounds. Ties go to the lowest id.
    fn select_error_var(&mut self, least: bool) -> Option<VarId> {
        let mut best: Option<(VarId, N)> = None;
        for var in self.to_patch.iter() {
            let info = &self.vars[var];
            let distance = info.bounds.distance(info.value);
            let better = match best {
                None => true,
                Some((_, d)) if least => distance < d,
                Some((_, d)) => distance > d,
            };
            if better {
                best = Some((var, distance));
            }
        }
        let (var, _) = best?;
        self.to_patch.remove(var);
        Some(var)
    }

    /// Switch to Bland's rule once variables keep re-entering the repair
    /// loop.
    pub(crate) fn check_blands_rule(&mut self, var: VarId, num_repeated: &mut usize) {
        if self.bland {
            return;
        }
        if !self.left_basis.insert(var) {
            *num_repeated += 1;
            if *num_repeated > self.config.blands_rule_threshold {
                debug!(num_repeated, "switching to Bland's rule");
                self.bland = true;
                self.stats.bland_switches += 1;
            }
        }
    }

    /// Bring base variable `x` within its bounds by pivoting it out of its
    /// row.
    pub(crate) fn make_var_feasible(&mut self, x: VarId) -> Result<Repair> {
        if self.in_bounds(x) || !self.is_base(x) {
            return Ok(Repair::Repaired);
        }
        let info = &self.vars[x];
        let new_value = info.bounds.repair_target(info.value);
        let Some((y, b)) = self.select_pivot(x, new_value) else {
            if self.is_infeasible_row(x) {
                return Ok(Repair::Infeasible);
            }
            return Ok(Repair::NoPivot);
        };
        // A pivot that pushes y out of bounds cannot help a provably
        // infeasible row; stop before cycling on it.
        if !self.pivot_lands_in_bounds(x, y, b, new_value) && self.is_infeasible_row(x) {
            return Ok(Repair::Infeasible);
        }
        trace!(x, y, %new_value, "repairing");
        self.pivot(x, y, b, new_value)?;
        Ok(Repair::Repaired)
    }

    fn pivot_lands_in_bounds(&self, x: VarId, y: VarId, b: N, new_value: N) -> bool {
        self.vars[x]
            .base_row
            .and_then(|rx| self.pivot_value(rx, y, b, new_value))
            .is_some_and(|value| self.vars[y].bounds.contains(value))
    }

    /// Base variable of the row found infeasible by the last check.
    pub fn infeasible_var(&self) -> Option<VarId> {
        self.infeasible_var
    }

    /// Terms of the row found infeasible by the last check. Together with the
    /// bounds of its variables they explain the conflict.
    pub fn infeasible_row_terms(&self) -> Option<&[RowEntry<N>]> {
        let row = self.vars[self.infeasible_var?].base_row?;
        Some(self.matrix.row_entries(row))
    }
}
