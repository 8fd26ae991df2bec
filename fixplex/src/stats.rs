//! Tableau statistics.

use std::fmt;

/// Counters owned by a tableau instance and cleared by its reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixplexStats {
    /// Feasibility checks started.
    pub checks: u64,
    /// Pivots executed.
    pub pivots: u64,
    /// Checks that ended with an infeasible row.
    pub infeasible: u64,
    /// Successful variable repairs.
    pub iterations: u64,
    /// Checks that switched to Bland's rule.
    pub bland_switches: u64,
    /// Rows inserted.
    pub rows_added: u64,
    /// Substitutions of basic variables while inserting rows.
    pub reductions: u64,
    /// Rows rewritten to eliminate a new basic variable.
    pub eliminations: u64,
}

impl FixplexStats {
    /// Clear every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for FixplexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "fixplex checks:       {}", self.checks)?;
        writeln!(f, "fixplex pivots:       {}", self.pivots)?;
        writeln!(f, "fixplex infeasible:   {}", self.infeasible)?;
        writeln!(f, "fixplex iterations:   {}", self.iterations)?;
        writeln!(f, "fixplex bland:        {}", self.bland_switches)?;
        writeln!(f, "fixplex rows:         {}", self.rows_added)?;
        writeln!(f, "fixplex reductions:   {}", self.reductions)?;
        write!(f, "fixplex eliminations: {}", self.eliminations)
    }
}
