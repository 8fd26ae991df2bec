//! Tableau configuration.

use crate::resource::ResourceLimits;

/// Policy for choosing the next variable to repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotStrategy {
    /// Lowest variable id first.
    #[default]
    Smallest,
    /// Variable farthest from its bounds first.
    GreatestError,
    /// Variable closest to its bounds first.
    LeastError,
}

/// Configuration for [`crate::Fixplex`].
#[derive(Debug, Clone)]
pub struct FixplexConfig {
    /// Successful repairs after which a feasibility check gives up.
    pub max_iterations: usize,
    /// Re-selections of already repaired variables tolerated before
    /// switching to Bland's rule.
    pub blands_rule_threshold: usize,
    /// Seed of the tie-breaking random source.
    pub random_seed: u64,
    /// Selection policy outside Bland mode.
    pub pivot_strategy: PivotStrategy,
    /// Run well-formedness checks around each feasibility check.
    pub check_invariants: bool,
    /// Cooperative resource limits.
    pub limits: ResourceLimits,
}

impl Default for FixplexConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100_000,
            blands_rule_threshold: 1000,
            random_seed: 0,
            pivot_strategy: PivotStrategy::Smallest,
            check_invariants: cfg!(debug_assertions),
            limits: ResourceLimits::default(),
        }
    }
}

impl FixplexConfig {
    /// Set the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the Bland's rule threshold.
    #[must_use]
    pub fn with_blands_rule_threshold(mut self, threshold: usize) -> Self {
        self.blands_rule_threshold = threshold;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Set the variable selection policy.
    #[must_use]
    pub fn with_pivot_strategy(mut self, strategy: PivotStrategy) -> Self {
        self.pivot_strategy = strategy;
        self
    }

    /// Enable or disable the self-checks.
    #[must_use]
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }

    /// Set the resource limits.
    #[must_use]
    pub fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }
}
