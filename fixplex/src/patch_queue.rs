//! Set of basic variables suspected to violate their bounds.

use std::collections::BTreeSet;

use fixplex_math::VarId;

/// Duplicate-free queue of variables to repair, ordered by id.
#[derive(Debug, Clone, Default)]
pub struct PatchQueue {
    vars: BTreeSet<VarId>,
    bound: usize,
}

impl PatchQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upper bound (exclusive) on addressable variables.
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Grow the addressable range to `bound`.
    pub fn set_bound(&mut self, bound: usize) {
        self.bound = self.bound.max(bound);
    }

    /// Insert a variable; returns false if it was already queued.
    pub fn insert(&mut self, var: VarId) -> bool {
        debug_assert!(var < self.bound, "v{var} outside the patch queue range");
        self.vars.insert(var)
    }

    /// Remove a variable; returns false if it was not queued.
    pub fn remove(&mut self, var: VarId) -> bool {
        self.vars.remove(&var)
    }

    /// Check membership.
    pub fn contains(&self, var: VarId) -> bool {
        self.vars.contains(&var)
    }

    /// Remove and return the variable with the smallest id.
    pub fn pop_min(&mut self) -> Option<VarId> {
        self.vars.pop_first()
    }

    /// Queued variables in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = VarId> + '_ {
        self.vars.iter().copied()
    }

    /// Number of queued variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Remove every variable and shrink the range to zero.
    pub fn reset(&mut self) {
        self.vars.clear();
        self.bound = 0;
    }
}
