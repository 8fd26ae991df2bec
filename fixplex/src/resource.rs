//! Cooperative resource limits.
//!
//! The feasibility loop polls a [`ResourceManager`] once per iteration. A
//! poll never blocks; it only reports whether the loop may continue.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Limits applied to a single feasibility check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLimits {
    /// Wall-clock budget.
    pub time_limit: Option<Duration>,
    /// Maximum number of polls.
    pub step_limit: Option<u64>,
}

impl ResourceLimits {
    /// No limits.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Set a wall-clock budget.
    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Set a step budget.
    #[must_use]
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }
}

/// Outcome of a limit poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStatus {
    /// Work may continue.
    Ok,
    /// The time budget is exhausted.
    TimeExceeded,
    /// The step budget is exhausted.
    StepLimitExceeded,
    /// Cancellation was requested.
    Cancelled,
}

/// Shared flag for requesting cancellation from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Create a handle in the non-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Clear a pending request.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Tracks resource consumption against [`ResourceLimits`].
#[derive(Debug, Clone)]
pub struct ResourceManager {
    limits: ResourceLimits,
    started: Option<Instant>,
    steps: u64,
    cancel: CancelHandle,
}

impl ResourceManager {
    /// Create a manager for the given limits.
    pub fn new(limits: ResourceLimits) -> Self {
        Self {
            limits,
            started: None,
            steps: 0,
            cancel: CancelHandle::new(),
        }
    }

    /// Restart the clock and the step counter.
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
        self.steps = 0;
    }

    /// Replace the limits.
    pub fn set_limits(&mut self, limits: ResourceLimits) {
        self.limits = limits;
    }

    /// Current limits.
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    /// Number of polls since the last [`start`](Self::start).
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Handle that can cancel work polled by this manager.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Count one step and check every limit.
    pub fn check_limits(&mut self) -> LimitStatus {
        self.steps += 1;
        if self.cancel.is_cancelled() {
            return LimitStatus::Cancelled;
        }
        if let Some(limit) = self.limits.step_limit
            && self.steps > limit
        {
            return LimitStatus::StepLimitExceeded;
        }
        if let (Some(limit), Some(started)) = (self.limits.time_limit, self.started)
            && started.elapsed() > limit
        {
            return LimitStatus::TimeExceeded;
        }
        LimitStatus::Ok
    }
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new(ResourceLimits::default())
    }
}
