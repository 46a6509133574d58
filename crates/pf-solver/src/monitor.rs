//! Convergence bookkeeping for one hydraulic instant.

use tracing::debug;

use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult};

/// Counts trials and decides convergence.
///
/// An instant converges once the relative flow change falls below the
/// accuracy and no valve changed status on that trial.
#[derive(Debug, Clone)]
pub struct ConvergenceMonitor {
    config: SolverConfig,
    time_s: u64,
    iterations: usize,
    relative_change: f64,
}

impl ConvergenceMonitor {
    pub fn new(config: SolverConfig, time_s: u64) -> Self {
        Self {
            config,
            time_s,
            iterations: 0,
            relative_change: f64::INFINITY,
        }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn relative_change(&self) -> f64 {
        self.relative_change
    }

    /// True once enough trials ran for status checks to begin.
    pub fn should_check_status(&self) -> bool {
        self.iterations >= self.config.status_check_delay
    }

    /// Record one trial.
    ///
    /// `flow_change` and `flow_total` are sums of absolute flow change and
    /// absolute flow over all links. Returns `Ok(true)` when converged and an
    /// error once the iteration limit is exhausted.
    pub fn record(
        &mut self,
        flow_change: f64,
        flow_total: f64,
        status_changes: usize,
    ) -> SolverResult<bool> {
        self.iterations += 1;
        if !flow_change.is_finite() || !flow_total.is_finite() {
            return Err(SolverError::Numeric {
                what: format!("non-finite flow at t = {} s", self.time_s),
            });
        }

        self.relative_change = if flow_total > self.config.flow_tolerance {
            flow_change / flow_total
        } else {
            flow_change
        };

        if self.relative_change <= self.config.accuracy && status_changes == 0 {
            debug!(
                t = self.time_s,
                iterations = self.iterations,
                relative_change = self.relative_change,
                "hydraulics converged"
            );
            return Ok(true);
        }

        if self.iterations >= self.config.max_iterations {
            return Err(SolverError::ConvergenceFailed {
                time_s: self.time_s,
                iterations: self.iterations,
                what: format!("relative flow change {:.3e}", self.relative_change),
            });
        }
        Ok(false)
    }
}
