//! Iteration limits and tolerances.

/// Settings shared by solver implementations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Maximum trials per instant
    pub max_iterations: usize,
    /// Convergence on the sum of flow changes over the sum of flows
    pub accuracy: f64,
    /// Absolute flow tolerance (cfs) for near-zero networks
    pub flow_tolerance: f64,
    /// Trials without a status check at the start of an instant
    pub status_check_delay: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            accuracy: 1e-3,
            flow_tolerance: 1e-4,
            status_check_delay: 0,
        }
    }
}
