//! The solver contract.

use pf_network::Network;
use pf_valves::Valve;

use crate::error::SolverResult;

/// Outcome of one converged instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveReport {
    pub time_s: u64,
    pub iterations: usize,
    /// Final relative flow change
    pub relative_change: f64,
    /// Status changes over the whole instant
    pub status_changes: usize,
}

/// A network solver for single hydraulic instants.
///
/// `solve` iterates valve head losses and statuses to convergence and
/// leaves converged heads in `network` and flows on the valves.
/// Non-convergence is an error; callers do not retry.
pub trait HydraulicSolver {
    fn solve(
        &mut self,
        network: &mut Network,
        valves: &mut [Valve],
        time_s: u64,
    ) -> SolverResult<SolveReport>;

    /// Length of the step after `time_s`; zero ends the run.
    fn next_step(&mut self, network: &Network, valves: &[Valve], time_s: u64) -> u64;
}

/// Fixed hydraulic step up to a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepClock {
    pub step_s: u64,
    pub duration_s: u64,
}

impl StepClock {
    pub fn new(step_s: u64, duration_s: u64) -> Self {
        Self { step_s, duration_s }
    }

    /// Step after `time_s`, shortened to land on the duration.
    pub fn next_step(&self, time_s: u64) -> u64 {
        if time_s >= self.duration_s {
            0
        } else {
            self.step_s.min(self.duration_s - time_s)
        }
    }
}
