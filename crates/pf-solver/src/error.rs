//! Error types for solver operations.

use pf_core::PfError;
use pf_network::NetworkError;
use pf_valves::ValveError;
use thiserror::Error;

/// Errors that can occur while solving one hydraulic instant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Convergence failed at t = {time_s} s after {iterations} iterations: {what}")]
    ConvergenceFailed {
        time_s: u64,
        iterations: usize,
        what: String,
    },

    #[error("Numeric error: {what}")]
    Numeric { what: String },

    #[error("Valve error: {0}")]
    Valve(#[from] ValveError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for PfError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::ProblemSetup { .. } => PfError::InvalidArg {
                what: "problem setup",
            },
            SolverError::ConvergenceFailed { .. } => PfError::InvalidArg {
                what: "convergence",
            },
            SolverError::Numeric { .. } => PfError::InvalidArg { what: "numeric" },
            SolverError::Valve(e) => e.into(),
            SolverError::Network(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convergence_message_names_time() {
        let e = SolverError::ConvergenceFailed {
            time_s: 3600,
            iterations: 40,
            what: "flow change 0.3".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("3600"));
        assert!(msg.contains("40"));
    }
}
