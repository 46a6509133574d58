//! Error types for simulation runs.

use pf_core::PfError;
use pf_solver::SolverError;
use thiserror::Error;

/// Errors that abort a run.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The hydraulic solve failed; passed through unchanged.
    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("Run exceeded {max_steps} steps")]
    StepLimit { max_steps: usize },

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;

impl From<PfError> for SimError {
    fn from(e: PfError) -> Self {
        match e {
            PfError::InvalidArg { what } => SimError::InvalidArg { what },
            PfError::Invariant { what } => SimError::InvalidArg { what },
        }
    }
}
