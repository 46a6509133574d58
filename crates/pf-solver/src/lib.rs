//! Hydraulic-solver collaborator interface.
//!
//! The network solver itself lives outside this workspace. This crate fixes
//! the contract between it and the valve models:
//! - [`HydraulicSolver`]: solve one instant, choose the next step length
//! - [`callbacks`]: the per-iteration valve evaluations a solver performs
//! - [`ConvergenceMonitor`]: iteration accounting and the fatal
//!   non-convergence error

pub mod callbacks;
pub mod config;
pub mod error;
pub mod monitor;
pub mod solver;

pub use callbacks::{HeadConstraint, head_constraint, update_statuses, valve_head_loss};
pub use config::SolverConfig;
pub use error::{SolverError, SolverResult};
pub use monitor::ConvergenceMonitor;
pub use solver::{HydraulicSolver, SolveReport, StepClock};
