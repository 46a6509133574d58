//! Extended-period runs with dynamic pressure regulation.
//!
//! Provides:
//! - the per-step pressure-management pass over every DPRV
//! - the commit latch applied after each converged instant
//! - the run loop driving an external [`pf_solver::HydraulicSolver`]
//! - the actuator-position time series
//!
//! Each step reads node heads as the previous converged instant left them.
//! The controller never sees a partially iterated solution.

pub mod commit;
pub mod error;
pub mod output;
pub mod regulation;
pub mod sim;

pub use commit::commit_step;
pub use error::{SimError, SimResult};
pub use output::PositionWriter;
pub use regulation::{RegulationSample, pressure_management};
pub use sim::{SimOptions, SimRecord, run_sim, run_sim_with_output};
