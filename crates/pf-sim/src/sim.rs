//! Run loop and result recording.

use std::io::Write;

use pf_network::Network;
use pf_solver::{HydraulicSolver, SolveReport};
use pf_valves::Valve;
use tracing::{debug, info};

use crate::commit::commit_step;
use crate::error::{SimError, SimResult};
use crate::output::PositionWriter;
use crate::regulation::{RegulationSample, pressure_management};

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Controller step length (seconds); the configured hydraulic step
    pub hydraulic_step_s: f64,
    /// Maximum number of instants (safety limit)
    pub max_steps: usize,
    /// Reset valve flows to their initial guesses at the start
    pub reinit_flow: bool,
    /// Reverse-flow tolerance for PRV/PSV diagnostics (cfs)
    pub flow_tolerance: f64,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            hydraulic_step_s: 3600.0,
            max_steps: 100_000,
            reinit_flow: true,
            flow_tolerance: 1e-4,
        }
    }
}

/// Record of a completed run.
#[derive(Clone, Debug, Default)]
pub struct SimRecord {
    /// Solved instants (seconds)
    pub t: Vec<u64>,
    /// Solver report per instant
    pub reports: Vec<SolveReport>,
    /// Controller samples, in step then valve order
    pub samples: Vec<RegulationSample>,
}

impl SimRecord {
    /// Samples of one valve, by name.
    pub fn samples_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RegulationSample> {
        self.samples.iter().filter(move |s| s.name == name)
    }
}

/// Run a simulation until the solver reports a zero-length next step.
pub fn run_sim<S: HydraulicSolver>(
    solver: &mut S,
    network: &mut Network,
    valves: &mut [Valve],
    opts: &SimOptions,
) -> SimResult<SimRecord> {
    run_internal(solver, network, valves, opts, None::<&mut PositionWriter<std::io::Sink>>)
}

/// Run a simulation and write the actuator-position series to `out`.
pub fn run_sim_with_output<S: HydraulicSolver, W: Write>(
    solver: &mut S,
    network: &mut Network,
    valves: &mut [Valve],
    opts: &SimOptions,
    out: W,
) -> SimResult<SimRecord> {
    let mut writer = PositionWriter::new(out);
    let record = run_internal(solver, network, valves, opts, Some(&mut writer))?;
    writer.flush()?;
    Ok(record)
}

fn run_internal<S: HydraulicSolver, W: Write>(
    solver: &mut S,
    network: &mut Network,
    valves: &mut [Valve],
    opts: &SimOptions,
    mut writer: Option<&mut PositionWriter<W>>,
) -> SimResult<SimRecord> {
    if !(opts.hydraulic_step_s > 0.0) || !opts.hydraulic_step_s.is_finite() {
        return Err(SimError::InvalidArg {
            what: "hydraulic step must be positive",
        });
    }
    if opts.max_steps == 0 {
        return Err(SimError::InvalidArg {
            what: "max_steps must be positive",
        });
    }

    info!(valves = valves.len(), step = opts.hydraulic_step_s, "starting run");
    for valve in valves.iter_mut() {
        valve.initialize(opts.reinit_flow);
    }

    let mut record = SimRecord::default();
    let mut t = 0_u64;
    loop {
        debug!(t, "hydraulic instant");

        let samples = pressure_management(network, valves, t, opts.hydraulic_step_s);
        if let Some(w) = writer.as_deref_mut() {
            for sample in &samples {
                w.write_sample(sample)?;
            }
        }

        let report = solver.solve(network, valves, t)?;
        for valve in valves.iter() {
            valve.validate_status(opts.flow_tolerance);
        }
        commit_step(valves);

        record.t.push(t);
        record.reports.push(report);
        record.samples.extend(samples);

        let tstep = solver.next_step(network, valves, t);
        if tstep == 0 {
            break;
        }
        if record.t.len() >= opts.max_steps {
            return Err(SimError::StepLimit {
                max_steps: opts.max_steps,
            });
        }
        debug!(t, tstep, "advancing");
        t += tstep;
    }

    info!(instants = record.t.len(), end = t, "run complete");
    Ok(record)
}
