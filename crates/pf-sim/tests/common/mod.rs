//! Single-loop test network and solver.
//!
//! source (fixed head) -> valve -> junction -> pipe -> sink (fixed head)
//!
//! The loop flow `q` solves `hv(q) + r·q·|q| = Hs − Hk` by Newton iteration,
//! calling the valve callbacks the way a network solver would.

#![allow(dead_code)]

use pf_controls::{PressureController, ReferenceStrategy};
use pf_core::{LinkId, NodeId};
use pf_network::{Network, NetworkBuilder};
use pf_solver::callbacks::{update_status, valve_head_loss};
use pf_solver::{
    ConvergenceMonitor, HydraulicSolver, SolveReport, SolverConfig, SolverError, SolverResult,
    StepClock,
};
use pf_valves::{DprvState, Valve, ValveKind, ValveStatus};

pub struct SeriesSolver {
    pub config: SolverConfig,
    pub clock: StepClock,
    pub junction: NodeId,
    pub sink: NodeId,
    /// Pipe resistance r of `r·q·|q|`
    pub resistance: f64,
}

impl HydraulicSolver for SeriesSolver {
    fn solve(
        &mut self,
        network: &mut Network,
        valves: &mut [Valve],
        time_s: u64,
    ) -> SolverResult<SolveReport> {
        let valve = valves.first_mut().ok_or_else(|| SolverError::ProblemSetup {
            what: "series network needs one valve".into(),
        })?;
        let missing = || SolverError::ProblemSetup {
            what: "series network node missing".into(),
        };
        let hs = network.head(valve.from).ok_or_else(missing)?;
        let hk = network.head(self.sink).ok_or_else(missing)?;

        let mut monitor = ConvergenceMonitor::new(self.config, time_s);
        let mut status_changes = 0;
        let mut q = valve.flow;
        loop {
            let h = valve_head_loss(valve, network, q);
            let f = h.loss + self.resistance * q * q.abs() - (hs - hk);
            let df = h.gradient + 2.0 * self.resistance * q.abs();
            let q_new = q - f / df;

            let h_new = valve.head_loss_at(network, q_new);
            network.set_head(self.junction, hs - h_new.loss);
            valve.flow = q_new;

            let changed = if monitor.should_check_status() {
                usize::from(update_status(valve, network))
            } else {
                0
            };
            status_changes += changed;

            let dq = (valve.flow - q).abs();
            q = valve.flow;
            if monitor.record(dq, q.abs(), changed)? {
                break;
            }
        }

        Ok(SolveReport {
            time_s,
            iterations: monitor.iterations(),
            relative_change: monitor.relative_change(),
            status_changes,
        })
    }

    fn next_step(&mut self, _network: &Network, _valves: &[Valve], time_s: u64) -> u64 {
        self.clock.next_step(time_s)
    }
}

pub struct Fixture {
    pub network: Network,
    pub valves: Vec<Valve>,
    pub solver: SeriesSolver,
    pub junction: NodeId,
}

/// Source tank with 50 ft of pressure feeding a DPRV, pipe r = 5, sink at 0 ft.
pub fn dprv_fixture(strategy: ReferenceStrategy, step_s: u64, duration_s: u64) -> Fixture {
    let mut b = NetworkBuilder::new();
    let source = b.add_tank("source", 0.0, 50.0);
    let junction = b.add_junction("outlet", 0.0);
    let sink = b.add_reservoir("sink", 0.0);
    let network = b.build().unwrap();

    let controller = PressureController::with_strategy(strategy).unwrap();
    let mut valve = Valve::new(
        LinkId::from_index(0),
        "dprv",
        ValveKind::Dprv(Box::new(DprvState::new(controller))),
        source,
        junction,
        1.0,
        0.1,
    )
    .unwrap();
    valve.bind(&network).unwrap();

    Fixture {
        network,
        valves: vec![valve],
        solver: SeriesSolver {
            config: SolverConfig::default(),
            clock: StepClock::new(step_s, duration_s),
            junction,
            sink,
            resistance: 5.0,
        },
        junction,
    }
}

pub fn start_closed(fixture: &mut Fixture) {
    fixture.valves[0].set_start_status(ValveStatus::Closed);
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
