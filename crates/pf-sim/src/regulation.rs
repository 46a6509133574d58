//! Pressure management: one controller pass per simulated step.

use pf_controls::ControlInputs;
use pf_core::LinkId;
use pf_network::Network;
use pf_valves::{Valve, ValveStatus};
use tracing::{trace, warn};

/// Controller outcome for one DPRV at one step.
#[derive(Debug, Clone, PartialEq)]
pub struct RegulationSample {
    pub time_s: u64,
    pub valve: LinkId,
    pub name: String,
    /// Actuator position after the update, in [0, 1]
    pub position: f64,
    /// Reference pressure (ft)
    pub reference: f64,
    /// Control error (ft); zero while the valve is not regulating
    pub error: f64,
    pub status: ValveStatus,
}

/// Advance the controller of every DPRV.
///
/// Pressures are read from `network` as the previous converged instant left
/// them. At `time_s == 0` each controller restarts from its initial opening.
/// A closed, unpinned fixed-outlet valve whose inlet is above and outlet
/// below the target is switched to ACTIVE before its update.
pub fn pressure_management(
    network: &Network,
    valves: &mut [Valve],
    time_s: u64,
    step_s: f64,
) -> Vec<RegulationSample> {
    let mut samples = Vec::new();
    for valve in valves.iter_mut() {
        if let Some(sample) = regulate(network, valve, time_s, step_s) {
            samples.push(sample);
        }
    }
    samples
}

fn regulate(network: &Network, valve: &mut Valve, time_s: u64, step_s: f64) -> Option<RegulationSample> {
    let (from, to, flow) = (valve.from, valve.to, valve.flow);
    let fixed = valve.has_fixed_status();
    let mut status = valve.status;
    let name = valve.name().to_string();
    let id = valve.id;
    let state = valve.dprv_mut()?;

    if time_s == 0 {
        state.reset();
    }
    state.time_s = time_s;

    let measured_node = state.controller.strategy.measurement_node(to);
    let pressures = (
        network.pressure(from),
        network.pressure(to),
        network.pressure(measured_node),
    );
    let (Some(inlet), Some(outlet), Some(measured)) = pressures else {
        warn!(valve = %name, "missing node for pressure management");
        state.controller.hold(&mut state.control);
        return None;
    };
    let inputs = ControlInputs {
        time_s,
        step_s,
        flow,
        inlet_pressure: inlet,
        outlet_pressure: outlet,
        measured_pressure: measured,
    };

    if status == ValveStatus::Closed && !fixed && state.controller.should_activate(&inputs) {
        trace!(valve = %name, t = time_s, "regulating valve activated");
        status = ValveStatus::Active;
    }

    let position = if status == ValveStatus::Active {
        state.controller.advance(&mut state.control, &inputs)
    } else {
        state.controller.hold(&mut state.control)
    };
    let regulating = status == ValveStatus::Active;
    let sample = RegulationSample {
        time_s,
        valve: id,
        name,
        position,
        reference: state.controller.reference_pressure(time_s, flow),
        error: if regulating { state.control.error } else { 0.0 },
        status,
    };
    valve.status = status;
    Some(sample)
}
