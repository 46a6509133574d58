//! Pressure controller for dynamically actuated reducing valves.
//!
//! Per simulated step:
//! 1. pick the reference pressure from the strategy
//! 2. `error = reference − measured pressure`
//! 3. `q3 = gain(error) · error`
//! 4. `delta = q3 / Acs(latched position) · dt`
//! 5. `position = clamp(latched position + delta, 0, 1)`
//!
//! The latched ("previous") fields only change through
//! [`ControllerState::commit`], called once the step's hydraulics converged.

use serde::{Deserialize, Serialize};

use crate::actuator::{ActuatorGains, ActuatorGeometry};
use crate::error::{ControlError, ControlResult};
use crate::reference::{ReferenceStrategy, StrategyKind};

/// Bound on the accumulated error telemetry.
pub const ERROR_INTEGRAL_LIMIT: f64 = 100.0;

/// Measurements handed to the controller for one step.
///
/// Pressures are heads above ground (ft) from the previous converged step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlInputs {
    /// Elapsed simulated time (s)
    pub time_s: u64,
    /// Controller step length (s)
    pub step_s: f64,
    /// Valve flow (cfs)
    pub flow: f64,
    /// Pressure at the valve's upstream node
    pub inlet_pressure: f64,
    /// Pressure at the valve's downstream node
    pub outlet_pressure: f64,
    /// Pressure at the strategy's measurement node
    pub measured_pressure: f64,
}

/// Controller state carried by the valve between steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    /// Normalized opening used by the head-loss model this step
    pub position: f64,
    /// Position latched at the last converged step
    pub position_previous: f64,
    /// Increment applied this step
    pub position_delta: f64,
    /// Reference pressure selected this step
    pub reference: f64,
    pub error: f64,
    pub error_previous: f64,
    /// Accumulated error, bounded to ±[`ERROR_INTEGRAL_LIMIT`]
    pub error_integral: f64,
    /// Error change against the latched error
    pub error_derivative: f64,
}

impl ControllerState {
    /// Fresh state at the given opening with all error history cleared.
    pub fn at_position(position: f64) -> Self {
        let position = position.clamp(0.0, 1.0);
        Self {
            position,
            position_previous: position,
            position_delta: 0.0,
            reference: 0.0,
            error: 0.0,
            error_previous: 0.0,
            error_integral: 0.0,
            error_derivative: 0.0,
        }
    }

    /// Latch the step's position and error as the base for the next step.
    ///
    /// Idempotent: committing twice without an update in between changes nothing.
    pub fn commit(&mut self) {
        self.position_previous = self.position;
        self.error_previous = self.error;
    }
}

/// Physically-based position controller bound to one reference strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureController {
    pub strategy: ReferenceStrategy,
    #[serde(default)]
    pub gains: ActuatorGains,
    #[serde(default)]
    pub geometry: ActuatorGeometry,
    /// Opening at t = 0; kept away from zero so the run doesn't start fully closed
    #[serde(default = "default_initial_position")]
    pub initial_position: f64,
}

fn default_initial_position() -> f64 {
    0.2
}

impl PressureController {
    pub fn new(
        strategy: ReferenceStrategy,
        gains: ActuatorGains,
        geometry: ActuatorGeometry,
        initial_position: f64,
    ) -> ControlResult<Self> {
        let controller = Self {
            strategy,
            gains,
            geometry,
            initial_position,
        };
        controller.validate()?;
        Ok(controller)
    }

    /// Controller with default gains, geometry and initial opening.
    pub fn with_strategy(strategy: ReferenceStrategy) -> ControlResult<Self> {
        Self::new(
            strategy,
            ActuatorGains::default(),
            ActuatorGeometry::default(),
            default_initial_position(),
        )
    }

    pub fn validate(&self) -> ControlResult<()> {
        self.strategy.validate()?;
        self.gains.validate()?;
        self.geometry.validate()?;
        if !(0.0..=1.0).contains(&self.initial_position) {
            return Err(ControlError::InvalidArg {
                what: "initial_position must lie in [0, 1]",
            });
        }
        Ok(())
    }

    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// State at the start of a run.
    pub fn initial_state(&self) -> ControllerState {
        ControllerState::at_position(self.initial_position)
    }

    /// Reset `state` to the start-of-run opening and clear its history.
    pub fn reset(&self, state: &mut ControllerState) {
        *state = self.initial_state();
    }

    pub fn reference_pressure(&self, t_s: u64, flow: f64) -> f64 {
        self.strategy.reference_pressure(t_s, flow)
    }

    /// Activation check for a closed valve.
    ///
    /// Only the fixed-outlet strategy checks: the valve should start
    /// regulating once its inlet is above the target while its outlet is below.
    pub fn should_activate(&self, inputs: &ControlInputs) -> bool {
        match self.strategy {
            ReferenceStrategy::FixedOutlet { pressure } => {
                inputs.inlet_pressure > pressure && inputs.outlet_pressure < pressure
            }
            _ => false,
        }
    }

    /// Advance the actuator by one step and return the new position.
    pub fn advance(&self, state: &mut ControllerState, inputs: &ControlInputs) -> f64 {
        let reference = self.reference_pressure(inputs.time_s, inputs.flow);
        let error = reference - inputs.measured_pressure;
        if !error.is_finite() || !inputs.step_s.is_finite() {
            return self.hold(state);
        }

        let area = self.geometry.cross_section(state.position_previous);
        let q3 = self.gains.control_flow(error);
        let delta = q3 / area * inputs.step_s;

        state.reference = reference;
        state.error = error;
        state.error_integral =
            (state.error_integral + error).clamp(-ERROR_INTEGRAL_LIMIT, ERROR_INTEGRAL_LIMIT);
        state.error_derivative = error - state.error_previous;
        state.position_delta = delta;
        state.position = (state.position_previous + delta).clamp(0.0, 1.0);
        state.position
    }

    /// Keep the current opening, re-applying the clamp.
    pub fn hold(&self, state: &mut ControllerState) -> f64 {
        state.position_delta = 0.0;
        state.position = state.position.clamp(0.0, 1.0);
        state.position
    }
}
