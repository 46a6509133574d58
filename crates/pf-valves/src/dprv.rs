//! Dynamically actuated pressure reducing valve.
//!
//! The controller moves a normalized actuator position once per time step;
//! the position maps to a flow coefficient `Cv` through a two-regime curve:
//! linear below the transition opening, cubic above it. The loss factor is
//! `1 / Cv²`, used for that evaluation only.

use pf_controls::{ControllerState, PressureController};

/// Position to flow-coefficient relationship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowCoefficientCurve {
    /// Opening where the cubic regime starts
    pub threshold: f64,
    /// Coefficient at the threshold
    pub transitional: f64,
    /// Coefficient at full opening
    pub maximum: f64,
    /// Cubic coefficients, highest power first
    pub cubic: [f64; 4],
}

impl Default for FlowCoefficientCurve {
    fn default() -> Self {
        Self {
            threshold: 0.12,
            transitional: 0.07550186203,
            maximum: 1.442760731,
            cubic: [0.09, -1.21, 2.33, -0.21],
        }
    }
}

impl FlowCoefficientCurve {
    /// Flow coefficient at `position`, clamped to [0, 1].
    pub fn coefficient(&self, position: f64) -> f64 {
        let x = position.clamp(0.0, 1.0);
        if x < self.threshold {
            self.transitional * x / self.threshold
        } else {
            let [k1, k2, k3, k4] = self.cubic;
            (((k1 * x + k2) * x + k3) * x + k4) * self.maximum
        }
    }

    /// Loss factor `1 / Cv²`; `None` when the coefficient vanishes.
    pub fn loss_factor(&self, position: f64) -> Option<f64> {
        let cv = self.coefficient(position);
        if cv > 0.0 {
            Some(1.0 / (cv * cv))
        } else {
            None
        }
    }
}

/// Controller data carried by a DPRV.
#[derive(Debug, Clone, PartialEq)]
pub struct DprvState {
    pub controller: PressureController,
    pub control: ControllerState,
    pub curve: FlowCoefficientCurve,
    /// Simulated time of the last controller update (s)
    pub time_s: u64,
}

impl DprvState {
    pub fn new(controller: PressureController) -> Self {
        let control = controller.initial_state();
        Self {
            controller,
            control,
            curve: FlowCoefficientCurve::default(),
            time_s: 0,
        }
    }

    pub fn position(&self) -> f64 {
        self.control.position
    }

    /// Start-of-run reset: small opening, cleared error history.
    pub fn reset(&mut self) {
        self.controller.reset(&mut self.control);
        self.time_s = 0;
    }

    /// Reference pressure (ft) at the stamped time with the valve carrying `flow`.
    pub fn reference_pressure(&self, flow: f64) -> f64 {
        self.controller.reference_pressure(self.time_s, flow)
    }
}
