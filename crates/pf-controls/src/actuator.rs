//! Actuator geometry and gains for the pilot-operated pressure reducing valve.
//!
//! The actuator is a control chamber whose effective cross-section grows with
//! the square of travel. A control flow proportional to the pressure error
//! fills or drains the chamber and moves the valve stem:
//!
//! `Acs = (k5·x² + k6) · V / lift`, `q3 = gain · error`, `dx = q3 / Acs · dt`.

use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

/// Physical actuator constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActuatorGeometry {
    /// Control chamber volume (m³)
    pub control_volume: f64,
    /// Full stem travel (m)
    pub lift: f64,
    /// Quadratic cross-section coefficient
    pub k5: f64,
    /// Constant cross-section coefficient
    pub k6: f64,
}

impl Default for ActuatorGeometry {
    fn default() -> Self {
        Self {
            control_volume: 0.0047,
            lift: 0.057,
            k5: 1.30,
            k6: 0.56,
        }
    }
}

impl ActuatorGeometry {
    pub fn new(control_volume: f64, lift: f64, k5: f64, k6: f64) -> ControlResult<Self> {
        let geometry = Self {
            control_volume,
            lift,
            k5,
            k6,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> ControlResult<()> {
        if !(self.control_volume > 0.0) || !self.control_volume.is_finite() {
            return Err(ControlError::InvalidArg {
                what: "control_volume must be positive",
            });
        }
        if !(self.lift > 0.0) || !self.lift.is_finite() {
            return Err(ControlError::InvalidArg {
                what: "lift must be positive",
            });
        }
        if self.k5 < 0.0 || !(self.k6 > 0.0) || !self.k5.is_finite() || !self.k6.is_finite() {
            return Err(ControlError::InvalidArg {
                what: "k5 must be non-negative and k6 positive",
            });
        }
        Ok(())
    }

    /// Effective cross-section at normalized `position`.
    pub fn cross_section(&self, position: f64) -> f64 {
        (self.k5 * position * position + self.k6) * self.control_volume / self.lift
    }
}

/// Control-flow gains; opening and closing may run at different speeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActuatorGains {
    /// Gain applied to non-negative errors (pressure below target)
    pub open: f64,
    /// Gain applied to negative errors (pressure above target)
    pub close: f64,
}

impl Default for ActuatorGains {
    fn default() -> Self {
        Self {
            open: 1e-6,
            close: 1e-6,
        }
    }
}

impl ActuatorGains {
    pub fn new(open: f64, close: f64) -> ControlResult<Self> {
        let gains = Self { open, close };
        gains.validate()?;
        Ok(gains)
    }

    pub fn validate(&self) -> ControlResult<()> {
        if !(self.open > 0.0) || !(self.close > 0.0) || !self.open.is_finite() || !self.close.is_finite() {
            return Err(ControlError::InvalidArg {
                what: "actuator gains must be positive",
            });
        }
        Ok(())
    }

    /// Control flow `q3` for a pressure error.
    pub fn control_flow(&self, error: f64) -> f64 {
        if error >= 0.0 {
            self.open * error
        } else {
            self.close * error
        }
    }
}
