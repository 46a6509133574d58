//! Closure-control valve loss factors.
//!
//! The setting is a fractional opening in [0, 1]. Two globe-valve
//! relationships map it to a loss factor; the project picks one.

use pf_core::constants::G_FTPS2;
use serde::{Deserialize, Serialize};

use crate::common::bore_area;

/// Valve conductance of the travel relationship (ft^2.5/s).
pub const VALVE_CONDUCTANCE: f64 = 16.96;

/// Globe-valve discharge coefficient polynomial, highest power first.
const CD_POLY: [f64; 7] = [-1.1293, 3.3823, -3.443, 0.5671, 1.0371, -0.0037, 0.0];

/// Opening-to-loss relationship of a closure-control valve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosureCurve {
    /// `f = 1 / (C²·τ²)` with the relative travel τ.
    #[default]
    ValveTravel,
    /// `f = (1/Cd² − 1) / (2g·A²)` with the globe-valve Cd polynomial.
    DischargeCoefficient,
}

impl ClosureCurve {
    /// Loss factor at `opening` for a valve of `diameter` (ft).
    ///
    /// Returns infinity at zero opening; callers treat that as closed.
    pub fn loss_factor(self, opening: f64, diameter: f64) -> f64 {
        match self {
            ClosureCurve::ValveTravel => {
                1.0 / (VALVE_CONDUCTANCE * VALVE_CONDUCTANCE * opening * opening)
            }
            ClosureCurve::DischargeCoefficient => {
                let cd = discharge_coefficient(opening);
                let area = bore_area(diameter);
                (1.0 / (cd * cd) - 1.0) / (2.0 * G_FTPS2 * area * area)
            }
        }
    }
}

/// Globe-valve discharge coefficient at a fractional opening.
pub fn discharge_coefficient(opening: f64) -> f64 {
    CD_POLY.iter().fold(0.0, |acc, c| acc * opening + c)
}
