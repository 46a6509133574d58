//! Shared head-loss laws and numeric floors.

use serde::{Deserialize, Serialize};

/// Minimum minor-loss coefficient applied when converting K to a loss factor.
pub const MIN_LOSS_COEFF: f64 = 0.1;

/// Converts a minor loss `K·V²/2g` to `f·Q²` with D in feet: 8/(g·π²).
pub const MINOR_LOSS_BASIS: f64 = 0.02517;

/// Loss-factor basis used for throttle-control settings.
pub const TCV_LOSS_BASIS: f64 = 0.025173;

/// Numeric floors shared by all head-loss laws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HydraulicFloors {
    /// Smallest gradient handed to the solver (ft/cfs)
    pub min_gradient: f64,
    /// Resistance of a closed element (ft/cfs)
    pub high_resistance: f64,
    /// Flow tolerance around zero (cfs)
    pub zero_flow: f64,
}

impl Default for HydraulicFloors {
    fn default() -> Self {
        Self {
            min_gradient: 1e-6,
            high_resistance: 1e8,
            zero_flow: 1e-6,
        }
    }
}

/// Head loss across a device and its derivative with respect to flow.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeadLoss {
    /// Head loss (ft), signed like the flow
    pub loss: f64,
    /// d(loss)/dq (ft/cfs), never negative
    pub gradient: f64,
}

impl HeadLoss {
    pub const ZERO: HeadLoss = HeadLoss {
        loss: 0.0,
        gradient: 0.0,
    };

    /// Closed-element law: a very high linear resistance.
    pub fn closed(q: f64, floors: &HydraulicFloors) -> Self {
        Self {
            loss: floors.high_resistance * q,
            gradient: floors.high_resistance,
        }
    }

    /// Quadratic minor-loss law `loss = f·q·|q|`.
    ///
    /// Below the gradient floor the law turns linear through the origin.
    pub fn open(loss_factor: f64, q: f64, floors: &HydraulicFloors) -> Self {
        let gradient = 2.0 * loss_factor * q.abs();
        if gradient < floors.min_gradient || !gradient.is_finite() {
            if !loss_factor.is_finite() {
                return Self::closed(q, floors);
            }
            Self {
                loss: floors.min_gradient * q,
                gradient: floors.min_gradient,
            }
        } else {
            Self {
                loss: gradient * q / 2.0,
                gradient,
            }
        }
    }
}

/// Loss factor `f` of `f·Q²` from a minor-loss coefficient and diameter (ft).
pub fn loss_factor(loss_coeff: f64, diameter: f64) -> f64 {
    MINOR_LOSS_BASIS * loss_coeff.max(MIN_LOSS_COEFF) / diameter.powi(4)
}

/// Cross-sectional area (ft²) of a circular bore.
pub fn bore_area(diameter: f64) -> f64 {
    std::f64::consts::PI * diameter * diameter / 4.0
}
