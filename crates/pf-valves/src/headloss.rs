//! Head loss and gradient per device kind.
//!
//! Dispatch order:
//! 1. temporarily closed, or pinned closed: closed law
//! 2. pinned open: open law
//! 3. otherwise the kind decides, from its status and setting; a DPRV at
//!    zero position is closed, a CCV is driven by its opening alone
//!
//! An ACTIVE PRV or PSV contributes no head loss: the solver holds its
//! downstream (PRV) or upstream (PSV) head at the set point instead.

use pf_core::CurveId;
use pf_network::Network;

use crate::ccv::ClosureCurve;
use crate::common::{HeadLoss, HydraulicFloors, TCV_LOSS_BASIS};
use crate::dprv::DprvState;
use crate::kind::ValveKind;
use crate::status::ValveStatus;
use crate::valve::Valve;

/// Head loss of `valve` at trial flow `q` (cfs).
pub fn find_head_loss(valve: &Valve, network: &Network, q: f64) -> HeadLoss {
    let floors = &valve.floors;
    let lf = valve.loss_factor();

    match (valve.status, valve.has_fixed_status()) {
        (ValveStatus::TempClosed, _) | (ValveStatus::Closed, true) => {
            return HeadLoss::closed(q, floors);
        }
        (ValveStatus::Open, true) => return HeadLoss::open(lf, q, floors),
        _ => {}
    }

    match &valve.kind {
        ValveKind::Prv | ValveKind::Psv => match valve.status {
            ValveStatus::Open => HeadLoss::open(lf, q, floors),
            ValveStatus::Active => HeadLoss::ZERO,
            ValveStatus::Closed | ValveStatus::TempClosed => HeadLoss::closed(q, floors),
        },
        ValveKind::Dprv(state) => match valve.status {
            ValveStatus::Closed | ValveStatus::TempClosed => HeadLoss::closed(q, floors),
            _ if state.position() == 0.0 => HeadLoss::closed(q, floors),
            ValveStatus::Open => HeadLoss::open(lf, q, floors),
            ValveStatus::Active => dprv(state, q, floors),
        },
        // an unpinned CCV follows its opening, whatever its last status
        ValveKind::Ccv { curve } => ccv(*curve, valve.setting, valve.diameter, q, floors),
        _ if valve.status.is_closed() => HeadLoss::closed(q, floors),
        ValveKind::Pbv => pbv(lf, valve.setting, q, floors),
        ValveKind::Tcv => tcv(lf, valve.setting, valve.diameter, q, floors),
        ValveKind::Fcv => fcv(lf, valve.setting, q, floors),
        ValveKind::Gpv { curve } => gpv(network, *curve, lf, q, floors),
    }
}

/// Pressure breaker: absorbs exactly `setting` unless the open loss already exceeds it.
pub fn pbv(lf: f64, setting: f64, q: f64, floors: &HydraulicFloors) -> HeadLoss {
    if lf * q * q >= setting.abs() {
        HeadLoss::open(lf, q, floors)
    } else {
        HeadLoss {
            loss: setting,
            gradient: floors.min_gradient,
        }
    }
}

/// Throttle control: the setting is a loss coefficient, never below the open one.
pub fn tcv(lf: f64, setting: f64, diameter: f64, q: f64, floors: &HydraulicFloors) -> HeadLoss {
    let d2 = diameter * diameter;
    let throttled = (TCV_LOSS_BASIS * setting / d2 / d2).max(lf);
    HeadLoss::open(throttled, q, floors)
}

/// Flow control: flow above the setting meets a steep penalty.
pub fn fcv(lf: f64, setting: f64, q: f64, floors: &HydraulicFloors) -> HeadLoss {
    let excess = q - setting;
    if excess > 0.0 {
        HeadLoss {
            loss: lf * setting * setting + floors.high_resistance * excess,
            gradient: floors.high_resistance,
        }
    } else if q < 0.0 {
        HeadLoss::closed(q, floors)
    } else {
        HeadLoss::open(lf, q, floors)
    }
}

/// Closure control: zero opening is closed.
pub fn ccv(
    curve: ClosureCurve,
    opening: f64,
    diameter: f64,
    q: f64,
    floors: &HydraulicFloors,
) -> HeadLoss {
    if opening == 0.0 {
        return HeadLoss::closed(q, floors);
    }
    let lf = curve.loss_factor(opening, diameter);
    if lf.is_finite() {
        HeadLoss::open(lf, q, floors)
    } else {
        HeadLoss::closed(q, floors)
    }
}

/// General purpose: local segment of the head-loss curve at `|q|`.
pub fn gpv(
    network: &Network,
    curve: CurveId,
    lf: f64,
    q: f64,
    floors: &HydraulicFloors,
) -> HeadLoss {
    let Some(curve) = network.curve(curve) else {
        return HeadLoss::open(lf, q, floors);
    };
    let seg = curve.find_segment(q.abs());
    let loss = seg.intercept + seg.slope * q.abs();
    HeadLoss {
        loss: if q < 0.0 { -loss } else { loss },
        gradient: seg.slope.max(floors.min_gradient),
    }
}

/// Dynamic reducing valve: loss factor from the actuator position, single use.
pub fn dprv(state: &DprvState, q: f64, floors: &HydraulicFloors) -> HeadLoss {
    match state.curve.loss_factor(state.position()) {
        Some(lf) => HeadLoss::open(lf, q, floors),
        None => HeadLoss::closed(q, floors),
    }
}
