//! The valve entity.

use pf_controls::ReferenceStrategy;
use pf_core::{LinkId, NodeId, UnitSystem};
use pf_network::Network;
use tracing::{trace, warn};

use crate::common::{HeadLoss, HydraulicFloors, bore_area, loss_factor};
use crate::dprv::DprvState;
use crate::error::{ValveError, ValveResult};
use crate::headloss;
use crate::kind::{ValveKind, ValveType};
use crate::status::{ValveStatus, reducing_transition, sustaining_transition};

/// A flow-control device between two nodes.
///
/// Lengths are in feet, flows in cfs, pressures and heads in feet. `flow`,
/// `head_loss` and `gradient` hold the latest trial values and are
/// overwritten every solver iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Valve {
    pub id: LinkId,
    name: String,
    pub kind: ValveKind,
    pub from: NodeId,
    pub to: NodeId,
    /// Bore diameter (ft)
    pub diameter: f64,
    /// Minor-loss coefficient K
    pub loss_coeff: f64,
    loss_factor: f64,
    /// Elevation added to the setting to form the head-set point
    elevation: f64,
    pub status: ValveStatus,
    fixed_status: bool,
    pub setting: f64,
    init_status: ValveStatus,
    init_fixed: bool,
    init_setting: f64,
    pub flow: f64,
    pub head_loss: f64,
    pub gradient: f64,
    pub floors: HydraulicFloors,
}

impl Valve {
    pub fn new(
        id: LinkId,
        name: impl Into<String>,
        kind: ValveKind,
        from: NodeId,
        to: NodeId,
        diameter: f64,
        loss_coeff: f64,
    ) -> ValveResult<Self> {
        if !diameter.is_finite() || diameter <= 0.0 {
            return Err(ValveError::InvalidArg {
                what: "valve diameter must be positive",
            });
        }
        if !loss_coeff.is_finite() || loss_coeff < 0.0 {
            return Err(ValveError::InvalidArg {
                what: "minor loss coefficient must be non-negative",
            });
        }
        if from == to {
            return Err(ValveError::InvalidArg {
                what: "valve end nodes must differ",
            });
        }
        Ok(Self {
            id,
            name: name.into(),
            kind,
            from,
            to,
            diameter,
            loss_coeff,
            loss_factor: loss_factor(loss_coeff, diameter),
            elevation: 0.0,
            status: ValveStatus::Active,
            fixed_status: false,
            setting: 0.0,
            init_status: ValveStatus::Active,
            init_fixed: false,
            init_setting: 0.0,
            flow: 0.0,
            head_loss: 0.0,
            gradient: 0.0,
            floors: HydraulicFloors::default(),
        })
    }

    pub fn with_floors(mut self, floors: HydraulicFloors) -> Self {
        self.floors = floors;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn valve_type(&self) -> ValveType {
        self.kind.valve_type()
    }

    /// Open-valve loss factor `f` of `f·Q²`.
    pub fn loss_factor(&self) -> f64 {
        self.loss_factor
    }

    pub fn head_set_elevation(&self) -> f64 {
        self.elevation
    }

    pub fn has_fixed_status(&self) -> bool {
        self.fixed_status
    }

    pub fn init_status(&self) -> ValveStatus {
        self.init_status
    }

    pub fn init_setting(&self) -> f64 {
        self.init_setting
    }

    pub fn dprv(&self) -> Option<&DprvState> {
        match &self.kind {
            ValveKind::Dprv(state) => Some(&**state),
            _ => None,
        }
    }

    pub fn dprv_mut(&mut self) -> Option<&mut DprvState> {
        match &mut self.kind {
            ValveKind::Dprv(state) => Some(&mut **state),
            _ => None,
        }
    }

    /// Actuator position of a DPRV.
    pub fn position(&self) -> Option<f64> {
        self.dprv().map(DprvState::position)
    }

    /// Check node and curve references against `network` and fix the
    /// head-set elevation: downstream node for reducing kinds, upstream for PSV.
    pub fn bind(&mut self, network: &Network) -> ValveResult<()> {
        for node in [self.from, self.to] {
            if !network.contains_node(node) {
                return Err(self.unknown_node(node));
            }
        }
        match &self.kind {
            ValveKind::Gpv { curve } if !network.contains_curve(*curve) => {
                return Err(ValveError::UnknownCurve {
                    valve: self.name.clone(),
                    curve: curve.index(),
                });
            }
            ValveKind::Dprv(state) => {
                if let ReferenceStrategy::RemoteNode { node, .. } = state.controller.strategy {
                    if !network.contains_node(node) {
                        return Err(self.unknown_node(node));
                    }
                }
            }
            _ => {}
        }

        let anchor = match self.kind {
            ValveKind::Prv | ValveKind::Dprv(_) => Some(self.to),
            ValveKind::Psv => Some(self.from),
            _ => None,
        };
        self.elevation = match anchor {
            Some(node) => network
                .elevation(node)
                .ok_or_else(|| self.unknown_node(node))?,
            None => 0.0,
        };
        Ok(())
    }

    fn unknown_node(&self, node: NodeId) -> ValveError {
        ValveError::UnknownNode {
            valve: self.name.clone(),
            node: node.index(),
        }
    }

    /// Pin the initial status; the state machine leaves pinned valves alone.
    pub fn set_init_status(&mut self, status: ValveStatus) {
        self.init_status = status;
        self.init_fixed = status != ValveStatus::Active;
        self.fixed_status = true;
    }

    /// Starting status the state machine remains free to change.
    pub fn set_start_status(&mut self, status: ValveStatus) {
        self.init_status = status;
        self.init_fixed = false;
        self.fixed_status = false;
    }

    /// Set the initial setting and release any pinned status.
    pub fn set_init_setting(&mut self, setting: f64) {
        self.init_setting = setting;
        self.init_status = ValveStatus::Active;
        self.init_fixed = false;
        self.fixed_status = false;
    }

    /// Restore initial status and setting at the start of a run.
    pub fn initialize(&mut self, reinit_flow: bool) {
        self.status = self.init_status;
        self.setting = self.init_setting;
        if reinit_flow {
            self.set_init_flow();
        }
        self.fixed_status = self.init_fixed;
        if let Some(state) = self.dprv_mut() {
            state.reset();
        }
    }

    /// Initial flow guess: 1 ft/s through the bore.
    pub fn set_init_flow(&mut self) {
        self.flow = match self.kind {
            ValveKind::Fcv => self.setting,
            ValveKind::Ccv { .. } | ValveKind::Dprv(_) if self.setting == 0.0 => {
                self.floors.zero_flow
            }
            _ => bore_area(self.diameter),
        };
    }

    /// Mean velocity (ft/s) at the current flow.
    pub fn velocity(&self) -> f64 {
        self.flow / bore_area(self.diameter)
    }

    /// Reynolds number at flow `q` for kinematic viscosity `viscosity` (ft²/s).
    pub fn reynolds(&self, q: f64, viscosity: f64) -> f64 {
        q.abs() / bore_area(self.diameter) * self.diameter / viscosity
    }

    /// Current setting in the project's units.
    pub fn setting_in_user_units(&self, units: UnitSystem) -> f64 {
        match self.kind {
            ValveKind::Prv | ValveKind::Psv | ValveKind::Pbv => {
                self.setting * units.pressure_factor()
            }
            ValveKind::Fcv => self.setting * units.flow_factor(),
            _ => self.setting,
        }
    }

    /// Head loss at trial flow `q` without touching the valve.
    pub fn head_loss_at(&self, network: &Network, q: f64) -> HeadLoss {
        headloss::find_head_loss(self, network, q)
    }

    /// Evaluate and store head loss and gradient at trial flow `q`.
    pub fn find_head_loss(&mut self, network: &Network, q: f64) -> HeadLoss {
        let h = self.head_loss_at(network, q);
        self.head_loss = h.loss;
        self.gradient = h.gradient;
        h
    }

    /// Head-set point (ft) of a pressure-regulating kind at trial flow `q`.
    ///
    /// For a DPRV the set point follows the live reference pressure.
    pub fn head_set(&self, q: f64) -> Option<f64> {
        match &self.kind {
            ValveKind::Prv | ValveKind::Psv => Some(self.setting + self.elevation),
            ValveKind::Dprv(state) => Some(state.reference_pressure(q) + self.elevation),
            _ => None,
        }
    }

    /// Status this valve would move to for trial flow `q` and end heads.
    pub fn next_status(&self, q: f64, h1: f64, h2: f64) -> ValveStatus {
        if self.fixed_status {
            return self.status;
        }
        let Some(hset) = self.head_set(q) else {
            return self.status;
        };
        let zf = self.floors.zero_flow;
        match self.kind {
            ValveKind::Psv => sustaining_transition(self.status, q, h1, h2, hset, zf),
            _ => reducing_transition(self.status, q, h1, h2, hset, zf),
        }
    }

    /// Apply the status transition rules; returns true on a change.
    ///
    /// Closing zeroes the flow.
    pub fn update_status(&mut self, q: f64, h1: f64, h2: f64) -> bool {
        let next = self.next_status(q, h1, h2);
        if next == self.status {
            return false;
        }
        trace!(
            valve = %self.name,
            from = %self.status,
            to = %next,
            q,
            h1,
            h2,
            "valve status change"
        );
        if next == ValveStatus::Closed {
            self.flow = 0.0;
        }
        self.status = next;
        true
    }

    /// External status action. Pins the status; returns true if it changes
    /// (or would change, when `make_change` is false).
    pub fn change_status(&mut self, status: ValveStatus, make_change: bool, reason: &str) -> bool {
        if self.fixed_status && self.status == status {
            return false;
        }
        if make_change {
            trace!(valve = %self.name, to = %status, reason, "valve status action");
            self.status = status;
            self.fixed_status = true;
            if status == ValveStatus::Closed {
                self.flow = 0.0;
            }
        }
        true
    }

    /// External setting action.
    ///
    /// A closed valve only stores the new setting, except a CCV given a
    /// nonzero opening, which reopens. Otherwise a zero setting closes the
    /// valve and any other value opens it.
    pub fn change_setting(&mut self, setting: f64, make_change: bool, reason: &str) -> bool {
        if self.setting == setting {
            return false;
        }
        let reopens = matches!(self.kind, ValveKind::Ccv { .. }) && setting != 0.0;
        if self.status == ValveStatus::Closed && !reopens {
            self.setting = setting;
            return false;
        }
        if make_change {
            if setting == 0.0 {
                self.status = ValveStatus::Closed;
                self.flow = 0.0;
            } else {
                self.status = ValveStatus::Open;
            }
            trace!(valve = %self.name, setting, reason, "valve setting action");
            self.setting = setting;
        }
        true
    }

    /// Warn when a PRV or PSV carries reverse flow beyond `q_tol`.
    ///
    /// Returns false for such a valve.
    pub fn validate_status(&self, q_tol: f64) -> bool {
        match self.kind {
            ValveKind::Prv | ValveKind::Psv if self.flow < -q_tol => {
                warn!(valve = %self.name, flow = self.flow, "reverse flow through regulating valve");
                false
            }
            _ => true,
        }
    }
}
