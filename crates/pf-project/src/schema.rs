//! Project schema definitions.
//!
//! Values are in the project's declared units: SI uses meters, millimeter
//! diameters, L/s and meters of water; US uses feet, inch diameters, cfs
//! and psi.

use pf_controls::{ActuatorGeometry, DayNightSchedule};
use pf_valves::{ClosureCurve, HydraulicFloors};
use serde::{Deserialize, Serialize};

/// Newest project file version this crate reads and writes.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub units: UnitsDef,
    #[serde(default)]
    pub options: OptionsDef,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub curves: Vec<CurveDef>,
    #[serde(default)]
    pub valves: Vec<ValveDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UnitsDef {
    #[default]
    SI,
    US,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionsDef {
    #[serde(default = "default_hydraulic_step")]
    pub hydraulic_step_s: u64,
    #[serde(default)]
    pub duration_s: u64,
    /// Loss relationship for closure-control valves
    #[serde(default)]
    pub closure_curve: ClosureCurve,
    #[serde(default)]
    pub controller: ControllerDefaultsDef,
    #[serde(default)]
    pub floors: HydraulicFloors,
}

fn default_hydraulic_step() -> u64 {
    3600
}

impl Default for OptionsDef {
    fn default() -> Self {
        Self {
            hydraulic_step_s: default_hydraulic_step(),
            duration_s: 0,
            closure_curve: ClosureCurve::default(),
            controller: ControllerDefaultsDef::default(),
            floors: HydraulicFloors::default(),
        }
    }
}

/// Controller settings applied to every DPRV unless the valve overrides gains.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControllerDefaultsDef {
    #[serde(default)]
    pub gains: GainsDef,
    #[serde(default = "default_initial_position")]
    pub initial_position: f64,
    #[serde(default)]
    pub geometry: ActuatorGeometry,
}

fn default_initial_position() -> f64 {
    0.2
}

impl Default for ControllerDefaultsDef {
    fn default() -> Self {
        Self {
            gains: GainsDef::default(),
            initial_position: default_initial_position(),
            geometry: ActuatorGeometry::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GainsDef {
    pub open: f64,
    pub close: f64,
}

impl Default for GainsDef {
    fn default() -> Self {
        Self {
            open: 1e-6,
            close: 1e-6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub id: String,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum NodeKind {
    Junction { elevation: f64 },
    Reservoir { head: f64 },
    Tank { elevation: f64, level: f64 },
}

/// Head-loss curve for general-purpose valves: (flow, head loss) points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurveDef {
    pub id: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValveDef {
    pub id: String,
    pub from: String,
    pub to: String,
    pub diameter: f64,
    #[serde(default)]
    pub minor_loss: f64,
    pub kind: ValveKindDef,
    /// Pinned status; the valve never changes it on its own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusDef>,
    /// Starting status of a regulating valve, free to change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_status: Option<StatusDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ValveKindDef {
    PRV {
        setting: f64,
    },
    PSV {
        setting: f64,
    },
    FCV {
        setting: f64,
    },
    TCV {
        setting: f64,
    },
    PBV {
        setting: f64,
    },
    GPV {
        curve: String,
    },
    CCV {
        setting: f64,
    },
    DPRV {
        strategy: StrategyDef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gains: Option<GainsDef>,
    },
}

impl ValveKindDef {
    pub fn label(&self) -> &'static str {
        match self {
            ValveKindDef::PRV { .. } => "PRV",
            ValveKindDef::PSV { .. } => "PSV",
            ValveKindDef::FCV { .. } => "FCV",
            ValveKindDef::TCV { .. } => "TCV",
            ValveKindDef::PBV { .. } => "PBV",
            ValveKindDef::GPV { .. } => "GPV",
            ValveKindDef::CCV { .. } => "CCV",
            ValveKindDef::DPRV { .. } => "DPRV",
        }
    }

    pub fn setting(&self) -> Option<f64> {
        match self {
            ValveKindDef::PRV { setting }
            | ValveKindDef::PSV { setting }
            | ValveKindDef::FCV { setting }
            | ValveKindDef::TCV { setting }
            | ValveKindDef::PBV { setting }
            | ValveKindDef::CCV { setting } => Some(*setting),
            ValveKindDef::GPV { .. } | ValveKindDef::DPRV { .. } => None,
        }
    }
}

/// Reference-pressure strategy of a DPRV.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum StrategyDef {
    /// Fixed outlet pressure.
    FO { pressure: f64 },
    /// Time-modulated day/night pressures.
    TM {
        day_pressure: f64,
        night_pressure: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schedule: Option<DayNightSchedule>,
    },
    /// Flow-modulated `a·Q² + b·Q + c` in project units.
    FM { a: f64, b: f64, c: f64 },
    /// Target pressure at a remote node.
    RNM { node: String, pressure: f64 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusDef {
    Open,
    Closed,
}
