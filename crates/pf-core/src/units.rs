// pf-core/src/units.rs
//
// The hydraulic core computes in a fixed internal system: lengths and heads in
// feet, flows in cubic feet per second, time in seconds. User-facing values are
// carried as uom quantities and converted here.

use uom::si::f64::{Length as UomLength, Pressure as UomPressure, VolumeRate as UomVolumeRate};
use uom::si::length::{foot, meter};
use uom::si::pressure::pound_force_per_square_inch as psi_unit;
use uom::si::volume_rate::{cubic_foot_per_second, liter_per_second};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type Pressure = UomPressure;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn ft(v: f64) -> Length {
    Length::new::<foot>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    Length::new::<meter>(v)
}

#[inline]
pub fn cfs(v: f64) -> VolumeRate {
    VolumeRate::new::<cubic_foot_per_second>(v)
}

#[inline]
pub fn lps(v: f64) -> VolumeRate {
    VolumeRate::new::<liter_per_second>(v)
}

#[inline]
pub fn psi(v: f64) -> Pressure {
    Pressure::new::<psi_unit>(v)
}

/// Length in internal units (feet).
#[inline]
pub fn length_ft(l: Length) -> f64 {
    l.get::<foot>()
}

/// Flow in internal units (cfs).
#[inline]
pub fn flow_cfs(q: VolumeRate) -> f64 {
    q.get::<cubic_foot_per_second>()
}

/// Pressure expressed as feet of water head.
#[inline]
pub fn pressure_head_ft(p: Pressure) -> f64 {
    p.get::<psi_unit>() / constants::PSI_PER_FT
}

/// Unit system a project declares its inputs in.
///
/// SI projects give pressures in meters of water and flows in L/s; US projects
/// give pressures in psi and flows in cfs. Lengths follow the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitSystem {
    #[default]
    Si,
    Us,
}

impl UnitSystem {
    pub fn length(self, v: f64) -> Length {
        match self {
            Self::Si => m(v),
            Self::Us => ft(v),
        }
    }

    pub fn flow(self, v: f64) -> VolumeRate {
        match self {
            Self::Si => lps(v),
            Self::Us => cfs(v),
        }
    }

    /// Convert a user pressure value to feet of head.
    pub fn pressure_to_head(self, v: f64) -> f64 {
        match self {
            Self::Si => length_ft(m(v)),
            Self::Us => pressure_head_ft(psi(v)),
        }
    }

    /// Multiply an internal pressure head (ft) by this to get user units.
    pub fn pressure_factor(self) -> f64 {
        1.0 / self.pressure_to_head(1.0)
    }

    /// Multiply an internal flow (cfs) by this to get user units.
    pub fn flow_factor(self) -> f64 {
        1.0 / flow_cfs(self.flow(1.0))
    }

    /// Multiply an internal length (ft) by this to get user units.
    pub fn length_factor(self) -> f64 {
        1.0 / length_ft(self.length(1.0))
    }
}

pub mod constants {
    /// Gravitational acceleration in ft/s^2.
    pub const G_FTPS2: f64 = 32.174;

    /// Water pressure gradient, psi per foot of head.
    pub const PSI_PER_FT: f64 = 0.4333;
}
