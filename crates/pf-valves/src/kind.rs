//! Device kinds.

use std::fmt;
use std::str::FromStr;

use pf_core::CurveId;

use crate::ccv::ClosureCurve;
use crate::dprv::DprvState;
use crate::error::ValveError;

/// Fieldless device tag with its conventional label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValveType {
    Prv,
    Psv,
    Fcv,
    Tcv,
    Pbv,
    Gpv,
    Ccv,
    Dprv,
}

impl ValveType {
    pub const ALL: [ValveType; 8] = [
        ValveType::Prv,
        ValveType::Psv,
        ValveType::Fcv,
        ValveType::Tcv,
        ValveType::Pbv,
        ValveType::Gpv,
        ValveType::Ccv,
        ValveType::Dprv,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ValveType::Prv => "PRV",
            ValveType::Psv => "PSV",
            ValveType::Fcv => "FCV",
            ValveType::Tcv => "TCV",
            ValveType::Pbv => "PBV",
            ValveType::Gpv => "GPV",
            ValveType::Ccv => "CCV",
            ValveType::Dprv => "DPRV",
        }
    }
}

impl fmt::Display for ValveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ValveType {
    type Err = ValveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s))
            .ok_or(ValveError::InvalidArg {
                what: "unknown valve type",
            })
    }
}

/// Device kind with the data only that kind uses.
///
/// The scalar `setting` lives on [`crate::Valve`]; its meaning per kind is
/// pressure (PRV, PSV, PBV), flow (FCV), loss coefficient (TCV) or
/// fractional opening (CCV).
#[derive(Debug, Clone, PartialEq)]
pub enum ValveKind {
    /// Pressure reducing.
    Prv,
    /// Pressure sustaining.
    Psv,
    /// Flow control.
    Fcv,
    /// Throttle control.
    Tcv,
    /// Pressure breaker.
    Pbv,
    /// General purpose: head loss from a user curve.
    Gpv { curve: CurveId },
    /// Closure control: opening-driven loss factor.
    Ccv { curve: ClosureCurve },
    /// Dynamically actuated pressure reducing valve.
    Dprv(Box<DprvState>),
}

impl ValveKind {
    pub fn valve_type(&self) -> ValveType {
        match self {
            ValveKind::Prv => ValveType::Prv,
            ValveKind::Psv => ValveType::Psv,
            ValveKind::Fcv => ValveType::Fcv,
            ValveKind::Tcv => ValveType::Tcv,
            ValveKind::Pbv => ValveType::Pbv,
            ValveKind::Gpv { .. } => ValveType::Gpv,
            ValveKind::Ccv { .. } => ValveType::Ccv,
            ValveKind::Dprv(_) => ValveType::Dprv,
        }
    }

    /// Kinds whose status cycles through ACTIVE/OPEN/CLOSED on head conditions.
    pub fn is_pressure_regulating(&self) -> bool {
        matches!(self, ValveKind::Prv | ValveKind::Psv | ValveKind::Dprv(_))
    }
}
