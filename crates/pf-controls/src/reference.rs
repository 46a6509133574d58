//! Reference-pressure strategies.
//!
//! A strategy yields the target pressure (ft of head) the controller tracks.
//! Exactly one strategy is attached to a regulated valve for its lifetime.

use std::fmt;
use std::str::FromStr;

use pf_core::NodeId;
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};
use crate::schedule::{DayNightSchedule, Phase};

/// Strategy tag without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    FixedOutlet,
    TimeModulated,
    FlowModulated,
    RemoteNode,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::FixedOutlet,
        StrategyKind::TimeModulated,
        StrategyKind::FlowModulated,
        StrategyKind::RemoteNode,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            StrategyKind::FixedOutlet => "FO",
            StrategyKind::TimeModulated => "TM",
            StrategyKind::FlowModulated => "FM",
            StrategyKind::RemoteNode => "RNM",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StrategyKind {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ControlError::UnknownStrategy {
                label: s.to_string(),
            })
    }
}

/// How the target outlet pressure is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReferenceStrategy {
    /// Constant target.
    FixedOutlet { pressure: f64 },
    /// Day or night target according to a repeating schedule.
    TimeModulated {
        day_pressure: f64,
        night_pressure: f64,
        #[serde(default)]
        schedule: DayNightSchedule,
    },
    /// `a·Q² + b·Q + c` of the valve's own flow.
    FlowModulated { a: f64, b: f64, c: f64 },
    /// Target pressure at a node elsewhere in the network.
    RemoteNode { node: NodeId, pressure: f64 },
}

impl ReferenceStrategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            ReferenceStrategy::FixedOutlet { .. } => StrategyKind::FixedOutlet,
            ReferenceStrategy::TimeModulated { .. } => StrategyKind::TimeModulated,
            ReferenceStrategy::FlowModulated { .. } => StrategyKind::FlowModulated,
            ReferenceStrategy::RemoteNode { .. } => StrategyKind::RemoteNode,
        }
    }

    /// Target pressure (ft) at simulated time `t_s` with the valve carrying `flow` (cfs).
    pub fn reference_pressure(&self, t_s: u64, flow: f64) -> f64 {
        match self {
            ReferenceStrategy::FixedOutlet { pressure } => *pressure,
            ReferenceStrategy::TimeModulated {
                day_pressure,
                night_pressure,
                schedule,
            } => match schedule.phase_at(t_s) {
                Phase::Day => *day_pressure,
                Phase::Night => *night_pressure,
            },
            ReferenceStrategy::FlowModulated { a, b, c } => a * flow * flow + b * flow + c,
            ReferenceStrategy::RemoteNode { pressure, .. } => *pressure,
        }
    }

    /// Node whose pressure is compared against the reference.
    ///
    /// Only the remote-node strategy looks away from the valve outlet.
    pub fn measurement_node(&self, outlet: NodeId) -> NodeId {
        match self {
            ReferenceStrategy::RemoteNode { node, .. } => *node,
            _ => outlet,
        }
    }

    pub fn validate(&self) -> ControlResult<()> {
        let finite = match self {
            ReferenceStrategy::FixedOutlet { pressure } => pressure.is_finite(),
            ReferenceStrategy::TimeModulated {
                day_pressure,
                night_pressure,
                schedule,
            } => {
                schedule.validate()?;
                day_pressure.is_finite() && night_pressure.is_finite()
            }
            ReferenceStrategy::FlowModulated { a, b, c } => {
                a.is_finite() && b.is_finite() && c.is_finite()
            }
            ReferenceStrategy::RemoteNode { pressure, .. } => pressure.is_finite(),
        };
        if finite {
            Ok(())
        } else {
            Err(ControlError::InvalidArg {
                what: "reference strategy parameters must be finite",
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::Id;

    #[test]
    fn labels_round_trip() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.label().parse::<StrategyKind>().unwrap(), kind);
        }
        assert!("PID".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn fixed_outlet_is_constant() {
        let s = ReferenceStrategy::FixedOutlet { pressure: 131.2 };
        assert_eq!(s.reference_pressure(0, 0.0), 131.2);
        assert_eq!(s.reference_pressure(99_999, 4.0), 131.2);
        assert_eq!(s.kind().label(), "FO");
    }

    #[test]
    fn time_modulated_day_boundary() {
        let s = ReferenceStrategy::TimeModulated {
            day_pressure: 40.0,
            night_pressure: 25.0,
            schedule: DayNightSchedule::default(),
        };
        assert_eq!(s.reference_pressure(18_000, 0.0), 40.0);
        assert_eq!(s.reference_pressure(17_999, 0.0), 25.0);
    }

    #[test]
    fn flow_modulated_polynomial() {
        let s = ReferenceStrategy::FlowModulated {
            a: 2.0,
            b: -1.0,
            c: 30.0,
        };
        assert_eq!(s.reference_pressure(0, 3.0), 2.0 * 9.0 - 3.0 + 30.0);
    }

    #[test]
    fn remote_node_measures_elsewhere() {
        let outlet = Id::from_index(1);
        let remote = Id::from_index(7);
        let s = ReferenceStrategy::RemoteNode {
            node: remote,
            pressure: 60.0,
        };
        assert_eq!(s.measurement_node(outlet), remote);
        let fo = ReferenceStrategy::FixedOutlet { pressure: 1.0 };
        assert_eq!(fo.measurement_node(outlet), outlet);
    }

    #[test]
    fn rejects_nan_parameters() {
        let s = ReferenceStrategy::FlowModulated {
            a: f64::NAN,
            b: 0.0,
            c: 0.0,
        };
        assert!(s.validate().is_err());
    }
}
