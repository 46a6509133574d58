//! Compile a validated project into the runtime network and valve table.
//!
//! Conversions into the internal system:
//! - elevations and heads: project length unit to ft
//! - diameters: mm (SI) or inches (US) to ft
//! - pressures: meters of water (SI) or psi (US) to ft of head
//! - flows: L/s (SI) or cfs (US) to cfs

use pf_controls::{ActuatorGains, PressureController, ReferenceStrategy};
use pf_core::{LinkId, UnitSystem, flow_cfs, length_ft};
use pf_network::{Network, NetworkBuilder};
use pf_solver::StepClock;
use pf_valves::{DprvState, Valve, ValveKind, ValveStatus};
use uom::si::f64::Length;
use uom::si::length::{inch, millimeter};

use crate::ProjectResult;
use crate::schema::{
    GainsDef, NodeKind, OptionsDef, Project, StatusDef, StrategyDef, UnitsDef, ValveDef,
    ValveKindDef,
};
use crate::validate::validate_project;

/// Runtime form of a project.
#[derive(Debug, Clone)]
pub struct CompiledProject {
    pub network: Network,
    pub valves: Vec<Valve>,
    pub clock: StepClock,
    pub units: UnitSystem,
}

impl From<UnitsDef> for UnitSystem {
    fn from(units: UnitsDef) -> Self {
        match units {
            UnitsDef::SI => UnitSystem::Si,
            UnitsDef::US => UnitSystem::Us,
        }
    }
}

impl From<StatusDef> for ValveStatus {
    fn from(status: StatusDef) -> Self {
        match status {
            StatusDef::Open => ValveStatus::Open,
            StatusDef::Closed => ValveStatus::Closed,
        }
    }
}

fn diameter_ft(units: UnitSystem, v: f64) -> f64 {
    let d = match units {
        UnitSystem::Si => Length::new::<millimeter>(v),
        UnitSystem::Us => Length::new::<inch>(v),
    };
    length_ft(d)
}

pub fn compile_project(project: &Project) -> ProjectResult<CompiledProject> {
    validate_project(project)?;
    let units = UnitSystem::from(project.units);
    let to_ft = |v: f64| length_ft(units.length(v));

    let mut builder = NetworkBuilder::new();
    for node in &project.nodes {
        match node.kind {
            NodeKind::Junction { elevation } => {
                builder.add_junction(&node.id, to_ft(elevation));
            }
            NodeKind::Reservoir { head } => {
                builder.add_reservoir(&node.id, to_ft(head));
            }
            NodeKind::Tank { elevation, level } => {
                builder.add_tank(&node.id, to_ft(elevation), to_ft(level));
            }
        }
    }
    for curve in &project.curves {
        let points = curve
            .points
            .iter()
            .map(|&(q, h)| (flow_cfs(units.flow(q)), to_ft(h)))
            .collect();
        builder.add_curve(&curve.id, points);
    }
    let network = builder.build()?;

    let valves = project
        .valves
        .iter()
        .enumerate()
        .map(|(index, def)| {
            compile_valve(
                LinkId::from_index(index as u32),
                def,
                &project.options,
                units,
                &network,
            )
        })
        .collect::<ProjectResult<Vec<_>>>()?;

    Ok(CompiledProject {
        network,
        valves,
        clock: StepClock::new(project.options.hydraulic_step_s, project.options.duration_s),
        units,
    })
}

fn compile_valve(
    id: LinkId,
    def: &ValveDef,
    options: &OptionsDef,
    units: UnitSystem,
    network: &Network,
) -> ProjectResult<Valve> {
    let names = network.names();
    let from = names.require_node(&def.from)?;
    let to = names.require_node(&def.to)?;
    let head = |p: f64| units.pressure_to_head(p);
    let flow = |q: f64| flow_cfs(units.flow(q));

    let (kind, setting) = match &def.kind {
        ValveKindDef::PRV { setting } => (ValveKind::Prv, head(*setting)),
        ValveKindDef::PSV { setting } => (ValveKind::Psv, head(*setting)),
        ValveKindDef::PBV { setting } => (ValveKind::Pbv, head(*setting)),
        ValveKindDef::FCV { setting } => (ValveKind::Fcv, flow(*setting)),
        ValveKindDef::TCV { setting } => (ValveKind::Tcv, *setting),
        ValveKindDef::CCV { setting } => (
            ValveKind::Ccv {
                curve: options.closure_curve,
            },
            *setting,
        ),
        ValveKindDef::GPV { curve } => (
            ValveKind::Gpv {
                curve: names.require_curve(curve)?,
            },
            0.0,
        ),
        ValveKindDef::DPRV { strategy, gains } => {
            let strategy = compile_strategy(strategy, units, network)?;
            let gains = gains.unwrap_or(options.controller.gains);
            let controller = PressureController::new(
                strategy,
                compile_gains(gains)?,
                options.controller.geometry,
                options.controller.initial_position,
            )?;
            (ValveKind::Dprv(Box::new(DprvState::new(controller))), 0.0)
        }
    };

    let mut valve = Valve::new(
        id,
        &def.id,
        kind,
        from,
        to,
        diameter_ft(units, def.diameter),
        def.minor_loss,
    )?
    .with_floors(options.floors);
    valve.set_init_setting(setting);
    if let Some(status) = def.status {
        valve.set_init_status(status.into());
    } else if let Some(status) = def.start_status {
        valve.set_start_status(status.into());
    }
    valve.bind(network)?;
    valve.initialize(true);
    Ok(valve)
}

fn compile_gains(gains: GainsDef) -> ProjectResult<ActuatorGains> {
    Ok(ActuatorGains::new(gains.open, gains.close)?)
}

/// Strategy in internal units.
///
/// Flow-modulated coefficients are rescaled so the law can be evaluated on
/// cfs and yield ft of head: with `u` the cfs-to-project flow factor and `p`
/// the head-to-project pressure factor, `a' = a·u²/p`, `b' = b·u/p`, `c' = c/p`.
fn compile_strategy(
    strategy: &StrategyDef,
    units: UnitSystem,
    network: &Network,
) -> ProjectResult<ReferenceStrategy> {
    let head = |p: f64| units.pressure_to_head(p);
    Ok(match strategy {
        StrategyDef::FO { pressure } => ReferenceStrategy::FixedOutlet {
            pressure: head(*pressure),
        },
        StrategyDef::TM {
            day_pressure,
            night_pressure,
            schedule,
        } => ReferenceStrategy::TimeModulated {
            day_pressure: head(*day_pressure),
            night_pressure: head(*night_pressure),
            schedule: schedule.clone().unwrap_or_default(),
        },
        StrategyDef::FM { a, b, c } => {
            let u = units.flow_factor();
            let p = units.pressure_factor();
            ReferenceStrategy::FlowModulated {
                a: a * u * u / p,
                b: b * u / p,
                c: c / p,
            }
        }
        StrategyDef::RNM { node, pressure } => ReferenceStrategy::RemoteNode {
            node: network.names().require_node(node)?,
            pressure: head(*pressure),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diameters_follow_unit_system() {
        assert!((diameter_ft(UnitSystem::Us, 12.0) - 1.0).abs() < 1e-12);
        assert!((diameter_ft(UnitSystem::Si, 304.8) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fm_coefficients_reproduce_project_units() {
        let net = NetworkBuilder::new().build().unwrap();
        let strategy = StrategyDef::FM {
            a: 0.001,
            b: 0.05,
            c: 25.0,
        };
        let units = UnitSystem::Si;
        let compiled = compile_strategy(&strategy, units, &net).unwrap();

        // 40 L/s in project units
        let q_user = 40.0;
        let expected_m = 0.001 * q_user * q_user + 0.05 * q_user + 25.0;
        let q = flow_cfs(units.flow(q_user));
        let head_ft = compiled.reference_pressure(0, q);
        assert!((head_ft - units.pressure_to_head(expected_m)).abs() < 1e-9);
    }
}
