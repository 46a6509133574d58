//! Project validation logic.

use std::collections::HashSet;

use crate::schema::{
    ControllerDefaultsDef, CurveDef, GainsDef, NodeDef, NodeKind, OptionsDef, Project,
    StrategyDef, ValveDef, ValveKindDef,
};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn require_finite(field: impl Into<String>, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite"))
    }
}

fn require_positive(field: impl Into<String>, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::schema::SCHEMA_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    validate_options(&project.options)?;

    let mut node_ids = HashSet::new();
    for node in &project.nodes {
        if !node_ids.insert(node.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: node.id.clone(),
                context: "nodes".to_string(),
            });
        }
        validate_node(node)?;
    }

    let mut curve_ids = HashSet::new();
    for curve in &project.curves {
        if !curve_ids.insert(curve.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: curve.id.clone(),
                context: "curves".to_string(),
            });
        }
        validate_curve(curve)?;
    }

    let mut valve_ids = HashSet::new();
    for valve in &project.valves {
        if !valve_ids.insert(valve.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: valve.id.clone(),
                context: "valves".to_string(),
            });
        }
        validate_valve(valve, &node_ids, &curve_ids)?;
    }

    Ok(())
}

fn validate_options(options: &OptionsDef) -> Result<(), ValidationError> {
    if options.hydraulic_step_s == 0 {
        return Err(invalid(
            "options.hydraulic_step_s",
            options.hydraulic_step_s,
            "must be positive",
        ));
    }
    validate_controller_defaults(&options.controller)?;

    let floors = &options.floors;
    require_positive("options.floors.min_gradient", floors.min_gradient)?;
    require_positive("options.floors.high_resistance", floors.high_resistance)?;
    require_positive("options.floors.zero_flow", floors.zero_flow)?;
    Ok(())
}

fn validate_controller_defaults(defaults: &ControllerDefaultsDef) -> Result<(), ValidationError> {
    validate_gains("options.controller.gains", &defaults.gains)?;
    let x = defaults.initial_position;
    if !(0.0..=1.0).contains(&x) {
        return Err(invalid(
            "options.controller.initial_position",
            x,
            "must lie in [0, 1]",
        ));
    }
    defaults
        .geometry
        .validate()
        .map_err(|e| invalid("options.controller.geometry", e, "invalid actuator geometry"))
}

fn validate_gains(field: &str, gains: &GainsDef) -> Result<(), ValidationError> {
    require_positive(format!("{field}.open"), gains.open)?;
    require_positive(format!("{field}.close"), gains.close)
}

fn validate_node(node: &NodeDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("node {}.{name}", node.id);
    match node.kind {
        NodeKind::Junction { elevation } => require_finite(field("elevation"), elevation),
        NodeKind::Reservoir { head } => require_finite(field("head"), head),
        NodeKind::Tank { elevation, level } => {
            require_finite(field("elevation"), elevation)?;
            if !level.is_finite() || level < 0.0 {
                return Err(invalid(field("level"), level, "must be non-negative"));
            }
            Ok(())
        }
    }
}

fn validate_curve(curve: &CurveDef) -> Result<(), ValidationError> {
    let field = format!("curve {}.points", curve.id);
    if curve.points.is_empty() {
        return Err(invalid(field, 0, "curve needs at least one point"));
    }
    for &(x, y) in &curve.points {
        require_finite(field.clone(), x)?;
        require_finite(field.clone(), y)?;
    }
    if curve.points.windows(2).any(|w| w[1].0 <= w[0].0) {
        return Err(invalid(field, "", "flows must be strictly increasing"));
    }
    Ok(())
}

fn validate_valve(
    valve: &ValveDef,
    node_ids: &HashSet<&str>,
    curve_ids: &HashSet<&str>,
) -> Result<(), ValidationError> {
    let field = |name: &str| format!("valve {}.{name}", valve.id);

    for node in [&valve.from, &valve.to] {
        if !node_ids.contains(node.as_str()) {
            return Err(ValidationError::MissingReference {
                id: node.clone(),
                context: format!("valve {} end node", valve.id),
            });
        }
    }
    if valve.from == valve.to {
        return Err(invalid(field("to"), &valve.to, "end nodes must differ"));
    }
    require_positive(field("diameter"), valve.diameter)?;
    if !valve.minor_loss.is_finite() || valve.minor_loss < 0.0 {
        return Err(invalid(
            field("minor_loss"),
            valve.minor_loss,
            "must be non-negative",
        ));
    }
    if let Some(setting) = valve.kind.setting() {
        require_finite(field("setting"), setting)?;
    }

    match &valve.kind {
        ValveKindDef::GPV { curve } if !curve_ids.contains(curve.as_str()) => {
            return Err(ValidationError::MissingReference {
                id: curve.clone(),
                context: format!("valve {} head-loss curve", valve.id),
            });
        }
        ValveKindDef::CCV { setting } if !(0.0..=1.0).contains(setting) => {
            return Err(invalid(field("setting"), setting, "opening must lie in [0, 1]"));
        }
        ValveKindDef::FCV { setting } | ValveKindDef::TCV { setting } if *setting < 0.0 => {
            return Err(invalid(field("setting"), setting, "must be non-negative"));
        }
        ValveKindDef::DPRV { strategy, gains } => {
            if let Some(gains) = gains {
                validate_gains(&field("gains"), gains)?;
            }
            validate_strategy(valve, strategy, node_ids)?;
        }
        _ => {}
    }

    if valve.status.is_some() && valve.start_status.is_some() {
        return Err(ValidationError::Unsupported {
            feature: field("start_status"),
            reason: "a valve takes either a pinned status or a start status".to_string(),
        });
    }
    if valve.start_status.is_some()
        && !matches!(
            valve.kind,
            ValveKindDef::PRV { .. } | ValveKindDef::PSV { .. } | ValveKindDef::DPRV { .. }
        )
    {
        return Err(ValidationError::Unsupported {
            feature: field("start_status"),
            reason: format!("{} valves have no status state machine", valve.kind.label()),
        });
    }
    Ok(())
}

fn validate_strategy(
    valve: &ValveDef,
    strategy: &StrategyDef,
    node_ids: &HashSet<&str>,
) -> Result<(), ValidationError> {
    let field = |name: &str| format!("valve {}.strategy.{name}", valve.id);
    match strategy {
        StrategyDef::FO { pressure } => require_finite(field("pressure"), *pressure),
        StrategyDef::TM {
            day_pressure,
            night_pressure,
            schedule,
        } => {
            require_finite(field("day_pressure"), *day_pressure)?;
            require_finite(field("night_pressure"), *night_pressure)?;
            if let Some(schedule) = schedule {
                schedule
                    .validate()
                    .map_err(|e| invalid(field("schedule"), e, "invalid day/night schedule"))?;
            }
            Ok(())
        }
        StrategyDef::FM { a, b, c } => {
            require_finite(field("a"), *a)?;
            require_finite(field("b"), *b)?;
            require_finite(field("c"), *c)
        }
        StrategyDef::RNM { node, pressure } => {
            if !node_ids.contains(node.as_str()) {
                return Err(ValidationError::MissingReference {
                    id: node.clone(),
                    context: format!("valve {} remote node", valve.id),
                });
            }
            require_finite(field("pressure"), *pressure)
        }
    }
}
