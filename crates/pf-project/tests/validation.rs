use pf_controls::{DayNightSchedule, NightWindow};
use pf_project::schema::*;
use pf_project::{ValidationError, validate_project};

fn project_with(valves: Vec<ValveDef>) -> Project {
    Project {
        version: 1,
        name: "checks".to_string(),
        units: UnitsDef::SI,
        options: OptionsDef::default(),
        nodes: vec![
            NodeDef {
                id: "a".to_string(),
                kind: NodeKind::Reservoir { head: 50.0 },
            },
            NodeDef {
                id: "b".to_string(),
                kind: NodeKind::Junction { elevation: 0.0 },
            },
        ],
        curves: vec![],
        valves,
    }
}

fn valve(id: &str, kind: ValveKindDef) -> ValveDef {
    ValveDef {
        id: id.to_string(),
        from: "a".to_string(),
        to: "b".to_string(),
        diameter: 150.0,
        minor_loss: 0.0,
        kind,
        status: None,
        start_status: None,
    }
}

fn fo(pressure: f64) -> ValveKindDef {
    ValveKindDef::DPRV {
        strategy: StrategyDef::FO { pressure },
        gains: None,
    }
}

#[test]
fn duplicate_valve_ids() {
    let p = project_with(vec![valve("v", fo(30.0)), valve("v", fo(20.0))]);
    match validate_project(&p) {
        Err(ValidationError::DuplicateId { id, context }) => {
            assert_eq!(id, "v");
            assert_eq!(context, "valves");
        }
        other => panic!("expected duplicate id, got {other:?}"),
    }
}

#[test]
fn duplicate_node_ids() {
    let mut p = project_with(vec![]);
    p.nodes.push(NodeDef {
        id: "a".to_string(),
        kind: NodeKind::Junction { elevation: 1.0 },
    });
    assert!(matches!(
        validate_project(&p),
        Err(ValidationError::DuplicateId { .. })
    ));
}

#[test]
fn unknown_end_node() {
    let mut v = valve("v", ValveKindDef::PRV { setting: 20.0 });
    v.to = "c".to_string();
    assert!(matches!(
        validate_project(&project_with(vec![v])),
        Err(ValidationError::MissingReference { id, .. }) if id == "c"
    ));
}

#[test]
fn unknown_gpv_curve() {
    let v = valve(
        "g",
        ValveKindDef::GPV {
            curve: "missing".to_string(),
        },
    );
    assert!(matches!(
        validate_project(&project_with(vec![v])),
        Err(ValidationError::MissingReference { id, .. }) if id == "missing"
    ));
}

#[test]
fn unknown_remote_node() {
    let v = valve(
        "r",
        ValveKindDef::DPRV {
            strategy: StrategyDef::RNM {
                node: "far".to_string(),
                pressure: 15.0,
            },
            gains: None,
        },
    );
    assert!(matches!(
        validate_project(&project_with(vec![v])),
        Err(ValidationError::MissingReference { id, .. }) if id == "far"
    ));
}

#[test]
fn non_positive_diameter() {
    let mut v = valve("v", ValveKindDef::TCV { setting: 2.0 });
    v.diameter = 0.0;
    assert!(matches!(
        validate_project(&project_with(vec![v])),
        Err(ValidationError::InvalidValue { .. })
    ));
}

#[test]
fn non_positive_gains() {
    let v = valve(
        "v",
        ValveKindDef::DPRV {
            strategy: StrategyDef::FO { pressure: 30.0 },
            gains: Some(GainsDef {
                open: 1e-6,
                close: 0.0,
            }),
        },
    );
    assert!(validate_project(&project_with(vec![v])).is_err());

    let mut p = project_with(vec![]);
    p.options.controller.gains.open = -1.0;
    assert!(validate_project(&p).is_err());
}

#[test]
fn ccv_setting_outside_unit_interval() {
    let v = valve("c", ValveKindDef::CCV { setting: 1.2 });
    assert!(matches!(
        validate_project(&project_with(vec![v])),
        Err(ValidationError::InvalidValue { .. })
    ));
    let ok = valve("c", ValveKindDef::CCV { setting: 0.0 });
    validate_project(&project_with(vec![ok])).unwrap();
}

#[test]
fn overlapping_night_windows() {
    let schedule = DayNightSchedule {
        period_s: 86_400,
        night: vec![
            NightWindow {
                start_s: 0,
                end_s: 7_200,
            },
            NightWindow {
                start_s: 3_600,
                end_s: 10_800,
            },
        ],
    };
    let v = valve(
        "t",
        ValveKindDef::DPRV {
            strategy: StrategyDef::TM {
                day_pressure: 35.0,
                night_pressure: 20.0,
                schedule: Some(schedule),
            },
            gains: None,
        },
    );
    assert!(validate_project(&project_with(vec![v])).is_err());
}

#[test]
fn night_window_beyond_period() {
    let schedule = DayNightSchedule {
        period_s: 86_400,
        night: vec![NightWindow {
            start_s: 80_000,
            end_s: 90_000,
        }],
    };
    let v = valve(
        "t",
        ValveKindDef::DPRV {
            strategy: StrategyDef::TM {
                day_pressure: 35.0,
                night_pressure: 20.0,
                schedule: Some(schedule),
            },
            gains: None,
        },
    );
    assert!(validate_project(&project_with(vec![v])).is_err());
}

#[test]
fn start_status_needs_state_machine() {
    let mut v = valve("f", ValveKindDef::FCV { setting: 10.0 });
    v.start_status = Some(StatusDef::Closed);
    assert!(matches!(
        validate_project(&project_with(vec![v])),
        Err(ValidationError::Unsupported { .. })
    ));
}

#[test]
fn pinned_and_start_status_conflict() {
    let mut v = valve("p", ValveKindDef::PRV { setting: 20.0 });
    v.status = Some(StatusDef::Open);
    v.start_status = Some(StatusDef::Closed);
    assert!(matches!(
        validate_project(&project_with(vec![v])),
        Err(ValidationError::Unsupported { .. })
    ));
}

#[test]
fn future_version_rejected() {
    let mut p = project_with(vec![]);
    p.version = pf_project::SCHEMA_VERSION + 1;
    assert!(matches!(
        validate_project(&p),
        Err(ValidationError::UnsupportedVersion { .. })
    ));
}
