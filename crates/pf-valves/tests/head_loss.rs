//! Head-loss dispatch through the valve entity.

use pf_controls::{PressureController, ReferenceStrategy};
use pf_core::{Id, LinkId};
use pf_network::{Network, NetworkBuilder};
use pf_valves::{
    ClosureCurve, DprvState, HeadLoss, HydraulicFloors, Valve, ValveKind, ValveStatus,
};
use proptest::prelude::*;

fn network() -> Network {
    let mut b = NetworkBuilder::new();
    b.add_reservoir("src", 300.0);
    b.add_junction("out", 10.0);
    b.add_curve("gpv", vec![(0.0, 5.0), (2.0, 25.0), (4.0, 85.0)]);
    b.build().unwrap()
}

fn valve(kind: ValveKind, setting: f64) -> Valve {
    let net = network();
    let mut v = Valve::new(
        LinkId::from_index(0),
        "v",
        kind,
        Id::from_index(0),
        Id::from_index(1),
        1.0,
        0.0,
    )
    .unwrap();
    v.set_init_setting(setting);
    v.bind(&net).unwrap();
    v.initialize(true);
    v
}

fn dprv(position: f64) -> Valve {
    let controller =
        PressureController::with_strategy(ReferenceStrategy::FixedOutlet { pressure: 40.0 })
            .unwrap();
    let mut v = valve(ValveKind::Dprv(Box::new(DprvState::new(controller))), 0.0);
    if let Some(state) = v.dprv_mut() {
        state.control.position = position;
    }
    v
}

#[test]
fn temp_closed_overrides_kind() {
    let net = network();
    let floors = HydraulicFloors::default();
    let mut v = valve(ValveKind::Fcv, 2.0);
    v.status = ValveStatus::TempClosed;
    assert_eq!(v.find_head_loss(&net, 1.0), HeadLoss::closed(1.0, &floors));
    assert_eq!(v.gradient, floors.high_resistance);
}

#[test]
fn pinned_open_uses_open_law() {
    let net = network();
    let mut v = valve(ValveKind::Tcv, 1e6);
    v.set_init_status(ValveStatus::Open);
    v.initialize(false);
    let h = v.head_loss_at(&net, 2.0);
    assert_eq!(h, HeadLoss::open(v.loss_factor(), 2.0, &v.floors));
}

#[test]
fn active_prv_contributes_nothing() {
    let net = network();
    let v = valve(ValveKind::Prv, 100.0);
    assert_eq!(v.status, ValveStatus::Active);
    assert_eq!(v.head_loss_at(&net, 3.0), HeadLoss::ZERO);
}

#[test]
fn gpv_follows_curve_with_sign() {
    let net = network();
    let v = valve(
        ValveKind::Gpv {
            curve: Id::from_index(0),
        },
        0.0,
    );
    let fwd = v.head_loss_at(&net, 1.0);
    assert!((fwd.loss - 15.0).abs() < 1e-12);
    assert_eq!(fwd.gradient, 10.0);
    let rev = v.head_loss_at(&net, -3.0);
    assert!((rev.loss + 55.0).abs() < 1e-12);
    assert_eq!(rev.gradient, 30.0);
}

#[test]
fn ccv_setting_changes_law() {
    let net = network();
    let mut v = valve(
        ValveKind::Ccv {
            curve: ClosureCurve::DischargeCoefficient,
        },
        0.5,
    );
    let half = v.head_loss_at(&net, 1.0);
    assert!(v.change_setting(0.9, true, "opening"));
    assert_eq!(v.status, ValveStatus::Open);
    let wider = v.head_loss_at(&net, 1.0);
    assert!(wider.loss < half.loss);

    assert!(v.change_setting(0.0, true, "shut"));
    assert_eq!(v.status, ValveStatus::Closed);
    assert_eq!(v.flow, 0.0);
    assert_eq!(v.head_loss_at(&net, 1.0), HeadLoss::closed(1.0, &v.floors));
}

#[test]
fn dprv_zero_position_is_closed() {
    let net = network();
    let v = dprv(0.0);
    assert_eq!(v.head_loss_at(&net, 0.5), HeadLoss::closed(0.5, &v.floors));
}

#[test]
fn ccv_reopens_after_zero_setting() {
    let net = network();
    let mut v = valve(
        ValveKind::Ccv {
            curve: ClosureCurve::ValveTravel,
        },
        0.5,
    );
    let half = v.head_loss_at(&net, 1.0);

    assert!(v.change_setting(0.0, true, "shut"));
    assert_eq!(v.status, ValveStatus::Closed);
    assert_eq!(v.head_loss_at(&net, 1.0), HeadLoss::closed(1.0, &v.floors));

    assert!(v.change_setting(0.5, true, "reopen"));
    assert_eq!(v.status, ValveStatus::Open);
    assert_eq!(v.setting, 0.5);
    let h = v.find_head_loss(&net, 1.0);
    assert_eq!(h, half);
    assert!(v.gradient < v.floors.high_resistance);
}

#[test]
fn ccv_closed_setting_change_to_zero_only_stores() {
    let mut v = valve(
        ValveKind::Ccv {
            curve: ClosureCurve::ValveTravel,
        },
        0.0,
    );
    v.status = ValveStatus::Closed;
    v.setting = 0.3;
    assert!(!v.change_setting(0.0, true, "shut again"));
    assert_eq!(v.status, ValveStatus::Closed);
    assert_eq!(v.setting, 0.0);
}

#[test]
fn unpinned_open_dprv_at_zero_position_is_closed() {
    let net = network();
    let mut v = dprv(0.0);
    v.status = ValveStatus::Open;
    assert!(!v.has_fixed_status());
    assert_eq!(v.head_loss_at(&net, 0.5), HeadLoss::closed(0.5, &v.floors));

    if let Some(state) = v.dprv_mut() {
        state.control.position = 0.3;
    }
    assert_eq!(
        v.head_loss_at(&net, 0.5),
        HeadLoss::open(v.loss_factor(), 0.5, &v.floors)
    );
}

#[test]
fn dprv_opening_reduces_loss() {
    let net = network();
    let mut previous = f64::INFINITY;
    for x in [0.05, 0.12, 0.3, 0.6, 1.0] {
        let h = dprv(x).head_loss_at(&net, 0.5);
        assert!(h.loss < previous, "position {x}");
        previous = h.loss;
    }
}

#[test]
fn dprv_head_loss_leaves_loss_factor_untouched() {
    let net = network();
    let mut v = dprv(0.4);
    let before = v.loss_factor();
    v.find_head_loss(&net, 0.8);
    assert_eq!(v.loss_factor(), before);
}

#[test]
fn init_flow_by_kind() {
    let area = std::f64::consts::PI / 4.0;
    assert_eq!(valve(ValveKind::Prv, 50.0).flow, area);
    assert_eq!(valve(ValveKind::Fcv, 1.5).flow, 1.5);
    let ccv = valve(
        ValveKind::Ccv {
            curve: ClosureCurve::ValveTravel,
        },
        0.0,
    );
    assert_eq!(ccv.flow, 1e-6);
    assert_eq!(dprv(0.2).flow, 1e-6);
}

fn open_valve(lf_coeff: f64) -> (Network, Valve) {
    let net = network();
    let mut v = Valve::new(
        LinkId::from_index(0),
        "open",
        ValveKind::Tcv,
        Id::from_index(0),
        Id::from_index(1),
        0.5,
        lf_coeff,
    )
    .unwrap();
    v.set_init_status(ValveStatus::Open);
    v.bind(&net).unwrap();
    v.initialize(true);
    (net, v)
}

proptest! {
    #[test]
    fn open_law_is_odd(k in 0.0_f64..50.0, q in -20.0_f64..20.0) {
        let (net, v) = open_valve(k);
        let fwd = v.head_loss_at(&net, q);
        let rev = v.head_loss_at(&net, -q);
        prop_assert_eq!(fwd.loss, -rev.loss);
        prop_assert_eq!(fwd.gradient, rev.gradient);
        prop_assert!(fwd.gradient >= v.floors.min_gradient);
    }

    #[test]
    fn open_law_monotone_in_magnitude(
        k in 0.0_f64..50.0,
        a in 0.0_f64..20.0,
        b in 0.0_f64..20.0,
    ) {
        let (net, v) = open_valve(k);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(v.head_loss_at(&net, lo).loss <= v.head_loss_at(&net, hi).loss);
    }

    #[test]
    fn dprv_gradient_positive(x in 0.0_f64..=1.0, q in -5.0_f64..5.0) {
        let net = network();
        let h = dprv(x).head_loss_at(&net, q);
        prop_assert!(h.gradient > 0.0);
        prop_assert!(h.loss.is_finite());
    }
}
