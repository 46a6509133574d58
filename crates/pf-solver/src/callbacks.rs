//! Valve evaluations a hydraulic solver performs every trial.
//!
//! Per trial the solver:
//! 1. asks each valve for head loss and gradient at its trial flow
//! 2. solves its linearized system for heads and flows
//! 3. writes the new heads into the network
//! 4. asks each valve to update its status from the new flow and end heads

use pf_core::NodeId;
use pf_network::Network;
use pf_valves::{HeadLoss, Valve, ValveKind, ValveStatus};

/// Store trial flow `q` on the valve and evaluate its head loss.
pub fn valve_head_loss(valve: &mut Valve, network: &Network, q: f64) -> HeadLoss {
    valve.flow = q;
    valve.find_head_loss(network, q)
}

/// Run the status rules of one valve against current network heads.
pub fn update_status(valve: &mut Valve, network: &Network) -> bool {
    let (Some(h1), Some(h2)) = (network.head(valve.from), network.head(valve.to)) else {
        return false;
    };
    valve.update_status(valve.flow, h1, h2)
}

/// Run the status rules of every valve; returns the number of changes.
pub fn update_statuses(network: &Network, valves: &mut [Valve]) -> usize {
    valves
        .iter_mut()
        .map(|v| update_status(v, network))
        .filter(|changed| *changed)
        .count()
}

/// A node head the solver must hold fixed for an active valve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadConstraint {
    pub node: NodeId,
    pub head: f64,
}

/// Head constraint of an active PRV (downstream) or PSV (upstream).
///
/// Other kinds, and PRV/PSV in any other status, act through head loss only.
pub fn head_constraint(valve: &Valve) -> Option<HeadConstraint> {
    if valve.status != ValveStatus::Active {
        return None;
    }
    let node = match valve.kind {
        ValveKind::Prv => valve.to,
        ValveKind::Psv => valve.from,
        _ => return None,
    };
    valve.head_set(valve.flow).map(|head| HeadConstraint { node, head })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::{Id, LinkId};
    use pf_network::NetworkBuilder;

    fn setup(kind: ValveKind) -> (Network, Valve) {
        let mut b = NetworkBuilder::new();
        let a = b.add_reservoir("a", 200.0);
        let j = b.add_junction("j", 10.0);
        let net = b.build().unwrap();
        let mut v = Valve::new(LinkId::from_index(0), "v", kind, a, j, 1.0, 0.0).unwrap();
        v.set_init_setting(50.0);
        v.bind(&net).unwrap();
        v.initialize(true);
        (net, v)
    }

    #[test]
    fn active_prv_holds_downstream_head() {
        let (_, v) = setup(ValveKind::Prv);
        assert_eq!(
            head_constraint(&v),
            Some(HeadConstraint {
                node: Id::from_index(1),
                head: 60.0,
            })
        );
    }

    #[test]
    fn active_psv_holds_upstream_head() {
        let (_, v) = setup(ValveKind::Psv);
        let c = head_constraint(&v).unwrap();
        assert_eq!(c.node, Id::from_index(0));
        assert_eq!(c.head, 250.0);
    }

    #[test]
    fn no_constraint_when_open() {
        let (_, mut v) = setup(ValveKind::Prv);
        v.status = ValveStatus::Open;
        assert_eq!(head_constraint(&v), None);
        let (_, t) = setup(ValveKind::Tcv);
        assert_eq!(head_constraint(&t), None);
    }

    #[test]
    fn status_update_reads_network_heads() {
        let (mut net, mut v) = setup(ValveKind::Prv);
        // upstream below the set point: the valve cannot throttle
        net.set_head(Id::from_index(0), 55.0);
        net.set_head(Id::from_index(1), 20.0);
        valve_head_loss(&mut v, &net, 1.0);
        assert!(update_status(&mut v, &net));
        assert_eq!(v.status, ValveStatus::Open);
        let mut valves = vec![v];
        assert_eq!(update_statuses(&net, &mut valves), 0);
    }
}
