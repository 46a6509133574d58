//! Incremental network builder.

use pf_core::{CurveId, NodeId};

use crate::curve::Curve;
use crate::error::NetworkError;
use crate::indexing::NameIndex;
use crate::network::{Network, Node, NodeKind};
use crate::validate;

/// Builder for constructing a network incrementally.
///
/// Use `add_*` to build up the node and curve tables, then call `build()` to
/// validate and freeze them into a `Network`.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: Vec<Node>,
    curves: Vec<Curve>,
}

impl NetworkBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn push_node(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
        elevation: f64,
        head: f64,
    ) -> NodeId {
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            name: name.into(),
            kind,
            elevation,
            head,
        });
        id
    }

    /// Add a junction. Its head starts at its elevation (zero pressure).
    pub fn add_junction(&mut self, name: impl Into<String>, elevation: f64) -> NodeId {
        self.push_node(name, NodeKind::Junction, elevation, elevation)
    }

    /// Add a fixed-head reservoir. Elevation equals the head.
    pub fn add_reservoir(&mut self, name: impl Into<String>, head: f64) -> NodeId {
        self.push_node(name, NodeKind::Reservoir, head, head)
    }

    /// Add a tank with a bottom elevation and a water level above it.
    pub fn add_tank(&mut self, name: impl Into<String>, elevation: f64, level: f64) -> NodeId {
        self.push_node(name, NodeKind::Tank, elevation, elevation + level)
    }

    /// Set the starting head of an already added node.
    pub fn set_initial_head(&mut self, node_id: NodeId, head: f64) {
        if let Some(node) = self.nodes.get_mut(node_id.slot()) {
            node.head = head;
        }
    }

    /// Add a piecewise-linear curve and return its ID.
    pub fn add_curve(&mut self, name: impl Into<String>, points: Vec<(f64, f64)>) -> CurveId {
        let id = CurveId::from_index(self.curves.len() as u32);
        self.curves.push(Curve {
            id,
            name: name.into(),
            points,
        });
        id
    }

    /// Build and validate the network.
    pub fn build(self) -> Result<Network, NetworkError> {
        validate::validate_nodes(&self.nodes)?;
        validate::validate_curves(&self.curves)?;

        let mut names = NameIndex::default();
        for node in &self.nodes {
            names.insert_node(&node.name, node.id)?;
        }
        for curve in &self.curves {
            names.insert_curve(&curve.name, curve.id)?;
        }

        Ok(Network {
            nodes: self.nodes,
            curves: self.curves,
            names,
        })
    }
}
