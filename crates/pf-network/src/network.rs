//! Core network data structures.

use pf_core::{CurveId, NodeId};

use crate::curve::Curve;
use crate::indexing::NameIndex;

/// What a node represents hydraulically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Demand junction; head is a solver unknown.
    Junction,
    /// Fixed-head source.
    Reservoir,
    /// Storage with a level; head is fixed within one hydraulic instant.
    Tank,
}

/// A node in the pipe network.
///
/// `head` is written by the hydraulic solver and only read by valves and the
/// pressure controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// Ground elevation (ft)
    pub elevation: f64,
    /// Current hydraulic head (ft)
    pub head: f64,
}

impl Node {
    /// Pressure head above ground (ft).
    pub fn pressure(&self) -> f64 {
        self.head - self.elevation
    }

    /// True for nodes whose head the solver does not compute.
    pub fn is_fixed(&self) -> bool {
        matches!(self.kind, NodeKind::Reservoir | NodeKind::Tank)
    }
}

/// The node and curve tables a valve population refers into.
///
/// Built once by [`crate::NetworkBuilder`]; afterwards only node heads change.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) nodes: Vec<Node>,
    pub(crate) curves: Vec<Curve>,
    pub(crate) names: NameIndex,
}

impl Network {
    /// Return all nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.slot())
    }

    /// Mutable node access for the solver collaborator.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.slot())
    }

    /// Get a curve by ID (returns None if ID out of bounds).
    pub fn curve(&self, id: CurveId) -> Option<&Curve> {
        self.curves.get(id.slot())
    }

    pub fn head(&self, id: NodeId) -> Option<f64> {
        self.node(id).map(|n| n.head)
    }

    pub fn elevation(&self, id: NodeId) -> Option<f64> {
        self.node(id).map(|n| n.elevation)
    }

    /// Pressure head (head minus elevation) at a node.
    pub fn pressure(&self, id: NodeId) -> Option<f64> {
        self.node(id).map(Node::pressure)
    }

    /// Overwrite a node head. Returns false if the node doesn't exist.
    pub fn set_head(&mut self, id: NodeId, head: f64) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.head = head;
                true
            }
            None => false,
        }
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        id.slot() < self.nodes.len()
    }

    pub fn contains_curve(&self, id: CurveId) -> bool {
        id.slot() < self.curves.len()
    }

    /// Look up a node by name.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.names.node(name)
    }

    /// Look up a curve by name.
    pub fn find_curve(&self, name: &str) -> Option<CurveId> {
        self.names.curve(name)
    }

    pub fn names(&self) -> &NameIndex {
        &self.names
    }
}
