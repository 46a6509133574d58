//! Name lookup for configuration layers.
//!
//! Provides mappings from user-facing names to the compact IDs used by the
//! hydraulic core.

use std::collections::HashMap;

use pf_core::{CurveId, NodeId};

use crate::error::NetworkError;

/// Name → ID maps for nodes and curves.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    nodes: HashMap<String, NodeId>,
    curves: HashMap<String, CurveId>,
}

impl NameIndex {
    pub(crate) fn insert_node(&mut self, name: &str, id: NodeId) -> Result<(), NetworkError> {
        if self.nodes.insert(name.to_string(), id).is_some() {
            return Err(NetworkError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn insert_curve(&mut self, name: &str, id: CurveId) -> Result<(), NetworkError> {
        if self.curves.insert(name.to_string(), id).is_some() {
            return Err(NetworkError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.nodes.get(name).copied()
    }

    pub fn curve(&self, name: &str) -> Option<CurveId> {
        self.curves.get(name).copied()
    }

    /// Like [`NameIndex::node`] but reporting a missing name as an error.
    pub fn require_node(&self, name: &str) -> Result<NodeId, NetworkError> {
        self.node(name).ok_or_else(|| NetworkError::NameNotFound {
            name: name.to_string(),
        })
    }

    pub fn require_curve(&self, name: &str) -> Result<CurveId, NetworkError> {
        self.curve(name).ok_or_else(|| NetworkError::NameNotFound {
            name: name.to_string(),
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
