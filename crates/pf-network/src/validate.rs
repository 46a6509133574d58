//! Network validation logic.

use crate::curve::Curve;
use crate::error::NetworkError;
use crate::network::Node;

/// Every node must carry finite elevation and head.
pub(crate) fn validate_nodes(nodes: &[Node]) -> Result<(), NetworkError> {
    for node in nodes {
        if !node.elevation.is_finite() {
            return Err(NetworkError::NonFiniteNode {
                name: node.name.clone(),
                what: "elevation",
            });
        }
        if !node.head.is_finite() {
            return Err(NetworkError::NonFiniteNode {
                name: node.name.clone(),
                what: "head",
            });
        }
    }
    Ok(())
}

/// Curves need at least one point and strictly increasing x values.
pub(crate) fn validate_curves(curves: &[Curve]) -> Result<(), NetworkError> {
    for curve in curves {
        if curve.points.is_empty() {
            return Err(NetworkError::MalformedCurve {
                name: curve.name.clone(),
                reason: "no points",
            });
        }
        if curve
            .points
            .iter()
            .any(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(NetworkError::MalformedCurve {
                name: curve.name.clone(),
                reason: "non-finite point",
            });
        }
        if curve.points.windows(2).any(|w| w[1].0 <= w[0].0) {
            return Err(NetworkError::MalformedCurve {
                name: curve.name.clone(),
                reason: "x values must be strictly increasing",
            });
        }
    }
    Ok(())
}
