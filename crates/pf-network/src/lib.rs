//! pf-network: node table and curve library for pressureflow.
//!
//! Provides:
//! - Nodes (junctions, reservoirs, tanks) holding elevation and the current head
//! - Piecewise-linear curves consulted by general-purpose valves
//! - Incremental network builder with validation
//! - Name lookup for configuration layers
//!
//! Valves never own nodes. They hold `NodeId`s into this table and only read
//! head and elevation from it.
//!
//! # Example
//!
//! ```
//! use pf_network::NetworkBuilder;
//!
//! let mut builder = NetworkBuilder::new();
//! let src = builder.add_reservoir("Source", 150.0);
//! let out = builder.add_junction("Outlet", 20.0);
//! let net = builder.build().unwrap();
//!
//! assert_eq!(net.nodes().len(), 2);
//! assert_eq!(net.node(src).unwrap().head, 150.0);
//! assert_eq!(net.pressure(out), Some(net.node(out).unwrap().head - 20.0));
//! ```

pub mod builder;
pub mod curve;
pub mod error;
pub mod indexing;
pub mod network;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::NetworkBuilder;
pub use curve::{Curve, CurveSegment};
pub use error::NetworkError;
pub use indexing::NameIndex;
pub use network::{Network, Node, NodeKind};
