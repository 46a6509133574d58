//! pf-core: stable foundation for pressureflow.
//!
//! Contains:
//! - units (uom SI types + conversion into the internal foot/cfs system)
//! - ids (stable compact IDs for nodes, links and curves)
//! - clock (simulated-time formatting and time-of-day helpers)
//! - error (shared error types)

pub mod clock;
pub mod error;
pub mod ids;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use clock::*;
pub use error::{PfError, PfResult};
pub use ids::*;
pub use units::*;
