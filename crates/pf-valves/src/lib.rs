//! pf-valves: flow-control devices for pressurized pipe networks.
//!
//! Provides the valve entity consulted by the hydraulic solver every
//! iteration:
//! - head loss and its flow gradient for eight device kinds
//! - the ACTIVE/OPEN/CLOSED status cycle of pressure-regulating kinds
//! - the flow-coefficient curve of the dynamically actuated reducing valve
//!
//! Head-loss evaluation and status updates are total functions: gradients
//! are floored and degenerate inputs fall back to the closed-valve law.
//!
//! # Example
//!
//! ```
//! use pf_network::NetworkBuilder;
//! use pf_valves::{Valve, ValveKind, ValveStatus};
//! use pf_core::LinkId;
//!
//! let mut b = NetworkBuilder::new();
//! let up = b.add_reservoir("up", 200.0);
//! let down = b.add_junction("down", 0.0);
//! let net = b.build().unwrap();
//!
//! let mut prv = Valve::new(LinkId::from_index(0), "prv", ValveKind::Prv, up, down, 1.0, 0.0)
//!     .unwrap();
//! prv.set_init_setting(100.0);
//! prv.bind(&net).unwrap();
//! prv.initialize(true);
//!
//! // upstream head above the set point, downstream below: throttle
//! prv.update_status(1.0, 200.0, 50.0);
//! assert_eq!(prv.status, ValveStatus::Active);
//! ```

pub mod ccv;
pub mod common;
pub mod dprv;
pub mod error;
pub mod headloss;
pub mod kind;
pub mod status;
pub mod valve;

pub use ccv::ClosureCurve;
pub use common::{HeadLoss, HydraulicFloors};
pub use dprv::{DprvState, FlowCoefficientCurve};
pub use error::{ValveError, ValveResult};
pub use kind::{ValveKind, ValveType};
pub use status::ValveStatus;
pub use valve::Valve;
