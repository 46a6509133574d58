//! Error types for valve setup.

use pf_controls::ControlError;
use pf_core::PfError;
use pf_network::NetworkError;
use thiserror::Error;

/// Errors raised while constructing or wiring a valve.
///
/// Per-iteration evaluation never fails; these only surface at setup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValveError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Valve '{valve}' references unknown node {node}")]
    UnknownNode { valve: String, node: u32 },

    #[error("Valve '{valve}' references unknown curve {curve}")]
    UnknownCurve { valve: String, curve: u32 },

    #[error("Controller error: {0}")]
    Control(#[from] ControlError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

pub type ValveResult<T> = Result<T, ValveError>;

impl From<ValveError> for PfError {
    fn from(e: ValveError) -> Self {
        match e {
            ValveError::InvalidArg { what } => PfError::InvalidArg { what },
            ValveError::UnknownNode { .. } => PfError::InvalidArg {
                what: "unknown valve end node",
            },
            ValveError::UnknownCurve { .. } => PfError::InvalidArg {
                what: "unknown valve curve",
            },
            ValveError::Control(_) => PfError::InvalidArg {
                what: "controller configuration",
            },
            ValveError::Network(e) => e.into(),
        }
    }
}
