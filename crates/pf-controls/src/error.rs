//! Error types for control system operations.

use thiserror::Error;

/// Result type for control system operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while configuring a pressure controller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Day/night schedule is inconsistent.
    #[error("Invalid schedule: {what}")]
    InvalidSchedule { what: String },

    /// Strategy label not recognized.
    #[error("Unknown reference strategy: {label}")]
    UnknownStrategy { label: String },
}
