//! Network-specific error types.

use pf_core::PfError;

/// Network construction and validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Two nodes or two curves share a name.
    DuplicateName { name: String },

    /// A curve has no points or its x values are not strictly increasing.
    MalformedCurve { name: String, reason: &'static str },

    /// A node value is NaN or infinite.
    NonFiniteNode { name: String, what: &'static str },

    /// Name not found in the index.
    NameNotFound { name: String },
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::DuplicateName { name } => write!(f, "Duplicate name: {}", name),
            NetworkError::MalformedCurve { name, reason } => {
                write!(f, "Curve {} is malformed: {}", name, reason)
            }
            NetworkError::NonFiniteNode { name, what } => {
                write!(f, "Node {} has a non-finite {}", name, what)
            }
            NetworkError::NameNotFound { name } => write!(f, "{} not found in name index", name),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<NetworkError> for PfError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::NameNotFound { .. } => PfError::InvalidArg { what: "name" },
            _ => PfError::Invariant {
                what: "network validation",
            },
        }
    }
}
