//! Error types for state-space synthesis operations.

use crate::riccati::error::RiccatiError;
use std::fmt;

/// Result type for state-space synthesis operations.
pub type StateSpaceResult<T> = Result<T, StateSpaceError>;

/// Errors that can occur during gain synthesis.
#[derive(Debug, Clone)]
pub enum StateSpaceError {
    /// The underlying Riccati solve failed.
    Riccati(RiccatiError),

    /// A matrix argument has the wrong shape.
    InvalidDimension {
        arg: &'static str,
        expected: String,
        got: Vec<usize>,
    },

    /// A Bryson cost maximum is zero, so its weight would be infinite.
    ZeroCostMaximum { index: usize },

    /// Error from an underlying numr operation.
    Numr(String),
}

impl fmt::Display for StateSpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Riccati(err) => write!(f, "Riccati solve failed: {}", err),
            Self::InvalidDimension { arg, expected, got } => {
                write!(f, "Invalid dimension for '{}': expected {}, got {:?}", arg, expected, got)
            }
            Self::ZeroCostMaximum { index } => {
                write!(f, "Cost maximum at index {} is zero", index)
            }
            Self::Numr(msg) => write!(f, "numr error: {}", msg),
        }
    }
}

impl std::error::Error for StateSpaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Riccati(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RiccatiError> for StateSpaceError {
    fn from(err: RiccatiError) -> Self {
        Self::Riccati(err)
    }
}

impl From<numr::error::Error> for StateSpaceError {
    fn from(err: numr::error::Error) -> Self {
        Self::Numr(err.to_string())
    }
}
