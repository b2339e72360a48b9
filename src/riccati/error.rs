//! Error types for the Riccati solvers.

use std::fmt;

/// Result type for Riccati equation operations.
pub type RiccatiResult<T> = Result<T, RiccatiError>;

/// Errors that can occur while solving a Riccati equation.
///
/// Validation errors (`InvalidDimension`, `NonSymmetricInput`, `SingularR`)
/// are raised before any numerical work begins. The remaining variants are
/// detected mid-solve and are terminal for the given inputs: re-running the
/// same ill-conditioned problem cannot succeed, so no retry is attempted and
/// no default solution is ever substituted for a failed one.
#[derive(Debug, Clone)]
pub enum RiccatiError {
    /// A matrix argument disagrees with the declared state/input dimensions.
    InvalidDimension {
        arg: &'static str,
        expected: String,
        got: Vec<usize>,
    },

    /// Q or R departs from symmetry beyond tolerance.
    NonSymmetricInput {
        arg: &'static str,
        max_asymmetry: f64,
    },

    /// R is not positive definite, so R⁻¹ cannot be formed.
    SingularR { context: String },

    /// The symplectic pencil has eigenvalues on or very near the unit
    /// circle; no unique stabilizing solution exists.
    NonHyperbolicPencil { context: String },

    /// The QZ iteration hit its iteration limit before reducing the pencil.
    DecompositionDidNotConverge { context: String },

    /// The leading block of the stable subspace basis is numerically
    /// singular; the stabilizing solution does not exist or the subspace
    /// was mis-selected.
    SingularSubspaceBasis { context: String },

    /// Scratch memory for an intermediate matrix could not be allocated.
    AllocationFailure { size: usize },

    /// Error from an underlying numr operation.
    Numr(String),
}

impl fmt::Display for RiccatiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { arg, expected, got } => {
                write!(f, "Invalid dimension for '{}': expected {}, got {:?}", arg, expected, got)
            }
            Self::NonSymmetricInput { arg, max_asymmetry } => {
                write!(
                    f,
                    "Matrix '{}' is not symmetric (max asymmetry {:e})",
                    arg, max_asymmetry
                )
            }
            Self::SingularR { context } => {
                write!(f, "R is not positive definite: {}", context)
            }
            Self::NonHyperbolicPencil { context } => {
                write!(f, "Pencil has eigenvalues on the unit circle: {}", context)
            }
            Self::DecompositionDidNotConverge { context } => {
                write!(f, "Schur decomposition did not converge: {}", context)
            }
            Self::SingularSubspaceBasis { context } => {
                write!(f, "Stable subspace basis is singular: {}", context)
            }
            Self::AllocationFailure { size } => {
                write!(f, "Failed to allocate {} bytes of scratch memory", size)
            }
            Self::Numr(msg) => {
                write!(f, "numr error: {}", msg)
            }
        }
    }
}

impl std::error::Error for RiccatiError {}

impl From<numr::error::Error> for RiccatiError {
    fn from(err: numr::error::Error) -> Self {
        match err {
            numr::error::Error::OutOfMemory { size } => Self::AllocationFailure { size },
            other => Self::Numr(other.to_string()),
        }
    }
}
