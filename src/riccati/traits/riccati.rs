//! Riccati equation solver trait.

use crate::riccati::error::RiccatiResult;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Algorithms for solving the discrete-time algebraic Riccati equation.
///
/// All matrices must be F64. One call is one independent, synchronous,
/// CPU-bound solve: no state is shared between calls, so concurrent solves
/// on separate threads are safe as long as each uses its own tensors.
pub trait RiccatiAlgorithms<R: Runtime> {
    /// Solve the discrete-time algebraic Riccati equation (DARE).
    ///
    /// A^T X A - X - A^T X B (R + B^T X B)^{-1} B^T X A + Q = 0
    ///
    /// Uses the generalized Schur (QZ) decomposition of the symplectic
    /// pencil with stable-first eigenvalue reordering.
    ///
    /// # Arguments
    /// - `a`: n×n state transition matrix
    /// - `b`: n×m input matrix
    /// - `q`: n×n state cost (symmetric positive semidefinite)
    /// - `r`: m×m input cost (symmetric positive definite)
    ///
    /// # Returns
    /// X: n×n symmetric positive semidefinite stabilizing solution
    fn solve_dare(
        &self,
        a: &Tensor<R>,
        b: &Tensor<R>,
        q: &Tensor<R>,
        r: &Tensor<R>,
    ) -> RiccatiResult<Tensor<R>>;
}
