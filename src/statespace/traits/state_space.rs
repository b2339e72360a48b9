//! State-space gain synthesis traits.

use crate::statespace::error::StateSpaceResult;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Gain synthesis for discrete-time linear state-space systems.
///
/// Both gains come from the stabilizing DARE solution; all preconditions of
/// the Riccati solver (symmetric PSD Q, symmetric PD R, F64 matrices) apply
/// here as well.
pub trait StateSpaceAlgorithms<R: Runtime> {
    /// Infinite-horizon discrete LQR gain.
    ///
    /// Solves the DARE for X and returns K = (R + BᵗXB)⁻¹·BᵗXA, computed
    /// with a linear solve rather than an explicit inverse. The control law
    /// u = −K·x places all closed-loop eigenvalues of A − B·K inside the
    /// unit disk.
    ///
    /// # Arguments
    /// - `a`: n×n state transition matrix
    /// - `b`: n×m input matrix
    /// - `q`: n×n state cost (symmetric positive semidefinite)
    /// - `r`: m×m input cost (symmetric positive definite)
    ///
    /// # Returns
    /// K: m×n feedback gain
    fn lqr_gain(
        &self,
        a: &Tensor<R>,
        b: &Tensor<R>,
        q: &Tensor<R>,
        r: &Tensor<R>,
    ) -> StateSpaceResult<Tensor<R>>;

    /// Steady-state Kalman gain for a discrete-time observer.
    ///
    /// Solves the dual DARE P = dare(Aᵗ, Cᵗ, Q, R) for the steady-state
    /// error covariance and returns K = P·Cᵗ·(C·P·Cᵗ + R)⁻¹.
    ///
    /// # Arguments
    /// - `a`: n×n state transition matrix
    /// - `c`: p×n measurement matrix
    /// - `q`: n×n process noise covariance (symmetric positive semidefinite)
    /// - `r`: p×p measurement noise covariance (symmetric positive definite)
    ///
    /// # Returns
    /// K: n×p observer gain
    fn kalman_gain(
        &self,
        a: &Tensor<R>,
        c: &Tensor<R>,
        q: &Tensor<R>,
        r: &Tensor<R>,
    ) -> StateSpaceResult<Tensor<R>>;

    /// Bryson's-rule diagonal cost matrix.
    ///
    /// Given the maximum acceptable magnitude of each state (or input),
    /// returns diag(weight / maximaᵢ²). A zero maximum is rejected.
    ///
    /// # Arguments
    /// - `maxima`: length-k vector of per-component maxima
    /// - `weight`: common scale applied to every diagonal entry
    ///
    /// # Returns
    /// k×k diagonal cost matrix
    fn bryson_cost(&self, maxima: &Tensor<R>, weight: f64) -> StateSpaceResult<Tensor<R>>;
}
