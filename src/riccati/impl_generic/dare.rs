//! Discrete-time algebraic Riccati equation solver.
//!
//! A^T X A - X - A^T X B (R + B^T X B)^{-1} B^T X A + Q = 0
//!
//! Method: build the symplectic pencil (S, T), compute its generalized real
//! Schur form with numr's QZ, reorder so the n eigenvalues inside the unit
//! circle lead, and recover X from the stable right deflating subspace.
//! Orthogonal transformations carry the whole computation; no eigenvector
//! matrix is ever inverted, only the n×n leading block of the orthonormal
//! subspace basis.
//!
//! The solver is a pure function of its inputs: every intermediate (pencil,
//! Schur factors, subspace blocks) is dropped when the call returns, on
//! success and on every error path alike. There is no internal cancellation;
//! a caller that needs a deadline must run the call on its own worker and
//! cannot safely abort it mid-decomposition.

use super::ordqz::ordqz_stable_impl;
use super::pencil::build_symplectic_pencil;
use super::validate::validate_dare_inputs;
use crate::riccati::error::{RiccatiError, RiccatiResult};
use numr::algorithm::linalg::LinearAlgebraAlgorithms;
use numr::error::Error;
use numr::ops::{MatmulOps, ScalarOps, ShapeOps, TensorOps, UnaryOps, UtilityOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Solve the DARE for the unique stabilizing X.
///
/// # Arguments
/// - `a`: n×n state transition matrix
/// - `b`: n×m input matrix
/// - `q`: n×n state cost, symmetric positive semidefinite
/// - `r`: m×m input cost, symmetric positive definite
///
/// # Returns
/// X: n×n, symmetric positive semidefinite, such that the closed-loop
/// matrix A − B(R + BᵗXB)⁻¹BᵗXA has all eigenvalues inside the unit disk.
///
/// The raw U2·U1⁻¹ product carries rounding asymmetry; the result is
/// symmetrized as (X + Xᵗ)/2. The size of ‖X − Xᵗ‖ before that step is a
/// diagnostic of problem conditioning, not of solver correctness.
pub fn solve_dare_impl<R, C>(
    client: &C,
    a: &Tensor<R>,
    b: &Tensor<R>,
    q: &Tensor<R>,
    r: &Tensor<R>,
) -> RiccatiResult<Tensor<R>>
where
    R: Runtime,
    C: TensorOps<R>
        + ScalarOps<R>
        + ShapeOps<R>
        + UnaryOps<R>
        + MatmulOps<R>
        + UtilityOps<R>
        + LinearAlgebraAlgorithms<R>
        + RuntimeClient<R>,
{
    let (n, _m) = validate_dare_inputs(client, a, b, q, r)?;

    let (s, t) = build_symplectic_pencil(client, a, b, q, r)?;

    // Shapes are already validated, so a QZ failure here is the iteration
    // itself giving up (or allocation).
    let qz = client.qz_decompose(&s, &t).map_err(|e| match e {
        Error::OutOfMemory { size } => RiccatiError::AllocationFailure { size },
        other => RiccatiError::DecompositionDidNotConverge {
            context: other.to_string(),
        },
    })?;

    let ordered = ordqz_stable_impl(client, &qz.q, &qz.z, &qz.s, &qz.t)?;

    // The symplectic λ ↔ 1/λ pairing puts exactly n eigenvalues inside the
    // unit disk for a hyperbolic pencil; any other count means eigenvalues
    // sat on the circle after all.
    if ordered.num_stable != n {
        return Err(RiccatiError::NonHyperbolicPencil {
            context: format!(
                "expected {} eigenvalues inside the unit circle, found {}",
                n, ordered.num_stable
            ),
        });
    }

    // First n columns of Z span the stable deflating subspace; X = U2·U1⁻¹.
    let u1 = ordered.z.narrow(0, 0, n)?.narrow(1, 0, n)?.contiguous();
    let u2 = ordered.z.narrow(0, n, n)?.narrow(1, 0, n)?.contiguous();

    let u1_inv = LinearAlgebraAlgorithms::inverse(client, &u1).map_err(|e| match e {
        Error::OutOfMemory { size } => RiccatiError::AllocationFailure { size },
        other => RiccatiError::SingularSubspaceBasis {
            context: other.to_string(),
        },
    })?;
    let x = client.matmul(&u2, &u1_inv)?;

    // Symmetrize: X = (X + Xᵗ)/2.
    let xt = x.transpose(0, 1)?.contiguous();
    let x_sym = client.mul_scalar(&client.add(&x, &xt)?, 0.5)?;

    Ok(x_sym)
}
