//! Infinite-horizon discrete LQR gain.

use crate::riccati::impl_generic::solve_dare_impl;
use crate::statespace::error::StateSpaceResult;
use numr::algorithm::linalg::LinearAlgebraAlgorithms;
use numr::ops::{MatmulOps, ScalarOps, ShapeOps, TensorOps, UnaryOps, UtilityOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Compute the LQR feedback gain K = (R + BᵗXB)⁻¹·BᵗXA.
///
/// X is the stabilizing DARE solution for (A, B, Q, R); the m×m gram
/// matrix R + BᵗXB is positive definite whenever R is, so the gain comes
/// out of a single linear solve.
pub fn lqr_gain_impl<R, C>(
    client: &C,
    a: &Tensor<R>,
    b: &Tensor<R>,
    q: &Tensor<R>,
    r: &Tensor<R>,
) -> StateSpaceResult<Tensor<R>>
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
    let x = solve_dare_impl(client, a, b, q, r)?;

    let bt = b.transpose(0, 1)?.contiguous();
    let xb = client.matmul(&x, b)?;
    let gram = client.add(r, &client.matmul(&bt, &xb)?)?;
    let btxa = client.matmul(&bt, &client.matmul(&x, a)?)?;

    let k = LinearAlgebraAlgorithms::solve(client, &gram, &btxa)?;
    Ok(k)
}
