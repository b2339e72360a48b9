//! Steady-state Kalman gain via the dual Riccati equation.

use crate::riccati::impl_generic::solve_dare_impl;
use crate::statespace::error::{StateSpaceError, StateSpaceResult};
use numr::algorithm::linalg::LinearAlgebraAlgorithms;
use numr::ops::{MatmulOps, ScalarOps, ShapeOps, TensorOps, UnaryOps, UtilityOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Compute the steady-state Kalman gain K = P·Cᵗ·(C·P·Cᵗ + R)⁻¹.
///
/// P solves the dual DARE with (Aᵗ, Cᵗ, Q, R): filtering is the dual of
/// control, so the same stabilizing solution yields the steady-state
/// a-priori error covariance.
pub fn kalman_gain_impl<R, C>(
    client: &C,
    a: &Tensor<R>,
    c: &Tensor<R>,
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
    let a_shape = a.shape();
    if a_shape.len() != 2 || a_shape[0] != a_shape[1] {
        return Err(StateSpaceError::InvalidDimension {
            arg: "a",
            expected: "a square n×n matrix".into(),
            got: a_shape.to_vec(),
        });
    }
    let n = a_shape[0];
    let c_shape = c.shape();
    if c_shape.len() != 2 || c_shape[1] != n || c_shape[0] == 0 {
        return Err(StateSpaceError::InvalidDimension {
            arg: "c",
            expected: format!("p×{n} with p ≥ 1"),
            got: c_shape.to_vec(),
        });
    }

    let at = a.transpose(0, 1)?.contiguous();
    let ct = c.transpose(0, 1)?.contiguous();

    let p = solve_dare_impl(client, &at, &ct, q, r)?;

    let pct = client.matmul(&p, &ct)?;
    let s = client.add(&client.matmul(c, &pct)?, r)?;
    let s_inv = LinearAlgebraAlgorithms::inverse(client, &s)?;
    let k = client.matmul(&pct, &s_inv)?;
    Ok(k)
}
