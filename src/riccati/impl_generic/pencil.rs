//! Symplectic pencil assembly for the DARE.
//!
//! The DARE's stable dynamics are encoded in the 2n×2n generalized
//! eigenproblem S·v = λ·T·v with
//!
//! ```text
//! S = [[ A, 0 ],      T = [[ I, B·R⁻¹·Bᵗ ],
//!      [ -Q, I ]]          [ 0, Aᵗ       ]]
//! ```
//!
//! The pencil pairs each eigenvalue λ with 1/λ, so a hyperbolic problem has
//! exactly n eigenvalues inside the unit disk. Unlike the single symplectic
//! matrix T⁻¹·S, the pencil form never inverts A, so singular state
//! transition matrices (e.g. systems with delays) are handled directly.

use crate::riccati::error::RiccatiResult;
use numr::algorithm::linalg::LinearAlgebraAlgorithms;
use numr::ops::{MatmulOps, ShapeOps, TensorOps, UnaryOps, UtilityOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Build the symplectic pencil (S, T) from validated system matrices.
///
/// Requires R⁻¹ to exist, which the validator guarantees. Returns two
/// 2n×2n tensors consumed opaquely by the decomposition engine.
pub fn build_symplectic_pencil<R, C>(
    client: &C,
    a: &Tensor<R>,
    b: &Tensor<R>,
    q: &Tensor<R>,
    r: &Tensor<R>,
) -> RiccatiResult<(Tensor<R>, Tensor<R>)>
where
    R: Runtime,
    C: TensorOps<R>
        + ShapeOps<R>
        + UnaryOps<R>
        + MatmulOps<R>
        + UtilityOps<R>
        + LinearAlgebraAlgorithms<R>
        + RuntimeClient<R>,
{
    let n = a.shape()[0];
    let dtype = a.dtype();

    // G = B R⁻¹ Bᵗ
    let r_inv = LinearAlgebraAlgorithms::inverse(client, r)?;
    let bt = b.transpose(0, 1)?.contiguous();
    let g = client.matmul(&client.matmul(b, &r_inv)?, &bt)?;

    let eye = client.eye(n, None, dtype)?;
    let zeros = Tensor::zeros(&[n, n], dtype, client.device());
    let at = a.transpose(0, 1)?.contiguous();
    let neg_q = client.neg(q)?;

    let s_top = client.cat(&[a, &zeros], 1)?;
    let s_bottom = client.cat(&[&neg_q, &eye], 1)?;
    let s = client.cat(&[&s_top, &s_bottom], 0)?;

    let t_top = client.cat(&[&eye, &g], 1)?;
    let t_bottom = client.cat(&[&zeros, &at], 1)?;
    let t = client.cat(&[&t_top, &t_bottom], 0)?;

    Ok((s, t))
}
