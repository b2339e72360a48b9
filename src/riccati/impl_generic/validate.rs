//! Input validation for the DARE solver.
//!
//! Runs before any pencil is assembled: shape checks against the state and
//! input dimensions, symmetry checks for the cost matrices, and a
//! positive-definiteness probe for R. All checks are cheap and deterministic
//! relative to the decomposition that follows them.

use crate::riccati::error::{RiccatiError, RiccatiResult};
use numr::algorithm::linalg::LinearAlgebraAlgorithms;
use numr::dtype::DType;
use numr::error::Error;
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Relative tolerance for the Q/R symmetry checks.
pub(crate) const SYMMETRY_TOL: f64 = 1e-9;

/// Validate (A, B, Q, R) for a DARE solve and return (n, m).
///
/// - A must be n×n, B n×m, Q n×n, R m×m, all F64.
/// - Q and R must be symmetric within [`SYMMETRY_TOL`] (relative to the
///   largest entry).
/// - R must be positive definite, probed by attempting a Cholesky
///   factorization.
///
/// Positive semi-definiteness of Q is a documented precondition, not a
/// checked one.
pub fn validate_dare_inputs<R, C>(
    client: &C,
    a: &Tensor<R>,
    b: &Tensor<R>,
    q: &Tensor<R>,
    r: &Tensor<R>,
) -> RiccatiResult<(usize, usize)>
where
    R: Runtime,
    C: LinearAlgebraAlgorithms<R> + RuntimeClient<R>,
{
    let a_shape = a.shape();
    if a_shape.len() != 2 || a_shape[0] != a_shape[1] {
        return Err(RiccatiError::InvalidDimension {
            arg: "a",
            expected: "a square n×n matrix".into(),
            got: a_shape.to_vec(),
        });
    }
    let n = a_shape[0];
    if n == 0 {
        return Err(RiccatiError::InvalidDimension {
            arg: "a",
            expected: "a non-empty n×n matrix".into(),
            got: a_shape.to_vec(),
        });
    }

    let b_shape = b.shape();
    if b_shape.len() != 2 || b_shape[0] != n || b_shape[1] == 0 {
        return Err(RiccatiError::InvalidDimension {
            arg: "b",
            expected: format!("{n}×m with m ≥ 1"),
            got: b_shape.to_vec(),
        });
    }
    let m = b_shape[1];

    if q.shape() != [n, n] {
        return Err(RiccatiError::InvalidDimension {
            arg: "q",
            expected: format!("{n}×{n}"),
            got: q.shape().to_vec(),
        });
    }
    if r.shape() != [m, m] {
        return Err(RiccatiError::InvalidDimension {
            arg: "r",
            expected: format!("{m}×{m}"),
            got: r.shape().to_vec(),
        });
    }

    for t in [a, b, q, r] {
        if t.dtype() != DType::F64 {
            return Err(Error::UnsupportedDType {
                dtype: t.dtype(),
                op: "solve_dare",
            }
            .into());
        }
    }

    check_symmetric("q", q, n)?;
    check_symmetric("r", r, m)?;

    // Positive definiteness of R via attempted Cholesky factorization.
    client.cholesky_decompose(r).map_err(|e| match e {
        Error::OutOfMemory { size } => RiccatiError::AllocationFailure { size },
        other => RiccatiError::SingularR {
            context: other.to_string(),
        },
    })?;

    Ok((n, m))
}

/// Check that an n×n matrix is symmetric within [`SYMMETRY_TOL`].
fn check_symmetric<R: Runtime>(
    arg: &'static str,
    t: &Tensor<R>,
    n: usize,
) -> RiccatiResult<()> {
    let data = t.contiguous().to_vec::<f64>();

    let mut scale = 0.0f64;
    for &v in &data {
        let a = v.abs();
        if a > scale {
            scale = a;
        }
    }

    let mut max_asymmetry = 0.0f64;
    for i in 0..n {
        for j in (i + 1)..n {
            let d = (data[i * n + j] - data[j * n + i]).abs();
            if d > max_asymmetry {
                max_asymmetry = d;
            }
        }
    }

    if max_asymmetry > SYMMETRY_TOL * scale.max(1.0) {
        return Err(RiccatiError::NonSymmetricInput { arg, max_asymmetry });
    }
    Ok(())
}
