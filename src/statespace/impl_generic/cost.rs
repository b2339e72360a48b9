//! Bryson's-rule cost matrices.

use crate::statespace::error::{StateSpaceError, StateSpaceResult};
use numr::dtype::DType;
use numr::error::Error;
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Build diag(weight / maximaᵢ²) from a vector of per-component maxima.
///
/// Bryson's rule: weighting each state or input by the inverse square of
/// its largest acceptable magnitude makes the quadratic cost terms
/// dimensionless and comparably scaled.
pub fn bryson_cost_impl<R, C>(
    _client: &C,
    maxima: &Tensor<R>,
    weight: f64,
) -> StateSpaceResult<Tensor<R>>
where
    R: Runtime,
    C: RuntimeClient<R>,
{
    let shape = maxima.shape();
    if shape.len() != 1 || shape[0] == 0 {
        return Err(StateSpaceError::InvalidDimension {
            arg: "maxima",
            expected: "a non-empty 1-D vector".into(),
            got: shape.to_vec(),
        });
    }
    if maxima.dtype() != DType::F64 {
        return Err(Error::UnsupportedDType {
            dtype: maxima.dtype(),
            op: "bryson_cost",
        }
        .into());
    }

    let n = shape[0];
    let data = maxima.contiguous().to_vec::<f64>();
    let mut out = vec![0.0f64; n * n];
    for (i, &v) in data.iter().enumerate() {
        if v == 0.0 {
            return Err(StateSpaceError::ZeroCostMaximum { index: i });
        }
        out[i * n + i] = weight / (v * v);
    }

    Ok(Tensor::from_slice(&out, &[n, n], maxima.device()))
}
