//! Flat-buffer entry points for callers without tensor types.
//!
//! Matrices cross this boundary as caller-owned `&[f64]` slices in
//! row-major order, with the state and input counts declared alongside.
//! Every slice length is checked against the declared dimensions before
//! any tensor is constructed, so a mismatched call performs no numerical
//! allocation at all. The returned `Vec<f64>` is owned by the caller;
//! dropping it is the release that a C-style boundary would need a paired
//! cleanup call for.

use super::error::{RiccatiError, RiccatiResult};
use super::traits::riccati::RiccatiAlgorithms;
use numr::runtime::cpu::{CpuClient, CpuDevice};
use numr::tensor::Tensor;

/// Solve the DARE from flat row-major buffers.
///
/// `a` is `states`×`states`, `b` is `states`×`inputs`, `q` is
/// `states`×`states`, `r` is `inputs`×`inputs`. Returns X as a row-major
/// `states`×`states` buffer.
pub fn solve_dare_raw(
    a: &[f64],
    b: &[f64],
    q: &[f64],
    r: &[f64],
    states: usize,
    inputs: usize,
) -> RiccatiResult<Vec<f64>> {
    check_len("a", a.len(), states, states)?;
    check_len("b", b.len(), states, inputs)?;
    check_len("q", q.len(), states, states)?;
    check_len("r", r.len(), inputs, inputs)?;

    let device = CpuDevice::new();
    let client = CpuClient::new(device.clone());

    let a = Tensor::from_slice(a, &[states, states], &device);
    let b = Tensor::from_slice(b, &[states, inputs], &device);
    let q = Tensor::from_slice(q, &[states, states], &device);
    let r = Tensor::from_slice(r, &[inputs, inputs], &device);

    let x = client.solve_dare(&a, &b, &q, &r)?;
    Ok(x.to_vec::<f64>())
}

fn check_len(arg: &'static str, len: usize, rows: usize, cols: usize) -> RiccatiResult<()> {
    if rows == 0 || cols == 0 || len != rows * cols {
        return Err(RiccatiError::InvalidDimension {
            arg,
            expected: format!("{rows}×{cols} = {} elements", rows * cols),
            got: vec![len],
        });
    }
    Ok(())
}
