//! CPU implementation of the Riccati solver.

use crate::riccati::error::RiccatiResult;
use crate::riccati::impl_generic::solve_dare_impl;
use crate::riccati::traits::riccati::RiccatiAlgorithms;
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl RiccatiAlgorithms<CpuRuntime> for CpuClient {
    fn solve_dare(
        &self,
        a: &Tensor<CpuRuntime>,
        b: &Tensor<CpuRuntime>,
        q: &Tensor<CpuRuntime>,
        r: &Tensor<CpuRuntime>,
    ) -> RiccatiResult<Tensor<CpuRuntime>> {
        solve_dare_impl(self, a, b, q, r)
    }
}
