//! CPU implementation of state-space gain synthesis.

use crate::statespace::error::StateSpaceResult;
use crate::statespace::impl_generic::{bryson_cost_impl, kalman_gain_impl, lqr_gain_impl};
use crate::statespace::traits::state_space::StateSpaceAlgorithms;
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl StateSpaceAlgorithms<CpuRuntime> for CpuClient {
    fn lqr_gain(
        &self,
        a: &Tensor<CpuRuntime>,
        b: &Tensor<CpuRuntime>,
        q: &Tensor<CpuRuntime>,
        r: &Tensor<CpuRuntime>,
    ) -> StateSpaceResult<Tensor<CpuRuntime>> {
        lqr_gain_impl(self, a, b, q, r)
    }

    fn kalman_gain(
        &self,
        a: &Tensor<CpuRuntime>,
        c: &Tensor<CpuRuntime>,
        q: &Tensor<CpuRuntime>,
        r: &Tensor<CpuRuntime>,
    ) -> StateSpaceResult<Tensor<CpuRuntime>> {
        kalman_gain_impl(self, a, c, q, r)
    }

    fn bryson_cost(
        &self,
        maxima: &Tensor<CpuRuntime>,
        weight: f64,
    ) -> StateSpaceResult<Tensor<CpuRuntime>> {
        bryson_cost_impl(self, maxima, weight)
    }
}
