pub mod cost;
pub mod kalman;
pub mod lqr;

pub use cost::bryson_cost_impl;
pub use kalman::kalman_gain_impl;
pub use lqr::lqr_gain_impl;
