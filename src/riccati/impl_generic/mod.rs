pub mod dare;
pub mod ordqz;
pub mod pencil;
pub mod validate;

pub use dare::solve_dare_impl;
pub use ordqz::{ordqz_stable_impl, OrderedQz};
pub use pencil::build_symplectic_pencil;
pub use validate::validate_dare_inputs;
