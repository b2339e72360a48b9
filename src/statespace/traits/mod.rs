pub mod state_space;

pub use state_space::StateSpaceAlgorithms;
