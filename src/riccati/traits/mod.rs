pub mod riccati;

pub use riccati::RiccatiAlgorithms;
